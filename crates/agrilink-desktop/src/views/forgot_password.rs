//! Password recovery: request a reset email, then set a new password with
//! the token from that email.

use agrilink_core::Route;
use dioxus::prelude::*;

use super::{AuthLayout, RouteLink};
use crate::components::{Alert, AlertKind, Button, ButtonVariant, Field};
use crate::state::AppState;

#[component]
pub fn ForgotPassword() -> Element {
    let state = use_context::<AppState>();
    let mut email = use_signal(String::new);
    let mut token = use_signal(String::new);
    let mut new_password = use_signal(String::new);
    let mut notice = use_signal(|| None::<String>);
    let mut error = use_signal(|| None::<String>);

    let request_reset = move |_| {
        let Some(api) = state.api() else {
            return;
        };
        let email_value = email();
        error.set(None);
        spawn(async move {
            match api.auth().forgot_password(&email_value).await {
                Ok(response) => notice.set(Some(or_default(
                    response.message,
                    "Check your inbox for a reset link.",
                ))),
                Err(reset_error) => error.set(Some(reset_error.user_message())),
            }
        });
    };

    let reset = move |_| {
        let Some(api) = state.api() else {
            return;
        };
        let (token_value, password_value) = (token(), new_password());
        error.set(None);
        spawn(async move {
            match api.auth().reset_password(&token_value, &password_value).await {
                Ok(response) => {
                    notice.set(Some(or_default(
                        response.message,
                        "Password updated. You can sign in now.",
                    )));
                    new_password.set(String::new());
                }
                Err(reset_error) => error.set(Some(reset_error.user_message())),
            }
        });
    };

    rsx! {
        AuthLayout {
            title: "Reset your password",
            if let Some(message) = notice() {
                Alert { message, kind: AlertKind::Info }
            }
            if let Some(message) = error() {
                Alert { message }
            }
            Field { label: "Email", kind: "email", value: email(), oninput: move |value| email.set(value) }
            Button { onclick: request_reset, "Send reset link" }

            hr { style: "margin: 20px 0; border: none; border-top: 1px solid #ccc;" }

            Field { label: "Reset token", value: token(), oninput: move |value| token.set(value) }
            Field {
                label: "New password",
                kind: "password",
                value: new_password(),
                oninput: move |value| new_password.set(value),
            }
            Button { variant: ButtonVariant::Secondary, onclick: reset, "Set new password" }
            div {
                style: "margin-top: 16px;",
                RouteLink { label: "Back to sign in", route: Route::Login }
            }
        }
    }
}

fn or_default(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
