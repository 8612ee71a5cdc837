//! Sign-in page

use agrilink_core::Route;
use dioxus::prelude::*;

use super::{AuthLayout, RouteLink};
use crate::components::{Alert, AlertKind, Button, Field};
use crate::state::AppState;

#[component]
pub fn Login() -> Element {
    let mut state = use_context::<AppState>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);
    let notice = use_hook(move || state.take_flash());

    let submit = move |_| {
        if submitting() {
            return;
        }
        let Some(api) = state.api() else {
            error.set(Some("The backend URL is not configured.".to_string()));
            return;
        };
        let (email_value, password_value) = (email(), password());
        error.set(None);
        submitting.set(true);

        spawn(async move {
            match api.auth().login(&email_value, &password_value).await {
                Ok(response) => {
                    if let Err(message) = state.sign_in(response) {
                        error.set(Some(message));
                    }
                }
                Err(login_error) => {
                    tracing::warn!("Sign-in failed: {}", login_error);
                    error.set(Some(login_error.user_message()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        AuthLayout {
            title: "Sign in to your account",
            if let Some(message) = notice {
                Alert { message, kind: AlertKind::Info }
            }
            if let Some(message) = error() {
                Alert { message }
            }
            Field {
                label: "Email",
                kind: "email",
                value: email(),
                oninput: move |value| email.set(value),
            }
            Field {
                label: "Password",
                kind: "password",
                value: password(),
                oninput: move |value| password.set(value),
            }
            Button {
                disabled: submitting(),
                onclick: submit,
                if submitting() { "Signing in..." } else { "Sign in" }
            }
            div {
                style: "display: flex; justify-content: space-between; margin-top: 16px;",
                RouteLink { label: "Create an account", route: Route::Signup }
                RouteLink { label: "Forgot password?", route: Route::ForgotPassword }
            }
        }
    }
}
