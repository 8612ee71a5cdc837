//! Account creation page

use agrilink_core::api::{SignupOutcome, SignupRequest};
use agrilink_core::util::normalize_text_option;
use agrilink_core::{Role, Route};
use dioxus::prelude::*;

use super::{AuthLayout, RouteLink};
use crate::components::{Alert, Button, Field};
use crate::state::AppState;

const SIGNUP_ROLES: [Role; 2] = [Role::Farmer, Role::Employee];

#[component]
pub fn Signup() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut region = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut role = use_signal(|| Role::Farmer);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let submit = move |_| {
        if submitting() {
            return;
        }
        let Some(api) = state.api() else {
            error.set(Some("The backend URL is not configured.".to_string()));
            return;
        };
        let request = SignupRequest {
            username: username().trim().to_string(),
            email: email().trim().to_string(),
            password: password(),
            role: role(),
            region: normalize_text_option(Some(region())),
            phone: normalize_text_option(Some(phone())),
        };
        error.set(None);
        submitting.set(true);

        spawn(async move {
            match api.auth().signup(&request).await {
                Ok(SignupOutcome::SignedIn(response)) => {
                    if let Err(message) = state.sign_in(response) {
                        error.set(Some(message));
                    }
                }
                Ok(SignupOutcome::AccountCreated(_)) => {
                    state
                        .flash
                        .set(Some("Account created. Please sign in.".to_string()));
                    state.navigate(Route::Login);
                }
                Err(signup_error) => error.set(Some(signup_error.user_message())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        AuthLayout {
            title: "Create an account",
            if let Some(message) = error() {
                Alert { message }
            }
            Field { label: "Username", value: username(), oninput: move |value| username.set(value) }
            Field { label: "Email", kind: "email", value: email(), oninput: move |value| email.set(value) }
            Field {
                label: "Password",
                kind: "password",
                placeholder: "At least 6 characters",
                value: password(),
                oninput: move |value| password.set(value),
            }
            label {
                style: "display: block; margin-bottom: 12px; font-size: 13px; color: {colors.text_secondary};",
                div { style: "margin-bottom: 4px;", "I am a" }
                select {
                    style: "width: 100%; padding: 8px; border-radius: 6px;",
                    onchange: move |evt| {
                        if let Ok(selected) = evt.value().parse::<Role>() {
                            role.set(selected);
                        }
                    },
                    for option_role in SIGNUP_ROLES {
                        {
                            let label = option_role.label();
                            rsx! {
                                option {
                                    value: "{option_role}",
                                    selected: role() == option_role,
                                    "{label}"
                                }
                            }
                        }
                    }
                }
            }
            Field { label: "Region (optional)", value: region(), oninput: move |value| region.set(value) }
            Field { label: "Phone (optional)", value: phone(), oninput: move |value| phone.set(value) }
            Button {
                disabled: submitting(),
                onclick: submit,
                if submitting() { "Creating account..." } else { "Create account" }
            }
            div {
                style: "margin-top: 16px;",
                RouteLink { label: "Already registered? Sign in", route: Route::Login }
            }
        }
    }
}
