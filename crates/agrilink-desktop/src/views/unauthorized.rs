//! Shown when a signed-in role opens another role's page

use agrilink_core::Route;
use dioxus::prelude::*;

use super::AuthLayout;
use crate::components::{Button, ButtonVariant};
use crate::state::AppState;

#[component]
pub fn Unauthorized() -> Element {
    let mut state = use_context::<AppState>();
    let home = state.role().map_or(Route::Login, Route::home_for);

    rsx! {
        AuthLayout {
            title: "Access denied",
            p { "Your account cannot open this page." }
            div {
                style: "display: flex; gap: 8px;",
                Button { onclick: move |_| state.navigate(home), "Go to my dashboard" }
                Button {
                    variant: ButtonVariant::Secondary,
                    onclick: move |_| state.sign_out(),
                    "Sign in as someone else"
                }
            }
        }
    }
}
