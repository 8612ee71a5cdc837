//! Top bar: page title, signed-in user and sign-out

use agrilink_core::User;
use dioxus::prelude::*;

use super::{Button, ButtonVariant};
use crate::state::AppState;

#[component]
pub fn TopBar(user: User) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let title = (state.route)().title();
    let name = user.display_name().to_string();
    let role = user.role.label();
    let region = user
        .region
        .as_deref()
        .map(|region| format!(" · {region}"))
        .unwrap_or_default();

    rsx! {
        header {
            style: "
                display: flex;
                align-items: center;
                gap: 16px;
                padding: 12px 20px;
                border-bottom: 1px solid {colors.border};
                background: {colors.bg_primary};
            ",
            h1 { style: "font-size: 18px; margin: 0; flex: 1;", "{title}" }
            div {
                style: "text-align: right; font-size: 13px;",
                div { style: "font-weight: 600;", "{name}" }
                div {
                    style: "color: {colors.text_secondary};",
                    "{role}{region}"
                }
            }
            Button {
                variant: ButtonVariant::Secondary,
                onclick: move |_| state.sign_out(),
                "Sign out"
            }
        }
    }
}
