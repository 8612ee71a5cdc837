//! Sidebar with the signed-in role's menu

use agrilink_core::{menu_for, Role};
use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn Sidebar(role: Role) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let current = (state.route)();

    rsx! {
        aside {
            class: "sidebar",
            style: "
                width: 220px;
                background: {colors.bg_secondary};
                border-right: 1px solid {colors.border};
                padding: 16px;
                overflow-y: auto;
            ",

            h2 {
                style: "
                    font-size: 16px;
                    font-weight: 700;
                    margin: 0 0 16px 0;
                    color: {colors.accent};
                ",
                "AgriLink"
            }

            for item in menu_for(role) {
                {
                    let target = item.route;
                    let is_active = current == target;
                    let bg = if is_active { colors.accent } else { "transparent" };
                    let fg = if is_active { colors.accent_text } else { colors.text_primary };
                    rsx! {
                        div {
                            key: "{target}",
                            style: "
                                padding: 8px 10px;
                                border-radius: 6px;
                                cursor: pointer;
                                margin-bottom: 4px;
                                background: {bg};
                                color: {fg};
                                display: flex;
                                gap: 8px;
                                align-items: center;
                            ",
                            onclick: move |_| state.navigate(target),
                            span { "{item.icon}" }
                            span { "{item.label}" }
                        }
                    }
                }
            }
        }
    }
}
