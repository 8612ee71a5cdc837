//! Inline alert shown at the top of a page

use dioxus::prelude::*;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertKind {
    #[default]
    Error,
    Info,
}

#[component]
pub fn Alert(message: String, #[props(default)] kind: AlertKind) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    let (fg, bg) = match kind {
        AlertKind::Error => (colors.error, colors.error_bg),
        AlertKind::Info => (colors.accent, colors.bg_tertiary),
    };

    rsx! {
        div {
            role: "alert",
            style: "
                padding: 10px 14px;
                margin-bottom: 12px;
                border-radius: 6px;
                border: 1px solid {fg};
                background: {bg};
                color: {fg};
                font-size: 13px;
            ",
            "{message}"
        }
    }
}
