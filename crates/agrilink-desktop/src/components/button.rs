//! Button component

use dioxus::prelude::*;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Destructive,
}

#[component]
pub fn Button(
    #[props(default)] variant: ButtonVariant,
    #[props(default)] disabled: bool,
    onclick: EventHandler<MouseEvent>,
    children: Element,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    let (bg, fg, border) = match variant {
        ButtonVariant::Primary => (colors.accent, colors.accent_text, colors.accent),
        ButtonVariant::Secondary => (colors.bg_primary, colors.text_primary, colors.border),
        ButtonVariant::Destructive => (colors.error, "#ffffff", colors.error),
    };
    let opacity = if disabled { "0.5" } else { "1" };

    rsx! {
        button {
            disabled,
            style: "
                padding: 6px 14px;
                border-radius: 6px;
                border: 1px solid {border};
                background: {bg};
                color: {fg};
                cursor: pointer;
                font-size: 13px;
                opacity: {opacity};
            ",
            onclick: move |evt| {
                if !disabled {
                    onclick.call(evt);
                }
            },
            {children}
        }
    }
}
