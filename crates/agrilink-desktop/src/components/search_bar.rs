//! Search bar component

use dioxus::prelude::*;

use crate::state::AppState;

/// Text box that reports every keystroke to its parent.
#[component]
pub fn SearchBar(value: String, placeholder: String, oninput: EventHandler<String>) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    rsx! {
        input {
            r#type: "search",
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |evt| oninput.call(evt.value()),
            style: "
                flex: 1;
                min-width: 200px;
                padding: 8px 12px;
                border: 1px solid {colors.border};
                border-radius: 6px;
                font-size: 14px;
                background: {colors.bg_primary};
                color: {colors.text_primary};
                outline: none;
            ",
        }
    }
}
