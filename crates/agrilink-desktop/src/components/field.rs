//! Labelled input

use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn Field(
    label: String,
    value: String,
    #[props(default = "text".to_string())] kind: String,
    #[props(default)] placeholder: String,
    #[props(default)] multiline: bool,
    oninput: EventHandler<String>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let input_style = format!(
        "width: 100%; box-sizing: border-box; padding: 8px 10px; border: 1px solid {}; \
         border-radius: 6px; background: {}; color: {}; font-size: 14px;",
        colors.border, colors.bg_primary, colors.text_primary
    );

    rsx! {
        label {
            style: "display: block; margin-bottom: 12px; font-size: 13px; color: {colors.text_secondary};",
            div { style: "margin-bottom: 4px;", "{label}" }
            if multiline {
                textarea {
                    rows: 4,
                    placeholder: "{placeholder}",
                    value: "{value}",
                    style: "{input_style}",
                    oninput: move |evt| oninput.call(evt.value()),
                }
            } else {
                input {
                    r#type: "{kind}",
                    placeholder: "{placeholder}",
                    value: "{value}",
                    style: "{input_style}",
                    oninput: move |evt| oninput.call(evt.value()),
                }
            }
        }
    }
}
