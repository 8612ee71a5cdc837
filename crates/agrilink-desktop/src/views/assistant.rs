//! AI assistant chat for admins

use dioxus::prelude::*;

use crate::components::{Alert, Button, Field};
use crate::state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Speaker {
    Admin,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ChatLine {
    speaker: Speaker,
    text: String,
}

#[component]
pub fn Assistant() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut history = use_signal(Vec::<ChatLine>::new);
    let mut draft = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut waiting = use_signal(|| false);

    let send = move |_| {
        let message = draft().trim().to_string();
        if message.is_empty() || waiting() {
            return;
        }
        let Some(api) = state.api() else {
            return;
        };
        history.write().push(ChatLine {
            speaker: Speaker::Admin,
            text: message.clone(),
        });
        draft.set(String::new());
        error.set(None);
        waiting.set(true);
        spawn(async move {
            match api.admin().chat(&message).await {
                Ok(reply) => history.write().push(ChatLine {
                    speaker: Speaker::Assistant,
                    text: reply.reply,
                }),
                Err(chat_error) => error.set(Some(state.describe_error(&chat_error))),
            }
            waiting.set(false);
        });
    };

    let lines = history();

    rsx! {
        div {
            style: "max-width: 720px;",
            if lines.is_empty() {
                div {
                    style: "color: {colors.text_muted}; margin-bottom: 16px;",
                    "Ask about crop diseases, treatments or the reports in your regions."
                }
            }
            for (index, line) in lines.into_iter().enumerate() {
                {
                    let (align, background, who) = match line.speaker {
                        Speaker::Admin => ("flex-end", colors.bg_tertiary, "You"),
                        Speaker::Assistant => ("flex-start", colors.bg_secondary, "Assistant"),
                    };
                    rsx! {
                        div {
                            key: "{index}",
                            style: "display: flex; justify-content: {align}; margin-bottom: 10px;",
                            div {
                                style: "
                                    max-width: 80%;
                                    padding: 10px 14px;
                                    border-radius: 8px;
                                    background: {background};
                                    white-space: pre-wrap;
                                ",
                                div { style: "font-size: 11px; color: {colors.text_muted}; margin-bottom: 4px;", "{who}" }
                                "{line.text}"
                            }
                        }
                    }
                }
            }
            if waiting() {
                div { style: "color: {colors.text_muted}; margin-bottom: 10px;", "Thinking..." }
            }
            if let Some(message) = error() {
                Alert { message }
            }
            Field {
                label: "Message",
                multiline: true,
                value: draft(),
                oninput: move |value| draft.set(value),
            }
            Button { disabled: waiting(), onclick: send, "Send" }
        }
    }
}
