//! Previous/next controls for server-paginated lists

use agrilink_core::models::PageInfo;
use dioxus::prelude::*;

use super::{Button, ButtonVariant};
use crate::state::AppState;

#[component]
pub fn Pagination(
    info: PageInfo,
    #[props(default)] loading: bool,
    onprevious: EventHandler<()>,
    onnext: EventHandler<()>,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let total_pages = info.total_pages.max(1);

    rsx! {
        div {
            style: "
                display: flex;
                align-items: center;
                gap: 12px;
                padding: 12px 0;
                color: {colors.text_secondary};
                font-size: 13px;
            ",
            Button {
                variant: ButtonVariant::Secondary,
                disabled: loading || !info.has_previous(),
                onclick: move |_| onprevious.call(()),
                "Previous"
            }
            span { "Page {info.current_page} of {total_pages} ({info.total_items} total)" }
            Button {
                variant: ButtonVariant::Secondary,
                disabled: loading || !info.has_next(),
                onclick: move |_| onnext.call(()),
                "Next"
            }
        }
    }
}
