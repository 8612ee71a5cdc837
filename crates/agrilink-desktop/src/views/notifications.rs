//! Paginated notification inbox

use agrilink_core::api::ApiResult;
use agrilink_core::listing::{PagedCollection, PagedQuery};
use agrilink_core::models::{Notification, Page, ReadFilter};
use agrilink_core::presence::format_relative_time;
use agrilink_core::{ApiClient, Role};
use chrono::Utc;
use dioxus::prelude::*;

use crate::components::{Alert, Button, ButtonVariant, Pagination};
use crate::state::AppState;

const PAGE_SIZE: u32 = 20;

async fn load_page(
    api: &ApiClient,
    role: Role,
    page: u32,
    limit: u32,
    filter: ReadFilter,
) -> ApiResult<Page<Notification>> {
    match role {
        Role::Farmer => api.farmer().notifications(page, limit, filter).await,
        Role::Employee => api.employee().notifications(page, limit, filter).await,
        Role::Admin => api.admin().notifications(page, limit, filter).await,
    }
}

async fn mark_read(api: &ApiClient, role: Role, id: &str) -> ApiResult<()> {
    match role {
        Role::Farmer => api.farmer().mark_notification_read(id).await,
        Role::Employee => api.employee().mark_notification_read(id).await,
        Role::Admin => api.admin().mark_notification_read(id).await,
    }
}

fn filter_value(filter: ReadFilter) -> &'static str {
    match filter {
        ReadFilter::All => "all",
        ReadFilter::Unread => "unread",
        ReadFilter::Read => "read",
    }
}

fn parse_filter(value: &str) -> ReadFilter {
    match value {
        "unread" => ReadFilter::Unread,
        "read" => ReadFilter::Read,
        _ => ReadFilter::All,
    }
}

#[component]
pub fn Notifications(role: Role) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut collection = use_signal(|| {
        PagedCollection::<Notification, ReadFilter>::new(PagedQuery::new(
            PAGE_SIZE,
            ReadFilter::All,
        ))
    });
    let mut version = use_signal(|| 0_u64);
    let mut action_error = use_signal(|| None::<String>);

    use_effect(move || {
        version();
        let Some(api) = state.api() else {
            return;
        };
        let ticket = collection.write().begin_fetch();
        spawn(async move {
            let query = &ticket.query;
            let result = load_page(&api, role, query.page(), query.limit(), *query.filters())
                .await
                .map_err(|error| state.describe_error(&error));
            if !collection.write().apply(&ticket, result) {
                tracing::debug!("Ignored notifications for an older query");
            }
        });
    });

    let read_one = move |id: String| {
        let Some(api) = state.api() else {
            return;
        };
        spawn(async move {
            match mark_read(&api, role, &id).await {
                Ok(()) => collection.write().update_items(|items| {
                    if let Some(notification) = items.iter_mut().find(|item| item.id == id) {
                        notification.read = true;
                    }
                }),
                Err(error) => action_error.set(Some(state.describe_error(&error))),
            }
        });
    };

    let read_all = move |_| {
        let Some(api) = state.api() else {
            return;
        };
        spawn(async move {
            let result = match role {
                Role::Farmer => api.farmer().mark_all_read().await,
                Role::Employee => api.employee().mark_all_read().await,
                Role::Admin => return,
            };
            match result {
                Ok(()) => *version.write() += 1,
                Err(error) => action_error.set(Some(state.describe_error(&error))),
            }
        });
    };

    let snapshot = collection.read();
    let info = snapshot.page_info();
    let loading = snapshot.is_loading();
    let load_error = snapshot.error().map(str::to_string);
    let current_filter = filter_value(*snapshot.query().filters());
    let items = snapshot.items().to_vec();
    drop(snapshot);
    let now = Utc::now();

    rsx! {
        div {
            if let Some(message) = load_error {
                Alert { message }
            }
            if let Some(message) = action_error() {
                Alert { message }
            }

            div {
                style: "display: flex; gap: 10px; align-items: center; margin-bottom: 14px;",
                select {
                    style: "padding: 8px; border-radius: 6px;",
                    value: "{current_filter}",
                    onchange: move |evt| {
                        collection.write().set_filters(parse_filter(&evt.value()));
                        *version.write() += 1;
                    },
                    option { value: "all", "All" }
                    option { value: "unread", "Unread" }
                    option { value: "read", "Read" }
                }
                if role != Role::Admin {
                    Button { variant: ButtonVariant::Secondary, onclick: read_all, "Mark all read" }
                }
                if loading {
                    span { style: "font-size: 12px; color: {colors.text_muted};", "Loading..." }
                }
            }

            if !loading && items.is_empty() {
                div {
                    style: "padding: 24px; text-align: center; color: {colors.text_muted};",
                    "No notifications"
                }
            }

            for notification in items {
                {
                    let priority = notification.priority();
                    let priority_color = colors.priority(priority);
                    let priority_label = priority.label();
                    let age = format_relative_time(notification.created_at, now);
                    let weight = if notification.read { "400" } else { "600" };
                    let id = notification.id.clone();
                    rsx! {
                        div {
                            key: "{notification.id}",
                            style: "
                                display: flex;
                                gap: 12px;
                                align-items: center;
                                padding: 10px 12px;
                                border-bottom: 1px solid {colors.border};
                                border-left: 3px solid {priority_color};
                            ",
                            div {
                                style: "flex: 1;",
                                div { style: "font-weight: {weight};", "{notification.message}" }
                                div {
                                    style: "font-size: 12px; color: {colors.text_muted};",
                                    "{age} · {priority_label} priority"
                                }
                            }
                            if !notification.read {
                                Button {
                                    variant: ButtonVariant::Secondary,
                                    onclick: move |_| read_one(id.clone()),
                                    "Mark read"
                                }
                            }
                        }
                    }
                }
            }

            Pagination {
                info,
                loading,
                onprevious: move |()| {
                    if collection.write().previous_page() {
                        *version.write() += 1;
                    }
                },
                onnext: move |()| {
                    if collection.write().next_page() {
                        *version.write() += 1;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn filter_select_values_map_both_ways() {
        for filter in [ReadFilter::All, ReadFilter::Unread, ReadFilter::Read] {
            assert_eq!(parse_filter(filter_value(filter)), filter);
        }
        assert_eq!(parse_filter("bogus"), ReadFilter::All);
    }
}
