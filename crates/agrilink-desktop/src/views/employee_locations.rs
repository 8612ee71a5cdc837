//! Field staff positions for admins: a paginated, filterable table and a
//! nearby search around a point.

use agrilink_core::api::{LocationFilters, NearbyQuery, DEFAULT_NEARBY_RADIUS_KM};
use agrilink_core::listing::{PagedCollection, PagedQuery};
use agrilink_core::models::{EmployeeLocation, PresenceStatus};
use agrilink_core::util::normalize_text_option;
use dioxus::prelude::*;

use crate::components::{Alert, Button, ButtonVariant, Field, LocationRow, Pagination, SearchBar};
use crate::state::AppState;

const PAGE_SIZE: u32 = 15;
const ANY_STATUS: &str = "any";

#[component]
pub fn EmployeeLocations() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut collection = use_signal(|| {
        PagedCollection::<EmployeeLocation, LocationFilters>::new(PagedQuery::new(
            PAGE_SIZE,
            LocationFilters::default(),
        ))
    });
    let mut version = use_signal(|| 0_u64);

    let mut near_lat = use_signal(String::new);
    let mut near_lng = use_signal(String::new);
    let mut near_radius = use_signal(|| DEFAULT_NEARBY_RADIUS_KM.to_string());
    let mut nearby = use_signal(|| None::<Vec<EmployeeLocation>>);
    let mut nearby_error = use_signal(|| None::<String>);

    use_effect(move || {
        version();
        let Some(api) = state.api() else {
            return;
        };
        let ticket = collection.write().begin_fetch();
        spawn(async move {
            let query = &ticket.query;
            let result = api
                .admin()
                .employee_locations(query.page(), query.limit(), query.filters())
                .await
                .map_err(|error| state.describe_error(&error));
            collection.write().apply(&ticket, result);
        });
    });

    let search_nearby = move |_| {
        let Some(api) = state.api() else {
            return;
        };
        let query = match parse_nearby(&near_lat(), &near_lng(), &near_radius()) {
            Ok(query) => query,
            Err(message) => {
                nearby_error.set(Some(message));
                return;
            }
        };
        nearby_error.set(None);
        spawn(async move {
            match api.admin().nearby(&query).await {
                Ok(found) => {
                    tracing::debug!("Found {} employees nearby", found.len());
                    nearby.set(Some(found));
                }
                Err(error) => nearby_error.set(Some(state.describe_error(&error))),
            }
        });
    };

    let snapshot = collection.read();
    let info = snapshot.page_info();
    let loading = snapshot.is_loading();
    let load_error = snapshot.error().map(str::to_string);
    let search = snapshot.query().filters().search.clone().unwrap_or_default();
    let status_value = snapshot
        .query()
        .filters()
        .status
        .map_or(ANY_STATUS, PresenceStatus::as_str);
    let items = snapshot.items().to_vec();
    drop(snapshot);

    rsx! {
        div {
            if let Some(message) = load_error {
                Alert { message }
            }

            div {
                style: "display: flex; gap: 10px; align-items: center; margin-bottom: 14px;",
                SearchBar {
                    value: search,
                    placeholder: "Search by name or address",
                    oninput: move |value: String| {
                        collection
                            .write()
                            .update_filters(|filters| filters.search = normalize_text_option(Some(value)));
                        *version.write() += 1;
                    },
                }
                select {
                    style: "padding: 8px; border-radius: 6px;",
                    value: "{status_value}",
                    onchange: move |evt| {
                        let status = evt.value().parse::<PresenceStatus>().ok();
                        collection.write().update_filters(|filters| filters.status = status);
                        *version.write() += 1;
                    },
                    option { value: "{ANY_STATUS}", "Any status" }
                    for status in PresenceStatus::ALL {
                        {
                            let label = status.as_str();
                            rsx! { option { value: "{label}", "{label}" } }
                        }
                    }
                }
            }

            LocationTable { locations: items, empty_text: "No employees match the filters" }

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

            h3 { style: "margin-top: 28px; font-size: 15px;", "Nearby search" }
            if let Some(message) = nearby_error() {
                Alert { message }
            }
            div {
                style: "display: flex; gap: 12px; align-items: flex-end;",
                Field { label: "Latitude", value: near_lat(), oninput: move |value| near_lat.set(value) }
                Field { label: "Longitude", value: near_lng(), oninput: move |value| near_lng.set(value) }
                Field { label: "Radius (km)", value: near_radius(), oninput: move |value| near_radius.set(value) }
                div {
                    style: "margin-bottom: 12px; display: flex; gap: 8px;",
                    Button { onclick: search_nearby, "Search" }
                    if nearby().is_some() {
                        Button {
                            variant: ButtonVariant::Secondary,
                            onclick: move |_| nearby.set(None),
                            "Clear"
                        }
                    }
                }
            }
            if let Some(found) = nearby() {
                div {
                    style: "font-size: 12px; color: {colors.text_muted}; margin-bottom: 6px;",
                    "Closest first"
                }
                LocationTable { locations: found, empty_text: "Nobody within that radius" }
            }
        }
    }
}

#[component]
fn LocationTable(locations: Vec<EmployeeLocation>, empty_text: String) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    if locations.is_empty() {
        return rsx! {
            div { style: "padding: 16px; color: {colors.text_muted};", "{empty_text}" }
        };
    }

    rsx! {
        table {
            style: "width: 100%; border-collapse: collapse; font-size: 13px;",
            thead {
                tr {
                    style: "text-align: left; color: {colors.text_secondary};",
                    th { "Employee" }
                    th { "Status" }
                    th { "Last seen" }
                    th { "Address" }
                    th { "Distance" }
                    th {}
                }
            }
            tbody {
                for location in locations {
                    LocationRow { location }
                }
            }
        }
    }
}

fn parse_nearby(latitude: &str, longitude: &str, radius: &str) -> Result<NearbyQuery, String> {
    let parse = |raw: &str, name: &str| {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| format!("{name} must be a number"))
    };
    let mut query = NearbyQuery::new(parse(latitude, "Latitude")?, parse(longitude, "Longitude")?);
    if !radius.trim().is_empty() {
        query.radius_km = parse(radius, "Radius")?;
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn nearby_form_uses_default_radius_when_blank() {
        let query = parse_nearby("-1.28", "36.82", " ").unwrap();
        assert_eq!(query.radius_km, DEFAULT_NEARBY_RADIUS_KM);
        assert_eq!(parse_nearby("-1.28", "36.82", "25").unwrap().radius_km, 25.0);
    }

    #[test]
    fn nearby_form_names_the_bad_field() {
        assert_eq!(
            parse_nearby("-1.28", "east", "5").unwrap_err(),
            "Longitude must be a number"
        );
    }
}
