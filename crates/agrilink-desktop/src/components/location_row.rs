//! One employee position with its activity tint

use agrilink_core::models::EmployeeLocation;
use agrilink_core::presence::{format_relative_time, maps_link, ActivityRecency};
use chrono::Utc;
use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn LocationRow(location: EmployeeLocation) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let now = Utc::now();
    let recency = ActivityRecency::classify(location.last_activity, now);
    let seen = format_relative_time(location.last_activity, now);
    let map = maps_link(location.latitude, location.longitude);
    let status_color = colors.presence(location.status);
    let tint = recency.tint();
    let recency_label = recency.label();
    let employee = location.employee.label().to_string();
    let address = location.address.clone().unwrap_or_default();
    let distance = location
        .distance_km
        .map(|km| format!("{km:.1} km"))
        .unwrap_or_default();

    rsx! {
        tr {
            style: "border-bottom: 1px solid {colors.border};",
            td {
                span {
                    style: "
                        display: inline-block;
                        width: 10px;
                        height: 10px;
                        border-radius: 50%;
                        margin-right: 8px;
                        background: {tint};
                    ",
                    title: "{recency_label}",
                }
                "{employee}"
            }
            td { style: "color: {status_color};", "{location.status}" }
            td { "{seen}" }
            td { style: "color: {colors.text_secondary};", "{address}" }
            td { "{distance}" }
            td { a { href: "{map}", target: "_blank", style: "color: {colors.accent};", "Map" } }
        }
    }
}
