//! One report in a list

use agrilink_core::models::Report;
use agrilink_core::presence::{format_relative_time, maps_link};
use chrono::Utc;
use dioxus::prelude::*;

use crate::state::AppState;

#[component]
pub fn ReportCard(report: Report, #[props(default)] actions: Element) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let status_color = colors.report_status(report.status);
    let age = format_relative_time(report.created_at, Utc::now());
    let farmer = report
        .farmer
        .as_ref()
        .map(|farmer| farmer.label().to_string());
    let map = report
        .coordinates()
        .map(|(latitude, longitude)| maps_link(latitude, longitude));

    rsx! {
        div {
            class: "report-card",
            style: "
                border: 1px solid {colors.border};
                border-left: 4px solid {status_color};
                border-radius: 6px;
                padding: 12px 16px;
                margin-bottom: 10px;
                background: {colors.bg_primary};
            ",
            div {
                style: "display: flex; gap: 10px; align-items: baseline;",
                strong { "{report.crop}" }
                span { style: "color: {colors.text_secondary};", "{report.region}" }
                span { style: "color: {status_color}; font-size: 12px;", "{report.status}" }
                if report.urgent {
                    span { style: "color: {colors.error}; font-size: 12px; font-weight: 700;", "URGENT" }
                }
                span { style: "flex: 1;" }
                span { style: "color: {colors.text_muted}; font-size: 12px;", "{age}" }
            }
            p {
                style: "margin: 6px 0; color: {colors.text_primary};",
                "{report.description}"
            }
            if let Some(farmer) = farmer {
                div { style: "font-size: 12px; color: {colors.text_secondary};", "Farmer: {farmer}" }
            }
            if let Some(diagnosis) = report.diagnosis.clone() {
                div { style: "font-size: 13px; margin-top: 4px;", "Diagnosis: {diagnosis}" }
            }
            if let Some(solution) = report.solution.clone() {
                div { style: "font-size: 13px;", "Solution: {solution}" }
            }
            if let Some(map) = map {
                a { href: "{map}", target: "_blank", style: "font-size: 12px; color: {colors.accent};", "Open in maps" }
            }
            div { style: "display: flex; gap: 8px; margin-top: 8px;", {actions} }
        }
    }
}
