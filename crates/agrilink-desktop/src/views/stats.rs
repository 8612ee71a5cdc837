//! Region and employee statistics

use agrilink_core::models::{EmployeePerformance, RegionStats};
use agrilink_core::Route;
use dioxus::prelude::*;

use crate::components::Alert;
use crate::state::AppState;

#[component]
pub fn Stats() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut regions = use_signal(Vec::<RegionStats>::new);
    let mut performance = use_signal(Vec::<EmployeePerformance>::new);
    let mut error = use_signal(|| None::<String>);

    use_effect(move || {
        let Some(api) = state.api() else {
            return;
        };
        if let Some(cached) = state
            .preloader()
            .cached_as::<Vec<RegionStats>>(Route::AdminStats)
        {
            regions.set(cached);
        }
        spawn(async move {
            match api.admin().region_stats().await {
                Ok(loaded) => regions.set(loaded),
                Err(load_error) => error.set(Some(state.describe_error(&load_error))),
            }
            match api.admin().performance().await {
                Ok(loaded) => performance.set(loaded),
                Err(load_error) => error.set(Some(state.describe_error(&load_error))),
            }
        });
    });

    let region_rows = regions();
    let performance_rows = performance();

    rsx! {
        div {
            if let Some(message) = error() {
                Alert { message }
            }

            h3 { style: "font-size: 15px;", "Reports by region" }
            table {
                style: "width: 100%; border-collapse: collapse; font-size: 13px; margin-bottom: 28px;",
                thead {
                    tr {
                        style: "text-align: left; color: {colors.text_secondary};",
                        th { "Region" }
                        th { "Total" }
                        th { "Pending" }
                        th { "In progress" }
                        th { "Solved" }
                        th { "Solved %" }
                    }
                }
                tbody {
                    for row in region_rows {
                        {
                            let ratio = format!("{:.0}%", row.solved_ratio());
                            rsx! {
                                tr {
                                    key: "{row.region}",
                                    style: "border-bottom: 1px solid {colors.border};",
                                    td { "{row.region}" }
                                    td { "{row.total_reports}" }
                                    td { "{row.pending}" }
                                    td { "{row.in_progress}" }
                                    td { "{row.solved}" }
                                    td { "{ratio}" }
                                }
                            }
                        }
                    }
                }
            }

            h3 { style: "font-size: 15px;", "Employee performance" }
            table {
                style: "width: 100%; border-collapse: collapse; font-size: 13px;",
                thead {
                    tr {
                        style: "text-align: left; color: {colors.text_secondary};",
                        th { "Employee" }
                        th { "Handled" }
                        th { "Solved" }
                        th { "Avg. resolution" }
                    }
                }
                tbody {
                    for row in performance_rows {
                        {
                            let employee = row.employee.label().to_string();
                            let resolution = format_hours(row.average_resolution_hours);
                            rsx! {
                                tr {
                                    style: "border-bottom: 1px solid {colors.border};",
                                    td { "{employee}" }
                                    td { "{row.reports_handled}" }
                                    td { "{row.reports_solved}" }
                                    td { "{resolution}" }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn format_hours(hours: Option<f64>) -> String {
    hours.map_or_else(|| "-".to_string(), |hours| format!("{hours:.1} h"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_resolution_time_shows_dash() {
        assert_eq!(format_hours(None), "-");
        assert_eq!(format_hours(Some(3.46)), "3.5 h");
    }
}
