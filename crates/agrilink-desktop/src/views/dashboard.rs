//! Landing page for each role

use agrilink_core::models::{RegionStats, Report, ReportStatus};
use agrilink_core::{Role, Route};
use dioxus::prelude::*;

use super::reports::load_reports;
use crate::components::{Alert, ReportCard};
use crate::state::AppState;

const RECENT_LIMIT: usize = 5;

/// Counts per status, in `ReportStatus::ALL` order.
fn status_counts(reports: &[Report]) -> [(ReportStatus, usize); 3] {
    ReportStatus::ALL.map(|status| {
        let count = reports
            .iter()
            .filter(|report| report.status == status)
            .count();
        (status, count)
    })
}

fn most_recent(mut reports: Vec<Report>, limit: usize) -> Vec<Report> {
    reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    reports.truncate(limit);
    reports
}

#[component]
pub fn Dashboard(role: Role) -> Element {
    if role == Role::Admin {
        rsx! { AdminOverview {} }
    } else {
        rsx! { ReportOverview { role } }
    }
}

#[component]
fn ReportOverview(role: Role) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut reports = use_signal(|| None::<Vec<Report>>);
    let mut error = use_signal(|| None::<String>);

    use_effect(move || {
        let Some(api) = state.api() else {
            return;
        };
        spawn(async move {
            match load_reports(&api, role).await {
                Ok(loaded) => reports.set(Some(loaded)),
                Err(load_error) => error.set(Some(state.describe_error(&load_error))),
            }
        });
    });

    let greeting = state
        .user()
        .map(|user| format!("Welcome back, {}", user.display_name()))
        .unwrap_or_default();
    let loaded = reports();
    let counts = loaded.as_deref().map(status_counts);
    let recent = loaded.map(|all| most_recent(all, RECENT_LIMIT)).unwrap_or_default();
    let reports_route = if role == Role::Employee {
        Route::EmployeeReports
    } else {
        Route::FarmerReports
    };

    rsx! {
        div {
            h2 { style: "font-size: 18px; margin: 0 0 16px 0;", "{greeting}" }
            if let Some(message) = error() {
                Alert { message }
            }
            if let Some(counts) = counts {
                div {
                    style: "display: flex; gap: 12px; margin-bottom: 24px;",
                    for (status, count) in counts {
                        {
                            let color = colors.report_status(status);
                            let label = status.as_str();
                            rsx! {
                                StatTile { label, value: count.to_string(), color }
                            }
                        }
                    }
                }
            } else {
                div { style: "color: {colors.text_muted}; margin-bottom: 24px;", "Loading reports..." }
            }
            div {
                style: "display: flex; justify-content: space-between; align-items: baseline;",
                h3 { style: "font-size: 15px;", "Recent reports" }
                a {
                    style: "color: {colors.accent}; cursor: pointer; font-size: 13px;",
                    onclick: move |_| state.navigate(reports_route),
                    "View all"
                }
            }
            for report in recent {
                ReportCard { key: "{report.id}", report }
            }
        }
    }
}

#[component]
fn AdminOverview() -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut regions = use_signal(|| None::<Vec<RegionStats>>);
    let mut error = use_signal(|| None::<String>);

    use_effect(move || {
        let Some(api) = state.api() else {
            return;
        };
        if let Some(cached) = state
            .preloader()
            .cached_as::<Vec<RegionStats>>(Route::AdminDashboard)
        {
            regions.set(Some(cached));
        }
        spawn(async move {
            match api.admin().region_stats().await {
                Ok(loaded) => regions.set(Some(loaded)),
                Err(load_error) => error.set(Some(state.describe_error(&load_error))),
            }
        });
    });

    let loaded = regions().unwrap_or_default();
    let totals = loaded.iter().fold(RegionStats::default(), |mut sum, row| {
        sum.total_reports += row.total_reports;
        sum.pending += row.pending;
        sum.in_progress += row.in_progress;
        sum.solved += row.solved;
        sum
    });
    let solved = format!("{:.0}%", totals.solved_ratio());
    let region_count = loaded.len();

    rsx! {
        div {
            if let Some(message) = error() {
                Alert { message }
            }
            div {
                style: "display: flex; gap: 12px; margin-bottom: 24px;",
                StatTile { label: "total", value: totals.total_reports.to_string(), color: colors.accent }
                StatTile {
                    label: "pending",
                    value: totals.pending.to_string(),
                    color: colors.report_status(ReportStatus::Pending),
                }
                StatTile {
                    label: "in progress",
                    value: totals.in_progress.to_string(),
                    color: colors.report_status(ReportStatus::InProgress),
                }
                StatTile { label: "solved", value: solved, color: colors.success }
            }
            div {
                style: "color: {colors.text_secondary}; font-size: 13px;",
                "{region_count} regions reporting. "
                a {
                    style: "color: {colors.accent}; cursor: pointer;",
                    onclick: move |_| state.navigate(Route::AdminStats),
                    "Open statistics"
                }
            }
        }
    }
}

#[component]
fn StatTile(
    #[props(into)] label: String,
    #[props(into)] value: String,
    #[props(into)] color: String,
) -> Element {
    let state = use_context::<AppState>();
    let colors = (state.theme)().palette();

    rsx! {
        div {
            style: "
                flex: 1;
                padding: 14px 16px;
                border: 1px solid {colors.border};
                border-top: 3px solid {color};
                border-radius: 8px;
                background: {colors.bg_secondary};
            ",
            div { style: "font-size: 22px; font-weight: 600;", "{value}" }
            div { style: "font-size: 12px; color: {colors.text_muted}; text-transform: capitalize;", "{label}" }
        }
    }
}
