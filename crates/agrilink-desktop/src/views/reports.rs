//! Report list for every role, filtered locally by search text and status.

use std::collections::HashMap;

use agrilink_core::api::ApiResult;
use agrilink_core::listing::{FilteredView, StatusFilter};
use agrilink_core::models::{Diagnosis, Report, ReportStatus};
use agrilink_core::{ApiClient, Role, Route};
use dioxus::prelude::*;

use crate::components::{Alert, Button, ButtonVariant, Field, ReportCard, SearchBar};
use crate::state::AppState;

const ALL_STATUSES: &str = "all";

/// Fetches the report list of the role's tree.
pub async fn load_reports(api: &ApiClient, role: Role) -> ApiResult<Vec<Report>> {
    match role {
        Role::Farmer => api.farmer().reports().await,
        Role::Employee => api.employee().reports().await,
        Role::Admin => api.admin().reports().await,
    }
}

#[derive(Debug, Clone)]
enum ReportAction {
    SetStatus(ReportStatus),
    Escalate,
    Diagnose(Diagnosis),
    Analyze,
    Delete,
}

#[component]
pub fn Reports(role: Role) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let mut view = use_signal(|| FilteredView::<Report>::new(Vec::new()));
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| None::<String>);
    let mut reload = use_signal(|| 0_u64);
    let mut analyses = use_signal(HashMap::<String, String>::new);
    let mut diagnosing = use_signal(|| None::<String>);
    let mut diagnosis_text = use_signal(String::new);
    let mut solution_text = use_signal(String::new);
    let mut products_text = use_signal(String::new);

    use_effect(move || {
        reload();
        let Some(api) = state.api() else {
            return;
        };
        if role == Role::Admin {
            if let Some(cached) = state
                .preloader()
                .cached_as::<Vec<Report>>(Route::AdminReports)
            {
                view.write().set_source(cached);
            }
        }
        loading.set(true);
        spawn(async move {
            match load_reports(&api, role).await {
                Ok(reports) => {
                    tracing::debug!("Loaded {} reports", reports.len());
                    view.write().set_source(reports);
                    error.set(None);
                }
                Err(load_error) => error.set(Some(state.describe_error(&load_error))),
            }
            loading.set(false);
        });
    });

    let act = move |report_id: String, action: ReportAction| {
        let Some(api) = state.api() else {
            return;
        };
        spawn(async move {
            let result = match action {
                ReportAction::SetStatus(status) => api
                    .employee()
                    .update_status(&report_id, status)
                    .await
                    .map(|_| None),
                ReportAction::Escalate => api.employee().escalate(&report_id).await.map(|()| None),
                ReportAction::Diagnose(payload) => api
                    .admin()
                    .diagnose(&report_id, &payload)
                    .await
                    .map(|_| None),
                ReportAction::Analyze => api
                    .admin()
                    .analyze_report(&report_id)
                    .await
                    .map(|analysis| Some(analysis.analysis)),
                ReportAction::Delete => api.admin().delete_report(&report_id).await.map(|()| None),
            };
            match result {
                Ok(Some(analysis)) => {
                    analyses.write().insert(report_id, analysis);
                }
                Ok(None) => {
                    diagnosing.set(None);
                    *reload.write() += 1;
                }
                Err(action_error) => error.set(Some(state.describe_error(&action_error))),
            }
        });
    };

    let search = view.read().search().to_string();
    let status_value = match view.read().status() {
        StatusFilter::All => ALL_STATUSES.to_string(),
        StatusFilter::Only(status) => status.as_str().to_string(),
    };
    let visible = view
        .read()
        .visible()
        .into_iter()
        .cloned()
        .collect::<Vec<Report>>();
    let total = view.read().source().len();
    let shown = visible.len();
    let is_filtered = view.read().is_filtered();
    let new_report_route = match role {
        Role::Farmer => Some(Route::FarmerNewReport),
        Role::Employee => Some(Route::EmployeeNewReport),
        Role::Admin => None,
    };

    rsx! {
        div {
            if let Some(message) = error() {
                Alert { message }
            }

            div {
                style: "display: flex; gap: 10px; align-items: center; margin-bottom: 14px;",
                SearchBar {
                    value: search,
                    placeholder: "Search crop, description, region or farmer",
                    oninput: move |value: String| view.write().set_search(value),
                }
                select {
                    style: "padding: 8px; border-radius: 6px;",
                    value: "{status_value}",
                    onchange: move |evt| {
                        let value = evt.value();
                        let filter = if value == ALL_STATUSES {
                            StatusFilter::All
                        } else {
                            value
                                .parse::<ReportStatus>()
                                .map_or(StatusFilter::All, StatusFilter::Only)
                        };
                        view.write().set_status(filter);
                    },
                    option { value: "{ALL_STATUSES}", "All statuses" }
                    for status in ReportStatus::ALL {
                        {
                            let label = status.as_str();
                            rsx! { option { value: "{label}", "{label}" } }
                        }
                    }
                }
                if is_filtered {
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| view.write().clear_filters(),
                        "Clear"
                    }
                }
                if let Some(target) = new_report_route {
                    Button { onclick: move |_| state.navigate(target), "New report" }
                }
            }

            div {
                style: "font-size: 12px; color: {colors.text_muted}; margin-bottom: 8px;",
                if loading() { "Loading reports..." } else { "{shown} of {total} reports" }
            }

            if !loading() && visible.is_empty() {
                div {
                    style: "padding: 24px; text-align: center; color: {colors.text_muted};",
                    if total == 0 { "No reports yet" } else { "No reports match the filters" }
                }
            }

            for report in visible {
                {
                    let id = report.id.clone();
                    let analysis = analyses.read().get(&id).cloned();
                    let is_diagnosing = diagnosing().as_deref() == Some(id.as_str());
                    let actions = match role {
                        Role::Farmer => rsx! {},
                        Role::Employee => {
                            let (progress_id, solved_id, escalate_id) = (id.clone(), id.clone(), id.clone());
                            rsx! {
                                if report.status == ReportStatus::Pending {
                                    Button {
                                        variant: ButtonVariant::Secondary,
                                        onclick: move |_| act(progress_id.clone(), ReportAction::SetStatus(ReportStatus::InProgress)),
                                        "Start work"
                                    }
                                }
                                if report.status != ReportStatus::Solved {
                                    Button {
                                        variant: ButtonVariant::Secondary,
                                        onclick: move |_| act(solved_id.clone(), ReportAction::SetStatus(ReportStatus::Solved)),
                                        "Mark solved"
                                    }
                                    Button {
                                        variant: ButtonVariant::Destructive,
                                        onclick: move |_| act(escalate_id.clone(), ReportAction::Escalate),
                                        "Escalate"
                                    }
                                }
                            }
                        }
                        Role::Admin => {
                            let (diagnose_id, analyze_id, delete_id) = (id.clone(), id.clone(), id.clone());
                            rsx! {
                                Button {
                                    onclick: move |_| {
                                        diagnosis_text.set(String::new());
                                        solution_text.set(String::new());
                                        products_text.set(String::new());
                                        diagnosing.set(Some(diagnose_id.clone()));
                                    },
                                    "Diagnose"
                                }
                                Button {
                                    variant: ButtonVariant::Secondary,
                                    onclick: move |_| act(analyze_id.clone(), ReportAction::Analyze),
                                    "Analyze with AI"
                                }
                                Button {
                                    variant: ButtonVariant::Destructive,
                                    onclick: move |_| act(delete_id.clone(), ReportAction::Delete),
                                    "Delete"
                                }
                            }
                        }
                    };
                    let submit_id = id.clone();
                    rsx! {
                        div {
                            key: "{id}",
                            ReportCard { report, actions }
                            if let Some(analysis) = analysis {
                                div {
                                    style: "
                                        margin: -4px 0 12px 0;
                                        padding: 10px 14px;
                                        border-radius: 6px;
                                        background: {colors.bg_tertiary};
                                        font-size: 13px;
                                        white-space: pre-wrap;
                                    ",
                                    strong { "AI analysis: " }
                                    "{analysis}"
                                }
                            }
                            if is_diagnosing {
                                div {
                                    style: "margin: -4px 0 12px 0; padding: 12px; border: 1px dashed {colors.border}; border-radius: 6px;",
                                    Field {
                                        label: "Diagnosis",
                                        value: diagnosis_text(),
                                        multiline: true,
                                        oninput: move |value| diagnosis_text.set(value),
                                    }
                                    Field {
                                        label: "Solution",
                                        value: solution_text(),
                                        multiline: true,
                                        oninput: move |value| solution_text.set(value),
                                    }
                                    Field {
                                        label: "Recommended product ids (comma separated)",
                                        value: products_text(),
                                        oninput: move |value| products_text.set(value),
                                    }
                                    div {
                                        style: "display: flex; gap: 8px;",
                                        Button {
                                            onclick: move |_| {
                                                let payload = Diagnosis {
                                                    diagnosis: diagnosis_text().trim().to_string(),
                                                    solution: solution_text().trim().to_string(),
                                                    recommended_products: split_ids(&products_text()),
                                                };
                                                if payload.diagnosis.is_empty() {
                                                    error.set(Some("Diagnosis is required".to_string()));
                                                    return;
                                                }
                                                act(submit_id.clone(), ReportAction::Diagnose(payload));
                                            },
                                            "Save diagnosis"
                                        }
                                        Button {
                                            variant: ButtonVariant::Secondary,
                                            onclick: move |_| diagnosing.set(None),
                                            "Cancel"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn split_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
