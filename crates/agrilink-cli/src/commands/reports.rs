use std::path::PathBuf;

use agrilink_core::api::{Submission, UploadFile};
use agrilink_core::listing::{FilteredView, StatusFilter};
use agrilink_core::models::{Diagnosis, NewReport, Report, ReportStatus, Role};
use agrilink_core::navigation::Route;
use chrono::Utc;

use crate::cli::ReportCommands;
use crate::commands::common::{
    format_report_detail, format_report_lines, new_report_route, print_json, print_lines,
    report_to_list_item, reports_route, AppContext, ReportListItem,
};
use crate::error::CliError;

pub async fn run_reports(command: ReportCommands, ctx: &mut AppContext) -> Result<(), CliError> {
    match command {
        ReportCommands::List {
            search,
            status,
            json,
        } => run_report_list(ctx, search.as_deref(), status, json).await,
        ReportCommands::Show { id, json } => run_report_show(ctx, &id, json).await,
        ReportCommands::New {
            crop,
            description,
            region,
            urgent,
            lat,
            lng,
            farmer,
            images,
        } => {
            let draft = NewReport {
                crop,
                description,
                region,
                urgent,
                latitude: lat,
                longitude: lng,
                farmer_id: farmer,
            };
            run_report_new(ctx, &draft, &images).await
        }
        ReportCommands::Status { id, status } => {
            ctx.require_route(Route::EmployeeReports)?;
            let result = ctx.api.employee().update_status(&id, status).await;
            let report = ctx.checked(result)?;
            println!("{} -> {}", report.id, report.status);
            Ok(())
        }
        ReportCommands::Escalate { id } => {
            ctx.require_route(Route::EmployeeReports)?;
            let result = ctx.api.employee().escalate(&id).await;
            ctx.checked(result)?;
            println!("Escalated {id}");
            Ok(())
        }
        ReportCommands::Diagnose {
            id,
            diagnosis,
            solution,
            products,
        } => {
            ctx.require_route(Route::AdminReports)?;
            let payload = Diagnosis {
                diagnosis,
                solution,
                recommended_products: products,
            };
            let result = ctx.api.admin().diagnose(&id, &payload).await;
            let report = ctx.checked(result)?;
            println!("Diagnosed {} ({})", report.id, report.status);
            Ok(())
        }
        ReportCommands::Delete { id } => {
            ctx.require_route(Route::AdminReports)?;
            let result = ctx.api.admin().delete_report(&id).await;
            ctx.checked(result)?;
            println!("Deleted {id}");
            Ok(())
        }
        ReportCommands::Analyze { id } => {
            ctx.require_route(Route::AdminAssistant)?;
            let result = ctx.api.admin().analyze_report(&id).await;
            let analysis = ctx.checked(result)?;
            println!("{}", analysis.analysis);
            Ok(())
        }
    }
}

/// Fetches the signed-in role's report list.
pub async fn fetch_reports(ctx: &mut AppContext) -> Result<Vec<Report>, CliError> {
    let role = ctx.role()?;
    ctx.require_route(reports_route(role))?;
    let result = match role {
        Role::Farmer => ctx.api.farmer().reports().await,
        Role::Employee => ctx.api.employee().reports().await,
        Role::Admin => ctx.api.admin().reports().await,
    };
    ctx.checked(result)
}

pub async fn run_report_list(
    ctx: &mut AppContext,
    search: Option<&str>,
    status: Option<ReportStatus>,
    as_json: bool,
) -> Result<(), CliError> {
    let reports = fetch_reports(ctx).await?;
    let view = filter_reports(reports, search, status);
    let visible = view.visible();
    let now = Utc::now();

    if as_json {
        let items = visible
            .iter()
            .map(|report| report_to_list_item(report, now))
            .collect::<Vec<ReportListItem>>();
        return print_json(&items);
    }

    print_lines(&format_report_lines(&visible, now), "No reports found");
    if view.is_filtered() {
        println!("{} of {} reports shown", visible.len(), view.source().len());
    }
    Ok(())
}

pub fn filter_reports(
    reports: Vec<Report>,
    search: Option<&str>,
    status: Option<ReportStatus>,
) -> FilteredView<Report> {
    let mut view = FilteredView::new(reports);
    if let Some(search) = search {
        view.set_search(search);
    }
    if let Some(status) = status {
        view.set_status(StatusFilter::Only(status));
    }
    view
}

async fn run_report_show(ctx: &mut AppContext, id: &str, as_json: bool) -> Result<(), CliError> {
    let role = ctx.role()?;
    ctx.require_route(reports_route(role))?;
    let result = match role {
        Role::Farmer => ctx.api.farmer().report(id).await,
        Role::Employee => ctx.api.employee().report(id).await,
        Role::Admin => ctx.api.admin().report(id).await,
    };
    let report = ctx.checked(result)?;

    if as_json {
        return print_json(&report);
    }
    for line in format_report_detail(&report, Utc::now()) {
        println!("{line}");
    }
    Ok(())
}

async fn run_report_new(
    ctx: &mut AppContext,
    draft: &NewReport,
    image_paths: &[PathBuf],
) -> Result<(), CliError> {
    let role = ctx.role()?;
    ctx.require_route(new_report_route(role))?;

    let images = image_paths
        .iter()
        .map(|path| UploadFile::from_path(path))
        .collect::<Result<Vec<_>, _>>()?;

    let result = match role {
        Role::Employee => ctx.api.employee().submit_report(draft, &images).await,
        Role::Farmer | Role::Admin => ctx.api.farmer().submit_report(draft, &images).await,
    };
    let submission = ctx.checked(result)?;
    print_submission(&submission, images.len());
    Ok(())
}

fn print_submission(submission: &Submission, image_count: usize) {
    println!("{}", submission.report.id);
    if image_count == 0 {
        return;
    }
    let uploaded = image_count - submission.failed_uploads.len();
    println!("Attached {uploaded}/{image_count} images");
    for failure in &submission.failed_uploads {
        eprintln!("  failed: {} ({})", failure.file_name, failure.error);
    }
}
