//! Report submission form for farmers and for employees filing on a
//! farmer's behalf.

use agrilink_core::api::{Submission, UploadFile};
use agrilink_core::models::NewReport as ReportDraft;
use agrilink_core::util::normalize_text_option;
use agrilink_core::{Role, Route};
use dioxus::prelude::*;
use rfd::AsyncFileDialog;

use crate::components::{Alert, AlertKind, Button, ButtonVariant, Field};
use crate::state::AppState;

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "webp", "gif"];

#[component]
pub fn NewReport(role: Role) -> Element {
    let mut state = use_context::<AppState>();
    let colors = (state.theme)().palette();
    let default_region = state.user().and_then(|user| user.region).unwrap_or_default();

    let mut crop = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut region = use_signal(move || default_region);
    let mut urgent = use_signal(|| false);
    let mut latitude = use_signal(String::new);
    let mut longitude = use_signal(String::new);
    let mut farmer_id = use_signal(String::new);
    let mut images = use_signal(Vec::<UploadFile>::new);
    let mut error = use_signal(|| None::<String>);
    let mut partial = use_signal(|| None::<Submission>);
    let mut submitting = use_signal(|| false);

    let reports_route = if role == Role::Employee {
        Route::EmployeeReports
    } else {
        Route::FarmerReports
    };

    let pick_images = move |_| {
        spawn(async move {
            let Some(files) = AsyncFileDialog::new()
                .add_filter("Images", &IMAGE_EXTENSIONS)
                .pick_files()
                .await
            else {
                return;
            };
            for file in files {
                let file_name = file.file_name();
                let bytes = file.read().await;
                let content_type = mime_guess::from_path(&file_name)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string();
                images.write().push(UploadFile::new(file_name, content_type, bytes));
            }
        });
    };

    let submit = move |_| {
        if submitting() {
            return;
        }
        let Some(api) = state.api() else {
            return;
        };
        let draft = match build_draft(
            &crop(),
            &description(),
            &region(),
            urgent(),
            &latitude(),
            &longitude(),
            (role == Role::Employee).then(|| farmer_id()),
        ) {
            Ok(draft) => draft,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        let files = images();
        error.set(None);
        submitting.set(true);

        spawn(async move {
            let result = if role == Role::Employee {
                api.employee().submit_report(&draft, &files).await
            } else {
                api.farmer().submit_report(&draft, &files).await
            };
            match result {
                Ok(submission) if submission.is_complete() => {
                    tracing::info!("Submitted report {}", submission.report.id);
                    state.navigate(reports_route);
                }
                Ok(submission) => {
                    tracing::warn!(
                        "Report {} created with {} failed uploads",
                        submission.report.id,
                        submission.failed_uploads.len()
                    );
                    partial.set(Some(submission));
                }
                Err(submit_error) => error.set(Some(state.describe_error(&submit_error))),
            }
            submitting.set(false);
        });
    };

    if let Some(submission) = partial() {
        let failed = submission
            .failed_uploads
            .iter()
            .map(|failure| format!("{} ({})", failure.file_name, failure.error))
            .collect::<Vec<_>>()
            .join(", ");
        return rsx! {
            div {
                style: "max-width: 560px;",
                Alert {
                    kind: AlertKind::Info,
                    message: "Report submitted, but some images could not be attached: {failed}",
                }
                Button { onclick: move |_| state.navigate(reports_route), "Go to my reports" }
            }
        };
    }

    let image_names = images
        .read()
        .iter()
        .map(|image| image.file_name.clone())
        .collect::<Vec<_>>();

    rsx! {
        div {
            style: "max-width: 560px;",
            if let Some(message) = error() {
                Alert { message }
            }
            if role == Role::Employee {
                Field {
                    label: "Farmer id",
                    value: farmer_id(),
                    oninput: move |value| farmer_id.set(value),
                }
            }
            Field { label: "Crop", placeholder: "e.g. Maize", value: crop(), oninput: move |value| crop.set(value) }
            Field {
                label: "Describe the problem",
                multiline: true,
                value: description(),
                oninput: move |value| description.set(value),
            }
            Field { label: "Region", value: region(), oninput: move |value| region.set(value) }
            div {
                style: "display: flex; gap: 12px;",
                Field { label: "Latitude (optional)", value: latitude(), oninput: move |value| latitude.set(value) }
                Field { label: "Longitude (optional)", value: longitude(), oninput: move |value| longitude.set(value) }
            }
            label {
                style: "display: flex; gap: 8px; align-items: center; margin-bottom: 12px;",
                input {
                    r#type: "checkbox",
                    checked: urgent(),
                    onchange: move |evt| urgent.set(evt.checked()),
                }
                "Urgent"
            }
            div {
                style: "margin-bottom: 16px;",
                Button { variant: ButtonVariant::Secondary, onclick: pick_images, "Add photos" }
                for name in image_names {
                    div { style: "font-size: 12px; color: {colors.text_secondary}; margin-top: 4px;", "{name}" }
                }
            }
            Button {
                disabled: submitting(),
                onclick: submit,
                if submitting() { "Submitting..." } else { "Submit report" }
            }
        }
    }
}

fn build_draft(
    crop: &str,
    description: &str,
    region: &str,
    urgent: bool,
    latitude: &str,
    longitude: &str,
    farmer_id: Option<String>,
) -> Result<ReportDraft, String> {
    let draft = ReportDraft {
        crop: crop.trim().to_string(),
        description: description.trim().to_string(),
        region: region.trim().to_string(),
        urgent,
        latitude: parse_coordinate(latitude, "Latitude")?,
        longitude: parse_coordinate(longitude, "Longitude")?,
        farmer_id: farmer_id.and_then(|id| normalize_text_option(Some(id))),
    };
    draft.validate()?;
    Ok(draft)
}

fn parse_coordinate(raw: &str, name: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<f64>()
        .map(Some)
        .map_err(|_| format!("{name} must be a number"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn draft_trims_and_parses_coordinates() {
        let draft = build_draft(
            " Maize ",
            "Yellow leaves",
            "North",
            true,
            "-1.5",
            " 36.8 ",
            None,
        )
        .unwrap();
        assert_eq!(draft.crop, "Maize");
        assert_eq!(draft.latitude, Some(-1.5));
        assert_eq!(draft.longitude, Some(36.8));
        assert!(draft.urgent);
    }

    #[test]
    fn draft_rejects_half_coordinates_and_garbage() {
        assert!(build_draft("Maize", "Yellow", "North", false, "1.0", "", None).is_err());
        assert_eq!(
            build_draft("Maize", "Yellow", "North", false, "north", "", None).unwrap_err(),
            "Latitude must be a number"
        );
        assert!(build_draft("", "Yellow", "North", false, "", "", None).is_err());
    }

    #[test]
    fn blank_farmer_id_is_dropped() {
        let draft = build_draft("Maize", "Yellow", "North", false, "", "", Some("  ".to_string()))
            .unwrap();
        assert_eq!(draft.farmer_id, None);
    }
}
