//! `/employee` endpoints.

use serde::Serialize;

use super::{segment, ApiClient, ApiError, ApiResult, ReportEnvelope, Submission, UploadFile};
use crate::models::{
    EmployeeLocation, LocationUpdate, NewReport, Notification, Page, ReadFilter, Report,
    ReportStatus,
};

const GROUP: &str = "employee";

#[derive(Serialize)]
struct StatusChange {
    status: ReportStatus,
}

pub struct EmployeeApi<'a> {
    client: &'a ApiClient,
}

impl<'a> EmployeeApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Reports assigned to or visible for the signed-in employee.
    pub async fn reports(&self) -> ApiResult<Vec<Report>> {
        self.client.report_list(GROUP).await
    }

    pub async fn report(&self, id: &str) -> ApiResult<Report> {
        self.client.report_detail(GROUP, id).await
    }

    /// Files a report for a farmer; `draft.farmer_id` names the farmer.
    pub async fn submit_report(
        &self,
        draft: &NewReport,
        images: &[UploadFile],
    ) -> ApiResult<Submission> {
        let has_farmer = draft
            .farmer_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty());
        if !has_farmer {
            return Err(ApiError::Validation("Farmer is required".to_string()));
        }
        self.client.submit_report(GROUP, draft, images).await
    }

    pub async fn update_status(&self, id: &str, status: ReportStatus) -> ApiResult<Report> {
        let envelope: ReportEnvelope = self
            .client
            .put(
                &format!("{GROUP}/reports/{}/status", segment(id)),
                &StatusChange { status },
            )
            .await?;
        Ok(envelope.into_report())
    }

    /// Hands a report over to the admins.
    pub async fn escalate(&self, id: &str) -> ApiResult<()> {
        self.client
            .put_empty(&format!("{GROUP}/reports/{}/escalate", segment(id)))
            .await
    }

    pub async fn update_location(&self, update: &LocationUpdate) -> ApiResult<EmployeeLocation> {
        update.validate().map_err(ApiError::Validation)?;
        self.client.post(&format!("{GROUP}/location"), update).await
    }

    pub async fn notifications(
        &self,
        page: u32,
        limit: u32,
        filter: ReadFilter,
    ) -> ApiResult<Page<Notification>> {
        self.client
            .notification_page(GROUP, page, limit, filter)
            .await
    }

    pub async fn mark_notification_read(&self, id: &str) -> ApiResult<()> {
        self.client.mark_notification_read(GROUP, id).await
    }

    pub async fn mark_all_read(&self) -> ApiResult<()> {
        self.client.mark_all_notifications_read(GROUP).await
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::routing::{post, put};
    use axum::{Json, Router};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::test_server;
    use crate::models::PresenceStatus;

    #[tokio::test(flavor = "current_thread")]
    async fn update_status_sends_wire_name() {
        let router = Router::new().route(
            "/api/employee/reports/{id}/status",
            put(
                |Path(id): Path<String>, Json(body): Json<serde_json::Value>| async move {
                    Json(serde_json::json!({
                        "_id": id,
                        "crop": "Rice",
                        "status": body["status"],
                        "createdAt": "2024-05-01T08:00:00Z"
                    }))
                },
            ),
        );
        let client = test_server::spawn(router).await;

        let report = client
            .employee()
            .update_status("r2", ReportStatus::InProgress)
            .await
            .unwrap();
        assert_eq!(report.id, "r2");
        assert_eq!(report.status, ReportStatus::InProgress);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn forbidden_escalation_is_unauthorized() {
        let router = Router::new().route(
            "/api/employee/reports/{id}/escalate",
            put(|| async {
                (
                    axum::http::StatusCode::FORBIDDEN,
                    Json(serde_json::json!({ "message": "Not your report" })),
                )
            }),
        );
        let client = test_server::spawn(router).await;

        let error = client.employee().escalate("r2").await.unwrap_err();
        assert!(error.is_unauthorized());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn location_update_posts_coordinates() {
        let router = Router::new().route(
            "/api/employee/location",
            post(|Json(body): Json<serde_json::Value>| async move {
                Json(serde_json::json!({
                    "employee": "e1",
                    "latitude": body["latitude"],
                    "longitude": body["longitude"],
                    "status": body["status"],
                    "lastActivity": "2024-05-01T08:00:00Z"
                }))
            }),
        );
        let client = test_server::spawn(router).await;

        let location = client
            .employee()
            .update_location(&LocationUpdate {
                latitude: 5.6,
                longitude: -0.2,
                accuracy: Some(12.0),
                address: None,
                status: PresenceStatus::Busy,
                device_info: None,
            })
            .await
            .unwrap();
        assert_eq!(location.status, PresenceStatus::Busy);
        assert!((location.latitude - 5.6).abs() < f64::EPSILON);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn submission_for_farmer_survives_a_failed_upload() {
        let router = Router::new()
            .route(
                "/api/employee/reports",
                post(|Json(body): Json<serde_json::Value>| async move {
                    (
                        StatusCode::CREATED,
                        Json(serde_json::json!({
                            "report": {
                                "_id": "r5",
                                "crop": body["crop"],
                                "status": "Pending",
                                "farmer": body["farmerId"],
                                "createdAt": "2024-05-01T08:00:00Z"
                            }
                        })),
                    )
                }),
            )
            .route(
                "/api/employee/reports/{id}/images",
                post(|body: String| async move {
                    if body.contains("blurry.png") {
                        (
                            StatusCode::PAYLOAD_TOO_LARGE,
                            Json(serde_json::json!({ "message": "Image too large" })),
                        )
                    } else {
                        (StatusCode::OK, Json(serde_json::json!({ "ok": true })))
                    }
                }),
            );
        let client = test_server::spawn(router).await;
        let draft = NewReport {
            crop: "Cocoa".to_string(),
            description: "Black pod".to_string(),
            region: "Western".to_string(),
            urgent: false,
            latitude: None,
            longitude: None,
            farmer_id: Some("f7".to_string()),
        };
        let images = vec![
            UploadFile::new("pod.jpg", "image/jpeg", vec![1, 2]),
            UploadFile::new("blurry.png", "image/png", vec![3, 4]),
        ];

        let submission = client
            .employee()
            .submit_report(&draft, &images)
            .await
            .unwrap();
        assert_eq!(submission.report.id, "r5");
        assert!(!submission.is_complete());
        assert_eq!(submission.failed_uploads.len(), 1);
        assert_eq!(submission.failed_uploads[0].file_name, "blurry.png");
        assert_eq!(submission.failed_uploads[0].error, "Image too large");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn submit_requires_farmer() {
        let client = test_server::spawn(Router::new()).await;
        let draft = NewReport {
            crop: "Rice".to_string(),
            description: "Blast lesions".to_string(),
            region: "South".to_string(),
            urgent: true,
            latitude: None,
            longitude: None,
            farmer_id: None,
        };
        let error = client
            .employee()
            .submit_report(&draft, &[])
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::Validation(_)));
    }
}
