//! `/farmer` endpoints.

use super::{ApiClient, ApiResult, Submission, UploadFile};
use crate::models::{NewReport, Notification, Page, ReadFilter, Report};

const GROUP: &str = "farmer";

pub struct FarmerApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FarmerApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Reports submitted by the signed-in farmer.
    pub async fn reports(&self) -> ApiResult<Vec<Report>> {
        self.client.report_list(GROUP).await
    }

    pub async fn report(&self, id: &str) -> ApiResult<Report> {
        self.client.report_detail(GROUP, id).await
    }

    pub async fn submit_report(
        &self,
        draft: &NewReport,
        images: &[UploadFile],
    ) -> ApiResult<Submission> {
        self.client.submit_report(GROUP, draft, images).await
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
    use std::collections::HashMap;

    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::test_server;
    use crate::models::ReportStatus;

    fn report_json(id: &str, crop: &str) -> serde_json::Value {
        serde_json::json!({
            "_id": id,
            "crop": crop,
            "description": "Leaves turning yellow",
            "region": "North",
            "status": "Pending",
            "createdAt": "2024-05-01T08:00:00Z"
        })
    }

    fn draft() -> NewReport {
        NewReport {
            crop: "Maize".to_string(),
            description: "Leaves turning yellow".to_string(),
            region: "North".to_string(),
            urgent: false,
            latitude: None,
            longitude: None,
            farmer_id: None,
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn reports_accept_wrapped_list() {
        let router = Router::new().route(
            "/api/farmer/reports",
            get(|| async {
                Json(serde_json::json!({ "reports": [report_json("r1", "Maize")] }))
            }),
        );
        let client = test_server::spawn(router).await;

        let reports = client.farmer().reports().await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].status, ReportStatus::Pending);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn missing_report_is_not_found() {
        let router = Router::new().route(
            "/api/farmer/reports/{id}",
            get(|Path(id): Path<String>| async move {
                (
                    StatusCode::NOT_FOUND,
                    Json(serde_json::json!({ "message": format!("Report {id} not found") })),
                )
            }),
        );
        let client = test_server::spawn(router).await;

        let error = client.farmer().report("r9").await.unwrap_err();
        assert!(matches!(error, crate::api::ApiError::NotFound(ref message) if message == "Report r9 not found"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn submission_keeps_report_when_an_upload_fails() {
        let router = Router::new()
            .route(
                "/api/farmer/reports",
                post(|| async {
                    (
                        StatusCode::CREATED,
                        Json(serde_json::json!({ "report": report_json("r1", "Maize") })),
                    )
                }),
            )
            .route(
                "/api/farmer/reports/{id}/images",
                post(|body: String| async move {
                    if body.contains("broken.jpg") {
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(serde_json::json!({ "error": "disk full" })),
                        )
                    } else {
                        (StatusCode::OK, Json(serde_json::json!({ "ok": true })))
                    }
                }),
            );
        let client = test_server::spawn(router).await;

        let images = vec![
            UploadFile::new("leaf.jpg", "image/jpeg", vec![1, 2, 3]),
            UploadFile::new("broken.jpg", "image/jpeg", vec![4, 5, 6]),
        ];
        let submission = client
            .farmer()
            .submit_report(&draft(), &images)
            .await
            .unwrap();

        assert_eq!(submission.report.id, "r1");
        assert!(!submission.is_complete());
        assert_eq!(submission.failed_uploads.len(), 1);
        assert_eq!(submission.failed_uploads[0].file_name, "broken.jpg");
        assert_eq!(submission.failed_uploads[0].error, "disk full");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn invalid_draft_is_rejected_before_any_request() {
        let client = test_server::spawn(Router::new()).await;
        let mut empty = draft();
        empty.crop = "  ".to_string();

        let error = client.farmer().submit_report(&empty, &[]).await.unwrap_err();
        assert!(matches!(error, crate::api::ApiError::Validation(_)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn notifications_send_page_limit_and_read_filter() {
        let router = Router::new()
            .route(
                "/api/farmer/notifications",
                get(|Query(query): Query<HashMap<String, String>>| async move {
                    Json(serde_json::json!({
                        "notifications": [{
                            "_id": "n1",
                            "message": format!("page={} limit={} read={}", query["page"], query["limit"], query.get("read").map_or("-", String::as_str)),
                            "createdAt": "2024-05-01T08:00:00Z",
                            "isRead": false
                        }],
                        "pagination": {"currentPage": 2, "totalPages": 4, "totalItems": 31}
                    }))
                }),
            )
            .route(
                "/api/farmer/notifications/read-all",
                put(|| async { Json(serde_json::json!({ "message": "ok" })) }),
            );
        let client = test_server::spawn(router).await;

        let page = client
            .farmer()
            .notifications(2, 10, ReadFilter::Unread)
            .await
            .unwrap();
        assert_eq!(page.items[0].message, "page=2 limit=10 read=false");
        assert!(page.pagination.has_next());

        client.farmer().mark_all_read().await.unwrap();
    }
}
