//! `/admin` endpoints: triage, catalog, field staff tracking, statistics and
//! the AI assistant proxy.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{segment, ApiClient, ApiError, ApiResult, ReportEnvelope};
use crate::models::{
    AiAnalysis, AiReply, Diagnosis, EmployeeLocation, EmployeePerformance, Notification, Page,
    PresenceStatus, Product, ProductDraft, ReadFilter, RegionStats, Report,
};
use crate::presence::order_by_distance;

const GROUP: &str = "admin";

/// Default search radius for nearby lookups.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 10.0;

/// Filters for the employee location listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationFilters {
    pub status: Option<PresenceStatus>,
    pub search: Option<String>,
}

impl LocationFilters {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(search) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
        {
            query.push(("search", search.to_string()));
        }
        query
    }
}

/// Center point and radius for a nearby-employee search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: f64,
}

impl NearbyQuery {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km: DEFAULT_NEARBY_RADIUS_KM,
        }
    }
}

/// Lists come back bare or wrapped under an endpoint-specific key.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListEnvelope<T> {
    Wrapped {
        #[serde(
            alias = "products",
            alias = "locations",
            alias = "regions",
            alias = "performance",
            alias = "stats"
        )]
        data: Vec<T>,
    },
    Bare(Vec<T>),
}

impl<T> ListEnvelope<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ProductEnvelope {
    Wrapped { product: Product },
    Bare(Product),
}

impl ProductEnvelope {
    fn into_product(self) -> Product {
        match self {
            Self::Wrapped { product } | Self::Bare(product) => product,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'m> {
    message: &'m str,
}

pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdminApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Vec<T>> {
        let envelope: ListEnvelope<T> = self.client.get(path, query).await?;
        Ok(envelope.into_items())
    }

    pub async fn reports(&self) -> ApiResult<Vec<Report>> {
        self.client.report_list(GROUP).await
    }

    pub async fn report(&self, id: &str) -> ApiResult<Report> {
        self.client.report_detail(GROUP, id).await
    }

    /// Records a diagnosis, solution and recommended products on a report.
    pub async fn diagnose(&self, id: &str, diagnosis: &Diagnosis) -> ApiResult<Report> {
        if diagnosis.diagnosis.trim().is_empty() {
            return Err(ApiError::Validation("Diagnosis is required".to_string()));
        }
        let envelope: ReportEnvelope = self
            .client
            .put(
                &format!("{GROUP}/reports/{}/diagnose", segment(id)),
                diagnosis,
            )
            .await?;
        Ok(envelope.into_report())
    }

    pub async fn delete_report(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("{GROUP}/reports/{}", segment(id)))
            .await
    }

    pub async fn products(&self) -> ApiResult<Vec<Product>> {
        self.list(&format!("{GROUP}/products"), &[]).await
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> ApiResult<Product> {
        draft.validate().map_err(ApiError::Validation)?;
        let envelope: ProductEnvelope = self
            .client
            .post(&format!("{GROUP}/products"), draft)
            .await?;
        Ok(envelope.into_product())
    }

    pub async fn update_product(&self, id: &str, draft: &ProductDraft) -> ApiResult<Product> {
        draft.validate().map_err(ApiError::Validation)?;
        let envelope: ProductEnvelope = self
            .client
            .put(&format!("{GROUP}/products/{}", segment(id)), draft)
            .await?;
        Ok(envelope.into_product())
    }

    pub async fn delete_product(&self, id: &str) -> ApiResult<()> {
        self.client
            .delete(&format!("{GROUP}/products/{}", segment(id)))
            .await
    }

    pub async fn employee_locations(
        &self,
        page: u32,
        limit: u32,
        filters: &LocationFilters,
    ) -> ApiResult<Page<EmployeeLocation>> {
        let mut query = super::page_params(page, limit);
        query.extend(filters.query());
        self.client
            .get_page(&format!("{GROUP}/employee-locations"), &query)
            .await
    }

    /// Employees within `radius_km` of a point, closest first.
    pub async fn nearby(&self, nearby: &NearbyQuery) -> ApiResult<Vec<EmployeeLocation>> {
        if !(-90.0..=90.0).contains(&nearby.latitude)
            || !(-180.0..=180.0).contains(&nearby.longitude)
        {
            return Err(ApiError::Validation(
                "Coordinates are out of range".to_string(),
            ));
        }
        if !nearby.radius_km.is_finite() || nearby.radius_km <= 0.0 {
            return Err(ApiError::Validation(
                "Radius must be a positive number".to_string(),
            ));
        }
        let query = [
            ("lat", nearby.latitude.to_string()),
            ("lng", nearby.longitude.to_string()),
            ("radius", nearby.radius_km.to_string()),
        ];
        let mut locations = self
            .list(&format!("{GROUP}/employee-locations/nearby"), &query)
            .await?;
        order_by_distance(&mut locations, nearby.latitude, nearby.longitude);
        Ok(locations)
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

    pub async fn region_stats(&self) -> ApiResult<Vec<RegionStats>> {
        self.list(&format!("{GROUP}/stats/regions"), &[]).await
    }

    pub async fn performance(&self) -> ApiResult<Vec<EmployeePerformance>> {
        self.list(&format!("{GROUP}/stats/performance"), &[]).await
    }

    /// Runs the AI analysis for one report.
    pub async fn analyze_report(&self, id: &str) -> ApiResult<AiAnalysis> {
        self.client
            .post(
                &format!("{GROUP}/gemini/analyze-report/{}", segment(id)),
                &serde_json::json!({}),
            )
            .await
    }

    pub async fn chat(&self, message: &str) -> ApiResult<AiReply> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ApiError::Validation("Message is required".to_string()));
        }
        self.client
            .post(&format!("{GROUP}/gemini/chat"), &ChatRequest { message })
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::{delete, get, post};
    use axum::{Json, Router};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::test_server;

    #[test]
    fn location_filters_skip_blank_search() {
        let filters = LocationFilters {
            status: Some(PresenceStatus::Online),
            search: Some("   ".to_string()),
        };
        assert_eq!(filters.query(), vec![("status", "online".to_string())]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn products_accept_wrapped_and_bare_lists() {
        let product = serde_json::json!({"_id": "p1", "name": "Neem oil", "price": 12.5});
        let wrapped = product.clone();
        let router = Router::new()
            .route(
                "/api/admin/products",
                get(move || async move { Json(serde_json::json!({ "products": [wrapped] })) }),
            )
            .route(
                "/api/admin/stats/regions",
                get(|| async {
                    Json(serde_json::json!([
                        {"region": "North", "totalReports": 4, "pending": 1, "inProgress": 1, "solved": 2}
                    ]))
                }),
            );
        let client = test_server::spawn(router).await;

        let products = client.admin().products().await.unwrap();
        assert_eq!(products[0].name, "Neem oil");

        let regions = client.admin().region_stats().await.unwrap();
        assert_eq!(regions[0].solved, 2);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn create_product_validates_before_sending() {
        let client = test_server::spawn(Router::new()).await;
        let error = client
            .admin()
            .create_product(&ProductDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::Validation(_)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn employee_locations_forward_filters() {
        let router = Router::new().route(
            "/api/admin/employee-locations",
            get(|Query(query): Query<HashMap<String, String>>| async move {
                Json(serde_json::json!({
                    "locations": [{
                        "employee": {"_id": "e1", "username": query.get("search").cloned().unwrap_or_default()},
                        "lat": 5.6,
                        "lng": -0.2,
                        "status": query.get("status").cloned().unwrap_or_default(),
                        "lastActivity": "2024-05-01T08:00:00Z"
                    }],
                    "pagination": {"currentPage": 1, "totalPages": 1, "totalItems": 1}
                }))
            }),
        );
        let client = test_server::spawn(router).await;

        let filters = LocationFilters {
            status: Some(PresenceStatus::Busy),
            search: Some("ama".to_string()),
        };
        let page = client
            .admin()
            .employee_locations(1, 20, &filters)
            .await
            .unwrap();
        assert_eq!(page.items[0].employee.label(), "ama");
        assert_eq!(page.items[0].status, PresenceStatus::Busy);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn nearby_results_are_ordered_by_distance() {
        let router = Router::new().route(
            "/api/admin/employee-locations/nearby",
            get(|| async {
                Json(serde_json::json!([
                    {"employee": "far", "lat": 6.5, "lng": -0.2, "lastActivity": "2024-05-01T08:00:00Z"},
                    {"employee": "near", "lat": 5.61, "lng": -0.2, "lastActivity": "2024-05-01T08:00:00Z"}
                ]))
            }),
        );
        let client = test_server::spawn(router).await;

        let locations = client
            .admin()
            .nearby(&NearbyQuery::new(5.6, -0.2))
            .await
            .unwrap();
        assert_eq!(locations[0].employee.id(), "near");
        assert!(locations[0].distance_km.unwrap() < locations[1].distance_km.unwrap());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn delete_report_maps_server_errors() {
        let router = Router::new().route(
            "/api/admin/reports/{id}",
            delete(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let client = test_server::spawn(router).await;

        let error = client.admin().delete_report("r1").await.unwrap_err();
        assert!(matches!(
            error,
            ApiError::Server {
                status: 503,
                ref message
            } if message == crate::api::FALLBACK_ERROR_MESSAGE
        ));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn chat_returns_reply_text() {
        let router = Router::new().route(
            "/api/admin/gemini/chat",
            post(|Json(body): Json<serde_json::Value>| async move {
                Json(serde_json::json!({ "response": format!("echo: {}", body["message"].as_str().unwrap_or_default()) }))
            }),
        );
        let client = test_server::spawn(router).await;

        let reply = client.admin().chat("  maize rust?  ").await.unwrap();
        assert_eq!(reply.reply, "echo: maize rust?");
        assert!(client.admin().chat(" ").await.is_err());
    }
}
