//! Best-effort prefetching of admin pages.
//!
//! The preloader remembers which routes were fetched and keeps the decoded
//! payload behind each one in memory, with any response envelope already
//! unwrapped. Pages may paint from a cached payload and then re-fetch.
//! Nothing here is persisted and failures are only logged.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{ApiClient, ApiError, ApiResult, LocationFilters};
use crate::listing::DEFAULT_PAGE_SIZE;
use crate::models::ReadFilter;
use crate::navigation::Route;

/// Admin pages fetched ahead of navigation.
pub const CRITICAL_ADMIN_ROUTES: [Route; 5] = [
    Route::AdminReports,
    Route::AdminEmployeeLocations,
    Route::AdminProducts,
    Route::AdminStats,
    Route::AdminNotifications,
];

/// Whether `route` has a payload worth caching.
#[must_use]
pub const fn has_payload(route: Route) -> bool {
    matches!(
        route,
        Route::AdminDashboard
            | Route::AdminStats
            | Route::AdminReports
            | Route::AdminEmployeeLocations
            | Route::AdminProducts
            | Route::AdminNotifications
    )
}

fn to_payload<T: Serialize>(value: &T) -> ApiResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|error| ApiError::Decode(error.to_string()))
}

/// Fetches the data behind `route` through the typed admin endpoints.
/// Paginated routes cache their first page.
async fn fetch_payload(api: &ApiClient, route: Route) -> ApiResult<serde_json::Value> {
    let admin = api.admin();
    match route {
        Route::AdminDashboard | Route::AdminStats => to_payload(&admin.region_stats().await?),
        Route::AdminReports => to_payload(&admin.reports().await?),
        Route::AdminProducts => to_payload(&admin.products().await?),
        Route::AdminEmployeeLocations => to_payload(
            &admin
                .employee_locations(1, DEFAULT_PAGE_SIZE, &LocationFilters::default())
                .await?,
        ),
        Route::AdminNotifications => to_payload(
            &admin
                .notifications(1, DEFAULT_PAGE_SIZE, ReadFilter::All)
                .await?,
        ),
        _ => Err(ApiError::Validation(format!("{route} has no preloadable data"))),
    }
}

#[derive(Debug, Default)]
pub struct RoutePreloader {
    preloaded: Mutex<HashSet<Route>>,
    cache: Mutex<HashMap<Route, serde_json::Value>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RoutePreloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_preloaded(&self, route: Route) -> bool {
        lock(&self.preloaded).contains(&route)
    }

    pub fn preloaded_count(&self) -> usize {
        lock(&self.preloaded).len()
    }

    pub fn cached(&self, route: Route) -> Option<serde_json::Value> {
        lock(&self.cache).get(&route).cloned()
    }

    /// Cached payload decoded as `T`; a payload of another shape is ignored.
    pub fn cached_as<T: DeserializeOwned>(&self, route: Route) -> Option<T> {
        let value = self.cached(route)?;
        serde_json::from_value(value).ok()
    }

    pub fn store(&self, route: Route, payload: serde_json::Value) {
        lock(&self.cache).insert(route, payload);
        lock(&self.preloaded).insert(route);
    }

    /// Drops everything, e.g. after sign-out.
    pub fn clear(&self) {
        lock(&self.cache).clear();
        lock(&self.preloaded).clear();
    }

    /// Fetches one route's payload. Returns whether it was cached.
    pub async fn preload(&self, api: &ApiClient, route: Route) -> bool {
        if !has_payload(route) {
            return false;
        }
        match fetch_payload(api, route).await {
            Ok(payload) => {
                self.store(route, payload);
                true
            }
            Err(error) => {
                tracing::debug!("Preload of {} failed: {}", route, error);
                false
            }
        }
    }

    /// Refreshes every critical admin route. Returns how many succeeded.
    pub async fn preload_critical(&self, api: &ApiClient) -> usize {
        let mut loaded = 0;
        for route in CRITICAL_ADMIN_ROUTES {
            if self.preload(api, route).await {
                loaded += 1;
            }
        }
        tracing::debug!(
            "Preloaded {}/{} admin routes",
            loaded,
            CRITICAL_ADMIN_ROUTES.len()
        );
        loaded
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::test_server;
    use crate::models::{Notification, Page, Product, RegionStats, Report};

    #[test]
    fn critical_routes_all_have_payloads() {
        for route in CRITICAL_ADMIN_ROUTES {
            assert!(has_payload(route), "{route} has no payload");
            assert_eq!(route.allowed_roles(), Some(&[crate::models::Role::Admin][..]));
        }
    }

    #[test]
    fn store_and_clear() {
        let preloader = RoutePreloader::new();
        preloader.store(Route::AdminProducts, serde_json::json!([]));
        assert!(preloader.is_preloaded(Route::AdminProducts));
        assert_eq!(preloader.cached(Route::AdminProducts), Some(serde_json::json!([])));

        preloader.clear();
        assert!(!preloader.is_preloaded(Route::AdminProducts));
        assert_eq!(preloader.cached(Route::AdminProducts), None);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failures_are_swallowed() {
        let router = Router::new()
            .route(
                "/api/admin/products",
                get(|| async { Json(serde_json::json!([{"_id": "p1", "name": "Urea"}])) }),
            )
            .route(
                "/api/admin/reports",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            );
        let client = test_server::spawn(router).await;
        let preloader = RoutePreloader::new();

        let loaded = preloader.preload_critical(&client).await;
        assert_eq!(loaded, 1);
        assert!(preloader.is_preloaded(Route::AdminProducts));
        assert!(!preloader.is_preloaded(Route::AdminReports));

        let products: Vec<Product> = preloader.cached_as(Route::AdminProducts).unwrap();
        assert_eq!(products[0].name, "Urea");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn wrapped_responses_are_cached_unwrapped() {
        let router = Router::new()
            .route(
                "/api/admin/reports",
                get(|| async {
                    Json(serde_json::json!({
                        "reports": [{
                            "_id": "r1",
                            "crop": "Cassava",
                            "status": "Pending",
                            "createdAt": "2026-03-01T08:00:00Z"
                        }]
                    }))
                }),
            )
            .route(
                "/api/admin/products",
                get(|| async {
                    Json(serde_json::json!({"products": [{"_id": "p1", "name": "Neem oil"}]}))
                }),
            )
            .route(
                "/api/admin/stats/regions",
                get(|| async {
                    Json(serde_json::json!({"regions": [{"_id": "Ashanti", "total": 4, "solved": 1}]}))
                }),
            )
            .route(
                "/api/admin/notifications",
                get(|| async {
                    Json(serde_json::json!({
                        "notifications": [{
                            "_id": "n1",
                            "message": "New report",
                            "createdAt": "2026-03-01T08:00:00Z"
                        }],
                        "pagination": {"currentPage": 1, "totalPages": 1, "totalItems": 1}
                    }))
                }),
            );
        let client = test_server::spawn(router).await;
        let preloader = RoutePreloader::new();

        preloader.preload_critical(&client).await;
        assert!(preloader.preload(&client, Route::AdminDashboard).await);

        let reports: Vec<Report> = preloader.cached_as(Route::AdminReports).unwrap();
        assert_eq!(reports[0].id, "r1");
        let products: Vec<Product> = preloader.cached_as(Route::AdminProducts).unwrap();
        assert_eq!(products[0].name, "Neem oil");
        let regions: Vec<RegionStats> = preloader.cached_as(Route::AdminDashboard).unwrap();
        assert_eq!(regions[0].total_reports, 4);
        let notifications: Page<Notification> =
            preloader.cached_as(Route::AdminNotifications).unwrap();
        assert_eq!(notifications.items[0].id, "n1");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn routes_without_payload_are_skipped() {
        let client = test_server::spawn(Router::new()).await;
        let preloader = RoutePreloader::new();
        assert!(!preloader.preload(&client, Route::FarmerReports).await);
        assert_eq!(preloader.preloaded_count(), 0);
    }
}
