//! Typed client for the AgriLink backend REST API.
//!
//! Every request carries `Content-Type: application/json` and the stored
//! token as the raw `Authorization` header value, read from the session store
//! on each call. Nothing is retried or cached, and no explicit timeout is set.
//! Operations are grouped per role tree: [`AuthApi`], [`FarmerApi`],
//! [`EmployeeApi`] and [`AdminApi`].

mod admin;
mod auth;
mod employee;
mod farmer;
mod upload;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ClientConfig;
use crate::models::{Notification, Page, ReadFilter, Report};
use crate::session::{SessionError, SessionStore};
use crate::util::compact_text;

pub use admin::{AdminApi, LocationFilters, NearbyQuery, DEFAULT_NEARBY_RADIUS_KM};
pub use auth::{AuthApi, LoginResponse, SignupOutcome, SignupRequest};
pub use employee::EmployeeApi;
pub use farmer::FarmerApi;
pub use upload::{Submission, UploadFailure, UploadFile};

/// Message used when an error response carries no usable text.
pub const FALLBACK_ERROR_MESSAGE: &str = "Request failed";

/// Closed set of failures a caller has to handle.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401/403: missing, stale or insufficient credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// 404
    #[error("Not found: {0}")]
    NotFound(String),
    /// 400/409/422: the backend rejected the input.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Any other non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    /// Transport failure before a response arrived.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Success status with a body that does not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// Reading the stored token failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Maps a non-success status and its body onto the closed error set.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = parse_error_message(body);
        match status.as_u16() {
            401 | 403 => Self::Unauthorized(message),
            404 => Self::NotFound(message),
            400 | 409 | 422 => Self::Validation(message),
            code => Self::Server {
                status: code,
                message,
            },
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Text suitable for an inline alert banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Unauthorized(message)
            | Self::NotFound(message)
            | Self::Validation(message)
            | Self::Server { message, .. } => message.clone(),
            Self::Network(_) => "Unable to reach the server".to_string(),
            Self::Decode(_) => "The server sent an unexpected response".to_string(),
            Self::Session(error) => error.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

fn parse_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|payload| payload.message.or(payload.error))
        .map(|message| compact_text(&message))
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
}

/// Backend replies that only carry a human message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// Report payloads come back either bare or wrapped as `{ "report": ... }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReportEnvelope {
    Wrapped { report: Report },
    Bare(Report),
}

impl ReportEnvelope {
    fn into_report(self) -> Report {
        match self {
            Self::Wrapped { report } | Self::Bare(report) => report,
        }
    }
}

/// Report lists come back either bare or wrapped as `{ "reports": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReportListEnvelope {
    Wrapped { reports: Vec<Report> },
    Bare(Vec<Report>),
}

impl ReportListEnvelope {
    fn into_reports(self) -> Vec<Report> {
        match self {
            Self::Wrapped { reports } | Self::Bare(reports) => reports,
        }
    }
}

/// Shared HTTP plumbing for all endpoint groups.
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ClientConfig,
    client: reqwest::Client,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: ClientConfig, session: SessionStore) -> ApiResult<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            config,
            client,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.api_base_url
    }

    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    pub const fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub const fn farmer(&self) -> FarmerApi<'_> {
        FarmerApi::new(self)
    }

    pub const fn employee(&self) -> EmployeeApi<'_> {
        EmployeeApi::new(self)
    }

    pub const fn admin(&self) -> AdminApi<'_> {
        AdminApi::new(self)
    }

    /// Builds a request with the JSON content type and the current token.
    fn request(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let request = self
            .authorized(method, path)?
            .header(CONTENT_TYPE, "application/json");
        Ok(request)
    }

    /// Builds a request carrying only the token; multipart bodies set their
    /// own content type with the boundary.
    fn authorized(&self, method: Method, path: &str) -> ApiResult<RequestBuilder> {
        let url = self.config.endpoint(path);
        tracing::debug!("{} {}", method, url);
        let mut request = self.client.request(method, url);
        if let Some(token) = self.session.get_token()? {
            request = request.header(AUTHORIZATION, token);
        }
        Ok(request)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::debug!("Request failed with HTTP {}: {}", status, compact_text(&body));
            return Err(ApiError::from_status(status, &body));
        }
        serde_json::from_str(&body).map_err(|error| ApiError::Decode(error.to_string()))
    }

    /// Sends and ignores the response body on success.
    async fn send_discarding(&self, request: RequestBuilder) -> ApiResult<()> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ApiResult<T> {
        let request = self.request(Method::GET, path)?.query(query);
        self.send(request).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(request).await
    }

    async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let request = self.request(Method::PUT, path)?.json(body);
        self.send(request).await
    }

    async fn put_empty(&self, path: &str) -> ApiResult<()> {
        let request = self.request(Method::PUT, path)?;
        self.send_discarding(request).await
    }

    async fn delete(&self, path: &str) -> ApiResult<()> {
        let request = self.request(Method::DELETE, path)?;
        self.send_discarding(request).await
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<Page<T>> {
        self.get(path, query).await
    }

    /// Fetches a path as untyped JSON.
    pub async fn fetch_json(&self, path: &str) -> ApiResult<serde_json::Value> {
        self.get(path, &[]).await
    }

    async fn report_list(&self, group: &str) -> ApiResult<Vec<Report>> {
        let envelope: ReportListEnvelope = self.get(&format!("{group}/reports"), &[]).await?;
        Ok(envelope.into_reports())
    }

    async fn report_detail(&self, group: &str, id: &str) -> ApiResult<Report> {
        let envelope: ReportEnvelope = self
            .get(&format!("{group}/reports/{}", segment(id)), &[])
            .await?;
        Ok(envelope.into_report())
    }

    async fn notification_page(
        &self,
        group: &str,
        page: u32,
        limit: u32,
        filter: ReadFilter,
    ) -> ApiResult<Page<Notification>> {
        let mut query = page_params(page, limit);
        if let Some(read) = filter.query_value() {
            query.push(("read", read.to_string()));
        }
        self.get_page(&format!("{group}/notifications"), &query).await
    }

    async fn mark_notification_read(&self, group: &str, id: &str) -> ApiResult<()> {
        self.put_empty(&format!("{group}/notifications/{}/read", segment(id)))
            .await
    }

    async fn mark_all_notifications_read(&self, group: &str) -> ApiResult<()> {
        self.put_empty(&format!("{group}/notifications/read-all"))
            .await
    }
}

/// Encodes an id for use as a single path segment.
fn segment(id: &str) -> String {
    urlencoding::encode(id.trim()).into_owned()
}

/// Page/limit query pairs shared by every paginated endpoint.
fn page_params(page: u32, limit: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.max(1).to_string()), ("limit", limit.max(1).to_string())]
}

#[cfg(test)]
pub(crate) mod test_server {
    //! Throwaway HTTP server for exercising the client end to end.

    use axum::Router;

    use super::ApiClient;
    use crate::config::ClientConfig;
    use crate::session::SessionStore;

    /// Serves `router` on an ephemeral port and returns a client pointed at it.
    pub async fn spawn(router: Router) -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        let config = ClientConfig::new(format!("http://{address}/api")).unwrap();
        ApiClient::new(config, SessionStore::in_memory()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderMap;
    use axum::routing::get;
    use axum::{Json, Router};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn status_mapping_covers_closed_set() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, ""),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, ""),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, ""),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, ""),
            ApiError::Server { status: 502, .. }
        ));
    }

    #[test]
    fn error_message_prefers_body_message() {
        let error = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Crop is required"}"#,
        );
        assert_eq!(error.user_message(), "Crop is required");

        let error = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"error":"bad region"}"#);
        assert_eq!(error.user_message(), "bad region");

        let error = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(error.user_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn segment_encodes_ids() {
        assert_eq!(segment(" a/b "), "a%2Fb");
    }

    #[test]
    fn page_params_clamp_to_one() {
        assert_eq!(
            page_params(0, 0),
            vec![("page", "1".to_string()), ("limit", "1".to_string())]
        );
    }

    async fn echo_headers(headers: HeaderMap) -> Json<serde_json::Value> {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(ToString::to_string)
        };
        Json(serde_json::json!({
            "authorization": header("authorization"),
            "contentType": header("content-type"),
        }))
    }

    #[tokio::test(flavor = "current_thread")]
    async fn sends_raw_token_read_fresh_on_every_call() {
        let client =
            test_server::spawn(Router::new().route("/api/echo", get(echo_headers))).await;

        let anonymous = client.fetch_json("/echo").await.unwrap();
        assert_eq!(anonymous["authorization"], serde_json::Value::Null);
        assert_eq!(anonymous["contentType"], "application/json");

        client.session().set_token("raw-token-1").unwrap();
        let first = client.fetch_json("/echo").await.unwrap();
        assert_eq!(first["authorization"], "raw-token-1");

        client.session().set_token("raw-token-2").unwrap();
        let second = client.fetch_json("/echo").await.unwrap();
        assert_eq!(second["authorization"], "raw-token-2");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn non_json_success_body_is_a_decode_error() {
        let client =
            test_server::spawn(Router::new().route("/api/plain", get(|| async { "plain text" })))
                .await;
        let error = client.fetch_json("/plain").await.unwrap_err();
        assert!(matches!(error, ApiError::Decode(_)));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn unreachable_server_is_a_network_error() {
        let config = ClientConfig::new("http://127.0.0.1:9/api").unwrap();
        let client = ApiClient::new(config, SessionStore::in_memory()).unwrap();
        let error = client.fetch_json("/anything").await.unwrap_err();
        assert!(matches!(error, ApiError::Network(_)));
    }
}
