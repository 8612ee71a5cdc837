//! `/auth` endpoints: login, signup and password recovery.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{segment, ApiClient, ApiError, ApiResult, MessageResponse};
use crate::models::{Role, User};

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginResponse")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .field("region", &self.region)
            .finish()
    }
}

/// Signup either signs the account in directly or only creates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    SignedIn(LoginResponse),
    AccountCreated(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignupResponse {
    Session(LoginResponse),
    Message(MessageResponse),
}

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(super) const fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        validate_credentials(email, password)?;
        let payload = serde_json::json!({
            "email": email.trim(),
            "password": password,
        });
        self.client.post("auth/login", &payload).await
    }

    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<SignupOutcome> {
        validate_credentials(&request.email, &request.password)?;
        if request.username.trim().is_empty() {
            return Err(ApiError::Validation("Username is required".to_string()));
        }
        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let response: SignupResponse = self.client.post("auth/signup", request).await?;
        Ok(match response {
            SignupResponse::Session(session) => SignupOutcome::SignedIn(session),
            SignupResponse::Message(message) => SignupOutcome::AccountCreated(message.message),
        })
    }

    /// Asks the backend to email a reset link.
    pub async fn forgot_password(&self, email: &str) -> ApiResult<MessageResponse> {
        if email.trim().is_empty() {
            return Err(ApiError::Validation("Email is required".to_string()));
        }
        let payload = serde_json::json!({ "email": email.trim() });
        self.client.post("auth/forgot-password", &payload).await
    }

    /// Completes a reset with the token from the emailed link.
    pub async fn reset_password(&self, token: &str, password: &str) -> ApiResult<MessageResponse> {
        if token.trim().is_empty() {
            return Err(ApiError::Validation("Reset token is required".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let payload = serde_json::json!({ "password": password });
        self.client
            .post(&format!("auth/reset-password/{}", segment(token)), &payload)
            .await
    }
}

fn validate_credentials(email: &str, password: &str) -> ApiResult<()> {
    if email.trim().is_empty() {
        return Err(ApiError::Validation("Email is required".to_string()));
    }
    if password.trim().is_empty() {
        return Err(ApiError::Validation("Password is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::test_server;

    async fn login_handler(Json(body): Json<serde_json::Value>) -> (StatusCode, Json<serde_json::Value>) {
        if body["password"] == "secret" {
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "token": "tok-1",
                    "user": {"_id": "u1", "username": "kofi", "email": body["email"], "role": "farmer"}
                })),
            )
        } else {
            (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"message": "Invalid credentials"})),
            )
        }
    }

    #[tokio::test(flavor = "current_thread")]
    async fn login_returns_token_and_user() {
        let client =
            test_server::spawn(Router::new().route("/api/auth/login", post(login_handler))).await;

        let response = client.auth().login("kofi@farm.io", "secret").await.unwrap();
        assert_eq!(response.token, "tok-1");
        assert_eq!(response.user.role, Role::Farmer);
        assert_eq!(response.user.email, "kofi@farm.io");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn login_failure_carries_server_message() {
        let client =
            test_server::spawn(Router::new().route("/api/auth/login", post(login_handler))).await;

        let error = client.auth().login("kofi@farm.io", "wrong").await.unwrap_err();
        assert!(error.is_unauthorized());
        assert_eq!(error.user_message(), "Invalid credentials");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn signup_without_session_reports_account_created() {
        let router = Router::new().route(
            "/api/auth/signup",
            post(|| async { Json(serde_json::json!({"message": "Account created"})) }),
        );
        let client = test_server::spawn(router).await;

        let outcome = client
            .auth()
            .signup(&SignupRequest {
                username: "amina".to_string(),
                email: "amina@farm.io".to_string(),
                password: "longenough".to_string(),
                role: Role::Farmer,
                region: Some("North".to_string()),
                phone: None,
            })
            .await
            .unwrap();
        assert_eq!(
            outcome,
            SignupOutcome::AccountCreated("Account created".to_string())
        );
    }

    #[test]
    fn credentials_are_required() {
        assert!(validate_credentials(" ", "x").is_err());
        assert!(validate_credentials("a@b.c", " ").is_err());
        assert!(validate_credentials("a@b.c", "x").is_ok());
    }

    #[test]
    fn login_response_debug_redacts_token() {
        let response = LoginResponse {
            token: "secret-token".to_string(),
            user: User {
                id: "u".to_string(),
                username: "u".to_string(),
                email: "u@x.io".to_string(),
                role: Role::Admin,
                region: None,
            },
        };
        let rendered = format!("{response:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
