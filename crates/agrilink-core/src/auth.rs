//! Auth context: who is signed in, backed by the session store.
//!
//! The context starts in a loading state and becomes usable after
//! [`AuthContext::hydrate`], which restores a previous session once. Login and
//! signup go through the [`ApiClient`]; state only changes on success.

use crate::api::{ApiClient, ApiError, ApiResult, LoginResponse, SignupOutcome, SignupRequest};
use crate::models::{Role, User};
use crate::session::{SessionError, SessionResult, SessionStore};

/// Point-in-time view of the auth state, as consumed by the route guard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub is_loading: bool,
    pub user: Option<User>,
}

impl AuthSnapshot {
    pub const fn loading() -> Self {
        Self {
            is_loading: true,
            user: None,
        }
    }

    pub const fn signed_out() -> Self {
        Self {
            is_loading: false,
            user: None,
        }
    }

    pub const fn signed_in(user: User) -> Self {
        Self {
            is_loading: false,
            user: Some(user),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }
}

#[derive(Debug, Clone)]
pub struct AuthContext {
    session: SessionStore,
    snapshot: AuthSnapshot,
    hydrated: bool,
}

impl AuthContext {
    pub const fn new(session: SessionStore) -> Self {
        Self {
            session,
            snapshot: AuthSnapshot::loading(),
            hydrated: false,
        }
    }

    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    pub const fn snapshot(&self) -> &AuthSnapshot {
        &self.snapshot
    }

    pub const fn is_loading(&self) -> bool {
        self.snapshot.is_loading
    }

    pub const fn user(&self) -> Option<&User> {
        self.snapshot.user.as_ref()
    }

    pub const fn is_authenticated(&self) -> bool {
        self.snapshot.user.is_some()
    }

    /// Restores the stored session. Only the first call reads storage; a
    /// session is restored only when both the token and the user are present.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }
        self.hydrated = true;
        self.snapshot = match self.restore() {
            Ok(Some(user)) => {
                tracing::debug!("Restored session for {}", user.email);
                AuthSnapshot::signed_in(user)
            }
            Ok(None) => AuthSnapshot::signed_out(),
            Err(SessionError::Corrupt(error)) => {
                tracing::warn!("Discarding corrupt stored user: {}", error);
                if let Err(error) = self.session.logout() {
                    tracing::warn!("Failed to clear corrupt session: {}", error);
                }
                AuthSnapshot::signed_out()
            }
            Err(error) => {
                tracing::warn!("Failed to read stored session: {}", error);
                AuthSnapshot::signed_out()
            }
        };
    }

    fn restore(&self) -> SessionResult<Option<User>> {
        if self.session.get_token()?.is_none() {
            return Ok(None);
        }
        self.session.get_user()
    }

    pub async fn login(
        &mut self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> ApiResult<&User> {
        let response = api.auth().login(email, password).await?;
        self.complete_login(response)?;
        self.user()
            .ok_or_else(|| ApiError::Decode("login did not produce a user".to_string()))
    }

    /// Persists a successful login and marks the user signed in.
    pub fn complete_login(&mut self, response: LoginResponse) -> SessionResult<()> {
        self.session.set_token(&response.token)?;
        self.session.set_user(&response.user)?;
        tracing::info!("Signed in as {} ({})", response.user.email, response.user.role);
        self.hydrated = true;
        self.snapshot = AuthSnapshot::signed_in(response.user);
        Ok(())
    }

    /// Creates an account. When the backend also returns a session the user
    /// is signed in right away.
    pub async fn signup(
        &mut self,
        api: &ApiClient,
        request: &SignupRequest,
    ) -> ApiResult<SignupOutcome> {
        let outcome = api.auth().signup(request).await?;
        if let SignupOutcome::SignedIn(response) = &outcome {
            self.complete_login(response.clone())?;
        }
        Ok(outcome)
    }

    /// Forgets the session locally. The backend is not contacted.
    pub fn logout(&mut self) -> SessionResult<()> {
        self.hydrated = true;
        self.snapshot = AuthSnapshot::signed_out();
        self.session.logout()
    }

    /// Drops the session when a call failed as unauthorized. Returns true when
    /// the user was signed out as a result.
    pub fn handle_api_error(&mut self, error: &ApiError) -> bool {
        if !error.is_unauthorized() || !self.is_authenticated() {
            return false;
        }
        tracing::warn!("Session rejected by the server, signing out: {}", error);
        if let Err(error) = self.logout() {
            tracing::warn!("Failed to clear session: {}", error);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::routing::post;
    use axum::{Json, Router};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::api::test_server;
    use crate::session::{KeyValueStorage, MemoryStorage, USER_KEY};

    fn user(role: Role) -> User {
        User {
            id: "u-7".to_string(),
            username: "esi".to_string(),
            email: "esi@farm.io".to_string(),
            role,
            region: None,
        }
    }

    #[test]
    fn starts_loading_until_hydrated() {
        let mut auth = AuthContext::new(SessionStore::in_memory());
        assert!(auth.is_loading());
        auth.hydrate();
        assert_eq!(auth.snapshot(), &AuthSnapshot::signed_out());
    }

    #[test]
    fn hydrate_requires_token_and_user() {
        let session = SessionStore::in_memory();
        session.set_user(&user(Role::Farmer)).unwrap();
        let mut auth = AuthContext::new(session.clone());
        auth.hydrate();
        assert!(!auth.is_authenticated());

        session.set_token("tok").unwrap();
        let mut auth = AuthContext::new(session);
        auth.hydrate();
        assert_eq!(auth.user().map(|user| user.role), Some(Role::Farmer));
    }

    #[test]
    fn hydrate_runs_once() {
        let session = SessionStore::in_memory();
        let mut auth = AuthContext::new(session.clone());
        auth.hydrate();

        session.set_token("late").unwrap();
        session.set_user(&user(Role::Admin)).unwrap();
        auth.hydrate();
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn corrupt_user_hydrates_signed_out() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item(USER_KEY, "{broken").unwrap();
        let session = SessionStore::new(storage);
        session.set_token("tok").unwrap();

        let mut auth = AuthContext::new(session.clone());
        auth.hydrate();
        assert_eq!(auth.snapshot(), &AuthSnapshot::signed_out());
        assert_eq!(session.get_token().unwrap(), None);
    }

    #[test]
    fn logout_clears_state_and_storage() {
        let session = SessionStore::in_memory();
        let mut auth = AuthContext::new(session.clone());
        auth.complete_login(LoginResponse {
            token: "tok".to_string(),
            user: user(Role::Employee),
        })
        .unwrap();
        assert!(auth.is_authenticated());

        auth.logout().unwrap();
        assert!(!auth.is_authenticated());
        assert_eq!(session.get_token().unwrap(), None);
        assert_eq!(session.get_user().unwrap(), None);
    }

    #[test]
    fn truncated_session_file_does_not_block_sign_in() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session-default.json");
        std::fs::write(&path, "{truncated").unwrap();
        let session = SessionStore::file(&path);

        let mut auth = AuthContext::new(session.clone());
        auth.hydrate();
        assert!(!auth.is_authenticated());

        auth.complete_login(LoginResponse {
            token: "tok".to_string(),
            user: user(Role::Farmer),
        })
        .unwrap();
        assert_eq!(session.get_token().unwrap().as_deref(), Some("tok"));

        auth.logout().unwrap();
        assert_eq!(session.get_token().unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn unauthorized_error_drops_session() {
        let mut auth = AuthContext::new(SessionStore::in_memory());
        auth.complete_login(LoginResponse {
            token: "stale".to_string(),
            user: user(Role::Admin),
        })
        .unwrap();

        assert!(!auth.handle_api_error(&ApiError::NotFound("x".to_string())));
        assert!(auth.is_authenticated());

        assert!(auth.handle_api_error(&ApiError::Unauthorized("expired".to_string())));
        assert!(!auth.is_authenticated());
        assert!(!auth.handle_api_error(&ApiError::Unauthorized("again".to_string())));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn login_persists_session() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async {
                Json(serde_json::json!({
                    "token": "fresh",
                    "user": {"id": "u1", "username": "ama", "email": "ama@farm.io", "role": "employee"}
                }))
            }),
        );
        let client = test_server::spawn(router).await;
        let mut auth = AuthContext::new(client.session().clone());
        auth.hydrate();

        let signed_in = auth.login(&client, "ama@farm.io", "pw").await.unwrap();
        assert_eq!(signed_in.role, Role::Employee);
        assert_eq!(client.session().get_token().unwrap().as_deref(), Some("fresh"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn failed_login_leaves_state_untouched() {
        let router = Router::new().route(
            "/api/auth/login",
            post(|| async {
                (
                    axum::http::StatusCode::UNAUTHORIZED,
                    Json(serde_json::json!({"message": "Invalid credentials"})),
                )
            }),
        );
        let client = test_server::spawn(router).await;
        let mut auth = AuthContext::new(client.session().clone());
        auth.hydrate();

        let error = auth.login(&client, "ama@farm.io", "bad").await.unwrap_err();
        assert!(error.is_unauthorized());
        assert_eq!(auth.snapshot(), &AuthSnapshot::signed_out());
        assert_eq!(client.session().get_token().unwrap(), None);
    }
}
