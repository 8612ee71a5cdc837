//! Application state management
//!
//! Global state accessible via Dioxus context providers.

use std::sync::Arc;

use agrilink_core::api::{ApiClient, ApiError, LoginResponse};
use agrilink_core::preload::RoutePreloader;
use agrilink_core::{AuthContext, AuthSnapshot, Role, Route, User};
use dioxus::prelude::*;

use crate::theme::ResolvedTheme;

/// Global application state
#[derive(Clone, Copy)]
pub struct AppState {
    /// Session-backed auth state, hydrated once at startup
    pub auth: Signal<AuthContext>,
    /// Page currently shown
    pub route: Signal<Route>,
    /// Backend client; `None` when the configured URL was rejected
    pub api: Signal<Option<ApiClient>>,
    /// Prefetched admin payloads
    pub preloader: Signal<Arc<RoutePreloader>>,
    pub theme: Signal<ResolvedTheme>,
    /// Configuration problem found at startup
    pub startup_error: Signal<Option<String>>,
    /// One-shot message shown on the next page (e.g. after sign-up)
    pub flash: Signal<Option<String>>,
}

impl AppState {
    pub fn snapshot(&self) -> AuthSnapshot {
        self.auth.read().snapshot().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.auth.read().user().cloned()
    }

    pub fn role(&self) -> Option<Role> {
        self.auth.read().snapshot().role()
    }

    pub fn api(&self) -> Option<ApiClient> {
        self.api.read().clone()
    }

    pub fn preloader(&self) -> Arc<RoutePreloader> {
        Arc::clone(&*self.preloader.read())
    }

    pub fn navigate(&mut self, route: Route) {
        if *self.route.peek() != route {
            tracing::debug!("Navigating to {}", route);
            self.route.set(route);
        }
    }

    /// Stores a successful login and opens the role's home page.
    pub fn sign_in(&mut self, response: LoginResponse) -> Result<(), String> {
        let role = response.user.role;
        self.auth
            .write()
            .complete_login(response)
            .map_err(|error| error.to_string())?;
        self.navigate(Route::home_for(role));
        Ok(())
    }

    pub fn sign_out(&mut self) {
        if let Err(error) = self.auth.write().logout() {
            tracing::warn!("Failed to clear session: {}", error);
        }
        self.preloader.read().clear();
        self.navigate(Route::Login);
    }

    /// Message for an inline alert. An unauthorized response also ends the
    /// session and returns to the login page.
    pub fn describe_error(&mut self, error: &ApiError) -> String {
        tracing::error!("Request failed: {}", error);
        if self.auth.write().handle_api_error(error) {
            self.preloader.read().clear();
            self.flash
                .set(Some("Your session has expired. Please sign in again.".to_string()));
            self.navigate(Route::Login);
        }
        error.user_message()
    }

    pub fn take_flash(&mut self) -> Option<String> {
        self.flash.take()
    }
}
