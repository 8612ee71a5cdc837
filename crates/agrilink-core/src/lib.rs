//! agrilink-core - Core library for AgriLink
//!
//! Shared models, the persisted session, auth state, route guarding and
//! navigation, the typed backend API client and list helpers used by the
//! AgriLink front-ends (CLI and desktop).

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod listing;
pub mod models;
pub mod navigation;
pub mod preload;
pub mod presence;
pub mod session;
pub mod util;

pub use api::{ApiClient, ApiError, ApiResult};
pub use auth::{AuthContext, AuthSnapshot};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use guard::GuardDecision;
pub use models::{Role, User};
pub use navigation::{menu_for, NavItem, Route};
pub use session::SessionStore;
