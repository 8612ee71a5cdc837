//! User and role models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role as reported by the backend.
///
/// The client treats the role as advisory: it picks menus and guards pages
/// with it, while the backend re-checks authorization on every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Farmer,
    Employee,
    Admin,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Farmer, Self::Employee, Self::Admin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Farmer => "farmer",
            Self::Employee => "employee",
            Self::Admin => "admin",
        }
    }

    /// Human label for menus and headers.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Farmer => "Farmer",
            Self::Employee => "Field Employee",
            Self::Admin => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "farmer" => Ok(Self::Farmer),
            "employee" => Ok(Self::Employee),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Signed-in user as cached in the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl User {
    /// Name shown in the top bar, falling back to the email address.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.username.trim().is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}

/// Reference to another user; the backend sends either a bare id or a
/// populated summary depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(String),
    Summary(UserSummary),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl UserRef {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Summary(summary) => &summary.id,
        }
    }

    /// Best available label: username, then email, then id.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Summary(summary) => summary
                .username
                .as_deref()
                .or(summary.email.as_deref())
                .unwrap_or(&summary.id),
        }
    }
}
