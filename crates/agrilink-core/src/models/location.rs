//! Employee location model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserRef;

/// Availability reported alongside an employee's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Busy,
    #[default]
    Offline,
    Available,
}

impl PresenceStatus {
    pub const ALL: [Self; 4] = [Self::Online, Self::Busy, Self::Offline, Self::Available];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Busy => "busy",
            Self::Offline => "offline",
            Self::Available => "available",
        }
    }
}

impl fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresenceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown presence status '{}'", s.trim()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl DeviceInfo {
    /// Describes the machine the client runs on.
    #[must_use]
    pub fn current(client_name: &str) -> Self {
        Self {
            platform: Some(format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH)),
            user_agent: Some(format!("{client_name}/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeLocation {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(alias = "employeeId")]
    pub employee: UserRef,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lng")]
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub status: PresenceStatus,
    #[serde(default)]
    pub address: Option<String>,
    pub last_activity: DateTime<Utc>,
    #[serde(default)]
    pub device_info: Option<DeviceInfo>,
    /// Distance from the query point, present on nearby-search results.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

/// Position update sent by an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub status: PresenceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_info: Option<DeviceInfo>,
}

impl LocationUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err("Latitude must be between -90 and 90".to_string());
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err("Longitude must be between -180 and 180".to_string());
        }
        if self.accuracy.is_some_and(|accuracy| accuracy < 0.0) {
            return Err("Accuracy must not be negative".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_status_parses_any_case() {
        assert_eq!("BUSY".parse::<PresenceStatus>().unwrap(), PresenceStatus::Busy);
        assert!("away".parse::<PresenceStatus>().is_err());
    }

    #[test]
    fn location_update_rejects_out_of_range_coordinates() {
        let update = LocationUpdate {
            latitude: 91.0,
            longitude: 0.0,
            accuracy: None,
            address: None,
            status: PresenceStatus::Online,
            device_info: None,
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn location_deserializes_short_coordinate_names() {
        let location: EmployeeLocation = serde_json::from_str(
            r#"{"employee":"e1","lat":6.1,"lng":1.2,"status":"available","lastActivity":"2024-05-01T08:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(location.employee.id(), "e1");
        assert_eq!(location.status, PresenceStatus::Available);
        assert!(location.device_info.is_none());
    }
}
