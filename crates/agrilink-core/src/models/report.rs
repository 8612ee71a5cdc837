//! Crop-issue report model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::ProductRef;
use super::user::UserRef;

/// Workflow state of a report. Moves forward only
/// (Pending → In Progress → Solved); the backend enforces transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportStatus {
    Pending,
    #[serde(rename = "In Progress", alias = "InProgress", alias = "in-progress")]
    InProgress,
    Solved,
}

impl ReportStatus {
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Solved];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Solved => "Solved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "inprogress" => Ok(Self::InProgress),
            "solved" => Ok(Self::Solved),
            _ => Err(format!("unknown report status '{}'", s.trim())),
        }
    }
}

/// A crop-issue report submitted by (or on behalf of) a farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub farmer: Option<UserRef>,
    pub crop: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub region: String,
    pub status: ReportStatus,
    #[serde(default, alias = "isUrgent")]
    pub urgent: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub recommended_products: Vec<ProductRef>,
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    #[serde(default, alias = "lng")]
    pub longitude: Option<f64>,
}

impl Report {
    /// Short label for list rows: crop plus the first line of the description.
    #[must_use]
    pub fn title_preview(&self, max_len: usize) -> String {
        let first_line = self.description.lines().next().unwrap_or("").trim();
        let title = if first_line.is_empty() {
            self.crop.clone()
        } else {
            format!("{}: {}", self.crop, first_line)
        };
        if title.chars().count() <= max_len {
            title
        } else {
            let mut truncated: String = title.chars().take(max_len.saturating_sub(3)).collect();
            truncated.push_str("...");
            truncated
        }
    }

    /// Coordinates when the report carries both latitude and longitude.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    #[must_use]
    pub const fn is_diagnosed(&self) -> bool {
        self.diagnosis.is_some()
    }
}

/// Payload for creating a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub crop: String,
    pub description: String,
    pub region: String,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Set by employees filing a report on a farmer's behalf.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farmer_id: Option<String>,
}

impl NewReport {
    /// Rejects drafts with an empty crop or description.
    pub fn validate(&self) -> Result<(), String> {
        if self.crop.trim().is_empty() {
            return Err("Crop is required".to_string());
        }
        if self.description.trim().is_empty() {
            return Err("Description is required".to_string());
        }
        if self.latitude.is_some() != self.longitude.is_some() {
            return Err("Latitude and longitude must be provided together".to_string());
        }
        Ok(())
    }
}

/// Admin diagnosis payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub diagnosis: String,
    pub solution: String,
    #[serde(default)]
    pub recommended_products: Vec<String>,
}
