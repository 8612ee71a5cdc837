//! Admin statistics and AI assistant payloads

use serde::{Deserialize, Serialize};

use super::user::UserRef;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStats {
    #[serde(alias = "_id")]
    pub region: String,
    #[serde(default, alias = "total")]
    pub total_reports: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub in_progress: u64,
    #[serde(default)]
    pub solved: u64,
}

impl RegionStats {
    /// Share of solved reports in percent, 0 when the region has none.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn solved_ratio(&self) -> f64 {
        if self.total_reports == 0 {
            0.0
        } else {
            self.solved as f64 * 100.0 / self.total_reports as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePerformance {
    pub employee: UserRef,
    #[serde(default)]
    pub reports_handled: u64,
    #[serde(default)]
    pub reports_solved: u64,
    #[serde(default)]
    pub average_resolution_hours: Option<f64>,
}

/// Text analysis produced by the backend's AI proxy for a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiAnalysis {
    #[serde(alias = "result", alias = "text")]
    pub analysis: String,
}

/// Reply from the AI assistant chat proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiReply {
    #[serde(alias = "response", alias = "text")]
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solved_ratio_handles_empty_region() {
        let empty = RegionStats {
            region: "West".to_string(),
            total_reports: 0,
            pending: 0,
            in_progress: 0,
            solved: 0,
        };
        assert!(empty.solved_ratio().abs() < f64::EPSILON);

        let half = RegionStats {
            total_reports: 4,
            solved: 2,
            ..empty
        };
        assert!((half.solved_ratio() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ai_payloads_accept_proxy_field_names() {
        let reply: AiReply = serde_json::from_str(r#"{"response":"Apply neem oil"}"#).unwrap();
        assert_eq!(reply.reply, "Apply neem oil");
        let analysis: AiAnalysis = serde_json::from_str(r#"{"result":"Leaf rust"}"#).unwrap();
        assert_eq!(analysis.analysis, "Leaf rust");
    }
}
