use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AnalysisResult;

/// One completed analysis, as appended to the local history log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The correlation key the result was matched on, case-preserved.
    pub model: String,
    /// Store-assigned id of the request row (diagnostic only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    pub completed_at: DateTime<Utc>,
    pub result: AnalysisResult,
}

impl HistoryEntry {
    /// Build an entry stamped with the current time.
    #[must_use]
    pub fn completed_now(
        model: impl Into<String>,
        record_id: Option<String>,
        result: AnalysisResult,
    ) -> Self {
        Self {
            model: model.into(),
            record_id,
            completed_at: Utc::now(),
            result,
        }
    }
}
