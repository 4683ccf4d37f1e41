use serde::{Deserialize, Serialize};

/// The normalized output of one finished analysis.
///
/// Every field is independently optional: the external processor may omit any
/// column, and an absent column simply leaves the key out of the serialized
/// form. Column-name drift in the source table is handled by alias resolution
/// before this struct is built, so field names here are canonical and stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet_points: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bullet_points_rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image_direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_image_direction_rationale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aplus_direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aplus_direction_rationale: Option<String>,
}

impl AnalysisResult {
    /// Whether no field resolved at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.title_rationale.is_none()
            && self.bullet_points.is_none()
            && self.bullet_points_rationale.is_none()
            && self.description.is_none()
            && self.description_rationale.is_none()
            && self.main_image_direction.is_none()
            && self.main_image_direction_rationale.is_none()
            && self.aplus_direction.is_none()
            && self.aplus_direction_rationale.is_none()
    }
}

/// Outcome of a single non-blocking status check.
///
/// Absence of a matching result row is not an error — it means the external
/// processor has not written the result yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StatusCheck {
    /// A matching result row was found and mapped.
    Done { data: AnalysisResult },
    /// No matching row yet. `diagnostic` carries the request row's status
    /// column when available, for display only.
    Processing { diagnostic: String },
}

impl StatusCheck {
    /// Whether this check reached the terminal state.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done { .. })
    }
}
