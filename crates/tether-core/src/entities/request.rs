use serde::{Deserialize, Serialize};

/// A user-filled product-analysis request.
///
/// `model` is the only required field and the only one usable for later
/// correlation — everything else is optional context passed through to the
/// external processor verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Product model identifier. Required; the operative correlation key.
    pub model: String,
    /// Competitor product reference (ASIN).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    /// Product category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Feature list, free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<String>,
    /// Usage scenario, free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
    /// Target audience, free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    /// Target price, free text (currency handling is the processor's problem).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Open user-concern questions harvested from the competitor listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rufus_questions: Option<String>,
}

impl AnalysisRequest {
    /// Create a request with only the required identifier set.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }
}

/// The tuple returned to the caller after submission.
///
/// `record_id` is the store-assigned identifier of the request row and is
/// best-effort/diagnostic only. The external processor writes its result as a
/// brand-new row in a separate table, so `model` — case-preserved as
/// submitted — is the operative correlation key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CorrelationHandle {
    pub record_id: String,
    pub model: String,
}
