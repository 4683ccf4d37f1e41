//! The mapping profile: every piece of fragile schema knowledge in one place.
//!
//! The external store's column names are editable by non-engineers and have
//! been renamed, retranslated, and duplicated over the system's lifetime.
//! Nothing in this workspace hardcodes a column name outside this module; the
//! built-in default profile matches the original deployment's schema and can
//! be overridden wholesale (it is plain serde data).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tether_core::{AnalysisRequest, AnalysisResult};

/// Trim surrounding whitespace and case-fold for identifier comparison.
///
/// The identifier crosses a human-editable boundary (the processor or its
/// operator may retype it), so `" G7-Pro "` and `"g7-pro"` must compare
/// equal.
#[must_use]
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Whether two identifier strings match after normalization.
#[must_use]
pub fn keys_match(a: &str, b: &str) -> bool {
    normalize_key(a) == normalize_key(b)
}

/// Which key links a result row back to its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrategy {
    /// Match on the user-supplied identifier field. Current strategy: the
    /// processor creates new result rows, so the store-assigned request id
    /// never appears in them.
    ByModel,
    /// Match on a column carrying the request row's store-assigned id.
    /// Deprecated — only works for deployments whose automation copies the
    /// request id into the result row.
    ByRecordId,
}

/// Internal request field → store column names, used at submission time.
///
/// Static configuration, not inferred at runtime: the external schema is
/// independently editable, and this map is the single most fragile point in
/// the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestColumns {
    pub model: String,
    pub asin: String,
    pub category: String,
    pub features: String,
    pub scenario: String,
    pub audience: String,
    pub price: String,
    pub rufus_questions: String,
}

impl Default for RequestColumns {
    fn default() -> Self {
        Self {
            model: "型号".into(),
            asin: "竞品ASIN".into(),
            category: "产品类型".into(),
            features: "功能点".into(),
            scenario: "使用场景".into(),
            audience: "目标人群".into(),
            price: "目标定价".into(),
            rufus_questions: "竞品rufus问题".into(),
        }
    }
}

impl RequestColumns {
    /// Build the column-value map for one create-record call.
    ///
    /// The identifier is always present; optional fields are included only
    /// when set, passed through verbatim.
    #[must_use]
    pub fn to_fields(&self, request: &AnalysisRequest) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert(self.model.clone(), Value::String(request.model.clone()));

        let optional = [
            (&self.asin, &request.asin),
            (&self.category, &request.category),
            (&self.features, &request.features),
            (&self.scenario, &request.scenario),
            (&self.audience, &request.audience),
            (&self.price, &request.price),
            (&self.rufus_questions, &request.rufus_questions),
        ];
        for (column, value) in optional {
            if let Some(value) = value {
                fields.insert(column.clone(), Value::String(value.clone()));
            }
        }
        fields
    }
}

/// Canonical output fields of an [`AnalysisResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultField {
    Title,
    TitleRationale,
    BulletPoints,
    BulletPointsRationale,
    Description,
    DescriptionRationale,
    MainImageDirection,
    MainImageDirectionRationale,
    AplusDirection,
    AplusDirectionRationale,
}

impl ResultField {
    /// Write a resolved value into the canonical slot.
    pub fn assign(self, result: &mut AnalysisResult, value: String) {
        let slot = match self {
            Self::Title => &mut result.title,
            Self::TitleRationale => &mut result.title_rationale,
            Self::BulletPoints => &mut result.bullet_points,
            Self::BulletPointsRationale => &mut result.bullet_points_rationale,
            Self::Description => &mut result.description,
            Self::DescriptionRationale => &mut result.description_rationale,
            Self::MainImageDirection => &mut result.main_image_direction,
            Self::MainImageDirectionRationale => &mut result.main_image_direction_rationale,
            Self::AplusDirection => &mut result.aplus_direction,
            Self::AplusDirectionRationale => &mut result.aplus_direction_rationale,
        };
        *slot = Some(value);
    }
}

/// One canonical field and the ordered list of column names it has lived
/// under. Resolution takes the first alias with a non-empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRule {
    pub field: ResultField,
    pub aliases: Vec<String>,
}

/// Versioned bundle of all correlation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingProfile {
    /// Monotonic profile version, bumped whenever the external schema drifts.
    pub version: u32,
    pub strategy: CorrelationStrategy,
    pub request_columns: RequestColumns,
    /// Column names the identifier has lived under in the results table.
    pub identifier_aliases: Vec<String>,
    /// Column names carrying the request row's id, for the legacy strategy.
    pub record_id_aliases: Vec<String>,
    /// Column name of the request row's mutable status field (diagnostic
    /// display only).
    pub status_column: String,
    pub result_aliases: Vec<AliasRule>,
}

impl Default for MappingProfile {
    /// Profile v2: correlate by identifier, with the alias history the
    /// results table has accumulated so far.
    fn default() -> Self {
        let alias = |field, names: &[&str]| AliasRule {
            field,
            aliases: names.iter().map(ToString::to_string).collect(),
        };
        Self {
            version: 2,
            strategy: CorrelationStrategy::ByModel,
            request_columns: RequestColumns::default(),
            identifier_aliases: vec!["型号".into()],
            record_id_aliases: vec!["record_id".into(), "请求ID".into()],
            status_column: "状态".into(),
            result_aliases: vec![
                alias(ResultField::Title, &["标题"]),
                alias(ResultField::TitleRationale, &["标题理由"]),
                alias(ResultField::BulletPoints, &["五点描述", "五点"]),
                alias(ResultField::BulletPointsRationale, &["五点描述理由", "五点理由"]),
                alias(ResultField::Description, &["商品描述"]),
                alias(ResultField::DescriptionRationale, &["商品描述理由"]),
                alias(ResultField::MainImageDirection, &["主图设计方向"]),
                alias(ResultField::MainImageDirectionRationale, &["主图设计方向理由"]),
                alias(ResultField::AplusDirection, &["A+设计方向"]),
                alias(ResultField::AplusDirectionRationale, &["A+设计方向理由"]),
            ],
        }
    }
}

impl MappingProfile {
    /// Extract the identifier value from a result row via the alias list.
    #[must_use]
    pub fn row_identifier(&self, fields: &Map<String, Value>) -> Option<String> {
        first_non_empty(fields, &self.identifier_aliases)
    }

    /// Extract the request-id value from a result row (legacy strategy).
    #[must_use]
    pub fn row_record_id(&self, fields: &Map<String, Value>) -> Option<String> {
        first_non_empty(fields, &self.record_id_aliases)
    }

    /// Map a raw result row into the canonical output shape.
    ///
    /// Each output field resolves independently: the first alias with a
    /// non-empty value wins, and a field with no present alias is simply
    /// absent — never an error.
    #[must_use]
    pub fn map_result(&self, fields: &Map<String, Value>) -> AnalysisResult {
        let mut result = AnalysisResult::default();
        for rule in &self.result_aliases {
            if let Some(value) = first_non_empty(fields, &rule.aliases) {
                rule.field.assign(&mut result, value);
            }
        }
        result
    }
}

/// First non-empty text value among the given column names.
fn first_non_empty(fields: &Map<String, Value>, aliases: &[String]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|name| fields.get(name).and_then(field_text))
        .next()
}

/// Extract text from a raw cell value.
///
/// The store returns plain strings for simple text columns, segment arrays
/// (`[{"text": "..."}]`) for rich-text columns, and numbers for numeric ones.
/// Empty or whitespace-only text counts as absent.
fn field_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(segments) => segments
            .iter()
            .filter_map(|seg| seg.get("text").and_then(Value::as_str))
            .collect::<String>(),
        _ => return None,
    };
    if text.trim().is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(" G7-Pro ", "g7-pro")]
    #[case("G7-PRO", "g7-pro")]
    #[case("\tg7-pro\n", "g7-pro")]
    #[case("型号X", "型号x")]
    fn normalize_trims_and_casefolds(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_key(raw), expected);
        assert!(keys_match(raw, expected));
    }

    #[test]
    fn different_identifiers_do_not_match() {
        assert!(!keys_match("G7-Pro", "G8-Pro"));
    }

    #[test]
    fn to_fields_always_includes_identifier() {
        let columns = RequestColumns::default();
        let fields = columns.to_fields(&AnalysisRequest::new("G7-Pro"));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["型号"], "G7-Pro");
    }

    #[test]
    fn to_fields_includes_set_optionals_verbatim() {
        let columns = RequestColumns::default();
        let request = AnalysisRequest {
            model: "G7-Pro".into(),
            asin: Some("B0C5T9JM59".into()),
            price: Some("59.99".into()),
            ..AnalysisRequest::default()
        };
        let fields = columns.to_fields(&request);
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["竞品ASIN"], "B0C5T9JM59");
        assert_eq!(fields["目标定价"], "59.99");
    }

    #[test]
    fn alias_resolution_takes_first_non_empty() {
        let profile = MappingProfile::default();
        let fields: Map<String, Value> = serde_json::from_str(
            r#"{
                "型号": "g7-pro",
                "五点": "old-name bullets",
                "五点描述理由": "",
                "五点理由": "legacy rationale",
                "标题": "New G7 Pro title"
            }"#,
        )
        .unwrap();

        let result = profile.map_result(&fields);
        assert_eq!(result.bullet_points.as_deref(), Some("old-name bullets"));
        assert_eq!(
            result.bullet_points_rationale.as_deref(),
            Some("legacy rationale")
        );
        assert_eq!(result.title.as_deref(), Some("New G7 Pro title"));
        assert!(result.description.is_none());
    }

    #[test]
    fn absent_aliases_leave_field_out_without_error() {
        let profile = MappingProfile::default();
        let fields = Map::new();
        let result = profile.map_result(&fields);
        assert!(result.is_empty());
    }

    #[test]
    fn rich_text_segments_are_concatenated() {
        let fields: Map<String, Value> = serde_json::from_str(
            r#"{"商品描述": [{"text": "part one "}, {"text": "part two"}]}"#,
        )
        .unwrap();
        let result = MappingProfile::default().map_result(&fields);
        assert_eq!(result.description.as_deref(), Some("part one part two"));
    }

    #[test]
    fn row_identifier_reads_alias_column() {
        let profile = MappingProfile::default();
        let fields: Map<String, Value> =
            serde_json::from_str(r#"{"型号": "g7-pro"}"#).unwrap();
        assert_eq!(profile.row_identifier(&fields).as_deref(), Some("g7-pro"));
        assert!(profile.row_identifier(&Map::new()).is_none());
    }

    #[test]
    fn default_profile_is_versioned_by_model() {
        let profile = MappingProfile::default();
        assert_eq!(profile.version, 2);
        assert_eq!(profile.strategy, CorrelationStrategy::ByModel);
    }

    #[test]
    fn profile_roundtrips_through_json() {
        let profile = MappingProfile::default();
        let json = serde_json::to_string(&profile).unwrap();
        let back: MappingProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
