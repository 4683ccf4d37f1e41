//! Record operations against the store's tables.
//!
//! Every call fetches a fresh bearer token first (see `auth.rs`) and unwraps
//! the store's `{code, msg, data}` envelope. A non-zero envelope code is
//! surfaced verbatim as [`StoreError::Envelope`] — schema mismatches are the
//! dominant real-world failure and their raw diagnostic must reach the user.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{StoreClient, error::StoreError, http::check_response};

/// A row read from a table: store-assigned id plus raw column values.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TableRecord {
    pub record_id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// Result of creating a record in the requests table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRecord {
    pub record_id: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    msg: String,
    data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the envelope, mapping a non-zero code to `StoreError::Envelope`.
    fn into_data(self) -> Result<T, StoreError> {
        if self.code != 0 {
            return Err(StoreError::Envelope {
                code: self.code,
                message: self.msg,
            });
        }
        self.data.ok_or_else(|| {
            StoreError::Parse("envelope code 0 but no data payload".to_string())
        })
    }
}

#[derive(Debug, Deserialize)]
struct RecordData {
    record: TableRecord,
}

#[derive(Debug, Deserialize)]
struct ItemsData {
    #[serde(default)]
    items: Vec<TableRecord>,
}

impl StoreClient {
    /// Create exactly one record in `table_id` with the given column values.
    ///
    /// A failed create surfaces as an error — it is never retried here, since
    /// a blind retry risks a duplicate visible request with unclear state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Auth`] if the token exchange fails,
    /// [`StoreError::Http`]/[`StoreError::Api`] on transport or HTTP-level
    /// failure, and [`StoreError::Envelope`] when the store rejects the write
    /// (bad column name, permission, validation).
    pub async fn create_record(
        &self,
        table_id: &str,
        fields: Map<String, Value>,
    ) -> Result<CreatedRecord, StoreError> {
        let token = self.tenant_token().await?;
        let resp = check_response(
            self.http
                .post(self.records_url(table_id))
                .bearer_auth(token)
                .json(&serde_json::json!({ "fields": fields }))
                .send()
                .await?,
        )
        .await?;

        let envelope: Envelope<RecordData> = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(format!("create response: {e}")))?;
        let data = envelope.into_data()?;
        tracing::debug!(record_id = %data.record.record_id, table_id, "record created");
        Ok(CreatedRecord {
            record_id: data.record.record_id,
        })
    }

    /// Query `table_id` for records matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the token exchange, the request, or the
    /// envelope fails. An empty result set is `Ok(vec![])`, not an error.
    pub async fn search_records(
        &self,
        table_id: &str,
        filter: &str,
        page_size: u32,
    ) -> Result<Vec<TableRecord>, StoreError> {
        let url = format!(
            "{}?filter={}&sort={}&page_size={page_size}",
            self.records_url(table_id),
            urlencoding::encode(filter),
            urlencoding::encode(r#"["CreatedTime DESC"]"#),
        );
        self.fetch_items(&url).await
    }

    /// Fetch the most recent `page_size` records of `table_id`, newest first.
    ///
    /// This is the client-side fallback scan source used when server-side
    /// filtering finds nothing (the filter is exact-match and cannot
    /// case-fold).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on token, transport, or envelope failure.
    pub async fn list_recent(
        &self,
        table_id: &str,
        page_size: u32,
    ) -> Result<Vec<TableRecord>, StoreError> {
        let url = format!(
            "{}?sort={}&page_size={page_size}",
            self.records_url(table_id),
            urlencoding::encode(r#"["CreatedTime DESC"]"#),
        );
        self.fetch_items(&url).await
    }

    /// Fetch a single record by its store-assigned id.
    ///
    /// Used only to read the request row's status column for diagnostic
    /// display while polling — this client never mutates a request row after
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on token, transport, or envelope failure
    /// (including an unknown record id).
    pub async fn get_record(
        &self,
        table_id: &str,
        record_id: &str,
    ) -> Result<TableRecord, StoreError> {
        let token = self.tenant_token().await?;
        let url = format!("{}/{record_id}", self.records_url(table_id));
        let resp = check_response(self.http.get(&url).bearer_auth(token).send().await?).await?;

        let envelope: Envelope<RecordData> = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(format!("get response: {e}")))?;
        Ok(envelope.into_data()?.record)
    }

    async fn fetch_items(&self, url: &str) -> Result<Vec<TableRecord>, StoreError> {
        let token = self.tenant_token().await?;
        let resp = check_response(self.http.get(url).bearer_auth(token).send().await?).await?;

        let envelope: Envelope<ItemsData> = resp
            .json()
            .await
            .map_err(|e| StoreError::Parse(format!("query response: {e}")))?;
        Ok(envelope.into_data()?.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CREATE_FIXTURE: &str = r#"{
        "code": 0,
        "msg": "success",
        "data": {
            "record": {
                "record_id": "rec123",
                "fields": {
                    "型号": "G7-Pro",
                    "目标定价": "59.99"
                }
            }
        }
    }"#;

    const SEARCH_FIXTURE: &str = r#"{
        "code": 0,
        "msg": "success",
        "data": {
            "has_more": false,
            "total": 2,
            "items": [
                {
                    "record_id": "recNew",
                    "fields": { "型号": "g7-pro", "标题": "Newer" }
                },
                {
                    "record_id": "recOld",
                    "fields": { "型号": "G7-Pro", "标题": "Older" }
                }
            ]
        }
    }"#;

    #[test]
    fn parse_create_envelope() {
        let envelope: Envelope<RecordData> = serde_json::from_str(CREATE_FIXTURE).unwrap();
        let data = envelope.into_data().unwrap();
        assert_eq!(data.record.record_id, "rec123");
        assert_eq!(data.record.fields["型号"], "G7-Pro");
    }

    #[test]
    fn parse_search_envelope_preserves_order() {
        let envelope: Envelope<ItemsData> = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let items = envelope.into_data().unwrap().items;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].record_id, "recNew");
        assert_eq!(items[1].record_id, "recOld");
    }

    #[test]
    fn nonzero_code_becomes_envelope_error() {
        let body = r#"{"code":1254045,"msg":"FieldNameNotFound","data":null}"#;
        let envelope: Envelope<ItemsData> = serde_json::from_str(body).unwrap();
        let err = envelope.into_data().unwrap_err();
        match err {
            StoreError::Envelope { code, message } => {
                assert_eq!(code, 1254045);
                assert_eq!(message, "FieldNameNotFound");
            }
            other => panic!("expected Envelope error, got {other:?}"),
        }
    }

    #[test]
    fn empty_items_is_ok_and_empty() {
        let body = r#"{"code":0,"msg":"success","data":{"items":[]}}"#;
        let envelope: Envelope<ItemsData> = serde_json::from_str(body).unwrap();
        assert!(envelope.into_data().unwrap().items.is_empty());
    }

    #[test]
    fn missing_items_key_defaults_to_empty() {
        let body = r#"{"code":0,"msg":"success","data":{"has_more":false}}"#;
        let envelope: Envelope<ItemsData> = serde_json::from_str(body).unwrap();
        assert!(envelope.into_data().unwrap().items.is_empty());
    }

    #[test]
    fn code_zero_without_data_is_parse_error() {
        let body = r#"{"code":0,"msg":"success"}"#;
        let envelope: Envelope<ItemsData> = serde_json::from_str(body).unwrap();
        assert!(matches!(
            envelope.into_data().unwrap_err(),
            StoreError::Parse(_)
        ));
    }
}
