//! Seams between the correlation protocol and the external store.
//!
//! The submitter and resolver talk to the store through these traits so tests
//! can drive them with scripted fakes; [`StoreBinding`] is the production
//! implementation, binding a [`StoreClient`] to the two configured tables.

use serde_json::{Map, Value};
use tether_store::{CreatedRecord, StoreClient, StoreError, TableRecord};

/// Write side: exactly-one-create into the requests table.
pub trait RequestSink {
    /// Create one request record with the given column values.
    fn create_request(
        &self,
        fields: Map<String, Value>,
    ) -> impl Future<Output = Result<CreatedRecord, StoreError>> + Send;
}

/// Read side: the results table, plus a diagnostic peek at a request row.
pub trait ResultSource {
    /// Filtered query against the results table, newest first.
    fn find_results(
        &self,
        filter: &str,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<TableRecord>, StoreError>> + Send;

    /// Most recent page of the results table, newest first.
    fn recent_results(
        &self,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<TableRecord>, StoreError>> + Send;

    /// The request row's status column, if readable. Display only.
    fn request_status(
        &self,
        record_id: &str,
        status_column: &str,
    ) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;
}

/// A store client bound to one requests table and one results table.
#[derive(Debug, Clone)]
pub struct StoreBinding {
    client: StoreClient,
    requests_table_id: String,
    results_table_id: String,
}

impl StoreBinding {
    #[must_use]
    pub fn new(
        client: StoreClient,
        requests_table_id: impl Into<String>,
        results_table_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            requests_table_id: requests_table_id.into(),
            results_table_id: results_table_id.into(),
        }
    }
}

impl RequestSink for StoreBinding {
    async fn create_request(
        &self,
        fields: Map<String, Value>,
    ) -> Result<CreatedRecord, StoreError> {
        self.client
            .create_record(&self.requests_table_id, fields)
            .await
    }
}

impl ResultSource for StoreBinding {
    async fn find_results(
        &self,
        filter: &str,
        page_size: u32,
    ) -> Result<Vec<TableRecord>, StoreError> {
        self.client
            .search_records(&self.results_table_id, filter, page_size)
            .await
    }

    async fn recent_results(&self, page_size: u32) -> Result<Vec<TableRecord>, StoreError> {
        self.client.list_recent(&self.results_table_id, page_size).await
    }

    async fn request_status(
        &self,
        record_id: &str,
        status_column: &str,
    ) -> Result<Option<String>, StoreError> {
        let record = self
            .client
            .get_record(&self.requests_table_id, record_id)
            .await?;
        Ok(record
            .fields
            .get(status_column)
            .and_then(Value::as_str)
            .map(ToString::to_string))
    }
}
