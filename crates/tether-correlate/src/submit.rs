//! Request submission.

use tether_core::{AnalysisRequest, CorrelationHandle};

use crate::error::SubmitError;
use crate::schema::RequestColumns;
use crate::source::RequestSink;

/// Records an [`AnalysisRequest`] durably in the external requests table.
///
/// The contract ends at the write: exactly one create-record call, no silent
/// retry, no coupling to whatever triggers the downstream processor.
#[derive(Debug, Clone)]
pub struct Submitter<S> {
    sink: S,
    columns: RequestColumns,
}

impl<S: RequestSink> Submitter<S> {
    #[must_use]
    pub const fn new(sink: S, columns: RequestColumns) -> Self {
        Self { sink, columns }
    }

    /// Validate, record, and return the correlation handle.
    ///
    /// The returned handle carries the store-assigned `record_id` (diagnostic
    /// only) and the submitted `model` exactly as typed, case preserved —
    /// normalization happens at match time, not here.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Validation`] if the identifier is empty or
    ///   whitespace-only; nothing reaches the network.
    /// - [`SubmitError::Auth`] if the credential exchange fails.
    /// - [`SubmitError::Submission`] if the store rejects the write, carrying
    ///   the store's raw diagnostic message.
    pub async fn submit(
        &self,
        request: &AnalysisRequest,
    ) -> Result<CorrelationHandle, SubmitError> {
        if request.model.trim().is_empty() {
            return Err(SubmitError::Validation(
                "model identifier must not be empty".to_string(),
            ));
        }

        let fields = self.columns.to_fields(request);
        let created = self.sink.create_request(fields).await?;
        tracing::info!(record_id = %created.record_id, model = %request.model, "request recorded");

        Ok(CorrelationHandle {
            record_id: created.record_id,
            model: request.model.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};
    use std::sync::Mutex;
    use tether_store::{CreatedRecord, StoreError};

    /// Records every create call; can be programmed to fail.
    struct FakeSink {
        calls: Mutex<Vec<Map<String, Value>>>,
        fail_with: Option<fn() -> StoreError>,
    }

    impl FakeSink {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(fail_with: fn() -> StoreError) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(fail_with),
            }
        }
    }

    impl RequestSink for &FakeSink {
        async fn create_request(
            &self,
            fields: Map<String, Value>,
        ) -> Result<CreatedRecord, StoreError> {
            self.calls.lock().unwrap().push(fields);
            if let Some(fail) = self.fail_with {
                return Err(fail());
            }
            Ok(CreatedRecord {
                record_id: "rec123".into(),
            })
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            model: "G7-Pro".into(),
            asin: Some("B0C5T9JM59".into()),
            price: Some("59.99".into()),
            ..AnalysisRequest::default()
        }
    }

    #[tokio::test]
    async fn submit_creates_exactly_one_record() {
        let sink = FakeSink::ok();
        let submitter = Submitter::new(&sink, RequestColumns::default());

        let handle = submitter.submit(&request()).await.unwrap();
        assert_eq!(handle.record_id, "rec123");
        assert_eq!(handle.model, "G7-Pro");

        let calls = sink.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0]["型号"], "G7-Pro");
        assert_eq!(calls[0]["竞品ASIN"], "B0C5T9JM59");
    }

    #[tokio::test]
    async fn empty_model_fails_before_the_network() {
        let sink = FakeSink::ok();
        let submitter = Submitter::new(&sink, RequestColumns::default());

        for bad in ["", "   ", "\t\n"] {
            let err = submitter
                .submit(&AnalysisRequest::new(bad))
                .await
                .unwrap_err();
            assert!(matches!(err, SubmitError::Validation(_)));
        }
        assert!(sink.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn handle_preserves_case_and_whitespace_of_submitted_model() {
        let sink = FakeSink::ok();
        let submitter = Submitter::new(&sink, RequestColumns::default());

        let handle = submitter
            .submit(&AnalysisRequest::new(" G7-Pro "))
            .await
            .unwrap();
        assert_eq!(handle.model, " G7-Pro ");
    }

    #[tokio::test]
    async fn rejected_write_surfaces_raw_diagnostic_without_retry() {
        let sink = FakeSink::failing(|| StoreError::Envelope {
            code: 1254045,
            message: "FieldNameNotFound: 竞品rufus问题".into(),
        });
        let submitter = Submitter::new(&sink, RequestColumns::default());

        let err = submitter.submit(&request()).await.unwrap_err();
        match err {
            SubmitError::Submission(message) => {
                assert!(message.contains("FieldNameNotFound"));
            }
            other => panic!("expected Submission, got {other:?}"),
        }
        // one attempt, no silent retry
        assert_eq!(sink.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn auth_failure_is_distinguished() {
        let sink = FakeSink::failing(|| StoreError::Auth(r#"{"code":10003}"#.into()));
        let submitter = Submitter::new(&sink, RequestColumns::default());

        let err = submitter.submit(&request()).await.unwrap_err();
        assert!(matches!(err, SubmitError::Auth(_)));
    }
}
