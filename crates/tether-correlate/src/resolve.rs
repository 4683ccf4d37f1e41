//! Result resolution: one non-blocking status check.

use tether_core::StatusCheck;
use tether_store::{StoreClient, StoreError, TableRecord};

use crate::error::ResolveError;
use crate::schema::{CorrelationStrategy, MappingProfile, keys_match};
use crate::source::ResultSource;

/// Checks whether a matching result row exists yet.
///
/// Read-only and idempotent: the results table is append-only with respect to
/// this system, so once a match is found it keeps being found.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    source: S,
    profile: MappingProfile,
    scan_page_size: u32,
}

impl<S: ResultSource> Resolver<S> {
    #[must_use]
    pub const fn new(source: S, profile: MappingProfile, scan_page_size: u32) -> Self {
        Self {
            source,
            profile,
            scan_page_size,
        }
    }

    /// Perform one status check for the given correlation handle parts.
    ///
    /// Strategy:
    /// 1. Server-side filtered query on the primary key column (exact match
    ///    on the trimmed key, newest first, limit one). A hit is re-verified
    ///    with normalized comparison.
    /// 2. Fallback scan when the filter errs or finds nothing: fetch the most
    ///    recent rows and compare normalized keys newest → oldest. The
    ///    server-side filter cannot case-fold, so this path is what makes
    ///    `" G7-Pro "` find a row stored as `"g7-pro"`.
    /// 3. No match → `Processing` with a diagnostic status line; absence is
    ///    not an error.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Auth`] when the credential exchange fails (fatal).
    /// - [`ResolveError::Query`] when the read genuinely fails (store
    ///   unreachable, malformed filter on both paths).
    pub async fn check_status(
        &self,
        model: &str,
        record_id: Option<&str>,
    ) -> Result<StatusCheck, ResolveError> {
        let target = match self.profile.strategy {
            CorrelationStrategy::ByModel => model.trim().to_string(),
            CorrelationStrategy::ByRecordId => record_id
                .map(str::to_string)
                .ok_or_else(|| {
                    ResolveError::Query(
                        "by_record_id correlation requires a record id".to_string(),
                    )
                })?,
        };

        if let Some(row) = self.find_match(&target).await? {
            return Ok(StatusCheck::Done {
                data: self.profile.map_result(&row.fields),
            });
        }

        Ok(StatusCheck::Processing {
            diagnostic: self.diagnostic(record_id).await,
        })
    }

    async fn find_match(&self, target: &str) -> Result<Option<TableRecord>, ResolveError> {
        // Primary: server-side exact filter on the current key column.
        if let Some(column) = self.key_aliases().first() {
            let filter = StoreClient::filter_eq(column, target);
            match self.source.find_results(&filter, 1).await {
                Ok(rows) => {
                    if let Some(row) = rows.into_iter().next() {
                        if self.row_matches(&row, target) {
                            return Ok(Some(row));
                        }
                        tracing::debug!(
                            record_id = %row.record_id,
                            "filtered row failed normalized re-verification; scanning"
                        );
                    }
                }
                Err(StoreError::Auth(message)) => return Err(ResolveError::Auth(message)),
                Err(err) => {
                    tracing::warn!(%err, "server-side filter failed; falling back to scan");
                }
            }
        }

        // Fallback: bounded client-side scan, newest first.
        let rows = self.source.recent_results(self.scan_page_size).await?;
        Ok(rows.into_iter().find(|row| self.row_matches(row, target)))
    }

    fn key_aliases(&self) -> &[String] {
        match self.profile.strategy {
            CorrelationStrategy::ByModel => &self.profile.identifier_aliases,
            CorrelationStrategy::ByRecordId => &self.profile.record_id_aliases,
        }
    }

    fn row_matches(&self, row: &TableRecord, target: &str) -> bool {
        let key = match self.profile.strategy {
            CorrelationStrategy::ByModel => self.profile.row_identifier(&row.fields),
            CorrelationStrategy::ByRecordId => self.profile.row_record_id(&row.fields),
        };
        key.is_some_and(|key| keys_match(&key, target))
    }

    /// Best-effort diagnostic line for the `Processing` state. Read failures
    /// here never fail the check — the status column is display only.
    async fn diagnostic(&self, record_id: Option<&str>) -> String {
        if let Some(record_id) = record_id {
            match self
                .source
                .request_status(record_id, &self.profile.status_column)
                .await
            {
                Ok(Some(status)) => return format!("request status: {status}"),
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(%err, record_id, "could not read request status");
                }
            }
        }
        "waiting for the automation to write the results table".to_string()
    }
}
