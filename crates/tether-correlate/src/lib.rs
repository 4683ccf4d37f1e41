//! # tether-correlate
//!
//! The request/result correlation protocol.
//!
//! A submitted request and its eventual result are two independently created
//! rows in two different tables, with no shared system-assigned key: the
//! external processor writes a brand-new result row instead of updating the
//! request row. The only reliable link is the free-text identifier the user
//! typed (`model`), which crosses a human-editable boundary and may come back
//! with different casing or stray whitespace.
//!
//! Everything fragile lives in exactly one place here:
//! - [`schema`] owns identifier normalization, the internal-field →
//!   store-column map used at submission, and the ordered column-name alias
//!   lists used when reading results back (column names drift as the
//!   externally edited schema evolves).
//! - [`Submitter`] records a request durably and returns a
//!   [`CorrelationHandle`].
//! - [`Resolver`] performs one read-only status check: server-side filter
//!   first, client-side normalized scan as fallback, "no match" meaning
//!   still processing rather than failure.

pub mod schema;

mod error;
mod resolve;
mod source;
mod submit;

pub use error::{ResolveError, SubmitError};
pub use resolve::Resolver;
pub use source::{RequestSink, ResultSource, StoreBinding};
pub use submit::Submitter;

pub use tether_core::{AnalysisRequest, AnalysisResult, CorrelationHandle, StatusCheck};
