//! Entity structs for the Tether domain.
//!
//! All structs derive `Serialize`/`Deserialize` for JSON roundtrip: requests
//! cross the wire to the external store, results come back from it, and
//! history entries are persisted as JSONL.

mod history;
mod request;
mod result;

pub use history::HistoryEntry;
pub use request::{AnalysisRequest, CorrelationHandle};
pub use result::{AnalysisResult, StatusCheck};
