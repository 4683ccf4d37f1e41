//! # tether-core
//!
//! Core domain types for Tether.
//!
//! This crate provides the foundational types shared across all Tether crates:
//! - The analysis request a user submits and the correlation handle returned
//! - The normalized analysis result assembled from the external results table
//! - The status-check outcome (`done` vs `still processing`)
//! - History entries for the locally persisted completion log
//!
//! Error types live with the operations that raise them (`tether-store`,
//! `tether-correlate`, `tether-history`); the CLI converges them via
//! `anyhow`.

pub mod entities;

pub use entities::{
    AnalysisRequest, AnalysisResult, CorrelationHandle, HistoryEntry, StatusCheck,
};
