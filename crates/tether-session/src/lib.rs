//! # tether-session
//!
//! Client-side polling orchestration.
//!
//! A [`PollingSession`] repeatedly invokes a status probe (normally the
//! `tether-correlate` resolver) on a fixed interval until the result arrives
//! or the caller cancels. Properties the loop guarantees:
//!
//! - **One in-flight check**: checks run sequentially inside one task; a new
//!   check is never issued while a prior one is still awaiting the store.
//! - **No stale overwrite**: a [`LatestStatus`] board stamps every outcome
//!   with its attempt number; once `done` is recorded, late or out-of-order
//!   `processing` observations are discarded.
//! - **Deterministic teardown**: cancellation is a watch channel select'd
//!   against the ticker, so ending the session for any reason releases the
//!   recurring timer.
//! - **Soft timeout stays caller-side**: every event carries the attempt
//!   counter; warning after N attempts is layered on top without touching
//!   the resolver contract.
//!
//! Sessions for different requests are fully independent — each owns its
//! probe, its timer, and its channels.

mod session;
mod status;

pub use session::{PollEvent, PollingSession, SessionEnd, SessionHandle, StatusProbe};
pub use status::LatestStatus;
