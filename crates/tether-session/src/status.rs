//! Stale-response guard for displayed status.

/// Tracks the most recent surfaced outcome of a polling session.
///
/// Each observation is stamped with its attempt number. Within one session
/// the loop is sequential, so out-of-order completions cannot happen there —
/// the board exists for callers that display status from more than one place
/// (e.g. a one-shot `status` command racing a `watch` session) and as the
/// explicit statement of the rule: `done` is terminal and nothing stale may
/// overwrite it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatestStatus {
    last_attempt: u32,
    done_at: Option<u32>,
}

impl LatestStatus {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_attempt: 0,
            done_at: None,
        }
    }

    /// Record a `processing` observation. Returns whether it should be
    /// surfaced: stale observations (older than the newest seen) and anything
    /// after `done` are discarded.
    pub const fn record_processing(&mut self, attempt: u32) -> bool {
        if self.done_at.is_some() || attempt < self.last_attempt {
            return false;
        }
        self.last_attempt = attempt;
        true
    }

    /// Record a `done` observation. Returns whether this is the first one —
    /// `done` is terminal, so only the first is surfaced.
    pub const fn record_done(&mut self, attempt: u32) -> bool {
        if self.done_at.is_some() {
            return false;
        }
        self.done_at = Some(attempt);
        if attempt > self.last_attempt {
            self.last_attempt = attempt;
        }
        true
    }

    /// Whether `done` has been recorded.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done_at.is_some()
    }
}
