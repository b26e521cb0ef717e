//! Search limits: cancellation, deadlines and expansion budgets.

use crate::error::{CancelReason, SearchError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A shareable flag that asks running searches to stop.
///
/// Clones share the same flag. Cancelling never touches the graph; the
/// search just returns [`SearchError::Cancelled`] at its next pop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every search holding this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Limits checked once per popped frontier entry.
///
/// The default has no limits.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    cancel: Option<CancelToken>,
    deadline: Option<Instant>,
    max_expansions: Option<usize>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a deadline `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Caps the number of nodes the search may expand. Popping the goal
    /// ends the search and does not count as an expansion, so a budget of
    /// `n` can still return a route whose goal is reached after `n`
    /// expansions.
    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = Some(max);
        self
    }

    /// Fails once the token fires or the deadline passes.
    pub(crate) fn check_interrupted(&self) -> Result<(), SearchError> {
        if self.cancel.as_ref().is_some_and(CancelToken::is_cancelled) {
            Err(SearchError::Cancelled {
                reason: CancelReason::Token,
            })
        } else if self.deadline.is_some_and(|d| Instant::now() >= d) {
            Err(SearchError::Cancelled {
                reason: CancelReason::Deadline,
            })
        } else {
            Ok(())
        }
    }

    /// Fails when `expanded` nodes already use up the budget.
    pub(crate) fn check_budget(&self, expanded: usize) -> Result<(), SearchError> {
        if self.max_expansions.is_some_and(|max| expanded >= max) {
            Err(SearchError::Cancelled {
                reason: CancelReason::Budget,
            })
        } else {
            Ok(())
        }
    }
}
