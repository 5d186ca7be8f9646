//! The expense submission service.
//!
//! There is no persistence layer, so submitting the add-expense form performs
//! a simulated network round trip: a fixed delay followed by a success
//! result. Unlike a fire-and-forget timer, the service holds a pending flag
//! so that a second submission started while one is still in flight is
//! rejected instead of silently racing the first.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use crate::Error;

/// The delay used to simulate the round trip to a backend.
const DEFAULT_SUBMISSION_DELAY: Duration = Duration::from_millis(800);

/// Accepts expense submissions, one at a time.
#[derive(Debug, Clone)]
pub struct SubmissionService {
    pending: Arc<AtomicBool>,
    delay: Duration,
}

impl SubmissionService {
    /// Create a service with the standard simulated delay.
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_SUBMISSION_DELAY)
    }

    /// Create a service with a custom simulated delay.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            pending: Arc::new(AtomicBool::new(false)),
            delay,
        }
    }

    /// Whether a submission is currently in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Run one submission round trip.
    ///
    /// The caller is expected to have validated the expense already; this
    /// only models the asynchronous hand-off.
    ///
    /// # Errors
    /// Returns [Error::SubmissionPending] if another submission is still in
    /// flight.
    pub async fn submit(&self) -> Result<(), Error> {
        if self.pending.swap(true, Ordering::SeqCst) {
            tracing::warn!("rejected expense submission while another was pending");
            return Err(Error::SubmissionPending);
        }

        tokio::time::sleep(self.delay).await;
        self.pending.store(false, Ordering::SeqCst);

        Ok(())
    }
}

impl Default for SubmissionService {
    fn default() -> Self {
        Self::new()
    }
}
