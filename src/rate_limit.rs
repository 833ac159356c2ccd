//! Request pacing for NCBI E-utilities compliance
//!
//! NCBI asks clients without an API key to stay below 3 requests per second.
//! Violations can result in IP blocking, so every request issued through
//! [`EutilsClient`](crate::EutilsClient) first waits on a [`RateGate`].
//! By default all clients in the process share one gate.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Minimum spacing between two requests: one third of a second
pub const DEFAULT_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 3);

static SHARED_GATE: OnceLock<Arc<RateGate>> = OnceLock::new();

/// Serializes outbound requests so that consecutive slot grants are at least
/// a given interval apart
///
/// The lock is held while sleeping. Waiters are therefore released one at a
/// time, each at least `min_interval` after the previous one.
#[derive(Debug, Default)]
pub struct RateGate {
    last_access: Mutex<Option<Instant>>,
}

impl RateGate {
    /// Create an independent gate with no recorded access
    ///
    /// # Example
    ///
    /// ```
    /// use eutils_client::rate_limit::RateGate;
    /// use std::time::Duration;
    ///
    /// let gate = RateGate::new();
    /// assert!(gate.last_access().is_none());
    ///
    /// // The first slot is granted immediately
    /// gate.wait_for_slot(Duration::from_millis(100));
    /// assert!(gate.last_access().is_some());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide gate shared by every client that was not given its own
    pub fn shared() -> Arc<RateGate> {
        SHARED_GATE
            .get_or_init(|| Arc::new(RateGate::new()))
            .clone()
    }

    /// Block until at least `min_interval` has passed since the previous grant,
    /// then record the current instant as the new grant and return it
    #[instrument(skip(self), fields(min_interval_ms = min_interval.as_millis() as u64))]
    pub fn wait_for_slot(&self, min_interval: Duration) -> Instant {
        let mut last_access = self
            .last_access
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = *last_access {
            let elapsed = previous.elapsed();
            if elapsed < min_interval {
                let wait = min_interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "Sleeping to respect rate limit");
                thread::sleep(wait);
            }
        }

        let granted = Instant::now();
        *last_access = Some(granted);
        granted
    }

    /// Instant of the most recent grant, if any
    pub fn last_access(&self) -> Option<Instant> {
        *self
            .last_access
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
