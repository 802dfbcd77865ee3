use std::time::Duration;

use crate::client::util::time::ResetSchedule;

pub mod ztoken_reset {
    use super::*;

    /// How often the backend is asked whether the daily reset is due (1 minute)
    pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

    /// Shortest accepted poll interval; shorter values are raised to it
    pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

    /// Maximum time a single status check may take before it is abandoned
    pub const CHECK_TIMEOUT: Duration = Duration::from_secs(30);

    /// Upper bound of the random delay added before the first check
    pub const MAX_START_JITTER: Duration = Duration::from_secs(5);

    /// Maximum time to wait for the timer task after a shutdown request
    pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
}

/// Configuration for the ZToken reset timer
#[derive(Debug, Clone)]
pub struct ResetTimerConfig {
    pub poll_interval: Duration,
    pub check_timeout: Duration,
    pub max_start_jitter: Duration,
    /// Nominal schedule used to log disagreement with the backend's flag
    pub schedule: ResetSchedule,
}

impl ResetTimerConfig {
    /// Create a configuration polling every `poll_interval` with default timeouts.
    ///
    /// Intervals below [`ztoken_reset::MIN_POLL_INTERVAL`] (including zero) are raised to it.
    pub fn new(poll_interval: Duration) -> Self {
        let poll_interval = poll_interval.max(ztoken_reset::MIN_POLL_INTERVAL);

        Self {
            poll_interval,
            check_timeout: ztoken_reset::CHECK_TIMEOUT.min(poll_interval),
            max_start_jitter: ztoken_reset::MAX_START_JITTER,
            schedule: ResetSchedule::default(),
        }
    }

    pub fn with_check_timeout(mut self, check_timeout: Duration) -> Self {
        self.check_timeout = check_timeout;
        self
    }

    pub fn with_max_start_jitter(mut self, max_start_jitter: Duration) -> Self {
        self.max_start_jitter = max_start_jitter;
        self
    }
}

impl Default for ResetTimerConfig {
    fn default() -> Self {
        Self::new(ztoken_reset::POLL_INTERVAL)
    }
}
