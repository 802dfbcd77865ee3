//! Fixed-interval poller for the ZToken reset status.
//!
//! The timer is a single tokio task. Each tick awaits one status check before the next tick
//! is considered, and ticks missed while a check was running are skipped, so at most one
//! check is ever in flight. Every check is bounded by a timeout so a hanging backend cannot
//! stall the loop.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use chrono::Utc;
use dioxus_logger::tracing;
use rand::Rng;
use tokio::{
    sync::Notify,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior},
};

use crate::{
    client::{
        error::backend::BackendError,
        error::Error,
        scheduler::config::{ztoken_reset, ResetTimerConfig},
        service::ztoken::ZTokenResetService,
    },
    model::ztoken::ResetStatus,
};

/// Handle to a running reset timer.
///
/// Cancelling consumes the handle, and dropping it cancels as well, so the timer can be
/// stopped at most once. Once cancelled the callback is never invoked again, including for
/// a status check that was in flight at the time.
pub struct ResetTimerHandle {
    cancelled: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
    task: Option<JoinHandle<()>>,
}

impl ResetTimerHandle {
    /// Stops the timer without waiting for the task to exit
    pub fn cancel(self) {
        // Dropping signals the task
    }

    /// Stops the timer and waits for the task to exit.
    ///
    /// Waits up to a fixed timeout; a task that does not stop in time is logged and left
    /// to finish on its own, it can no longer invoke the callback.
    pub async fn shutdown(mut self) {
        self.signal();

        let Some(task) = self.task.take() else {
            return;
        };

        match tokio::time::timeout(ztoken_reset::SHUTDOWN_TIMEOUT, task).await {
            Ok(Ok(())) => tracing::debug!("ZToken reset timer stopped cleanly"),
            Ok(Err(e)) => tracing::error!("ZToken reset timer panicked: {:?}", e),
            Err(_) => tracing::warn!("ZToken reset timer did not stop within timeout"),
        }
    }

    /// Whether the timer task is still running
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    fn signal(&self) {
        if !self.cancelled.swap(true, Ordering::SeqCst) {
            // notify_one keeps a permit if the task is not currently waiting
            self.shutdown.notify_one();
            tracing::debug!("Cancelling ZToken reset timer");
        }
    }
}

impl Drop for ResetTimerHandle {
    fn drop(&mut self) {
        self.signal();
    }
}

/// Starts polling the ZToken reset status.
///
/// The first check happens one `poll_interval` (plus a random jitter of at most
/// `max_start_jitter`) after starting, then every `poll_interval`. `on_reset_time` is invoked
/// with the status whenever a check succeeds and reports `reset_needed`. Failed or timed out
/// checks are logged and retried on the next tick.
///
/// Must be called from within a tokio runtime.
///
/// # Arguments
/// - `service` - Service used to fetch the reset status
/// - `config` - Poll interval, per-check timeout, jitter and nominal schedule
/// - `on_reset_time` - Callback invoked when the backend reports the reset is due
///
/// # Returns
/// - `ResetTimerHandle` - Handle used to stop the timer
pub fn start_ztoken_reset_timer<F>(
    service: ZTokenResetService,
    config: ResetTimerConfig,
    on_reset_time: F,
) -> ResetTimerHandle
where
    F: FnMut(&ResetStatus) + Send + 'static,
{
    let cancelled = Arc::new(AtomicBool::new(false));
    let shutdown = Arc::new(Notify::new());

    let task = tokio::spawn(run_timer(
        service,
        config,
        on_reset_time,
        Arc::clone(&cancelled),
        Arc::clone(&shutdown),
    ));

    ResetTimerHandle {
        cancelled,
        shutdown,
        task: Some(task),
    }
}

async fn run_timer<F>(
    service: ZTokenResetService,
    config: ResetTimerConfig,
    mut on_reset_time: F,
    cancelled: Arc<AtomicBool>,
    shutdown: Arc<Notify>,
) where
    F: FnMut(&ResetStatus) + Send + 'static,
{
    // A zero interval set on the public field would make `interval_at` panic
    let poll_interval = config.poll_interval.max(ztoken_reset::MIN_POLL_INTERVAL);
    if poll_interval != config.poll_interval {
        tracing::warn!(
            "ZToken reset poll interval {:?} is below the minimum, using {:?}",
            config.poll_interval,
            poll_interval
        );
    }

    let first_tick = Instant::now() + poll_interval + start_jitter(config.max_start_jitter);
    let mut interval = tokio::time::interval_at(first_tick, poll_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(
        "ZToken reset timer started (checking every {} second(s))",
        poll_interval.as_secs()
    );

    loop {
        tokio::select! {
            // Biased select ensures cancellation wins over a tick that is also ready
            biased;

            _ = shutdown.notified() => break,
            _ = interval.tick() => {}
        }

        let status = tokio::select! {
            biased;

            // Dropping the check future abandons the in-flight request
            _ = shutdown.notified() => break,
            status = check_status(&service, config.check_timeout) => status,
        };

        if cancelled.load(Ordering::SeqCst) {
            break;
        }

        let Some(status) = status else {
            continue;
        };

        let locally_due = config
            .schedule
            .is_reset_due(Utc::now(), status.last_reset_date);
        if locally_due != status.reset_needed {
            tracing::debug!(
                "Backend reset flag ({}) disagrees with local schedule ({}), following backend",
                status.reset_needed,
                locally_due
            );
        }

        if status.reset_needed {
            if cancelled.load(Ordering::SeqCst) {
                break;
            }

            tracing::info!(
                "ZToken reset is due ({} profile(s) below threshold)",
                status.profiles_below_threshold
            );
            on_reset_time(&status);
        }
    }

    tracing::info!("ZToken reset timer stopped");
}

/// Fetches the status, treating a check that exceeds `timeout` as failed
async fn check_status(service: &ZTokenResetService, timeout: Duration) -> Option<ResetStatus> {
    match tokio::time::timeout(timeout, service.try_get_ztoken_reset_status()).await {
        Ok(Ok(status)) => Some(status),
        Ok(Err(e)) => {
            tracing::error!("Error getting ZToken reset status: {}", e.to_report());
            None
        }
        Err(_) => {
            let e: Error = BackendError::Timeout(timeout.as_secs()).into();
            tracing::error!("Error getting ZToken reset status: {}", e.to_report());
            None
        }
    }
}

fn start_jitter(max: Duration) -> Duration {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
        return Duration::ZERO;
    }

    Duration::from_millis(rand::rng().random_range(0..=max_ms))
}
