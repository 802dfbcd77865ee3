//! ZToken daily reset remote procedures.
//!
//! Each procedure is exposed twice:
//! - `try_*` methods return `Result` so callers can tell a confirmed answer from a failed call
//! - the plain methods never fail; they log the error and return a safe default, leaving
//!   recovery to the next poll or the next user action

use std::sync::Arc;

use dioxus_logger::tracing;

use crate::{
    client::{
        data::ZTokenBackend,
        error::{backend::BackendError, Error},
    },
    model::ztoken::{ResetResult, ResetStatus},
};

/// Outcome of asking the backend whether the daily reset should run
#[derive(Debug)]
pub enum ResetCheck {
    /// The backend confirmed the reset is due
    Due,
    /// The backend confirmed the reset is not due
    NotDue,
    /// The check itself failed, nothing is known about the schedule
    Unknown(Error),
}

impl ResetCheck {
    /// Fail-closed interpretation: only a confirmed `Due` counts
    pub fn is_due(&self) -> bool {
        matches!(self, Self::Due)
    }
}

#[derive(Clone)]
pub struct ZTokenResetService {
    backend: Arc<dyn ZTokenBackend>,
}

impl ZTokenResetService {
    /// Creates a new instance of [`ZTokenResetService`]
    pub fn new(backend: Arc<dyn ZTokenBackend>) -> Self {
        Self { backend }
    }

    pub async fn try_get_ztoken_reset_status(&self) -> Result<ResetStatus, Error> {
        self.backend.get_reset_status().await
    }

    /// Fetches the current reset status, `None` if the call failed
    pub async fn get_ztoken_reset_status(&self) -> Option<ResetStatus> {
        match self.try_get_ztoken_reset_status().await {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::error!("Error getting ZToken reset status: {}", e.to_report());
                None
            }
        }
    }

    /// Runs the scheduled daily reset.
    ///
    /// # Returns
    /// - `Ok(ResetResult)` - The backend performed the reset
    /// - `Err(Error::BackendError(BackendError::Rejected))` - The backend answered but reported failure
    /// - `Err(Error)` - The call itself failed
    pub async fn try_perform_daily_ztoken_reset(&self) -> Result<ResetResult, Error> {
        accept(self.backend.reset_daily().await?)
    }

    /// Runs the scheduled daily reset, reporting any failure in the result's `message`
    pub async fn perform_daily_ztoken_reset(&self) -> ResetResult {
        report("daily", self.backend.reset_daily().await)
    }

    /// Runs an administrative reset outside the schedule.
    ///
    /// # Returns
    /// - `Ok(ResetResult)` - The backend performed the reset
    /// - `Err(Error::BackendError(BackendError::Rejected))` - The backend answered but reported failure
    /// - `Err(Error)` - The call itself failed
    pub async fn try_perform_manual_ztoken_reset(&self) -> Result<ResetResult, Error> {
        accept(self.backend.reset_manual().await?)
    }

    /// Runs an administrative reset, reporting any failure in the result's `message`
    pub async fn perform_manual_ztoken_reset(&self) -> ResetResult {
        report("manual", self.backend.reset_manual().await)
    }

    /// Asks the backend whether the daily reset is due, keeping failures distinct
    pub async fn check_ztoken_reset(&self) -> ResetCheck {
        match self.backend.should_run_daily_reset().await {
            Ok(true) => ResetCheck::Due,
            Ok(false) => ResetCheck::NotDue,
            Err(e) => ResetCheck::Unknown(e),
        }
    }

    /// Whether the daily reset is due; `false` when the check fails
    pub async fn should_run_ztoken_reset(&self) -> bool {
        match self.check_ztoken_reset().await {
            ResetCheck::Unknown(e) => {
                tracing::error!("Error checking if ZToken reset should run: {}", e.to_report());
                false
            }
            check => check.is_due(),
        }
    }
}

fn accept(result: ResetResult) -> Result<ResetResult, Error> {
    if result.success {
        Ok(result)
    } else {
        Err(BackendError::Rejected(result.message).into())
    }
}

fn report(kind: &str, result: Result<ResetResult, Error>) -> ResetResult {
    match result {
        Ok(result) if result.success => {
            tracing::info!(
                "ZToken {} reset affected {} of {} profile(s)",
                kind,
                result.profiles_affected.unwrap_or_default(),
                result.total_profiles_checked.unwrap_or_default()
            );
            result
        }
        Ok(result) => {
            tracing::warn!("ZToken {} reset was rejected: {}", kind, result.message);
            result
        }
        Err(e) => {
            tracing::error!("Error performing ZToken {} reset: {}", kind, e.to_report());
            ResetResult::failure(e.to_report())
        }
    }
}
