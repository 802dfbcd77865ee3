//! Recurring client-side checks against the backend's reset schedule.
//!
//! The backend owns the schedule and the reset itself; the timer in [`reset_timer`] only
//! polls the reset status on a fixed interval and hands a positive result to the caller.

pub mod config;
pub mod reset_timer;

pub use config::ResetTimerConfig;
pub use reset_timer::{start_ztoken_reset_timer, ResetTimerHandle};
