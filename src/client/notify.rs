//! User-facing transient notifications.
//!
//! The toast UI lives outside this crate; the store reports failures through the
//! [`Notifier`] trait and the view layer decides how to render them.

use dioxus_logger::tracing;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Sink for transient user-facing messages
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotificationKind, message: &str);

    fn error(&self, message: &str) {
        self.notify(NotificationKind::Error, message);
    }

    fn success(&self, message: &str) {
        self.notify(NotificationKind::Success, message);
    }
}

/// Notifier that only writes to the log, used when no UI is attached
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => tracing::info!("{}", message),
            NotificationKind::Error => tracing::warn!("{}", message),
        }
    }
}
