//! User notification trait.
//!
//! All user-facing errors are delivered as transient toast-style notices;
//! nothing fails silently.

use crate::state::Notice;

/// Surfaces transient notices to the user.
///
/// Synchronous and fire-and-forget: the workflow never waits on a toast.
pub trait Notifier: Send + Sync {
    /// Show a notice.
    fn notify(&self, notice: &Notice);
}

/// Production [`Notifier`] that emits notices as tracing events.
///
/// The embedding shell typically installs its own implementation that
/// renders real toasts; this one keeps headless runs observable.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            crate::state::NoticeLevel::Info => {
                tracing::info!(message = %notice.message, "notice");
            },
            crate::state::NoticeLevel::Error => {
                tracing::warn!(message = %notice.message, "notice");
            },
        }
    }
}
