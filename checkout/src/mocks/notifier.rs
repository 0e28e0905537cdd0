//! Recording notifier for testing.

use crate::providers::Notifier;
use crate::state::{Notice, NoticeLevel};
use std::sync::{Arc, Mutex, PoisonError};

/// [`Notifier`] that records every notice for assertion.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    /// Create a new recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices shown so far, in order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Messages of all error-level notices shown so far.
    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}
