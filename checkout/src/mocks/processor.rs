//! Mock payment processor for testing.

use crate::error::{CheckoutError, Result};
use crate::providers::{PaymentProcessor, SheetOutcome};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
struct Inner {
    init_failure: Option<CheckoutError>,
    outcomes: VecDeque<Result<SheetOutcome>>,
    init_calls: Vec<InitCall>,
    presentations: usize,
    redirects: Vec<String>,
}

/// One recorded `init_session` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitCall {
    /// Client secret the sheet was initialized with.
    pub client_secret: String,
    /// Merchant display name.
    pub display_name: String,
    /// Redirect return URL.
    pub return_url: String,
}

/// Mock payment sheet.
///
/// Sheet outcomes are scripted and consumed in order; once exhausted,
/// every presentation completes successfully.
#[derive(Debug, Clone, Default)]
pub struct MockPaymentProcessor {
    inner: Arc<Mutex<Inner>>,
}

impl MockPaymentProcessor {
    /// Create a processor where every sheet completes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail all subsequent `init_session` calls.
    pub fn fail_init_with(&self, err: CheckoutError) {
        self.lock().init_failure = Some(err);
    }

    /// Queue a scripted sheet outcome.
    pub fn push_outcome(&self, outcome: Result<SheetOutcome>) {
        self.lock().outcomes.push_back(outcome);
    }

    /// Recorded `init_session` calls, in order.
    #[must_use]
    pub fn init_calls(&self) -> Vec<InitCall> {
        self.lock().init_calls.clone()
    }

    /// Number of sheet presentations.
    #[must_use]
    pub fn presentations(&self) -> usize {
        self.lock().presentations
    }

    /// Redirect callback URLs received, in order.
    #[must_use]
    pub fn redirects(&self) -> Vec<String> {
        self.lock().redirects.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PaymentProcessor for MockPaymentProcessor {
    fn init_session(
        &self,
        client_secret: &str,
        display_name: &str,
        return_url: &str,
    ) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let call = InitCall {
            client_secret: client_secret.to_string(),
            display_name: display_name.to_string(),
            return_url: return_url.to_string(),
        };

        async move {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.init_calls.push(call);

            match inner.init_failure.clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    fn present_session(&self) -> impl Future<Output = Result<SheetOutcome>> + Send {
        let inner = Arc::clone(&self.inner);

        async move {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.presentations += 1;
            inner
                .outcomes
                .pop_front()
                .unwrap_or(Ok(SheetOutcome::Completed))
        }
    }

    fn handle_redirect(&self, url: &str) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let url = url.to_string();

        async move {
            inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .redirects
                .push(url);
            Ok(())
        }
    }
}
