//! Payment processor trait.
//!
//! The hosted payment sheet is an opaque external component: it is given a
//! client secret, collects card details on its own UI, and resolves with a
//! completed/canceled/error outcome. The checkout core never sees card data.

use crate::error::Result;
use std::future::Future;

/// How the payment sheet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetOutcome {
    /// The user completed payment.
    Completed,

    /// The user dismissed the sheet without paying.
    Canceled,
}

/// Hosted payment sheet.
pub trait PaymentProcessor: Send + Sync {
    /// Initialize the sheet for a pending charge.
    ///
    /// # Arguments
    ///
    /// - `client_secret`: processor token identifying the charge
    /// - `display_name`: merchant name shown on the sheet
    /// - `return_url`: deep link the processor redirects back to after
    ///   external authentication
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CheckoutError::Processor`] if initialization
    /// fails (bad secret, configuration error).
    fn init_session(
        &self,
        client_secret: &str,
        display_name: &str,
        return_url: &str,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Present the sheet and wait for the user to finish.
    ///
    /// Suspends until the sheet resolves. May be preceded by an external
    /// redirect; see [`PaymentProcessor::handle_redirect`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::CheckoutError::Processor`] on a processor
    /// error (declined card, network failure inside the sheet).
    fn present_session(&self) -> impl Future<Output = Result<SheetOutcome>> + Send;

    /// Forward a deep-link callback URL after the app resumes from an
    /// external authentication redirect (3-D Secure), so the pending
    /// sheet resolves correctly.
    ///
    /// # Errors
    ///
    /// Returns error if the URL does not belong to a pending session.
    fn handle_redirect(&self, url: &str) -> impl Future<Output = Result<()>> + Send;
}
