//! Error types for the checkout workflow.

use thiserror::Error;

/// Result type alias for checkout operations.
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Error taxonomy for the purchase workflow.
///
/// Organized by where the failure is recovered: locally (validation), by
/// re-authentication (session), by the user editing and retrying (backend,
/// processor), or by support follow-up (post-payment reporting).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// Attendee data is incomplete or invalid; no network call was made.
    #[error("Validation failed: {message}")]
    Validation {
        /// User-visible description of what is missing.
        message: String,
    },

    /// Stored tokens are no longer valid; re-authentication is required.
    #[error("Session has expired")]
    SessionExpired,

    /// The backend rejected the request for a business reason
    /// (capacity exceeded, coupon invalid, and so on).
    #[error("Backend error: {message}")]
    Backend {
        /// Message surfaced verbatim from the backend.
        message: String,
    },

    /// The payment processor reported a failure (declined card, init error).
    #[error("Payment processor error: {message}")]
    Processor {
        /// Message surfaced from the processor.
        message: String,
    },

    /// The user dismissed the payment sheet without completing payment.
    #[error("Payment canceled")]
    Canceled,

    /// The charge succeeded but the status update to the backend failed.
    ///
    /// The most severe failure mode: money has moved but the backend may not
    /// have recorded it. The client secret and order id are preserved in
    /// state for support follow-up.
    #[error("Payment completed but could not be recorded")]
    PostPaymentReporting,

    /// Transport-level failure (connection refused, timeout, bad gateway).
    #[error("Transport error: {0}")]
    Transport(String),
}

impl CheckoutError {
    /// Returns `true` if this error is recoverable by the user editing
    /// their input and retrying.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::Backend { .. } | Self::Processor { .. } | Self::Canceled
        )
    }

    /// Returns `true` if this error requires the user to re-authenticate
    /// before anything else can proceed.
    #[must_use]
    pub const fn requires_relogin(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// User-facing message for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::Backend { message }
            | Self::Processor { message } => message.clone(),
            Self::SessionExpired => "Your session has expired. Please log in again.".to_string(),
            Self::Canceled => "Payment was canceled.".to_string(),
            Self::PostPaymentReporting | Self::Transport(_) => {
                "Something went wrong. Please contact support if you were charged.".to_string()
            },
        }
    }
}

impl From<reqwest::Error> for CheckoutError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_user_error() {
        let err = CheckoutError::Validation {
            message: "name required".to_string(),
        };
        assert!(err.is_user_error());
        assert!(!err.requires_relogin());
    }

    #[test]
    fn session_expired_requires_relogin() {
        assert!(CheckoutError::SessionExpired.requires_relogin());
        assert!(!CheckoutError::PostPaymentReporting.is_user_error());
    }
}
