//! Checkout configuration.
//!
//! Configuration values come from the environment at startup; every value
//! has a development default so tests and local runs need no setup.

use std::time::Duration;

/// Configuration for the checkout workflow.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Base URL of the ticketing backend (e.g. "https://api.example.com").
    pub api_base_url: String,

    /// Payment processor publishable key.
    pub publishable_key: String,

    /// Return URL handed to the processor for external-auth redirects.
    pub return_url: String,

    /// Pause between payment confirmation and navigating away.
    ///
    /// Default: 2 seconds
    pub confirmation_delay: Duration,

    /// Pause between surfacing a session-expired notice and redirecting
    /// to the login entry point.
    ///
    /// Default: 3 seconds
    pub session_redirect_delay: Duration,
}

impl CheckoutConfig {
    /// Load configuration from environment variables, falling back to
    /// development defaults for anything unset.
    ///
    /// Reads `.env` if present. Variables:
    /// - `BOXOFFICE_API_BASE_URL`
    /// - `BOXOFFICE_PUBLISHABLE_KEY`
    /// - `BOXOFFICE_RETURN_URL`
    /// - `BOXOFFICE_CONFIRMATION_DELAY_MS`
    /// - `BOXOFFICE_SESSION_REDIRECT_DELAY_MS`
    #[must_use]
    pub fn from_env() -> Self {
        // Load .env file if present (ignore if missing)
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Self {
            api_base_url: std::env::var("BOXOFFICE_API_BASE_URL")
                .unwrap_or(defaults.api_base_url),
            publishable_key: std::env::var("BOXOFFICE_PUBLISHABLE_KEY")
                .unwrap_or(defaults.publishable_key),
            return_url: std::env::var("BOXOFFICE_RETURN_URL").unwrap_or(defaults.return_url),
            confirmation_delay: env_millis(
                "BOXOFFICE_CONFIRMATION_DELAY_MS",
                defaults.confirmation_delay,
            ),
            session_redirect_delay: env_millis(
                "BOXOFFICE_SESSION_REDIRECT_DELAY_MS",
                defaults.session_redirect_delay,
            ),
        }
    }

    /// Set the backend base URL.
    #[must_use]
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the processor publishable key.
    #[must_use]
    pub fn with_publishable_key(mut self, key: impl Into<String>) -> Self {
        self.publishable_key = key.into();
        self
    }

    /// Set the redirect return URL.
    #[must_use]
    pub fn with_return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = url.into();
        self
    }

    /// Set the post-confirmation navigation delay.
    #[must_use]
    pub const fn with_confirmation_delay(mut self, delay: Duration) -> Self {
        self.confirmation_delay = delay;
        self
    }

    /// Set the session-expiry redirect delay.
    #[must_use]
    pub const fn with_session_redirect_delay(mut self, delay: Duration) -> Self {
        self.session_redirect_delay = delay;
        self
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3000".to_string(),
            publishable_key: "pk_test_placeholder".to_string(),
            return_url: "boxoffice://payment-return".to_string(),
            confirmation_delay: Duration::from_secs(2),
            session_redirect_delay: Duration::from_secs(3),
        }
    }
}

fn env_millis(key: &str, default: Duration) -> Duration {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_millis)
}
