//! Checkout environment.
//!
//! This module defines the environment type for dependency injection
//! in checkout reducers.

use crate::config::CheckoutConfig;
use crate::providers::{AccessGate, Notifier, PaymentProcessor, TicketingBackend};
use boxoffice_core::environment::Clock;
use std::sync::Arc;

/// Checkout environment.
///
/// Contains all external dependencies needed by checkout reducers.
///
/// # Type Parameters
///
/// - `G`: Access gate (session validity)
/// - `B`: Ticketing backend
/// - `P`: Payment processor (hosted sheet)
/// - `N`: Notifier (toasts)
#[derive(Clone)]
pub struct CheckoutEnvironment<G, B, P, N>
where
    G: AccessGate + Clone,
    B: TicketingBackend + Clone,
    P: PaymentProcessor + Clone,
    N: Notifier + Clone,
{
    /// Session validity gate.
    pub gate: G,

    /// Remote ticketing backend.
    pub backend: B,

    /// Hosted payment sheet.
    pub processor: P,

    /// Toast-style user notifications.
    pub notifier: N,

    /// Clock, injected so reducers stay deterministic in tests.
    pub clock: Arc<dyn Clock>,

    /// Workflow configuration (base URL, delays, return URL).
    pub config: CheckoutConfig,
}

impl<G, B, P, N> CheckoutEnvironment<G, B, P, N>
where
    G: AccessGate + Clone,
    B: TicketingBackend + Clone,
    P: PaymentProcessor + Clone,
    N: Notifier + Clone,
{
    /// Create a new checkout environment.
    #[must_use]
    pub fn new(
        gate: G,
        backend: B,
        processor: P,
        notifier: N,
        clock: Arc<dyn Clock>,
        config: CheckoutConfig,
    ) -> Self {
        Self {
            gate,
            backend,
            processor,
            notifier,
            clock,
            config,
        }
    }
}
