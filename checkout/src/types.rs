//! Identifier and event-context types for the checkout workflow.

use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    /// Generate a new random `EventId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Backend-issued order identifier, returned after a payment is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a rate-plan entry (ticket type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatePlanId(pub Uuid);

impl RatePlanId {
    /// Generate a new random `RatePlanId`.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RatePlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RatePlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Event Context
// ═══════════════════════════════════════════════════════════════════════

/// One purchasable ticket type for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatePlan {
    /// Rate-plan identifier.
    pub id: RatePlanId,

    /// Human-readable label ("General Admission", "VIP").
    pub label: String,

    /// Unit price contributed by one attendee on this plan.
    pub unit_price: Money,
}

/// The event a purchase is being made against.
///
/// Read-only context for one checkout; the event itself is managed elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
    /// Event identifier.
    pub event_id: EventId,

    /// Country the event is hosted in (backend reference).
    pub country_id: String,

    /// ISO 4217 currency code for all amounts in this checkout.
    pub currency: String,

    /// Event name, used as the payment sheet's merchant display name.
    pub name: String,

    /// Whether the event charges for tickets. Free events skip ticket-type
    /// selection and the payment sheet entirely.
    pub is_paid: bool,

    /// Available ticket types (empty for free events).
    pub rate_plans: Vec<RatePlan>,
}
