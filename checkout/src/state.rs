//! Checkout state types.
//!
//! All types are `Clone` to support the functional architecture pattern.
//! The root [`CheckoutState`] is mutated only by reducers; the rendering
//! layer reads it through the store.

use crate::money::Money;
use crate::types::{EventContext, OrderId, RatePlan};
use serde::{Deserialize, Serialize};

/// Maximum attendees in one purchase.
pub const MAX_ATTENDEES: usize = 10;

// ═══════════════════════════════════════════════════════════════════════
// Registrations
// ═══════════════════════════════════════════════════════════════════════

/// One attendee's entry within a purchase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    /// Attendee name.
    pub name: String,

    /// Attendee age, kept as the raw text input. Validated non-empty;
    /// numeric interpretation is the backend's concern.
    pub age: String,

    /// Chosen ticket type; required only for paid events.
    pub ticket_type: Option<RatePlan>,

    /// Unit price contributed by this registration.
    ///
    /// Invariant: equals `ticket_type.unit_price` whenever a ticket type is
    /// set, zero otherwise.
    pub charge: Money,
}

impl Registration {
    /// Set the ticket type and keep `charge` in sync with it.
    pub fn set_ticket_type(&mut self, rate: RatePlan) {
        self.charge = rate.unit_price;
        self.ticket_type = Some(rate);
    }
}

/// Per-registration validation flags, set all at once when the user tries
/// to proceed to payment with incomplete data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFlags {
    /// Name is empty.
    pub name_missing: bool,

    /// Age is empty.
    pub age_missing: bool,

    /// Paid event but no ticket type chosen.
    pub ticket_missing: bool,
}

impl FieldFlags {
    /// Whether any field on this registration is flagged.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.name_missing || self.age_missing || self.ticket_missing
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Coupons
// ═══════════════════════════════════════════════════════════════════════

/// A percentage discount with an absolute cap and a minimum-attendee
/// eligibility rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Coupon code, unique per event.
    pub code: String,

    /// Discount percentage, 0-100.
    pub discount_percent: u8,

    /// Absolute cap on the discount amount.
    pub max_discount: Money,

    /// Minimum registrations required for the coupon to apply.
    pub min_participants: usize,
}

impl Coupon {
    /// Whether the coupon applies at the given attendee count.
    #[must_use]
    pub const fn eligible_for(&self, participant_count: usize) -> bool {
        participant_count >= self.min_participants
    }

    /// Discount against a subtotal: `min(subtotal * pct / 100, cap)`.
    #[must_use]
    pub const fn discount(&self, subtotal: Money) -> Money {
        subtotal.discount_with_cap(self.discount_percent, self.max_discount)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Payment Attempt
// ═══════════════════════════════════════════════════════════════════════

/// Phase of one payment orchestration attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentPhase {
    /// No attempt started, or a fresh attempt just reset.
    #[default]
    NotStarted,

    /// The backend accepted the order and issued a client secret.
    IntentCreated,

    /// The hosted payment sheet is in front of the user.
    SheetPresented,

    /// The processor confirmed the charge (terminal success).
    Confirmed,

    /// The attempt failed; the user may edit and retry.
    Failed,

    /// The stored session is no longer valid; re-login required.
    SessionExpired,
}

/// Ephemeral state of one orchestration attempt.
///
/// Created fresh per attempt, never persisted. After a post-success
/// reporting failure the client secret and order id stay here so a caller
/// can hand them to support.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAttempt {
    /// Current phase of the attempt.
    pub phase: PaymentPhase,

    /// Processor-issued token identifying the pending charge.
    pub client_secret: Option<String>,

    /// Backend order identifier, available after successful confirmation.
    pub order_id: Option<OrderId>,

    /// Busy guard: `true` from the pay action until the attempt reaches a
    /// terminal outcome. A second pay action while set is a no-op.
    pub in_flight: bool,

    /// When the attempt started.
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl PaymentAttempt {
    /// Reset for a fresh attempt. A retry never reuses a stale client secret.
    pub fn reset(&mut self) {
        *self = Self {
            in_flight: true,
            ..Self::default()
        };
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Notices
// ═══════════════════════════════════════════════════════════════════════

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    /// Informational (payment confirmed).
    Info,

    /// Error (validation, declined card, expired session).
    Error,
}

/// Transient toast-style notice surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,

    /// User-visible text.
    pub message: String,
}

impl Notice {
    /// Informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Purchase Order
// ═══════════════════════════════════════════════════════════════════════

/// Snapshot of the purchase submitted to the backend for intent creation.
///
/// Built from [`CheckoutState`] at the moment the pay action passes
/// validation; the live state is frozen (mutating actions rejected) while
/// the attempt it belongs to is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// One entry per attendee.
    pub registrations: Vec<Registration>,

    /// Active coupon, if any.
    pub applied_coupon: Option<Coupon>,

    /// Sum of charges over all registrations.
    pub subtotal: Money,

    /// Subtotal minus coupon discount, floored at zero.
    pub grand_total: Money,

    /// Event being purchased.
    pub event: EventContext,
}

// ═══════════════════════════════════════════════════════════════════════
// Root State
// ═══════════════════════════════════════════════════════════════════════

/// Root checkout state.
///
/// # Examples
///
/// ```
/// # use boxoffice_checkout::state::CheckoutState;
/// # use boxoffice_checkout::types::{EventContext, EventId};
/// let state = CheckoutState::new(EventContext {
///     event_id: EventId::new(),
///     country_id: "US".to_string(),
///     currency: "usd".to_string(),
///     name: "RustConf".to_string(),
///     is_paid: true,
///     rate_plans: vec![],
/// }, None);
/// assert!(state.registrations.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutState {
    /// The event being purchased.
    pub event: EventContext,

    /// Display name of the signed-in user, used to prefill registration 0.
    pub signed_in_name: Option<String>,

    /// Attendee entries. `None` until a valid attendee count is confirmed.
    pub registrations: Option<Vec<Registration>>,

    /// Validation flags, parallel to `registrations`.
    pub field_flags: Vec<FieldFlags>,

    /// "Copy details to all" flag. Copy-on-toggle and copy-on-add semantics;
    /// edits to registration 0 do not propagate live.
    pub copy_first_to_all: bool,

    /// Active coupon, if any.
    pub applied_coupon: Option<Coupon>,

    /// Sum of charges over all registrations.
    pub subtotal: Money,

    /// Subtotal minus coupon discount, floored at zero.
    pub grand_total: Money,

    /// Current payment attempt.
    pub attempt: PaymentAttempt,

    /// Most recent user-facing notice.
    pub notice: Option<Notice>,
}

impl CheckoutState {
    /// Create checkout state for an event.
    #[must_use]
    pub const fn new(event: EventContext, signed_in_name: Option<String>) -> Self {
        Self {
            event,
            signed_in_name,
            registrations: None,
            field_flags: Vec::new(),
            copy_first_to_all: false,
            applied_coupon: None,
            subtotal: Money::ZERO,
            grand_total: Money::ZERO,
            attempt: PaymentAttempt {
                phase: PaymentPhase::NotStarted,
                client_secret: None,
                order_id: None,
                in_flight: false,
                started_at: None,
            },
            notice: None,
        }
    }

    /// Number of registrations (zero while the list is unset).
    #[must_use]
    pub fn registration_count(&self) -> usize {
        self.registrations.as_ref().map_or(0, Vec::len)
    }

    /// Whether the order is frozen: a payment attempt is in flight, so
    /// registration and coupon mutations are rejected.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.attempt.in_flight
    }

    /// Recompute `subtotal` and `grand_total` from the registration set.
    ///
    /// Revokes the active coupon if the attendee count dropped below its
    /// eligibility floor, then re-derives the grand total from whatever
    /// coupon is still active.
    pub fn recompute_totals(&mut self) {
        let registrations = self.registrations.as_deref().unwrap_or(&[]);

        self.subtotal = registrations
            .iter()
            .fold(Money::ZERO, |acc, r| acc.saturating_add(r.charge));

        if let Some(coupon) = &self.applied_coupon {
            if !coupon.eligible_for(registrations.len()) {
                tracing::debug!(code = %coupon.code, "Coupon lost eligibility, revoking");
                self.applied_coupon = None;
            }
        }

        self.grand_total = match &self.applied_coupon {
            Some(coupon) => self.subtotal.saturating_sub(coupon.discount(self.subtotal)),
            None => self.subtotal,
        };
    }

    /// Validate all registrations for payment, flagging every invalid field
    /// simultaneously.
    ///
    /// Returns `true` when the purchase may proceed.
    pub fn validate_for_payment(&mut self) -> bool {
        let is_paid = self.event.is_paid;
        let registrations = self.registrations.as_deref().unwrap_or(&[]);

        if registrations.is_empty() {
            self.field_flags.clear();
            return false;
        }

        self.field_flags = registrations
            .iter()
            .map(|r| FieldFlags {
                name_missing: r.name.trim().is_empty(),
                age_missing: r.age.trim().is_empty(),
                ticket_missing: is_paid && r.ticket_type.is_none(),
            })
            .collect();

        !self.field_flags.iter().any(FieldFlags::any)
    }

    /// Snapshot the purchase for submission to the backend.
    #[must_use]
    pub fn purchase_order(&self) -> PurchaseOrder {
        PurchaseOrder {
            registrations: self.registrations.clone().unwrap_or_default(),
            applied_coupon: self.applied_coupon.clone(),
            subtotal: self.subtotal,
            grand_total: self.grand_total,
            event: self.event.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{EventId, RatePlanId};

    fn paid_event() -> EventContext {
        EventContext {
            event_id: EventId::new(),
            country_id: "US".to_string(),
            currency: "usd".to_string(),
            name: "RustConf".to_string(),
            is_paid: true,
            rate_plans: vec![RatePlan {
                id: RatePlanId::new(),
                label: "General".to_string(),
                unit_price: Money::from_cents(5_000),
            }],
        }
    }

    fn filled_registration(charge: u64) -> Registration {
        Registration {
            name: "Ada".to_string(),
            age: "36".to_string(),
            ticket_type: Some(RatePlan {
                id: RatePlanId::new(),
                label: "General".to_string(),
                unit_price: Money::from_cents(charge),
            }),
            charge: Money::from_cents(charge),
        }
    }

    #[test]
    fn recompute_revokes_ineligible_coupon() {
        let mut state = CheckoutState::new(paid_event(), None);
        state.registrations = Some(vec![filled_registration(5_000), filled_registration(5_000)]);
        state.applied_coupon = Some(Coupon {
            code: "GROUP3".to_string(),
            discount_percent: 10,
            max_discount: Money::from_cents(10_000),
            min_participants: 3,
        });

        state.recompute_totals();

        assert!(state.applied_coupon.is_none());
        assert_eq!(state.grand_total, state.subtotal);
    }

    #[test]
    fn validation_flags_all_invalid_fields_at_once() {
        let mut state = CheckoutState::new(paid_event(), None);
        state.registrations = Some(vec![
            Registration::default(),
            filled_registration(5_000),
            Registration {
                name: "Grace".to_string(),
                ..Registration::default()
            },
        ]);

        assert!(!state.validate_for_payment());
        assert!(state.field_flags[0].name_missing);
        assert!(state.field_flags[0].age_missing);
        assert!(state.field_flags[0].ticket_missing);
        assert!(!state.field_flags[1].any());
        assert!(!state.field_flags[2].name_missing);
        assert!(state.field_flags[2].age_missing);
    }

    #[test]
    fn attempt_reset_clears_stale_secret() {
        let mut attempt = PaymentAttempt {
            phase: PaymentPhase::Failed,
            client_secret: Some("pi_old_secret".to_string()),
            order_id: None,
            in_flight: false,
            started_at: None,
        };

        attempt.reset();

        assert_eq!(attempt.phase, PaymentPhase::NotStarted);
        assert!(attempt.client_secret.is_none());
        assert!(attempt.in_flight);
    }
}
