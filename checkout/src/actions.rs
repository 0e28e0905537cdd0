//! Checkout actions.
//!
//! One unified action enum: user intents (commands) and effect feedback
//! (events) both flow through the same reducer.

use crate::types::{OrderId, RatePlan};

/// All inputs to the checkout reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutAction {
    // ═══════════════════════════════════════════════════════════════
    // Registration builder (commands)
    // ═══════════════════════════════════════════════════════════════
    /// Confirm the attendee count from raw text input.
    ///
    /// Valid only for integers 1-10; anything else raises a validation
    /// notice and leaves the registration list unset.
    SetAttendeeCount {
        /// Raw user input, not yet parsed.
        raw: String,
    },

    /// Append one registration (up to the maximum). Cloned from
    /// registration 0 when copy-first-to-all is active, blank otherwise.
    AddRegistration,

    /// Delete the registration at `index`. May revoke the active coupon
    /// as a side effect of the count dropping.
    RemoveRegistration {
        /// Position in the registration list.
        index: usize,
    },

    /// Edit an attendee's name.
    SetName {
        /// Position in the registration list.
        index: usize,
        /// New value.
        value: String,
    },

    /// Edit an attendee's age.
    SetAge {
        /// Position in the registration list.
        index: usize,
        /// New value.
        value: String,
    },

    /// Choose a ticket type for an attendee (paid events only).
    SetTicketType {
        /// Position in the registration list.
        index: usize,
        /// Chosen rate-plan entry.
        rate: RatePlan,
    },

    /// Toggle "copy details to all". Enabling immediately overwrites
    /// registrations 1..n with a copy of registration 0.
    ToggleCopyFirstToAll,

    // ═══════════════════════════════════════════════════════════════
    // Coupon engine (commands)
    // ═══════════════════════════════════════════════════════════════
    /// Apply a coupon. No-op while the attendee count is below the
    /// coupon's eligibility floor; replaces any active coupon otherwise.
    ApplyCoupon {
        /// The coupon to apply.
        coupon: crate::state::Coupon,
    },

    /// Clear the active coupon and restore the undiscounted total.
    RemoveCoupon,

    // ═══════════════════════════════════════════════════════════════
    // Payment orchestration (commands)
    // ═══════════════════════════════════════════════════════════════
    /// The pay action. Validates, arms the busy guard, and starts the
    /// session check. A no-op while an attempt is already in flight.
    PayPressed,

    /// The app resumed from an external authentication redirect
    /// (3-D Secure); forward the callback URL to the processor.
    RedirectReturned {
        /// The deep-link callback URL.
        url: String,
    },

    // ═══════════════════════════════════════════════════════════════
    // Payment orchestration (effect feedback)
    // ═══════════════════════════════════════════════════════════════
    /// Result of the access-gate session check.
    SessionChecked {
        /// Whether the stored session is still valid.
        valid: bool,
    },

    /// The session check itself failed (transport). The attempt fails and
    /// may be retried; the session is not treated as expired.
    SessionCheckFailed {
        /// User-visible description of the failure.
        message: String,
    },

    /// The backend accepted the order and issued a client secret.
    IntentCreated {
        /// Processor token identifying the pending charge.
        client_secret: String,
    },

    /// The backend rejected the order.
    IntentRejected {
        /// Backend-supplied message, surfaced verbatim.
        message: String,
        /// The rejection was caused by an expired session.
        session_expired: bool,
    },

    /// The payment sheet initialized and is ready to present.
    SheetReady,

    /// Payment sheet initialization failed.
    SheetInitFailed {
        /// Processor error message.
        message: String,
    },

    /// The user completed payment in the sheet.
    SheetCompleted,

    /// The sheet ended without a successful charge (cancel or error).
    SheetFailed {
        /// Processor error message, or a cancellation notice.
        message: String,
    },

    /// The backend recorded the successful payment.
    PaymentRecorded {
        /// Backend order identifier, used for ticket delivery.
        order_id: OrderId,
    },

    /// The charge succeeded but the backend status update failed.
    PaymentRecordFailed,

    /// Ticket email dispatch finished.
    TicketEmailSent,

    /// Ticket email dispatch failed (payment already recorded).
    TicketEmailFailed {
        /// Backend error message.
        message: String,
    },

    /// Delayed follow-up to session expiry: the shell should navigate to
    /// the login entry point.
    RedirectToLogin,

    /// The confirmation delay elapsed; the shell should navigate away.
    CheckoutFinished,
}

impl CheckoutAction {
    /// Whether this action mutates the registration set or coupon,
    /// and must be rejected while the order is frozen.
    #[must_use]
    pub const fn mutates_order(&self) -> bool {
        matches!(
            self,
            Self::SetAttendeeCount { .. }
                | Self::AddRegistration
                | Self::RemoveRegistration { .. }
                | Self::SetName { .. }
                | Self::SetAge { .. }
                | Self::SetTicketType { .. }
                | Self::ToggleCopyFirstToAll
                | Self::ApplyCoupon { .. }
                | Self::RemoveCoupon
        )
    }
}
