//! Checkout reducers.
//!
//! Three focused reducers — registration builder, coupon engine, payment
//! orchestrator — composed into one [`CheckoutReducer`] that the store
//! drives.

pub mod coupon;
pub mod payment;
pub mod registration;

pub use coupon::CouponReducer;
pub use payment::PaymentReducer;
pub use registration::RegistrationReducer;

use crate::actions::CheckoutAction;
use crate::environment::CheckoutEnvironment;
use crate::providers::{AccessGate, Notifier, PaymentProcessor, TicketingBackend};
use crate::state::{CheckoutState, Notice};
use boxoffice_core::effect::Effect;
use boxoffice_core::reducer::Reducer;
use boxoffice_core::{smallvec, SmallVec};

/// Root checkout reducer.
///
/// Dispatches actions to the registration, coupon, or payment reducer, and
/// enforces the order freeze: while a payment attempt is in flight, every
/// action that would mutate the registration set or coupon is rejected.
#[derive(Debug, Clone)]
pub struct CheckoutReducer<G, B, P, N> {
    registration: RegistrationReducer<G, B, P, N>,
    coupon: CouponReducer<G, B, P, N>,
    payment: PaymentReducer<G, B, P, N>,
}

impl<G, B, P, N> CheckoutReducer<G, B, P, N> {
    /// Create a new checkout reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registration: RegistrationReducer::new(),
            coupon: CouponReducer::new(),
            payment: PaymentReducer::new(),
        }
    }
}

impl<G, B, P, N> Default for CheckoutReducer<G, B, P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, B, P, N> Reducer for CheckoutReducer<G, B, P, N>
where
    G: AccessGate + Clone + 'static,
    B: TicketingBackend + Clone + 'static,
    P: PaymentProcessor + Clone + 'static,
    N: Notifier + Clone + 'static,
{
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = CheckoutEnvironment<G, B, P, N>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        if action.mutates_order() && state.is_frozen() {
            tracing::debug!(?action, "Order frozen, mutation rejected");
            let notice = Notice::error("The order can't be changed while payment is in progress.");
            env.notifier.notify(&notice);
            state.notice = Some(notice);
            return smallvec![Effect::None];
        }

        match &action {
            CheckoutAction::SetAttendeeCount { .. }
            | CheckoutAction::AddRegistration
            | CheckoutAction::RemoveRegistration { .. }
            | CheckoutAction::SetName { .. }
            | CheckoutAction::SetAge { .. }
            | CheckoutAction::SetTicketType { .. }
            | CheckoutAction::ToggleCopyFirstToAll => {
                self.registration.reduce(state, action, env)
            },

            CheckoutAction::ApplyCoupon { .. } | CheckoutAction::RemoveCoupon => {
                self.coupon.reduce(state, action, env)
            },

            _ => self.payment.reduce(state, action, env),
        }
    }
}
