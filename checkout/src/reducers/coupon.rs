//! Coupon engine reducer.
//!
//! Applies and removes coupons against the current registration set. The
//! eligibility floor and the discount cap both live on the coupon itself;
//! auto-revocation on registration removal happens in
//! [`CheckoutState::recompute_totals`].

use crate::actions::CheckoutAction;
use crate::environment::CheckoutEnvironment;
use crate::providers::{AccessGate, Notifier, PaymentProcessor, TicketingBackend};
use crate::state::CheckoutState;
use boxoffice_core::effect::Effect;
use boxoffice_core::reducer::Reducer;
use boxoffice_core::{smallvec, SmallVec};

/// Coupon engine reducer.
#[derive(Debug, Clone)]
pub struct CouponReducer<G, B, P, N> {
    _phantom: std::marker::PhantomData<(G, B, P, N)>,
}

impl<G, B, P, N> CouponReducer<G, B, P, N> {
    /// Create a new coupon reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G, B, P, N> Default for CouponReducer<G, B, P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, B, P, N> Reducer for CouponReducer<G, B, P, N>
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
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CheckoutAction::ApplyCoupon { coupon } => {
                if !coupon.eligible_for(state.registration_count()) {
                    // Below the eligibility floor: silently no-op
                    tracing::debug!(
                        code = %coupon.code,
                        min = coupon.min_participants,
                        count = state.registration_count(),
                        "Coupon below eligibility floor, not applied"
                    );
                    return smallvec![Effect::None];
                }

                // Only one coupon may be active; applying replaces the old one
                state.applied_coupon = Some(coupon);
                state.recompute_totals();
                smallvec![Effect::None]
            },

            CheckoutAction::RemoveCoupon => {
                state.applied_coupon = None;
                state.recompute_totals();
                smallvec![Effect::None]
            },

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}
