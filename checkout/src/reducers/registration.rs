//! Registration builder reducer.
//!
//! Accumulates one entry per attendee and keeps the order totals current.
//! All mutations here are local; no effects are produced.

use crate::actions::CheckoutAction;
use crate::environment::CheckoutEnvironment;
use crate::providers::{AccessGate, Notifier, PaymentProcessor, TicketingBackend};
use crate::state::{CheckoutState, Notice, Registration, MAX_ATTENDEES};
use boxoffice_core::effect::Effect;
use boxoffice_core::reducer::Reducer;
use boxoffice_core::{smallvec, SmallVec};

/// Registration builder reducer.
#[derive(Debug, Clone)]
pub struct RegistrationReducer<G, B, P, N> {
    _phantom: std::marker::PhantomData<(G, B, P, N)>,
}

impl<G, B, P, N> RegistrationReducer<G, B, P, N> {
    /// Create a new registration reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G, B, P, N> Default for RegistrationReducer<G, B, P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, B, P, N> Reducer for RegistrationReducer<G, B, P, N>
where
    G: AccessGate + Clone + 'static,
    B: TicketingBackend + Clone + 'static,
    P: PaymentProcessor + Clone + 'static,
    N: Notifier + Clone + 'static,
{
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = CheckoutEnvironment<G, B, P, N>;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════
            // SetAttendeeCount: initialize the registration list
            // ═══════════════════════════════════════════════════════════
            CheckoutAction::SetAttendeeCount { raw } => {
                let count = raw.trim().parse::<usize>().ok();

                let Some(count) = count.filter(|n| (1..=MAX_ATTENDEES).contains(n)) else {
                    tracing::debug!(input = %raw, "Rejected attendee count");
                    let notice = Notice::error(format!(
                        "Enter a number of attendees between 1 and {MAX_ATTENDEES}."
                    ));
                    env.notifier.notify(&notice);
                    state.notice = Some(notice);
                    return smallvec![Effect::None];
                };

                let mut registrations = vec![Registration::default(); count];
                if let Some(name) = &state.signed_in_name {
                    registrations[0].name.clone_from(name);
                }

                state.registrations = Some(registrations);
                state.field_flags.clear();
                state.recompute_totals();
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════
            // AddRegistration: append one attendee
            // ═══════════════════════════════════════════════════════════
            CheckoutAction::AddRegistration => {
                let Some(registrations) = state.registrations.as_mut() else {
                    tracing::warn!("AddRegistration before attendee count confirmed");
                    return smallvec![Effect::None];
                };

                if registrations.len() >= MAX_ATTENDEES {
                    tracing::debug!("Attendee limit reached");
                    return smallvec![Effect::None];
                }

                let new_entry = if state.copy_first_to_all {
                    registrations.first().cloned().unwrap_or_default()
                } else {
                    Registration::default()
                };
                registrations.push(new_entry);

                state.recompute_totals();
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════
            // RemoveRegistration: delete one attendee, may revoke coupon
            // ═══════════════════════════════════════════════════════════
            CheckoutAction::RemoveRegistration { index } => {
                let Some(registrations) = state.registrations.as_mut() else {
                    return smallvec![Effect::None];
                };

                if index >= registrations.len() {
                    tracing::warn!(index, "RemoveRegistration out of bounds");
                    return smallvec![Effect::None];
                }

                registrations.remove(index);
                state.field_flags.clear();
                state.recompute_totals();
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════
            // Field edits
            // ═══════════════════════════════════════════════════════════
            CheckoutAction::SetName { index, value } => {
                if let Some(registration) = state
                    .registrations
                    .as_mut()
                    .and_then(|r| r.get_mut(index))
                {
                    registration.name = value;
                }
                smallvec![Effect::None]
            },

            CheckoutAction::SetAge { index, value } => {
                if let Some(registration) = state
                    .registrations
                    .as_mut()
                    .and_then(|r| r.get_mut(index))
                {
                    registration.age = value;
                }
                smallvec![Effect::None]
            },

            CheckoutAction::SetTicketType { index, rate } => {
                if !state.event.is_paid {
                    tracing::warn!("SetTicketType on a free event");
                    return smallvec![Effect::None];
                }

                if let Some(registration) = state
                    .registrations
                    .as_mut()
                    .and_then(|r| r.get_mut(index))
                {
                    registration.set_ticket_type(rate);
                    state.recompute_totals();
                }
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════
            // ToggleCopyFirstToAll: copy-on-toggle semantics
            // ═══════════════════════════════════════════════════════════
            CheckoutAction::ToggleCopyFirstToAll => {
                state.copy_first_to_all = !state.copy_first_to_all;

                if state.copy_first_to_all {
                    if let Some(registrations) = state.registrations.as_mut() {
                        if let Some(first) = registrations.first().cloned() {
                            for entry in registrations.iter_mut().skip(1) {
                                *entry = first.clone();
                            }
                        }
                    }
                    state.recompute_totals();
                }
                smallvec![Effect::None]
            },

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}
