//! Payment orchestration reducer.
//!
//! Drives one charge attempt end to end:
//!
//! ```text
//! PayPressed ─▶ session check ─▶ intent creation ─▶ sheet init ─▶ sheet
//!            ─▶ status update ─▶ ticket email ─▶ finished
//! ```
//!
//! Each external call is one effect; the action it produces triggers the
//! next step, so the intent-creation, status-update, and ticket-email calls
//! for one order are strictly sequential. The busy guard on
//! [`crate::state::PaymentAttempt`] keeps attempts from overlapping, and a
//! retry after failure always starts from scratch with a fresh client
//! secret.

use crate::actions::CheckoutAction;
use crate::environment::CheckoutEnvironment;
use crate::error::CheckoutError;
use crate::providers::{
    AccessGate, Notifier, PaymentProcessor, SessionCheck, SheetOutcome, TicketingBackend,
};
use crate::state::{CheckoutState, Notice, PaymentPhase};
use boxoffice_core::effect::Effect;
use boxoffice_core::reducer::Reducer;
use boxoffice_core::{smallvec, SmallVec};

/// Status string reported to the backend for a successful charge.
const STATUS_SUCCESS: &str = "success";

/// Payment orchestration reducer.
#[derive(Debug, Clone)]
pub struct PaymentReducer<G, B, P, N> {
    _phantom: std::marker::PhantomData<(G, B, P, N)>,
}

impl<G, B, P, N> PaymentReducer<G, B, P, N> {
    /// Create a new payment reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<G, B, P, N> Default for PaymentReducer<G, B, P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G, B, P, N> PaymentReducer<G, B, P, N>
where
    G: AccessGate + Clone + 'static,
    B: TicketingBackend + Clone + 'static,
    P: PaymentProcessor + Clone + 'static,
    N: Notifier + Clone + 'static,
{
    /// Shared handling for an expired session: surface the notice and
    /// schedule the login redirect.
    fn expire_session(
        state: &mut CheckoutState,
        env: &CheckoutEnvironment<G, B, P, N>,
    ) -> SmallVec<[Effect<CheckoutAction>; 4]> {
        state.attempt.phase = PaymentPhase::SessionExpired;
        state.attempt.in_flight = false;
        metrics::counter!("checkout.payment.session_expired").increment(1);

        let notice = Notice::error(CheckoutError::SessionExpired.user_message());
        env.notifier.notify(&notice);
        state.notice = Some(notice);

        smallvec![Effect::Delay {
            duration: env.config.session_redirect_delay,
            action: Box::new(CheckoutAction::RedirectToLogin),
        }]
    }

    /// Shared handling for a failed attempt (backend rejection, sheet
    /// failure): surface the message and clear the busy guard.
    fn fail_attempt(
        state: &mut CheckoutState,
        env: &CheckoutEnvironment<G, B, P, N>,
        message: &str,
    ) {
        state.attempt.phase = PaymentPhase::Failed;
        state.attempt.in_flight = false;
        metrics::counter!("checkout.payment.failed").increment(1);

        let notice = Notice::error(message);
        env.notifier.notify(&notice);
        state.notice = Some(notice);
    }

    /// Best-effort not-paid report so the backend's order record is not
    /// left pending indefinitely. Failures are logged, never surfaced.
    fn report_not_paid(
        state: &CheckoutState,
        env: &CheckoutEnvironment<G, B, P, N>,
        reason: String,
    ) -> Effect<CheckoutAction> {
        let Some(secret) = state.attempt.client_secret.clone() else {
            return Effect::None;
        };
        let backend = env.backend.clone();

        Effect::Future(Box::pin(async move {
            if let Err(err) = backend.update_payment_status(&secret, &reason, false).await {
                tracing::warn!(%err, "Failed to report not-paid status");
            }
            None
        }))
    }
}

impl<G, B, P, N> Reducer for PaymentReducer<G, B, P, N>
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
            // PayPressed: validate, arm the busy guard, check the session
            // ═══════════════════════════════════════════════════════════
            CheckoutAction::PayPressed => {
                if state.attempt.in_flight {
                    // Busy guard: one attempt at a time
                    tracing::debug!("Pay pressed while an attempt is in flight");
                    metrics::counter!("checkout.payment.busy_rejected").increment(1);
                    return smallvec![Effect::None];
                }

                if !state.validate_for_payment() {
                    let notice =
                        Notice::error("Please complete all attendee details before paying.");
                    env.notifier.notify(&notice);
                    state.notice = Some(notice);
                    return smallvec![Effect::None];
                }

                state.recompute_totals();
                state.attempt.reset();
                state.attempt.started_at = Some(env.clock.now());
                state.notice = None;
                metrics::counter!("checkout.payment.attempts").increment(1);

                let gate = env.gate.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match gate.check_session().await {
                        Ok(SessionCheck::Valid { .. }) => {
                            Some(CheckoutAction::SessionChecked { valid: true })
                        },
                        Ok(SessionCheck::Expired) => {
                            Some(CheckoutAction::SessionChecked { valid: false })
                        },
                        Err(err) => {
                            // Transport failure, not an invalid session: the
                            // attempt fails without forcing a re-login
                            tracing::warn!(%err, "Session check failed");
                            Some(CheckoutAction::SessionCheckFailed {
                                message: "Couldn't verify your session. Please check \
                                          your connection and try again."
                                    .to_string(),
                            })
                        },
                    }
                }))]
            },

            // ═══════════════════════════════════════════════════════════
            // SessionChecked: short-circuit on expiry, else submit order
            // ═══════════════════════════════════════════════════════════
            CheckoutAction::SessionChecked { valid: false } => Self::expire_session(state, env),

            CheckoutAction::SessionCheckFailed { message } => {
                Self::fail_attempt(state, env, &message);
                smallvec![Effect::None]
            },

            CheckoutAction::SessionChecked { valid: true } => {
                let order = state.purchase_order();
                let backend = env.backend.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match backend.create_registration(&order).await {
                        Ok(receipt) => Some(CheckoutAction::IntentCreated {
                            client_secret: receipt.client_secret,
                        }),
                        Err(err) => Some(CheckoutAction::IntentRejected {
                            message: err.user_message(),
                            session_expired: err.requires_relogin(),
                        }),
                    }
                }))]
            },

            // ═══════════════════════════════════════════════════════════
            // IntentCreated: free orders skip the sheet entirely
            // ═══════════════════════════════════════════════════════════
            CheckoutAction::IntentCreated { client_secret } => {
                state.attempt.phase = PaymentPhase::IntentCreated;
                state.attempt.client_secret = Some(client_secret.clone());

                if state.grand_total.is_zero() {
                    tracing::info!("Free order, skipping payment sheet");
                    let backend = env.backend.clone();
                    return smallvec![Effect::Future(Box::pin(async move {
                        match backend
                            .update_payment_status(&client_secret, STATUS_SUCCESS, true)
                            .await
                        {
                            Ok(order_id) => Some(CheckoutAction::PaymentRecorded { order_id }),
                            Err(err) => {
                                tracing::error!(%err, "Free-order status update failed");
                                Some(CheckoutAction::PaymentRecordFailed)
                            },
                        }
                    }))];
                }

                let processor = env.processor.clone();
                let display_name = state.event.name.clone();
                let return_url = env.config.return_url.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match processor
                        .init_session(&client_secret, &display_name, &return_url)
                        .await
                    {
                        Ok(()) => Some(CheckoutAction::SheetReady),
                        Err(err) => Some(CheckoutAction::SheetInitFailed {
                            message: err.user_message(),
                        }),
                    }
                }))]
            },

            CheckoutAction::IntentRejected {
                message,
                session_expired,
            } => {
                if session_expired {
                    return Self::expire_session(state, env);
                }
                Self::fail_attempt(state, env, &message);
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════
            // Sheet lifecycle
            // ═══════════════════════════════════════════════════════════
            CheckoutAction::SheetReady => {
                state.attempt.phase = PaymentPhase::SheetPresented;

                let processor = env.processor.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match processor.present_session().await {
                        Ok(SheetOutcome::Completed) => Some(CheckoutAction::SheetCompleted),
                        Ok(SheetOutcome::Canceled) => Some(CheckoutAction::SheetFailed {
                            message: CheckoutError::Canceled.user_message(),
                        }),
                        Err(err) => Some(CheckoutAction::SheetFailed {
                            message: err.user_message(),
                        }),
                    }
                }))]
            },

            CheckoutAction::SheetInitFailed { message }
            | CheckoutAction::SheetFailed { message } => {
                let report = Self::report_not_paid(state, env, message.clone());
                Self::fail_attempt(state, env, &message);
                smallvec![report]
            },

            CheckoutAction::SheetCompleted => {
                state.attempt.phase = PaymentPhase::Confirmed;
                metrics::counter!("checkout.payment.confirmed").increment(1);

                let Some(secret) = state.attempt.client_secret.clone() else {
                    tracing::error!("Sheet completed without a client secret");
                    // Release the busy guard so the pay action stays usable
                    state.attempt.in_flight = false;
                    return smallvec![Effect::None];
                };
                let backend = env.backend.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    match backend
                        .update_payment_status(&secret, STATUS_SUCCESS, true)
                        .await
                    {
                        Ok(order_id) => Some(CheckoutAction::PaymentRecorded { order_id }),
                        Err(err) => {
                            tracing::error!(%err, "Post-success status update failed");
                            Some(CheckoutAction::PaymentRecordFailed)
                        },
                    }
                }))]
            },

            // ═══════════════════════════════════════════════════════════
            // Post-payment: record, email, finish
            // ═══════════════════════════════════════════════════════════
            CheckoutAction::PaymentRecorded { order_id } => {
                state.attempt.order_id = Some(order_id.clone());

                let backend = env.backend.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    match backend.send_ticket_email(&order_id).await {
                        Ok(()) => Some(CheckoutAction::TicketEmailSent),
                        Err(err) => Some(CheckoutAction::TicketEmailFailed {
                            message: err.user_message(),
                        }),
                    }
                }))]
            },

            CheckoutAction::PaymentRecordFailed => {
                // The charge may have succeeded; never claim it didn't.
                // Secret and order id stay in state for support follow-up.
                state.attempt.in_flight = false;
                metrics::counter!("checkout.payment.record_failed").increment(1);

                let notice = Notice::error(CheckoutError::PostPaymentReporting.user_message());
                env.notifier.notify(&notice);
                state.notice = Some(notice);
                smallvec![Effect::None]
            },

            CheckoutAction::TicketEmailSent => {
                let notice = Notice::info("Payment confirmed! Your tickets are on the way.");
                env.notifier.notify(&notice);
                state.notice = Some(notice);

                smallvec![Effect::Delay {
                    duration: env.config.confirmation_delay,
                    action: Box::new(CheckoutAction::CheckoutFinished),
                }]
            },

            CheckoutAction::TicketEmailFailed { message } => {
                // Payment is recorded; the email can be re-sent from the
                // order screen, so finish the flow anyway.
                tracing::warn!(%message, "Ticket email dispatch failed");
                let notice = Notice::error(message);
                env.notifier.notify(&notice);
                state.notice = Some(notice);

                smallvec![Effect::Delay {
                    duration: env.config.confirmation_delay,
                    action: Box::new(CheckoutAction::CheckoutFinished),
                }]
            },

            CheckoutAction::CheckoutFinished => {
                state.attempt.in_flight = false;
                smallvec![Effect::None]
            },

            // Observed by the embedding shell, nothing to do here
            CheckoutAction::RedirectToLogin => smallvec![Effect::None],

            // ═══════════════════════════════════════════════════════════
            // RedirectReturned: resume a sheet after external auth
            // ═══════════════════════════════════════════════════════════
            CheckoutAction::RedirectReturned { url } => {
                if state.attempt.phase != PaymentPhase::SheetPresented {
                    tracing::warn!("Redirect callback with no sheet pending");
                    return smallvec![Effect::None];
                }

                let processor = env.processor.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    if let Err(err) = processor.handle_redirect(&url).await {
                        tracing::warn!(%err, "Redirect callback rejected by processor");
                    }
                    None
                }))]
            },

            // Other actions are not handled by this reducer
            _ => smallvec![Effect::None],
        }
    }
}
