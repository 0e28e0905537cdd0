//! Mock ticketing backend for testing.

use crate::error::{CheckoutError, Result};
use crate::providers::{IntentReceipt, TicketingBackend};
use crate::state::PurchaseOrder;
use crate::types::OrderId;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    /// `create_registration` was invoked.
    CreateRegistration {
        /// Charged amount in cents.
        amount_in_cents: u64,
        /// Coupon code on the order, if any.
        coupon_code: Option<String>,
        /// Number of participants submitted.
        participants: usize,
    },

    /// `update_payment_status` was invoked.
    UpdatePaymentStatus {
        /// Client secret the status refers to.
        client_secret: String,
        /// Status string reported.
        status: String,
        /// Paid flag reported.
        is_paid: bool,
    },

    /// `send_ticket_email` was invoked.
    SendTicketEmail {
        /// Order the email is for.
        order_id: OrderId,
    },
}

#[derive(Debug, Default)]
struct Inner {
    calls: Vec<BackendCall>,
    secrets_issued: u32,
    registration_failure: Option<CheckoutError>,
    status_failure: Option<CheckoutError>,
    email_failure: Option<CheckoutError>,
}

/// Mock ticketing backend.
///
/// Issues a distinct client secret per registration call, records every
/// call in order, and can be scripted to fail any of the three endpoints.
#[derive(Debug, Clone, Default)]
pub struct MockTicketingBackend {
    inner: Arc<Mutex<Inner>>,
}

impl MockTicketingBackend {
    /// Create a backend where every call succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next and all subsequent registration calls.
    pub fn fail_registration_with(&self, err: CheckoutError) {
        self.lock().registration_failure = Some(err);
    }

    /// Clear a scripted registration failure.
    pub fn clear_registration_failure(&self) {
        self.lock().registration_failure = None;
    }

    /// Fail all subsequent status-update calls.
    pub fn fail_status_update_with(&self, err: CheckoutError) {
        self.lock().status_failure = Some(err);
    }

    /// Fail all subsequent ticket-email calls.
    pub fn fail_email_with(&self, err: CheckoutError) {
        self.lock().email_failure = Some(err);
    }

    /// All calls recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    /// Number of client secrets issued so far.
    #[must_use]
    pub fn secrets_issued(&self) -> u32 {
        self.lock().secrets_issued
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TicketingBackend for MockTicketingBackend {
    fn create_registration(
        &self,
        order: &PurchaseOrder,
    ) -> impl Future<Output = Result<IntentReceipt>> + Send {
        let inner = Arc::clone(&self.inner);
        let call = BackendCall::CreateRegistration {
            amount_in_cents: order.grand_total.cents(),
            coupon_code: order.applied_coupon.as_ref().map(|c| c.code.clone()),
            participants: order.registrations.len(),
        };

        async move {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.calls.push(call);

            if let Some(err) = inner.registration_failure.clone() {
                return Err(err);
            }

            inner.secrets_issued += 1;
            Ok(IntentReceipt {
                client_secret: format!("pi_secret_{}", inner.secrets_issued),
            })
        }
    }

    fn update_payment_status(
        &self,
        client_secret: &str,
        status: &str,
        is_paid: bool,
    ) -> impl Future<Output = Result<OrderId>> + Send {
        let inner = Arc::clone(&self.inner);
        let call = BackendCall::UpdatePaymentStatus {
            client_secret: client_secret.to_string(),
            status: status.to_string(),
            is_paid,
        };

        async move {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.calls.push(call);

            if let Some(err) = inner.status_failure.clone() {
                return Err(err);
            }

            Ok(OrderId(format!("order-{}", inner.calls.len())))
        }
    }

    fn send_ticket_email(&self, order_id: &OrderId) -> impl Future<Output = Result<()>> + Send {
        let inner = Arc::clone(&self.inner);
        let call = BackendCall::SendTicketEmail {
            order_id: order_id.clone(),
        };

        async move {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.calls.push(call);

            if let Some(err) = inner.email_failure.clone() {
                return Err(err);
            }

            Ok(())
        }
    }
}
