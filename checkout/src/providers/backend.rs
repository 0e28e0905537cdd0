//! Ticketing backend trait and its REST implementation.
//!
//! Wire format: JSON over HTTPS. The backend signals business failures
//! with `isOk: false` plus a message; those become [`CheckoutError::Backend`]
//! (or [`CheckoutError::SessionExpired`] when the status marks an expired
//! session) rather than transport errors.

use crate::error::{CheckoutError, Result};
use crate::state::PurchaseOrder;
use crate::types::{OrderId, RatePlanId};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Backend status value marking an expired session.
const SESSION_EXPIRED_STATUS: &str = "401";

/// Receipt for a created payment intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentReceipt {
    /// Processor-issued client secret for the pending charge.
    pub client_secret: String,
}

/// Remote ticketing backend.
pub trait TicketingBackend: Send + Sync {
    /// Submit the purchase order, creating a pending order and a payment
    /// intent. Returns the processor client secret.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Backend`] on business rejection (surfaced verbatim)
    /// - [`CheckoutError::SessionExpired`] when the rejection is an expired session
    /// - [`CheckoutError::Transport`] on network failure
    fn create_registration(
        &self,
        order: &PurchaseOrder,
    ) -> impl Future<Output = Result<IntentReceipt>> + Send;

    /// Record the outcome of a charge attempt against its client secret.
    /// Returns the backend order id on a successfully recorded payment.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Backend`] if the backend reports not-ok
    /// - [`CheckoutError::Transport`] on network failure
    fn update_payment_status(
        &self,
        client_secret: &str,
        status: &str,
        is_paid: bool,
    ) -> impl Future<Output = Result<OrderId>> + Send;

    /// Trigger delivery of ticket artifacts for a recorded order.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Backend`] if the backend reports not-ok
    /// - [`CheckoutError::Transport`] on network failure
    fn send_ticket_email(&self, order_id: &OrderId) -> impl Future<Output = Result<()>> + Send;
}

// ═══════════════════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationRequest {
    coupon_code: Option<String>,
    participants: Vec<ParticipantEntry>,
    event_id: String,
    country_id: String,
    after_discount_total: u64,
    currency: String,
    amount_in_cents: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ParticipantEntry {
    name: String,
    age: String,
    ticket_type_id: Option<RatePlanId>,
    amount_in_cents: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegistrationResponse {
    is_ok: bool,
    client_secret: Option<String>,
    message: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentStatusRequest {
    client_secret: String,
    status: String,
    is_paid: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentStatusResponse {
    is_ok: bool,
    order_id: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TicketEmailResponse {
    is_ok: Option<bool>,
    status: Option<String>,
    message: Option<String>,
}

impl TicketEmailResponse {
    /// The endpoint answers with either an `isOk` flag or a `status` string.
    fn succeeded(&self) -> bool {
        self.is_ok
            .unwrap_or_else(|| matches!(self.status.as_deref(), Some("ok" | "success")))
    }
}

impl From<&PurchaseOrder> for RegistrationRequest {
    fn from(order: &PurchaseOrder) -> Self {
        Self {
            coupon_code: order.applied_coupon.as_ref().map(|c| c.code.clone()),
            participants: order
                .registrations
                .iter()
                .map(|r| ParticipantEntry {
                    name: r.name.clone(),
                    age: r.age.clone(),
                    ticket_type_id: r.ticket_type.as_ref().map(|t| t.id),
                    amount_in_cents: r.charge.cents(),
                })
                .collect(),
            event_id: order.event.event_id.to_string(),
            country_id: order.event.country_id.clone(),
            after_discount_total: order.grand_total.cents(),
            currency: order.event.currency.clone(),
            amount_in_cents: order.grand_total.cents(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// HTTP implementation
// ═══════════════════════════════════════════════════════════════════════

/// [`TicketingBackend`] over the REST API.
#[derive(Debug, Clone)]
pub struct HttpTicketingBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTicketingBackend {
    /// Create a backend client against the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create a backend client with a preconfigured `reqwest` client
    /// (custom timeouts, proxies).
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

impl TicketingBackend for HttpTicketingBackend {
    fn create_registration(
        &self,
        order: &PurchaseOrder,
    ) -> impl Future<Output = Result<IntentReceipt>> + Send {
        let client = self.client.clone();
        let url = format!("{}/registration", self.base_url);
        let body = RegistrationRequest::from(order);

        async move {
            tracing::info!(
                participants = body.participants.len(),
                amount_in_cents = body.amount_in_cents,
                "Submitting registration"
            );
            metrics::counter!("checkout.backend.registration.requests").increment(1);

            let response: RegistrationResponse = client
                .post(&url)
                .json(&body)
                .send()
                .await?
                .json()
                .await?;

            if !response.is_ok {
                metrics::counter!("checkout.backend.registration.rejected").increment(1);
                if response.status.as_deref() == Some(SESSION_EXPIRED_STATUS) {
                    return Err(CheckoutError::SessionExpired);
                }
                return Err(CheckoutError::Backend {
                    message: response
                        .message
                        .unwrap_or_else(|| "Registration was rejected.".to_string()),
                });
            }

            let client_secret = response.client_secret.ok_or_else(|| CheckoutError::Backend {
                message: "Registration succeeded but no client secret was returned.".to_string(),
            })?;

            Ok(IntentReceipt { client_secret })
        }
    }

    fn update_payment_status(
        &self,
        client_secret: &str,
        status: &str,
        is_paid: bool,
    ) -> impl Future<Output = Result<OrderId>> + Send {
        let client = self.client.clone();
        let url = format!("{}/payment-status", self.base_url);
        let body = PaymentStatusRequest {
            client_secret: client_secret.to_string(),
            status: status.to_string(),
            is_paid,
        };

        async move {
            tracing::info!(is_paid, "Updating payment status");
            metrics::counter!("checkout.backend.payment_status.requests").increment(1);

            let response: PaymentStatusResponse = client
                .patch(&url)
                .json(&body)
                .send()
                .await?
                .json()
                .await?;

            if !response.is_ok {
                return Err(CheckoutError::Backend {
                    message: response
                        .message
                        .unwrap_or_else(|| "Payment status update was rejected.".to_string()),
                });
            }

            let order_id = response.order_id.ok_or_else(|| CheckoutError::Backend {
                message: "Payment recorded but no order id was returned.".to_string(),
            })?;

            Ok(OrderId(order_id))
        }
    }

    fn send_ticket_email(&self, order_id: &OrderId) -> impl Future<Output = Result<()>> + Send {
        let client = self.client.clone();
        let url = format!("{}/ticket-email/{}", self.base_url, order_id);

        async move {
            tracing::info!(%url, "Dispatching ticket email");
            metrics::counter!("checkout.backend.ticket_email.requests").increment(1);

            let response: TicketEmailResponse =
                client.post(&url).send().await?.json().await?;

            if !response.succeeded() {
                return Err(CheckoutError::Backend {
                    message: response
                        .message
                        .unwrap_or_else(|| "Ticket email dispatch failed.".to_string()),
                });
            }

            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::state::{CheckoutState, Registration};
    use crate::types::{EventContext, EventId, RatePlan, RatePlanId};

    #[test]
    fn registration_request_serializes_camel_case() {
        let mut state = CheckoutState::new(
            EventContext {
                event_id: EventId::new(),
                country_id: "US".to_string(),
                currency: "usd".to_string(),
                name: "RustConf".to_string(),
                is_paid: true,
                rate_plans: vec![],
            },
            None,
        );
        state.registrations = Some(vec![Registration {
            name: "Ada".to_string(),
            age: "36".to_string(),
            ticket_type: Some(RatePlan {
                id: RatePlanId::new(),
                label: "General".to_string(),
                unit_price: Money::from_cents(5_000),
            }),
            charge: Money::from_cents(5_000),
        }]);
        state.recompute_totals();

        let request = RegistrationRequest::from(&state.purchase_order());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["amountInCents"], 5_000);
        assert_eq!(json["afterDiscountTotal"], 5_000);
        assert_eq!(json["participants"][0]["name"], "Ada");
        assert!(json["couponCode"].is_null());
    }

    #[test]
    fn ticket_email_response_accepts_status_only_success() {
        let by_status: TicketEmailResponse =
            serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(by_status.succeeded());

        let by_flag: TicketEmailResponse =
            serde_json::from_str(r#"{"isOk": true}"#).unwrap();
        assert!(by_flag.succeeded());

        let rejected: TicketEmailResponse =
            serde_json::from_str(r#"{"isOk": false, "message": "No such order"}"#).unwrap();
        assert!(!rejected.succeeded());
        assert_eq!(rejected.message.as_deref(), Some("No such order"));
    }

    #[test]
    fn rejection_response_parses_message_and_status() {
        let response: RegistrationResponse = serde_json::from_str(
            r#"{"isOk": false, "message": "Event is sold out", "status": "409"}"#,
        )
        .unwrap();

        assert!(!response.is_ok);
        assert_eq!(response.message.as_deref(), Some("Event is sold out"));
        assert_ne!(response.status.as_deref(), Some(SESSION_EXPIRED_STATUS));
    }
}
