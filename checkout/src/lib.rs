//! # Boxoffice Checkout
//!
//! The ticket purchase workflow: registration builder, coupon engine, and
//! payment orchestration, implemented as reducers and effects.
//!
//! ## Architecture
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! The registration builder accumulates one entry per attendee and keeps
//! totals current; the coupon engine applies bounded percentage discounts;
//! the payment orchestrator drives the charge end to end (session check,
//! intent creation, hosted sheet, status confirmation, ticket delivery).
//!
//! ## Example: driving a purchase
//!
//! ```rust,ignore
//! use boxoffice_checkout::*;
//! use boxoffice_runtime::Store;
//!
//! let store = Store::new(
//!     CheckoutState::new(event, Some("Ada".into())),
//!     CheckoutReducer::new(),
//!     environment,
//! );
//!
//! store.send(CheckoutAction::SetAttendeeCount { raw: "2".into() }).await?;
//! store.send(CheckoutAction::SetTicketType { index: 0, rate }).await?;
//!
//! let outcome = store.send_and_wait_for(
//!     CheckoutAction::PayPressed,
//!     |a| matches!(a, CheckoutAction::CheckoutFinished),
//!     timeout,
//! ).await?;
//! ```

// Public modules
pub mod actions;
pub mod config;
pub mod environment;
pub mod error;
pub mod money;
pub mod providers;
pub mod reducers;
pub mod state;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

// Re-export main types for convenience
pub use actions::CheckoutAction;
pub use config::CheckoutConfig;
pub use environment::CheckoutEnvironment;
pub use error::{CheckoutError, Result};
pub use money::Money;
pub use reducers::CheckoutReducer;
pub use state::{CheckoutState, Coupon, PaymentPhase, Registration};
pub use types::{EventContext, EventId, OrderId, RatePlan, RatePlanId};
