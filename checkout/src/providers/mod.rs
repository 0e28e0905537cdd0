//! Collaborator interfaces for the checkout workflow.
//!
//! Every external dependency the orchestrator touches — token storage,
//! session validation, the ticketing backend, the hosted payment sheet,
//! user notifications — is a trait here, injected via the environment.

pub mod backend;
pub mod notifier;
pub mod processor;
pub mod session;

pub use backend::{HttpTicketingBackend, IntentReceipt, TicketingBackend};
pub use notifier::{Notifier, TracingNotifier};
pub use processor::{PaymentProcessor, SheetOutcome};
pub use session::{AccessGate, KeyValueStore, SessionCheck, StoredTokenGate, TokenPair, TokenVerifier};
