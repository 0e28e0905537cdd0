//! Mock provider implementations for testing.
//!
//! All mocks record their calls behind `Arc<Mutex<..>>` so tests can assert
//! on call order and arguments, and script their outcomes up front.

pub mod backend;
pub mod notifier;
pub mod processor;
pub mod session;

pub use backend::{BackendCall, MockTicketingBackend};
pub use notifier::RecordingNotifier;
pub use processor::MockPaymentProcessor;
pub use session::{MockAccessGate, MockKeyValueStore, MockTokenVerifier};
