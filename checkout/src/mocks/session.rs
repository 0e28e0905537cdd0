//! Mock session providers for testing.

use crate::error::{CheckoutError, Result};
use crate::providers::{AccessGate, KeyValueStore, SessionCheck, TokenVerifier};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

/// Mock key/value token storage.
///
/// Uses in-memory storage for testing.
#[derive(Debug, Clone, Default)]
pub struct MockKeyValueStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MockKeyValueStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with values.
    #[must_use]
    pub fn with_values(values: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            values: Arc::new(Mutex::new(values.into_iter().collect())),
        }
    }

    /// Number of stored values (for testing).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MockKeyValueStore {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send {
        let values = Arc::clone(&self.values);
        let key = key.to_string();

        async move {
            Ok(values
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&key)
                .cloned())
        }
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send {
        let values = Arc::clone(&self.values);
        let key = key.to_string();
        let value = value.to_string();

        async move {
            values
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .insert(key, value);
            Ok(())
        }
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send {
        let values = Arc::clone(&self.values);
        let key = key.to_string();

        async move {
            values
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .remove(&key);
            Ok(())
        }
    }
}

/// Mock token verifier with scripted responses.
///
/// Responses are consumed in order; once the script is exhausted, every
/// check answers `Valid` with no refresh.
#[derive(Debug, Clone, Default)]
pub struct MockTokenVerifier {
    script: Arc<Mutex<VecDeque<SessionCheck>>>,
}

impl MockTokenVerifier {
    /// Create a verifier that always answers `Valid`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a scripted response.
    pub fn push_response(&self, check: SessionCheck) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(check);
    }
}

impl TokenVerifier for MockTokenVerifier {
    fn verify(
        &self,
        _access: &str,
        _refresh: Option<&str>,
    ) -> impl Future<Output = Result<SessionCheck>> + Send {
        let script = Arc::clone(&self.script);

        async move {
            Ok(script
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front()
                .unwrap_or(SessionCheck::Valid { refreshed: None }))
        }
    }
}

/// Mock access gate with a switchable validity flag and a scriptable
/// transport failure.
#[derive(Debug, Clone)]
pub struct MockAccessGate {
    valid: Arc<Mutex<bool>>,
    checks: Arc<Mutex<usize>>,
    failure: Arc<Mutex<Option<CheckoutError>>>,
}

impl MockAccessGate {
    /// Create a gate that reports a live session.
    #[must_use]
    pub fn valid() -> Self {
        Self {
            valid: Arc::new(Mutex::new(true)),
            checks: Arc::new(Mutex::new(0)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Create a gate that reports an expired session.
    #[must_use]
    pub fn expired() -> Self {
        Self {
            valid: Arc::new(Mutex::new(false)),
            checks: Arc::new(Mutex::new(0)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Flip the validity for subsequent checks.
    pub fn set_valid(&self, valid: bool) {
        *self.valid.lock().unwrap_or_else(PoisonError::into_inner) = valid;
    }

    /// Fail all subsequent checks with the given error.
    pub fn fail_with(&self, err: CheckoutError) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = Some(err);
    }

    /// Number of checks performed (for testing).
    #[must_use]
    pub fn check_count(&self) -> usize {
        *self.checks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AccessGate for MockAccessGate {
    fn check_session(&self) -> impl Future<Output = Result<SessionCheck>> + Send {
        let valid = Arc::clone(&self.valid);
        let checks = Arc::clone(&self.checks);
        let failure = Arc::clone(&self.failure);

        async move {
            *checks.lock().unwrap_or_else(PoisonError::into_inner) += 1;

            if let Some(err) = failure
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
            {
                return Err(err);
            }

            let valid = *valid.lock().unwrap_or_else(PoisonError::into_inner);
            if valid {
                Ok(SessionCheck::Valid { refreshed: None })
            } else {
                Ok(SessionCheck::Expired)
            }
        }
    }
}
