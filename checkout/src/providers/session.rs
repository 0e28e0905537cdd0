//! Session storage and validation traits.
//!
//! Token persistence is an opaque key/value capability backed by secure
//! platform storage; the checkout core never sees the storage mechanism.

use crate::error::{CheckoutError, Result};
use std::future::Future;

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "auth_token";

/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Opaque key/value token storage.
///
/// Backed by secure platform storage in production; in-memory in tests.
pub trait KeyValueStore: Send + Sync {
    /// Get a stored value.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying storage fails.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Store a value.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying storage fails.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<()>> + Send;

    /// Remove a value.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying storage fails.
    fn remove(&self, key: &str) -> impl Future<Output = Result<()>> + Send;
}

/// Access and refresh token pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access: String,

    /// Long-lived refresh token.
    pub refresh: String,
}

/// Outcome of a session validity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCheck {
    /// The session is live. Carries fresh tokens when the check silently
    /// refreshed them.
    Valid {
        /// Tokens issued by a silent refresh, if one happened.
        refreshed: Option<TokenPair>,
    },

    /// The stored tokens are no longer valid; re-login required.
    Expired,
}

/// Remote token verification (the backend's session endpoint).
pub trait TokenVerifier: Send + Sync {
    /// Verify an access token, attempting a silent refresh with the
    /// refresh token when the access token alone is rejected.
    ///
    /// # Errors
    ///
    /// Returns error if the verification request itself fails (transport).
    fn verify(
        &self,
        access: &str,
        refresh: Option<&str>,
    ) -> impl Future<Output = Result<SessionCheck>> + Send;
}

/// Confirms session validity before orchestration starts.
pub trait AccessGate: Send + Sync {
    /// Check whether the stored session is live, silently refreshing
    /// when possible.
    ///
    /// # Errors
    ///
    /// Returns error if the check cannot be performed (transport).
    fn check_session(&self) -> impl Future<Output = Result<SessionCheck>> + Send;
}

/// [`AccessGate`] over a token store and a remote verifier.
///
/// Reads the stored token pair, asks the verifier, and writes refreshed
/// tokens back so the next check starts from the new pair.
#[derive(Debug, Clone)]
pub struct StoredTokenGate<K, V> {
    store: K,
    verifier: V,
}

impl<K, V> StoredTokenGate<K, V> {
    /// Create a gate over the given store and verifier.
    #[must_use]
    pub const fn new(store: K, verifier: V) -> Self {
        Self { store, verifier }
    }
}

impl<K, V> AccessGate for StoredTokenGate<K, V>
where
    K: KeyValueStore + Clone,
    V: TokenVerifier + Clone,
{
    fn check_session(&self) -> impl Future<Output = Result<SessionCheck>> + Send {
        let store = self.store.clone();
        let verifier = self.verifier.clone();

        async move {
            let Some(access) = store.get(ACCESS_TOKEN_KEY).await? else {
                tracing::debug!("No stored access token, session expired");
                return Ok(SessionCheck::Expired);
            };
            let refresh = store.get(REFRESH_TOKEN_KEY).await?;

            let check = verifier.verify(&access, refresh.as_deref()).await?;

            if let SessionCheck::Valid {
                refreshed: Some(pair),
            } = &check
            {
                tracing::debug!("Session refreshed, persisting new tokens");
                store.set(ACCESS_TOKEN_KEY, &pair.access).await?;
                store.set(REFRESH_TOKEN_KEY, &pair.refresh).await?;
            }

            if matches!(check, SessionCheck::Expired) {
                // Stale tokens are useless; clear them so the login flow
                // starts clean.
                store.remove(ACCESS_TOKEN_KEY).await?;
                store.remove(REFRESH_TOKEN_KEY).await?;
            }

            Ok(check)
        }
    }
}

impl SessionCheck {
    /// Convert to the error-level view of an expired session.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::SessionExpired`] for `Expired`.
    pub fn require_valid(self) -> Result<()> {
        match self {
            Self::Valid { .. } => Ok(()),
            Self::Expired => Err(CheckoutError::SessionExpired),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::{MockKeyValueStore, MockTokenVerifier};

    fn stored_tokens() -> MockKeyValueStore {
        MockKeyValueStore::with_values([
            (ACCESS_TOKEN_KEY.to_string(), "access-1".to_string()),
            (REFRESH_TOKEN_KEY.to_string(), "refresh-1".to_string()),
        ])
    }

    #[tokio::test]
    async fn missing_token_is_expired_without_hitting_the_verifier() {
        let gate = StoredTokenGate::new(MockKeyValueStore::new(), MockTokenVerifier::new());

        let check = gate.check_session().await.unwrap();

        assert_eq!(check, SessionCheck::Expired);
    }

    #[tokio::test]
    async fn valid_session_leaves_tokens_in_place() {
        let store = stored_tokens();
        let gate = StoredTokenGate::new(store.clone(), MockTokenVerifier::new());

        let check = gate.check_session().await.unwrap();

        assert_eq!(check, SessionCheck::Valid { refreshed: None });
        let access = store.get(ACCESS_TOKEN_KEY).await.unwrap();
        assert_eq!(access.as_deref(), Some("access-1"));
    }

    #[tokio::test]
    async fn refreshed_tokens_are_persisted() {
        let store = stored_tokens();
        let verifier = MockTokenVerifier::new();
        verifier.push_response(SessionCheck::Valid {
            refreshed: Some(TokenPair {
                access: "access-2".to_string(),
                refresh: "refresh-2".to_string(),
            }),
        });
        let gate = StoredTokenGate::new(store.clone(), verifier);

        gate.check_session().await.unwrap();

        let access = store.get(ACCESS_TOKEN_KEY).await.unwrap();
        let refresh = store.get(REFRESH_TOKEN_KEY).await.unwrap();
        assert_eq!(access.as_deref(), Some("access-2"));
        assert_eq!(refresh.as_deref(), Some("refresh-2"));
    }

    #[tokio::test]
    async fn expired_session_clears_stored_tokens() {
        let store = stored_tokens();
        let verifier = MockTokenVerifier::new();
        verifier.push_response(SessionCheck::Expired);
        let gate = StoredTokenGate::new(store.clone(), verifier);

        let check = gate.check_session().await.unwrap();

        assert_eq!(check, SessionCheck::Expired);
        assert!(store.is_empty());
    }

    #[test]
    fn require_valid_maps_expired_to_the_relogin_error() {
        assert_eq!(
            SessionCheck::Expired.require_valid(),
            Err(CheckoutError::SessionExpired)
        );
        assert!(SessionCheck::Valid { refreshed: None }.require_valid().is_ok());
    }
}
