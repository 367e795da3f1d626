//! Pluggable storage for the admin access token.

use std::sync::{Mutex, PoisonError};

use super::endpoint::AccessToken;

/// Storage for the bearer token shared by authenticated gateways.
///
/// The token outlives any single request, so the embedding application
/// decides where it lives. The bundled [`InMemoryTokenStore`] keeps it for
/// the lifetime of the process; persistent front ends can supply their own
/// implementation instead.
#[cfg_attr(test, mockall::automock)]
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    fn current(&self) -> Option<AccessToken>;

    /// Replaces the stored token.
    fn store(&self, token: AccessToken);

    /// Removes the stored token.
    fn clear(&self);
}

/// Process-lifetime token storage.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    slot: Mutex<Option<AccessToken>>,
}

impl InMemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn current(&self) -> Option<AccessToken> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, token: AccessToken) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_replaces_and_clear_removes_the_token() {
        let tokens = InMemoryTokenStore::new();
        assert_eq!(tokens.current(), None);

        let first = AccessToken::new("first").expect("token should be valid");
        tokens.store(first.clone());
        assert_eq!(tokens.current(), Some(first));

        let second = AccessToken::new("second").expect("token should be valid");
        tokens.store(second.clone());
        assert_eq!(tokens.current(), Some(second));

        tokens.clear();
        assert_eq!(tokens.current(), None);
    }
}
