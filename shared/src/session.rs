//! Persisted session state and the 401 teardown policy.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";
pub const LOGIN_ROUTE: &str = "/log-in";

/// Durable key/value storage for the session (browser local storage in the app).
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Reads the bearer token and tears the session down on authentication failures.
///
/// The redirect to the login route is handed out at most once per page
/// lifetime; concurrent requests failing with 401 only clear storage again.
pub struct SessionGuard<S: SessionStore> {
    store: S,
    redirected: Cell<bool>,
}

impl<S: SessionStore> SessionGuard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            redirected: Cell::new(false),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// `Authorization` header value, when a token is stored.
    pub fn authorization(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {}", token))
    }

    pub fn sign_in(&self, token: &str) {
        self.store.set(TOKEN_KEY, token);
        self.redirected.set(false);
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
    }

    /// Inspect a response status. On 401 the stored token and user are
    /// removed and, the first time only, the login route is returned for a
    /// hard navigation.
    pub fn on_status(&self, status: u16) -> Option<&'static str> {
        if status != 401 {
            return None;
        }
        self.clear();
        if self.redirected.replace(true) {
            tracing::debug!("401 received after redirect was already issued");
            None
        } else {
            tracing::warn!("session rejected by the server, redirecting to login");
            Some(LOGIN_ROUTE)
        }
    }
}

/// In-memory store, used where no browser storage exists.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (key, value) in entries {
            store.set(key, value);
        }
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header_from_store() {
        let guard = SessionGuard::new(MemorySessionStore::with(&[(TOKEN_KEY, "abc")]));
        assert_eq!(guard.authorization().as_deref(), Some("Bearer abc"));

        let guard = SessionGuard::new(MemorySessionStore::default());
        assert!(guard.authorization().is_none());
        assert!(!guard.is_authenticated());
    }

    #[test]
    fn test_non_401_leaves_session_alone() {
        let guard = SessionGuard::new(MemorySessionStore::with(&[(TOKEN_KEY, "abc")]));
        assert_eq!(guard.on_status(500), None);
        assert_eq!(guard.on_status(403), None);
        assert!(guard.is_authenticated());
    }

    #[test]
    fn test_401_clears_and_redirects_once() {
        let guard = SessionGuard::new(MemorySessionStore::with(&[
            (TOKEN_KEY, "abc"),
            (USER_KEY, "{\"id\":\"u1\"}"),
        ]));

        assert_eq!(guard.on_status(401), Some(LOGIN_ROUTE));
        assert!(guard.store().get(TOKEN_KEY).is_none());
        assert!(guard.store().get(USER_KEY).is_none());

        // A second request failing concurrently does not navigate again
        assert_eq!(guard.on_status(401), None);
    }

    #[test]
    fn test_sign_in_rearms_redirect() {
        let guard = SessionGuard::new(MemorySessionStore::default());
        assert_eq!(guard.on_status(401), Some(LOGIN_ROUTE));
        guard.sign_in("fresh");
        assert_eq!(guard.token().as_deref(), Some("fresh"));
        assert_eq!(guard.on_status(401), Some(LOGIN_ROUTE));
    }
}
