//! Admin session state.
//!
//! One [`AdminSession`] object, owned by the top-level application
//! controller, holds the authentication flag, the API token, and the
//! signed-in profile. It is restored from a persistent [`SessionStore`]
//! at startup, written on login, and cleared on logout; no other code
//! touches the persisted keys.

use serde::{Deserialize, Serialize};

const KEY_AUTHENTICATED: &str = "carton_box_guru_isAdminAuthenticated";
const KEY_TOKEN: &str = "carton_box_guru_token";
const KEY_ID: &str = "carton_box_guru_id";
const KEY_NAME: &str = "carton_box_guru_name";
const KEY_EMAIL: &str = "carton_box_guru_email";
const KEY_ROLE: &str = "carton_box_guru_role";
const KEY_MOBILE: &str = "carton_box_guru_mobile";

const ALL_KEYS: [&str; 7] = [
    KEY_AUTHENTICATED,
    KEY_TOKEN,
    KEY_ID,
    KEY_NAME,
    KEY_EMAIL,
    KEY_ROLE,
    KEY_MOBILE,
];

/// Persistent string key/value storage for session state.
///
/// The browser build implements this over `window.localStorage`; tests
/// use [`MemoryStore`].
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// The signed-in administrator, as returned by the login endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub mobile: String,
}

/// Authentication state for the admin application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSession {
    authenticated: bool,
    token: Option<String>,
    profile: Option<AdminProfile>,
}

impl AdminSession {
    /// An unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the session from the persisted store at startup.
    ///
    /// A session counts as authenticated only when the flag and a token
    /// are both present; anything less restores as signed out.
    pub fn restore(store: &impl SessionStore) -> Self {
        let flag = store.get(KEY_AUTHENTICATED).as_deref() == Some("true");
        let token = store.get(KEY_TOKEN);

        if !flag || token.is_none() {
            return Self::new();
        }

        let profile = AdminProfile {
            id: store.get(KEY_ID).unwrap_or_default(),
            name: store.get(KEY_NAME).unwrap_or_default(),
            email: store.get(KEY_EMAIL).unwrap_or_default(),
            role: store.get(KEY_ROLE).unwrap_or_default(),
            mobile: store.get(KEY_MOBILE).unwrap_or_default(),
        };

        log::info!("restored admin session for {}", profile.email);

        Self {
            authenticated: true,
            token,
            profile: Some(profile),
        }
    }

    /// Record a successful login and persist it.
    pub fn login(&mut self, store: &mut impl SessionStore, profile: AdminProfile, token: String) {
        store.set(KEY_AUTHENTICATED, "true");
        store.set(KEY_TOKEN, &token);
        store.set(KEY_ID, &profile.id);
        store.set(KEY_NAME, &profile.name);
        store.set(KEY_EMAIL, &profile.email);
        store.set(KEY_ROLE, &profile.role);
        store.set(KEY_MOBILE, &profile.mobile);

        self.authenticated = true;
        self.token = Some(token);
        self.profile = Some(profile);
    }

    /// Sign out and remove every persisted key.
    pub fn logout(&mut self, store: &mut impl SessionStore) {
        for key in ALL_KEYS {
            store.remove(key);
        }
        *self = Self::new();
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn profile(&self) -> Option<&AdminProfile> {
        self.profile.as_ref()
    }
}

/// In-memory store for tests and non-browser hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
