//! Admin session state backed by localStorage.
//!
//! Implements the core `SessionStore` trait over `window.localStorage`
//! and exposes the session lifecycle to the application shell: restore
//! at startup, login, logout.

use cartoncrop_core::auth::{AdminProfile, AdminSession, SessionStore};
use wasm_bindgen::prelude::*;

/// `SessionStore` over the browser's `window.localStorage`.
pub struct LocalStorageStore {
    storage: web_sys::Storage,
}

impl LocalStorageStore {
    /// Bind to the window's localStorage.
    ///
    /// # Errors
    ///
    /// Fails outside a browsing context or when storage access is
    /// denied (e.g. blocked third-party storage).
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;
        let storage = window
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("localStorage is not available"))?;
        Ok(Self { storage })
    }
}

impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Err(e) = self.storage.set_item(key, value) {
            // Quota or privacy-mode failure: the session still works
            // in memory, it just won't survive a reload
            web_sys::console::warn_1(&e);
        }
    }

    fn remove(&mut self, key: &str) {
        let _ = self.storage.remove_item(key);
    }
}

/// The application's admin session, persisted to localStorage.
#[wasm_bindgen]
pub struct AdminSessionHandle {
    inner: AdminSession,
    store: LocalStorageStore,
}

#[wasm_bindgen]
impl AdminSessionHandle {
    /// Restore the session from localStorage at startup.
    ///
    /// # Errors
    ///
    /// Fails when localStorage is unavailable.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<AdminSessionHandle, JsValue> {
        let store = LocalStorageStore::new()?;
        let inner = AdminSession::restore(&store);
        Ok(AdminSessionHandle { inner, store })
    }

    /// Whether an administrator is signed in.
    #[wasm_bindgen(getter)]
    pub fn is_authenticated(&self) -> bool {
        self.inner.is_authenticated()
    }

    /// The API token, when signed in.
    #[wasm_bindgen(getter)]
    pub fn token(&self) -> Option<String> {
        self.inner.token().map(str::to_string)
    }

    /// The signed-in profile as `{id, name, email, role, mobile}`, or
    /// `undefined` when signed out.
    ///
    /// # Errors
    ///
    /// Serialization failures only.
    pub fn profile(&self) -> Result<JsValue, JsValue> {
        match self.inner.profile() {
            Some(profile) => serde_wasm_bindgen::to_value(profile)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Record a successful login and persist it.
    ///
    /// # Arguments
    ///
    /// * `profile` - `{id, name, email, role, mobile}` from the login
    ///   response
    /// * `token` - The API token to persist
    ///
    /// # Errors
    ///
    /// Fails when the profile object does not deserialize.
    pub fn login(&mut self, profile: JsValue, token: String) -> Result<(), JsValue> {
        let profile: AdminProfile = serde_wasm_bindgen::from_value(profile)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.login(&mut self.store, profile, token);
        Ok(())
    }

    /// Sign out and remove every persisted key.
    pub fn logout(&mut self) {
        self.inner.logout(&mut self.store);
    }
}
