//! Best-effort local credential cleanup when the application window closes.
//!
//! The browsing context may be destroyed before any awaited operation
//! resolves, so everything here is synchronous: delete the identity
//! provider's cached credential entries from persistent storage and clear
//! transient session storage. Server-side session revocation is
//! deliberately not attempted on window close; the user simply has to
//! re-authenticate.

/// The local key-value store holding cached credential material.
///
/// The identity provider namespaces its entries with a key prefix, e.g.
/// `CognitoIdentityServiceProvider`.
pub trait CredentialStore {
    /// Every key currently present in persistent storage.
    fn keys(&self) -> Vec<String>;

    /// Remove one persisted entry.
    fn remove(&mut self, key: &str);

    /// Clear all transient session-scoped storage.
    fn clear_session(&mut self);
}

/// Remove every persisted entry under the `namespace` prefix and clear
/// session storage. Returns how many credential entries were removed.
pub fn purge_local_credentials<S: CredentialStore>(store: &mut S, namespace: &str) -> usize {
    let credential_keys: Vec<String> = store
        .keys()
        .into_iter()
        .filter(|key| key.starts_with(namespace))
        .collect();

    for key in &credential_keys {
        store.remove(key);
    }
    store.clear_session();

    tracing::debug!(
        "purged {} credential entries under namespace {namespace}",
        credential_keys.len()
    );

    credential_keys.len()
}

/// Hooked up by the host to run on imminent window/tab teardown.
#[derive(Debug)]
pub struct SessionBoundaryHandler<S: CredentialStore> {
    store: S,
    namespace: String,
}

impl<S: CredentialStore> SessionBoundaryHandler<S> {
    /// `namespace` is the identity provider's key prefix.
    pub fn new(store: S, namespace: &str) -> Self {
        Self {
            store,
            namespace: namespace.to_owned(),
        }
    }

    /// Best-effort local invalidation. Performs no awaited work and is safe
    /// to invoke more than once.
    pub fn on_close(&mut self) {
        purge_local_credentials(&mut self.store, &self.namespace);
    }
}
