//! The session storage seam.
//!
//! Cookies and the persisted user blob are the only shared mutable state in
//! the system, so access to them goes through this one interface. Components
//! depend on the trait; only the HTTP adapter in the middleware touches the
//! actual cookie jar.

/// Storage primitives the session reconciler works against.
///
/// The trait exposes exactly the operations the observed flows perform.
/// Notably there is no blob-clearing operation: neither logout nor any
/// reconciliation step ever removes the persisted blob.
pub trait SessionStore {
    /// Read a cookie value.
    fn cookie(&self, name: &str) -> Option<String>;

    /// Write a cookie (path `/`, 7-day lifetime, SameSite=Lax in the HTTP
    /// adapter).
    fn set_cookie(&mut self, name: &str, value: &str);

    /// Remove a cookie.
    fn remove_cookie(&mut self, name: &str);

    /// Read the persisted user blob as raw JSON.
    fn load_blob(&self) -> Option<String>;

    /// Overwrite the persisted user blob with raw JSON.
    fn store_blob(&mut self, json: &str);
}

#[cfg(test)]
pub mod testing {
    //! In-memory store for reconciler tests.

    use std::collections::HashMap;

    use super::SessionStore;

    /// A plain-map store with no HTTP attached.
    #[derive(Debug, Default, Clone, PartialEq, Eq)]
    pub struct InMemoryStore {
        cookies: HashMap<String, String>,
        blob: Option<String>,
    }

    impl InMemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_cookie(mut self, name: &str, value: &str) -> Self {
            self.cookies.insert(name.to_owned(), value.to_owned());
            self
        }

        pub fn with_blob(mut self, json: &str) -> Self {
            self.blob = Some(json.to_owned());
            self
        }

        pub fn has_cookie(&self, name: &str) -> bool {
            self.cookies.contains_key(name)
        }
    }

    impl SessionStore for InMemoryStore {
        fn cookie(&self, name: &str) -> Option<String> {
            self.cookies.get(name).cloned()
        }

        fn set_cookie(&mut self, name: &str, value: &str) {
            self.cookies.insert(name.to_owned(), value.to_owned());
        }

        fn remove_cookie(&mut self, name: &str) {
            self.cookies.remove(name);
        }

        fn load_blob(&self) -> Option<String> {
            self.blob.clone()
        }

        fn store_blob(&mut self, json: &str) {
            self.blob = Some(json.to_owned());
        }
    }
}
