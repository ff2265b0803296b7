//! Credentials for backend requests.

use triox_core::{AuthProvider, bearer};

use super::dom;

/// Reads the bearer token from localStorage on every request, so a login in
/// another tab takes effect without a reload.
#[derive(Clone, Copy, Debug)]
pub struct StorageAuth {
    key: &'static str,
}

impl StorageAuth {
    pub fn new(key: &'static str) -> Self {
        Self { key }
    }

    pub fn token(&self) -> Option<String> {
        let storage = dom::local_storage()?;
        storage
            .get_item(self.key)
            .ok()
            .flatten()
            .filter(|token| !token.trim().is_empty())
    }
}

impl AuthProvider for StorageAuth {
    fn auth_headers(&self) -> Vec<(String, String)> {
        self.token().map(|t| bearer(&t)).into_iter().collect()
    }
}
