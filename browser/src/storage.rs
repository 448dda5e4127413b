use registration::storage::LocalStorage;
use registration::{AuthenticationError, AuthenticationErrorType};

use crate::exception::exception;

/// `window.localStorage`. Browsers that refuse access (privacy modes,
/// sandboxed frames) leave it unset and every write fails.
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn init() -> BrowserStorage {
        let storage = web_sys::window().and_then(|window| match window.local_storage() {
            Ok(storage) => storage,
            Err(error) => {
                tracing::warn!("local storage unavailable -> {}", exception(&error));

                None
            }
        });

        BrowserStorage { storage }
    }
}

impl LocalStorage for BrowserStorage {
    fn set_item(&self, key: &str, value: &str) -> Result<(), AuthenticationError> {
        match &self.storage {
            Some(storage) => storage.set_item(key, value).map_err(|error| exception(&error)),
            None => Err(AuthenticationError {
                error: AuthenticationErrorType::SecurityError,
            }),
        }
    }
}
