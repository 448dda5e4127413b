use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AuthenticationError, AuthenticationErrorType};

/// Synchronous key/value storage with `window.localStorage` write semantics.
pub trait LocalStorage {
    fn set_item(&self, key: &str, value: &str) -> Result<(), AuthenticationError>;
}

impl<T: LocalStorage + ?Sized> LocalStorage for &T {
    fn set_item(&self, key: &str, value: &str) -> Result<(), AuthenticationError> {
        (**self).set_item(key, value)
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> MemoryStorage {
        MemoryStorage::default()
    }

    /// Rejects writes once keys plus values would exceed `quota` bytes.
    pub fn with_quota(quota: usize) -> MemoryStorage {
        MemoryStorage {
            items: Mutex::new(HashMap::with_capacity(4)),
            quota: Some(quota),
        }
    }

    pub fn get_item(&self, key: &str) -> Option<String> {
        match self.items.lock() {
            Ok(items) => items.get(key).cloned(),
            Err(error) => {
                tracing::error!("memory storage lock -> {:?}", error);

                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LocalStorage for MemoryStorage {
    fn set_item(&self, key: &str, value: &str) -> Result<(), AuthenticationError> {
        let mut items = match self.items.lock() {
            Ok(items) => items,
            Err(error) => {
                tracing::error!("memory storage lock -> {:?}", error);

                return Err(AuthenticationError {
                    error: AuthenticationErrorType::UnknownError,
                });
            }
        };

        if let Some(quota) = self.quota {
            let used: usize = items
                .iter()
                .filter(|(stored_key, _)| stored_key.as_str() != key)
                .map(|(stored_key, stored_value)| stored_key.len() + stored_value.len())
                .sum();

            if used + key.len() + value.len() > quota {
                return Err(AuthenticationError {
                    error: AuthenticationErrorType::QuotaExceededError,
                });
            }
        }

        items.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}
