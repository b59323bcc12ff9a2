use folio_core::{PreferenceStore, StoreError};
use web_sys::{Storage, Window};

/// `window.localStorage`, when the browser lets us have it.
///
/// Private browsing modes and sandboxed iframes may refuse access; reads
/// then find nothing and writes report [`StoreError::Unavailable`].
#[derive(Debug, Clone)]
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn from_window(window: &Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    #[cfg(test)]
    pub fn unavailable() -> Self {
        Self { storage: None }
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let storage = self.storage.as_ref().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}
