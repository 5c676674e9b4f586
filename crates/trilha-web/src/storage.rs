use trilha_engine::{keys, ProgressStore, StoreError};

/// Key-value access to `window.localStorage`, used both as the progress
/// fallback when no LMS bridge exists and for the ancillary keys (language,
/// badges, tutorial flag).
#[derive(Clone)]
pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    /// `None` when localStorage is unavailable (e.g. blocked by the browser).
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    pub fn set(&self, key: &str, value: &str) -> bool {
        self.storage.set_item(key, value).is_ok()
    }
}

impl ProgressStore for LocalStore {
    fn restore(&self) -> Option<String> {
        self.get(keys::LOCAL_LOCATION).filter(|s| !s.is_empty())
    }

    fn save(&mut self, page_id: &str, is_final: bool) -> Result<(), StoreError> {
        if !self.set(keys::LOCAL_LOCATION, page_id) {
            return Err(StoreError::WriteRejected {
                key: keys::LOCAL_LOCATION.to_string(),
            });
        }
        if is_final && !self.set(keys::LOCAL_STATUS, keys::status::COMPLETED) {
            return Err(StoreError::WriteRejected {
                key: keys::LOCAL_STATUS.to_string(),
            });
        }
        Ok(())
    }
}
