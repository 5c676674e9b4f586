use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

/// A persistence write was rejected by the backing store. Logged and
/// non-fatal: in-memory navigation state stays authoritative for the session.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store rejected write of {key}")]
    WriteRejected { key: String },
}

/// Abstracted persistence for course position and completion.
///
/// Backed by the LMS bridge when the handshake succeeds, by on-device storage
/// otherwise; the two are indistinguishable to the navigation machine.
/// Implementations must never lower completion: once the course is marked
/// complete, a later `save` with `is_final == false` keeps it complete.
pub trait ProgressStore {
    /// Last-saved page id, or None if never saved.
    fn restore(&self) -> Option<String>;

    /// Persist `page_id` as the current location; when `is_final`, also mark
    /// the course completed. Every write is flushed immediately.
    fn save(&mut self, page_id: &str, is_final: bool) -> Result<(), StoreError>;

    /// Teardown hook (maps to `LMSFinish` on a bridge). Default: nothing.
    fn finish(&mut self) {}
}

#[derive(Debug, Default)]
struct MemoryInner {
    location: Option<String>,
    completed: bool,
    saves: Vec<(String, bool)>,
}

/// In-memory store: the no-persistence fallback, and the test spy — it
/// records every `save` call. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a saved location, as if restored from a previous session.
    pub fn with_location(page_id: &str) -> Self {
        let store = Self::new();
        store.inner.borrow_mut().location = Some(page_id.to_string());
        store
    }

    pub fn location(&self) -> Option<String> {
        self.inner.borrow().location.clone()
    }

    pub fn completed(&self) -> bool {
        self.inner.borrow().completed
    }

    /// All `save` calls seen, in order.
    pub fn saves(&self) -> Vec<(String, bool)> {
        self.inner.borrow().saves.clone()
    }

    pub fn save_count(&self) -> usize {
        self.inner.borrow().saves.len()
    }
}

impl ProgressStore for MemoryStore {
    fn restore(&self) -> Option<String> {
        self.location()
    }

    fn save(&mut self, page_id: &str, is_final: bool) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.location = Some(page_id.to_string());
        if is_final {
            inner.completed = true;
        }
        inner.saves.push((page_id.to_string(), is_final));
        Ok(())
    }
}
