use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use trilha_engine::{keys, ProgressStore, StoreError};

/// How many parent frames to search before declaring standalone mode.
const MAX_PARENT_HOPS: usize = 7;

/// Raw handle to a discovered SCORM 1.2 API object.
pub struct ScormApi {
    api: JsValue,
}

impl ScormApi {
    /// Walk up the frame hierarchy looking for a global `API` object.
    /// Not finding one is the normal standalone case, not an error.
    pub fn discover() -> Option<Self> {
        let window = web_sys::window()?;
        let mut frame: JsValue = window.into();
        for _ in 0..=MAX_PARENT_HOPS {
            let api = Reflect::get(&frame, &JsValue::from_str("API")).ok()?;
            if !api.is_undefined() && !api.is_null() {
                return Some(Self { api });
            }
            let parent = Reflect::get(&frame, &JsValue::from_str("parent")).ok()?;
            if parent.is_undefined() || parent.is_null() || Object::is(&parent, &frame) {
                break;
            }
            frame = parent;
        }
        None
    }

    fn call(&self, method: &str, args: &[&str]) -> Option<JsValue> {
        let func = Reflect::get(&self.api, &JsValue::from_str(method)).ok()?;
        let func: Function = func.dyn_into().ok()?;
        let array = Array::new();
        for arg in args {
            array.push(&JsValue::from_str(arg));
        }
        func.apply(&self.api, &array).ok()
    }

    fn call_bool(&self, method: &str, args: &[&str]) -> bool {
        self.call(method, args)
            .and_then(|v| v.as_string())
            .is_some_and(|s| s == "true")
    }

    pub fn initialize(&self) -> bool {
        self.call_bool("LMSInitialize", &[""])
    }

    /// `LMSGetValue`; an empty string means "never set".
    pub fn get_value(&self, element: &str) -> Option<String> {
        self.call("LMSGetValue", &[element])
            .and_then(|v| v.as_string())
            .filter(|s| !s.is_empty())
    }

    /// `LMSSetValue` followed by an immediate `LMSCommit`, so a crash or
    /// forced unload cannot lose the write.
    pub fn set_value(&self, element: &str, value: &str) -> bool {
        let ok = self.call_bool("LMSSetValue", &[element, value]);
        let _ = self.call("LMSCommit", &[""]);
        ok
    }

    pub fn finish(&self) {
        let _ = self.call("LMSFinish", &[""]);
    }
}

/// Progress store backed by the LMS bridge.
pub struct ScormStore {
    api: ScormApi,
}

impl ScormStore {
    /// Discover and handshake. `None` triggers the local-storage fallback.
    pub fn connect() -> Option<Self> {
        let api = ScormApi::discover()?;
        if !api.initialize() {
            log::warn!("LMS API found but LMSInitialize failed; falling back");
            return None;
        }
        // First launch: move status off "not attempted".
        if api.get_value(keys::LESSON_STATUS).as_deref() == Some(keys::status::NOT_ATTEMPTED) {
            api.set_value(keys::LESSON_STATUS, keys::status::INCOMPLETE);
        }
        log::info!("SCORM bridge initialized");
        Some(Self { api })
    }
}

impl ProgressStore for ScormStore {
    fn restore(&self) -> Option<String> {
        self.api.get_value(keys::LESSON_LOCATION)
    }

    fn save(&mut self, page_id: &str, is_final: bool) -> Result<(), StoreError> {
        if !self.api.set_value(keys::LESSON_LOCATION, page_id) {
            return Err(StoreError::WriteRejected {
                key: keys::LESSON_LOCATION.to_string(),
            });
        }
        if is_final && !self.api.set_value(keys::LESSON_STATUS, keys::status::COMPLETED) {
            return Err(StoreError::WriteRejected {
                key: keys::LESSON_STATUS.to_string(),
            });
        }
        Ok(())
    }

    fn finish(&mut self) {
        self.api.finish();
    }
}
