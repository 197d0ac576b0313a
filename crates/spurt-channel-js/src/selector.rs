//! CategorySelector - the category selection handle for JavaScript.

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use spurt_channel_browser::{
    CategoryId, ChannelConfig, DocumentController, SelectionManager, SubscriptionId,
    attach_to_document,
};

use crate::types::{JsChannelConfig, JsSelectionChange};

/// Category selection for one channel builder page.
///
/// Owns the selection and, once started, the document listeners feeding it.
#[wasm_bindgen]
pub struct CategorySelector {
    manager: Rc<SelectionManager>,
    config: ChannelConfig,
    controller: Option<DocumentController>,
}

#[wasm_bindgen]
impl CategorySelector {
    /// Create a selector. `config` may be omitted to use the default selectors.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<JsChannelConfig>) -> Result<CategorySelector, JsError> {
        let config: ChannelConfig = config.unwrap_or_default().into();
        config
            .validate()
            .map_err(|e| JsError::new(&e.to_string()))?;

        Ok(Self {
            manager: SelectionManager::shared(),
            config,
            controller: None,
        })
    }

    /// Attach the click bindings to the document. Calling twice is a no-op.
    #[wasm_bindgen]
    pub fn start(&mut self) -> Result<(), JsError> {
        if self.controller.is_some() {
            return Ok(());
        }
        let controller = attach_to_document(self.manager.clone(), &self.config)
            .map_err(|e| JsError::new(&e.to_string()))?;
        self.controller = Some(controller);
        Ok(())
    }

    /// Remove the click bindings. The selection is kept.
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        if let Some(controller) = self.controller.take() {
            drop(controller.detach());
        }
    }

    #[wasm_bindgen(js_name = isStarted)]
    pub fn is_started(&self) -> bool {
        self.controller.is_some()
    }

    /// Selected category ids, in the order they were picked.
    #[wasm_bindgen]
    pub fn selected(&self) -> Vec<String> {
        self.manager
            .selected()
            .iter()
            .map(|id| id.to_string())
            .collect()
    }

    #[wasm_bindgen]
    pub fn contains(&self, id: &str) -> bool {
        self.manager.contains(id.trim())
    }

    /// Select a category from script.
    ///
    /// Returns false if the selection was busy and the call was dropped.
    #[wasm_bindgen]
    pub fn select(&self, id: &str) -> Result<bool, JsError> {
        let id = CategoryId::new(id).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(self.manager.select(id).is_completed())
    }

    /// Unselect a category from script.
    ///
    /// Returns false if the selection was busy and the call was dropped.
    #[wasm_bindgen]
    pub fn unselect(&self, id: &str) -> Result<bool, JsError> {
        let id = CategoryId::new(id).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(self.manager.unselect(id.as_str()).is_completed())
    }

    /// Register a callback receiving `{ added, removed, selected, source }`
    /// after every change. Returns a handle for `offChange`.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) -> f64 {
        let id = self.manager.subscribe(move |change| {
            let payload = JsSelectionChange::from(change);
            let value = match serde_wasm_bindgen::to_value(&payload) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("failed to serialize selection change: {}", e);
                    return;
                }
            };
            if let Err(e) = callback.call1(&JsValue::null(), &value) {
                tracing::warn!("onChange callback threw: {:?}", e);
            }
        });
        handle_to_js(id)
    }

    /// Remove a callback registered with `onChange`.
    #[wasm_bindgen(js_name = offChange)]
    pub fn off_change(&self, handle: f64) -> bool {
        match handle_from_js(handle) {
            Some(id) => self.manager.unsubscribe(id),
            None => false,
        }
    }
}

/// Largest integer a JS number holds exactly.
const MAX_SAFE_HANDLE: u64 = (1 << 53) - 1;

fn handle_to_js(id: SubscriptionId) -> f64 {
    let raw = id.as_u64();
    if raw > MAX_SAFE_HANDLE {
        tracing::warn!(raw, "subscription handle exceeds JS safe integer range");
    }
    raw as f64
}

fn handle_from_js(handle: f64) -> Option<SubscriptionId> {
    if !handle.is_finite() || handle < 0.0 || handle.fract() != 0.0 {
        return None;
    }
    let raw = handle as u64;
    (raw <= MAX_SAFE_HANDLE).then(|| SubscriptionId::from_u64(raw))
}

impl Drop for CategorySelector {
    fn drop(&mut self) {
        self.stop();
    }
}
