//! Delegated document listeners implementing the core `EventBus`.
//!
//! Each binding gets one listener on the document. When an event arrives,
//! the listener looks for the nearest ancestor of the event target matching
//! the binding's selector and, if found, hands a `DomTrigger` to the core.
//! Listeners are removed when the bus is dropped.
//!
//! Listeners are `Fn` closures. An event dispatched synchronously from inside
//! a running handler re-enters the same closure, and the manager's guard is
//! what decides to drop it.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Event};

use spurt_channel_core::{Binding, EventBus, SelectionError, TriggerHandler, TriggerTarget};

use crate::target::{DomTrigger, matched_element};

/// One registered document listener. Unregistered on drop.
struct DocumentListener {
    document: Document,
    event: String,
    callback: Closure<dyn Fn(Event)>,
}

impl Drop for DocumentListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .document
            .remove_event_listener_with_callback(&self.event, self.callback.as_ref().unchecked_ref())
        {
            tracing::warn!(event = %self.event, "failed to remove listener: {:?}", e);
        }
    }
}

pub struct DocumentEventBus {
    document: Document,
    listeners: Vec<DocumentListener>,
}

impl DocumentEventBus {
    /// Bus over an explicit document.
    pub fn new(document: Document) -> Self {
        Self {
            document,
            listeners: Vec::new(),
        }
    }

    /// Bus over the current window's document.
    pub fn for_document() -> Result<Self, SelectionError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| SelectionError::Bind {
                selector: "document".into(),
                reason: "no window document available".to_string(),
            })?;
        Ok(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl EventBus for DocumentEventBus {
    fn bind(&mut self, binding: Binding, handler: TriggerHandler) -> Result<(), SelectionError> {
        // Surface selector syntax errors now rather than on every event.
        if let Err(e) = self.document.query_selector(&binding.selector) {
            return Err(SelectionError::Bind {
                selector: binding.selector,
                reason: format!("{:?}", e),
            });
        }

        let selector = binding.selector.clone();
        let callback = Closure::<dyn Fn(Event)>::new(move |event: Event| {
            let Some(element) = matched_element(&event, &selector) else {
                return;
            };
            let trigger = DomTrigger::new(element, event);
            handler(&trigger as &dyn TriggerTarget);
        });

        let event = binding.event.to_string();
        if let Err(e) = self
            .document
            .add_event_listener_with_callback(&event, callback.as_ref().unchecked_ref())
        {
            return Err(SelectionError::Bind {
                selector: binding.selector,
                reason: format!("{:?}", e),
            });
        }

        tracing::debug!(
            kind = %binding.kind,
            event = %binding.event,
            selector = %binding.selector,
            "bound category trigger"
        );
        self.listeners.push(DocumentListener {
            document: self.document.clone(),
            event,
            callback,
        });
        Ok(())
    }
}
