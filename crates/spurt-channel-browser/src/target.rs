//! DOM implementation of `TriggerTarget`.

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, Node};

use spurt_channel_core::TriggerTarget;

/// Find the element matching `selector` that the event was delivered through.
///
/// Walks up from the event target the way delegated listeners do. Clicks on
/// text nodes start from their parent element. Returns `None` when nothing
/// on the path matches or the selector is invalid.
pub fn matched_element(event: &Event, selector: &str) -> Option<Element> {
    let target = event.target()?;
    let start = match target.dyn_into::<Element>() {
        Ok(element) => element,
        Err(other) => other.dyn_ref::<Node>()?.parent_element()?,
    };

    match start.closest(selector) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!(selector, "closest() rejected selector: {:?}", e);
            None
        }
    }
}

/// The element a binding matched, plus the event that reached it.
pub struct DomTrigger {
    element: Element,
    event: Event,
}

impl DomTrigger {
    pub fn new(element: Element, event: Event) -> Self {
        Self { element, event }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    pub fn event(&self) -> &Event {
        &self.event
    }
}

impl TriggerTarget for DomTrigger {
    fn attribute(&self, nested: Option<&str>, attribute: &str) -> Option<String> {
        let Some(selector) = nested else {
            return self.element.get_attribute(attribute);
        };

        match self.element.query_selector(selector) {
            Ok(Some(inner)) => inner.get_attribute(attribute),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(selector, "querySelector() rejected selector: {:?}", e);
                None
            }
        }
    }

    fn stop_propagation(&self) {
        self.event.stop_propagation();
    }
}
