//! Platform abstraction traits for trigger delivery.
//!
//! These traits define the interface between the selection logic and the
//! host's event system. The browser implementation registers delegated DOM
//! listeners; tests drive bindings by hand. The core never touches UI
//! toolkit APIs directly.

use std::rc::Rc;

use smol_str::SmolStr;

use crate::error::SelectionError;
use crate::trigger::TriggerKind;

/// One registration on the event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub kind: TriggerKind,
    /// Event name, e.g. `click`.
    pub event: SmolStr,
    /// Selector the event target must match (or be inside of).
    pub selector: SmolStr,
    /// Descendant of the matched element that carries the identifier.
    pub nested: Option<SmolStr>,
    /// Attribute holding the category identifier.
    pub attribute: SmolStr,
}

/// The element a trigger fired on, as seen by the core.
pub trait TriggerTarget {
    /// Read `attribute` from the matched element, or from its first
    /// descendant matching `nested` when given.
    ///
    /// Returns `None` when the element, descendant or attribute is missing.
    fn attribute(&self, nested: Option<&str>, attribute: &str) -> Option<String>;

    /// Stop the underlying event from reaching further listeners.
    fn stop_propagation(&self);
}

/// Callback the core hands to the bus for each binding.
pub type TriggerHandler = Rc<dyn Fn(&dyn TriggerTarget)>;

/// Named event bus the controller registers its bindings on.
///
/// Implementations own whatever listeners they create and release them when
/// dropped.
pub trait EventBus {
    fn bind(&mut self, binding: Binding, handler: TriggerHandler) -> Result<(), SelectionError>;
}
