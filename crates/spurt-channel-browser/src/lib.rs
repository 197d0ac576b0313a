//! Browser DOM layer for the channel builder's category selection.
//!
//! This crate implements the core's `EventBus` and `TriggerTarget` traits on
//! top of delegated document listeners. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `bus`: `DocumentEventBus`, one delegated listener per binding
//! - `target`: `DomTrigger`, attribute lookup and propagation control
//!
//! # Re-exports
//!
//! This crate re-exports `spurt-channel-core` for convenience, so consumers
//! only need to depend on `spurt-channel-browser`.

// Re-export core crate
pub use spurt_channel_core;
pub use spurt_channel_core::*;

pub mod bus;
pub mod target;

pub use bus::DocumentEventBus;
pub use target::{DomTrigger, matched_element};

/// Controller wired to the page document.
pub type DocumentController = SelectionController<DocumentEventBus>;

/// Attach the channel builder bindings to the current document.
pub fn attach_to_document(
    manager: std::rc::Rc<SelectionManager>,
    config: &ChannelConfig,
) -> Result<DocumentController, SelectionError> {
    let bus = DocumentEventBus::for_document()?;
    SelectionController::attach(manager, bus, config)
}
