//! spurt-channel-core: category selection for the channel builder, in pure Rust.
//!
//! This crate provides:
//! - `SelectionSet` - insertion-ordered, duplicate-free category list
//! - `ProcessingGuard` - drop-on-contention re-entrancy guard
//! - `SelectionManager` - guarded owner of the selection with change subscriptions
//! - `SelectionController` - the four channel builder bindings over any `EventBus`
//! - `ChannelConfig` - selectors and attribute names for the bindings
//!
//! Nothing here touches the DOM; see `spurt-channel-browser` for that.

pub mod config;
pub mod error;
pub mod guard;
pub mod label;
pub mod manager;
pub mod platform;
pub mod selection;
pub mod trigger;
pub mod types;

pub use config::ChannelConfig;
pub use error::SelectionError;
pub use guard::{GuardState, GuardToken, ProcessingGuard};
pub use label::{LEADING_CHAR_MESSAGE, validate_label};
pub use manager::{Dispatch, SelectionManager, SelectionTxn, SubscriptionId};
pub use platform::{Binding, EventBus, TriggerHandler, TriggerTarget};
pub use selection::SelectionSet;
pub use smol_str::SmolStr;
pub use trigger::{Intent, SelectionController, TriggerKind, TriggerOutcome, handle_trigger};
pub use types::{CategoryId, SelectionChange};
