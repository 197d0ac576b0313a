//! Trigger bindings: turning UI events into guarded selection changes.
//!
//! The channel builder exposes four ways to change the selection:
//!
//! | Kind             | Default selector          | Identifier read from      |
//! |------------------|---------------------------|---------------------------|
//! | `SelectButton`   | `.category-select-btn`    | the button                |
//! | `UnselectButton` | `.category-unselect-btn`  | the button                |
//! | `SelectRow`      | `.categorypdiv`           | its select button         |
//! | `SelectedRow`    | `.selectedcategorydiv`    | its unselect button       |
//!
//! All four share one manager, so one guard: while any of them is running,
//! every other trigger is dropped and its event stops propagating.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::ChannelConfig;
use crate::error::SelectionError;
use crate::manager::{Dispatch, SelectionManager};
use crate::platform::{Binding, EventBus, TriggerHandler, TriggerTarget};
use crate::types::CategoryId;

/// Which binding fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerKind {
    SelectButton,
    UnselectButton,
    SelectRow,
    SelectedRow,
}

/// What a trigger does to its category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Select,
    Unselect,
}

impl TriggerKind {
    pub const ALL: [TriggerKind; 4] = [
        TriggerKind::SelectButton,
        TriggerKind::UnselectButton,
        TriggerKind::SelectRow,
        TriggerKind::SelectedRow,
    ];

    pub fn intent(self) -> Intent {
        match self {
            TriggerKind::SelectButton | TriggerKind::SelectRow => Intent::Select,
            TriggerKind::UnselectButton | TriggerKind::SelectedRow => Intent::Unselect,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TriggerKind::SelectButton => "select-button",
            TriggerKind::UnselectButton => "unselect-button",
            TriggerKind::SelectRow => "select-row",
            TriggerKind::SelectedRow => "selected-row",
        }
    }
}

impl std::fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a completed trigger did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// The category was added or removed.
    Changed,
    /// Already in the requested state.
    Unchanged,
    /// The target carried no usable identifier; nothing happened.
    MissingId,
}

/// Handle one trigger delivered for `binding`.
///
/// If the manager is busy the target is not read at all: its propagation is
/// stopped and `Dispatch::Suppressed` is returned.
pub fn handle_trigger(
    manager: &SelectionManager,
    binding: &Binding,
    target: &dyn TriggerTarget,
) -> Dispatch<TriggerOutcome> {
    let kind = binding.kind;
    let outcome = manager.dispatch_from(Some(kind), |txn| {
        let raw = target.attribute(binding.nested.as_deref(), &binding.attribute);
        let Some(id) = raw.as_deref().and_then(|raw| CategoryId::new(raw).ok()) else {
            tracing::debug!(%kind, attribute = %binding.attribute, "trigger without category id ignored");
            return (false, TriggerOutcome::MissingId);
        };

        let changed = match kind.intent() {
            Intent::Select => txn.add(id),
            Intent::Unselect => txn.remove(id.as_str()),
        };
        let outcome = if changed {
            TriggerOutcome::Changed
        } else {
            TriggerOutcome::Unchanged
        };
        (true, outcome)
    });

    if outcome.is_suppressed() {
        target.stop_propagation();
    }
    outcome
}

/// Owns the bindings that connect a manager to an event bus.
///
/// Dropping the controller drops the bus, which releases its listeners.
pub struct SelectionController<B: EventBus> {
    manager: Rc<SelectionManager>,
    bus: B,
    bindings: Vec<Binding>,
}

impl<B: EventBus> SelectionController<B> {
    /// Validate `config` and register all four bindings on `bus`.
    pub fn attach(
        manager: Rc<SelectionManager>,
        mut bus: B,
        config: &ChannelConfig,
    ) -> Result<Self, SelectionError> {
        config.validate()?;

        let bindings = config.bindings();
        for binding in &bindings {
            let handler_manager = manager.clone();
            let handler_binding = binding.clone();
            let handler: TriggerHandler = Rc::new(move |target: &dyn TriggerTarget| {
                let _ = handle_trigger(&handler_manager, &handler_binding, target);
            });
            bus.bind(binding.clone(), handler)?;
        }

        tracing::debug!(
            event = %config.event,
            bindings = bindings.len(),
            "category selection attached"
        );

        Ok(Self {
            manager,
            bus,
            bindings,
        })
    }

    pub fn manager(&self) -> &Rc<SelectionManager> {
        &self.manager
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Tear down the bindings and hand the bus back.
    pub fn detach(self) -> B {
        tracing::debug!("category selection detached");
        self.bus
    }
}
