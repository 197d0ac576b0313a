//! Channel builder configuration: which DOM hooks the bindings listen on.
//!
//! Defaults match the markup the channel builder templates render, so most
//! hosts construct this with `ChannelConfig::default()`. Hosts with custom
//! templates pass a partial object; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::SelectionError;
use crate::platform::Binding;
use crate::trigger::TriggerKind;

pub const DEFAULT_EVENT: &str = "click";
pub const DEFAULT_CATEGORY_ATTRIBUTE: &str = "data-categoryid";
pub const DEFAULT_SELECT_BUTTON: &str = ".category-select-btn";
pub const DEFAULT_UNSELECT_BUTTON: &str = ".category-unselect-btn";
pub const DEFAULT_SELECT_ROW: &str = ".categorypdiv";
pub const DEFAULT_SELECTED_ROW: &str = ".selectedcategorydiv";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelConfig {
    /// DOM event every binding listens to.
    pub event: SmolStr,
    /// Attribute holding the category identifier.
    pub category_attribute: SmolStr,
    /// Button that adds its category.
    pub select_button: SmolStr,
    /// Button that removes its category.
    pub unselect_button: SmolStr,
    /// Row wrapping a select button.
    pub select_row: SmolStr,
    /// Row wrapping an unselect button.
    pub selected_row: SmolStr,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            event: SmolStr::new_static(DEFAULT_EVENT),
            category_attribute: SmolStr::new_static(DEFAULT_CATEGORY_ATTRIBUTE),
            select_button: SmolStr::new_static(DEFAULT_SELECT_BUTTON),
            unselect_button: SmolStr::new_static(DEFAULT_UNSELECT_BUTTON),
            select_row: SmolStr::new_static(DEFAULT_SELECT_ROW),
            selected_row: SmolStr::new_static(DEFAULT_SELECTED_ROW),
        }
    }
}

impl ChannelConfig {
    /// Reject configs that would bind to nothing.
    pub fn validate(&self) -> Result<(), SelectionError> {
        let fields: [(&'static str, &SmolStr); 6] = [
            ("event", &self.event),
            ("categoryAttribute", &self.category_attribute),
            ("selectButton", &self.select_button),
            ("unselectButton", &self.unselect_button),
            ("selectRow", &self.select_row),
            ("selectedRow", &self.selected_row),
        ];

        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(SelectionError::InvalidConfig {
                    field,
                    reason: "must not be empty",
                });
            }
        }

        if self.event.chars().any(char::is_whitespace) {
            return Err(SelectionError::InvalidConfig {
                field: "event",
                reason: "must be a single event name",
            });
        }
        if self.category_attribute.chars().any(char::is_whitespace) {
            return Err(SelectionError::InvalidConfig {
                field: "categoryAttribute",
                reason: "must be a single attribute name",
            });
        }

        Ok(())
    }

    /// Selector the binding for `kind` listens on.
    pub fn selector(&self, kind: TriggerKind) -> &SmolStr {
        match kind {
            TriggerKind::SelectButton => &self.select_button,
            TriggerKind::UnselectButton => &self.unselect_button,
            TriggerKind::SelectRow => &self.select_row,
            TriggerKind::SelectedRow => &self.selected_row,
        }
    }

    /// Descendant that carries the identifier for `kind`, if not the element itself.
    ///
    /// Rows carry no identifier of their own; they read it from the button
    /// they wrap.
    pub fn nested_selector(&self, kind: TriggerKind) -> Option<&SmolStr> {
        match kind {
            TriggerKind::SelectButton | TriggerKind::UnselectButton => None,
            TriggerKind::SelectRow => Some(&self.select_button),
            TriggerKind::SelectedRow => Some(&self.unselect_button),
        }
    }

    pub fn binding(&self, kind: TriggerKind) -> Binding {
        Binding {
            kind,
            event: self.event.clone(),
            selector: self.selector(kind).clone(),
            nested: self.nested_selector(kind).cloned(),
            attribute: self.category_attribute.clone(),
        }
    }

    /// All four bindings, in registration order.
    pub fn bindings(&self) -> Vec<Binding> {
        TriggerKind::ALL.iter().map(|&kind| self.binding(kind)).collect()
    }
}
