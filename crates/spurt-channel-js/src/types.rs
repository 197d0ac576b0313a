//! Types exposed to JavaScript via wasm-bindgen.

use serde::{Deserialize, Serialize};
use spurt_channel_browser::{ChannelConfig, SelectionChange, SmolStr};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Partial channel config; omitted fields keep their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsChannelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_attribute: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_button: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unselect_button: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub select_row: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_row: Option<String>,
}

impl From<JsChannelConfig> for ChannelConfig {
    fn from(js: JsChannelConfig) -> Self {
        let defaults = ChannelConfig::default();
        let pick = |value: Option<String>, fallback: SmolStr| {
            value.map(SmolStr::from).unwrap_or(fallback)
        };
        ChannelConfig {
            event: pick(js.event, defaults.event),
            category_attribute: pick(js.category_attribute, defaults.category_attribute),
            select_button: pick(js.select_button, defaults.select_button),
            unselect_button: pick(js.unselect_button, defaults.unselect_button),
            select_row: pick(js.select_row, defaults.select_row),
            selected_row: pick(js.selected_row, defaults.selected_row),
        }
    }
}

/// Payload passed to `onChange` callbacks.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsSelectionChange {
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub selected: Vec<String>,
    /// Binding that fired (`"select-button"`, `"selected-row"`, ...), absent
    /// for programmatic changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl From<&SelectionChange> for JsSelectionChange {
    fn from(change: &SelectionChange) -> Self {
        let strings = |ids: &[spurt_channel_browser::CategoryId]| {
            ids.iter().map(|id| id.to_string()).collect::<Vec<_>>()
        };
        Self {
            added: strings(&change.added),
            removed: strings(&change.removed),
            selected: strings(&change.selected),
            source: change.source.map(|kind| kind.as_str().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spurt_channel_browser::{CategoryId, TriggerKind};

    #[test]
    fn test_partial_config_keeps_defaults() {
        let js = JsChannelConfig {
            select_button: Some(".pick".to_string()),
            ..Default::default()
        };
        let config = ChannelConfig::from(js);
        assert_eq!(config.select_button, ".pick");
        assert_eq!(config.unselect_button, ".category-unselect-btn");
        assert_eq!(config.category_attribute, "data-categoryid");
    }

    #[test]
    fn test_change_payload() {
        let change = SelectionChange {
            added: vec![CategoryId::new("b").unwrap()],
            removed: vec![],
            selected: vec![CategoryId::new("a").unwrap(), CategoryId::new("b").unwrap()],
            source: Some(TriggerKind::SelectRow),
        };
        let js = JsSelectionChange::from(&change);
        assert_eq!(js.added, vec!["b"]);
        assert!(js.removed.is_empty());
        assert_eq!(js.selected, vec!["a", "b"]);
        assert_eq!(js.source.as_deref(), Some("select-row"));
    }
}
