//! WASM bindings for the channel builder's category selection.
//!
//! Exposes `CategorySelector` to the admin page scripts. The module start
//! hook installs the panic hook and routes `tracing` output to the browser
//! console.

mod selector;
mod types;

pub use selector::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    init_tracing();
}

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
fn init_tracing() {
    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    // A host page may have installed its own subscriber already.
    let _ = set_global_default(Registry::default().with(wasm_layer));
}

#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
fn init_tracing() {}

/// Check a channel field label.
///
/// Returns the validation message, or `undefined` when the label is fine.
#[wasm_bindgen(js_name = validateLabel)]
pub fn validate_label(label: &str) -> Option<String> {
    spurt_channel_browser::validate_label(label)
        .err()
        .map(|e| match e {
            spurt_channel_browser::SelectionError::InvalidLabel(message) => message.to_string(),
            other => other.to_string(),
        })
}
