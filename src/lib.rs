mod app;
mod components;
mod config;
mod host;
mod json_editor;
mod links;
mod metadata;
mod models;
mod rich_text;
mod util;

use crate::app::App;
use crate::config::EnvConfig;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = EnvConfig::new();
    wasm_logger::init(wasm_logger::Config::new(config.log_level));
    log::debug!("mounting field widgets (sdk global `{}`)", config.sdk_global);

    mount_to_body(App);
}
