//! Browser bindings for the furniture deriver. Every export takes and
//! returns JSON strings; the viewer does its own parsing.

pub mod api;

use furniture_core::spec::BodyType;
use js_sys::Array;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn initialize() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    init_logger();
}

#[cfg(feature = "debug_logs")]
fn init_logger() {
    use log::LevelFilter;
    use wasm_bindgen_console_logger::DEFAULT_LOGGER;
    if log::set_logger(&DEFAULT_LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }
}

#[cfg(not(feature = "debug_logs"))]
fn init_logger() {}

fn report(e: furniture_core::SpecError) -> JsError {
    log::warn!("{e}");
    JsError::new(&e.to_string())
}

/// `{ pieces, cutlist }` for a configuration document.
#[wasm_bindgen]
pub fn derive(config_json: &str) -> Result<String, JsError> {
    api::derive_json(config_json).map_err(report)
}

/// `{ thicknessMm, widthMm, lengthMm }` for three box extents.
#[wasm_bindgen]
pub fn normalize_dims(a: f64, b: f64, c: f64, thickness_hint: f64) -> Result<String, JsError> {
    api::normalize_json(a, b, c, thickness_hint).map_err(report)
}

#[wasm_bindgen]
pub fn default_config(body_type: &str) -> Result<String, JsError> {
    api::default_config_json(body_type).map_err(report)
}

/// Aggregated cut-list with per-material board area.
#[wasm_bindgen]
pub fn cutlist_summary(config_json: &str) -> Result<String, JsError> {
    api::summary_json(config_json).map_err(report)
}

#[wasm_bindgen]
pub fn cutsheet_svg(config_json: &str, px_per_mm: f64) -> Result<String, JsError> {
    api::cutsheet_svg(config_json, px_per_mm).map_err(report)
}

/// Body type keys accepted by `default_config`.
#[wasm_bindgen]
pub fn body_types() -> Array {
    [BodyType::Shelving, BodyType::Desk, BodyType::Zoned]
        .iter()
        .map(|k| JsValue::from_str(k.key()))
        .collect()
}
