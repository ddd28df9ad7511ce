//! JSON in, JSON out. Kept free of wasm-bindgen types so it runs in native
//! tests.

use cutlist_core::{aggregate, build_cutsheet_svg};
use furniture_core::{BodyType, FurnitureSpec, SpecError, normalize_dims_mm};

pub fn derive_json(config_json: &str) -> Result<String, SpecError> {
    let spec = FurnitureSpec::from_json(config_json)?;
    let out = furniture_core::derive(&spec);
    Ok(serde_json::to_string(&out)?)
}

pub fn normalize_json(a: f64, b: f64, c: f64, hint: f64) -> Result<String, SpecError> {
    Ok(serde_json::to_string(&normalize_dims_mm([a, b, c], hint))?)
}

/// Fully populated raw config for `body_type` (unknown keys give shelving),
/// meant to seed the configuration form.
pub fn default_config_json(body_type: &str) -> Result<String, SpecError> {
    let kind = BodyType::from_key(body_type).unwrap_or(BodyType::Shelving);
    let cfg = FurnitureSpec::default().with_body_type(kind).to_config();
    Ok(serde_json::to_string(&cfg)?)
}

pub fn summary_json(config_json: &str) -> Result<String, SpecError> {
    let spec = FurnitureSpec::from_json(config_json)?;
    let out = furniture_core::derive(&spec);
    Ok(serde_json::to_string(&aggregate(&out.cutlist))?)
}

pub fn cutsheet_svg(config_json: &str, px_per_mm: f64) -> Result<String, SpecError> {
    let spec = FurnitureSpec::from_json(config_json)?;
    let out = furniture_core::derive(&spec);
    let (svg, _, _) = build_cutsheet_svg(&aggregate(&out.cutlist), px_per_mm);
    Ok(svg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn derive_returns_pieces_and_cutlist() {
        let txt = derive_json(r#"{"bodyType":"shelving","shelving":{"shelfCount":2}}"#).unwrap();
        let v: Value = serde_json::from_str(&txt).unwrap();
        assert_eq!(v["pieces"].as_array().unwrap().len(), 7);
        assert_eq!(v["cutlist"].as_array().unwrap().len(), 7);
        assert_eq!(v["pieces"][0]["label"], "Left side");
    }

    #[test]
    fn broken_json_is_an_error() {
        assert!(derive_json("{").is_err());
        assert!(summary_json("not json").is_err());
    }

    #[test]
    fn normalize_reports_panel_terms() {
        let v: Value = serde_json::from_str(&normalize_json(600.4, 17.8, 1799.6, 18.0).unwrap()).unwrap();
        assert_eq!(v["thicknessMm"], 18.0);
        assert_eq!(v["widthMm"], 600.0);
        assert_eq!(v["lengthMm"], 1800.0);
    }

    #[test]
    fn default_config_round_trips() {
        for key in ["shelving", "escritorio", "zoned", "whatever"] {
            let txt = default_config_json(key).unwrap();
            let spec = FurnitureSpec::from_json(&txt).unwrap();
            let kind = BodyType::from_key(key).unwrap_or(BodyType::Shelving);
            assert_eq!(spec, FurnitureSpec::default().with_body_type(kind), "{key}");
        }
    }

    #[test]
    fn summary_merges_shelves() {
        let txt = summary_json(r#"{"shelving":{"shelfCount":4}}"#).unwrap();
        let v: Value = serde_json::from_str(&txt).unwrap();
        let shelf = v["lines"]
            .as_array()
            .unwrap()
            .iter()
            .find(|l| l["part"] == "Shelf")
            .unwrap();
        assert_eq!(shelf["quantity"], 4);
    }

    #[test]
    fn cutsheet_is_svg() {
        let svg = cutsheet_svg("{}", 4.0).unwrap();
        assert!(svg.contains("<svg"));
    }
}
