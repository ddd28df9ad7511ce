//! Raw configuration as the shop UI stores it.
//!
//! Every field is optional and numeric fields are read leniently: numbers
//! pass through, numeric strings coming from form inputs are parsed, and
//! anything else is treated as missing. Use [`FurnitureConfig::resolve`]
//! (see `spec.rs`) to get a fully defaulted [`crate::FurnitureSpec`].

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureConfig {
    #[serde(default, alias = "tipo", deserialize_with = "lenient::text")]
    pub body_type: Option<String>,
    #[serde(default, alias = "ancho", deserialize_with = "lenient::number")]
    pub width: Option<f64>,
    #[serde(default, alias = "alto", deserialize_with = "lenient::number")]
    pub height: Option<f64>,
    #[serde(default, alias = "profundidad", deserialize_with = "lenient::number")]
    pub depth: Option<f64>,
    #[serde(default, alias = "espesor", deserialize_with = "lenient::number")]
    pub thickness: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub global_material: Option<String>,
    // role key -> material key
    #[serde(default, deserialize_with = "lenient::text_map")]
    pub material_by_role: Option<BTreeMap<String, String>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub support_mode: Option<String>,
    pub legs: Option<LegsConfig>,
    pub plinth: Option<PlinthConfig>,
    pub shelving: Option<ShelvingConfig>,
    pub desk: Option<DeskConfig>,
    pub zoned: Option<ZonedConfig>,
}

/// Legacy leg switch; `enabled` collapses into `supportMode = legs`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegsConfig {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub height_mm: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlinthConfig {
    #[serde(default, deserialize_with = "lenient::number")]
    pub height_mm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub inset_mm: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelvingConfig {
    #[serde(default, deserialize_with = "lenient::number")]
    pub shelf_count: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskConfig {
    #[serde(default, alias = "traseraModo", deserialize_with = "lenient::text")]
    pub back_mode: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub skirt_height_mm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub panel_height_mm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub panel_clipped_by_legs: Option<bool>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub top_overhang_mm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub legs_flush_with_top: Option<bool>,
    pub left: Option<DeskSideConfig>,
    pub right: Option<DeskSideConfig>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeskSideConfig {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub width_mm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub shelf_count: Option<f64>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub drawer_heights: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub open_support_mode: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonedConfig {
    #[serde(default, deserialize_with = "lenient::number")]
    pub upper_zone_height_mm: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub upper_layout: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub lower_layout: Option<String>,
    pub upper: Option<ZoneBlocksConfig>,
    pub lower: Option<ZoneBlocksConfig>,
}

/// Blocks of one zone: `single` is used by the single layout, `left` and
/// `right` by the split layout.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneBlocksConfig {
    pub single: Option<ZoneBlockConfig>,
    pub left: Option<ZoneBlockConfig>,
    pub right: Option<ZoneBlockConfig>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneBlockConfig {
    #[serde(default, deserialize_with = "lenient::text")]
    pub content_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub shelf_count: Option<f64>,
    pub door_config: Option<DoorConfigRaw>,
    #[serde(default, deserialize_with = "lenient::numbers")]
    pub drawer_heights: Option<Vec<f64>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorConfigRaw {
    #[serde(default, deserialize_with = "lenient::flag")]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub leaf_count: Option<f64>,
}

impl FurnitureConfig {
    pub fn from_json(txt: &str) -> Result<Self, crate::SpecError> {
        Ok(serde_json::from_str(txt)?)
    }
}

mod lenient {
    use super::*;

    fn as_number(v: &Value) -> Option<f64> {
        let x = match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
            _ => None,
        };
        x.filter(|x| x.is_finite())
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        let v = Option::<Value>::deserialize(d)?;
        Ok(v.as_ref().and_then(as_number))
    }

    pub fn numbers<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<f64>>, D::Error> {
        let v = Option::<Value>::deserialize(d)?;
        Ok(match v {
            Some(Value::Array(items)) => Some(items.iter().filter_map(as_number).collect()),
            _ => None,
        })
    }

    pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
        let v = Option::<Value>::deserialize(d)?;
        Ok(match v {
            Some(Value::Bool(b)) => Some(b),
            Some(Value::Number(n)) => n.as_f64().map(|x| x != 0.0),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "si" | "sí" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        })
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        let v = Option::<Value>::deserialize(d)?;
        Ok(match v {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        })
    }

    pub fn text_map<'de, D: Deserializer<'de>>(
        d: D,
    ) -> Result<Option<BTreeMap<String, String>>, D::Error> {
        let v = Option::<Value>::deserialize(d)?;
        Ok(match v {
            Some(Value::Object(m)) => Some(
                m.into_iter()
                    .filter_map(|(k, v)| match v {
                        Value::String(s) if !s.trim().is_empty() => Some((k, s)),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_are_accepted() {
        let c = FurnitureConfig::from_json(r#"{"width":"900","height":"1,5e3","depth":null}"#)
            .unwrap();
        assert_eq!(c.width, Some(900.0));
        assert_eq!(c.height, Some(1500.0));
        assert_eq!(c.depth, None);
    }

    #[test]
    fn garbage_values_become_missing() {
        let c = FurnitureConfig::from_json(
            r#"{"width":"abc","thickness":true,"bodyType":7,"legs":{"enabled":"yes","heightMm":[1]}}"#,
        )
        .unwrap();
        assert_eq!(c.width, None);
        assert_eq!(c.thickness, None);
        assert_eq!(c.body_type, None);
        let legs = c.legs.unwrap();
        assert_eq!(legs.enabled, Some(true));
        assert_eq!(legs.height_mm, None);
    }

    #[test]
    fn drawer_heights_skip_unparseable_entries() {
        let c = FurnitureConfig::from_json(
            r#"{"desk":{"left":{"drawerHeights":[160,"x","200",null]}}}"#,
        )
        .unwrap();
        let left = c.desk.unwrap().left.unwrap();
        assert_eq!(left.drawer_heights, Some(vec![160.0, 200.0]));
    }

    #[test]
    fn back_mode_spanish_alias() {
        let c = FurnitureConfig::from_json(r#"{"desk":{"traseraModo":"panel"}}"#).unwrap();
        assert_eq!(c.desk.unwrap().back_mode.as_deref(), Some("panel"));
    }

    #[test]
    fn material_map_drops_non_strings() {
        let c = FurnitureConfig::from_json(
            r#"{"materialByRole":{"top":"roble","legs":3,"fronts":""}}"#,
        )
        .unwrap();
        let m = c.material_by_role.unwrap();
        assert_eq!(m.len(), 1);
        assert_eq!(m.get("top").map(String::as_str), Some("roble"));
    }

    #[test]
    fn broken_json_is_an_error() {
        assert!(FurnitureConfig::from_json("{\"width\":").is_err());
    }
}
