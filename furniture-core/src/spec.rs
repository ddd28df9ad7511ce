//! Resolved furniture description.
//!
//! [`FurnitureSpec`] is what the deriver consumes: every default applied,
//! every number finite and clamped, exactly one body sub-configuration.

use std::collections::BTreeMap;

use crate::config::{
    DeskConfig, DeskSideConfig, DoorConfigRaw, FurnitureConfig, LegsConfig, PlinthConfig,
    ShelvingConfig, ZoneBlockConfig, ZoneBlocksConfig, ZonedConfig,
};
use crate::error::SpecError;
use crate::piece::Role;

pub const DEFAULT_WIDTH_MM: f64 = 800.0;
pub const DEFAULT_HEIGHT_MM: f64 = 1800.0;
pub const DEFAULT_DEPTH_MM: f64 = 350.0;
pub const DEFAULT_THICKNESS_MM: f64 = 18.0;
pub const DEFAULT_MATERIAL: &str = "melamina_blanca";
/// Legs never inherit the board material.
pub const DEFAULT_LEGS_MATERIAL: &str = "aluminio";
pub const DEFAULT_LEGS_HEIGHT_MM: f64 = 100.0;
pub const DEFAULT_PLINTH_HEIGHT_MM: f64 = 80.0;
pub const DEFAULT_PLINTH_INSET_MM: f64 = 40.0;
pub const DEFAULT_SHELF_COUNT: u32 = 3;
pub const DEFAULT_DRAWER_HEIGHTS_MM: [f64; 3] = [160.0, 160.0, 220.0];
/// Upper bound for shelf and leaf counts.
pub const MAX_COUNT: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyType {
    Shelving,
    Desk,
    Zoned,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupportMode {
    None,
    Legs,
    Plinth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackMode {
    Skirt,
    Panel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SideContent {
    Drawers,
    Shelving,
    Open,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenSupport {
    Panel,
    Frame,
    Legs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneLayout {
    Single,
    Split,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockContent {
    Open,
    Shelving,
    Doors,
    /// Only honoured in lower zones.
    Drawers,
}

fn lower(s: &str) -> String {
    s.trim().to_lowercase()
}

impl BodyType {
    pub fn key(self) -> &'static str {
        match self {
            BodyType::Shelving => "shelving",
            BodyType::Desk => "desk",
            BodyType::Zoned => "zoned",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match lower(s).as_str() {
            "shelving" | "estanteria" | "estantería" => Some(BodyType::Shelving),
            "desk" | "escritorio" => Some(BodyType::Desk),
            "zoned" | "zonedmodule" | "zoned_module" | "modulo" | "módulo" => {
                Some(BodyType::Zoned)
            }
            _ => None,
        }
    }
}

impl SupportMode {
    pub fn key(self) -> &'static str {
        match self {
            SupportMode::None => "none",
            SupportMode::Legs => "legs",
            SupportMode::Plinth => "plinth",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match lower(s).as_str() {
            "none" | "ninguno" => Some(SupportMode::None),
            "legs" | "patas" => Some(SupportMode::Legs),
            "plinth" | "zocalo" | "zócalo" => Some(SupportMode::Plinth),
            _ => None,
        }
    }
}

impl BackMode {
    pub fn key(self) -> &'static str {
        match self {
            BackMode::Skirt => "skirt",
            BackMode::Panel => "panel",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match lower(s).as_str() {
            "skirt" | "faldon" | "faldón" => Some(BackMode::Skirt),
            "panel" | "placa" => Some(BackMode::Panel),
            _ => None,
        }
    }
}

impl SideContent {
    pub fn key(self) -> &'static str {
        match self {
            SideContent::Drawers => "drawers",
            SideContent::Shelving => "shelving",
            SideContent::Open => "open",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match lower(s).as_str() {
            "drawers" | "cajones" => Some(SideContent::Drawers),
            "shelving" | "shelves" | "estantes" => Some(SideContent::Shelving),
            "open" | "abierto" | "vacio" | "vacío" => Some(SideContent::Open),
            _ => None,
        }
    }
}

impl OpenSupport {
    pub fn key(self) -> &'static str {
        match self {
            OpenSupport::Panel => "panel",
            OpenSupport::Frame => "frame",
            OpenSupport::Legs => "legs",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match lower(s).as_str() {
            "panel" | "placa" => Some(OpenSupport::Panel),
            "frame" | "marco" => Some(OpenSupport::Frame),
            "legs" | "patas" => Some(OpenSupport::Legs),
            _ => None,
        }
    }
}

impl ZoneLayout {
    pub fn key(self) -> &'static str {
        match self {
            ZoneLayout::Single => "single",
            ZoneLayout::Split => "split",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match lower(s).as_str() {
            "single" | "unico" | "único" => Some(ZoneLayout::Single),
            "split" | "dividido" => Some(ZoneLayout::Split),
            _ => None,
        }
    }
}

impl BlockContent {
    pub fn key(self) -> &'static str {
        match self {
            BlockContent::Open => "open",
            BlockContent::Shelving => "shelving",
            BlockContent::Doors => "doors",
            BlockContent::Drawers => "drawers",
        }
    }

    pub fn from_key(s: &str) -> Option<Self> {
        match lower(s).as_str() {
            "open" | "abierto" | "vacio" | "vacío" => Some(BlockContent::Open),
            "shelving" | "shelves" | "estantes" => Some(BlockContent::Shelving),
            "doors" | "puertas" => Some(BlockContent::Doors),
            "drawers" | "cajones" => Some(BlockContent::Drawers),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FurnitureSpec {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub thickness: f64,
    pub global_material: String,
    pub material_by_role: BTreeMap<Role, String>,
    pub support: SupportMode,
    pub legs_height: f64,
    pub plinth: Plinth,
    pub body: Body,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plinth {
    pub height: f64,
    pub inset: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    Shelving(Shelving),
    Desk(Desk),
    Zoned(Zoned),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shelving {
    pub shelf_count: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Desk {
    pub back_mode: BackMode,
    pub skirt_height: f64,
    /// 0 fills the whole gap under the top.
    pub panel_height: f64,
    pub panel_clipped_by_legs: bool,
    pub top_overhang: f64,
    pub legs_flush_with_top: bool,
    pub left: DeskSide,
    pub right: DeskSide,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeskSide {
    pub active: bool,
    pub width: f64,
    pub content: SideContent,
    pub shelf_count: u32,
    pub drawer_heights: Vec<f64>,
    pub open_support: OpenSupport,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Zoned {
    pub upper_zone_height: f64,
    pub upper_layout: ZoneLayout,
    pub lower_layout: ZoneLayout,
    pub upper: ZoneBlocks,
    pub lower: ZoneBlocks,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ZoneBlocks {
    pub single: ZoneBlock,
    pub left: ZoneBlock,
    pub right: ZoneBlock,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ZoneBlock {
    pub content: BlockContent,
    pub shelf_count: u32,
    pub doors: DoorConfig,
    pub drawer_heights: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorConfig {
    pub active: bool,
    pub leaf_count: u32,
}

impl Default for Shelving {
    fn default() -> Self {
        Self {
            shelf_count: DEFAULT_SHELF_COUNT,
        }
    }
}

impl Default for DeskSide {
    fn default() -> Self {
        Self {
            active: false,
            width: 400.0,
            content: SideContent::Drawers,
            shelf_count: 2,
            drawer_heights: DEFAULT_DRAWER_HEIGHTS_MM.to_vec(),
            open_support: OpenSupport::Panel,
        }
    }
}

impl Default for Desk {
    fn default() -> Self {
        Self {
            back_mode: BackMode::Skirt,
            skirt_height: 100.0,
            panel_height: 0.0,
            panel_clipped_by_legs: true,
            top_overhang: 20.0,
            legs_flush_with_top: false,
            left: DeskSide::default(),
            right: DeskSide::default(),
        }
    }
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            active: false,
            leaf_count: 2,
        }
    }
}

impl Default for ZoneBlock {
    fn default() -> Self {
        Self {
            content: BlockContent::Open,
            shelf_count: 1,
            doors: DoorConfig::default(),
            drawer_heights: DEFAULT_DRAWER_HEIGHTS_MM.to_vec(),
        }
    }
}

impl Default for ZoneBlocks {
    fn default() -> Self {
        Self {
            single: ZoneBlock::default(),
            left: ZoneBlock::default(),
            right: ZoneBlock::default(),
        }
    }
}

impl Default for Zoned {
    fn default() -> Self {
        Self {
            upper_zone_height: 900.0,
            upper_layout: ZoneLayout::Single,
            lower_layout: ZoneLayout::Single,
            upper: ZoneBlocks::default(),
            lower: ZoneBlocks::default(),
        }
    }
}

impl Body {
    pub fn default_for(kind: BodyType) -> Body {
        match kind {
            BodyType::Shelving => Body::Shelving(Shelving::default()),
            BodyType::Desk => Body::Desk(Desk::default()),
            BodyType::Zoned => Body::Zoned(Zoned::default()),
        }
    }

    pub fn body_type(&self) -> BodyType {
        match self {
            Body::Shelving(_) => BodyType::Shelving,
            Body::Desk(_) => BodyType::Desk,
            Body::Zoned(_) => BodyType::Zoned,
        }
    }
}

impl Default for FurnitureSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH_MM,
            height: DEFAULT_HEIGHT_MM,
            depth: DEFAULT_DEPTH_MM,
            thickness: DEFAULT_THICKNESS_MM,
            global_material: DEFAULT_MATERIAL.to_string(),
            material_by_role: BTreeMap::new(),
            support: SupportMode::None,
            legs_height: DEFAULT_LEGS_HEIGHT_MM,
            plinth: Plinth {
                height: DEFAULT_PLINTH_HEIGHT_MM,
                inset: DEFAULT_PLINTH_INSET_MM,
            },
            body: Body::Shelving(Shelving::default()),
        }
    }
}

impl FurnitureSpec {
    pub fn from_json(txt: &str) -> Result<Self, SpecError> {
        Ok(FurnitureConfig::from_json(txt)?.resolve())
    }

    pub fn body_type(&self) -> BodyType {
        self.body.body_type()
    }

    /// Same dimensions and materials, body reset to the defaults of `kind`.
    /// Switching to the current type keeps the existing sub-configuration.
    pub fn with_body_type(&self, kind: BodyType) -> FurnitureSpec {
        let mut out = self.clone();
        if out.body_type() != kind {
            out.body = Body::default_for(kind);
        }
        out
    }

    /// Material for a role: per-role override, else the global material.
    /// Legs fall back to [`DEFAULT_LEGS_MATERIAL`]; the plinth to the body
    /// material.
    pub fn material_for(&self, role: Role) -> &str {
        if let Some(m) = self.material_by_role.get(&role) {
            return m;
        }
        match role {
            Role::Legs => DEFAULT_LEGS_MATERIAL,
            Role::Plinth => self.material_for(Role::Body),
            _ => &self.global_material,
        }
    }

    /// Height the body is raised by its support structure.
    pub fn support_height(&self) -> f64 {
        match self.support {
            SupportMode::None => 0.0,
            SupportMode::Legs => self.legs_height,
            SupportMode::Plinth => self.plinth.height,
        }
    }

    /// Back to the raw shape, e.g. to seed a UI form with defaults.
    pub fn to_config(&self) -> FurnitureConfig {
        let mut cfg = FurnitureConfig {
            body_type: Some(self.body_type().key().to_string()),
            width: Some(self.width),
            height: Some(self.height),
            depth: Some(self.depth),
            thickness: Some(self.thickness),
            global_material: Some(self.global_material.clone()),
            material_by_role: Some(
                self.material_by_role
                    .iter()
                    .map(|(r, m)| (r.key().to_string(), m.clone()))
                    .collect(),
            ),
            support_mode: Some(self.support.key().to_string()),
            legs: Some(LegsConfig {
                enabled: Some(self.support == SupportMode::Legs),
                height_mm: Some(self.legs_height),
            }),
            plinth: Some(PlinthConfig {
                height_mm: Some(self.plinth.height),
                inset_mm: Some(self.plinth.inset),
            }),
            ..Default::default()
        };
        match &self.body {
            Body::Shelving(s) => {
                cfg.shelving = Some(ShelvingConfig {
                    shelf_count: Some(s.shelf_count as f64),
                })
            }
            Body::Desk(d) => {
                cfg.desk = Some(DeskConfig {
                    back_mode: Some(d.back_mode.key().to_string()),
                    skirt_height_mm: Some(d.skirt_height),
                    panel_height_mm: Some(d.panel_height),
                    panel_clipped_by_legs: Some(d.panel_clipped_by_legs),
                    top_overhang_mm: Some(d.top_overhang),
                    legs_flush_with_top: Some(d.legs_flush_with_top),
                    left: Some(side_to_config(&d.left)),
                    right: Some(side_to_config(&d.right)),
                })
            }
            Body::Zoned(z) => {
                cfg.zoned = Some(ZonedConfig {
                    upper_zone_height_mm: Some(z.upper_zone_height),
                    upper_layout: Some(z.upper_layout.key().to_string()),
                    lower_layout: Some(z.lower_layout.key().to_string()),
                    upper: Some(blocks_to_config(&z.upper)),
                    lower: Some(blocks_to_config(&z.lower)),
                })
            }
        }
        cfg
    }
}

fn side_to_config(s: &DeskSide) -> DeskSideConfig {
    DeskSideConfig {
        active: Some(s.active),
        width_mm: Some(s.width),
        content_type: Some(s.content.key().to_string()),
        shelf_count: Some(s.shelf_count as f64),
        drawer_heights: Some(s.drawer_heights.clone()),
        open_support_mode: Some(s.open_support.key().to_string()),
    }
}

fn block_to_config(b: &ZoneBlock) -> ZoneBlockConfig {
    ZoneBlockConfig {
        content_type: Some(b.content.key().to_string()),
        shelf_count: Some(b.shelf_count as f64),
        door_config: Some(DoorConfigRaw {
            active: Some(b.doors.active),
            leaf_count: Some(b.doors.leaf_count as f64),
        }),
        drawer_heights: Some(b.drawer_heights.clone()),
    }
}

fn blocks_to_config(b: &ZoneBlocks) -> ZoneBlocksConfig {
    ZoneBlocksConfig {
        single: Some(block_to_config(&b.single)),
        left: Some(block_to_config(&b.left)),
        right: Some(block_to_config(&b.right)),
    }
}

// --- resolution -----------------------------------------------------------

fn num(v: Option<f64>, default: f64) -> f64 {
    v.filter(|x| x.is_finite()).unwrap_or(default)
}

/// Non-negative length; missing or invalid reads as `default`.
fn len(v: Option<f64>, default: f64) -> f64 {
    num(v, default).max(0.0)
}

/// Outer dimension, never below 1mm.
fn dim(v: Option<f64>, default: f64) -> f64 {
    num(v, default).max(1.0)
}

fn count(v: Option<f64>, default: u32) -> u32 {
    match v.filter(|x| x.is_finite()) {
        Some(x) => {
            let n = x.floor().clamp(0.0, MAX_COUNT as f64) as u32;
            if x.floor() > MAX_COUNT as f64 {
                log::warn!("count {x} clamped to {MAX_COUNT}");
            }
            n
        }
        None => default,
    }
}

fn heights(v: &Option<Vec<f64>>) -> Vec<f64> {
    match v {
        Some(hs) => hs
            .iter()
            .copied()
            .filter(|h| h.is_finite() && *h > 0.0)
            .collect(),
        None => DEFAULT_DRAWER_HEIGHTS_MM.to_vec(),
    }
}

fn keyed<T>(v: &Option<String>, parse: fn(&str) -> Option<T>, default: T) -> T {
    match v.as_deref() {
        Some(s) => parse(s).unwrap_or_else(|| {
            log::debug!("unknown option {s:?}, using default");
            default
        }),
        None => default,
    }
}

impl FurnitureConfig {
    /// Apply every default and clamp. Never fails.
    pub fn resolve(&self) -> FurnitureSpec {
        let base = FurnitureSpec::default();
        let kind = keyed(&self.body_type, BodyType::from_key, BodyType::Shelving);

        let legs = self.legs.clone().unwrap_or_default();
        let mut support = keyed(&self.support_mode, SupportMode::from_key, SupportMode::None);
        if support == SupportMode::None && legs.enabled == Some(true) {
            support = SupportMode::Legs;
        }
        let plinth = self.plinth.clone().unwrap_or_default();

        let material_by_role = self
            .material_by_role
            .iter()
            .flatten()
            .filter_map(|(k, m)| Role::from_key(k).map(|r| (r, m.trim().to_string())))
            .collect();

        let body = match kind {
            BodyType::Shelving => Body::Shelving(resolve_shelving(self.shelving.as_ref())),
            BodyType::Desk => Body::Desk(resolve_desk(self.desk.as_ref())),
            BodyType::Zoned => Body::Zoned(resolve_zoned(self.zoned.as_ref())),
        };

        FurnitureSpec {
            width: dim(self.width, base.width),
            height: dim(self.height, base.height),
            depth: dim(self.depth, base.depth),
            thickness: dim(self.thickness, base.thickness),
            global_material: self
                .global_material
                .as_deref()
                .map(|s| s.trim().to_string())
                .unwrap_or(base.global_material),
            material_by_role,
            support,
            legs_height: len(legs.height_mm, DEFAULT_LEGS_HEIGHT_MM),
            plinth: Plinth {
                height: len(plinth.height_mm, DEFAULT_PLINTH_HEIGHT_MM),
                inset: len(plinth.inset_mm, DEFAULT_PLINTH_INSET_MM),
            },
            body,
        }
    }
}

fn resolve_shelving(c: Option<&ShelvingConfig>) -> Shelving {
    let d = Shelving::default();
    match c {
        Some(c) => Shelving {
            shelf_count: count(c.shelf_count, d.shelf_count),
        },
        None => d,
    }
}

fn resolve_desk(c: Option<&DeskConfig>) -> Desk {
    let d = Desk::default();
    let Some(c) = c else { return d };
    Desk {
        back_mode: keyed(&c.back_mode, BackMode::from_key, d.back_mode),
        skirt_height: len(c.skirt_height_mm, d.skirt_height),
        panel_height: len(c.panel_height_mm, d.panel_height),
        panel_clipped_by_legs: c.panel_clipped_by_legs.unwrap_or(d.panel_clipped_by_legs),
        top_overhang: len(c.top_overhang_mm, d.top_overhang),
        legs_flush_with_top: c.legs_flush_with_top.unwrap_or(d.legs_flush_with_top),
        left: resolve_side(c.left.as_ref()),
        right: resolve_side(c.right.as_ref()),
    }
}

fn resolve_side(c: Option<&DeskSideConfig>) -> DeskSide {
    let d = DeskSide::default();
    let Some(c) = c else { return d };
    DeskSide {
        active: c.active.unwrap_or(d.active),
        width: len(c.width_mm, d.width),
        content: keyed(&c.content_type, SideContent::from_key, d.content),
        shelf_count: count(c.shelf_count, d.shelf_count),
        drawer_heights: heights(&c.drawer_heights),
        open_support: keyed(&c.open_support_mode, OpenSupport::from_key, d.open_support),
    }
}

fn resolve_zoned(c: Option<&ZonedConfig>) -> Zoned {
    let d = Zoned::default();
    let Some(c) = c else { return d };
    Zoned {
        upper_zone_height: len(c.upper_zone_height_mm, d.upper_zone_height),
        upper_layout: keyed(&c.upper_layout, ZoneLayout::from_key, d.upper_layout),
        lower_layout: keyed(&c.lower_layout, ZoneLayout::from_key, d.lower_layout),
        upper: resolve_blocks(c.upper.as_ref()),
        lower: resolve_blocks(c.lower.as_ref()),
    }
}

fn resolve_blocks(c: Option<&ZoneBlocksConfig>) -> ZoneBlocks {
    match c {
        Some(c) => ZoneBlocks {
            single: resolve_block(c.single.as_ref()),
            left: resolve_block(c.left.as_ref()),
            right: resolve_block(c.right.as_ref()),
        },
        None => ZoneBlocks::default(),
    }
}

fn resolve_block(c: Option<&ZoneBlockConfig>) -> ZoneBlock {
    let d = ZoneBlock::default();
    let Some(c) = c else { return d };
    let doors = c.door_config.clone().unwrap_or_default();
    ZoneBlock {
        content: keyed(&c.content_type, BlockContent::from_key, d.content),
        shelf_count: count(c.shelf_count, d.shelf_count),
        doors: DoorConfig {
            active: doors.active.unwrap_or(d.doors.active),
            leaf_count: count(doors.leaf_count, d.doors.leaf_count).max(1),
        },
        drawer_heights: heights(&c.drawer_heights),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_resolves_to_defaults() {
        let s = FurnitureSpec::from_json("{}").unwrap();
        assert_eq!(s, FurnitureSpec::default());
    }

    #[test]
    fn dimensions_clamp_to_one_mm() {
        let s = FurnitureSpec::from_json(r#"{"width":-5,"height":0,"thickness":0.2}"#).unwrap();
        assert_eq!(s.width, 1.0);
        assert_eq!(s.height, 1.0);
        assert_eq!(s.thickness, 1.0);
        assert_eq!(s.depth, DEFAULT_DEPTH_MM);
    }

    #[test]
    fn counts_are_floored_and_clamped() {
        let s = FurnitureSpec::from_json(r#"{"shelving":{"shelfCount":3.9}}"#).unwrap();
        assert_eq!(s.body, Body::Shelving(Shelving { shelf_count: 3 }));
        let s = FurnitureSpec::from_json(r#"{"shelving":{"shelfCount":-2}}"#).unwrap();
        assert_eq!(s.body, Body::Shelving(Shelving { shelf_count: 0 }));
        let s = FurnitureSpec::from_json(r#"{"shelving":{"shelfCount":1e9}}"#).unwrap();
        assert_eq!(s.body, Body::Shelving(Shelving { shelf_count: MAX_COUNT }));
    }

    #[test]
    fn legacy_legs_flag_selects_legs() {
        let s = FurnitureSpec::from_json(r#"{"legs":{"enabled":true,"heightMm":120}}"#).unwrap();
        assert_eq!(s.support, SupportMode::Legs);
        assert_eq!(s.support_height(), 120.0);

        let s = FurnitureSpec::from_json(
            r#"{"supportMode":"plinth","legs":{"enabled":true}}"#,
        )
        .unwrap();
        assert_eq!(s.support, SupportMode::Plinth);
        assert_eq!(s.support_height(), DEFAULT_PLINTH_HEIGHT_MM);
    }

    #[test]
    fn spanish_option_names_resolve() {
        let s = FurnitureSpec::from_json(
            r#"{"bodyType":"escritorio","desk":{"traseraModo":"placa",
                "left":{"active":true,"contentType":"vacio","openSupportMode":"marco"}}}"#,
        )
        .unwrap();
        let Body::Desk(d) = &s.body else {
            panic!("expected desk");
        };
        assert_eq!(d.back_mode, BackMode::Panel);
        assert_eq!(d.left.content, SideContent::Open);
        assert_eq!(d.left.open_support, OpenSupport::Frame);
        assert!(!d.right.active);
    }

    #[test]
    fn unknown_options_fall_back() {
        let s = FurnitureSpec::from_json(r#"{"bodyType":"wardrobe","supportMode":"wheels"}"#)
            .unwrap();
        assert_eq!(s.body_type(), BodyType::Shelving);
        assert_eq!(s.support, SupportMode::None);
    }

    #[test]
    fn materials_fall_back_per_role() {
        let s = FurnitureSpec::from_json(
            r#"{"globalMaterial":"roble","materialByRole":{"top":"nogal","body":"pino","bogus":"x"}}"#,
        )
        .unwrap();
        assert_eq!(s.material_for(Role::Top), "nogal");
        assert_eq!(s.material_for(Role::Shelves), "roble");
        assert_eq!(s.material_for(Role::Legs), DEFAULT_LEGS_MATERIAL);
        assert_eq!(s.material_for(Role::Plinth), "pino");
        assert_eq!(s.material_by_role.len(), 2);
    }

    #[test]
    fn switching_body_type_resets_sub_config() {
        let s = FurnitureSpec::from_json(r#"{"bodyType":"zoned","width":1200,
            "zoned":{"upperZoneHeightMm":300}}"#)
        .unwrap();
        let desk = s.with_body_type(BodyType::Desk);
        assert_eq!(desk.width, 1200.0);
        assert_eq!(desk.body, Body::Desk(Desk::default()));
        let back = desk.with_body_type(BodyType::Zoned);
        assert_eq!(back.body, Body::Zoned(Zoned::default()));
        assert_eq!(s.with_body_type(BodyType::Zoned), s);
    }

    #[test]
    fn leaf_count_is_at_least_one() {
        let s = FurnitureSpec::from_json(r#"{"bodyType":"zoned","zoned":{"upper":
            {"single":{"contentType":"doors","doorConfig":{"leafCount":0}}}}}"#)
        .unwrap();
        let Body::Zoned(z) = &s.body else {
            panic!("expected zoned");
        };
        assert_eq!(z.upper.single.doors.leaf_count, 1);
        assert_eq!(z.upper.single.content, BlockContent::Doors);
    }

    #[test]
    fn config_round_trip_preserves_spec() {
        let s = FurnitureSpec::from_json(r#"{"bodyType":"desk","supportMode":"legs",
            "materialByRole":{"legs":"acero"},
            "desk":{"left":{"active":true,"drawerHeights":[100,200]}}}"#)
        .unwrap();
        let txt = serde_json::to_string(&s.to_config()).unwrap();
        assert_eq!(FurnitureSpec::from_json(&txt).unwrap(), s);
    }
}
