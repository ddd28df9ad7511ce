//! Parametric furniture geometry.
//!
//! A [`FurnitureSpec`] describes one piece of furniture; [`derive`] turns it
//! into positioned boxes for the 3D viewer plus a cut-list for the workshop.
//! Nothing in here does I/O and nothing can fail once a spec exists.

pub mod config;
pub mod error;
mod layout;
pub mod normalize;
pub mod piece;
pub mod spec;

pub use config::FurnitureConfig;
pub use error::SpecError;
pub use normalize::{NormalizedDims, normalize_dims_mm};
pub use piece::{CutlistRow, Derived, Piece, Role};
pub use spec::{
    BackMode, Body, BodyType, BlockContent, Desk, DeskSide, DoorConfig, FurnitureSpec,
    OpenSupport, Plinth, Shelving, SideContent, SupportMode, ZoneBlock, ZoneBlocks, ZoneLayout,
    Zoned,
};

/// Model units per millimetre. The viewer works in metres.
pub const UNITS_PER_MM: f64 = 0.001;

/// Derive the piece list and cut-list using [`UNITS_PER_MM`].
pub fn derive(spec: &FurnitureSpec) -> Derived {
    derive_with_scale(spec, UNITS_PER_MM)
}

/// Derive with an explicit mm -> model-unit factor. A non-finite or
/// non-positive scale falls back to [`UNITS_PER_MM`].
pub fn derive_with_scale(spec: &FurnitureSpec, units_per_mm: f64) -> Derived {
    let scale = if units_per_mm.is_finite() && units_per_mm > 0.0 {
        units_per_mm
    } else {
        UNITS_PER_MM
    };
    let out = layout::build(spec, scale);
    log::debug!(
        "derived {:?}: {} pieces",
        spec.body_type(),
        out.pieces.len()
    );
    out
}
