//! Placement algorithms. Everything in here works in millimetres; the
//! [`Sink`] scales to model units when a piece is emitted.
//!
//! Axes: X left/right, Y up, Z towards the viewer. The body footprint is
//! centred on X/Z; Y = 0 is the ground under any support structure.

mod carcass;
mod desk;
mod fill;
mod shelving;
mod support;
mod zoned;

use crate::normalize::normalize_dims_mm;
use crate::piece::{CutlistRow, Derived, Piece, Role};
use crate::spec::{Body, FurnitureSpec};

/// Distance the back panel sits forward of the rear edge.
pub(crate) const BACK_CLEARANCE_MM: f64 = 0.5;
/// Reveal between adjacent fronts (doors, drawer faces).
pub(crate) const FRONT_GAP_MM: f64 = 2.0;
/// Nominal section of a square leg.
pub(crate) const LEG_NOMINAL_MM: f64 = 50.0;
/// Distance of a desk skirt from the rear edge.
pub(crate) const SKIRT_SETBACK_MM: f64 = 50.0;
/// No emitted extent goes below this.
pub(crate) const MIN_EXTENT_MM: f64 = 0.1;
/// Slack when comparing stacked millimetre heights.
pub(crate) const STACK_EPS_MM: f64 = 1e-6;

/// Open interior between panel inner faces. `front` is the Z plane behind
/// inset fronts; `depth` runs backwards from there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Cavity {
    pub x: f64,
    pub width: f64,
    pub bottom: f64,
    pub height: f64,
    pub front: f64,
    pub depth: f64,
}

impl Cavity {
    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    /// Band `[bottom, bottom + height)` of this cavity.
    pub fn band(&self, bottom: f64, height: f64) -> Cavity {
        Cavity {
            bottom,
            height: height.max(0.0),
            ..*self
        }
    }

    /// Column of `width` centred on `x`.
    pub fn column(&self, x: f64, width: f64) -> Cavity {
        Cavity {
            x,
            width: width.max(0.0),
            ..*self
        }
    }
}

/// "Upper left" + "shelf 2" -> "Upper left shelf 2"; empty prefix -> "Shelf 2".
pub(crate) fn label(prefix: &str, what: &str) -> String {
    if prefix.is_empty() {
        let mut cs = what.chars();
        match cs.next() {
            Some(c) => c.to_uppercase().chain(cs).collect(),
            None => String::new(),
        }
    } else {
        format!("{prefix} {what}")
    }
}

/// Collects pieces and their cut-list rows in creation order.
pub(crate) struct Sink<'a> {
    pub spec: &'a FurnitureSpec,
    scale: f64,
    out: Derived,
}

impl<'a> Sink<'a> {
    pub fn new(spec: &'a FurnitureSpec, scale: f64) -> Self {
        Self {
            spec,
            scale,
            out: Derived::default(),
        }
    }

    pub fn t(&self) -> f64 {
        self.spec.thickness
    }

    /// Emit a box given in millimetres.
    pub fn push(&mut self, role: Role, label: impl Into<String>, size: [f64; 3], center: [f64; 3]) {
        let label = label.into();
        let size = size.map(|v| if v.is_finite() { v.max(MIN_EXTENT_MM) } else { MIN_EXTENT_MM });
        let center = center.map(|v| if v.is_finite() { v } else { 0.0 });
        let dims = normalize_dims_mm(size, self.spec.thickness);
        self.out.cutlist.push(CutlistRow {
            label: label.clone(),
            role,
            width_mm: dims.width_mm,
            length_mm: dims.length_mm,
            thickness_mm: dims.thickness_mm,
            material: self.spec.material_for(role).to_string(),
        });
        self.out.pieces.push(Piece {
            size: size.map(|v| v * self.scale),
            center: center.map(|v| v * self.scale),
            role,
            label,
        });
    }

    pub fn finish(self) -> Derived {
        self.out
    }
}

pub(crate) fn build(spec: &FurnitureSpec, scale: f64) -> Derived {
    let mut sink = Sink::new(spec, scale);
    let lift = spec.support_height();
    match &spec.body {
        Body::Shelving(s) => shelving::build(&mut sink, s, lift),
        Body::Desk(d) => desk::build(&mut sink, d, lift),
        Body::Zoned(z) => zoned::build(&mut sink, z, lift),
    }
    support::build(&mut sink, lift);
    sink.finish()
}
