use serde::{Deserialize, Serialize};

/// Box extents mapped to panel terms, whole millimetres.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDims {
    pub thickness_mm: f64,
    pub width_mm: f64,
    pub length_mm: f64,
}

/// Tolerance (mm) for recognising the nominal board thickness.
pub const THICKNESS_MATCH_MM: f64 = 1.0;

/// Map three box extents to (thickness, width, length).
///
/// Extents are rounded to whole millimetres and sorted. The smallest one is
/// the thickness unless an extent lies within [`THICKNESS_MATCH_MM`] of
/// `nominal_thickness`; then that extent (the closest one if several
/// qualify) is the thickness even when it is not the smallest. Of the two
/// left, the smaller is the width and the larger the length.
pub fn normalize_dims_mm(extents: [f64; 3], nominal_thickness: f64) -> NormalizedDims {
    let mut v = extents.map(|e| if e.is_finite() { e.round() } else { 0.0 });
    v.sort_by(f64::total_cmp);

    let mut pick = 0;
    if nominal_thickness.is_finite() {
        let mut best = f64::INFINITY;
        for (i, e) in v.iter().enumerate() {
            let d = (e - nominal_thickness).abs();
            if d <= THICKNESS_MATCH_MM && d < best {
                best = d;
                pick = i;
            }
        }
    }

    let rest: Vec<f64> = (0..3).filter(|&i| i != pick).map(|i| v[i]).collect();
    NormalizedDims {
        thickness_mm: v[pick],
        width_mm: rest[0],
        length_mm: rest[1],
    }
}
