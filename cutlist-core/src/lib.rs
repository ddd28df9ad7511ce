//! Workshop side of a derivation: merge identical cut-list rows, total the
//! board area per material and draw a printable cut sheet.

mod sheet;

use furniture_core::{CutlistRow, Role};
use png::{BitDepth, ColorType, Encoder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub use sheet::{DEFAULT_PX_PER_MM, DRAWING_SCALE, build_cutsheet_svg, fmt_mm};

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("png encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("pixel buffer holds {got} bytes, {width}x{height} RGBA needs {expected}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        got: usize,
    },
}

/// One line of the aggregated cut-list: `quantity` identical panels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutLine {
    pub part: String,
    pub role: Role,
    pub material: String,
    pub thickness_mm: f64,
    pub width_mm: f64,
    pub length_mm: f64,
    pub quantity: u32,
}

impl CutLine {
    /// Face area of all panels on this line, in square metres.
    pub fn area_m2(&self) -> f64 {
        self.width_mm * self.length_mm * self.quantity as f64 / 1_000_000.0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialArea {
    pub material: String,
    pub area_m2: f64,
    pub pieces: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CutSummary {
    pub lines: Vec<CutLine>,
    pub materials: Vec<MaterialArea>,
}

impl CutSummary {
    pub fn total_pieces(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// Label without its trailing ordinal: "Upper shelf 3" -> "Upper shelf".
/// Labels that are only a number are kept whole.
pub fn part_name(label: &str) -> &str {
    let label = label.trim();
    match label.rsplit_once(' ') {
        Some((head, tail))
            if !head.is_empty() && !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) =>
        {
            head
        }
        _ => label,
    }
}

fn group_key(part: &str, row: &CutlistRow) -> String {
    format!(
        "{}|{}|{}|{}x{}x{}",
        part,
        row.role.key(),
        row.material,
        row.thickness_mm,
        row.width_mm,
        row.length_mm
    )
}

/// Merge rows that share part name, role, material and dimensions.
/// Lines and materials keep the order they first appear in.
pub fn aggregate(rows: &[CutlistRow]) -> CutSummary {
    let mut lines: Vec<CutLine> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let part = part_name(&row.label);
        let key = group_key(part, row);
        if let Some(i) = index.get(&key) {
            lines[*i].quantity += 1;
        } else {
            index.insert(key, lines.len());
            lines.push(CutLine {
                part: part.to_string(),
                role: row.role,
                material: row.material.clone(),
                thickness_mm: row.thickness_mm,
                width_mm: row.width_mm,
                length_mm: row.length_mm,
                quantity: 1,
            });
        }
    }

    let mut materials: Vec<MaterialArea> = Vec::new();
    for line in &lines {
        match materials.iter_mut().find(|m| m.material == line.material) {
            Some(m) => {
                m.area_m2 += line.area_m2();
                m.pieces += line.quantity;
            }
            None => materials.push(MaterialArea {
                material: line.material.clone(),
                area_m2: line.area_m2(),
                pieces: line.quantity,
            }),
        }
    }
    log::debug!(
        "aggregated {} rows into {} lines over {} materials",
        rows.len(),
        lines.len(),
        materials.len()
    );
    CutSummary { lines, materials }
}

// Shared PNG encoder: RGBA -> PNG bytes, same bytes for the same pixels.
pub fn encode_rgba_to_png_bytes(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, SheetError> {
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(SheetError::BufferSize {
            width,
            height,
            expected,
            got: rgba.len(),
        });
    }
    let mut buf = Vec::new();
    {
        let mut enc = Encoder::new(&mut buf, width, height);
        enc.set_color(ColorType::Rgba);
        enc.set_depth(BitDepth::Eight);
        let mut writer = enc.write_header()?;
        writer.write_image_data(rgba)?;
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, role: Role, material: &str, dims: [f64; 3]) -> CutlistRow {
        CutlistRow {
            label: label.to_string(),
            role,
            thickness_mm: dims[0],
            width_mm: dims[1],
            length_mm: dims[2],
            material: material.to_string(),
        }
    }

    #[test]
    fn part_name_strips_ordinal() {
        assert_eq!(part_name("Shelf 2"), "Shelf");
        assert_eq!(part_name("Lower left drawer front 10"), "Lower left drawer front");
        assert_eq!(part_name("Left side"), "Left side");
        assert_eq!(part_name("12"), "12");
        assert_eq!(part_name("Leg 1b"), "Leg 1b");
    }

    #[test]
    fn identical_shelves_merge() {
        let rows = vec![
            row("Left side", Role::Body, "roble", [18.0, 350.0, 1800.0]),
            row("Shelf 1", Role::Shelves, "roble", [18.0, 314.0, 764.0]),
            row("Right side", Role::Body, "roble", [18.0, 350.0, 1800.0]),
            row("Shelf 2", Role::Shelves, "roble", [18.0, 314.0, 764.0]),
            row("Shelf 3", Role::Shelves, "vidrio", [18.0, 314.0, 764.0]),
        ];
        let s = aggregate(&rows);
        assert_eq!(s.lines.len(), 4);
        assert_eq!(s.lines[1].part, "Shelf");
        assert_eq!(s.lines[1].quantity, 2);
        assert_eq!(s.lines[3].material, "vidrio");
        assert_eq!(s.total_pieces(), 5);
    }

    #[test]
    fn different_sizes_stay_apart() {
        let rows = vec![
            row("Drawer front 1", Role::Fronts, "m", [18.0, 158.0, 762.0]),
            row("Drawer front 2", Role::Fronts, "m", [18.0, 158.0, 762.0]),
            row("Drawer front 3", Role::Fronts, "m", [18.0, 218.0, 762.0]),
        ];
        let s = aggregate(&rows);
        assert_eq!(s.lines.len(), 2);
        assert_eq!(s.lines[0].quantity, 2);
        assert_eq!(s.lines[1].quantity, 1);
    }

    #[test]
    fn area_per_material() {
        let rows = vec![
            row("Top", Role::Top, "roble", [18.0, 500.0, 1000.0]),
            row("Leg 1", Role::Legs, "aluminio", [50.0, 50.0, 100.0]),
            row("Base", Role::Body, "roble", [18.0, 500.0, 1000.0]),
        ];
        let s = aggregate(&rows);
        assert_eq!(s.materials.len(), 2);
        assert_eq!(s.materials[0].material, "roble");
        assert!((s.materials[0].area_m2 - 1.0).abs() < 1e-12);
        assert_eq!(s.materials[0].pieces, 2);
        assert!((s.materials[1].area_m2 - 0.005).abs() < 1e-12);
    }

    #[test]
    fn empty_input() {
        let s = aggregate(&[]);
        assert!(s.lines.is_empty());
        assert!(s.materials.is_empty());
    }

    #[test]
    fn png_is_deterministic() {
        let px = vec![255u8; 3 * 2 * 4];
        let a = encode_rgba_to_png_bytes(3, 2, &px).unwrap();
        let b = encode_rgba_to_png_bytes(3, 2, &px).unwrap();
        assert_eq!(a, b);
        assert_eq!(&a[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn png_rejects_short_buffer() {
        let err = encode_rgba_to_png_bytes(3, 2, &[0u8; 5]).unwrap_err();
        assert!(matches!(err, SheetError::BufferSize { expected: 24, .. }));
    }
}
