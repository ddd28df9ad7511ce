use crate::{CutLine, CutSummary};

/// Sheet millimetres drawn per millimetre of panel (1:10).
pub const DRAWING_SCALE: f64 = 0.1;
pub const DEFAULT_PX_PER_MM: f64 = 4.0;

const PAD_MM: f64 = 5.0;
const GAP_MM: f64 = 3.0;
const CHAR_PX: f64 = 15.0;
const LINE_PX: f64 = 40.0;

// Near-integers print as integers, anything else with up to 3 decimals.
pub fn fmt_mm(v: f64) -> String {
    if (v - v.round()).abs() < 1e-6 {
        format!("{:.0}", v)
    } else {
        format!("{:.3}", v)
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}

fn svg_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn size_text(l: &CutLine) -> String {
    format!(
        "{} × {} × {} mm",
        fmt_mm(l.length_mm),
        fmt_mm(l.width_mm),
        fmt_mm(l.thickness_mm)
    )
}

/// Cut sheet as a table: part | qty | material | panel outline at
/// [`DRAWING_SCALE`] with its size, followed by the area per material.
/// Returns the SVG text and its pixel size.
pub fn build_cutsheet_svg(summary: &CutSummary, px_per_mm: f64) -> (String, u32, u32) {
    let px_per_mm = if px_per_mm.is_finite() && px_per_mm > 0.0 {
        px_per_mm
    } else {
        DEFAULT_PX_PER_MM
    };
    let px2mm = |px: f64| px / px_per_mm;
    let mm2px = |mm: f64| mm * px_per_mm;

    // column widths follow the longest entry
    let mut max_part = "Part".chars().count();
    let mut max_qty = "Qty".chars().count();
    let mut max_mat = "Material".chars().count();
    for l in &summary.lines {
        max_part = max_part.max(l.part.chars().count());
        max_qty = max_qty.max(l.quantity.to_string().len());
        max_mat = max_mat.max(l.material.chars().count());
    }
    let part_w_mm = px2mm((max_part as f64 * CHAR_PX).max(220.0) + 44.0);
    let qty_w_mm = px2mm((max_qty as f64 * CHAR_PX).max(40.0) + 24.0);
    let mat_w_mm = px2mm((max_mat as f64 * CHAR_PX).max(160.0) + 44.0);
    let line_mm = px2mm(LINE_PX);

    let mut row_heights: Vec<f64> = Vec::new();
    let mut gfx_w_mm: f64 = px2mm(400.0);
    for l in &summary.lines {
        let draw_w = l.length_mm * DRAWING_SCALE;
        let draw_h = l.width_mm * DRAWING_SCALE;
        let text_w = px2mm(size_text(l).chars().count() as f64 * CHAR_PX);
        gfx_w_mm = gfx_w_mm.max(draw_w + GAP_MM + text_w);
        row_heights.push(draw_h.max(line_mm));
    }

    let x_sep1 = PAD_MM + part_w_mm;
    let x_sep2 = x_sep1 + qty_w_mm;
    let x_sep3 = x_sep2 + mat_w_mm;
    let total_w_mm = x_sep3 + GAP_MM + gfx_w_mm + PAD_MM;
    let table_h_mm: f64 = line_mm + row_heights.iter().map(|h| h + 2.0 * GAP_MM).sum::<f64>();
    let total_h_mm =
        PAD_MM + table_h_mm + GAP_MM + line_mm * (summary.materials.len() as f64 + 1.0) + PAD_MM;

    let w_px = mm2px(total_w_mm).ceil() as u32;
    let h_px = mm2px(total_h_mm).ceil() as u32;

    let mut s = String::new();
    s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    s.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\" stroke=\"#333\" fill=\"none\" stroke-width=\"1.8\" stroke-linejoin=\"round\" font-family=\"sans-serif\" font-size=\"26\">\n",
        w_px, h_px, w_px, h_px
    ));
    s.push_str("<rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>\n");

    let text = |s: &mut String, x_mm: f64, y_mm: f64, anchor: &str, txt: &str| {
        s.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{}\" dominant-baseline=\"middle\" fill=\"#333\" stroke=\"none\">{}</text>\n",
            mm2px(x_mm),
            mm2px(y_mm),
            anchor,
            svg_escape(txt)
        ));
    };
    let hline = |s: &mut String, y_mm: f64| {
        s.push_str(&format!(
            "<path d=\"M {:.2} {:.2} L {:.2} {:.2}\" stroke=\"#ddd\" stroke-width=\"1\"/>\n",
            mm2px(PAD_MM),
            mm2px(y_mm),
            mm2px(total_w_mm - PAD_MM),
            mm2px(y_mm)
        ));
    };
    let vline = |s: &mut String, x_mm: f64| {
        s.push_str(&format!(
            "<path d=\"M {:.2} {:.2} L {:.2} {:.2}\" stroke=\"#ddd\" stroke-width=\"1\"/>\n",
            mm2px(x_mm),
            mm2px(PAD_MM),
            mm2px(x_mm),
            mm2px(PAD_MM + table_h_mm)
        ));
    };

    vline(&mut s, x_sep1);
    vline(&mut s, x_sep2);
    vline(&mut s, x_sep3);
    hline(&mut s, PAD_MM);

    let mut y = PAD_MM;
    let mid = y + line_mm / 2.0;
    text(&mut s, PAD_MM + 2.0, mid, "start", "Part");
    text(&mut s, (x_sep1 + x_sep2) / 2.0, mid, "middle", "Qty");
    text(&mut s, x_sep2 + 2.0, mid, "start", "Material");
    text(&mut s, x_sep3 + GAP_MM, mid, "start", "Cut size (L × W × T)");
    y += line_mm;
    hline(&mut s, y);

    for (l, row_h) in summary.lines.iter().zip(row_heights) {
        let top = y + GAP_MM;
        let mid = top + row_h / 2.0;
        text(&mut s, PAD_MM + 2.0, mid, "start", &l.part);
        text(&mut s, (x_sep1 + x_sep2) / 2.0, mid, "middle", &l.quantity.to_string());
        text(&mut s, x_sep2 + 2.0, mid, "start", &l.material);

        let draw_w = l.length_mm * DRAWING_SCALE;
        let draw_h = l.width_mm * DRAWING_SCALE;
        let x = x_sep3 + GAP_MM;
        s.push_str(&format!(
            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/>\n",
            mm2px(x),
            mm2px(mid - draw_h / 2.0),
            mm2px(draw_w),
            mm2px(draw_h)
        ));
        text(&mut s, x + draw_w + GAP_MM, mid, "start", &size_text(l));
        y = top + row_h + GAP_MM;
        hline(&mut s, y);
    }

    y += GAP_MM;
    text(&mut s, PAD_MM + 2.0, y + line_mm / 2.0, "start", "Board area");
    for m in &summary.materials {
        y += line_mm;
        let txt = format!("{}: {:.2} m² ({} pieces)", m.material, m.area_m2, m.pieces);
        text(&mut s, PAD_MM + 2.0, y + line_mm / 2.0, "start", &txt);
    }

    s.push_str("</svg>\n");
    log::debug!("cut sheet {}x{} px, {} lines", w_px, h_px, summary.lines.len());
    (s, w_px, h_px)
}
