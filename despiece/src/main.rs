use cutlist_core::{CutSummary, DEFAULT_PX_PER_MM, aggregate, build_cutsheet_svg, encode_rgba_to_png_bytes};
use furniture_core::{CutlistRow, FurnitureSpec, Piece, derive};
use serde::Serialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

const USAGE: &str = "Usage: despiece <config.json> <output.(json|svg|png)> [px_per_mm]";

#[derive(Serialize)]
struct Report<'a> {
    pieces: &'a [Piece],
    cutlist: &'a [CutlistRow],
    summary: &'a CutSummary,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Format {
    Json,
    Svg,
    Png,
}

fn output_format(path: &str) -> Option<Format> {
    let ext = Path::new(path).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(Format::Json),
        "svg" => Some(Format::Svg),
        "png" => Some(Format::Png),
        _ => None,
    }
}

fn usage_error(msg: &str) -> ! {
    eprintln!("{msg}");
    eprintln!("{USAGE}");
    std::process::exit(2);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "despiece=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        usage_error("missing arguments");
    }
    let input = &args[1];
    let output = &args[2];
    let Some(format) = output_format(output) else {
        usage_error(&format!("unsupported output {output}"));
    };
    let px_per_mm = match args.get(3) {
        Some(s) => match s.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => v,
            _ => {
                warn!("ignoring px_per_mm {s:?}, using {DEFAULT_PX_PER_MM}");
                DEFAULT_PX_PER_MM
            }
        },
        None => DEFAULT_PX_PER_MM,
    };

    let txt = fs::read_to_string(input)?;
    let spec = FurnitureSpec::from_json(&txt)?;
    let derived = derive(&spec);
    let summary = aggregate(&derived.cutlist);
    info!(
        "{}: {} pieces, {} cut lines",
        spec.body_type().key(),
        derived.pieces.len(),
        summary.lines.len()
    );

    match format {
        Format::Json => {
            let report = Report {
                pieces: &derived.pieces,
                cutlist: &derived.cutlist,
                summary: &summary,
            };
            fs::write(output, serde_json::to_string_pretty(&report)?)?;
        }
        Format::Svg => {
            let (svg, _, _) = build_cutsheet_svg(&summary, px_per_mm);
            fs::write(output, svg)?;
        }
        Format::Png => {
            let (svg, w_px, h_px) = build_cutsheet_svg(&summary, px_per_mm);
            let png = render_png(&svg, w_px, h_px)?;
            fs::write(output, png)?;
        }
    }
    info!("wrote {output}");
    Ok(())
}

// Rasterize with the system fonts; `sans-serif` maps to whatever fontdb picks.
fn render_png(svg: &str, w_px: u32, h_px: u32) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut opt = usvg::Options::default();
    let mut fontdb = usvg::fontdb::Database::new();
    fontdb.load_system_fonts();
    if fontdb.is_empty() {
        warn!("no system fonts found, cut sheet text will be missing");
    }
    debug!("{} font faces loaded", fontdb.len());
    opt.fontdb = std::sync::Arc::new(fontdb);
    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| format!("SVG parse error: {e:?}"))?;
    let mut pixmap = tiny_skia::Pixmap::new(w_px, h_px).ok_or("pixmap alloc failed")?;
    let mut pm = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pm);
    Ok(encode_rgba_to_png_bytes(w_px, h_px, pixmap.data())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_by_extension() {
        assert_eq!(output_format("out.json"), Some(Format::Json));
        assert_eq!(output_format("dir/Sheet.SVG"), Some(Format::Svg));
        assert_eq!(output_format("sheet.png"), Some(Format::Png));
        assert_eq!(output_format("sheet.pdf"), None);
        assert_eq!(output_format("noext"), None);
    }

    #[test]
    fn report_has_both_lists() {
        let derived = derive(&FurnitureSpec::default());
        let summary = aggregate(&derived.cutlist);
        let report = Report {
            pieces: &derived.pieces,
            cutlist: &derived.cutlist,
            summary: &summary,
        };
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["pieces"].as_array().unwrap().len(), derived.pieces.len());
        assert_eq!(v["cutlist"].as_array().unwrap().len(), derived.cutlist.len());
        assert!(v["summary"]["lines"].is_array());
    }
}
