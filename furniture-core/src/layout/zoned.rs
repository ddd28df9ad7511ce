use super::carcass::{Carcass, Outer, make_carcass};
use super::{Cavity, Sink, fill, label};
use crate::piece::Role;
use crate::spec::{BlockContent, ZoneBlock, ZoneBlocks, ZoneLayout, Zoned};

/// Vertical split of a carcass cavity: clear heights of both zones and
/// whether a divider sits between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ZoneSplit {
    pub lower: f64,
    pub upper: f64,
    pub divider: bool,
}

/// The upper zone takes `upper_request` (clamped to the cavity); the lower
/// zone gets what is left after one divider thickness. Without room for a
/// positive lower zone there is no divider and the upper zone takes it all.
pub(crate) fn split_zones(clear: f64, upper_request: f64, t: f64) -> ZoneSplit {
    let clear = clear.max(0.0);
    let upper = upper_request.clamp(0.0, clear);
    if upper <= 0.0 {
        return ZoneSplit {
            lower: clear,
            upper: 0.0,
            divider: false,
        };
    }
    let rest = clear - upper - t;
    if rest > 0.0 {
        ZoneSplit {
            lower: rest,
            upper,
            divider: true,
        }
    } else {
        ZoneSplit {
            lower: 0.0,
            upper: clear,
            divider: false,
        }
    }
}

pub(crate) fn build(sink: &mut Sink, cfg: &Zoned, lift: f64) {
    let spec = sink.spec;
    let t = spec.thickness;
    let carcass = make_carcass(
        sink,
        "",
        Outer {
            x: 0.0,
            bottom: lift,
            width: spec.width,
            height: spec.height,
            depth: spec.depth,
        },
    );
    let cav = carcass.cavity;
    let split = split_zones(cav.height, cfg.upper_zone_height, t);

    if split.divider {
        horizontal_divider(sink, &carcass, cav.bottom + split.lower + t / 2.0);
    }
    if split.lower > 0.0 {
        let lower = cav.band(cav.bottom, split.lower);
        zone(sink, &carcass, &lower, cfg.lower_layout, &cfg.lower, false);
    }
    if split.upper > 0.0 {
        let upper = cav.band(cav.top() - split.upper, split.upper);
        zone(sink, &carcass, &upper, cfg.upper_layout, &cfg.upper, true);
    }
}

fn horizontal_divider(sink: &mut Sink, carcass: &Carcass, y: f64) {
    let t = sink.t();
    let d = sink.spec.depth;
    sink.push(
        Role::Body,
        "Zone divider",
        [carcass.inner_width, t, carcass.usable_depth],
        [carcass.cavity.x, y, d / 2.0 - carcass.usable_depth / 2.0],
    );
}

fn zone(
    sink: &mut Sink,
    carcass: &Carcass,
    cav: &Cavity,
    layout: ZoneLayout,
    blocks: &ZoneBlocks,
    is_upper: bool,
) {
    let t = sink.t();
    let d = sink.spec.depth;
    let name = if is_upper { "Upper" } else { "Lower" };
    match layout {
        ZoneLayout::Single => block(sink, cav, &blocks.single, is_upper, name),
        ZoneLayout::Split => {
            sink.push(
                Role::Body,
                label(name, "divider"),
                [t, cav.height, carcass.usable_depth],
                [cav.x, cav.bottom + cav.height / 2.0, d / 2.0 - carcass.usable_depth / 2.0],
            );
            let half = ((cav.width - t) / 2.0).max(0.0);
            let off = t / 2.0 + half / 2.0;
            let left = cav.column(cav.x - off, half);
            let right = cav.column(cav.x + off, half);
            block(sink, &left, &blocks.left, is_upper, &format!("{name} left"));
            block(sink, &right, &blocks.right, is_upper, &format!("{name} right"));
        }
    }
}

fn block(sink: &mut Sink, cav: &Cavity, b: &ZoneBlock, is_upper: bool, name: &str) {
    if cav.width <= 0.0 || cav.height <= 0.0 {
        return;
    }
    match b.content {
        BlockContent::Drawers if is_upper => {
            log::warn!("{name}: drawers are only built in lower zones, ignored");
        }
        BlockContent::Drawers => {
            fill::drawers(sink, cav, &b.drawer_heights, name);
        }
        BlockContent::Shelving => {
            fill::shelves(sink, cav, b.shelf_count, name);
            if b.doors.active {
                fill::doors(sink, cav, b.doors.leaf_count, name);
            }
        }
        BlockContent::Doors => fill::doors(sink, cav, b.doors.leaf_count, name),
        BlockContent::Open => {
            if b.doors.active {
                fill::doors(sink, cav, b.doors.leaf_count, name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_gives_lower_the_remainder() {
        let s = split_zones(964.0, 406.0, 18.0);
        assert_eq!(
            s,
            ZoneSplit {
                lower: 540.0,
                upper: 406.0,
                divider: true
            }
        );
    }

    #[test]
    fn zero_upper_leaves_one_zone() {
        let s = split_zones(964.0, 0.0, 18.0);
        assert!(!s.divider);
        assert_eq!(s.lower, 964.0);
    }

    #[test]
    fn oversized_upper_takes_everything() {
        let s = split_zones(964.0, 5000.0, 18.0);
        assert!(!s.divider);
        assert_eq!(s.upper, 964.0);
        assert_eq!(s.lower, 0.0);
        // not enough left for a divider plus a lower zone
        let s = split_zones(964.0, 950.0, 18.0);
        assert!(!s.divider);
        assert_eq!(s.upper, 964.0);
    }
}
