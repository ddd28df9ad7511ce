use super::carcass::{Outer, make_carcass};
use super::{BACK_CLEARANCE_MM, LEG_NOMINAL_MM, SKIRT_SETBACK_MM, Sink, fill, label};
use crate::piece::Role;
use crate::spec::{BackMode, Desk, DeskSide, OpenSupport, SideContent, SupportMode};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Hand {
    Left,
    Right,
}

impl Hand {
    fn sign(self) -> f64 {
        match self {
            Hand::Left => -1.0,
            Hand::Right => 1.0,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Hand::Left => "Left",
            Hand::Right => "Right",
        }
    }
}

/// Widest a side may get so the two sides keep a gap of at least one
/// thickness between them.
pub(crate) fn side_cap(width: f64, t: f64) -> f64 {
    ((width - t) / 2.0).max(0.0)
}

pub(crate) fn build(sink: &mut Sink, desk: &Desk, lift: f64) {
    let spec = sink.spec;
    let t = spec.thickness;
    let (w, h, d) = (spec.width, spec.height, spec.depth);
    let o = desk.top_overhang;
    let underside = lift + h - t;

    sink.push(
        Role::Top,
        "Desk top",
        [w + 2.0 * o, t, d + 2.0 * o],
        [0.0, underside + t / 2.0, 0.0],
    );

    let side_h = (h - t).max(t);
    let cap = side_cap(w, t);
    let left = side(sink, &desk.left, Hand::Left, cap, lift, side_h);
    let right = side(sink, &desk.right, Hand::Right, cap, lift, side_h);

    // back treatment spans the gap between the sides' inner edges
    let x0 = left.map_or(-w / 2.0, |sw| -w / 2.0 + sw);
    let x1 = right.map_or(w / 2.0, |sw| w / 2.0 - sw);
    let gap = (x1 - x0).max(0.0);
    let mid = (x0 + x1) / 2.0;
    if gap <= 0.0 {
        return;
    }

    match desk.back_mode {
        BackMode::Panel => {
            if left.is_none() || right.is_none() {
                return;
            }
            // unclipped panels run down between the legs to the ground
            let floor = if spec.support == SupportMode::Legs && !desk.panel_clipped_by_legs {
                0.0
            } else {
                lift
            };
            let bottom = if desk.panel_height > 0.0 {
                (underside - desk.panel_height).max(floor)
            } else {
                floor
            };
            let ph = underside - bottom;
            if ph > 0.0 {
                sink.push(
                    Role::Back,
                    "Back panel",
                    [gap, ph, t],
                    [mid, bottom + ph / 2.0, -d / 2.0 + t / 2.0 + BACK_CLEARANCE_MM],
                );
            }
        }
        BackMode::Skirt => {
            if desk.skirt_height <= 0.0 {
                return;
            }
            let sh = desk.skirt_height.min(side_h);
            let setback = SKIRT_SETBACK_MM.min((d - t).max(0.0));
            sink.push(
                Role::Back,
                "Skirt",
                [gap, sh, t],
                [mid, underside - sh / 2.0, -d / 2.0 + setback + t / 2.0],
            );
        }
    }
}

/// One side assembly under the top. Returns the width it occupies, or
/// `None` when the side is inactive or has no room.
fn side(
    sink: &mut Sink,
    s: &DeskSide,
    hand: Hand,
    cap: f64,
    lift: f64,
    height: f64,
) -> Option<f64> {
    if !s.active {
        return None;
    }
    let sw = s.width.min(cap);
    if sw <= 0.0 {
        log::debug!("{} side has no room, skipped", hand.name());
        return None;
    }
    let spec = sink.spec;
    let (w, d) = (spec.width, spec.depth);
    let sign = hand.sign();
    match s.content {
        SideContent::Drawers | SideContent::Shelving => {
            let name = format!("{} pedestal", hand.name());
            let c = make_carcass(
                sink,
                &name,
                Outer {
                    x: sign * (w / 2.0 - sw / 2.0),
                    bottom: lift,
                    width: sw,
                    height,
                    depth: d,
                },
            );
            if s.content == SideContent::Drawers {
                fill::drawers(sink, &c.cavity, &s.drawer_heights, &name);
            } else {
                fill::shelves(sink, &c.cavity, s.shelf_count, &name);
            }
        }
        SideContent::Open => open_support(sink, s.open_support, hand, sw, lift, height),
    }
    Some(sw)
}

fn open_support(
    sink: &mut Sink,
    mode: OpenSupport,
    hand: Hand,
    sw: f64,
    lift: f64,
    height: f64,
) {
    let spec = sink.spec;
    let t = spec.thickness;
    let (w, d) = (spec.width, spec.depth);
    let sign = hand.sign();
    let outer = sign * w / 2.0;
    let inner = sign * (w / 2.0 - sw);
    let cy = lift + height / 2.0;
    let name = format!("{} side", hand.name());
    match mode {
        OpenSupport::Panel => {
            sink.push(
                Role::Body,
                label(&name, "panel"),
                [t, height, d],
                [inner + sign * t / 2.0, cy, 0.0],
            );
        }
        OpenSupport::Frame => {
            sink.push(
                Role::Body,
                label(&name, "outer panel"),
                [t, height, d],
                [outer - sign * t / 2.0, cy, 0.0],
            );
            sink.push(
                Role::Body,
                label(&name, "inner panel"),
                [t, height, d],
                [inner + sign * t / 2.0, cy, 0.0],
            );
        }
        OpenSupport::Legs => {
            let s = LEG_NOMINAL_MM.min(sw / 3.0).min(d / 3.0);
            let xs = [outer - sign * s / 2.0, inner + sign * s / 2.0];
            let zs = [d / 2.0 - s / 2.0, -d / 2.0 + s / 2.0];
            let mut i = 0;
            for z in zs {
                for x in xs {
                    i += 1;
                    sink.push(
                        Role::Body,
                        label(&name, &format!("leg {i}")),
                        [s, height, s],
                        [x, cy, z],
                    );
                }
            }
        }
    }
}
