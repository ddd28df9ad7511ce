use super::{BACK_CLEARANCE_MM, Cavity, Sink, label};
use crate::piece::Role;

/// Outer envelope of a box, centred on `x` and on Z = 0, standing on `bottom`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Outer {
    pub x: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Carcass {
    /// Between the side panels, at least one thickness.
    pub inner_width: f64,
    /// Base/top depth in front of the back panel, `max(D - T, T)`.
    pub usable_depth: f64,
    /// Clear space between the panels. Its height is `max(H - T, T) - T`
    /// and its depth `max(D - 2T, T)`.
    pub cavity: Cavity,
}

/// Two sides, base, top and back. `name` prefixes every label.
pub(crate) fn make_carcass(sink: &mut Sink, name: &str, o: Outer) -> Carcass {
    let t = sink.t();
    let (w, h, d) = (o.width, o.height, o.depth);
    let inner_width = (w - 2.0 * t).max(t);
    let usable_height = (h - t).max(t);
    let usable_depth = (d - t).max(t);
    let inner_depth = (d - 2.0 * t).max(t);
    let cy = o.bottom + h / 2.0;
    let side_x = w / 2.0 - t / 2.0;
    let panel_y = h / 2.0 - t / 2.0;
    let panel_z = d / 2.0 - usable_depth / 2.0;

    sink.push(
        Role::Body,
        label(name, "left side"),
        [t, h, d],
        [o.x - side_x, cy, 0.0],
    );
    sink.push(
        Role::Body,
        label(name, "right side"),
        [t, h, d],
        [o.x + side_x, cy, 0.0],
    );
    sink.push(
        Role::Body,
        label(name, "base"),
        [inner_width, t, usable_depth],
        [o.x, cy - panel_y, panel_z],
    );
    sink.push(
        Role::Body,
        label(name, "top"),
        [inner_width, t, usable_depth],
        [o.x, cy + panel_y, panel_z],
    );
    sink.push(
        Role::Back,
        label(name, "back"),
        [inner_width, h, t],
        [o.x, cy, -d / 2.0 + t / 2.0 + BACK_CLEARANCE_MM],
    );

    Carcass {
        inner_width,
        usable_depth,
        cavity: Cavity {
            x: o.x,
            width: inner_width,
            bottom: o.bottom + t,
            height: (usable_height - t).max(0.0),
            front: d / 2.0 - t,
            depth: inner_depth,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::FurnitureSpec;

    #[test]
    fn carcass_panels_and_cavity() {
        let spec = FurnitureSpec::default();
        let mut sink = Sink::new(&spec, 1.0);
        let c = make_carcass(
            &mut sink,
            "",
            Outer {
                x: 0.0,
                bottom: 0.0,
                width: 800.0,
                height: 1800.0,
                depth: 300.0,
            },
        );
        let out = sink.finish();
        assert_eq!(out.pieces.len(), 5);
        assert_eq!(out.pieces[0].label, "Left side");
        assert_eq!(c.inner_width, 764.0);
        assert_eq!(c.usable_depth, 282.0);
        assert_eq!(c.cavity.height, 1764.0);
        assert_eq!(c.cavity.depth, 264.0);
        assert_eq!(out.pieces[0].center[1], 900.0);
        assert_eq!(c.cavity.bottom, 18.0);
        assert_eq!(c.cavity.top(), 1782.0);
        // base sits flush with the front edge
        let base = &out.pieces[2];
        assert_eq!(base.center[2] + base.size[2] / 2.0, 150.0);
        assert_eq!(base.center[1], 9.0);
        assert_eq!(out.pieces[4].role, Role::Back);
    }

    #[test]
    fn thin_box_never_gets_negative_cavity() {
        let spec = FurnitureSpec {
            thickness: 30.0,
            ..FurnitureSpec::default()
        };
        let mut sink = Sink::new(&spec, 1.0);
        let c = make_carcass(
            &mut sink,
            "Tiny",
            Outer {
                x: 0.0,
                bottom: 0.0,
                width: 20.0,
                height: 10.0,
                depth: 5.0,
            },
        );
        assert_eq!(c.inner_width, 30.0);
        assert_eq!(c.usable_depth, 30.0);
        assert_eq!(c.cavity.height, 0.0);
        assert_eq!(c.cavity.depth, 30.0);
        assert_eq!(sink.finish().pieces[1].label, "Tiny right side");
    }
}
