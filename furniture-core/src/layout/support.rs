use super::{LEG_NOMINAL_MM, Sink};
use crate::piece::Role;
use crate::spec::{Body, SupportMode};

/// Section of a support leg: the nominal size, reduced for narrow or
/// shallow bodies.
pub(crate) fn leg_size(width: f64, depth: f64) -> f64 {
    LEG_NOMINAL_MM.min(width / 8.0).min(depth / 6.0)
}

/// Understructure below the body, occupying `[0, lift]` on Y.
pub(crate) fn build(sink: &mut Sink, lift: f64) {
    let spec = sink.spec;
    let (w, d) = (spec.width, spec.depth);
    match spec.support {
        SupportMode::None => {}
        SupportMode::Plinth => {
            let inset = spec.plinth.inset;
            sink.push(
                Role::Plinth,
                "Plinth",
                [w - 2.0 * inset, lift, d - 2.0 * inset],
                [0.0, lift / 2.0, 0.0],
            );
        }
        SupportMode::Legs => {
            let s = leg_size(w, d);
            // desks may carry the legs out to the corners of the top
            let (fw, fd, inset) = match &spec.body {
                Body::Desk(desk) if desk.legs_flush_with_top => (
                    w + 2.0 * desk.top_overhang,
                    d + 2.0 * desk.top_overhang,
                    s / 2.0,
                ),
                _ => (w, d, s),
            };
            let xs = [-(fw / 2.0 - inset), fw / 2.0 - inset];
            let zs = [fd / 2.0 - inset, -(fd / 2.0 - inset)];
            let mut i = 0;
            for z in zs {
                for x in xs {
                    i += 1;
                    sink.push(
                        Role::Legs,
                        format!("Leg {i}"),
                        [s, lift, s],
                        [x, lift / 2.0, z],
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Desk, FurnitureSpec, Plinth};

    #[test]
    fn leg_size_shrinks_for_small_bodies() {
        assert_eq!(leg_size(800.0, 350.0), 50.0);
        assert_eq!(leg_size(240.0, 350.0), 30.0);
        assert_eq!(leg_size(800.0, 120.0), 20.0);
    }

    #[test]
    fn plinth_is_inset_under_the_body() {
        let spec = FurnitureSpec {
            support: SupportMode::Plinth,
            plinth: Plinth {
                height: 80.0,
                inset: 40.0,
            },
            ..FurnitureSpec::default()
        };
        let out = crate::derive_with_scale(&spec, 1.0);
        let p = out.pieces.last().unwrap();
        assert_eq!(p.role, Role::Plinth);
        assert_eq!(p.size, [720.0, 80.0, 270.0]);
        assert_eq!(p.min_y(), 0.0);
        assert_eq!(out.body_floor_y(), Some(80.0));
    }

    #[test]
    fn legs_sit_inside_the_footprint() {
        let spec = FurnitureSpec {
            support: SupportMode::Legs,
            ..FurnitureSpec::default()
        };
        let out = crate::derive_with_scale(&spec, 1.0);
        let legs: Vec<_> = out.pieces.iter().filter(|p| p.role == Role::Legs).collect();
        assert_eq!(legs.len(), 4);
        assert_eq!(legs[0].center[0], -350.0);
        assert_eq!(legs[0].center[2], 125.0);
        assert!(legs.iter().all(|l| l.size == [50.0, 100.0, 50.0]));
        assert_eq!(out.body_floor_y(), Some(100.0));
        assert_eq!(out.ground_y(), Some(0.0));
    }

    #[test]
    fn flush_desk_legs_follow_the_top() {
        let spec = FurnitureSpec {
            width: 1400.0,
            height: 750.0,
            depth: 600.0,
            support: SupportMode::Legs,
            body: Body::Desk(Desk {
                legs_flush_with_top: true,
                ..Desk::default()
            }),
            ..FurnitureSpec::default()
        };
        let out = crate::derive_with_scale(&spec, 1.0);
        let leg = out.pieces.iter().find(|p| p.role == Role::Legs).unwrap();
        // top is 1440 wide; leg outer face flush with its edge
        assert_eq!(leg.center[0] - 25.0, -720.0);
    }
}
