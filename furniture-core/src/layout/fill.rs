//! Cavity contents shared by every body: shelves, drawer fronts, door leaves.

use super::{Cavity, FRONT_GAP_MM, STACK_EPS_MM, Sink, label};
use crate::piece::Role;

/// `n` shelves dividing the cavity into `n + 1` equal pitches, counted from
/// the centre of the panel below the cavity to the centre of the one above.
pub(crate) fn shelves(sink: &mut Sink, cav: &Cavity, n: u32, prefix: &str) {
    if n == 0 {
        return;
    }
    let t = sink.t();
    let first = cav.bottom - t / 2.0;
    let pitch = (cav.height + t) / (n as f64 + 1.0);
    for i in 1..=n {
        sink.push(
            Role::Shelves,
            label(prefix, &format!("shelf {i}")),
            [cav.width, t, cav.depth],
            [cav.x, first + i as f64 * pitch, cav.front - cav.depth / 2.0],
        );
    }
}

/// Longest prefix of `heights` whose running sum stays within `limit`.
pub(crate) fn drawer_fit(heights: &[f64], limit: f64) -> usize {
    let mut used = 0.0;
    for (i, h) in heights.iter().enumerate() {
        if used + h > limit + STACK_EPS_MM {
            return i;
        }
        used += h;
    }
    heights.len()
}

/// Drawer fronts stacked bottom-up. Drawers that would overflow the cavity
/// are dropped; the last fitting drawer is never resized. Returns how many
/// were placed.
pub(crate) fn drawers(sink: &mut Sink, cav: &Cavity, heights: &[f64], prefix: &str) -> usize {
    let t = sink.t();
    let fit = drawer_fit(heights, cav.height);
    if fit < heights.len() {
        log::debug!(
            "{}: {} of {} drawers fit in {:.1}mm",
            label(prefix, "drawers"),
            fit,
            heights.len(),
            cav.height
        );
    }
    let mut y = cav.bottom;
    for (i, h) in heights[..fit].iter().enumerate() {
        sink.push(
            Role::Fronts,
            label(prefix, &format!("drawer front {}", i + 1)),
            [cav.width - FRONT_GAP_MM, h - FRONT_GAP_MM, t],
            [cav.x, y + h / 2.0, cav.front + t / 2.0],
        );
        y += h;
    }
    fit
}

/// `leaves` equal door leaves across the cavity width.
pub(crate) fn doors(sink: &mut Sink, cav: &Cavity, leaves: u32, prefix: &str) {
    let t = sink.t();
    let k = leaves.max(1);
    let leaf = cav.width / k as f64;
    let left = cav.x - cav.width / 2.0;
    for i in 0..k {
        let what = if k == 1 {
            "door".to_string()
        } else {
            format!("door {}", i + 1)
        };
        sink.push(
            Role::Fronts,
            label(prefix, &what),
            [leaf - FRONT_GAP_MM, cav.height - FRONT_GAP_MM, t],
            [
                left + leaf * (i as f64 + 0.5),
                cav.bottom + cav.height / 2.0,
                cav.front + t / 2.0,
            ],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::FurnitureSpec;

    fn cavity() -> Cavity {
        Cavity {
            x: 0.0,
            width: 600.0,
            bottom: 18.0,
            height: 540.0,
            front: 132.0,
            depth: 264.0,
        }
    }

    #[test]
    fn drawer_fit_is_longest_prefix() {
        assert_eq!(drawer_fit(&[160.0, 160.0, 220.0], 540.0), 3);
        assert_eq!(drawer_fit(&[160.0, 160.0, 220.0], 539.0), 2);
        assert_eq!(drawer_fit(&[600.0, 10.0], 540.0), 0);
        assert_eq!(drawer_fit(&[], 10.0), 0);
    }

    #[test]
    fn truncation_stops_at_first_overflow() {
        // a later drawer that would still fit is not picked up
        assert_eq!(drawer_fit(&[300.0, 300.0, 100.0], 500.0), 1);
    }

    #[test]
    fn drawers_stack_from_bottom() {
        let spec = FurnitureSpec::default();
        let mut sink = Sink::new(&spec, 1.0);
        let n = drawers(&mut sink, &cavity(), &[100.0, 200.0], "Lower");
        let out = sink.finish();
        assert_eq!(n, 2);
        assert_eq!(out.pieces[0].label, "Lower drawer front 1");
        assert_eq!(out.pieces[0].center[1], 68.0);
        assert_eq!(out.pieces[1].center[1], 218.0);
        assert_eq!(out.pieces[1].size[1], 198.0);
        assert!(out.pieces.iter().all(|p| p.role == Role::Fronts));
    }

    #[test]
    fn shelves_divide_pitch_evenly() {
        let spec = FurnitureSpec::default();
        let mut sink = Sink::new(&spec, 1.0);
        shelves(&mut sink, &cavity(), 2, "");
        let out = sink.finish();
        assert_eq!(out.pieces.len(), 2);
        assert_eq!(out.pieces[0].label, "Shelf 1");
        // panel centres at 9 and 567 -> pitch 186
        assert!((out.pieces[0].center[1] - 195.0).abs() < 1e-9);
        assert!((out.pieces[1].center[1] - 381.0).abs() < 1e-9);
    }

    #[test]
    fn doors_split_width() {
        let spec = FurnitureSpec::default();
        let mut sink = Sink::new(&spec, 1.0);
        doors(&mut sink, &cavity(), 3, "Upper");
        let out = sink.finish();
        assert_eq!(out.pieces.len(), 3);
        assert_eq!(out.pieces[0].size[0], 198.0);
        assert_eq!(out.pieces[0].center[0], -200.0);
        assert_eq!(out.pieces[2].center[0], 200.0);
        assert_eq!(out.pieces[1].label, "Upper door 2");
    }
}
