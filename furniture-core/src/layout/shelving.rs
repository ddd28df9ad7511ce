use super::Sink;
use super::carcass::{Outer, make_carcass};
use super::fill;
use crate::spec::Shelving;

pub(crate) fn build(sink: &mut Sink, cfg: &Shelving, lift: f64) {
    let spec = sink.spec;
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
    fill::shelves(sink, &carcass.cavity, cfg.shelf_count, "");
}
