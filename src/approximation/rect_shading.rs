use tracing::debug;

use crate::geometry::PlaneBasis;
use crate::math::Point3;
use crate::polygon::{BackWinding, PolygonRecord};

/// Depths at or below this value produce no rectangle.
pub const MIN_DEPTH: f64 = 0.01;

/// Builds a row of rectangular shadings standing on the segment from
/// `start` to `end`.
///
/// Both points are first projected onto the base surface. The segment is
/// split into `depths.len()` equal steps; step `i` becomes the rectangle
/// `[v1, v2, v3, v4]` with `v1`, `v4` on the segment and `v2`, `v3` moved
/// by `depths[i]` along the surface normal. Steps with a depth not above
/// [`MIN_DEPTH`] are skipped. Rectangle `i` is labelled `i`.
#[must_use]
pub fn rect_shading_strip(
    basis: &PlaneBasis,
    start: &Point3,
    end: &Point3,
    depths: &[f64],
    base_surface: &str,
) -> Vec<PolygonRecord> {
    if depths.is_empty() {
        return Vec::new();
    }

    let start_foot = basis.project(start);
    let end_foot = basis.project(end);
    #[allow(clippy::cast_precision_loss)]
    let step = (end_foot - start_foot) / depths.len() as f64;

    let records: Vec<PolygonRecord> = depths
        .iter()
        .enumerate()
        .filter(|&(_, &depth)| depth > MIN_DEPTH)
        .map(|(i, &depth)| {
            #[allow(clippy::cast_precision_loss)]
            let k = i as f64;
            let v1 = start_foot + step * k;
            let v4 = start_foot + step * (k + 1.0);
            let v2 = basis.offset(&v1, depth);
            let v3 = basis.offset(&v4, depth);
            PolygonRecord::new(
                i.to_string(),
                base_surface,
                vec![v1, v2, v3, v4],
                BackWinding::Reversed,
            )
        })
        .collect();

    debug!(steps = depths.len(), emitted = records.len(), "built rectangular shading strip");
    records
}
