use tracing::{debug, trace};

use crate::geometry::PlaneBasis;
use crate::math::vector::distance;
use crate::math::Point3;
use crate::polygon::{BackWinding, PolygonRecord};

/// Shortest strip edge or arm that still produces geometry.
pub const MIN_EDGE_LENGTH: f64 = 0.01;

/// Shape of the strip piece between two consecutive curve samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripPiece {
    /// Both arms are long enough: `[f0, c0, c1, f1]`.
    Trapezoid,
    /// Only the first arm is long enough: `[f0, c0, f1]`.
    TriangleAtStart,
    /// Only the second arm is long enough: `[f0, c1, f1]`.
    TriangleAtEnd,
    /// Too short along the curve, along the wall, or in both arms.
    Skipped,
}

/// Classifies the piece between curve samples `c0`, `c1` and their feet
/// `f0`, `f1`.
#[must_use]
pub fn classify_piece(c0: &Point3, c1: &Point3, f0: &Point3, f1: &Point3) -> StripPiece {
    if distance(c0, c1) < MIN_EDGE_LENGTH || distance(f0, f1) < MIN_EDGE_LENGTH {
        return StripPiece::Skipped;
    }
    let arm0 = distance(c0, f0) >= MIN_EDGE_LENGTH;
    let arm1 = distance(c1, f1) >= MIN_EDGE_LENGTH;
    match (arm0, arm1) {
        (true, true) => StripPiece::Trapezoid,
        (true, false) => StripPiece::TriangleAtStart,
        (false, true) => StripPiece::TriangleAtEnd,
        (false, false) => StripPiece::Skipped,
    }
}

/// Builds the strip of trapezoids and triangles between `curve` and its
/// `feet` on the base surface.
///
/// Piece `i` (between samples `i - 1` and `i`) is labelled `i`. Degenerate
/// pieces are skipped. Only the common prefix of `curve` and `feet` is used.
#[must_use]
pub fn shading_strip(curve: &[Point3], feet: &[Point3], base_surface: &str) -> Vec<PolygonRecord> {
    let n = curve.len().min(feet.len());
    let mut records = Vec::new();

    for i in 1..n {
        let (c0, c1) = (curve[i - 1], curve[i]);
        let (f0, f1) = (feet[i - 1], feet[i]);
        let vertices = match classify_piece(&c0, &c1, &f0, &f1) {
            StripPiece::Trapezoid => vec![f0, c0, c1, f1],
            StripPiece::TriangleAtStart => vec![f0, c0, f1],
            StripPiece::TriangleAtEnd => vec![f0, c1, f1],
            StripPiece::Skipped => {
                trace!(piece = i, "skipped degenerate shading piece");
                continue;
            }
        };
        records.push(PolygonRecord::new(
            i.to_string(),
            base_surface,
            vertices,
            BackWinding::Reversed,
        ));
    }

    debug!(pieces = n.saturating_sub(1), emitted = records.len(), "built shading strip");
    records
}

/// Projects `curve` onto the base surface and builds the strip between the
/// curve and its projection.
#[must_use]
pub fn approximate_shading(basis: &PlaneBasis, curve: &[Point3], base_surface: &str) -> Vec<PolygonRecord> {
    let feet: Vec<Point3> = curve.iter().map(|p| basis.project(p)).collect();
    shading_strip(curve, &feet, base_surface)
}
