use super::Point2;

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise. The polygon is
/// implicitly closed.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Point-in-polygon test using the even-odd (crossing number) rule.
///
/// The polygon is implicitly closed; a repeated closing vertex is harmless.
/// Points exactly on an edge may fall either way.
#[must_use]
pub fn contains_point(point: &Point2, polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        // Edge straddles the horizontal ray through the point.
        if (yi > point.y) != (yj > point.y) {
            let x_cross = xi + (point.y - yi) * (xj - xi) / (yj - yi);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn unit_square() -> Vec<Point2> {
        vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert!((signed_area(&unit_square()) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = unit_square();
        pts.reverse();
        assert!((signed_area(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area(&[p(0.0, 0.0)]).abs() < TOLERANCE);
        assert!(signed_area(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn contains_inside_and_outside() {
        let sq = unit_square();
        assert!(contains_point(&p(0.5, 0.5), &sq));
        assert!(contains_point(&p(0.01, 0.99), &sq));
        assert!(!contains_point(&p(1.5, 0.5), &sq));
        assert!(!contains_point(&p(-0.1, 0.5), &sq));
        assert!(!contains_point(&p(0.5, 2.0), &sq));
    }

    #[test]
    fn contains_ignores_orientation_and_closing_vertex() {
        let mut sq = unit_square();
        sq.reverse();
        sq.push(sq[0]);
        assert!(contains_point(&p(0.25, 0.75), &sq));
        assert!(!contains_point(&p(1.25, 0.75), &sq));
    }

    #[test]
    fn contains_concave_polygon() {
        // U shape opening upwards
        let u = vec![
            p(0.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 3.0),
            p(2.0, 3.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 3.0),
            p(0.0, 3.0),
        ];
        assert!(contains_point(&p(0.5, 2.0), &u));
        assert!(contains_point(&p(2.5, 2.0), &u));
        assert!(contains_point(&p(1.5, 0.5), &u));
        assert!(!contains_point(&p(1.5, 2.0), &u));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        assert!(!contains_point(&p(0.0, 0.0), &[p(0.0, 0.0), p(1.0, 1.0)]));
    }
}
