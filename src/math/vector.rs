//! Small 3D vector helpers shared by the projector and the emitters.
//!
//! All functions are pure: they take their arguments by reference and
//! return new values.

use super::{Point3, Vector3, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Returns `a - b` as a vector.
#[must_use]
pub fn subtract(a: &Point3, b: &Point3) -> Vector3 {
    a - b
}

/// Dot product of two vectors.
#[must_use]
pub fn dot(u: &Vector3, v: &Vector3) -> f64 {
    u.dot(v)
}

/// Right-handed cross product `u × v`.
#[must_use]
pub fn cross(u: &Vector3, v: &Vector3) -> Vector3 {
    u.cross(v)
}

/// Euclidean length of a vector.
#[must_use]
pub fn length(u: &Vector3) -> f64 {
    u.norm()
}

/// Returns the unit vector pointing along `u`.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroVector`] if `u` is (numerically) zero.
pub fn normalize(u: &Vector3) -> Result<Vector3> {
    let len = u.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(u / len)
}

/// Distance between two points.
#[must_use]
pub fn distance(a: &Point3, b: &Point3) -> f64 {
    (a - b).norm()
}

/// Foot of the perpendicular from `x` to the plane through `p` with normal `n`.
///
/// Computed as `x - <x - p, n> n`. `n` must already be unit length; it is
/// not renormalized here.
#[must_use]
pub fn foot(x: &Point3, p: &Point3, n: &Vector3) -> Point3 {
    let s = (x - p).dot(n);
    x - n * s
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn cross_follows_right_hand_rule() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        let z = cross(&x, &y);
        assert_abs_diff_eq!(z, Vector3::new(0.0, 0.0, 1.0), epsilon = TOLERANCE);
        assert_abs_diff_eq!(cross(&y, &x), -z, epsilon = TOLERANCE);
    }

    #[test]
    fn dot_and_length() {
        let u = Vector3::new(3.0, 4.0, 0.0);
        assert!((dot(&u, &u) - 25.0).abs() < TOLERANCE);
        assert!((length(&u) - 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn normalize_is_idempotent() {
        let v = Vector3::new(0.3, -2.0, 7.5);
        let once = normalize(&v).unwrap();
        let twice = normalize(&once).unwrap();
        assert!((length(&once) - 1.0).abs() < TOLERANCE);
        assert_abs_diff_eq!(once, twice, epsilon = 1e-12);
    }

    #[test]
    fn normalize_leaves_input_untouched() {
        let v = Vector3::new(0.0, 0.0, 2.0);
        let n = normalize(&v).unwrap();
        assert!((v.z - 2.0).abs() < TOLERANCE);
        assert!((n.z - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn normalize_zero_vector_fails() {
        assert!(normalize(&Vector3::zeros()).is_err());
    }

    #[test]
    fn distance_between_points() {
        let a = Point3::new(1.0, 1.0, 1.0);
        let b = Point3::new(1.0, 4.0, 5.0);
        assert!((distance(&a, &b) - 5.0).abs() < TOLERANCE);
        assert_abs_diff_eq!(subtract(&b, &a), Vector3::new(0.0, 3.0, 4.0), epsilon = TOLERANCE);
    }

    #[test]
    fn foot_lies_on_plane() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let n = normalize(&Vector3::new(1.0, -1.0, 2.0)).unwrap();
        let samples = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, -4.0, 2.5),
            Point3::new(-3.0, 8.0, -1.0),
            p,
        ];
        for x in &samples {
            let f = foot(x, &p, &n);
            assert!(dot(&subtract(&f, &p), &n).abs() < 1e-9);
            // x - f is parallel to n
            assert!(cross(&subtract(x, &f), &n).norm() < 1e-9);
        }
    }

    #[test]
    fn foot_of_point_on_plane_is_itself() {
        let p = Point3::new(0.0, 0.0, 0.0);
        let n = Vector3::new(0.0, 0.0, 1.0);
        let x = Point3::new(2.0, 3.0, 0.0);
        assert_abs_diff_eq!(foot(&x, &p, &n), x, epsilon = TOLERANCE);
    }
}
