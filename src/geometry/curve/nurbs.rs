use crate::error::{CurveError, Result};
use crate::math::{Point3, Vector4};

use super::{Curve, CurveDomain, KnotPolicy, KnotVector};

/// Slack allowed when checking a parameter against the curve domain.
const DOMAIN_TOLERANCE: f64 = 1e-9;

/// A weighted NURBS control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    /// Cartesian position.
    pub point: Point3,
    /// Rational weight.
    pub weight: f64,
}

impl ControlPoint {
    /// Creates a control point with an explicit weight.
    #[must_use]
    pub fn new(point: Point3, weight: f64) -> Self {
        Self { point, weight }
    }

    /// Creates a control point with weight 1.
    #[must_use]
    pub fn unweighted(point: Point3) -> Self {
        Self { point, weight: 1.0 }
    }

    fn homogeneous(&self) -> Vector4 {
        Vector4::new(
            self.point.x * self.weight,
            self.point.y * self.weight,
            self.point.z * self.weight,
            self.weight,
        )
    }
}

impl From<[f64; 3]> for ControlPoint {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::unweighted(Point3::new(x, y, z))
    }
}

impl From<[f64; 4]> for ControlPoint {
    fn from([x, y, z, w]: [f64; 4]) -> Self {
        Self::new(Point3::new(x, y, z), w)
    }
}

impl From<Point3> for ControlPoint {
    fn from(point: Point3) -> Self {
        Self::unweighted(point)
    }
}

/// A rational B-spline curve.
///
/// Evaluated with the knot span search and Cox-de Boor basis functions
/// over homogeneous coordinates, followed by the perspective divide. The
/// domain is `[knots[degree], knots[control_points]]`.
#[derive(Debug, Clone)]
pub struct NurbsCurve {
    degree: usize,
    control_points: Vec<ControlPoint>,
    weighted: Vec<Vector4>,
    knots: KnotVector,
    closed: bool,
}

impl NurbsCurve {
    /// Creates a curve from explicit knots, validated under `policy`.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] if the degree is zero, there are fewer than
    /// `degree + 1` control points, a weight is not positive, or the knot
    /// vector violates `policy`.
    pub fn new(
        degree: usize,
        control_points: Vec<ControlPoint>,
        knots: Vec<f64>,
        policy: KnotPolicy,
    ) -> Result<Self> {
        validate_control_points(degree, &control_points)?;
        let knots = KnotVector::new(knots, degree, control_points.len(), policy)?;
        Ok(Self::from_parts(degree, control_points, knots, false))
    }

    /// Creates an open curve with a clamped uniform knot vector.
    ///
    /// The curve starts at the first control point and ends at the last.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] if the degree is zero, there are fewer than
    /// `degree + 1` control points, or a weight is not positive.
    pub fn clamped(degree: usize, control_points: Vec<ControlPoint>) -> Result<Self> {
        validate_control_points(degree, &control_points)?;
        let knots = KnotVector::clamped_uniform(degree, control_points.len())?;
        Ok(Self::from_parts(degree, control_points, knots, false))
    }

    /// Creates a closed curve through the periodic extension of
    /// `control_points`.
    ///
    /// The first `degree` control points are appended again (cyclically)
    /// and a uniform ramp knot vector is used. The domain is then exactly
    /// one period, `[knots[degree], knots[degree + n]]` for `n` original
    /// points, so the seam closes smoothly and is sampled once.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] if the degree is zero, fewer than three
    /// control points are given, or a weight is not positive.
    pub fn closed(degree: usize, control_points: Vec<ControlPoint>) -> Result<Self> {
        if degree == 0 {
            return Err(CurveError::InvalidDegree.into());
        }
        let n = control_points.len();
        if n < 3 {
            return Err(CurveError::NotEnoughControlPoints {
                degree,
                required: 3,
                count: n,
            }
            .into());
        }

        let head: Vec<ControlPoint> = (0..degree).map(|i| control_points[i % n]).collect();
        let mut extended = control_points;
        extended.extend(head);
        validate_control_points(degree, &extended)?;

        let knots = KnotVector::uniform_ramp(degree, extended.len())?;
        Ok(Self::from_parts(degree, extended, knots, true))
    }

    fn from_parts(
        degree: usize,
        control_points: Vec<ControlPoint>,
        knots: KnotVector,
        closed: bool,
    ) -> Self {
        let weighted = control_points.iter().map(ControlPoint::homogeneous).collect();
        Self {
            degree,
            control_points,
            weighted,
            knots,
            closed,
        }
    }

    /// Returns the degree of the curve.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the control points, including the periodic extension of a
    /// closed curve.
    #[must_use]
    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    /// Returns the knot vector.
    #[must_use]
    pub fn knots(&self) -> &KnotVector {
        &self.knots
    }

    /// Index of the knot span containing `u` (The NURBS Book, A2.1).
    fn find_span(&self, u: f64) -> usize {
        let knots = self.knots.as_slice();
        let n = self.control_points.len();
        let p = self.degree;

        if u >= knots[n] {
            // Last non-empty span ending at knots[n].
            let mut span = n - 1;
            while span > p && knots[span] >= knots[n] {
                span -= 1;
            }
            return span;
        }
        if u <= knots[p] {
            let mut span = p;
            while span < n - 1 && knots[span + 1] <= u {
                span += 1;
            }
            return span;
        }

        let mut low = p;
        let mut high = n;
        let mut mid = (low + high) / 2;
        while u < knots[mid] || u >= knots[mid + 1] {
            if u < knots[mid] {
                high = mid;
            } else {
                low = mid;
            }
            mid = (low + high) / 2;
        }
        mid
    }

    /// Non-vanishing basis functions `N[span-p..=span]` at `u` (A2.2).
    fn basis_functions(&self, span: usize, u: f64) -> Vec<f64> {
        let knots = self.knots.as_slice();
        let p = self.degree;
        let mut basis = vec![0.0; p + 1];
        let mut left = vec![0.0; p + 1];
        let mut right = vec![0.0; p + 1];

        basis[0] = 1.0;
        for j in 1..=p {
            left[j] = u - knots[span + 1 - j];
            right[j] = knots[span + j] - u;
            let mut saved = 0.0;
            for r in 0..j {
                let denom = right[r + 1] + left[j - r];
                let temp = if denom.abs() < f64::EPSILON {
                    0.0
                } else {
                    basis[r] / denom
                };
                basis[r] = saved + right[r + 1] * temp;
                saved = left[j - r] * temp;
            }
            basis[j] = saved;
        }
        basis
    }
}

impl Curve for NurbsCurve {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        let domain = self.domain();
        if t < domain.t_min - DOMAIN_TOLERANCE || t > domain.t_max + DOMAIN_TOLERANCE {
            return Err(CurveError::ParameterOutOfRange {
                value: t,
                min: domain.t_min,
                max: domain.t_max,
            }
            .into());
        }
        let u = t.clamp(domain.t_min, domain.t_max);

        let span = self.find_span(u);
        let basis = self.basis_functions(span, u);
        let first = span - self.degree;

        let cw = basis
            .iter()
            .zip(&self.weighted[first..=span])
            .fold(Vector4::zeros(), |acc, (n, pw)| acc + pw * *n);

        Ok(Point3::new(cw.x / cw.w, cw.y / cw.w, cw.z / cw.w))
    }

    fn domain(&self) -> CurveDomain {
        let knots = self.knots.as_slice();
        CurveDomain::new(knots[self.degree], knots[self.control_points.len()])
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

fn validate_control_points(degree: usize, control_points: &[ControlPoint]) -> Result<()> {
    if degree == 0 {
        return Err(CurveError::InvalidDegree.into());
    }
    if control_points.len() < degree + 1 {
        return Err(CurveError::NotEnoughControlPoints {
            degree,
            required: degree + 1,
            count: control_points.len(),
        }
        .into());
    }
    if let Some(cp) = control_points.iter().find(|cp| cp.weight <= 0.0) {
        return Err(CurveError::InvalidWeight(cp.weight).into());
    }
    Ok(())
}
