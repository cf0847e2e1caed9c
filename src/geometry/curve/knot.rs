use crate::error::{CurveError, Result};

/// Rules a knot vector is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KnotPolicy {
    /// Length and monotonicity, plus `degree + 1` equal knots at each end.
    #[default]
    Clamped,
    /// Length and monotonicity only.
    ///
    /// Needed for closed curves, whose seam knot vector is a plain uniform
    /// ramp from 0 to 1.
    Unclamped,
}

/// A validated, non-decreasing knot vector.
///
/// Always holds `degree + control_points + 1` knots for the curve it was
/// validated against.
#[derive(Debug, Clone, PartialEq)]
pub struct KnotVector {
    knots: Vec<f64>,
}

impl KnotVector {
    /// Validates `knots` for a curve of `degree` with `control_points`
    /// control points under `policy`.
    ///
    /// # Errors
    ///
    /// Returns a [`CurveError`] if the vector is empty, has the wrong
    /// length, decreases anywhere, or (for [`KnotPolicy::Clamped`]) is not
    /// clamped at both ends.
    pub fn new(
        knots: Vec<f64>,
        degree: usize,
        control_points: usize,
        policy: KnotPolicy,
    ) -> Result<Self> {
        if knots.is_empty() {
            return Err(CurveError::EmptyKnotVector.into());
        }

        let expected = degree + control_points + 1;
        if knots.len() != expected {
            return Err(CurveError::KnotCount {
                expected,
                actual: knots.len(),
            }
            .into());
        }

        if let Some(index) = knots.windows(2).position(|w| w[0] > w[1]) {
            return Err(CurveError::DecreasingKnots { index: index + 1 }.into());
        }

        if policy == KnotPolicy::Clamped {
            let m = degree + 1;
            let head = &knots[..m];
            let tail = &knots[knots.len() - m..];
            #[allow(clippy::float_cmp)]
            let clamped = head.iter().all(|&k| k == head[0]) && tail.iter().all(|&k| k == tail[0]);
            if !clamped {
                return Err(CurveError::NotClamped { multiplicity: m }.into());
            }
        }

        Ok(Self { knots })
    }

    /// Generates the clamped uniform knot vector on `[0, 1]`.
    ///
    /// `degree` zeros, then `control_points - degree + 1` evenly spaced
    /// values from 0 to 1, then `degree` ones.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::NotEnoughControlPoints`] if there are fewer
    /// than `degree + 1` control points.
    pub fn clamped_uniform(degree: usize, control_points: usize) -> Result<Self> {
        if control_points < degree + 1 {
            return Err(CurveError::NotEnoughControlPoints {
                degree,
                required: degree + 1,
                count: control_points,
            }
            .into());
        }

        let segments = control_points - degree;
        let mut knots = Vec::with_capacity(degree + control_points + 1);
        knots.extend(std::iter::repeat(0.0).take(degree));
        knots.extend(linspace(0.0, 1.0, segments + 1));
        knots.extend(std::iter::repeat(1.0).take(degree));

        Self::new(knots, degree, control_points, KnotPolicy::Clamped)
    }

    /// Generates the uniform ramp `i / (control_points + degree)` for
    /// `i` in `0..=control_points + degree`.
    ///
    /// # Errors
    ///
    /// Propagates validation errors (none are expected for valid sizes).
    pub fn uniform_ramp(degree: usize, control_points: usize) -> Result<Self> {
        let intervals = control_points + degree;
        #[allow(clippy::cast_precision_loss)]
        let step = 1.0 / intervals as f64;
        #[allow(clippy::cast_precision_loss)]
        let knots = (0..=intervals).map(|i| i as f64 * step).collect();
        Self::new(knots, degree, control_points, KnotPolicy::Unclamped)
    }

    /// Returns the knots as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.knots
    }

    /// Returns the number of knots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// Always `false`: validation rejects empty vectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let last = count.saturating_sub(1);
    (0..count).map(move |i| {
        if i == last {
            end
        } else {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / last as f64;
            start + (end - start) * t
        }
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::EpnurbsError;

    fn curve_err(result: Result<KnotVector>) -> CurveError {
        match result {
            Err(EpnurbsError::Curve(e)) => e,
            other => panic!("expected curve error, got {other:?}"),
        }
    }

    #[test]
    fn clamped_uniform_cubic() {
        let kv = KnotVector::clamped_uniform(3, 6).unwrap();
        let expected = [0.0, 0.0, 0.0, 0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0, 1.0, 1.0, 1.0];
        assert_eq!(kv.len(), expected.len());
        for (a, b) in kv.as_slice().iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn clamped_uniform_minimal() {
        let kv = KnotVector::clamped_uniform(3, 4).unwrap();
        assert_eq!(kv.as_slice(), &[0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn clamped_uniform_needs_enough_points() {
        let err = curve_err(KnotVector::clamped_uniform(3, 3));
        assert_eq!(
            err,
            CurveError::NotEnoughControlPoints {
                degree: 3,
                required: 4,
                count: 3
            }
        );
    }

    #[test]
    fn wrong_length_is_rejected() {
        let err = curve_err(KnotVector::new(
            vec![0.0, 0.0, 1.0, 1.0],
            1,
            3,
            KnotPolicy::Clamped,
        ));
        assert_eq!(
            err,
            CurveError::KnotCount {
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn decreasing_knots_are_rejected_under_both_policies() {
        for policy in [KnotPolicy::Clamped, KnotPolicy::Unclamped] {
            let err = curve_err(KnotVector::new(
                vec![0.0, 0.0, 0.7, 0.5, 1.0, 1.0],
                1,
                4,
                policy,
            ));
            assert_eq!(err, CurveError::DecreasingKnots { index: 3 });
        }
    }

    #[test]
    fn empty_knots_are_rejected() {
        let err = curve_err(KnotVector::new(vec![], 1, 0, KnotPolicy::Unclamped));
        assert_eq!(err, CurveError::EmptyKnotVector);
    }

    #[test]
    fn ramp_requires_unclamped_policy() {
        let ramp = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        let err = curve_err(KnotVector::new(ramp.clone(), 1, 3, KnotPolicy::Clamped));
        assert_eq!(err, CurveError::NotClamped { multiplicity: 2 });
        assert!(KnotVector::new(ramp, 1, 3, KnotPolicy::Unclamped).is_ok());
    }

    #[test]
    fn uniform_ramp_for_closed_cubic() {
        // 4 points extended by 3 -> 7 control points, 11 knots, step 1/10
        let kv = KnotVector::uniform_ramp(3, 7).unwrap();
        assert_eq!(kv.len(), 11);
        for (i, k) in kv.as_slice().iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let expected = i as f64 * 0.1;
            assert!((k - expected).abs() < 1e-12);
        }
    }
}
