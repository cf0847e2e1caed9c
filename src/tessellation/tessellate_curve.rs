use tracing::debug;

use crate::error::{CurveError, Result};
use crate::geometry::{Curve, CurveDomain};

use super::Polyline;

/// Samples a curve at uniform parameter steps.
///
/// With `evaluated_points = n` the range is split into `n` equal steps and
/// `n + 1` points are produced, both range ends included.
pub struct TessellateCurve {
    evaluated_points: u32,
    range: Option<CurveDomain>,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation over the whole curve domain.
    #[must_use]
    pub fn new(evaluated_points: u32) -> Self {
        Self {
            evaluated_points,
            range: None,
        }
    }

    /// Restricts sampling to a sub-range of the curve domain.
    #[must_use]
    pub fn with_range(mut self, range: CurveDomain) -> Self {
        self.range = Some(range);
        self
    }

    /// Executes the tessellation, returning a polyline.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidSampleCount`] when `evaluated_points` is
    /// zero, [`CurveError::RangeOutOfDomain`] when the requested range leaves
    /// the curve domain, or any evaluation error of the curve.
    pub fn execute<C: Curve>(&self, curve: &C) -> Result<Polyline> {
        if self.evaluated_points == 0 {
            return Err(CurveError::InvalidSampleCount.into());
        }

        let domain = curve.domain();
        let range = self.range.unwrap_or(domain);
        if range.t_min > range.t_max || !domain.contains(&range, 1e-9) {
            return Err(CurveError::RangeOutOfDomain {
                start: range.t_min,
                end: range.t_max,
                min: domain.t_min,
                max: domain.t_max,
            }
            .into());
        }

        let n = self.evaluated_points;
        let mut points = Vec::with_capacity(n as usize + 1);
        for i in 0..=n {
            let t = if i == n {
                range.t_max
            } else {
                range.t_min + range.span() * f64::from(i) / f64::from(n)
            };
            points.push(curve.evaluate(t)?);
        }

        debug!(
            samples = points.len(),
            t_min = range.t_min,
            t_max = range.t_max,
            "sampled curve"
        );
        Ok(Polyline { points })
    }
}
