pub mod curve;
pub mod surface;

pub use curve::{ControlPoint, Curve, CurveDomain, KnotPolicy, KnotVector, NurbsCurve};
pub use surface::PlaneBasis;
