mod plane;

pub use plane::PlaneBasis;
