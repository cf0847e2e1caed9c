pub mod approximation;
pub mod error;
pub mod geometry;
pub mod idf;
pub mod math;
pub mod operations;
pub mod polygon;
pub mod tessellation;

pub use error::{EpnurbsError, Result};
