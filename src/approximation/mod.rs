//! Pure geometry: from sampled curves to polygon records.

pub mod opening;
pub mod raster;
pub mod rect_shading;
pub mod shading;

pub use opening::{approximate_opening, outline_to_local, OpeningApproximation};
pub use raster::{CellGrid, CellRun, GridCell, DEFAULT_CELL_SIZE};
pub use rect_shading::{rect_shading_strip, MIN_DEPTH};
pub use shading::{approximate_shading, classify_piece, shading_strip, StripPiece, MIN_EDGE_LENGTH};
