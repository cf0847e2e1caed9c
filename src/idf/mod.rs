//! Minimal IDF document model backed by an IDD data dictionary.

mod idd;
mod model;
mod parser;
mod surface;
#[cfg(test)]
pub(crate) mod test_support;

pub use idd::{set_idd, ClassDef, FieldDef, Idd};
pub use model::{IdfModel, IdfObject, ObjectId};
pub use surface::{surface_vertices, SurfaceCorners, NUMBER_OF_VERTICES_FIELD};

/// Class holding the base surfaces openings and shadings attach to.
pub const BUILDING_SURFACE_CLASS: &str = "BuildingSurface:Detailed";
/// Class the opening template is expected to produce.
pub const FENESTRATION_SURFACE_CLASS: &str = "FenestrationSurface:Detailed";
/// Class the shading templates are expected to produce.
pub const ZONE_SHADING_CLASS: &str = "Shading:Zone:Detailed";
