//! End-to-end commands that add approximated geometry to an IDF model.

mod create_nurbs_opening;
mod create_nurbs_shading;
mod create_rect_shading;

pub use create_nurbs_opening::{CreateNurbsOpening, OpeningParams};
pub use create_nurbs_shading::{CreateNurbsShading, ShadingParams};
pub use create_rect_shading::CreateRectShading;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::PlaneBasis;
use crate::idf::{set_idd, IdfModel, SurfaceCorners, BUILDING_SURFACE_CLASS};
use crate::polygon::{PolygonRecord, PolygonTemplate};

/// What an operation did to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Geometry was generated and `added` objects were appended.
    Applied { added: usize },
    /// The named base surface does not exist; the model is unchanged.
    BaseSurfaceNotFound,
}

impl Outcome {
    /// Returns `true` if the operation ran to completion.
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Looks up `name` among the building surfaces and returns its plane frame.
fn base_surface_basis(model: &IdfModel<'_>, name: &str) -> Result<Option<PlaneBasis>> {
    let Some(surface) = model.find_named(BUILDING_SURFACE_CLASS, name) else {
        warn!(surface = name, "unable to find the base surface");
        return Ok(None);
    };
    let corners = SurfaceCorners::from_object(surface, model.idd())?;
    Ok(Some(corners.basis()?))
}

/// Renders `records` through `template` and appends every resulting object
/// of `target_class` to `model`. Objects of other classes are dropped.
fn append_records(
    model: &mut IdfModel<'_>,
    template: &PolygonTemplate,
    records: &[PolygonRecord],
    target_class: &str,
) -> Result<usize> {
    let text = template.render_all(records);
    let generated = IdfModel::parse(model.idd(), &text)?;

    let mut added = 0;
    for object in generated.objects_of(target_class) {
        model.copy_object(object)?;
        added += 1;
    }
    debug!(
        records = records.len(),
        added,
        class = target_class,
        "appended generated objects"
    );
    Ok(added)
}

/// Loads the model at `idf_path`, applies `op` and saves the model back if
/// the operation was applied.
fn run_on_file<F>(idd_path: &Path, idf_path: &Path, op: F) -> Result<Outcome>
where
    F: FnOnce(&mut IdfModel<'_>) -> Result<Outcome>,
{
    let idd = set_idd(idd_path)?;
    let mut model = IdfModel::load(idd, idf_path)?;
    let outcome = op(&mut model)?;
    if outcome.is_applied() {
        model.save()?;
    }
    Ok(outcome)
}
