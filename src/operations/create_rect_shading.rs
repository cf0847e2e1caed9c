use std::path::Path;

use crate::approximation::rect_shading_strip;
use crate::error::Result;
use crate::idf::{IdfModel, ZONE_SHADING_CLASS};
use crate::math::Point3;
use crate::polygon::PolygonTemplate;

use super::{append_records, base_surface_basis, run_on_file, Outcome};

/// Adds a row of rectangular shadings of varying depth along a segment of a
/// base surface.
pub struct CreateRectShading {
    base_surface: String,
    template: PolygonTemplate,
    start: Point3,
    end: Point3,
    depths: Vec<f64>,
}

impl CreateRectShading {
    /// Creates a new `CreateRectShading` operation. The segment from `start`
    /// to `end` is split into one step per entry of `depths`.
    #[must_use]
    pub fn new(
        base_surface: impl Into<String>,
        template: impl Into<PolygonTemplate>,
        start: Point3,
        end: Point3,
        depths: Vec<f64>,
    ) -> Self {
        Self {
            base_surface: base_surface.into(),
            template: template.into(),
            start,
            end,
            depths,
        }
    }

    /// Executes the operation on an in-memory model.
    ///
    /// # Errors
    ///
    /// Returns an error if the base surface is malformed or the rendered
    /// template does not parse.
    pub fn execute(&self, model: &mut IdfModel<'_>) -> Result<Outcome> {
        let Some(basis) = base_surface_basis(model, &self.base_surface)? else {
            return Ok(Outcome::BaseSurfaceNotFound);
        };

        let records = rect_shading_strip(&basis, &self.start, &self.end, &self.depths, &self.base_surface);
        let added = append_records(model, &self.template, &records, ZONE_SHADING_CLASS)?;
        Ok(Outcome::Applied { added })
    }

    /// Loads the IDF file at `idf_path`, executes the operation and saves
    /// the file if the base surface was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the dictionary or model cannot be loaded or
    /// saved, or any error from [`CreateRectShading::execute`].
    pub fn run(&self, idd_path: impl AsRef<Path>, idf_path: impl AsRef<Path>) -> Result<Outcome> {
        run_on_file(idd_path.as_ref(), idf_path.as_ref(), |model| self.execute(model))
    }
}
