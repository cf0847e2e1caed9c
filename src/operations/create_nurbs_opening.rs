use std::path::Path;

use tracing::debug;

use crate::approximation::{approximate_opening, DEFAULT_CELL_SIZE};
use crate::error::Result;
use crate::geometry::{ControlPoint, NurbsCurve};
use crate::idf::{IdfModel, FENESTRATION_SURFACE_CLASS};
use crate::polygon::PolygonTemplate;
use crate::tessellation::TessellateCurve;

use super::{append_records, base_surface_basis, run_on_file, Outcome};

/// Parameters controlling how an opening outline is approximated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpeningParams {
    /// Degree of the closed NURBS outline.
    pub degree: usize,
    /// Number of parameter steps the outline is sampled with.
    pub evaluated_points: u32,
    /// Side length of a raster cell.
    pub cell_size: f64,
}

impl Default for OpeningParams {
    fn default() -> Self {
        Self {
            degree: 3,
            evaluated_points: 50,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

/// Cuts a free-form opening, bounded by a closed NURBS curve, into a
/// rectangular base surface.
///
/// The enclosed region is approximated by grid rectangles, each written as a
/// `FenestrationSurface:Detailed` through the template.
pub struct CreateNurbsOpening {
    base_surface: String,
    template: PolygonTemplate,
    control_points: Vec<ControlPoint>,
    params: OpeningParams,
}

impl CreateNurbsOpening {
    /// Creates a new `CreateNurbsOpening` operation with default parameters.
    #[must_use]
    pub fn new(
        base_surface: impl Into<String>,
        template: impl Into<PolygonTemplate>,
        control_points: Vec<ControlPoint>,
    ) -> Self {
        Self {
            base_surface: base_surface.into(),
            template: template.into(),
            control_points,
            params: OpeningParams::default(),
        }
    }

    /// Replaces the approximation parameters.
    #[must_use]
    pub fn with_params(mut self, params: OpeningParams) -> Self {
        self.params = params;
        self
    }

    /// Returns the approximation parameters.
    #[must_use]
    pub fn params(&self) -> &OpeningParams {
        &self.params
    }

    /// Executes the operation on an in-memory model.
    ///
    /// # Errors
    ///
    /// Returns an error if the base surface is malformed, the control points
    /// do not form a valid closed curve, the cell size is not positive, or
    /// the rendered template does not parse.
    pub fn execute(&self, model: &mut IdfModel<'_>) -> Result<Outcome> {
        let Some(basis) = base_surface_basis(model, &self.base_surface)? else {
            return Ok(Outcome::BaseSurfaceNotFound);
        };

        let curve = NurbsCurve::closed(self.params.degree, self.control_points.clone())?;
        let outline = TessellateCurve::new(self.params.evaluated_points).execute(&curve)?;
        let approximation =
            approximate_opening(&basis, &outline.points, self.params.cell_size, &self.base_surface)?;
        debug!(
            surface = %self.base_surface,
            columns = approximation.grid.columns(),
            rows = approximation.grid.rows(),
            runs = approximation.runs.len(),
            "rasterized opening"
        );

        let added = append_records(
            model,
            &self.template,
            &approximation.records,
            FENESTRATION_SURFACE_CLASS,
        )?;
        Ok(Outcome::Applied { added })
    }

    /// Loads the IDF file at `idf_path`, executes the operation and saves
    /// the file if the base surface was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the dictionary or model cannot be loaded or
    /// saved, or any error from [`CreateNurbsOpening::execute`].
    pub fn run(&self, idd_path: impl AsRef<Path>, idf_path: impl AsRef<Path>) -> Result<Outcome> {
        run_on_file(idd_path.as_ref(), idf_path.as_ref(), |model| self.execute(model))
    }
}
