use std::path::Path;

use crate::approximation::approximate_shading;
use crate::error::Result;
use crate::geometry::{ControlPoint, NurbsCurve};
use crate::idf::{IdfModel, ZONE_SHADING_CLASS};
use crate::polygon::PolygonTemplate;
use crate::tessellation::TessellateCurve;

use super::{append_records, base_surface_basis, run_on_file, Outcome};

/// Parameters controlling how a shading curve is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadingParams {
    /// Degree of the open NURBS curve.
    pub degree: usize,
    /// Number of parameter steps the curve is sampled with.
    pub evaluated_points: u32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            degree: 3,
            evaluated_points: 20,
        }
    }
}

/// Adds a shading surface that hangs between an open NURBS curve and its
/// projection onto a base surface.
pub struct CreateNurbsShading {
    base_surface: String,
    template: PolygonTemplate,
    control_points: Vec<ControlPoint>,
    params: ShadingParams,
}

impl CreateNurbsShading {
    /// Creates a new `CreateNurbsShading` operation with default parameters.
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
            params: ShadingParams::default(),
        }
    }

    /// Replaces the sampling parameters.
    #[must_use]
    pub fn with_params(mut self, params: ShadingParams) -> Self {
        self.params = params;
        self
    }

    /// Returns the sampling parameters.
    #[must_use]
    pub fn params(&self) -> &ShadingParams {
        &self.params
    }

    /// Executes the operation on an in-memory model.
    ///
    /// # Errors
    ///
    /// Returns an error if the base surface is malformed, the control points
    /// do not form a valid clamped curve, or the rendered template does not
    /// parse.
    pub fn execute(&self, model: &mut IdfModel<'_>) -> Result<Outcome> {
        let Some(basis) = base_surface_basis(model, &self.base_surface)? else {
            return Ok(Outcome::BaseSurfaceNotFound);
        };

        let curve = NurbsCurve::clamped(self.params.degree, self.control_points.clone())?;
        let samples = TessellateCurve::new(self.params.evaluated_points).execute(&curve)?;
        let records = approximate_shading(&basis, &samples.points, &self.base_surface);

        let added = append_records(model, &self.template, &records, ZONE_SHADING_CLASS)?;
        Ok(Outcome::Applied { added })
    }

    /// Loads the IDF file at `idf_path`, executes the operation and saves
    /// the file if the base surface was found.
    ///
    /// # Errors
    ///
    /// Returns an error if the dictionary or model cannot be loaded or
    /// saved, or any error from [`CreateNurbsShading::execute`].
    pub fn run(&self, idd_path: impl AsRef<Path>, idf_path: impl AsRef<Path>) -> Result<Outcome> {
        run_on_file(idd_path.as_ref(), idf_path.as_ref(), |model| self.execute(model))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::{CurveError, EpnurbsError};
    use crate::idf::test_support::{write_fixture_files, IDD_TEXT, IDF_TEXT, SHADING_TEMPLATE};
    use crate::idf::{surface_vertices, Idd};

    fn awning() -> Vec<ControlPoint> {
        vec![
            ControlPoint::from([0.5, 0.0, 2.5]),
            ControlPoint::from([1.5, -1.0, 2.5]),
            ControlPoint::from([2.5, -1.0, 2.5]),
            ControlPoint::from([3.5, 0.0, 2.5]),
        ]
    }

    #[test]
    fn test_default_params() {
        assert_eq!(
            ShadingParams::default(),
            ShadingParams {
                degree: 3,
                evaluated_points: 20
            }
        );
    }

    #[test]
    fn test_execute_adds_front_and_back_faces() {
        let idd = Idd::parse(IDD_TEXT).unwrap();
        let mut model = IdfModel::parse(&idd, IDF_TEXT).unwrap();

        let outcome = CreateNurbsShading::new("South Wall", SHADING_TEMPLATE, awning())
            .execute(&mut model)
            .unwrap();
        let Outcome::Applied { added } = outcome else {
            panic!("expected the shading to be applied");
        };
        assert!(added > 0);
        assert_eq!(added % 2, 0);
        assert!(added <= 40);

        // The curve starts on the wall, so the first piece is a triangle.
        let first = model.find_named(ZONE_SHADING_CLASS, "Shade_1").unwrap();
        let front = surface_vertices(first, &idd).unwrap();
        assert_eq!(front.len(), 3);
        let back = model.find_named(ZONE_SHADING_CLASS, "ShadeBack_1").unwrap();
        let mut reversed = surface_vertices(back, &idd).unwrap();
        reversed.reverse();
        assert_eq!(front, reversed);

        for shade in model.objects_of(ZONE_SHADING_CLASS) {
            assert_eq!(shade.field(1), Some("South Wall"));
        }
    }

    #[test]
    fn test_curve_on_the_wall_adds_nothing() {
        let idd = Idd::parse(IDD_TEXT).unwrap();
        let mut model = IdfModel::parse(&idd, IDF_TEXT).unwrap();
        let flat = vec![
            ControlPoint::from([0.5, 0.0, 2.5]),
            ControlPoint::from([1.5, 0.0, 2.0]),
            ControlPoint::from([2.5, 0.0, 2.0]),
            ControlPoint::from([3.5, 0.0, 2.5]),
        ];
        let outcome = CreateNurbsShading::new("South Wall", SHADING_TEMPLATE, flat)
            .execute(&mut model)
            .unwrap();
        assert_eq!(outcome, Outcome::Applied { added: 0 });
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_degree_needs_enough_points() {
        let idd = Idd::parse(IDD_TEXT).unwrap();
        let mut model = IdfModel::parse(&idd, IDF_TEXT).unwrap();
        let err = CreateNurbsShading::new("South Wall", SHADING_TEMPLATE, awning())
            .with_params(ShadingParams {
                degree: 4,
                ..ShadingParams::default()
            })
            .execute(&mut model)
            .unwrap_err();
        assert!(matches!(
            err,
            EpnurbsError::Curve(CurveError::NotEnoughControlPoints {
                required: 5,
                count: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_run_saves_file() {
        let (idd_path, idf_path) = write_fixture_files("shading-run");
        let outcome = CreateNurbsShading::new("South Wall", SHADING_TEMPLATE, awning())
            .run(&idd_path, &idf_path)
            .unwrap();
        assert!(outcome.is_applied());
        let text = fs::read_to_string(&idf_path).unwrap();
        assert!(text.contains("ShadeBack_1,"));

        fs::remove_file(&idd_path).unwrap();
        fs::remove_file(&idf_path).unwrap();
    }

    #[test]
    fn test_run_leaves_file_untouched_without_base_surface() {
        let (idd_path, idf_path) = write_fixture_files("shading-missing");
        let outcome = CreateNurbsShading::new("Roof", SHADING_TEMPLATE, awning())
            .run(&idd_path, &idf_path)
            .unwrap();
        assert_eq!(outcome, Outcome::BaseSurfaceNotFound);
        assert_eq!(fs::read_to_string(&idf_path).unwrap(), IDF_TEXT);

        fs::remove_file(&idd_path).unwrap();
        fs::remove_file(&idf_path).unwrap();
    }
}
