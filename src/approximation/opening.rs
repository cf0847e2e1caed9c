use tracing::debug;

use crate::error::Result;
use crate::geometry::PlaneBasis;
use crate::math::polygon_2d::signed_area;
use crate::math::{Point2, Point3};
use crate::polygon::{BackWinding, PolygonRecord};

use super::raster::{CellGrid, CellRun};

/// Result of approximating a closed outline by grid rectangles.
#[derive(Debug, Clone)]
pub struct OpeningApproximation {
    /// Grid laid over the base surface.
    pub grid: CellGrid,
    /// Contained cells, merged per column.
    pub runs: Vec<CellRun>,
    /// One rectangle per run.
    pub records: Vec<PolygonRecord>,
}

impl OpeningApproximation {
    /// Area of the wall covered by the contained cells.
    #[must_use]
    pub fn covered_area(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let cells = self.runs.iter().map(CellRun::len).sum::<usize>() as f64;
        cells * self.grid.cell_size() * self.grid.cell_size()
    }
}

/// Projects `outline` onto the plane and returns its plane-local
/// coordinates.
#[must_use]
pub fn outline_to_local(basis: &PlaneBasis, outline: &[Point3]) -> Vec<Point2> {
    outline
        .iter()
        .map(|p| basis.to_local(&basis.project(p)))
        .collect()
}

/// Approximates the region enclosed by `outline` on the rectangular base
/// surface described by `basis` with rectangles of whole grid cells.
///
/// # Errors
///
/// Returns an error if `cell_size` is not positive.
pub fn approximate_opening(
    basis: &PlaneBasis,
    outline: &[Point3],
    cell_size: f64,
    base_surface: &str,
) -> Result<OpeningApproximation> {
    let local = outline_to_local(basis, outline);
    let grid = CellGrid::new(basis.width(), basis.height(), cell_size)?;
    let runs = grid.rasterize(&local);
    let records = runs
        .iter()
        .map(|run| run_record(basis, &grid, run, base_surface))
        .collect::<Vec<_>>();

    let approximation = OpeningApproximation {
        grid,
        runs,
        records,
    };
    debug!(
        rectangles = approximation.records.len(),
        outline_area = signed_area(&local).abs(),
        covered_area = approximation.covered_area(),
        "approximated opening"
    );
    Ok(approximation)
}

/// Rectangle for a single run, labelled `"{column}_{first_row}"`.
fn run_record(basis: &PlaneBasis, grid: &CellGrid, run: &CellRun, base_surface: &str) -> PolygonRecord {
    let vertices = grid
        .run_corners(run)
        .iter()
        .map(|uv| basis.to_world(uv))
        .collect();
    PolygonRecord::new(
        format!("{}_{}", run.column, run.first_row),
        base_surface,
        vertices,
        BackWinding::AnchoredReversed,
    )
}
