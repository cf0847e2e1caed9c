use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::contains_point;
use crate::math::Point2;

/// Default side length of a grid cell, in model units.
pub const DEFAULT_CELL_SIZE: f64 = 0.1;

/// One square cell of a [`CellGrid`], in plane-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Column index (along U).
    pub column: usize,
    /// Row index (along V).
    pub row: usize,
    /// Corners, counter-clockwise from the corner nearest the origin.
    pub corners: [Point2; 4],
    /// Center point, the one tested for containment.
    pub center: Point2,
}

/// A maximal run of consecutive contained cells in one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRun {
    /// Column index.
    pub column: usize,
    /// First contained row.
    pub first_row: usize,
    /// Last contained row (inclusive).
    pub last_row: usize,
}

impl CellRun {
    /// Number of cells in the run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.last_row - self.first_row + 1
    }

    /// Always `false`: a run holds at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Uniform grid of square cells covering a rectangular surface.
///
/// A `width x height` surface gets `floor(width / cell) - 1` columns and
/// `floor(height / cell) - 1` rows. Cell `(i, j)` spans
/// `[(i + 0.5) c, (i + 1.5) c] x [(j + 0.5) c, (j + 1.5) c]`, so its
/// center is `((i + 1) c, (j + 1) c)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGrid {
    columns: usize,
    rows: usize,
    cell_size: f64,
}

impl CellGrid {
    /// Creates the grid for a `width x height` surface.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::Degenerate`] if `cell_size` is not positive.
    pub fn new(width: f64, height: f64, cell_size: f64) -> Result<Self> {
        if cell_size <= 0.0 || !cell_size.is_finite() {
            return Err(GeometryError::Degenerate(format!(
                "grid cell size must be positive, got {cell_size}"
            ))
            .into());
        }
        Ok(Self {
            columns: cells_along(width, cell_size),
            rows: cells_along(height, cell_size),
            cell_size,
        })
    }

    /// Number of columns (along U).
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows (along V).
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Side length of a cell.
    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Returns cell `(column, row)`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn cell(&self, column: usize, row: usize) -> GridCell {
        let c = self.cell_size;
        let (i, j) = (column as f64, row as f64);
        GridCell {
            column,
            row,
            corners: [
                Point2::new((i + 0.5) * c, (j + 0.5) * c),
                Point2::new((i + 1.5) * c, (j + 0.5) * c),
                Point2::new((i + 1.5) * c, (j + 1.5) * c),
                Point2::new((i + 0.5) * c, (j + 1.5) * c),
            ],
            center: Point2::new((i + 1.0) * c, (j + 1.0) * c),
        }
    }

    /// Corners of the rectangle covered by `run`: the first cell's corners
    /// 0 and 1 followed by the last cell's corners 2 and 3.
    #[must_use]
    pub fn run_corners(&self, run: &CellRun) -> [Point2; 4] {
        let first = self.cell(run.column, run.first_row);
        let last = self.cell(run.column, run.last_row);
        [first.corners[0], first.corners[1], last.corners[2], last.corners[3]]
    }

    /// Finds the cells whose centers lie inside `polygon` and merges them
    /// into per-column runs, ordered by column then row.
    #[must_use]
    pub fn rasterize(&self, polygon: &[Point2]) -> Vec<CellRun> {
        let mut runs = Vec::new();
        let mut inside_cells = 0usize;

        for column in 0..self.columns {
            let mut current: Option<CellRun> = None;
            for row in 0..self.rows {
                if !contains_point(&self.cell(column, row).center, polygon) {
                    continue;
                }
                inside_cells += 1;
                current = match current {
                    Some(run) if run.last_row + 1 == row => Some(CellRun {
                        last_row: row,
                        ..run
                    }),
                    Some(run) => {
                        runs.push(run);
                        Some(CellRun {
                            column,
                            first_row: row,
                            last_row: row,
                        })
                    }
                    None => Some(CellRun {
                        column,
                        first_row: row,
                        last_row: row,
                    }),
                };
            }
            if let Some(run) = current {
                runs.push(run);
            }
        }

        debug!(
            columns = self.columns,
            rows = self.rows,
            inside_cells,
            runs = runs.len(),
            "rasterized region"
        );
        runs
    }
}

/// `floor(extent / cell) - 1`, clamped at zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cells_along(extent: f64, cell_size: f64) -> usize {
    let whole = (extent / cell_size).floor();
    if whole.is_finite() && whole > 0.0 {
        (whole as usize).saturating_sub(1)
    } else {
        0
    }
}
