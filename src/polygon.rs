//! Polygon records and their text rendering.
//!
//! Emitters build [`PolygonRecord`]s; only [`PolygonTemplate::render`]
//! turns them into IDF text.

use std::fmt::Write as _;

use crate::math::Point3;

/// Placeholder replaced by the record label.
pub const IDX_TOKEN: &str = "<IDX>";
/// Placeholder replaced by the base surface name.
pub const BASE_SURFACE_TOKEN: &str = "<BASESURFACE>";
/// Placeholder replaced by the front vertex list.
pub const VERTICES_TOKEN: &str = "<VERTICES>";
/// Placeholder replaced by the back vertex list.
pub const COUNTER_VERTICES_TOKEN: &str = "<COUNTERVERTICES>";

/// How the back face vertex order is derived from the front one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackWinding {
    /// Plain reversal: `[a, b, c, d]` becomes `[d, c, b, a]`.
    Reversed,
    /// Reversal keeping the first vertex: `[a, b, c, d]` becomes `[a, d, c, b]`.
    AnchoredReversed,
}

/// A planar polygon ready to be written as a two-sided surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRecord {
    label: String,
    base_surface: String,
    vertices: Vec<Point3>,
    counter_vertices: Vec<Point3>,
}

impl PolygonRecord {
    /// Creates a record from its front vertices; the back vertex list is
    /// derived according to `back`.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        base_surface: impl Into<String>,
        vertices: Vec<Point3>,
        back: BackWinding,
    ) -> Self {
        let mut counter_vertices = vertices.clone();
        match back {
            BackWinding::Reversed => counter_vertices.reverse(),
            BackWinding::AnchoredReversed => {
                if counter_vertices.len() > 1 {
                    counter_vertices[1..].reverse();
                }
            }
        }
        Self {
            label: label.into(),
            base_surface: base_surface.into(),
            vertices,
            counter_vertices,
        }
    }

    /// Returns the label substituted for `<IDX>`.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the base surface name.
    #[must_use]
    pub fn base_surface(&self) -> &str {
        &self.base_surface
    }

    /// Returns the front-facing vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Returns the back-facing vertices.
    #[must_use]
    pub fn counter_vertices(&self) -> &[Point3] {
        &self.counter_vertices
    }
}

/// Formats vertices as a flat `x, y, z, x, y, z, ...` list with six decimals.
#[must_use]
pub fn format_vertices(points: &[Point3]) -> String {
    let mut out = String::with_capacity(points.len() * 3 * 12);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{:.6}, {:.6}, {:.6}", p.x, p.y, p.z);
    }
    out
}

/// Caller-supplied IDF text with `<IDX>`, `<BASESURFACE>`, `<VERTICES>`
/// and `<COUNTERVERTICES>` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolygonTemplate {
    text: String,
}

impl PolygonTemplate {
    /// Wraps template text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the raw template text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Substitutes every placeholder with the values of `record`.
    #[must_use]
    pub fn render(&self, record: &PolygonRecord) -> String {
        self.text
            .replace(IDX_TOKEN, record.label())
            .replace(BASE_SURFACE_TOKEN, record.base_surface())
            .replace(VERTICES_TOKEN, &format_vertices(record.vertices()))
            .replace(COUNTER_VERTICES_TOKEN, &format_vertices(record.counter_vertices()))
    }

    /// Renders all records and concatenates the results.
    #[must_use]
    pub fn render_all(&self, records: &[PolygonRecord]) -> String {
        records.iter().map(|r| self.render(r)).collect()
    }
}

impl From<&str> for PolygonTemplate {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for PolygonTemplate {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
