use crate::error::{GeometryError, Result};
use crate::math::vector::{cross, foot, normalize};
use crate::math::{Point2, Point3, Vector3};

/// Orthonormal frame of a rectangular reference surface.
///
/// Built from three consecutive corners: upper-left (`ulc`), bottom-left
/// (`blc`) and bottom-right (`brc`). The origin is `ulc`, `u_dir` points
/// from `ulc` to `blc`, the normal is `(blc - ulc) × (brc - blc)` and
/// `v_dir = normal × u_dir`. Plane-local coordinates are
/// `(<X - origin, u_dir>, <X - origin, v_dir>)`.
#[derive(Debug, Clone)]
pub struct PlaneBasis {
    origin: Point3,
    u_dir: Vector3,
    v_dir: Vector3,
    normal: Vector3,
    width: f64,
    height: f64,
}

impl PlaneBasis {
    /// Creates the frame of the rectangle with corners `ulc`, `blc`, `brc`
    /// (the fourth corner is implied as `ulc + brc - blc`).
    ///
    /// # Errors
    ///
    /// Returns an error if an edge has zero length or the corners are
    /// collinear.
    pub fn from_corners(ulc: Point3, blc: Point3, brc: Point3) -> Result<Self> {
        let first_edge = blc - ulc;
        let second_edge = brc - blc;

        let u_dir = normalize(&first_edge)?;
        let normal = normalize(&cross(&first_edge, &second_edge)).map_err(|_| {
            GeometryError::Degenerate("surface corners are collinear".into())
        })?;
        let v_dir = normalize(&cross(&normal, &u_dir))?;

        Ok(Self {
            origin: ulc,
            u_dir,
            v_dir,
            normal,
            width: first_edge.norm(),
            height: second_edge.norm(),
        })
    }

    /// Returns the origin (upper-left corner).
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit U axis.
    #[must_use]
    pub fn u_dir(&self) -> &Vector3 {
        &self.u_dir
    }

    /// Returns the unit V axis.
    #[must_use]
    pub fn v_dir(&self) -> &Vector3 {
        &self.v_dir
    }

    /// Returns the unit normal.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Extent along U (length of the `ulc`-`blc` edge).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Extent along V (length of the `blc`-`brc` edge).
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Foot of the perpendicular from `point` to the plane.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point3 {
        foot(point, &self.origin, &self.normal)
    }

    /// Plane-local `(u, v)` coordinates of `point`.
    ///
    /// Exact for points on the plane; for other points this is the local
    /// coordinate of their foot.
    #[must_use]
    pub fn to_local(&self, point: &Point3) -> Point2 {
        let diff = point - self.origin;
        Point2::new(diff.dot(&self.u_dir), diff.dot(&self.v_dir))
    }

    /// Maps plane-local coordinates back to 3D.
    #[must_use]
    pub fn to_world(&self, uv: &Point2) -> Point3 {
        self.origin + self.u_dir * uv.x + self.v_dir * uv.y
    }

    /// Moves `point` by `distance` along the normal.
    #[must_use]
    pub fn offset(&self, point: &Point3, distance: f64) -> Point3 {
        point + self.normal * distance
    }
}
