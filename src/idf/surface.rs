use tracing::trace;

use crate::error::{IdfError, Result};
use crate::geometry::PlaneBasis;
use crate::math::Point3;

use super::idd::Idd;
use super::model::IdfObject;

/// Field that precedes the vertex coordinates in surface classes.
pub const NUMBER_OF_VERTICES_FIELD: &str = "Number of Vertices";

/// Reads the vertex list of a surface object.
///
/// The coordinates are the `x, y, z` triples following the
/// `Number of Vertices` field. If that field holds a count, at most that
/// many vertices are read; otherwise (`autocalculate` or blank) every
/// complete triple is used. Blank coordinate fields end the list.
///
/// # Errors
///
/// Returns [`IdfError::UnknownClass`] or [`IdfError::MissingField`] if the
/// dictionary does not describe a vertex list for this class, and
/// [`IdfError::InvalidNumber`] if a coordinate does not parse.
pub fn surface_vertices(object: &IdfObject, idd: &Idd) -> Result<Vec<Point3>> {
    let class = idd
        .class(object.class())
        .ok_or_else(|| IdfError::UnknownClass(object.class().to_owned()))?;
    let count_index = class
        .field_index(NUMBER_OF_VERTICES_FIELD)
        .ok_or_else(|| IdfError::MissingField {
            class: class.name().to_owned(),
            field: NUMBER_OF_VERTICES_FIELD.to_owned(),
        })?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let declared = object
        .field(count_index)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| *n >= 0.0)
        .map(|n| n as usize);

    let coords = object
        .fields()
        .iter()
        .enumerate()
        .skip(count_index + 1)
        .take_while(|(_, v)| !v.trim().is_empty())
        .map(|(i, v)| {
            v.trim().parse::<f64>().map_err(|_| IdfError::InvalidNumber {
                class: class.name().to_owned(),
                field: class
                    .field_name(i)
                    .map_or_else(|| format!("field {}", i + 1), str::to_owned),
                value: v.clone(),
            })
        })
        .collect::<std::result::Result<Vec<f64>, IdfError>>()?;

    let mut vertices: Vec<Point3> = coords
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect();
    if let Some(n) = declared {
        vertices.truncate(n);
    }
    trace!(surface = object.name().unwrap_or_default(), vertices = vertices.len(), "read surface vertices");
    Ok(vertices)
}

/// The three leading corners of a rectangular base surface.
///
/// EnergyPlus lists surface vertices starting at the upper-left corner and
/// going counter-clockwise seen from outside, so the first three are the
/// upper-left, bottom-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceCorners {
    pub upper_left: Point3,
    pub bottom_left: Point3,
    pub bottom_right: Point3,
}

impl SurfaceCorners {
    /// Reads the corners of a `BuildingSurface:Detailed` object.
    ///
    /// # Errors
    ///
    /// Returns [`IdfError::TooFewVertices`] if the surface has fewer than
    /// three vertices, or any error from [`surface_vertices`].
    pub fn from_object(object: &IdfObject, idd: &Idd) -> Result<Self> {
        let vertices = surface_vertices(object, idd)?;
        match vertices[..] {
            [upper_left, bottom_left, bottom_right, ..] => Ok(Self {
                upper_left,
                bottom_left,
                bottom_right,
            }),
            _ => Err(IdfError::TooFewVertices {
                name: object.name().unwrap_or_default().to_owned(),
                found: vertices.len(),
            }
            .into()),
        }
    }

    /// Builds the local frame of the surface plane.
    ///
    /// # Errors
    ///
    /// Returns an error if the corners are coincident or collinear.
    pub fn basis(&self) -> Result<PlaneBasis> {
        PlaneBasis::from_corners(self.upper_left, self.bottom_left, self.bottom_right)
    }
}
