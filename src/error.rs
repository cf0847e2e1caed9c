use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the epnurbs crate.
#[derive(Debug, Error)]
pub enum EpnurbsError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Idf(#[from] IdfError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Contract violations when constructing or sampling a NURBS curve.
#[derive(Debug, Error, PartialEq)]
pub enum CurveError {
    #[error("curve degree must be at least 1")]
    InvalidDegree,

    #[error("degree {degree} curve needs at least {required} control points, got {count}")]
    NotEnoughControlPoints {
        degree: usize,
        required: usize,
        count: usize,
    },

    #[error("control point weight must be positive, got {0}")]
    InvalidWeight(f64),

    #[error("knot vector cannot be empty")]
    EmptyKnotVector,

    #[error("knot vector has {actual} knots, expected {expected}")]
    KnotCount { expected: usize, actual: usize },

    #[error("knot vector decreases at index {index}")]
    DecreasingKnots { index: usize },

    #[error("knot vector is not clamped: the first and last {multiplicity} knots must be equal")]
    NotClamped { multiplicity: usize },

    #[error("parameter {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange { value: f64, min: f64, max: f64 },

    #[error("evaluation range [{start}, {end}] lies outside the curve domain [{min}, {max}]")]
    RangeOutOfDomain {
        start: f64,
        end: f64,
        min: f64,
        max: f64,
    },

    #[error("number of evaluated points must be positive")]
    InvalidSampleCount,
}

/// Errors raised while reading, querying or writing IDF and IDD files.
#[derive(Debug, Error)]
pub enum IdfError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("class {0} is not defined in the data dictionary")]
    UnknownClass(String),

    #[error("class {class} has no field named {field}")]
    MissingField { class: String, field: String },

    #[error("field {field} of {class} holds {value:?}, which is not a number")]
    InvalidNumber {
        class: String,
        field: String,
        value: String,
    },

    #[error("surface {name} needs at least 3 vertices, found {found}")]
    TooFewVertices { name: String, found: usize },

    #[error("object not found in model")]
    ObjectNotFound,

    #[error("model was not loaded from a file and has no path to save to")]
    NoSourcePath,
}

/// Convenience type alias for results using [`EpnurbsError`].
pub type Result<T> = std::result::Result<T, EpnurbsError>;
