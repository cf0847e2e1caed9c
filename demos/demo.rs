//! Adds a NURBS opening, a NURBS shading or a row of rectangular shadings to
//! an IDF file.
//!
//! Usage:
//! ```text
//! cargo run --example demo -- <Energy+.idd> <model.idf> opening <surface>
//! cargo run --example demo -- <Energy+.idd> <model.idf> shading <surface>
//! cargo run --example demo -- <Energy+.idd> <model.idf> rect <surface>
//! ```
//!
//! The control points below assume a wall in the XZ plane spanning roughly
//! 4 m by 3 m from the origin. The model file is rewritten in place.

use std::process::ExitCode;

use epnurbs::geometry::ControlPoint;
use epnurbs::math::Point3;
use epnurbs::operations::{CreateNurbsOpening, CreateNurbsShading, CreateRectShading, Outcome};

const OPENING_TEMPLATE: &str = "FenestrationSurface:Detailed,
    Opening_<IDX>, Window, Glazing, <BASESURFACE>, , autocalculate, , 1, 4,
    <VERTICES>;
";

const SHADING_TEMPLATE: &str = "Shading:Zone:Detailed,
    Shade_<IDX>, <BASESURFACE>, , autocalculate, <VERTICES>;
Shading:Zone:Detailed,
    ShadeBack_<IDX>, <BASESURFACE>, , autocalculate, <COUNTERVERTICES>;
";

fn main() -> ExitCode {
    // Default: WARN for everything, INFO for epnurbs.
    // Override with RUST_LOG env var (e.g. RUST_LOG=epnurbs=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("demo=info".parse().unwrap_or_default())
        .add_directive("epnurbs=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [idd, idf, kind, surface] = args.as_slice() else {
        eprintln!("usage: demo <idd> <idf> opening|shading|rect <surface>");
        return ExitCode::FAILURE;
    };

    let result = match kind.as_str() {
        "opening" => CreateNurbsOpening::new(
            surface.as_str(),
            OPENING_TEMPLATE,
            vec![
                ControlPoint::from([1.0, 0.0, 0.5]),
                ControlPoint::from([3.0, 0.0, 0.5]),
                ControlPoint::from([3.0, 0.0, 2.5]),
                ControlPoint::from([1.0, 0.0, 2.5]),
            ],
        )
        .run(idd, idf),
        "shading" => CreateNurbsShading::new(
            surface.as_str(),
            SHADING_TEMPLATE,
            vec![
                ControlPoint::from([0.5, 0.0, 2.7]),
                ControlPoint::new(Point3::new(1.5, -1.0, 2.7), 2.0),
                ControlPoint::new(Point3::new(2.5, -1.0, 2.7), 2.0),
                ControlPoint::from([3.5, 0.0, 2.7]),
            ],
        )
        .run(idd, idf),
        "rect" => CreateRectShading::new(
            surface.as_str(),
            SHADING_TEMPLATE,
            Point3::new(0.5, 0.0, 2.7),
            Point3::new(3.5, 0.0, 2.7),
            vec![0.2, 0.4, 0.6, 0.6, 0.4, 0.2],
        )
        .run(idd, idf),
        other => {
            eprintln!("unknown operation {other:?}, expected opening, shading or rect");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(Outcome::Applied { added }) => {
            tracing::info!(added, path = %idf, "model updated");
            ExitCode::SUCCESS
        }
        Ok(Outcome::BaseSurfaceNotFound) => {
            eprintln!("no BuildingSurface:Detailed named {surface:?} in {idf}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
