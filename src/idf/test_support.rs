//! Fixture dictionary and model shared by the unit tests.
#![allow(clippy::unwrap_used)]

/// A trimmed-down `Energy+.idd` with the classes the crate touches.
pub(crate) const IDD_TEXT: &str = r"!IDD_Version 9.4.0
! Trimmed dictionary for unit tests.

\group Simulation Parameters

Version,
      \memo Specifies the EnergyPlus version of the IDF file.
      \unique-object
      \format singleLine
  A1 ; \field Version Identifier
      \default 9.4

\group Thermal Zones and Surfaces

Zone,
      \memo Defines a thermal zone of the building.
  A1 , \field Name
      \required-field
  N1 , \field Direction of Relative North
      \units deg
  N2 , \field X Origin
      \units m
  N3 , \field Y Origin
      \units m
  N4 ; \field Z Origin
      \units m

BuildingSurface:Detailed,
      \memo Allows for detailed entry of building heat transfer surfaces.
      \extensible:3 -- duplicate last set of x,y,z coordinates (last 3 fields), remembering to remove ; from inner fields.
      \format vertices
  A1 , \field Name
      \required-field
  A2 , \field Surface Type
      \key Floor
      \key Wall
      \key Ceiling
      \key Roof
  A3 , \field Construction Name
  A4 , \field Zone Name
  A5 , \field Space Name
  A6 , \field Outside Boundary Condition
  A7 , \field Outside Boundary Condition Object
  A8 , \field Sun Exposure
  A9 , \field Wind Exposure
  N1 , \field View Factor to Ground
      \autocalculatable
  N2 , \field Number of Vertices
      \autocalculatable
  N3 , \field Vertex 1 X-coordinate
      \begin-extensible
  N4 , \field Vertex 1 Y-coordinate
  N5 , \field Vertex 1 Z-coordinate
  N6 , \field Vertex 2 X-coordinate
  N7 , \field Vertex 2 Y-coordinate
  N8 , \field Vertex 2 Z-coordinate
  N9 , \field Vertex 3 X-coordinate
  N10, \field Vertex 3 Y-coordinate
  N11, \field Vertex 3 Z-coordinate
  N12, \field Vertex 4 X-coordinate
  N13, \field Vertex 4 Y-coordinate
  N14; \field Vertex 4 Z-coordinate

FenestrationSurface:Detailed,
      \memo Allows for detailed entry of subsurfaces.
      \format vertices
  A1 , \field Name
      \required-field
  A2 , \field Surface Type
  A3 , \field Construction Name
  A4 , \field Building Surface Name
  A5 , \field Outside Boundary Condition Object
  N1 , \field View Factor to Ground
      \autocalculatable
  A6 , \field Frame and Divider Name
  N2 , \field Multiplier
      \default 1.0
  N3 , \field Number of Vertices
      \autocalculatable
  N4 , \field Vertex 1 X-coordinate
  N5 , \field Vertex 1 Y-coordinate
  N6 , \field Vertex 1 Z-coordinate
  N7 , \field Vertex 2 X-coordinate
  N8 , \field Vertex 2 Y-coordinate
  N9 , \field Vertex 2 Z-coordinate
  N10, \field Vertex 3 X-coordinate
  N11, \field Vertex 3 Y-coordinate
  N12, \field Vertex 3 Z-coordinate
  N13, \field Vertex 4 X-coordinate
  N14, \field Vertex 4 Y-coordinate
  N15; \field Vertex 4 Z-coordinate

Shading:Zone:Detailed,
      \memo Used for shading elements such as overhangs attached to a base surface.
      \extensible:3
      \format vertices
  A1 , \field Name
      \required-field
  A2 , \field Base Surface Name
  A3 , \field Transmittance Schedule Name
  N1 , \field Number of Vertices
      \autocalculatable
  N2 , \field Vertex 1 X-coordinate
      \begin-extensible
  N3 , \field Vertex 1 Y-coordinate
  N4 , \field Vertex 1 Z-coordinate
  N5 , \field Vertex 2 X-coordinate
  N6 , \field Vertex 2 Y-coordinate
  N7 , \field Vertex 2 Z-coordinate
  N8 , \field Vertex 3 X-coordinate
  N9 , \field Vertex 3 Y-coordinate
  N10; \field Vertex 3 Z-coordinate
";

/// A model with one 4 m x 3 m wall in the XZ plane at y = 0.
///
/// The vertices start at the upper-left corner and run counter-clockwise
/// seen from outside (-y).
pub(crate) const IDF_TEXT: &str = "!- Test building

Version,
    9.4;                     !- Version Identifier

Zone,
    Office,                  !- Name
    0,                       !- Direction of Relative North
    0,                       !- X Origin
    0,                       !- Y Origin
    0;                       !- Z Origin

BuildingSurface:Detailed,
    South Wall,              !- Name
    Wall,                    !- Surface Type
    Exterior Wall,           !- Construction Name
    Office,                  !- Zone Name
    ,                        !- Space Name
    Outdoors,                !- Outside Boundary Condition
    ,                        !- Outside Boundary Condition Object
    SunExposed,              !- Sun Exposure
    WindExposed,             !- Wind Exposure
    autocalculate,           !- View Factor to Ground
    4,                       !- Number of Vertices
    0, 0, 3,                 !- Vertex 1
    0, 0, 0,                 !- Vertex 2
    4, 0, 0,                 !- Vertex 3
    4, 0, 3;                 !- Vertex 4
";

/// Opening template writing one window per rectangle.
pub(crate) const OPENING_TEMPLATE: &str = "FenestrationSurface:Detailed,
    Opening_<IDX>, Window, Glazing, <BASESURFACE>, , autocalculate, , 1, 4,
    <VERTICES>;
";

/// Shading template writing both faces of every piece.
pub(crate) const SHADING_TEMPLATE: &str = "Shading:Zone:Detailed,
    Shade_<IDX>, <BASESURFACE>, , autocalculate, <VERTICES>;
Shading:Zone:Detailed,
    ShadeBack_<IDX>, <BASESURFACE>, , autocalculate, <COUNTERVERTICES>;
";

/// Unique scratch path in the system temp directory.
pub(crate) fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("epnurbs-{}-{name}", std::process::id()))
}

/// Writes the fixture dictionary and model to scratch files named after
/// `name` and returns their paths.
pub(crate) fn write_fixture_files(name: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    let idd_path = scratch_path(&format!("{name}.idd"));
    let idf_path = scratch_path(&format!("{name}.idf"));
    std::fs::write(&idd_path, IDD_TEXT).unwrap();
    std::fs::write(&idf_path, IDF_TEXT).unwrap();
    (idd_path, idf_path)
}
