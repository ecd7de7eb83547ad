//! # vorowkt
//!
//! `vorowkt` computes the 3D Voronoi cell of every point in a cloud and writes
//! each cell's boundary as a `POLYHEDRALSURFACE` in well-known text. It can be
//! used from Rust as well as compiled to WebAssembly (WASM).
//!
//! ## Features
//!
//! - **Container sizing**: The cells are built inside a padded box around the
//!   points, with axis lengths never below a threshold so flat and collinear
//!   clouds still work, and a grid resolution chosen for a constant number of
//!   points per bin.
//! - **Half-edge face extraction**: Every face of a cell is recovered exactly
//!   once from its vertex/edge graph, wound counter-clockwise seen from outside.
//! - **Deterministic output**: Coordinates are written with full `f64`
//!   precision, so identical cells give identical text.
//! - **Parallel**: Cells are built and written with `rayon`.
//!
//! ## Example
//!
//! ```
//! let x = [0.0, 10.0];
//! let y = [0.0, 10.0];
//! let z = [0.0, 10.0];
//! let cells = vorowkt::compute_voronoi(&x, &y, &z, 2.0).unwrap();
//! assert_eq!(cells.len(), 2);
//! assert!(cells[0].as_deref().unwrap().starts_with("POLYHEDRALSURFACE((("));
//! ```
//!
//! ## Main Interface
//!
//! The primary entry point is [`compute_voronoi`]; [`compute_voronoi_with`]
//! takes a [`VoronoiConfig`] for container and output settings.

mod algo_grid;
mod bounds;
mod cell;
mod container;
mod error;
mod faces;
mod halfedge;
mod tessellation;
mod util;
mod vector;
mod voronoi;
mod wasm;
mod wkt;

pub use algo_grid::AlgorithmGrid;
pub use bounds::BoundingBox;
pub use bounds::BOX_ID_BOTTOM;
pub use bounds::BOX_ID_TOP;
pub use bounds::BOX_ID_FRONT;
pub use bounds::BOX_ID_BACK;
pub use bounds::BOX_ID_LEFT;
pub use bounds::BOX_ID_RIGHT;
pub use cell::CellScratch;
pub use cell::VoronoiCell;
pub use container::Container;
pub use container::ContainerConfig;
pub use container::DivisionPolicy;
pub use container::DEFAULT_DENSITY;
pub use container::DEFAULT_THRESHOLD;
pub use container::MAX_BINS_PER_POINT;
pub use error::CellError;
pub use error::TopologyError;
pub use error::VoronoiError;
pub use faces::extract_faces;
pub use faces::extract_rings;
pub use faces::Face;
pub use faces::FaceStyle;
pub use faces::Ring;
pub use halfedge::check_reciprocity;
pub use halfedge::HalfEdgeCell;
pub use halfedge::HalfEdgeTable;
pub use tessellation::Tessellation;
pub use util::Timed;
pub use vector::Point3;
pub use voronoi::compute_voronoi;
pub use voronoi::compute_voronoi_with;
pub use voronoi::VoronoiConfig;
pub use wkt::cell_record;
pub use wkt::polyhedral_surface;
pub use wkt::PolyhedralSurface;
pub use wkt::write_polyhedral_surface;
