//! Error types.
//!
//! Two tiers exist: [`VoronoiError`] rejects a whole call before any work is
//! done, while [`CellError`] (and the [`TopologyError`] it may carry)
//! describes a single cell that could not be built or walked. The latter never
//! aborts a call; the affected cell is reported as missing.

/// Precondition violations of a Voronoi computation.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum VoronoiError {
    /// The coordinate slices have different lengths.
    #[error("Lengths of coordinate vectors are not equal: x has {x}, y has {y}, z has {z}.")]
    LengthMismatch {
        /// Length of the x coordinates
        x: usize,
        /// Length of the y coordinates
        y: usize,
        /// Length of the z coordinates
        z: usize,
    },

    /// Fewer than two points were given.
    #[error("Cannot generate cells if points are less than 2 (got {0}).")]
    TooFewPoints(usize),

    /// The container ratio is below 1 or not a number.
    #[error("Invalid containerRatio {0}: Value must not be less than 1.")]
    InvalidContainerRatio(f64),

    /// A coordinate is NaN or infinite.
    #[error("Coordinate of point {index} is not finite.")]
    NonFiniteCoordinate {
        /// Input position of the offending point
        index: usize,
    },
}

/// Internal-consistency failures of a cell's half-edge table.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum TopologyError {
    /// An edge points at a vertex that does not exist.
    #[error("Edge {slot} of vertex {vertex} points to missing vertex {target}")]
    DanglingEdge {
        /// Source vertex
        vertex: usize,
        /// Edge slot on the source vertex
        slot: usize,
        /// Target vertex index
        target: usize,
    },

    /// The target of an edge has no edge leading back.
    #[error("Edge {slot} of vertex {vertex} has no reciprocal edge on vertex {target}")]
    MissingReciprocal {
        /// Source vertex
        vertex: usize,
        /// Edge slot on the source vertex
        slot: usize,
        /// Target vertex index
        target: usize,
    },

    /// A vertex has fewer than three edges and cannot be a polyhedron corner.
    #[error("Vertex {vertex} has degree {degree}, expected at least 3")]
    LowDegree {
        /// Vertex index
        vertex: usize,
        /// Number of edges on the vertex
        degree: usize,
    },

    /// Coordinates and adjacency lists describe different vertex counts.
    #[error("{vertices} vertex positions given for {adjacency} adjacency lists")]
    VertexCountMismatch {
        /// Number of vertex positions
        vertices: usize,
        /// Number of adjacency lists
        adjacency: usize,
    },

    /// A face walk closed after fewer than three vertices.
    #[error("Face walk starting at vertex {vertex}, edge {slot} closed after {len} vertices")]
    DegenerateFace {
        /// Starting vertex
        vertex: usize,
        /// Starting edge slot
        slot: usize,
        /// Number of vertices on the walk
        len: usize,
    },

    /// A face walk did not return to its starting vertex.
    #[error("Face walk starting at vertex {vertex}, edge {slot} did not close")]
    OpenFace {
        /// Starting vertex
        vertex: usize,
        /// Starting edge slot
        slot: usize,
    },
}

/// Reasons a single cell could not be built.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum CellError {
    /// Clipping removed the whole cell.
    #[error("cell of point {id} is empty")]
    Empty {
        /// Index of the point
        id: usize,
    },

    /// Another point sits at the same position, so no bisector exists.
    #[error("point {id} coincides with point {other}")]
    Coincident {
        /// Index of the point
        id: usize,
        /// Index of the coinciding point
        other: usize,
    },

    /// The clipped cell does not form a closed polyhedron.
    #[error("cell of point {id} is malformed: {source}")]
    Topology {
        /// Index of the point
        id: usize,
        /// The broken invariant
        source: TopologyError,
    },
}
