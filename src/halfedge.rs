use crate::error::TopologyError;
use crate::vector::Point3;

/// Read-only view of a convex cell as a half-edge table.
///
/// Each vertex `v` owns `degree(v)` directed edges, addressed by slot. Slot
/// order is cyclic and oriented so that, after arriving at a vertex through
/// an edge, the cyclic successor of the edge leading back walks along the
/// same face. Every face is then traced with its vertices counter-clockwise
/// when seen from outside the cell.
pub trait HalfEdgeCell {
    /// Number of vertices of the cell.
    fn vertex_count(&self) -> usize;

    /// Coordinates of vertex `v`.
    fn vertex(&self, v: usize) -> Point3;

    /// Number of edges leaving vertex `v`.
    fn degree(&self, v: usize) -> usize;

    /// Target vertex of edge `slot` of vertex `v`.
    fn edge(&self, v: usize, slot: usize) -> usize;

    /// Slot on `edge(v, slot)` of the edge leading back to `v`, if there is one.
    fn reciprocal(&self, v: usize, slot: usize) -> Option<usize>;

    /// Next slot after `slot` in the cyclic edge order of `v`.
    #[inline]
    fn cycle_up(&self, v: usize, slot: usize) -> usize {
        if slot + 1 == self.degree(v) { 0 } else { slot + 1 }
    }

    /// For the edge `v -> w` in `slot`, the slot on `w` following the
    /// reciprocal edge `w -> v`.
    #[inline]
    fn cyclic_successor(&self, v: usize, slot: usize) -> Option<usize> {
        let w = self.edge(v, slot);
        self.reciprocal(v, slot).map(|back| self.cycle_up(w, back))
    }

    /// Total number of directed edges.
    fn half_edge_count(&self) -> usize {
        (0..self.vertex_count()).map(|v| self.degree(v)).sum()
    }
}

/// Verifies the invariants the face walk relies on: every vertex is a
/// polyhedron corner and every directed edge has a reciprocal.
pub fn check_reciprocity<C: HalfEdgeCell + ?Sized>(cell: &C) -> Result<(), TopologyError> {
    let count = cell.vertex_count();
    for vertex in 0..count {
        let degree = cell.degree(vertex);
        if degree < 3 {
            return Err(TopologyError::LowDegree { vertex, degree });
        }
        for slot in 0..degree {
            let target = cell.edge(vertex, slot);
            if target >= count {
                return Err(TopologyError::DanglingEdge { vertex, slot, target });
            }
            match cell.reciprocal(vertex, slot) {
                Some(back) if back < cell.degree(target) && cell.edge(target, back) == vertex => {}
                _ => return Err(TopologyError::MissingReciprocal { vertex, slot, target }),
            }
        }
    }
    Ok(())
}

/// An owned half-edge table.
///
/// Edges for vertex `v` are at `edges[offsets[v] .. offsets[v + 1]]`, and
/// `reciprocals` holds the back slot of every edge at the same position.
#[derive(Clone, Debug, Default)]
pub struct HalfEdgeTable {
    vertices: Vec<Point3>,
    offsets: Vec<usize>,
    edges: Vec<usize>,
    reciprocals: Vec<usize>,
}

impl HalfEdgeTable {
    /// Builds a table from per-vertex neighbor lists in cyclic order.
    pub fn from_adjacency(vertices: Vec<Point3>, adjacency: &[Vec<usize>]) -> Result<Self, TopologyError> {
        if vertices.len() != adjacency.len() {
            return Err(TopologyError::VertexCountMismatch {
                vertices: vertices.len(),
                adjacency: adjacency.len(),
            });
        }

        let mut offsets = Vec::with_capacity(adjacency.len() + 1);
        let mut edges = Vec::new();
        offsets.push(0);
        for neighbors in adjacency {
            edges.extend_from_slice(neighbors);
            offsets.push(edges.len());
        }

        let mut reciprocals = Vec::with_capacity(edges.len());
        for (vertex, neighbors) in adjacency.iter().enumerate() {
            for (slot, &target) in neighbors.iter().enumerate() {
                let back = adjacency
                    .get(target)
                    .ok_or(TopologyError::DanglingEdge { vertex, slot, target })?
                    .iter()
                    .position(|&u| u == vertex)
                    .ok_or(TopologyError::MissingReciprocal { vertex, slot, target })?;
                reciprocals.push(back);
            }
        }

        let table = HalfEdgeTable { vertices, offsets, edges, reciprocals };
        check_reciprocity(&table)?;
        Ok(table)
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }
}

impl HalfEdgeCell for HalfEdgeTable {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn vertex(&self, v: usize) -> Point3 {
        self.vertices[v]
    }

    fn degree(&self, v: usize) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }

    fn edge(&self, v: usize, slot: usize) -> usize {
        self.edges[self.offsets[v] + slot]
    }

    fn reciprocal(&self, v: usize, slot: usize) -> Option<usize> {
        self.reciprocals.get(self.offsets[v] + slot).copied()
    }

    fn half_edge_count(&self) -> usize {
        self.edges.len()
    }
}
