use crate::error::TopologyError;
use crate::halfedge::HalfEdgeCell;
use crate::vector::Point3;

/// A closed ring of points: the first point is repeated at the end.
pub type Ring = Vec<Point3>;

/// How the faces of a cell are written out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FaceStyle {
    /// One ring per fan triangle, anchored at the first vertex of the face.
    #[default]
    Triangles,
    /// One ring per face with all its vertices.
    Polygons,
}

/// One planar face of a cell, as vertex indices in walk order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Face {
    pub vertices: Vec<usize>,
}

impl Face {
    /// Fan triangulation anchored at the first vertex.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        let anchor = self.vertices[0];
        self.vertices[1..].windows(2).map(move |w| [anchor, w[0], w[1]])
    }
}

/// Enumerates every face of a cell exactly once.
///
/// Faces are discovered in vertex order, then slot order, starting from
/// vertex 1; faces through vertex 0 are reached from one of their other
/// vertices. Each walk marks the directed edges it follows, so every
/// directed edge is consumed by exactly one face. The marks live only for the
/// duration of this call and the cell itself is left untouched.
pub fn extract_faces<C: HalfEdgeCell + ?Sized>(cell: &C) -> Result<Vec<Face>, TopologyError> {
    let count = cell.vertex_count();
    let mut offsets = Vec::with_capacity(count);
    let mut total = 0;
    for v in 0..count {
        offsets.push(total);
        total += cell.degree(v);
    }
    let mut visited = vec![false; total];

    let mut faces = Vec::new();
    for v in 1..count {
        for s in 0..cell.degree(v) {
            if visited[offsets[v] + s] {
                continue;
            }
            mark(&mut visited, &offsets, v, s, (v, s))?;

            let mut w = cell.edge(v, s);
            let mut t = cell
                .cyclic_successor(v, s)
                .ok_or(TopologyError::MissingReciprocal { vertex: v, slot: s, target: w })?;
            mark(&mut visited, &offsets, w, t, (v, s))?;
            let mut x = cell.edge(w, t);

            let mut face = vec![v, w];
            while x != v {
                if face.len() > total {
                    return Err(TopologyError::OpenFace { vertex: v, slot: s });
                }
                face.push(x);
                let next = cell
                    .cyclic_successor(w, t)
                    .ok_or(TopologyError::MissingReciprocal { vertex: w, slot: t, target: x })?;
                mark(&mut visited, &offsets, x, next, (w, t))?;
                w = x;
                t = next;
                x = cell.edge(w, t);
            }

            if face.len() < 3 {
                return Err(TopologyError::DegenerateFace { vertex: v, slot: s, len: face.len() });
            }
            faces.push(Face { vertices: face });
        }
    }
    Ok(faces)
}

/// Marks edge `slot` of `vertex`, rejecting edges that leave the table.
fn mark(
    visited: &mut [bool],
    offsets: &[usize],
    vertex: usize,
    slot: usize,
    from: (usize, usize),
) -> Result<(), TopologyError> {
    let seen = offsets
        .get(vertex)
        .and_then(|&offset| visited.get_mut(offset + slot))
        .ok_or(TopologyError::DanglingEdge { vertex: from.0, slot: from.1, target: vertex })?;
    *seen = true;
    Ok(())
}

/// Extracts the faces of a cell as closed rings of coordinates.
pub fn extract_rings<C: HalfEdgeCell + ?Sized>(cell: &C, style: FaceStyle) -> Result<Vec<Ring>, TopologyError> {
    let faces = extract_faces(cell)?;
    let rings = match style {
        FaceStyle::Triangles => faces
            .iter()
            .flat_map(|face| face.triangles())
            .map(|[a, b, c]| vec![cell.vertex(a), cell.vertex(b), cell.vertex(c), cell.vertex(a)])
            .collect(),
        FaceStyle::Polygons => faces
            .iter()
            .map(|face| {
                let mut ring: Ring = face.vertices.iter().map(|&v| cell.vertex(v)).collect();
                ring.push(ring[0]);
                ring
            })
            .collect(),
    };
    Ok(rings)
}
