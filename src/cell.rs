use crate::bounds::BoundingBox;
use crate::bounds::{BOX_ID_BACK, BOX_ID_BOTTOM, BOX_ID_FRONT, BOX_ID_LEFT, BOX_ID_RIGHT, BOX_ID_TOP};
use crate::halfedge::HalfEdgeCell;
use crate::vector::Point3;

/// Tolerance on the signed distance to a cutting plane, relative to the
/// largest distance of any vertex from it.
const PLANE_EPS: f64 = 1e-10;

/// Scratch buffer to reuse allocations during clipping.
#[derive(Default, Clone)]
pub struct CellScratch {
    vertices: Vec<f64>,
    edge_buffer: Vec<u16>,
    neighbor_buffer: Vec<i32>,
    vertex_offsets: Vec<u16>,
    vertex_counts: Vec<u8>,

    dists: Vec<f64>,
    old_to_new: Vec<Option<u16>>,

    // (face id, cut vertex)
    face_cuts: Vec<(i32, u16)>,
    // (cut vertex, kept vertex, face left of the cut edge, face right of it)
    cut_infos: Vec<(u16, u16, i32, i32)>,
}

/// A convex Voronoi cell represented as a graph of vertices and edges.
///
/// The cell starts as the container box and is clipped by one plane per
/// neighbor. Edges of vertex `i` live at
/// `edge_buffer[vertex_offsets[i] .. vertex_offsets[i] + vertex_counts[i]]`,
/// and `neighbor_buffer[k]` is the id of the face between edge `k` and the
/// next edge of the same vertex, i.e. the face to the left of edge `k`.
#[derive(Clone, Debug)]
pub struct VoronoiCell {
    pub(crate) id: usize,
    pub(crate) generator: [f64; 3],
    // Flat array of vertices [x, y, z, x, y, z, ...]
    pub(crate) vertices: Vec<f64>,
    pub(crate) edge_buffer: Vec<u16>,
    pub(crate) neighbor_buffer: Vec<i32>,
    pub(crate) vertex_offsets: Vec<u16>,
    pub(crate) vertex_counts: Vec<u8>,
}

impl VoronoiCell {
    /// Creates the box-shaped cell of point `id` located at `generator`.
    pub fn new(id: usize, generator: [f64; 3], bounds: &BoundingBox) -> VoronoiCell {
        let [x0, y0, z0] = bounds.min;
        let [x1, y1, z1] = bounds.max;
        let vertices: Vec<f64> = vec![
            x0, y0, z0, // 0
            x1, y0, z0, // 1
            x1, y1, z0, // 2
            x0, y1, z0, // 3
            x0, y0, z1, // 4
            x1, y0, z1, // 5
            x1, y1, z1, // 6
            x0, y1, z1, // 7
        ];

        // Each box corner has 3 neighbors, ordered so that the face between
        // consecutive edges is the one in neighbor_buffer.
        let edge_buffer: Vec<u16> = vec![
            1, 4, 3, // Vertex 0
            2, 5, 0, // Vertex 1
            3, 6, 1, // Vertex 2
            0, 7, 2, // Vertex 3
            5, 7, 0, // Vertex 4
            1, 6, 4, // Vertex 5
            2, 7, 5, // Vertex 6
            3, 4, 6, // Vertex 7
        ];

        let neighbor_buffer: Vec<i32> = vec![
            BOX_ID_FRONT, BOX_ID_LEFT, BOX_ID_BOTTOM, // Vertex 0
            BOX_ID_RIGHT, BOX_ID_FRONT, BOX_ID_BOTTOM, // Vertex 1
            BOX_ID_BACK, BOX_ID_RIGHT, BOX_ID_BOTTOM, // Vertex 2
            BOX_ID_LEFT, BOX_ID_BACK, BOX_ID_BOTTOM, // Vertex 3
            BOX_ID_TOP, BOX_ID_LEFT, BOX_ID_FRONT, // Vertex 4
            BOX_ID_RIGHT, BOX_ID_TOP, BOX_ID_FRONT, // Vertex 5
            BOX_ID_BACK, BOX_ID_TOP, BOX_ID_RIGHT, // Vertex 6
            BOX_ID_LEFT, BOX_ID_TOP, BOX_ID_BACK, // Vertex 7
        ];

        VoronoiCell {
            id,
            generator,
            vertices,
            edge_buffer,
            neighbor_buffer,
            vertex_offsets: vec![0, 3, 6, 9, 12, 15, 18, 21],
            vertex_counts: vec![3; 8],
        }
    }

    /// Index of the input point this cell belongs to.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Position of the input point this cell belongs to.
    pub fn generator(&self) -> Point3 {
        self.generator.into()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Ids of the faces around the cell: neighboring point indices, or
    /// negative box side ids. Each face is listed once per edge on it.
    pub fn face_ids(&self) -> &[i32] {
        &self.neighbor_buffer
    }

    /// Squared distance from `center` to the furthest vertex.
    pub fn max_radius_sq(&self, center: &[f64; 3]) -> f64 {
        self.vertices
            .chunks_exact(3)
            .map(|v| {
                let dx = v[0] - center[0];
                let dy = v[1] - center[1];
                let dz = v[2] - center[2];
                dx * dx + dy * dy + dz * dz
            })
            .fold(0.0, f64::max)
    }

    /// Clips the cell by the plane through `point` with outward `normal`,
    /// keeping the part behind the plane. The new face gets `neighbor_id`.
    ///
    /// Returns `(true, radius_sq)` if the cell changed, where `radius_sq` is
    /// the new squared radius around the generator, or `(false, 0.0)` if the
    /// plane missed the cell.
    pub fn clip(&mut self, point: &[f64; 3], normal: &[f64; 3], neighbor_id: i32, scratch: &mut CellScratch) -> (bool, f64) {
        let num_verts = self.vertices.len() / 3;
        scratch.dists.clear();
        let mut all_inside = true;
        let mut all_outside = true;

        let mut max_abs_d: f64 = 0.0;
        for v in self.vertices.chunks_exact(3) {
            let d = (v[0] - point[0]) * normal[0] + (v[1] - point[1]) * normal[1] + (v[2] - point[2]) * normal[2];
            scratch.dists.push(d);
            max_abs_d = max_abs_d.max(d.abs());
        }

        let tol = PLANE_EPS * max_abs_d;
        for &d in &scratch.dists {
            if d > tol {
                all_inside = false;
            } else if d < -tol {
                all_outside = false;
            }
        }

        if all_inside {
            return (false, 0.0);
        }
        if all_outside {
            self.vertices.clear();
            self.edge_buffer.clear();
            self.neighbor_buffer.clear();
            self.vertex_offsets.clear();
            self.vertex_counts.clear();
            return (true, 0.0);
        }

        scratch.vertices.clear();
        scratch.edge_buffer.clear();
        scratch.neighbor_buffer.clear();
        scratch.vertex_offsets.clear();
        scratch.vertex_counts.clear();
        scratch.old_to_new.clear();
        scratch.old_to_new.resize(num_verts, None);
        scratch.face_cuts.clear();
        scratch.cut_infos.clear();

        let g = self.generator;
        let mut max_d2: f64 = 0.0;
        let mut push_vertex = |scratch: &mut CellScratch, p: [f64; 3]| -> u16 {
            let idx = (scratch.vertices.len() / 3) as u16;
            scratch.vertices.extend_from_slice(&p);
            scratch.vertex_offsets.push(0);
            scratch.vertex_counts.push(0);
            let d2 = (p[0] - g[0]).powi(2) + (p[1] - g[1]).powi(2) + (p[2] - g[2]).powi(2);
            max_d2 = max_d2.max(d2);
            idx
        };

        // The plane cuts the cell, so vertices are split by sign alone from here.
        // 1. Keep inside vertices and create one cut vertex per crossing edge.
        for i in 0..num_verts {
            if scratch.dists[i] > 0.0 {
                continue;
            }
            let a = [self.vertices[i * 3], self.vertices[i * 3 + 1], self.vertices[i * 3 + 2]];
            let new_idx = push_vertex(scratch, a);
            scratch.old_to_new[i] = Some(new_idx);

            let start = self.vertex_offsets[i] as usize;
            let count = self.vertex_counts[i] as usize;
            for k in 0..count {
                let neighbor = self.edge_buffer[start + k] as usize;
                if scratch.dists[neighbor] <= 0.0 {
                    continue;
                }

                let d_s = scratch.dists[i];
                let d_e = scratch.dists[neighbor];
                let t = (d_s / (d_s - d_e)).clamp(0.0, 1.0);
                let b = &self.vertices[neighbor * 3..neighbor * 3 + 3];
                let p = [a[0] + t * (b[0] - a[0]), a[1] + t * (b[1] - a[1]), a[2] + t * (b[2] - a[2])];
                let p_idx = push_vertex(scratch, p);

                let face_left = self.neighbor_buffer[start + k];
                let face_right = self.neighbor_buffer[start + (k + count - 1) % count];

                // A convex face is crossed by the plane at most twice.
                let cuts_on = |face: i32| scratch.face_cuts.iter().filter(|(f, _)| *f == face).count();
                if cuts_on(face_left) < 2 && cuts_on(face_right) < 2 {
                    scratch.face_cuts.push((face_left, p_idx));
                    scratch.face_cuts.push((face_right, p_idx));
                    scratch.cut_infos.push((p_idx, new_idx, face_left, face_right));
                }
            }
        }

        // 2. Edges of kept vertices, with crossing edges redirected to their cut vertex.
        for i in 0..num_verts {
            let Some(new_idx) = scratch.old_to_new[i] else { continue };
            scratch.vertex_offsets[new_idx as usize] = scratch.edge_buffer.len() as u16;
            let start = self.vertex_offsets[i] as usize;
            let count = self.vertex_counts[i] as usize;
            let mut new_count = 0u8;

            for k in 0..count {
                let neighbor = self.edge_buffer[start + k] as usize;
                let face_left = self.neighbor_buffer[start + k];
                let target = match scratch.old_to_new[neighbor] {
                    Some(n) => Some(n),
                    None => scratch
                        .cut_infos
                        .iter()
                        .find(|&&(_, u, f_l, _)| u == new_idx && f_l == face_left)
                        .map(|&(p, _, _, _)| p),
                };
                if let Some(target) = target {
                    scratch.edge_buffer.push(target);
                    scratch.neighbor_buffer.push(face_left);
                    new_count += 1;
                }
            }
            scratch.vertex_counts[new_idx as usize] = new_count;
        }

        // 3. Cut vertices: back to the kept vertex, then along the new face.
        // Around p the order is u, p_prev, p_next with faces
        // face_right, the new face and face_left in between.
        for ci in 0..scratch.cut_infos.len() {
            let (p_idx, u_idx, face_left, face_right) = scratch.cut_infos[ci];
            scratch.vertex_offsets[p_idx as usize] = scratch.edge_buffer.len() as u16;

            scratch.edge_buffer.push(u_idx);
            scratch.neighbor_buffer.push(face_right);
            let mut count = 1u8;

            let other_cut = |face: i32| {
                scratch
                    .face_cuts
                    .iter()
                    .find(|&&(f, idx)| f == face && idx != p_idx)
                    .map(|&(_, idx)| idx)
            };
            let p_prev = other_cut(face_right);
            let p_next = other_cut(face_left);

            if let Some(p_prev) = p_prev {
                scratch.edge_buffer.push(p_prev);
                scratch.neighbor_buffer.push(neighbor_id);
                count += 1;
            }
            if let Some(p_next) = p_next {
                scratch.edge_buffer.push(p_next);
                scratch.neighbor_buffer.push(face_left);
                count += 1;
            }
            scratch.vertex_counts[p_idx as usize] = count;
        }

        std::mem::swap(&mut self.vertices, &mut scratch.vertices);
        std::mem::swap(&mut self.edge_buffer, &mut scratch.edge_buffer);
        std::mem::swap(&mut self.neighbor_buffer, &mut scratch.neighbor_buffer);
        std::mem::swap(&mut self.vertex_offsets, &mut scratch.vertex_offsets);
        std::mem::swap(&mut self.vertex_counts, &mut scratch.vertex_counts);

        (true, max_d2)
    }
}

// The clipping code stores edges with the face to the left of each edge
// following it. Slots are exposed in reverse so that the successor of a
// returning edge continues along the same face.
impl HalfEdgeCell for VoronoiCell {
    fn vertex_count(&self) -> usize {
        self.vertex_counts.len()
    }

    fn vertex(&self, v: usize) -> Point3 {
        Point3::new(self.vertices[v * 3], self.vertices[v * 3 + 1], self.vertices[v * 3 + 2])
    }

    fn degree(&self, v: usize) -> usize {
        self.vertex_counts[v] as usize
    }

    fn edge(&self, v: usize, slot: usize) -> usize {
        let start = self.vertex_offsets[v] as usize;
        self.edge_buffer[start + self.degree(v) - 1 - slot] as usize
    }

    fn reciprocal(&self, v: usize, slot: usize) -> Option<usize> {
        let w = self.edge(v, slot);
        if w >= self.vertex_count() {
            return None;
        }
        (0..self.degree(w)).find(|&back| self.edge(w, back) == v)
    }

    fn half_edge_count(&self) -> usize {
        self.edge_buffer.len()
    }
}
