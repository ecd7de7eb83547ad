use crate::algo_grid::AlgorithmGrid;
use crate::cell::{CellScratch, VoronoiCell};
use crate::container::Container;
use crate::error::CellError;
use crate::halfedge::check_reciprocity;
use rayon::prelude::*;

/// Builds the Voronoi cells of a point set inside a container.
///
/// Each cell starts as the container box and is clipped by the bisector plane
/// of every neighbor the grid reports, nearest bins first, until no unseen
/// point can reach the cell any more.
pub struct Tessellation {
    pub container: Container,
    pub points: Vec<[f64; 3]>,
    pub algorithm: AlgorithmGrid,
}

impl Tessellation {
    pub fn new(container: Container) -> Self {
        let algorithm = AlgorithmGrid::new(&container);
        Self {
            container,
            points: Vec::new(),
            algorithm,
        }
    }

    pub fn set_points(&mut self, points: Vec<[f64; 3]>) {
        self.points = points;
        self.algorithm.set_points(&self.points);
    }

    pub fn count_points(&self) -> usize {
        self.points.len()
    }

    /// Builds the cell of point `index`.
    pub fn compute_cell(&self, index: usize) -> Result<VoronoiCell, CellError> {
        self.build_cell(index, &mut CellScratch::default())
    }

    /// Builds every cell in parallel and applies `f` to each outcome.
    ///
    /// Cells are processed in grid order rather than point order; every
    /// result is paired with the index of the point it belongs to. Cells are
    /// dropped as soon as `f` returns, so only the mapped values are kept.
    pub fn map<R, F>(&self, f: F) -> Vec<(usize, R)>
    where
        R: Send,
        F: Fn(usize, Result<VoronoiCell, CellError>) -> R + Sync,
    {
        self.algorithm
            .bin_order()
            .into_par_iter()
            .map_init(CellScratch::default, |scratch, i| (i, f(i, self.build_cell(i, scratch))))
            .collect()
    }

    fn build_cell(&self, i: usize, scratch: &mut CellScratch) -> Result<VoronoiCell, CellError> {
        let g_pos = self.points[i];
        let [gx, gy, gz] = g_pos;
        let mut cell = VoronoiCell::new(i, g_pos, &self.container.bounds);
        let mut current_max_dist_sq = cell.max_radius_sq(&g_pos);
        let mut coincident = None;

        self.algorithm
            .visit_neighbors(&self.points, i, g_pos, &mut current_max_dist_sq, |j, n_pos, cur_dist| {
                let dx = n_pos[0] - gx;
                let dy = n_pos[1] - gy;
                let dz = n_pos[2] - gz;

                // Bins are only filtered by their nearest face, so check the exact distance.
                let dist_sq = dx * dx + dy * dy + dz * dz;
                if dist_sq == 0.0 {
                    coincident.get_or_insert(j);
                    return cur_dist;
                }
                if dist_sq > 4.0 * cur_dist || cell.is_empty() {
                    return cur_dist;
                }

                // Unit normal, so plane distances are lengths at any point spacing.
                let dist = dist_sq.sqrt();
                let normal = [dx / dist, dy / dist, dz / dist];
                let mid = [gx + dx * 0.5, gy + dy * 0.5, gz + dz * 0.5];
                match cell.clip(&mid, &normal, j as i32, scratch) {
                    (true, new_radius) => new_radius,
                    (false, _) => cur_dist,
                }
            });

        if let Some(other) = coincident {
            return Err(CellError::Coincident { id: i, other });
        }
        if cell.is_empty() {
            return Err(CellError::Empty { id: i });
        }
        check_reciprocity(&cell).map_err(|source| CellError::Topology { id: i, source })?;
        Ok(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundingBox;
    use crate::faces::{extract_rings, FaceStyle};
    use crate::halfedge::HalfEdgeCell;

    fn tessellation(divisions: usize, points: Vec<[f64; 3]>) -> Tessellation {
        let container = Container {
            bounds: BoundingBox::new([0.0; 3], [100.0; 3]),
            divisions: [divisions; 3],
        };
        let mut tess = Tessellation::new(container);
        tess.set_points(points);
        tess
    }

    fn volume<C: HalfEdgeCell>(cell: &C) -> f64 {
        extract_rings(cell, FaceStyle::Triangles)
            .unwrap()
            .iter()
            .map(|r| r[0].dot(&r[1].cross(&r[2])) / 6.0)
            .sum()
    }

    #[test]
    fn test_two_cells() {
        let tess = tessellation(10, vec![[10.0, 10.0, 10.0], [90.0, 90.0, 90.0]]);
        let c0 = tess.compute_cell(0).unwrap();
        let c1 = tess.compute_cell(1).unwrap();
        assert_eq!(c0.id(), 0);
        assert_eq!(c1.id(), 1);

        let total = volume(&c0) + volume(&c1);
        assert!((total - 1_000_000.0).abs() < 1e-3, "Total volume should be 1,000,000, got {}", total);
    }

    #[test]
    fn test_octet_cells() {
        let mut points = Vec::new();
        for x in [25.0, 75.0] {
            for y in [25.0, 75.0] {
                for z in [25.0, 75.0] {
                    points.push([x, y, z]);
                }
            }
        }
        let tess = tessellation(4, points);
        let results = tess.map(|_, cell| cell.map(|c| volume(&c)));
        assert_eq!(results.len(), 8);
        for (i, vol) in results {
            let vol = vol.unwrap();
            assert!((vol - 125_000.0).abs() < 1e-3, "Cell {} volume should be 125,000, got {}", i, vol);
        }
    }

    #[test]
    fn test_map_visits_every_point_once() {
        let points: Vec<[f64; 3]> = (0..50)
            .map(|i| {
                let t = i as f64;
                [(t * 37.0) % 100.0, (t * 11.0) % 100.0, (t * 71.0) % 100.0]
            })
            .collect();
        let tess = tessellation(3, points);
        let mut ids: Vec<usize> = tess.map(|i, _| i).into_iter().map(|(i, j)| {
            assert_eq!(i, j);
            i
        }).collect();
        ids.sort();
        assert_eq!(ids, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_nearly_coincident_points_split_the_space() {
        let tess = tessellation(2, vec![[10.0, 10.0, 10.0], [10.0 + 1e-10, 10.0, 10.0], [80.0, 80.0, 80.0]]);
        let volumes: Vec<f64> = (0..3).map(|i| volume(&tess.compute_cell(i).unwrap())).collect();
        let total: f64 = volumes.iter().sum();
        assert!((total - 1_000_000.0).abs() < 1e-3, "Total volume should be 1,000,000, got {}", total);
        assert!(volumes[0] > 0.0 && volumes[1] > 0.0);
    }

    #[test]
    fn test_coincident_points_fail() {
        let tess = tessellation(2, vec![[10.0, 10.0, 10.0], [10.0, 10.0, 10.0], [80.0, 80.0, 80.0]]);
        assert_eq!(tess.compute_cell(0).unwrap_err(), CellError::Coincident { id: 0, other: 1 });
        assert_eq!(tess.compute_cell(1).unwrap_err(), CellError::Coincident { id: 1, other: 0 });
        assert!(tess.compute_cell(2).is_ok());
    }
}
