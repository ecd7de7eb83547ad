use crate::container::Container;

/// A spatial index based on a uniform grid over the container.
///
/// Points are binned once; cells are then built by visiting bins in order of
/// increasing distance from the point's own bin, stopping as soon as no
/// remaining bin can hold a point closer than twice the cell radius.
pub struct AlgorithmGrid {
    /// Number of bins along each axis.
    pub res: [usize; 3],
    /// Scale factor from coordinate to bin index, per axis.
    pub scale: [f64; 3],
    /// Largest valid fractional bin index, per axis.
    pub limit: [f64; 3],
    /// Minimum corner of the container.
    pub min: [f64; 3],
    /// The grid bins, each containing a list of point indices.
    pub bins: Vec<Vec<usize>>,
    /// Map from point index to its bin index.
    pub point_bins: Vec<usize>,
    /// Precomputed search order for visiting neighboring bins.
    pub bin_search_order: Vec<(isize, isize, isize, f64)>,
}

impl AlgorithmGrid {
    /// Creates an empty grid with the container's divisions.
    pub fn new(container: &Container) -> Self {
        let bounds = &container.bounds;
        let res = container.divisions.map(|d| d.max(1));
        let scale: [f64; 3] = std::array::from_fn(|a| res[a] as f64 / bounds.length(a));
        let cell_size = scale.map(|s| 1.0 / s);

        let mut bin_search_order = Vec::with_capacity((2 * res[0] + 1) * (2 * res[1] + 1) * (2 * res[2] + 1));
        let rx = res[0] as isize;
        let ry = res[1] as isize;
        let rz = res[2] as isize;
        for z in -rz..=rz {
            for y in -ry..=ry {
                for x in -rx..=rx {
                    let dist_sq = get_min_dist_sq(x, y, z, cell_size);
                    bin_search_order.push((x, y, z, dist_sq));
                }
            }
        }
        bin_search_order.sort_unstable_by(|a, b| a.3.partial_cmp(&b.3).unwrap_or(std::cmp::Ordering::Equal));

        AlgorithmGrid {
            res,
            scale,
            limit: res.map(|r| r as f64 - 1e-5),
            min: bounds.min,
            bins: vec![Vec::new(); res[0] * res[1] * res[2]],
            point_bins: Vec::new(),
            bin_search_order,
        }
    }

    /// Calculates the linear index of the bin containing `p`.
    /// Points outside the grid are clamped into the nearest bin.
    pub fn get_bin_index(&self, p: &[f64; 3]) -> usize {
        let idx: [usize; 3] =
            std::array::from_fn(|a| ((p[a] - self.min[a]) * self.scale[a]).clamp(0.0, self.limit[a]) as usize);
        idx[0] + idx[1] * self.res[0] + idx[2] * self.res[0] * self.res[1]
    }

    /// Bins all points, replacing any previous content.
    pub fn set_points(&mut self, points: &[[f64; 3]]) {
        self.bins.iter_mut().for_each(|bin| bin.clear());
        self.point_bins = points.iter().map(|p| self.get_bin_index(p)).collect();
        for (i, &bin) in self.point_bins.iter().enumerate() {
            self.bins[bin].push(i);
        }
    }

    /// Point indices in bin order, each bin in insertion order.
    ///
    /// Cells are built in this order so that points processed together are
    /// also close in space.
    pub fn bin_order(&self) -> Vec<usize> {
        self.bins.iter().flatten().copied().collect()
    }

    /// Visit potential neighbors of point `index` at `pos`.
    ///
    /// `max_dist_sq` is the squared radius of the cell so far; the visitor
    /// receives each candidate's index, position and the current radius, and
    /// returns the radius after it clipped the cell.
    pub fn visit_neighbors<F>(
        &self,
        points: &[[f64; 3]],
        index: usize,
        pos: [f64; 3],
        max_dist_sq: &mut f64,
        mut visitor: F,
    ) where
        F: FnMut(usize, [f64; 3], f64) -> f64,
    {
        let bin_idx = self.point_bins[index];
        let plane = self.res[0] * self.res[1];
        let idx = [bin_idx % plane % self.res[0], bin_idx % plane / self.res[0], bin_idx / plane];

        let cell_size = self.scale.map(|s| 1.0 / s);
        let rel: [f64; 3] = std::array::from_fn(|a| (pos[a] - self.min[a]) * self.scale[a] - idx[a] as f64);

        for &(dx, dy, dz, min_d2) in &self.bin_search_order {
            if min_d2 > 4.0 * *max_dist_sq {
                break;
            }

            let offset = [dx, dy, dz];
            let b: [isize; 3] = std::array::from_fn(|a| idx[a] as isize + offset[a]);
            if (0..3).any(|a| b[a] < 0 || b[a] >= self.res[a] as isize) {
                continue;
            }

            // Distance from the point to the nearest face of the candidate bin.
            let mut gap_sq = 0.0;
            for a in 0..3 {
                let d = offset[a];
                let gap = if d > 0 {
                    (d as f64 - rel[a]) * cell_size[a]
                } else if d < 0 {
                    (-(d + 1) as f64 + rel[a]) * cell_size[a]
                } else {
                    0.0
                };
                let gap = gap.max(0.0);
                gap_sq += gap * gap;
            }

            if gap_sq <= 4.0 * *max_dist_sq {
                let bin_index = b[0] as usize + b[1] as usize * self.res[0] + b[2] as usize * plane;
                for &j in &self.bins[bin_index] {
                    if index == j {
                        continue;
                    }
                    *max_dist_sq = visitor(j, points[j], *max_dist_sq);
                }
            }
        }
    }
}

fn get_min_dist_sq(dx: isize, dy: isize, dz: isize, cell_size: [f64; 3]) -> f64 {
    let gap = |d: isize, c: f64| if d > 0 { (d - 1) as f64 * c } else if d < 0 { (-d - 1) as f64 * c } else { 0.0 };
    let mx = gap(dx, cell_size[0]);
    let my = gap(dy, cell_size[1]);
    let mz = gap(dz, cell_size[2]);
    mx * mx + my * my + mz * mz
}
