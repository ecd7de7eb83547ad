use crate::bounds::BoundingBox;
use crate::error::VoronoiError;

/// Axis lengths below this are raised to it, so flat or collinear clouds
/// still get a container with volume.
pub const DEFAULT_THRESHOLD: f64 = 2.0;

/// Target number of points per grid bin.
pub const DEFAULT_DENSITY: f64 = 5.6;

/// Upper bound on grid bins per point, so strongly elongated clouds do not
/// get a grid far larger than the point set.
pub const MAX_BINS_PER_POINT: usize = 8;

/// How the container's grid resolution is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DivisionPolicy {
    /// Bins sized for a constant expected number of points each.
    #[default]
    Density,
    /// `ceil(cbrt(n))` bins along every axis.
    Uniform,
}

/// Parameters for sizing the container around a point cloud.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContainerConfig {
    /// Ratio between the container length and the point cloud length, per axis.
    pub ratio: f64,
    /// Minimum axis length.
    pub threshold: f64,
    /// Target points per bin for [`DivisionPolicy::Density`].
    pub density: f64,
    pub policy: DivisionPolicy,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            ratio: 1.0,
            threshold: DEFAULT_THRESHOLD,
            density: DEFAULT_DENSITY,
            policy: DivisionPolicy::Density,
        }
    }
}

impl ContainerConfig {
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = ratio;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_policy(mut self, policy: DivisionPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// The padded box the cells are built in, and its grid resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container {
    pub bounds: BoundingBox,
    /// Number of grid bins along each axis, each at least 1.
    pub divisions: [usize; 3],
}

impl Container {
    /// Sizes a container around the cloud `(x, y, z)`.
    ///
    /// Axis lengths are clamped to the threshold; an axis whose raw extent is
    /// shorter is widened about its midpoint, so the container never has an
    /// axis shorter than the threshold. Each axis is then padded by
    /// `length * (ratio - 1) / 2` on both sides.
    pub fn fit(x: &[f64], y: &[f64], z: &[f64], config: &ContainerConfig) -> Result<Self, VoronoiError> {
        // Negated so NaN is rejected as well.
        if !(config.ratio >= 1.0) {
            return Err(VoronoiError::InvalidContainerRatio(config.ratio));
        }
        let n = x.len().min(y.len()).min(z.len());
        if n < 2 {
            return Err(VoronoiError::TooFewPoints(n));
        }
        let raw = BoundingBox::from_points(x, y, z).ok_or(VoronoiError::TooFewPoints(n))?;

        let mut lengths = [0.0; 3];
        let mut bounds = raw;
        for axis in 0..3 {
            let extent = raw.length(axis);
            let length = extent.max(config.threshold);
            let widen = (length - extent) / 2.0;
            let margin = length * (config.ratio - 1.0) / 2.0;
            bounds.min[axis] = raw.min[axis] - widen - margin;
            bounds.max[axis] = raw.max[axis] + widen + margin;
            lengths[axis] = length;
        }

        let divisions = match config.policy {
            DivisionPolicy::Density => density_divisions(n, lengths, config.density),
            DivisionPolicy::Uniform => [uniform_divisions(n); 3],
        };
        let divisions = cap_divisions(divisions, n * MAX_BINS_PER_POINT);

        log::debug!(
            "container for {} points: min {:?}, max {:?}, divisions {:?}",
            n,
            bounds.min,
            bounds.max,
            divisions
        );

        Ok(Container { bounds, divisions })
    }

    pub fn bin_count(&self) -> usize {
        self.divisions.iter().product()
    }
}

/// `floor(L * cbrt(n / (C * Lx * Ly * Lz))) + 1` bins per axis.
fn density_divisions(n: usize, lengths: [f64; 3], density: f64) -> [usize; 3] {
    let volume: f64 = lengths.iter().product();
    let per_length = (n as f64 / (density * volume)).cbrt();
    lengths.map(|length| {
        let bins = (length * per_length).floor();
        if bins.is_finite() && bins >= 0.0 { bins as usize + 1 } else { 1 }
    })
}

/// Shrinks the longest axes until at most `max_bins` bins remain.
fn cap_divisions(mut divisions: [usize; 3], max_bins: usize) -> [usize; 3] {
    let max_bins = max_bins.max(1);
    let requested = divisions;
    while divisions.iter().product::<usize>() > max_bins {
        let axis = (0..3).max_by_key(|&a| divisions[a]).unwrap_or(0);
        let others: usize = (0..3).filter(|&a| a != axis).map(|a| divisions[a]).product();
        divisions[axis] = (max_bins / others).max(1);
    }
    if divisions != requested {
        log::debug!("grid divisions {:?} capped to {:?}", requested, divisions);
    }
    divisions
}

fn uniform_divisions(n: usize) -> usize {
    ((n as f64).cbrt().ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_and_divisions() {
        let x = [0.0, 10.0];
        let y = [0.0, 20.0];
        let z = [0.0, 40.0];
        let config = ContainerConfig::default().with_ratio(2.0);
        let c = Container::fit(&x, &y, &z, &config).unwrap();

        assert_eq!(c.bounds.min, [-5.0, -10.0, -20.0]);
        assert_eq!(c.bounds.max, [15.0, 30.0, 60.0]);
        // cbrt(2 / (5.6 * 8000)) * L gives 0.35, 0.71 and 1.42.
        assert_eq!(c.divisions, [1, 1, 2]);
    }

    #[test]
    fn test_degenerate_axes_are_widened() {
        // All points on the line y = z = 3.
        let x = [0.0, 1.0, 5.0];
        let y = [3.0, 3.0, 3.0];
        let z = [3.0, 3.0, 3.0];
        let c = Container::fit(&x, &y, &z, &ContainerConfig::default()).unwrap();

        assert_eq!(c.bounds.min, [0.0, 2.0, 2.0]);
        assert_eq!(c.bounds.max, [5.0, 4.0, 4.0]);
        for length in c.bounds.lengths() {
            assert!(length >= DEFAULT_THRESHOLD);
        }
    }

    #[test]
    fn test_small_extent_uses_threshold_for_margin() {
        let x = [0.0, 0.5];
        let y = [0.0, 0.5];
        let z = [0.0, 0.5];
        let c = Container::fit(&x, &y, &z, &ContainerConfig::default().with_ratio(3.0)).unwrap();
        // Length 2 after widening, padded by 2 on each side.
        assert_eq!(c.bounds.min, [-2.75; 3]);
        assert_eq!(c.bounds.max, [3.25; 3]);
    }

    #[test]
    fn test_density_divisions_grow_with_points() {
        let n = 10_000;
        let coords: Vec<f64> = (0..n).map(|i| (i % 100) as f64).collect();
        let c = Container::fit(&coords, &coords, &coords, &ContainerConfig::default()).unwrap();
        // cbrt(10000 / (5.6 * 99^3)) * 99 = cbrt(10000 / 5.6) ~ 12.1
        assert_eq!(c.divisions, [13, 13, 13]);
    }

    #[test]
    fn test_uniform_divisions() {
        let coords: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let config = ContainerConfig::default().with_policy(DivisionPolicy::Uniform);
        let c = Container::fit(&coords, &coords, &coords, &config).unwrap();
        assert_eq!(c.divisions, [4, 4, 4]);
        assert_eq!(c.bin_count(), 64);
    }

    #[test]
    fn test_elongated_cloud_is_capped() {
        // Uncapped, the density formula asks for about two million bins along x.
        let x = [0.0, 1e10];
        let y = [0.0, 0.0];
        let z = [0.0, 0.0];
        let c = Container::fit(&x, &y, &z, &ContainerConfig::default()).unwrap();
        assert_eq!(c.divisions, [16, 1, 1]);
        assert!(c.bin_count() <= 2 * MAX_BINS_PER_POINT);
    }

    #[test]
    fn test_cap_divisions() {
        assert_eq!(cap_divisions([3, 3, 3], 27), [3, 3, 3]);
        assert_eq!(cap_divisions([100, 10, 1], 50), [5, 10, 1]);
        assert_eq!(cap_divisions([100, 100, 100], 50), [50, 1, 1]);
    }

    #[test]
    fn test_invalid_ratio() {
        let x = [0.0, 1.0];
        let err = Container::fit(&x, &x, &x, &ContainerConfig::default().with_ratio(0.5)).unwrap_err();
        assert_eq!(err, VoronoiError::InvalidContainerRatio(0.5));

        let err = Container::fit(&x, &x, &x, &ContainerConfig::default().with_ratio(f64::NAN)).unwrap_err();
        assert!(matches!(err, VoronoiError::InvalidContainerRatio(r) if r.is_nan()));
    }

    #[test]
    fn test_too_few_points() {
        let err = Container::fit(&[1.0], &[1.0], &[1.0], &ContainerConfig::default()).unwrap_err();
        assert_eq!(err, VoronoiError::TooFewPoints(1));
    }
}
