use crate::container::{Container, ContainerConfig};
use crate::error::{CellError, VoronoiError};
use crate::faces::FaceStyle;
use crate::tessellation::Tessellation;
use crate::util::Timed;
use crate::wkt::cell_record;

/// Settings for [`compute_voronoi_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VoronoiConfig {
    pub container: ContainerConfig,
    pub style: FaceStyle,
}

impl VoronoiConfig {
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.container.ratio = ratio;
        self
    }

    pub fn with_style(mut self, style: FaceStyle) -> Self {
        self.style = style;
        self
    }
}

/// Computes the Voronoi cell of every point and returns each as a
/// `POLYHEDRALSURFACE` in well-known text.
///
/// The output has one entry per input point, in input order. Cells that
/// cannot be built are `None`.
///
/// # Arguments
///
/// * `x`, `y`, `z` - Coordinates of the points, of equal length (at least 2).
/// * `container_ratio` - Ratio between the length of the container and the
///   length of the bounding box of the points, per axis. Must be at least 1.
pub fn compute_voronoi(x: &[f64], y: &[f64], z: &[f64], container_ratio: f64) -> Result<Vec<Option<String>>, VoronoiError> {
    compute_voronoi_with(x, y, z, &VoronoiConfig::default().with_ratio(container_ratio))
}

/// [`compute_voronoi`] with full control over container sizing and output style.
pub fn compute_voronoi_with(x: &[f64], y: &[f64], z: &[f64], config: &VoronoiConfig) -> Result<Vec<Option<String>>, VoronoiError> {
    validate(x, y, z, config.container.ratio)?;
    let _t = Timed::info("Voronoi");

    let container = Container::fit(x, y, z, &config.container)?;
    let points: Vec<[f64; 3]> = x.iter().zip(y).zip(z).map(|((&x, &y), &z)| [x, y, z]).collect();
    let n = points.len();

    let mut tess = Tessellation::new(container);
    tess.set_points(points);

    let style = config.style;
    let records = {
        let _t = Timed::debug("Cells");
        tess.map(|id, cell| {
            cell.and_then(|cell| cell_record(&cell, style).map_err(|source| CellError::Topology { id, source }))
        })
    };

    // Cells come back in grid order; each carries the index of its point.
    let mut output: Vec<Option<String>> = vec![None; n];
    let mut failed = 0;
    for (id, record) in records {
        match record {
            Ok(text) => output[id] = Some(text),
            Err(err) => {
                log::warn!("{}", err);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        log::debug!("{} of {} cells could not be built", failed, n);
    }

    Ok(output)
}

/// Checks the preconditions of a computation, in order.
fn validate(x: &[f64], y: &[f64], z: &[f64], ratio: f64) -> Result<(), VoronoiError> {
    if x.len() != y.len() || x.len() != z.len() {
        return Err(VoronoiError::LengthMismatch {
            x: x.len(),
            y: y.len(),
            z: z.len(),
        });
    }
    if x.len() < 2 {
        return Err(VoronoiError::TooFewPoints(x.len()));
    }
    // Negated so NaN is rejected as well.
    if !(ratio >= 1.0) {
        return Err(VoronoiError::InvalidContainerRatio(ratio));
    }
    let bad = (0..x.len()).find(|&i| !(x[i].is_finite() && y[i].is_finite() && z[i].is_finite()));
    if let Some(index) = bad {
        return Err(VoronoiError::NonFiniteCoordinate { index });
    }
    Ok(())
}
