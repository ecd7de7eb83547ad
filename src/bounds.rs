/// Bounding box ID for the bottom face, it is negative to prevent conflicts with generator IDs.
pub const BOX_ID_BOTTOM: i32 = -1;
/// Bounding box ID for the top face, it is negative to prevent conflicts with generator IDs.
pub const BOX_ID_TOP: i32 = -2;
/// Bounding box ID for the front face, it is negative to prevent conflicts with generator IDs.
pub const BOX_ID_FRONT: i32 = -3;
/// Bounding box ID for the back face, it is negative to prevent conflicts with generator IDs.
pub const BOX_ID_BACK: i32 = -4;
/// Bounding box ID for the left face, it is negative to prevent conflicts with generator IDs.
pub const BOX_ID_LEFT: i32 = -5;
/// Bounding box ID for the right face, it is negative to prevent conflicts with generator IDs.
pub const BOX_ID_RIGHT: i32 = -6;

/// Axis-aligned bounding box in 3D space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point of the cloud.
    ///
    /// Returns `None` for an empty cloud. The three slices are expected to
    /// have equal lengths; extra entries in the longer ones are ignored.
    pub fn from_points(x: &[f64], y: &[f64], z: &[f64]) -> Option<Self> {
        let mut points = x.iter().zip(y).zip(z).map(|((&x, &y), &z)| [x, y, z]);
        let first = points.next()?;
        let mut bounds = BoundingBox::new(first, first);
        for p in points {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(p[axis]);
                bounds.max[axis] = bounds.max[axis].max(p[axis]);
            }
        }
        Some(bounds)
    }

    pub fn length(&self, axis: usize) -> f64 {
        self.max[axis] - self.min[axis]
    }

    pub fn lengths(&self) -> [f64; 3] {
        [self.length(0), self.length(1), self.length(2)]
    }

    pub fn contains(&self, p: &[f64; 3]) -> bool {
        (0..3).all(|axis| p[axis] >= self.min[axis] && p[axis] <= self.max[axis])
    }
}
