use std::fmt;
use std::ops::Sub;

/// A point or direction in 3D space.
///
/// Cell vertices are stored as `Point3` once they leave the clipping buffers,
/// and their `Display` output is used verbatim as coordinate tokens in the
/// well-known text records.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Componentwise difference `self - other`.
    pub fn subtract(&self, other: &Point3) -> Point3 {
        Point3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn cross(&self, other: &Point3) -> Point3 {
        Point3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn dot(&self, other: &Point3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Euclidean norm.
    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Angle in radians between two directions.
    ///
    /// The cosine is clamped to `[-1, 1]` so rounding on (anti)parallel inputs
    /// cannot push `acos` out of its domain. The result is NaN when either
    /// vector has zero length; callers are expected to guard against that.
    pub fn angle_between(&self, other: &Point3) -> f64 {
        let cos = self.dot(other) / (self.magnitude() * other.magnitude());
        cos.clamp(-1.0, 1.0).acos()
    }

    /// Renders the point as three space separated numbers.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl Sub for Point3 {
    type Output = Point3;

    fn sub(self, rhs: Point3) -> Point3 {
        self.subtract(&rhs)
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(p: [f64; 3]) -> Self {
        Point3::new(p[0], p[1], p[2])
    }
}

impl From<Point3> for [f64; 3] {
    fn from(p: Point3) -> Self {
        [p.x, p.y, p.z]
    }
}

// `{}` on f64 prints the shortest decimal that parses back to the same value,
// never in exponent form.
impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}
