//! Geometry primitives: points, bounding boxes, polyline length and
//! segmentation of long feed lines.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 2D point in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation towards `other` at parameter `t`
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x * (1.0 - t) + other.x * t,
            self.y * (1.0 - t) + other.y * t,
        )
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

// Points travel as `[x, y]` arrays. Trailing per-point fields are dropped.
impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.x, self.y].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let coords = Vec::<f64>::deserialize(deserializer)?;
        match coords.as_slice() {
            [x, y, ..] => Ok(Point::new(*x, *y)),
            _ => Err(D::Error::invalid_length(coords.len(), &"at least 2 coordinates")),
        }
    }
}

/// An ordered polyline, one cut or engrave stroke
pub type Path = Vec<Point>;

/// Axis-aligned bounding box `[xmin, ymin, xmax, ymax]`.
///
/// A fresh box is `[+inf, +inf, 0, 0]`. The max corner starts at zero, not at
/// minus infinity, and [`Bbox::expand`] tests the max bound only when the min
/// bound did not move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for Bbox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Bbox {
    /// The sentinel box with no contributing point
    pub const EMPTY: Bbox = Bbox {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: 0.0,
        max_y: 0.0,
    };

    /// Build from `[xmin, ymin, xmax, ymax]`
    pub fn from_array([min_x, min_y, max_x, max_y]: [f64; 4]) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// As `[xmin, ymin, xmax, ymax]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }

    /// True while no point has contributed
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Grow the box to include `(x, y)`.
    pub fn expand(&mut self, x: f64, y: f64) {
        if x < self.min_x {
            self.min_x = x;
        } else if x > self.max_x {
            self.max_x = x;
        }
        if y < self.min_y {
            self.min_y = y;
        } else if y > self.max_y {
            self.max_y = y;
        }
    }

    /// Feed another box into this one, min corner first. An empty box is fed
    /// through like any other, so it drives the max corner to infinity and
    /// the min corner to the origin.
    pub fn merge(&mut self, other: &Bbox) {
        self.expand(other.min_x, other.min_y);
        self.expand(other.max_x, other.max_y);
    }
}

/// Free-function form of [`Bbox::expand`].
pub fn expand_bbox(bbox: &mut Bbox, x: f64, y: f64) {
    bbox.expand(x, y);
}

// JSON has no infinity: non-finite components are written as null and
// null is read back as +inf.
impl Serialize for Bbox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_array()
            .map(|v| v.is_finite().then_some(v))
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Bbox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <[Option<f64>; 4]>::deserialize(deserializer)?;
        Ok(Bbox::from_array(raw.map(|v| v.unwrap_or(f64::INFINITY))))
    }
}

/// Sum of segment lengths. Paths with fewer than two points have length 0.
pub fn polyline_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Subdivide segments longer than `max_len`.
///
/// Returns `None` when every segment is already within the limit, so callers
/// can leave the original storage untouched. Original vertices are copied
/// exactly; new vertices are placed at `t = k/n`, `n = ceil(len/max_len)`.
pub fn segmentize_path(path: &[Point], max_len: f64) -> Option<Path> {
    if path.len() < 2 || !(max_len > 0.0) {
        return None;
    }

    let limit2 = max_len * max_len;
    let mut rebuilt: Option<Path> = None;

    for (i, pair) in path.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let d2 = dx * dx + dy * dy;

        if d2 > limit2 {
            let out = rebuilt.get_or_insert_with(|| {
                let mut copy = Vec::with_capacity(path.len() * 2);
                copy.extend_from_slice(&path[..i]);
                copy
            });
            out.push(a);
            let n = (d2.sqrt() / max_len).ceil() as usize;
            for k in 1..n {
                out.push(a.lerp(&b, k as f64 / n as f64));
            }
        } else if let Some(out) = rebuilt.as_mut() {
            out.push(a);
        }
    }

    if let (Some(out), Some(last)) = (rebuilt.as_mut(), path.last()) {
        out.push(*last);
    }
    rebuilt
}

/// Segmentize every path in place. Returns the number of rebuilt paths.
pub fn segmentize_long_lines<'a, I>(paths: I, max_len: f64) -> usize
where
    I: IntoIterator<Item = &'a mut Path>,
{
    let mut rebuilt = 0;
    for path in paths {
        if let Some(new_path) = segmentize_path(path, max_len) {
            *path = new_path;
            rebuilt += 1;
        }
    }
    rebuilt
}
