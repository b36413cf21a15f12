//! Point type shared by every tour of a run.

use std::fmt;

/// A named location with integer coordinates.
///
/// Points are created once per run and never modified afterwards. Tours
/// refer to them through a shared `Arc<[Point]>` and reorder indices only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Identifier, unique within a run.
    pub name: String,
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub fn new(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = f64::from(self.x) - f64::from(other.x);
        let dy = f64::from(self.y) - f64::from(other.y);
        dx.hypot(dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_pythagorean() {
        let a = Point::new("a", 0, 0);
        let b = Point::new("b", 3, 4);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = Point::new("a", -7, 12);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new("v3", 10, -2).to_string(), "v3 (10, -2)");
    }
}
