//! Small 2D geometry helpers: a generic vector, angles, and relation tests for grid points.
use grid_util::point::Point;
use num_traits::{Num, ToPrimitive};
use std::f64::consts::PI;
use std::ops::{Add, Sub};

/// Relation tests on grid coordinates used by the search.
pub trait PointExt {
    /// Same row or same column, and not the same point.
    fn is_orthogonal_to(&self, other: &Point) -> bool;
    /// On a 45 degree diagonal, and not the same point.
    fn is_diagonal_to(&self, other: &Point) -> bool;
    fn manhattan_distance(&self, other: &Point) -> i32;
    fn chebyshev_distance(&self, other: &Point) -> i32;
}

impl PointExt for Point {
    fn is_orthogonal_to(&self, other: &Point) -> bool {
        self != other && (self.x == other.x || self.y == other.y)
    }
    fn is_diagonal_to(&self, other: &Point) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx == dy && dx != 0
    }
    fn manhattan_distance(&self, other: &Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
    fn chebyshev_distance(&self, other: &Point) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// A mathematical 2D vector over any numeric scalar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

impl<T: Num + Copy> Vector2<T> {
    pub fn new(x: T, y: T) -> Vector2<T> {
        Vector2 { x, y }
    }

    pub fn dot(&self, other: &Vector2<T>) -> T {
        self.x * other.x + self.y * other.y
    }
}

impl<T: Num + Copy + ToPrimitive> Vector2<T> {
    /// Euclidean distance between the two points the vectors describe.
    pub fn distance_to(&self, target: &Vector2<T>) -> f64 {
        let (dx, dy) = self.delta_f64(target);
        dx.hypot(dy)
    }

    /// Angle in radians of the segment from `self` to `target`, measured from the x axis.
    pub fn angle_to(&self, target: &Vector2<T>) -> f64 {
        let (dx, dy) = self.delta_f64(target);
        dy.atan2(dx)
    }

    fn delta_f64(&self, target: &Vector2<T>) -> (f64, f64) {
        let to_f64 = |v: T| v.to_f64().unwrap_or(f64::NAN);
        (
            to_f64(target.x) - to_f64(self.x),
            to_f64(target.y) - to_f64(self.y),
        )
    }
}

impl<T: Num + Copy> Add for Vector2<T> {
    type Output = Vector2<T>;
    fn add(self, rhs: Vector2<T>) -> Vector2<T> {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Num + Copy> Sub for Vector2<T> {
    type Output = Vector2<T>;
    fn sub(self, rhs: Vector2<T>) -> Vector2<T> {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<Point> for Vector2<i32> {
    fn from(p: Point) -> Vector2<i32> {
        Vector2::new(p.x, p.y)
    }
}

impl From<Vector2<i32>> for Point {
    fn from(v: Vector2<i32>) -> Point {
        Point::new(v.x, v.y)
    }
}

pub fn radians_to_degrees(rad: f64) -> f64 {
    rad * (180.0 / PI)
}

pub fn degrees_to_radians(deg: f64) -> f64 {
    deg * (PI / 180.0)
}

/// An angle stored in radians.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle {
    radians: f64,
}

impl Angle {
    pub fn from_radians(radians: f64) -> Angle {
        Angle { radians }
    }
    pub fn from_degrees(degrees: f64) -> Angle {
        Angle {
            radians: degrees_to_radians(degrees),
        }
    }
    pub fn radians(&self) -> f64 {
        self.radians
    }
    pub fn degrees(&self) -> f64 {
        radians_to_degrees(self.radians)
    }
}
