// Plane geometry shared by every simulated entity.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// Absolute world coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Displacement or velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, other: Vector) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, k: f64) -> Vector {
        Vector::new(self.x * k, self.y * k)
    }
}

impl Add<Vector> for Point {
    type Output = Point;

    fn add(self, v: Vector) -> Point {
        Point::new(self.x + v.x, self.y + v.y)
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, v: Vector) {
        self.x += v.x;
        self.y += v.y;
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y)
    }
}

/// Axis-aligned bounds, always derived from an owner's origin and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub left_x: f64,
    pub top_y: f64,
    pub right_x: f64,
    pub bottom_y: f64,
}

impl Rectangle {
    pub fn from_origin(origin: Point, width: f64, height: f64) -> Self {
        Self {
            left_x: origin.x,
            top_y: origin.y,
            right_x: origin.x + width,
            bottom_y: origin.y + height,
        }
    }

    pub fn width(&self) -> f64 {
        self.right_x - self.left_x
    }

    pub fn height(&self) -> f64 {
        self.bottom_y - self.top_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left_x + self.right_x) / 2.0,
            (self.top_y + self.bottom_y) / 2.0,
        )
    }

    /// Grows the rectangle by `delta` on every side.
    pub fn extended(&self, delta: f64) -> Self {
        Self {
            left_x: self.left_x - delta,
            top_y: self.top_y - delta,
            right_x: self.right_x + delta,
            bottom_y: self.bottom_y + delta,
        }
    }

    /// Touching edges do not count as an intersection.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        !(self.right_x <= other.left_x
            || other.right_x <= self.left_x
            || self.bottom_y <= other.top_y
            || other.bottom_y <= self.top_y)
    }

    /// Minimal horizontal displacement that moves `moving` out of `self`.
    ///
    /// Candidates are "out through the left face" then "out through the right
    /// face"; the shorter one wins and ties keep the first.
    pub fn push_vector_x(&self, moving: &Rectangle) -> Vector {
        if !self.intersects(moving) {
            return Vector::ZERO;
        }

        let candidates = [
            (moving.right_x > self.left_x).then(|| Vector::new(self.left_x - moving.right_x, 0.0)),
            (moving.left_x < self.right_x).then(|| Vector::new(self.right_x - moving.left_x, 0.0)),
        ];
        shortest(candidates)
    }

    /// Minimal vertical displacement that moves `moving` out of `self`.
    pub fn push_vector_y(&self, moving: &Rectangle) -> Vector {
        if !self.intersects(moving) {
            return Vector::ZERO;
        }

        let candidates = [
            (moving.bottom_y > self.top_y).then(|| Vector::new(0.0, self.top_y - moving.bottom_y)),
            (moving.top_y < self.bottom_y).then(|| Vector::new(0.0, self.bottom_y - moving.top_y)),
        ];
        shortest(candidates)
    }
}

fn shortest(candidates: [Option<Vector>; 2]) -> Vector {
    candidates
        .into_iter()
        .flatten()
        .reduce(|best, v| {
            if v.length_squared() < best.length_squared() {
                v
            } else {
                best
            }
        })
        .unwrap_or(Vector::ZERO)
}
