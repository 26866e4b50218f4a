//! Screen-space geometry.

use core::ops::{Add, AddAssign, Sub};

/// A point in screen coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Width and height of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Size {
    /// Creates a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Extent.
    pub size: Size,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Returns whether `point` lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.origin.x <= point.x
            && point.x <= self.origin.x + self.size.width
            && self.origin.y <= point.y
            && point.y <= self.origin.y + self.size.height
    }

    /// Returns the center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Returns the smallest rectangle covering both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let left = self.origin.x.min(other.origin.x);
        let top = self.origin.y.min(other.origin.y);
        let right = (self.origin.x + self.size.width).max(other.origin.x + other.size.width);
        let bottom = (self.origin.y + self.size.height).max(other.origin.y + other.size.height);
        Self::new(Point::new(left, top), Size::new(right - left, bottom - top))
    }
}

#[cfg(feature = "std")]
pub(crate) fn round(value: f32) -> f32 {
    value.round()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub(crate) fn round(value: f32) -> f32 {
    libm::roundf(value)
}

#[cfg(feature = "std")]
pub(crate) fn abs(value: f32) -> f32 {
    value.abs()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub(crate) fn abs(value: f32) -> f32 {
    libm::fabsf(value)
}
