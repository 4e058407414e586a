// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and the scalar abstraction.

use core::fmt::Debug;
use core::ops::{Add, Mul, Sub};

use num_traits::Float;

/// Numeric scalar used for coordinates, tolerances and time.
///
/// This is a thin layer over [`Float`] that adds the defaults the field needs.
/// It is implemented for `f32` and `f64`.
pub trait Scalar: Float + Debug {
    /// Default tolerance for bucketing and querying coordinates along an axis.
    const DEFAULT_TOLERANCE: Self;
}

impl Scalar for f32 {
    const DEFAULT_TOLERANCE: Self = 1e-6;
}

impl Scalar for f64 {
    const DEFAULT_TOLERANCE: Self = 1e-6;
}

/// A point or displacement in 3D.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3<T> {
    /// X coordinate
    pub x: T,
    /// Y coordinate
    pub y: T,
    /// Z coordinate
    pub z: T,
}

impl<T> Vec3<T> {
    /// Create a new vector from its components.
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Copy> Vec3<T> {
    /// A vector with all three components set to `v`.
    pub const fn splat(v: T) -> Self {
        Self { x: v, y: v, z: v }
    }
}

impl<T: Scalar> Vec3<T> {
    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> T {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction. A zero vector is returned unchanged.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > T::zero() { self * len.recip() } else { self }
    }

    /// Euclidean distance between two points.
    #[inline]
    pub fn distance(self, other: Self) -> T {
        (self - other).length()
    }
}

impl<T: Scalar> Add for Vec3<T> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Scalar> Sub for Vec3<T> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Scalar> Mul<T> for Vec3<T> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Axis-aligned bounding box in 3D.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3D<T> {
    /// Minimum corner
    pub min: Vec3<T>,
    /// Maximum corner
    pub max: Vec3<T>,
}

impl<T> Aabb3D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min: Vec3<T>, max: Vec3<T>) -> Self {
        Self { min, max }
    }
}

impl<T: Scalar> Aabb3D<T> {
    /// Whether this AABB contains the point (boundary inclusive).
    pub fn contains_point(&self, p: Vec3<T>) -> bool {
        self.min.x <= p.x
            && self.min.y <= p.y
            && self.min.z <= p.z
            && p.x <= self.max.x
            && p.y <= self.max.y
            && p.z <= self.max.z
    }

    /// Extent along each axis.
    pub fn size(&self) -> Vec3<T> {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_follows_right_hand_rule() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn normalized_zero_stays_zero() {
        let z = Vec3::<f64>::splat(0.0);
        assert_eq!(z.normalized(), z);
        let v = Vec3::new(3.0_f32, 0.0, 4.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn aabb_contains_boundary() {
        let b = Aabb3D::new(Vec3::splat(0.0), Vec3::splat(1.0));
        assert!(b.contains_point(Vec3::new(0.0, 1.0, 0.5)));
        assert!(!b.contains_point(Vec3::new(-0.1, 0.5, 0.5)));
        assert_eq!(b.size(), Vec3::splat(1.0));
    }
}
