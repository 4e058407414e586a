// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparse number line with tolerant bucketing of coordinate values.

use alloc::vec::Vec;
use core::slice;

use crate::types::Scalar;

/// A stored coordinate value together with its ordinal on the axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisPoint<T> {
    /// The stored coordinate.
    pub position: T,
    /// Dense rank of the coordinate along the axis.
    pub index: usize,
}

/// Result of bracketing a value on an [`AxisIndex`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AxisBracket<T> {
    /// The value is outside the covered range, or the axis is empty.
    Outside,
    /// The value matches a stored coordinate within tolerance.
    Exact(AxisPoint<T>),
    /// The value lies strictly between two neighbouring coordinates, lower first.
    Between([AxisPoint<T>; 2]),
}

impl<T> AxisBracket<T> {
    /// Candidates as a slice of 0, 1 or 2 points.
    pub fn as_slice(&self) -> &[AxisPoint<T>] {
        match self {
            Self::Outside => &[],
            Self::Exact(p) => slice::from_ref(p),
            Self::Between(pair) => &pair[..],
        }
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True if the value could not be bracketed.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Outside)
    }
}

/// Ordered set of distinct coordinate values along one axis.
///
/// Two values are treated as the same coordinate when they differ by less than
/// the axis tolerance. Ordinals are dense (`0..n`) and always follow ascending
/// order of the stored values, regardless of the order in which values were added.
#[derive(Clone, Debug)]
pub struct AxisIndex<T> {
    keys: Vec<T>,
    tolerance: T,
}

impl<T: Scalar> Default for AxisIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> AxisIndex<T> {
    /// Create an empty axis using [`Scalar::DEFAULT_TOLERANCE`].
    pub fn new() -> Self {
        Self::with_tolerance(T::DEFAULT_TOLERANCE)
    }

    /// Create an empty axis that merges values closer than `tolerance`.
    pub fn with_tolerance(tolerance: T) -> Self {
        debug_assert!(tolerance > T::zero(), "axis tolerance must be positive");
        Self {
            keys: Vec::new(),
            tolerance,
        }
    }

    /// Tolerance used when registering values.
    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    /// Register the existence of a measurement at `value`.
    ///
    /// Does nothing if a stored value already matches within tolerance.
    pub fn add_index_if_not_found(&mut self, value: T) {
        let pos = self.keys.partition_point(|&k| k < value);
        if self.matching(pos, value, self.tolerance).is_none() {
            self.keys.insert(pos, value);
        }
    }

    /// Ordinal of `value`, if a stored value matches within tolerance.
    pub fn index_of(&self, value: T) -> Option<usize> {
        let pos = self.keys.partition_point(|&k| k < value);
        self.matching(pos, value, self.tolerance)
    }

    /// Number of distinct values on this axis.
    pub fn num_unique_indices(&self) -> usize {
        self.keys.len()
    }

    /// True if no values are registered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Smallest stored value.
    pub fn min_key(&self) -> Option<T> {
        self.keys.first().copied()
    }

    /// Largest stored value.
    pub fn max_key(&self) -> Option<T> {
        self.keys.last().copied()
    }

    /// Stored values in ascending order; the slice position is the ordinal.
    pub fn keys(&self) -> &[T] {
        &self.keys
    }

    /// Find the stored values to interpolate `value` from.
    ///
    /// Returns a single candidate on a tolerant match, the two bracketing
    /// candidates when `value` lies strictly inside the covered range, and
    /// [`AxisBracket::Outside`] otherwise. Never extrapolates.
    pub fn interpolators(&self, value: T, tolerance: T) -> AxisBracket<T> {
        debug_assert!(tolerance > T::zero(), "query tolerance must be positive");
        let pos = self.keys.partition_point(|&k| k < value);
        if let Some(index) = self.matching(pos, value, tolerance) {
            return AxisBracket::Exact(self.point(index));
        }
        if pos == 0 || pos == self.keys.len() {
            return AxisBracket::Outside;
        }
        AxisBracket::Between([self.point(pos - 1), self.point(pos)])
    }

    fn point(&self, index: usize) -> AxisPoint<T> {
        AxisPoint {
            position: self.keys[index],
            index,
        }
    }

    // `pos` is the insertion point of `value`, so only its two neighbours can match.
    // The nearer one wins; ties go to the lower key.
    fn matching(&self, pos: usize, value: T, tolerance: T) -> Option<usize> {
        let distance = |i: usize| (self.keys[i] - value).abs();
        let lower = pos.checked_sub(1).filter(|&i| distance(i) < tolerance);
        let upper = Some(pos).filter(|&i| i < self.keys.len() && distance(i) < tolerance);
        match (lower, upper) {
            (Some(l), Some(u)) => Some(if distance(u) < distance(l) { u } else { l }),
            (l, u) => l.or(u),
        }
    }
}
