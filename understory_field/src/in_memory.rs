// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory time-varying grid that owns its sample values.

use alloc::vec::Vec;

use crate::field::VolumetricGridLookupField;
use crate::interpolation::Lerp;
use crate::time_varying::{Session, SpaceTimeInterpolators, TimeVaryingVolumetricGridLookupField};
use crate::types::{Scalar, Vec3};

/// Accumulates `(time, position, value)` samples and builds an
/// [`InMemoryTimeVaryingVolumetricGrid`].
///
/// Samples sharing a time form one snapshot. Within a snapshot, samples are
/// expected to lie on a grid (see [`VolumetricGridLookupField`]).
#[derive(Clone, Debug)]
pub struct InMemoryTimeVaryingVolumetricGridFactory<T, V> {
    // Sorted by time, times unique.
    buckets: Vec<(T, Vec<(Vec3<T>, V)>)>,
}

impl<T: Scalar, V: Lerp<T>> Default for InMemoryTimeVaryingVolumetricGridFactory<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar, V: Lerp<T>> InMemoryTimeVaryingVolumetricGridFactory<T, V> {
    /// Create an empty factory.
    pub fn new() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }

    /// Add a sample `value` at `position` and `time`.
    pub fn add_point(&mut self, time: T, position: Vec3<T>, value: V) {
        let pos = self.buckets.partition_point(|(t, _)| *t < time);
        match self.buckets.get_mut(pos) {
            Some((t, samples)) if *t == time => samples.push((position, value)),
            _ => self.buckets.insert(pos, (time, alloc::vec![(position, value)])),
        }
    }

    /// Total number of samples added.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|(_, s)| s.len()).sum()
    }

    /// True if no samples were added.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Build the grid: one snapshot per distinct time, values stored contiguously.
    pub fn build(&self) -> InMemoryTimeVaryingVolumetricGrid<T, V> {
        let mut values = Vec::with_capacity(self.len());
        let mut fields = TimeVaryingVolumetricGridLookupField::new();
        for (time, samples) in &self.buckets {
            let first_row = values.len();
            values.extend(samples.iter().map(|(_, v)| *v));
            let field = VolumetricGridLookupField::from_indexed_points(
                samples.iter().map(|(p, _)| *p).zip(first_row..),
            );
            fields.add_volumetric_grid_field(*time, field);
        }
        log::debug!(
            "built in-memory time-varying grid: {} snapshots, {} samples",
            fields.len(),
            values.len()
        );
        InMemoryTimeVaryingVolumetricGrid { values, fields }
    }
}

/// A time-varying grid that keeps every snapshot and value in memory.
///
/// Build one with [`InMemoryTimeVaryingVolumetricGridFactory`], create a
/// [`Session`], and step it forward as time advances.
#[derive(Clone, Debug)]
pub struct InMemoryTimeVaryingVolumetricGrid<T, V> {
    values: Vec<V>,
    fields: TimeVaryingVolumetricGridLookupField<T>,
}

impl<T: Scalar, V: Lerp<T>> InMemoryTimeVaryingVolumetricGrid<T, V> {
    /// Create a session starting at the first snapshot.
    pub fn create_session(&self) -> Session<T> {
        self.fields.create_session()
    }

    /// Create a session positioned at `time`.
    pub fn create_session_at(&self, time: T) -> Session<T> {
        self.fields.create_session_at(time)
    }

    /// Advance `session` to `time`. `None` on time regression or an unresolved session.
    pub fn step_to(&self, session: &Session<T>, time: T) -> Option<Session<T>> {
        self.fields.step_to(session, time)
    }

    /// Candidates for `pos` in both snapshots bracketing `session`.
    pub fn interpolators(
        &self,
        session: &Session<T>,
        pos: Vec3<T>,
    ) -> Option<SpaceTimeInterpolators<T>> {
        self.fields.look_up(session, pos)
    }

    /// Estimate the value at `pos` and the session's time.
    ///
    /// Returns `None` if the session is unresolved or `pos` is outside the grid.
    /// Holes in a sparse snapshot contribute `default`.
    pub fn look_up(&self, session: &Session<T>, pos: Vec3<T>, default: V) -> Option<V> {
        self.look_up_with_tolerance(session, pos, Vec3::splat(T::DEFAULT_TOLERANCE), default)
    }

    /// Like [`Self::look_up`] with explicit per-axis tolerances.
    pub fn look_up_with_tolerance(
        &self,
        session: &Session<T>,
        pos: Vec3<T>,
        tolerance: Vec3<T>,
        default: V,
    ) -> Option<V> {
        let points = self.fields.look_up_with_tolerance(session, pos, tolerance)?;
        self.fields
            .estimate_quadrilinear(session, &points, &self.values, &self.values, pos, default)
    }

    /// All stored values; rows referenced by the snapshots index into this slice.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// The underlying time-varying lookup field.
    pub fn lookup_field(&self) -> &TimeVaryingVolumetricGridLookupField<T> {
        &self.fields
    }
}
