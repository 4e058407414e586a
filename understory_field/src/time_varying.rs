// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-ordered collection of volumetric fields with a stepping cursor.
//!
//! Querying a field that evolves over time usually advances in small, ordered
//! steps (a simulation clock). Rather than searching the time axis on every
//! query, callers hold a [`Session`] that remembers the bracketing pair of
//! snapshots and step it forward. Sessions are small `Copy` values; stepping
//! returns a new session and leaves the old one valid for re-querying.

use alloc::vec::Vec;

use crate::field::VolumetricGridLookupField;
use crate::interpolation::{Interpolators, Lerp};
use crate::types::{Scalar, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
enum Cursor<T> {
    Unresolved,
    Bracketed { lower: usize, upper: usize, time: T },
}

/// Cursor into a [`TimeVaryingVolumetricGridLookupField`].
///
/// A session brackets the query time between two adjacent snapshots (or holds a
/// single snapshot when the time axis has one entry or the cursor has reached
/// the last one). Sessions index snapshots by position, so they must be
/// recreated after snapshots are added to the field.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Session<T> {
    cursor: Cursor<T>,
}

impl<T: Scalar> Session<T> {
    const UNRESOLVED: Self = Self {
        cursor: Cursor::Unresolved,
    };

    /// True if this session brackets at least one snapshot.
    pub fn is_resolved(&self) -> bool {
        matches!(self.cursor, Cursor::Bracketed { .. })
    }

    /// Time of the last query, or `None` for an unresolved session.
    pub fn time(&self) -> Option<T> {
        match self.cursor {
            Cursor::Unresolved => None,
            Cursor::Bracketed { time, .. } => Some(time),
        }
    }

    fn bracket(&self) -> Option<(usize, usize, T)> {
        match self.cursor {
            Cursor::Unresolved => None,
            Cursor::Bracketed { lower, upper, time } => Some((lower, upper, time)),
        }
    }
}

/// Candidates for one snapshot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeSlice<T> {
    /// Time key of the snapshot.
    pub time: T,
    /// Spatial candidates within the snapshot.
    pub interpolators: Interpolators<T>,
}

/// Candidates from both snapshots bracketing a session's time.
///
/// The two sets may differ when the snapshots have different spatial layouts.
/// For a session holding a single snapshot, `lower` and `upper` are the same.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpaceTimeInterpolators<T> {
    /// Candidates at the earlier snapshot.
    pub lower: TimeSlice<T>,
    /// Candidates at the later snapshot.
    pub upper: TimeSlice<T>,
}

/// An ordered mapping from time to [`VolumetricGridLookupField`] snapshots.
///
/// Snapshots are independent: each may have its own spatial layout. Queries are
/// answered by quadrilinear interpolation, i.e. trilinear interpolation in each
/// bracketing snapshot followed by linear interpolation in time.
#[derive(Clone, Debug)]
pub struct TimeVaryingVolumetricGridLookupField<T> {
    // Sorted by time, times unique.
    fields: Vec<(T, VolumetricGridLookupField<T>)>,
}

impl<T: Scalar> Default for TimeVaryingVolumetricGridLookupField<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> TimeVaryingVolumetricGridLookupField<T> {
    /// Create an empty time-varying field.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Insert the snapshot at `time`, replacing any snapshot already there.
    pub fn add_volumetric_grid_field(&mut self, time: T, field: VolumetricGridLookupField<T>) {
        let pos = self.fields.partition_point(|(t, _)| *t < time);
        match self.fields.get_mut(pos) {
            Some((t, existing)) if *t == time => *existing = field,
            _ => self.fields.insert(pos, (time, field)),
        }
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if there are no snapshots.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Snapshot times in ascending order.
    pub fn times(&self) -> impl Iterator<Item = T> + '_ {
        self.fields.iter().map(|(t, _)| *t)
    }

    /// The snapshot stored at exactly `time`.
    pub fn field_at(&self, time: T) -> Option<&VolumetricGridLookupField<T>> {
        let pos = self.fields.partition_point(|(t, _)| *t < time);
        self.fields
            .get(pos)
            .filter(|(t, _)| *t == time)
            .map(|(_, f)| f)
    }

    /// Create a session bracketing the first two snapshots.
    ///
    /// The session time starts at the first snapshot's time. A field with one
    /// snapshot yields a session holding it twice; an empty field yields an
    /// unresolved session.
    pub fn create_session(&self) -> Session<T> {
        let Some((first, _)) = self.fields.first() else {
            return Session::UNRESOLVED;
        };
        Session {
            cursor: Cursor::Bracketed {
                lower: 0,
                upper: 1.min(self.fields.len() - 1),
                time: *first,
            },
        }
    }

    /// Create a session positioned at `time` with a binary search.
    ///
    /// Use this to jump to a time instead of stepping through every snapshot.
    /// Times before the first snapshot bracket the first pair; times at or after
    /// the last snapshot hold the last one.
    pub fn create_session_at(&self, time: T) -> Session<T> {
        if self.fields.is_empty() {
            return Session::UNRESOLVED;
        }
        let last = self.fields.len() - 1;
        let lower = self
            .fields
            .partition_point(|(t, _)| *t <= time)
            .saturating_sub(1);
        let upper = (lower + 1).min(last);
        let lower = if self.fields[upper].0 <= time { upper } else { lower };
        Session {
            cursor: Cursor::Bracketed { lower, upper, time },
        }
    }

    /// Advance `session` to `time`.
    ///
    /// Returns an equivalent session if `time` is still inside the current
    /// bracket, otherwise walks forward until `time` is bracketed, holding the
    /// last snapshot once it is reached. Returns `None` for an unresolved
    /// session or if `time` is earlier than the session's last query time.
    pub fn step_to(&self, session: &Session<T>, time: T) -> Option<Session<T>> {
        let Some((mut lower, mut upper, last_time)) = session.bracket() else {
            log::trace!("step_to called on an unresolved session");
            return None;
        };
        if time < last_time {
            log::trace!("step_to rejected time regression from {last_time:?} to {time:?}");
            return None;
        }
        let Some(last) = self.fields.len().checked_sub(1).filter(|&last| upper <= last) else {
            log::trace!("step_to called with a session from another field");
            return None;
        };
        while lower != upper && self.fields[upper].0 <= time {
            lower = upper;
            upper = (upper + 1).min(last);
        }
        Some(Session {
            cursor: Cursor::Bracketed { lower, upper, time },
        })
    }

    /// Look up candidates for `point` in both snapshots bracketing `session`.
    ///
    /// Returns `None` for an unresolved session.
    pub fn look_up(
        &self,
        session: &Session<T>,
        point: Vec3<T>,
    ) -> Option<SpaceTimeInterpolators<T>> {
        self.look_up_with_tolerance(session, point, Vec3::splat(T::DEFAULT_TOLERANCE))
    }

    /// Like [`Self::look_up`] with explicit per-axis tolerances.
    pub fn look_up_with_tolerance(
        &self,
        session: &Session<T>,
        point: Vec3<T>,
        tolerance: Vec3<T>,
    ) -> Option<SpaceTimeInterpolators<T>> {
        let (lower, upper, _) = session.bracket()?;
        let slice = |i: usize| {
            let (time, field) = self.fields.get(i)?;
            Some(TimeSlice {
                time: *time,
                interpolators: field.interpolators_with_tolerance(point, tolerance),
            })
        };
        Some(SpaceTimeInterpolators {
            lower: slice(lower)?,
            upper: slice(upper)?,
        })
    }

    /// Estimate the value at `position` and the session's time.
    ///
    /// The lower snapshot is evaluated with `values_lower` and the upper one with
    /// `values_upper`; the two estimates are blended by the fraction of the
    /// session time between the snapshot times. A session holding a single
    /// snapshot returns that snapshot's estimate using `values_upper`.
    ///
    /// If only one snapshot has candidates its estimate is used alone. Returns
    /// `None` for an unresolved session or when neither snapshot covers
    /// `position`. Vertices with no sample contribute `default`.
    pub fn estimate_quadrilinear<V: Lerp<T>>(
        &self,
        session: &Session<T>,
        points: &SpaceTimeInterpolators<T>,
        values_lower: &[V],
        values_upper: &[V],
        position: Vec3<T>,
        default: V,
    ) -> Option<V> {
        let (lower, upper, time) = session.bracket()?;
        if lower == upper {
            return points.upper.interpolators.estimate(values_upper, position, default);
        }

        let lower_estimate = points.lower.interpolators.estimate(values_lower, position, default);
        let upper_estimate = points.upper.interpolators.estimate(values_upper, position, default);
        match (lower_estimate, upper_estimate) {
            (Some(a), Some(b)) => {
                let fraction = time_fraction(points.lower.time, points.upper.time, time);
                Some(a.lerp(b, fraction))
            }
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }
}

/// Position of `time` within `[lower, upper]`, clamped to `[0, 1]`.
fn time_fraction<T: Scalar>(lower: T, upper: T, time: T) -> T {
    let span = upper - lower;
    if span <= T::zero() {
        return T::zero();
    }
    ((time - lower) / span).max(T::zero()).min(T::one())
}
