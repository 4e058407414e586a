// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookup table for a volumetric dataset sampled on a (possibly sparse) grid.

use alloc::vec;
use alloc::vec::Vec;

use crate::axis::AxisIndex;
use crate::interpolation::{InterpolationPoint3D, Interpolators, Lerp};
use crate::types::{Aabb3D, Scalar, Vec3};

/// Lookup table for a volumetric dataset organised as a grid.
///
/// The grid may be non-uniform (per-axis strides can vary) and sparse (some
/// vertex combinations may have no sample). It is not meant for scattered data:
/// each sample's coordinates are bucketed per axis, and the cartesian product of
/// the distinct values defines the grid vertices.
///
/// The field stores row references, not values. Callers keep the values in a
/// slice and pass it to the estimate methods, which lets one field serve several
/// quantities sampled on the same grid.
#[derive(Clone, Debug)]
pub struct VolumetricGridLookupField<T> {
    x_axis: AxisIndex<T>,
    y_axis: AxisIndex<T>,
    z_axis: AxisIndex<T>,
    // Row-major over (z, y, x) ordinals.
    cells: Vec<Option<usize>>,
    overwritten: usize,
}

impl<T: Scalar> VolumetricGridLookupField<T> {
    /// Build a field whose row references are the positions in `cloud`.
    pub fn new(cloud: &[Vec3<T>]) -> Self {
        Self::from_indexed_points(cloud.iter().copied().zip(0..))
    }

    /// Build a field from `(position, row)` pairs.
    pub fn from_indexed_points(points: impl IntoIterator<Item = (Vec3<T>, usize)>) -> Self {
        Self::with_tolerance(points, Vec3::splat(T::DEFAULT_TOLERANCE))
    }

    /// Build a field from `(position, row)` pairs, bucketing coordinates that are
    /// closer than the per-axis `tolerance`.
    ///
    /// Samples that land on an already populated vertex replace the earlier row.
    /// Each replacement is logged and counted in [`Self::overwritten_cells`].
    pub fn with_tolerance(
        points: impl IntoIterator<Item = (Vec3<T>, usize)>,
        tolerance: Vec3<T>,
    ) -> Self {
        let points: Vec<_> = points.into_iter().collect();

        let mut x_axis = AxisIndex::with_tolerance(tolerance.x);
        let mut y_axis = AxisIndex::with_tolerance(tolerance.y);
        let mut z_axis = AxisIndex::with_tolerance(tolerance.z);
        for (p, _) in &points {
            x_axis.add_index_if_not_found(p.x);
            y_axis.add_index_if_not_found(p.y);
            z_axis.add_index_if_not_found(p.z);
        }

        let mut field = Self {
            cells: vec![
                None;
                x_axis.num_unique_indices()
                    * y_axis.num_unique_indices()
                    * z_axis.num_unique_indices()
            ],
            x_axis,
            y_axis,
            z_axis,
            overwritten: 0,
        };

        for (p, row) in points {
            let (Some(x), Some(y), Some(z)) = (
                field.x_axis.index_of(p.x),
                field.y_axis.index_of(p.y),
                field.z_axis.index_of(p.z),
            ) else {
                // Every coordinate was registered above.
                continue;
            };
            let cell = field.cell_index(x, y, z);
            if let Some(previous) = field.cells[cell].replace(row) {
                log::warn!(
                    "vertex ({:?}, {:?}, {:?}) sampled twice; row {previous} replaced by {row}",
                    p.x,
                    p.y,
                    p.z
                );
                field.overwritten += 1;
            }
        }

        let [nx, ny, nz] = field.dimensions();
        log::debug!(
            "built volumetric grid field: {nx}x{ny}x{nz} vertices, {} populated",
            field.populated_cells()
        );
        field
    }

    #[inline]
    fn cell_index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.y_axis.num_unique_indices() + y) * self.x_axis.num_unique_indices() + x
    }

    /// Number of distinct coordinates along x, y and z.
    pub fn dimensions(&self) -> [usize; 3] {
        [
            self.x_axis.num_unique_indices(),
            self.y_axis.num_unique_indices(),
            self.z_axis.num_unique_indices(),
        ]
    }

    /// Number of grid vertices that carry a row reference.
    pub fn populated_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of samples that replaced an earlier sample at the same vertex.
    pub fn overwritten_cells(&self) -> usize {
        self.overwritten
    }

    /// The per-axis indices, in x, y, z order.
    pub fn axes(&self) -> [&AxisIndex<T>; 3] {
        [&self.x_axis, &self.y_axis, &self.z_axis]
    }

    /// Bounding box of the grid, or `None` if it has no samples.
    pub fn bounds(&self) -> Option<Aabb3D<T>> {
        Some(Aabb3D::new(
            Vec3::new(
                self.x_axis.min_key()?,
                self.y_axis.min_key()?,
                self.z_axis.min_key()?,
            ),
            Vec3::new(
                self.x_axis.max_key()?,
                self.y_axis.max_key()?,
                self.z_axis.max_key()?,
            ),
        ))
    }

    /// Candidate vertices for `pt` using [`Scalar::DEFAULT_TOLERANCE`] on every axis.
    pub fn interpolators(&self, pt: Vec3<T>) -> Interpolators<T> {
        self.interpolators_with_tolerance(pt, Vec3::splat(T::DEFAULT_TOLERANCE))
    }

    /// Candidate vertices for `pt`.
    ///
    /// Separate tolerances are used per axis as data may have different
    /// magnitudes on each axis. Yields one vertex when `pt` coincides with a grid
    /// vertex, two along an edge, four on a face and eight inside a cell. Vertices
    /// with no sample are still returned, with no row reference.
    pub fn interpolators_with_tolerance(
        &self,
        pt: Vec3<T>,
        tolerance: Vec3<T>,
    ) -> Interpolators<T> {
        let xs = self.x_axis.interpolators(pt.x, tolerance.x);
        let ys = self.y_axis.interpolators(pt.y, tolerance.y);
        let zs = self.z_axis.interpolators(pt.z, tolerance.z);

        let mut buf = [InterpolationPoint3D::new(Vec3::splat(T::zero()), None); 8];
        let mut n = 0;
        // z varies fastest, so consecutive pairs share an edge and each half is a face.
        for x in xs.as_slice() {
            for y in ys.as_slice() {
                for z in zs.as_slice() {
                    buf[n] = InterpolationPoint3D::new(
                        Vec3::new(x.position, y.position, z.position),
                        self.cells[self.cell_index(x.index, y.index, z.index)],
                    );
                    n += 1;
                }
            }
        }
        Interpolators::from_points(&buf[..n]).unwrap_or(Interpolators::Outside)
    }

    /// Estimate the value at `pt` by multilinear interpolation of `values`.
    ///
    /// Returns `None` if `pt` is outside the grid. Vertices with no sample
    /// contribute `default`.
    pub fn estimate_trilinear<V: Lerp<T>>(
        &self,
        pt: Vec3<T>,
        values: &[V],
        default: V,
    ) -> Option<V> {
        self.interpolators(pt).estimate(values, pt, default)
    }

    /// Like [`Self::estimate_trilinear`] but reuses candidates from
    /// [`Self::interpolators`] or [`Self::interpolators_with_tolerance`].
    pub fn estimate_trilinear_with<V: Lerp<T>>(
        &self,
        interpolators: &Interpolators<T>,
        pt: Vec3<T>,
        values: &[V],
        default: V,
    ) -> Option<V> {
        interpolators.estimate(values, pt, default)
    }
}
