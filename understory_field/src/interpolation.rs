// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multilinear interpolation primitives.
//!
//! A query against a grid yields 1, 2, 4 or 8 candidate vertices depending on
//! whether the query point coincides with a vertex, lies on an edge, lies on a
//! face, or lies strictly inside a cell. [`Interpolators`] captures that arity
//! and dispatches to one blending function per case:
//!
//! - [`linear_interpolate`] weights two values by relative distance along their edge.
//! - [`bilinear_interpolate`] projects onto two parallel edges, interpolates each,
//!   then interpolates between the two projections.
//! - [`trilinear_interpolate`] projects onto two parallel faces, applies the
//!   bilinear rule on each, then interpolates between the two projections.
//!
//! Candidate order matters: consecutive pairs must share an edge and each half of
//! an 8-point cell must be a face. [`VolumetricGridLookupField`](crate::VolumetricGridLookupField)
//! always produces that order; the functions here do not re-validate it.
//!
//! Candidates carry an optional row reference into a caller-supplied values slice.
//! Missing references (holes in a sparse grid) use the caller's default value.

use core::ops::{Add, Mul};
use core::slice;

use crate::types::{Scalar, Vec3};

/// Values that can be blended linearly with a weight of type `T`.
pub trait Lerp<T>: Copy {
    /// Blend from `self` (at `t = 0`) towards `other` (at `t = 1`).
    fn lerp(self, other: Self, t: T) -> Self;
}

impl<T, V> Lerp<T> for V
where
    T: Scalar,
    V: Copy + Add<Output = V> + Mul<T, Output = V>,
{
    #[inline]
    fn lerp(self, other: Self, t: T) -> Self {
        self * (T::one() - t) + other * t
    }
}

/// A grid vertex used for interpolation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InterpolationPoint3D<T> {
    /// Position of the vertex.
    pub position: Vec3<T>,
    /// Row in the values slice holding this vertex's value.
    ///
    /// `None` when the grid is sparse and no sample exists at this vertex.
    pub index: Option<usize>,
}

impl<T: Scalar> InterpolationPoint3D<T> {
    /// Create a new interpolation point.
    pub const fn new(position: Vec3<T>, index: Option<usize>) -> Self {
        Self { position, index }
    }

    fn value<V: Copy>(&self, values: &[V], default: V) -> V {
        debug_assert!(
            self.index.is_none_or(|i| i < values.len()),
            "interpolation row {:?} is out of range for {} values",
            self.index,
            values.len()
        );
        self.index
            .and_then(|i| values.get(i).copied())
            .unwrap_or(default)
    }
}

/// Candidate vertices for a query, tagged by interpolation arity.
#[allow(
    clippy::large_enum_variant,
    reason = "Returned by value per query; boxing the cell case would allocate on the hot path."
)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Interpolators<T> {
    /// The query lies outside the grid on at least one axis.
    Outside,
    /// The query coincides with a grid vertex.
    Vertex(InterpolationPoint3D<T>),
    /// The query lies on a grid edge.
    Edge([InterpolationPoint3D<T>; 2]),
    /// The query lies on a grid face; consecutive pairs share an edge.
    Face([InterpolationPoint3D<T>; 4]),
    /// The query lies inside a grid cell; each half is a face.
    Cell([InterpolationPoint3D<T>; 8]),
}

impl<T: Scalar> Interpolators<T> {
    /// Rebuild the arity union from a candidate list.
    ///
    /// Returns `None` for any count other than 0, 1, 2, 4 or 8.
    pub fn from_points(points: &[InterpolationPoint3D<T>]) -> Option<Self> {
        Some(match points {
            [] => Self::Outside,
            [a] => Self::Vertex(*a),
            [a, b] => Self::Edge([*a, *b]),
            [a, b, c, d] => Self::Face([*a, *b, *c, *d]),
            [a, b, c, d, e, f, g, h] => Self::Cell([*a, *b, *c, *d, *e, *f, *g, *h]),
            _ => return None,
        })
    }

    /// Estimate the value at `pos` from these candidates.
    ///
    /// Returns `None` only for [`Interpolators::Outside`]. Candidates without a
    /// row reference contribute `default`.
    pub fn estimate<V: Lerp<T>>(&self, values: &[V], pos: Vec3<T>, default: V) -> Option<V> {
        match self {
            Self::Outside => None,
            Self::Vertex(p) => Some(p.value(values, default)),
            Self::Edge([a, b]) => Some(linear_interpolate(a, b, values, pos, default)),
            Self::Face(face) => Some(bilinear_interpolate(face, values, pos, default)),
            Self::Cell(cell) => Some(trilinear_interpolate(cell, values, pos, default)),
        }
    }
}

impl<T> Interpolators<T> {
    /// Candidates as a slice of 0, 1, 2, 4 or 8 points.
    pub fn as_slice(&self) -> &[InterpolationPoint3D<T>] {
        match self {
            Self::Outside => &[],
            Self::Vertex(p) => slice::from_ref(p),
            Self::Edge(points) => &points[..],
            Self::Face(points) => &points[..],
            Self::Cell(points) => &points[..],
        }
    }

    /// Iterate over the candidates.
    pub fn iter(&self) -> slice::Iter<'_, InterpolationPoint3D<T>> {
        self.as_slice().iter()
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True if the query was outside the grid.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Outside)
    }
}

impl<'a, T> IntoIterator for &'a Interpolators<T> {
    type Item = &'a InterpolationPoint3D<T>;
    type IntoIter = slice::Iter<'a, InterpolationPoint3D<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

/// Blend `a_val` at `a_pos` and `b_val` at `b_pos` by the distance of `pos` from `b_pos`.
fn blend_along<T: Scalar, V: Lerp<T>>(
    a_pos: Vec3<T>,
    a_val: V,
    b_pos: Vec3<T>,
    b_val: V,
    pos: Vec3<T>,
) -> V {
    let span = a_pos.distance(b_pos);
    debug_assert!(span > T::zero(), "interpolation endpoints coincide");
    let t = pos.distance(b_pos) / span;
    b_val.lerp(a_val, t)
}

/// Linear interpolation between two vertices.
///
/// The weight of `a` is the distance from `b` to `pos` relative to the edge length.
/// `a` and `b` must not coincide.
pub fn linear_interpolate<T: Scalar, V: Lerp<T>>(
    a: &InterpolationPoint3D<T>,
    b: &InterpolationPoint3D<T>,
    values: &[V],
    pos: Vec3<T>,
    default: V,
) -> V {
    blend_along(
        a.position,
        a.value(values, default),
        b.position,
        b.value(values, default),
        pos,
    )
}

/// Bilinear interpolation over a rectangular patch.
///
/// `points[0..2]` and `points[2..4]` must each lie on one edge, and the two edges
/// must be parallel.
pub fn bilinear_interpolate<T: Scalar, V: Lerp<T>>(
    points: &[InterpolationPoint3D<T>; 4],
    values: &[V],
    pos: Vec3<T>,
    default: V,
) -> V {
    let [n0, n1, n2, n3] = points;
    debug_assert!(
        {
            let normal = (n1.position - n0.position).cross(n2.position - n0.position);
            let scale = normal.length() * (n3.position - n0.position).length();
            normal.dot(n3.position - n0.position).abs() <= scale * T::DEFAULT_TOLERANCE
        },
        "bilinear patch is not planar"
    );
    let dir = (n1.position - n0.position).normalized();

    let pos1 = n0.position + dir * (pos - n0.position).dot(dir);
    let val1 = linear_interpolate(n0, n1, values, pos1, default);

    let pos2 = n2.position + dir * (pos - n2.position).dot(dir);
    let val2 = linear_interpolate(n2, n3, values, pos2, default);

    blend_along(pos1, val1, pos2, val2, pos)
}

/// Project `pos` onto the plane through the first three points of `face`.
pub fn project_point_to_plane<T: Scalar>(
    face: &[InterpolationPoint3D<T>; 4],
    pos: Vec3<T>,
) -> Vec3<T> {
    let origin = face[0].position;
    let normal = (face[1].position - origin)
        .cross(face[2].position - origin)
        .normalized();
    pos - normal * normal.dot(pos - origin)
}

/// Trilinear interpolation over a rectangular cell.
///
/// `points[0..4]` and `points[4..8]` must each be a face (ordered as for
/// [`bilinear_interpolate`]) and the two faces must be parallel.
pub fn trilinear_interpolate<T: Scalar, V: Lerp<T>>(
    points: &[InterpolationPoint3D<T>; 8],
    values: &[V],
    pos: Vec3<T>,
    default: V,
) -> V {
    let [a, b, c, d, e, f, g, h] = *points;
    let face1 = [a, b, c, d];
    let face2 = [e, f, g, h];

    let pos1 = project_point_to_plane(&face1, pos);
    let val1 = bilinear_interpolate(&face1, values, pos1, default);

    let pos2 = project_point_to_plane(&face2, pos);
    let val2 = bilinear_interpolate(&face2, values, pos2, default);

    blend_along(pos1, val1, pos2, val2, pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64, z: f64, index: usize) -> InterpolationPoint3D<f64> {
        InterpolationPoint3D::new(Vec3::new(x, y, z), Some(index))
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn linear_weights_by_distance() {
        let a = pt(0.0, 0.0, 0.0, 0);
        let b = pt(0.0, 0.0, 4.0, 1);
        let values = [10.0, 20.0];
        let v = linear_interpolate(&a, &b, &values, Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(close(v, 12.5), "got {v}");
        let at_a = linear_interpolate(&a, &b, &values, a.position, 0.0);
        assert!(close(at_a, 10.0), "got {at_a}");
    }

    #[test]
    fn linear_uses_default_for_holes() {
        let a = pt(0.0, 0.0, 0.0, 0);
        let b = InterpolationPoint3D::new(Vec3::new(1.0, 0.0, 0.0), None);
        let values = [4.0];
        let v = linear_interpolate(&a, &b, &values, Vec3::new(0.5, 0.0, 0.0), -4.0);
        assert!(close(v, 0.0), "got {v}");
    }

    #[test]
    fn bilinear_matches_closed_form() {
        // f(y, z) = 1 + 2y + 3z + 4yz on the unit square at x = 0.
        let f = |y: f64, z: f64| 1.0 + 2.0 * y + 3.0 * z + 4.0 * y * z;
        let face = [
            pt(0.0, 0.0, 0.0, 0),
            pt(0.0, 0.0, 1.0, 1),
            pt(0.0, 1.0, 0.0, 2),
            pt(0.0, 1.0, 1.0, 3),
        ];
        let values = [f(0.0, 0.0), f(0.0, 1.0), f(1.0, 0.0), f(1.0, 1.0)];
        let v = bilinear_interpolate(&face, &values, Vec3::new(0.0, 0.25, 0.75), 0.0);
        assert!(close(v, f(0.25, 0.75)), "got {v}");
    }

    #[test]
    fn trilinear_matches_closed_form() {
        let f = |x: f64, y: f64, z: f64| 2.0 * x - y + 0.5 * z + x * y * z;
        let mut cell = [pt(0.0, 0.0, 0.0, 0); 8];
        let mut values = [0.0; 8];
        let mut n = 0;
        for x in [0.0, 2.0] {
            for y in [0.0, 1.0] {
                for z in [0.0, 3.0] {
                    cell[n] = pt(x, y, z, n);
                    values[n] = f(x, y, z);
                    n += 1;
                }
            }
        }
        let q = Vec3::new(0.5, 0.4, 1.2);
        let v = trilinear_interpolate(&cell, &values, q, 0.0);
        assert!(close(v, f(q.x, q.y, q.z)), "got {v}");
    }

    #[test]
    fn projection_lands_on_plane() {
        let face = [
            pt(1.0, 0.0, 0.0, 0),
            pt(1.0, 0.0, 1.0, 1),
            pt(1.0, 1.0, 0.0, 2),
            pt(1.0, 1.0, 1.0, 3),
        ];
        let p = project_point_to_plane(&face, Vec3::new(0.3, 0.6, 0.7));
        assert!(close(p.x, 1.0) && close(p.y, 0.6) && close(p.z, 0.7), "got {p:?}");
    }

    #[test]
    fn from_points_rejects_odd_arity() {
        let p = pt(0.0, 0.0, 0.0, 0);
        assert_eq!(Interpolators::<f64>::from_points(&[]), Some(Interpolators::Outside));
        assert_eq!(Interpolators::from_points(&[p]), Some(Interpolators::Vertex(p)));
        assert_eq!(Interpolators::from_points(&[p, p, p]), None);
        assert_eq!(Interpolators::from_points(&[p; 9]), None);
    }

    #[test]
    fn vector_values_blend_componentwise() {
        let a = pt(0.0, 0.0, 0.0, 0);
        let b = pt(2.0, 0.0, 0.0, 1);
        let values = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, -2.0)];
        let v = linear_interpolate(&a, &b, &values, Vec3::new(0.5, 0.0, 0.0), Vec3::splat(0.0));
        assert!(close(v.x, 0.5) && close(v.y, 1.0) && close(v.z, -0.5), "got {v:?}");
    }
}
