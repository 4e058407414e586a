// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_field --heading-base-level=0

//! Understory Field: grid lookup and multilinear interpolation for sampled 3D fields.
//!
//! Understory Field answers "what value would this field have here (and now)?" for data
//! sampled on a 3D grid, optionally evolving over time.
//!
//! - Build a [`VolumetricGridLookupField`] from a cloud of grid-like sample positions.
//!   The grid may be non-uniform and sparse; coordinates are bucketed per axis with a tolerance.
//! - Query candidates with [`VolumetricGridLookupField::interpolators`]: 1, 2, 4 or 8 vertices
//!   depending on whether the point sits on a vertex, an edge, a face, or inside a cell.
//! - Estimate values by linear, bilinear or trilinear interpolation over a caller-owned values slice.
//! - Stack snapshots in time with [`TimeVaryingVolumetricGridLookupField`] and step a [`Session`]
//!   forward to get quadrilinear (space × time) estimates.
//! - Or let [`InMemoryTimeVaryingVolumetricGridFactory`] own the values and do all of the above.
//!
//! It is generic over the scalar type `T` (`f32` or `f64`) used for coordinates and time, and over
//! any value type that implements [`Lerp`] (plain scalars, [`Vec3`], or your own vector types).
//! It does not depend on any geometry crate.
//!
//! # Example
//!
//! ```rust
//! use understory_field::{Vec3, VolumetricGridLookupField};
//!
//! // The eight corners of the unit cube, with a value per corner.
//! let mut cloud = Vec::new();
//! let mut values: Vec<f64> = Vec::new();
//! for x in [0.0, 1.0] {
//!     for y in [0.0, 1.0] {
//!         for z in [0.0, 1.0] {
//!             cloud.push(Vec3::new(x, y, z));
//!             values.push(x + y + z);
//!         }
//!     }
//! }
//! let field = VolumetricGridLookupField::new(&cloud);
//!
//! // Inside the cube: eight candidates, trilinear estimate.
//! let centre = Vec3::new(0.5, 0.5, 0.5);
//! assert_eq!(field.interpolators(centre).len(), 8);
//! let v = field.estimate_trilinear(centre, &values, 0.0).unwrap();
//! assert!((v - 1.5).abs() < 1e-9);
//!
//! // Outside the cube: nothing.
//! assert_eq!(field.estimate_trilinear(Vec3::new(2.0, 0.5, 0.5), &values, 0.0), None);
//! ```
//!
//! Stepping through time with an in-memory grid:
//!
//! ```rust
//! use understory_field::{InMemoryTimeVaryingVolumetricGridFactory, Vec3};
//!
//! let mut factory = InMemoryTimeVaryingVolumetricGridFactory::new();
//! for t in [0.0_f64, 1.0] {
//!     for x in [0.0, 1.0] {
//!         for y in [0.0, 1.0] {
//!             for z in [0.0, 1.0] {
//!                 factory.add_point(t, Vec3::new(x, y, z), t);
//!             }
//!         }
//!     }
//! }
//! let grid = factory.build();
//!
//! let session = grid.create_session();
//! let session = grid.step_to(&session, 0.25).unwrap();
//! let v = grid.look_up(&session, Vec3::new(0.5, 0.5, 0.5), 0.0).unwrap();
//! assert!((v - 0.25).abs() < 1e-9);
//!
//! // Sessions only move forward in time.
//! assert!(grid.step_to(&session, 0.1).is_none());
//! ```
//!
//! ## Sparse grids
//!
//! Every combination of distinct x, y and z coordinates is a grid vertex, whether or not a sample
//! exists there. Vertices without a sample are reported with no row reference and contribute the
//! caller's default value to estimates. Samples that land on the same vertex replace earlier ones;
//! this is logged through the [`log`] facade and counted by
//! [`VolumetricGridLookupField::overwritten_cells`].
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for coordinates and times. Debug builds assert on degenerate geometry.
//!
//! ## Features
//!
//! - `std` (default): use the standard library for float math.
//! - `libm`: use `libm` for float math in `no_std` builds.

#![no_std]

extern crate alloc;

pub mod axis;
pub mod field;
pub mod in_memory;
pub mod interpolation;
pub mod time_varying;
pub mod types;

pub use axis::{AxisBracket, AxisIndex, AxisPoint};
pub use field::VolumetricGridLookupField;
pub use in_memory::{InMemoryTimeVaryingVolumetricGrid, InMemoryTimeVaryingVolumetricGridFactory};
pub use interpolation::{InterpolationPoint3D, Interpolators, Lerp};
pub use time_varying::{
    Session, SpaceTimeInterpolators, TimeSlice, TimeVaryingVolumetricGridLookupField,
};
pub use types::{Aabb3D, Scalar, Vec3};
