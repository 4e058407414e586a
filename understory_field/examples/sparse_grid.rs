// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidates and estimates on a sparse, non-uniform grid.

use understory_field::{Vec3, VolumetricGridLookupField};

fn main() {
    // A 3x2x2 grid with one vertex missing.
    let mut cloud = Vec::new();
    for x in [0.0, 1.0, 3.0] {
        for y in [0.0, 1.0] {
            for z in [0.0, 1.0] {
                if (x, y, z) != (3.0, 1.0, 1.0) {
                    cloud.push(Vec3::new(x, y, z));
                }
            }
        }
    }
    let values: Vec<f64> = cloud.iter().map(|p| p.x * 10.0 + p.y).collect();
    let field = VolumetricGridLookupField::new(&cloud);

    println!("dimensions: {:?}", field.dimensions());
    println!("populated: {}", field.populated_cells());
    println!("bounds: {:?}", field.bounds());

    for p in [
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(0.5, 0.0, 0.0),
        Vec3::new(0.5, 0.5, 0.0),
        Vec3::new(2.0, 0.5, 0.5),
        Vec3::new(4.0, 0.5, 0.5),
    ] {
        let interp = field.interpolators(p);
        let holes = interp.iter().filter(|c| c.index.is_none()).count();
        println!(
            "{p:?}: {} candidates ({holes} holes) -> {:?}",
            interp.len(),
            field.estimate_trilinear_with(&interp, p, &values, 0.0)
        );
    }
}
