// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sample a drifting temperature field along a probe path, the way a simulated sensor would.

use understory_field::{InMemoryTimeVaryingVolumetricGridFactory, Vec3};

fn temperature(t: f64, p: Vec3<f64>) -> f64 {
    15.0 + 2.0 * p.x - 0.5 * p.z + 0.1 * t
}

fn main() {
    let mut factory = InMemoryTimeVaryingVolumetricGridFactory::new();
    for step in 0..=4 {
        let t = f64::from(step) * 10.0;
        for x in [0.0, 1.0, 2.5, 4.0] {
            for y in [0.0, 2.0] {
                for z in [0.0, 5.0, 10.0] {
                    let p = Vec3::new(x, y, z);
                    factory.add_point(t, p, temperature(t, p));
                }
            }
        }
    }
    let grid = factory.build();

    // Probe moves diagonally while time advances; the session only steps forward.
    let mut session = grid.create_session();
    for i in 0..=8 {
        let s = f64::from(i) / 8.0;
        let t = 40.0 * s;
        let p = Vec3::new(4.0 * s, 1.0, 10.0 * s);
        session = grid.step_to(&session, t).expect("probe time is monotonic");
        match grid.look_up(&session, p, f64::NAN) {
            Some(v) => println!("t={t:5.1} p=({:.2}, {:.2}, {:.2}) -> {v:.3}", p.x, p.y, p.z),
            None => println!("t={t:5.1} p=({:.2}, {:.2}, {:.2}) -> outside", p.x, p.y, p.z),
        }
    }

    // Outside the sampled volume there is no estimate.
    println!("outside: {:?}", grid.look_up(&session, Vec3::new(5.0, 1.0, 1.0), f64::NAN));
}
