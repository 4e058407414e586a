// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_field::{
    InMemoryTimeVaryingVolumetricGrid, InMemoryTimeVaryingVolumetricGridFactory, Vec3,
};

fn gen_grid(n: usize, steps: usize) -> InMemoryTimeVaryingVolumetricGrid<f64, f64> {
    let mut factory = InMemoryTimeVaryingVolumetricGridFactory::new();
    for s in 0..steps {
        let t = s as f64;
        for x in 0..n {
            for y in 0..n {
                for z in 0..n {
                    let p = Vec3::new(x as f64, y as f64, z as f64);
                    factory.add_point(t, p, p.x + p.y + p.z + t);
                }
            }
        }
    }
    factory.build()
}

fn bench_stepping(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_stepping");
    let steps = 64;
    let grid = gen_grid(8, steps);
    let ticks = 4096;
    let dt = (steps - 1) as f64 / ticks as f64;
    let probe = Vec3::new(3.3, 4.1, 2.7);
    group.throughput(Throughput::Elements(ticks as u64));

    group.bench_function("step_and_look_up", |b| {
        b.iter(|| {
            let mut session = grid.create_session();
            let mut acc = 0.0;
            for i in 0..ticks {
                if let Some(next) = grid.step_to(&session, i as f64 * dt) {
                    session = next;
                }
                acc += grid.look_up(&session, probe, 0.0).unwrap_or(0.0);
            }
            black_box(acc)
        })
    });

    group.bench_function("seek_and_look_up", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..ticks {
                let session = grid.create_session_at(i as f64 * dt);
                acc += grid.look_up(&session, probe, 0.0).unwrap_or(0.0);
            }
            black_box(acc)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_stepping);
criterion_main!(benches);
