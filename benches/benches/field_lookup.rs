// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_field::{Vec3, VolumetricGridLookupField};

fn gen_grid_points(n: usize, stride: Vec3<f64>) -> Vec<Vec3<f64>> {
    let mut out = Vec::with_capacity(n * n * n);
    for x in 0..n {
        for y in 0..n {
            for z in 0..n {
                out.push(Vec3::new(
                    x as f64 * stride.x,
                    y as f64 * stride.y,
                    z as f64 * stride.z,
                ));
            }
        }
    }
    out
}

// Every other vertex along x is dropped.
fn gen_sparse_grid_points(n: usize) -> Vec<Vec3<f64>> {
    gen_grid_points(n, Vec3::new(1.0, 5.0, 10.0))
        .into_iter()
        .enumerate()
        .filter(|(i, _)| (i / (n * n)) % 2 == 0 || i % 2 == 0)
        .map(|(_, p)| p)
        .collect()
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_queries(count: usize, extent: Vec3<f64>) -> Vec<Vec3<f64>> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            Vec3::new(
                rng.next_f64() * extent.x,
                rng.next_f64() * extent.y,
                rng.next_f64() * extent.z,
            )
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[16usize, 32, 48] {
        let cloud = gen_grid_points(n, Vec3::new(1.0, 5.0, 10.0));
        group.throughput(Throughput::Elements((n * n * n) as u64));
        group.bench_function(format!("dense_n{}", n), |b| {
            b.iter_batched(
                || cloud.clone(),
                |cloud| black_box(VolumetricGridLookupField::new(&cloud)),
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_interpolators(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolators");
    for &n in &[16usize, 32, 48] {
        let stride = Vec3::new(1.0, 5.0, 10.0);
        let field = VolumetricGridLookupField::new(&gen_grid_points(n, stride));
        let extent = stride * (n - 1) as f64;
        let queries = gen_queries(4096, extent);
        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("random_n{}", n), |b| {
            b.iter(|| {
                let mut total = 0;
                for q in &queries {
                    total += field.interpolators(*q).len();
                }
                black_box(total)
            })
        });
    }
    group.finish();
}

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate_trilinear");
    let n = 32;
    let stride = Vec3::new(1.0, 5.0, 10.0);
    let extent = stride * (n - 1) as f64;
    let queries = gen_queries(4096, extent);

    let dense = gen_grid_points(n, stride);
    let dense_values: Vec<f64> = dense.iter().map(|p| p.x - p.y + 0.5 * p.z).collect();
    let dense_field = VolumetricGridLookupField::new(&dense);
    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("dense_n32", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for q in &queries {
                acc += dense_field.estimate_trilinear(*q, &dense_values, 0.0).unwrap_or(0.0);
            }
            black_box(acc)
        })
    });

    let sparse = gen_sparse_grid_points(n);
    let sparse_values: Vec<f64> = sparse.iter().map(|p| p.x - p.y + 0.5 * p.z).collect();
    let sparse_field = VolumetricGridLookupField::new(&sparse);
    group.bench_function("sparse_n32", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for q in &queries {
                acc += sparse_field.estimate_trilinear(*q, &sparse_values, 0.0).unwrap_or(0.0);
            }
            black_box(acc)
        })
    });

    let vector_values: Vec<Vec3<f64>> = dense.iter().map(|p| Vec3::new(p.y, -p.x, 1.0)).collect();
    group.bench_function("dense_vec3_n32", |b| {
        b.iter(|| {
            let mut acc = Vec3::splat(0.0);
            for q in &queries {
                if let Some(v) =
                    dense_field.estimate_trilinear(*q, &vector_values, Vec3::splat(0.0))
                {
                    acc = acc + v;
                }
            }
            black_box(acc)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_interpolators, bench_estimate);
criterion_main!(benches);
