// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use paramesh::geometry::{
    sample_grid, BaseBox, BaseCylinder, BoxConfig, BoxModulations, Circle, CylinderConfig,
    Ellipse, GaussModulation, ImplicitSphere, LocalFrame, SineWaveModulation,
};

fn bench_box(c: &mut Criterion) {
    let mut group = c.benchmark_group("box");
    let gauss = GaussModulation::default();

    for subdiv in [10, 50, 100] {
        let config = BoxConfig {
            subdiv_u: subdiv,
            subdiv_v: subdiv,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new("gauss", subdiv), &config, |b, config| {
            b.iter(|| {
                BaseBox::new(black_box(*config))
                    .construct(&BoxModulations::uniform(&gauss))
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_cylinder(c: &mut Criterion) {
    let mut group = c.benchmark_group("cylinder");

    for voxel_size in [1.0, 0.5, 0.25] {
        let mut cylinder = BaseCylinder::new(
            LocalFrame::world(),
            Circle::new(10.0),
            Ellipse::new(20.0, 10.0, 0.0),
            20.0,
        )
        .with_config(CylinderConfig { voxel_size })
        .unwrap();
        cylinder
            .set_surface_modulation(SineWaveModulation::new(30, 2), 1.0)
            .unwrap();

        group.bench_with_input(
            BenchmarkId::new("loft", voxel_size),
            &cylinder,
            |b, cylinder| {
                b.iter(|| black_box(cylinder).construct());
            },
        );
    }

    group.finish();
}

fn bench_implicit(c: &mut Criterion) {
    let mut group = c.benchmark_group("implicit");
    let sphere = ImplicitSphere::new(10.0);

    group.bench_function("sphere_sample", |b| {
        b.iter(|| sample_grid(&sphere, black_box(0.5)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_box, bench_cylinder, bench_implicit);
criterion_main!(benches);
