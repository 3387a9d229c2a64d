// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Point;
use rigview_geometry::{FovCone, ViewParameters, screen_segment};

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/layout");
    let views = [
        ("single_flat", ViewParameters::single(48.0, 70.0)),
        ("triple_flat", ViewParameters::triple(150.0, 70.0, 45.0)),
        (
            "triple_curved",
            ViewParameters::triple(150.0, 70.0, 45.0).with_curve_radius(Some(180.0)),
        ),
    ];
    for (name, view) in views {
        group.bench_function(BenchmarkId::from_parameter(name), |b| {
            b.iter(|| black_box(black_box(&view).screen_layout()));
        });
    }
    group.finish();
}

fn bench_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry/paths");
    group.bench_function("cone", |b| {
        b.iter(|| {
            let cone = FovCone::new(black_box(120.0), black_box(70.0), 10.0);
            cone.map(|cone| (cone.wedge(), cone.rays()))
        });
    });
    for tolerance in [1.0, 0.1, 0.01] {
        group.bench_function(BenchmarkId::new("arc", tolerance), |b| {
            let segment = screen_segment(Point::new(0.0, -70.0), 60.0, Some(100.0));
            b.iter(|| black_box(&segment).to_path(tolerance));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_layout, bench_paths);
criterion_main!(benches);
