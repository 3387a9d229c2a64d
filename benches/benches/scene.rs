// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rigview_canvas_ref::RecordingCanvas;
use rigview_canvas_vello_cpu::VelloCpuCanvas;
use rigview_geometry::ViewParameters;
use rigview_scene::{CarProfile, RenderStyle, SceneParameters, render_scene};

fn params() -> SceneParameters {
    let horizontal = ViewParameters::triple(150.0, 70.0, 45.0).with_curve_radius(Some(180.0));
    SceneParameters::for_rig(horizontal, 40.0).with_car(CarProfile::lookup("gt3").copied())
}

fn bench_recording(c: &mut Criterion) {
    let params = params();
    let style = RenderStyle::default();
    c.bench_function("scene/record", |b| {
        b.iter_batched(
            || RecordingCanvas::new(1200.0, 800.0),
            |mut canvas| {
                let request = render_scene(&mut canvas, black_box(&params), &style);
                (canvas, request)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_raster(c: &mut Criterion) {
    let params = params();
    let style = RenderStyle::default();
    let mut canvas = VelloCpuCanvas::new(1200, 800);
    c.bench_function("scene/vello_cpu_1200x800", |b| {
        b.iter(|| {
            let _ = render_scene(&mut canvas, black_box(&params), &style);
            canvas.to_rgba8()
        });
    });
}

criterion_group!(benches, bench_recording, bench_raster);
criterion_main!(benches);
