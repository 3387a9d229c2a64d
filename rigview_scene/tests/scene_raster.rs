// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel probes through the Vello CPU canvas.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use kurbo::{Point, Size, Vec2};
use png::{BitDepth, ColorType, Encoder};
use rigview_canvas_vello_cpu::VelloCpuCanvas;
use rigview_geometry::ViewParameters;
use rigview_scene::{
    CarBitmap, CarImageError, CarPlacement, CarProfile, DirectoryImageSource, RenderStyle,
    SceneParameters, render_scene,
};

const WIDTH: u16 = 400;
const HEIGHT: u16 = 300;

fn pixel(bytes: &[u8], at: Point) -> [u8; 4] {
    let x = at.x.round() as usize;
    let y = at.y.round() as usize;
    let idx = (y * usize::from(WIDTH) + x) * 4;
    [bytes[idx], bytes[idx + 1], bytes[idx + 2], bytes[idx + 3]]
}

fn f1_scene() -> SceneParameters {
    SceneParameters::for_rig(ViewParameters::single(60.0, 60.0), 40.0)
        .with_car(CarProfile::lookup("f1").copied())
}

/// Viewer position in the plan view and a spot just behind it that the
/// scene leaves empty.
fn probes() -> (Point, Point) {
    let car = CarProfile::lookup("f1").expect("f1");
    let placement = CarPlacement::new(car, Size::new(f64::from(WIDTH), f64::from(HEIGHT)));
    let eye = placement.horizontal_anchor();
    (eye, eye + Vec2::new(40.0, 0.0))
}

/// Top-right corner, which no view draws into.
fn empty_corner() -> Point {
    Point::new(f64::from(WIDTH) - 5.0, 5.0)
}

fn solid_blue(width: u32, height: u32) -> CarBitmap {
    let pixels = [0, 0, 255, 255].repeat(width as usize * height as usize);
    CarBitmap::from_rgba8(width, height, pixels).expect("bitmap")
}

#[test]
fn scene_paints_viewer_and_leaves_background_clear() {
    let mut canvas = VelloCpuCanvas::new(WIDTH, HEIGHT);
    let _ = render_scene(&mut canvas, &f1_scene(), &RenderStyle::default());
    let bytes = canvas.to_rgba8();

    let (eye, behind) = probes();
    assert_eq!(pixel(&bytes, eye), [255, 255, 0, 255]);
    assert_eq!(pixel(&bytes, behind)[3], 0);
}

#[test]
fn late_silhouette_lands_behind_existing_pixels() {
    let mut canvas = VelloCpuCanvas::new(WIDTH, HEIGHT);
    let request =
        render_scene(&mut canvas, &f1_scene(), &RenderStyle::default()).expect("car request");
    // Read back once before the image arrives.
    let _ = canvas.to_rgba8();

    assert!(request.complete(&mut canvas, Ok(solid_blue(4, 3))));
    let bytes = canvas.to_rgba8();

    let (eye, behind) = probes();
    assert_eq!(pixel(&bytes, eye), [255, 255, 0, 255], "viewer stays on top");
    assert_eq!(pixel(&bytes, behind), [0, 0, 255, 255], "silhouette fills gaps");
}

#[test]
fn car_opacity_applies_to_silhouette() {
    let style = RenderStyle {
        car_opacity: 0.5,
        ..RenderStyle::default()
    };
    let mut canvas = VelloCpuCanvas::new(WIDTH, HEIGHT);
    let request = render_scene(&mut canvas, &f1_scene(), &style).expect("car request");
    assert!(request.complete(&mut canvas, Ok(solid_blue(4, 3))));

    let (_, behind) = probes();
    let [_, _, b, a] = pixel(&canvas.to_rgba8(), behind);
    assert!((i32::from(a) - 128).abs() <= 2, "alpha {a}");
    assert!(b >= 250, "blue {b}");
}

#[test]
fn missing_image_leaves_scene_untouched() {
    let mut canvas = VelloCpuCanvas::new(WIDTH, HEIGHT);
    let request =
        render_scene(&mut canvas, &f1_scene(), &RenderStyle::default()).expect("car request");
    let before = canvas.to_rgba8();

    let source = DirectoryImageSource::new("/nonexistent-rigview-assets");
    assert!(!request.clone().resolve(&mut canvas, &source));
    assert!(!request.complete(&mut canvas, Err(CarImageError::Empty)));
    assert_eq!(canvas.to_rgba8(), before);
}

#[test]
fn directory_source_feeds_the_composite() {
    let root: PathBuf =
        std::env::temp_dir().join(format!("rigview-scene-raster-{}", std::process::id()));
    fs::create_dir_all(root.join("img")).expect("create asset dir");

    let file = fs::File::create(root.join("img/f1.png")).expect("create png");
    let mut encoder = Encoder::new(file, 4, 3);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header().expect("png header");
    writer
        .write_image_data(solid_blue(4, 3).pixels())
        .expect("png data");
    drop(writer);

    let mut canvas = VelloCpuCanvas::new(WIDTH, HEIGHT);
    let request =
        render_scene(&mut canvas, &f1_scene(), &RenderStyle::default()).expect("car request");
    let drawn = request.resolve(&mut canvas, &DirectoryImageSource::new(&root));
    let _ = fs::remove_dir_all(&root);
    assert!(drawn);

    let (_, behind) = probes();
    assert_eq!(pixel(&canvas.to_rgba8(), behind), [0, 0, 255, 255]);
}

#[test]
fn repaint_discards_previous_silhouette() {
    let mut canvas = VelloCpuCanvas::new(WIDTH, HEIGHT);
    let request =
        render_scene(&mut canvas, &f1_scene(), &RenderStyle::default()).expect("car request");
    assert!(request.complete(&mut canvas, Ok(solid_blue(4, 3))));
    assert_eq!(pixel(&canvas.to_rgba8(), empty_corner()), [0, 0, 255, 255]);

    // A new frame without a car clears the old silhouette.
    let plain = SceneParameters::for_rig(ViewParameters::single(60.0, 60.0), 40.0);
    assert!(render_scene(&mut canvas, &plain, &RenderStyle::default()).is_none());
    let repainted = canvas.to_rgba8();
    assert_eq!(pixel(&repainted, empty_corner())[3], 0);

    let mut fresh = VelloCpuCanvas::new(WIDTH, HEIGHT);
    let _ = render_scene(&mut fresh, &plain, &RenderStyle::default());
    assert!(repainted == fresh.to_rgba8(), "repaint matches a fresh render");
}

#[test]
fn stale_request_composites_behind_newer_scene() {
    let mut canvas = VelloCpuCanvas::new(WIDTH, HEIGHT);
    let stale =
        render_scene(&mut canvas, &f1_scene(), &RenderStyle::default()).expect("car request");

    let newer = SceneParameters::for_rig(ViewParameters::single(90.0, 50.0), 40.0)
        .with_car(CarProfile::lookup("f1").copied());
    let _ = render_scene(&mut canvas, &newer, &RenderStyle::default());
    let before = canvas.to_rgba8();
    assert_eq!(pixel(&before, empty_corner())[3], 0);

    assert!(stale.complete(&mut canvas, Ok(solid_blue(4, 3))));
    let bytes = canvas.to_rgba8();
    let (eye, _) = probes();
    assert_eq!(pixel(&bytes, eye), [255, 255, 0, 255], "newer viewer stays on top");
    assert_eq!(
        pixel(&bytes, empty_corner()),
        [0, 0, 255, 255],
        "silhouette fills gaps"
    );
}

#[test]
fn near_straight_fov_renders_promptly() {
    let params = SceneParameters::for_rig(ViewParameters::single(179.9999, 70.0), 179.9999);
    let mut canvas = VelloCpuCanvas::new(WIDTH, HEIGHT);
    let started = Instant::now();
    assert!(render_scene(&mut canvas, &params, &RenderStyle::default()).is_none());
    let bytes = canvas.to_rgba8();
    let elapsed = started.elapsed();

    // Default anchor of the plan view.
    let eye = Point::new(f64::from(WIDTH) * 0.75, f64::from(HEIGHT) * 0.25);
    assert_eq!(pixel(&bytes, eye), [255, 255, 0, 255]);
    assert!(elapsed < Duration::from_secs(10), "took {elapsed:?}");
}
