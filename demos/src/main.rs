// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a rigview FOV diagram to a PNG file.
//!
//! Examples:
//!   `cargo run -p rigview_demos -- --fov 48 --vfov 30 --distance 70`
//!   `cargo run -p rigview_demos -- --screens 3 --fov 150 --angle 45 --car gt3 --assets web`
//!   `cargo run -p rigview_demos -- --radius 100 --font /usr/share/fonts/TTF/DejaVuSans.ttf`

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use png::{BitDepth, ColorType, Encoder};
use rigview_canvas_vello_cpu::VelloCpuCanvas;
use rigview_geometry::{ScreenCount, ViewParameters};
use rigview_scene::{
    Axis, CarProfile, DirectoryImageSource, GamePreset, RenderStyle, SceneParameters, format_fov,
    render_scene,
};

#[derive(Parser, Debug)]
#[command(name = "rigview", about = "Draw horizontal and vertical FOV diagrams for a sim-racing rig")]
struct Cli {
    /// Horizontal field of view in degrees.
    #[arg(long, default_value_t = 48.0)]
    fov: f64,

    /// Vertical field of view in degrees.
    #[arg(long, default_value_t = 30.0)]
    vfov: f64,

    /// Eye-to-screen distance in centimetres.
    #[arg(long, default_value_t = 70.0)]
    distance: f64,

    /// Number of screens (1 or 3).
    #[arg(long, default_value_t = 1)]
    screens: u8,

    /// Side screen angle in degrees, for triple screens.
    #[arg(long, default_value_t = 0.0)]
    angle: f64,

    /// Screen curvature radius in centimetres; omit for flat screens.
    #[arg(long)]
    radius: Option<f64>,

    /// Car silhouette to draw around the driver (drift, gt3, f1).
    #[arg(long)]
    car: Option<String>,

    /// Directory that car image references are resolved against.
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Font used for the view labels; labels are left out without one.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Pixels per centimetre before the car scale is applied.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Output width in pixels.
    #[arg(long, default_value_t = 1200)]
    width: u16,

    /// Output height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u16,

    /// Draw the car bounding boxes.
    #[arg(long)]
    debug: bool,

    /// Output file.
    #[arg(long, default_value = "rigview.png")]
    out: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let horizontal = match ScreenCount::try_from(cli.screens)? {
        ScreenCount::Single => ViewParameters::single(cli.fov, cli.distance),
        ScreenCount::Triple => ViewParameters::triple(cli.fov, cli.distance, cli.angle),
    }
    .with_curve_radius(cli.radius);

    let car = match cli.car.as_deref() {
        Some(id) => Some(
            *CarProfile::lookup(id).ok_or_else(|| format!("unknown car '{id}'"))?,
        ),
        None => None,
    };
    let params = SceneParameters::for_rig(horizontal, cli.vfov)
        .with_car(car)
        .with_unit_scale(cli.scale);
    let style = RenderStyle::default().with_debug(cli.debug);

    let mut canvas = VelloCpuCanvas::new(cli.width, cli.height);
    if let Some(path) = &cli.font {
        canvas = canvas.with_font(std::fs::read(path)?);
    }

    if let Some(request) = render_scene(&mut canvas, &params, &style) {
        let reference = request.reference();
        let source = DirectoryImageSource::new(&cli.assets);
        if !request.resolve(&mut canvas, &source) {
            tracing::warn!(
                reference,
                assets = %cli.assets.display(),
                "car silhouette not drawn"
            );
        }
    }

    for (axis, fov) in [(Axis::Horizontal, cli.fov), (Axis::Vertical, cli.vfov)] {
        tracing::info!(?axis, fov = %format_fov(fov, 0), "field of view");
        for game in GamePreset::for_axis(axis) {
            tracing::info!(game = game.name, setting = %game.format(fov), "game setting");
        }
    }

    let data = canvas.to_rgba8();
    let file = File::create(&cli.out)?;
    let mut encoder = Encoder::new(file, u32::from(cli.width), u32::from(cli.height));
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&data)?;

    tracing::info!(path = %cli.out.display(), "wrote diagram");
    Ok(())
}
