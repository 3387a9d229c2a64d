// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rigview scene: FOV diagrams for sim-racing rigs.
//!
//! A scene shows the driver's field of view twice. The top half of the
//! canvas is the rig seen from above (horizontal FOV) and the bottom half is
//! the rig seen from the side (vertical FOV). Each view draws the FOV cone,
//! the screen panels and a marker for the driver's eye, followed by a label.
//! Optionally a car silhouette is composited behind everything.
//!
//! Rendering is immediate and stateless: [`render_scene`] clears the canvas
//! and paints every view from a [`SceneParameters`] value and a
//! [`RenderStyle`]. The car silhouette is the only step that may need to
//! wait on I/O, so it is returned as a [`CarCompositeRequest`] that the host
//! completes when the image is ready.
//!
//! ## Example
//!
//! ```
//! use rigview_canvas_ref::RecordingCanvas;
//! use rigview_geometry::ViewParameters;
//! use rigview_scene::{CarProfile, RenderStyle, SceneParameters, render_scene};
//!
//! let params = SceneParameters::for_rig(ViewParameters::triple(150.0, 70.0, 45.0), 40.0)
//!     .with_car(CarProfile::lookup("gt3").copied());
//!
//! let mut canvas = RecordingCanvas::new(1200.0, 800.0);
//! let request = render_scene(&mut canvas, &params, &RenderStyle::default());
//!
//! // No image is available here; the silhouette is left out.
//! let drawn = request.map(|r| r.complete(&mut canvas, Err(rigview_scene::CarImageError::Empty)));
//! assert_eq!(drawn, Some(false));
//! ```

mod car;
mod composite;
mod params;
mod readout;
mod scene;
mod style;
mod view;

pub use car::{CATALOG, CarDimensions, CarPlacement, CarProfile};
pub use composite::{
    CarBitmap, CarCompositeRequest, CarImageError, CarImageSource, DirectoryImageSource,
    composite_behind, fit_to_canvas,
};
pub use params::SceneParameters;
pub use readout::{Axis, GAME_PRESETS, GamePreset, INFINITE_FOV, format_fov};
pub use scene::render_scene;
pub use style::RenderStyle;
pub use view::{ViewSlot, render_view};
