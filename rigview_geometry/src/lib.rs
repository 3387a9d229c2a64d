// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rigview Geometry: the math behind FOV diagrams of sim-racing rigs.
//!
//! This crate computes, in a view's local frame, everything a renderer needs
//! to draw one field-of-view diagram:
//! - The projected half extent of a field of view at a given distance
//!   ([`project_half_width`]).
//! - The FOV wedge and its boundary rays ([`FovCone`]).
//! - Flat or curved display surfaces ([`screen_segment`]).
//! - Single and triple screen arrangements ([`ScreenLayout`]).
//!
//! The local frame places the viewer's eye at the origin looking towards
//! negative Y, matching a y-down canvas. Renderers translate and rotate that
//! frame onto their own drawing surface.
//!
//! ## Example
//!
//! ```rust
//! use rigview_geometry::{FovCone, ViewParameters};
//!
//! // Three 27" panels at 70 cm with the sides angled in by 30°.
//! let view = ViewParameters::triple(60.0, 70.0, 30.0);
//! let layout = view.screen_layout();
//! assert_eq!(layout.panels().len(), 3);
//!
//! // The cone is drawn ten times longer than the screen distance.
//! let cone = FovCone::new(view.fov_degrees, view.distance, 10.0).unwrap();
//! assert_eq!(cone.depth, 700.0);
//! ```
//!
//! ## Degenerate input
//!
//! Nothing here returns errors. A field of view of 180° or more has no
//! finite projection: [`project_half_width`] returns infinity,
//! [`FovCone::new`] returns `None` and [`ScreenLayout`] is empty. A curve
//! radius that does not exceed half the panel width produces a flat panel.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod fov;
mod layout;
mod params;
mod segment;

pub use fov::{FovCone, project_half_width, screen_width};
pub use layout::{ScreenLayout, ScreenPanel};
pub use params::{InvalidScreenCount, ScreenCount, ViewParameters};
pub use segment::{ScreenSegment, screen_segment};
