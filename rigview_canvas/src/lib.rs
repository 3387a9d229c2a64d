// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rigview Canvas: the drawing surface contract used by rigview renderers.
//!
//! This crate defines a small canvas-2D flavored operation set and the
//! [`Canvas`] trait that concrete surfaces implement. It sits between the
//! scene code, which only knows about views, screens and cars, and the
//! backends that either record operations or rasterize them.
//!
//! # Core concepts
//!
//! - **State operations** ([`StateOp`]): the save/restore stack, the
//!   current transform, fill and stroke styling, global alpha and the
//!   compositing mode. Semantics follow the HTML canvas: transforms
//!   post-multiply and `Restore` without a matching `Save` does nothing.
//! - **Draw operations** ([`DrawOp`]): clearing, filled and stroked paths,
//!   filled rectangles, text and images. Each draw uses the state in force
//!   at the time it is issued.
//! - **Images** ([`ImageId`]): opaque handles to pixel data installed with
//!   [`Canvas::create_image`].
//! - **State tracking** ([`StateStack`]): a reusable implementation of the
//!   state semantics that backends can embed.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Rect, Size, Vec2};
//! use peniko::Color;
//! use rigview_canvas::{
//!     Canvas, CanvasExt, DrawOp, ImageDesc, ImageId, StateOp, StateStack,
//! };
//!
//! // A canvas that only tracks state.
//! #[derive(Default)]
//! struct Probe {
//!     stack: StateStack,
//!     fills: usize,
//! }
//!
//! impl Canvas for Probe {
//!     fn size(&self) -> Size {
//!         Size::new(100.0, 100.0)
//!     }
//!     fn state(&mut self, op: StateOp) {
//!         self.stack.apply(&op);
//!     }
//!     fn draw(&mut self, _op: DrawOp) {
//!         self.fills += 1;
//!     }
//!     fn create_image(&mut self, _desc: ImageDesc, _pixels: &[u8]) -> ImageId {
//!         ImageId(0)
//!     }
//!     fn destroy_image(&mut self, _id: ImageId) {}
//! }
//!
//! let mut canvas = Probe::default();
//! canvas.with_saved(|c| {
//!     c.translate(Vec2::new(10.0, 20.0));
//!     c.state(StateOp::SetFillColor(Color::WHITE));
//!     c.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 5.0, 5.0)));
//! });
//! assert_eq!(canvas.stack.depth(), 0);
//! assert_eq!(canvas.fills, 1);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

use alloc::string::String;

use kurbo::{BezPath, Point, Rect, Size, Vec2};

pub use kurbo::{Affine, Stroke};
pub use peniko::{Color, ImageAlphaType, ImageFormat, ImageQuality, ImageSampler};

mod state;

pub use state::{DrawState, StateStack};

/// Identifier for an image resource.
///
/// Handles stay valid until passed to [`Canvas::destroy_image`].
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(pub u32);

/// Description of an image resource.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ImageDesc {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel format of the image buffer.
    pub format: ImageFormat,
    /// Alpha encoding of the pixels (straight vs premultiplied).
    pub alpha_type: ImageAlphaType,
}

impl ImageDesc {
    /// Straight-alpha RGBA8 image of the given size.
    #[must_use]
    pub const fn rgba8(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
        }
    }

    /// Image bounds in pixel coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// How new pixels combine with what is already on the surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Composite {
    /// New content is drawn over existing pixels.
    #[default]
    SourceOver,
    /// New content only shows where existing pixels are not opaque, as if
    /// drawn behind them.
    DestinationOver,
}

/// State operations that mutate the current drawing state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Push a copy of the current state.
    Save,
    /// Pop back to the most recently saved state.
    ///
    /// Does nothing when no state has been saved.
    Restore,
    /// Translate the current transform, in current user space.
    Translate {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
    },
    /// Rotate the current transform by the given angle in radians.
    ///
    /// Positive angles turn clockwise on a y-down surface.
    Rotate(f64),
    /// Replace the current transform with the identity.
    ResetTransform,
    /// Set the color used by fill operations.
    SetFillColor(Color),
    /// Set the color used by stroke operations.
    SetStrokeColor(Color),
    /// Set the stroke style, including width and dash pattern.
    SetStroke(Stroke),
    /// Set an opacity multiplier in `[0, 1]` applied to every draw.
    SetGlobalAlpha(f32),
    /// Set how subsequent draws combine with existing pixels.
    SetComposite(Composite),
}

/// Draw operations that produce pixels given the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Reset the pixels covered by the rectangle to transparent.
    ///
    /// The rectangle is in user space. Compositing and global alpha do not
    /// apply.
    ClearRect(Rect),
    /// Fill a path with the fill color (non-zero winding).
    FillPath(BezPath),
    /// Stroke a path with the stroke color and style.
    StrokePath(BezPath),
    /// Fill an axis-aligned rectangle with the fill color.
    FillRect(Rect),
    /// Fill a line of text with the fill color.
    FillText {
        /// Text to draw.
        text: String,
        /// Left end of the alphabetic baseline.
        origin: Point,
        /// Font size in user-space units.
        size: f32,
    },
    /// Draw an image scaled to fill `dst`.
    DrawImage {
        /// Image resource to draw.
        image: ImageId,
        /// Destination rectangle in user space.
        dst: Rect,
        /// Filtering and edge handling used when sampling the image.
        sampler: ImageSampler,
    },
}

/// A state or draw operation, as stored in recordings.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasOp {
    /// State-changing operation.
    State(StateOp),
    /// Drawing operation.
    Draw(DrawOp),
}

/// A drawing surface.
///
/// Implementations apply [`StateOp`]s to their current state and render
/// [`DrawOp`]s with the state in force when the draw is issued. The
/// provided methods are shorthands for common state operations.
pub trait Canvas {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);

    /// Create an image resource from tightly packed, row-major pixels.
    fn create_image(&mut self, desc: ImageDesc, pixels: &[u8]) -> ImageId;

    /// Destroy a previously created image.
    ///
    /// Destroying an unknown or already destroyed image does nothing.
    fn destroy_image(&mut self, id: ImageId);

    /// Equivalent to `self.state(StateOp::Save)`.
    #[inline]
    fn save(&mut self) {
        self.state(StateOp::Save);
    }

    /// Equivalent to `self.state(StateOp::Restore)`.
    #[inline]
    fn restore(&mut self) {
        self.state(StateOp::Restore);
    }

    /// Equivalent to `self.state(StateOp::Translate { .. })`.
    #[inline]
    fn translate(&mut self, offset: Vec2) {
        self.state(StateOp::Translate {
            dx: offset.x,
            dy: offset.y,
        });
    }

    /// Equivalent to `self.state(StateOp::Rotate(radians))`.
    #[inline]
    fn rotate(&mut self, radians: f64) {
        self.state(StateOp::Rotate(radians));
    }

    /// Clear the whole surface regardless of the current transform.
    fn clear(&mut self) {
        let bounds = self.size().to_rect();
        self.save();
        self.state(StateOp::ResetTransform);
        self.draw(DrawOp::ClearRect(bounds));
        self.restore();
    }
}

/// Convenience helpers for [`Canvas`] implementations and callers.
///
/// This is separate from [`Canvas`] so that `&mut dyn Canvas` stays usable.
pub trait CanvasExt: Canvas {
    /// Run `f` between a `Save` and the matching `Restore`.
    ///
    /// Note: if `f` panics, the state will not be restored.
    #[inline]
    fn with_saved<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.save();
        let out = f(self);
        self.restore();
        out
    }
}

impl<C: Canvas + ?Sized> CanvasExt for C {}
