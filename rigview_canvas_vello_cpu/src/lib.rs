// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vello CPU–backed implementation of the rigview canvas.
//!
//! [`VelloCpuCanvas`] owns a sparse-strips [`vello_cpu::RenderContext`] and
//! translates [`Canvas`] operations into it:
//!
//! - Transforms and styles are tracked with [`StateStack`] and applied
//!   to the context right before each draw.
//! - [`Composite::DestinationOver`] draws are wrapped in a
//!   `Compose::DestOver` layer, so they land behind everything drawn so far.
//! - Global alpha multiplies solid colors, and becomes the layer opacity
//!   for images.
//! - Clearing the whole surface under the identity transform resets the
//!   context. Smaller clears punch out the area with a `Compose::DestOut`
//!   layer.
//! - Text is outlined with Skrifa using the font installed with
//!   [`VelloCpuCanvas::with_font`]. Without a font, text draws are skipped.
//!
//! Pixels are read back with [`VelloCpuCanvas::render_to_pixmap`] or
//! [`VelloCpuCanvas::to_rgba8`]. Both render the full command stream
//! recorded since the last full clear, so content added later (such as a
//! car image composited behind) shows up on the next readback.

#![no_std]

extern crate alloc;

mod text;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use kurbo::{Affine, BezPath, Cap, Join, PathEl, Rect, Size};
use peniko::{Blob, Color, ImageData, ImageSampler};
use peniko::{BlendMode, Compose, Mix};
use rigview_canvas::{
    Canvas, Composite, DrawOp, DrawState, ImageDesc, ImageId, StateOp, StateStack,
};
use vello_cpu::kurbo::{
    Affine as CpuAffine, BezPath as CpuBezPath, Cap as CpuCap, Join as CpuJoin, Rect as CpuRect,
    Stroke as CpuStroke,
};
use vello_cpu::{Image as CpuImage, ImageSource, Pixmap, RenderContext, RenderMode, RenderSettings};

/// Image draws with a source or destination extent below this are skipped.
const MIN_EXTENT: f64 = 1e-6;

/// CPU-backed canvas using `vello_cpu`.
pub struct VelloCpuCanvas {
    ctx: RenderContext,
    width: u16,
    height: u16,
    images: Vec<Option<(ImageDesc, Blob<u8>)>>,
    stack: StateStack,
    font: Option<Arc<[u8]>>,
}

impl fmt::Debug for VelloCpuCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VelloCpuCanvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("has_font", &self.font.is_some())
            .finish_non_exhaustive()
    }
}

impl VelloCpuCanvas {
    /// Creates a transparent canvas of the given size in pixels.
    pub fn new(width: u16, height: u16) -> Self {
        let settings = RenderSettings {
            // Stick to the u8 pipeline so readback is stable across feature sets.
            render_mode: RenderMode::OptimizeSpeed,
            ..RenderSettings::default()
        };
        Self {
            ctx: RenderContext::new_with(width, height, settings),
            width,
            height,
            images: Vec::new(),
            stack: StateStack::new(),
            font: None,
        }
    }

    /// Installs the font used for [`DrawOp::FillText`].
    ///
    /// The bytes must hold a TrueType or OpenType font. A font Skrifa cannot
    /// parse behaves as if no font was installed.
    #[must_use]
    pub fn with_font(mut self, font: impl Into<Arc<[u8]>>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Surface width in pixels.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Renders the current content into a new pixmap.
    pub fn render_to_pixmap(&mut self) -> Pixmap {
        let mut pixmap = Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap
    }

    /// Renders the current content as tightly packed, straight-alpha RGBA8.
    pub fn to_rgba8(&mut self) -> Vec<u8> {
        let unpremul = self.render_to_pixmap().take_unpremultiplied();
        let mut bytes = Vec::with_capacity(unpremul.len() * 4);
        for p in unpremul {
            bytes.extend_from_slice(&[p.r, p.g, p.b, p.a]);
        }
        bytes
    }

    fn affine_to_cpu(xf: Affine) -> CpuAffine {
        CpuAffine::new(xf.as_coeffs())
    }

    fn rect_to_cpu(rect: Rect) -> CpuRect {
        CpuRect::new(rect.x0, rect.y0, rect.x1, rect.y1)
    }

    fn path_to_cpu(path: &BezPath) -> CpuBezPath {
        let mut out = CpuBezPath::new();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => out.move_to((p.x, p.y)),
                PathEl::LineTo(p) => out.line_to((p.x, p.y)),
                PathEl::QuadTo(p1, p) => out.quad_to((p1.x, p1.y), (p.x, p.y)),
                PathEl::CurveTo(p1, p2, p) => out.curve_to((p1.x, p1.y), (p2.x, p2.y), (p.x, p.y)),
                PathEl::ClosePath => out.close_path(),
            }
        }
        out
    }

    fn stroke_to_cpu(style: &kurbo::Stroke) -> CpuStroke {
        let mut stroke = CpuStroke::new(style.width);
        stroke.miter_limit = style.miter_limit;
        stroke.join = match style.join {
            Join::Bevel => CpuJoin::Bevel,
            Join::Miter => CpuJoin::Miter,
            Join::Round => CpuJoin::Round,
        };
        stroke.start_cap = match style.start_cap {
            Cap::Butt => CpuCap::Butt,
            Cap::Round => CpuCap::Round,
            Cap::Square => CpuCap::Square,
        };
        stroke.end_cap = match style.end_cap {
            Cap::Butt => CpuCap::Butt,
            Cap::Round => CpuCap::Round,
            Cap::Square => CpuCap::Square,
        };
        if style.dash_pattern.is_empty() {
            stroke
        } else {
            stroke.with_dashes(style.dash_offset, style.dash_pattern.iter().copied())
        }
    }

    /// Runs `f` inside a layer that applies the state's compositing mode and,
    /// when given, an opacity.
    fn with_composite(
        ctx: &mut RenderContext,
        composite: Composite,
        opacity: Option<f32>,
        f: impl FnOnce(&mut RenderContext),
    ) {
        let blend = match composite {
            Composite::SourceOver => None,
            Composite::DestinationOver => Some(BlendMode::new(Mix::Normal, Compose::DestOver)),
        };
        if blend.is_none() && opacity.is_none() {
            f(ctx);
            return;
        }
        ctx.push_layer(None, blend, opacity, None, None);
        f(ctx);
        ctx.pop_layer();
    }

    fn fill_with(&mut self, state: &DrawState, color: Color, f: impl FnOnce(&mut RenderContext)) {
        self.ctx.set_transform(Self::affine_to_cpu(state.transform));
        self.ctx.set_paint(color);
        Self::with_composite(&mut self.ctx, state.composite, None, f);
    }

    fn clear_rect(&mut self, rect: Rect, transform: Affine) {
        let full = Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height));
        if transform == Affine::IDENTITY && rect.contains_rect(full) {
            self.ctx.reset();
            return;
        }
        self.ctx.set_transform(Self::affine_to_cpu(transform));
        self.ctx.set_paint(Color::BLACK);
        self.ctx.push_layer(
            None,
            Some(BlendMode::new(Mix::Normal, Compose::DestOut)),
            None,
            None,
            None,
        );
        self.ctx.fill_rect(&Self::rect_to_cpu(rect));
        self.ctx.pop_layer();
    }

    fn draw_image(
        &mut self,
        state: &DrawState,
        image: ImageId,
        dst: Rect,
        sampler: ImageSampler,
    ) {
        let Some(Some((desc, data))) = self.images.get(image.0 as usize) else {
            return;
        };
        let src = desc.bounds();
        if dst.width().abs() < MIN_EXTENT
            || dst.height().abs() < MIN_EXTENT
            || src.width() < MIN_EXTENT
            || src.height() < MIN_EXTENT
        {
            return;
        }

        let image_data = ImageData {
            data: data.clone(),
            format: desc.format,
            alpha_type: desc.alpha_type,
            width: desc.width,
            height: desc.height,
        };
        let paint = CpuImage {
            image: ImageSource::from_peniko_image_data(&image_data),
            sampler,
        };
        let local = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / src.width(), dst.height() / src.height());
        let opacity = (state.global_alpha < 1.0).then_some(state.global_alpha);
        let bounds = Self::rect_to_cpu(src);

        self.ctx.set_transform(Self::affine_to_cpu(state.transform * local));
        self.ctx.set_paint(paint);
        Self::with_composite(&mut self.ctx, state.composite, opacity, |ctx| {
            ctx.fill_rect(&bounds);
        });
    }
}

impl Canvas for VelloCpuCanvas {
    fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    fn state(&mut self, op: StateOp) {
        self.stack.apply(&op);
    }

    fn draw(&mut self, op: DrawOp) {
        let state = self.stack.current().clone();
        match op {
            DrawOp::ClearRect(rect) => self.clear_rect(rect, state.transform),
            DrawOp::FillPath(path) => {
                let path = Self::path_to_cpu(&path);
                self.fill_with(&state, state.effective_fill(), |ctx| ctx.fill_path(&path));
            }
            DrawOp::StrokePath(path) => {
                let path = Self::path_to_cpu(&path);
                self.ctx.set_stroke(Self::stroke_to_cpu(&state.stroke));
                self.fill_with(&state, state.effective_stroke(), |ctx| {
                    ctx.stroke_path(&path);
                });
            }
            DrawOp::FillRect(rect) => {
                let rect = Self::rect_to_cpu(rect);
                self.fill_with(&state, state.effective_fill(), |ctx| ctx.fill_rect(&rect));
            }
            DrawOp::FillText { text, origin, size } => {
                let Some(font) = self.font.clone() else {
                    return;
                };
                if let Some(outline) = text::outline_text(&font, &text, origin, size) {
                    let path = Self::path_to_cpu(&outline);
                    self.fill_with(&state, state.effective_fill(), |ctx| ctx.fill_path(&path));
                }
            }
            DrawOp::DrawImage {
                image,
                dst,
                sampler,
            } => self.draw_image(&state, image, dst, sampler),
        }
    }

    fn create_image(&mut self, desc: ImageDesc, pixels: &[u8]) -> ImageId {
        let id = u32::try_from(self.images.len())
            .expect("VelloCpuCanvas: too many images for u32 ImageId");
        self.images.push(Some((desc, Blob::from(pixels.to_vec()))));
        ImageId(id)
    }

    fn destroy_image(&mut self, id: ImageId) {
        let idx = id.0 as usize;
        if let Some(slot) = self.images.get_mut(idx) {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigview_canvas::{CanvasExt, ImageQuality};

    fn pixel(bytes: &[u8], width: u16, x: usize, y: usize) -> [u8; 4] {
        let i = (y * usize::from(width) + x) * 4;
        [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]
    }

    fn red() -> Color {
        Color::from_rgba8(255, 0, 0, 255)
    }

    fn blue() -> Color {
        Color::from_rgba8(0, 0, 255, 255)
    }

    #[test]
    fn fill_rect_paints_under_transform() {
        let mut canvas = VelloCpuCanvas::new(16, 16);
        canvas.with_saved(|c| {
            c.translate(kurbo::Vec2::new(8.0, 0.0));
            c.state(StateOp::SetFillColor(red()));
            c.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 8.0, 8.0)));
        });

        let bytes = canvas.to_rgba8();
        assert_eq!(bytes.len(), 16 * 16 * 4);
        assert_eq!(pixel(&bytes, 16, 12, 4), [255, 0, 0, 255]);
        assert_eq!(pixel(&bytes, 16, 4, 4)[3], 0, "left half stays empty");
    }

    #[test]
    fn destination_over_lands_behind_existing_pixels() {
        let mut canvas = VelloCpuCanvas::new(16, 16);
        canvas.state(StateOp::SetFillColor(red()));
        canvas.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 8.0, 16.0)));

        canvas.state(StateOp::SetComposite(Composite::DestinationOver));
        canvas.state(StateOp::SetFillColor(blue()));
        canvas.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 16.0, 16.0)));

        let bytes = canvas.to_rgba8();
        assert_eq!(pixel(&bytes, 16, 4, 8), [255, 0, 0, 255], "red stays on top");
        assert_eq!(pixel(&bytes, 16, 12, 8), [0, 0, 255, 255], "blue fills the gap");
    }

    #[test]
    fn full_clear_erases_everything() {
        let mut canvas = VelloCpuCanvas::new(8, 8);
        canvas.state(StateOp::SetFillColor(red()));
        canvas.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 8.0, 8.0)));
        canvas.clear();

        let bytes = canvas.to_rgba8();
        assert!(bytes.iter().all(|b| *b == 0), "canvas should be transparent");
    }

    #[test]
    fn partial_clear_only_touches_its_rect() {
        let mut canvas = VelloCpuCanvas::new(16, 16);
        canvas.state(StateOp::SetFillColor(red()));
        canvas.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 16.0, 16.0)));
        canvas.draw(DrawOp::ClearRect(Rect::new(0.0, 0.0, 8.0, 16.0)));

        let bytes = canvas.to_rgba8();
        assert_eq!(pixel(&bytes, 16, 4, 8)[3], 0);
        assert_eq!(pixel(&bytes, 16, 12, 8), [255, 0, 0, 255]);
    }

    fn nearest() -> ImageSampler {
        ImageSampler::default().with_quality(ImageQuality::Low)
    }

    #[test]
    fn image_is_scaled_into_destination() {
        let mut canvas = VelloCpuCanvas::new(16, 16);
        let green = [0_u8, 255, 0, 255];
        let pixels: Vec<u8> = green.iter().copied().cycle().take(2 * 2 * 4).collect();
        let image = canvas.create_image(ImageDesc::rgba8(2, 2), &pixels);
        canvas.draw(DrawOp::DrawImage {
            image,
            dst: Rect::new(4.0, 4.0, 12.0, 12.0),
            sampler: nearest(),
        });

        let bytes = canvas.to_rgba8();
        assert_eq!(pixel(&bytes, 16, 8, 8), [0, 255, 0, 255]);
        assert_eq!(pixel(&bytes, 16, 1, 1)[3], 0);
    }

    #[test]
    fn nearest_upscale_keeps_opaque_pixels_opaque() {
        let mut canvas = VelloCpuCanvas::new(16, 16);
        let image = canvas.create_image(ImageDesc::rgba8(1, 1), &[0, 255, 0, 255]);
        canvas.draw(DrawOp::DrawImage {
            image,
            dst: Rect::new(0.0, 0.0, 16.0, 16.0),
            sampler: nearest(),
        });

        let bytes = canvas.to_rgba8();
        for (x, y) in [(0, 0), (7, 9), (15, 15)] {
            assert_eq!(pixel(&bytes, 16, x, y), [0, 255, 0, 255], "at ({x}, {y})");
        }
    }

    #[test]
    fn destroyed_images_are_skipped() {
        let mut canvas = VelloCpuCanvas::new(4, 4);
        let image = canvas.create_image(ImageDesc::rgba8(1, 1), &[255, 255, 255, 255]);
        canvas.destroy_image(image);
        canvas.destroy_image(image);
        canvas.draw(DrawOp::DrawImage {
            image,
            dst: Rect::new(0.0, 0.0, 4.0, 4.0),
            sampler: ImageSampler::default(),
        });
        assert!(canvas.to_rgba8().iter().all(|b| *b == 0));
    }

    #[test]
    fn text_without_font_is_skipped() {
        let mut canvas = VelloCpuCanvas::new(8, 8);
        canvas.state(StateOp::SetFillColor(Color::WHITE));
        canvas.draw(DrawOp::FillText {
            text: "FOV".into(),
            origin: kurbo::Point::new(0.0, 8.0),
            size: 8.0,
        });
        assert!(canvas.to_rgba8().iter().all(|b| *b == 0));
    }

    #[test]
    fn text_with_font_paints_glyphs() {
        let font: &[u8] = include_bytes!("../../assets/fonts/dejavu/DejaVuSans.ttf");
        let mut canvas = VelloCpuCanvas::new(32, 32).with_font(font);
        canvas.state(StateOp::SetFillColor(Color::WHITE));
        canvas.draw(DrawOp::FillText {
            text: "I".into(),
            origin: kurbo::Point::new(4.0, 28.0),
            size: 28.0,
        });

        let bytes = canvas.to_rgba8();
        let covered = bytes.chunks_exact(4).filter(|p| p[3] == 255).count();
        assert!(covered > 20, "only {covered} opaque pixels");
        assert_eq!(pixel(&bytes, 32, 31, 2)[3], 0, "right of the glyph stays empty");
    }

    #[test]
    fn global_alpha_scales_solid_fills() {
        let mut canvas = VelloCpuCanvas::new(4, 4);
        canvas.state(StateOp::SetGlobalAlpha(0.5));
        canvas.state(StateOp::SetFillColor(red()));
        canvas.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 4.0, 4.0)));

        let [r, _, _, a] = pixel(&canvas.to_rgba8(), 4, 2, 2);
        assert!((i32::from(a) - 128).abs() <= 2, "alpha {a}");
        assert!(r >= 250, "unpremultiplied red {r}");
    }
}
