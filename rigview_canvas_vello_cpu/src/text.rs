// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-line text outlining with Skrifa.

use kurbo::{BezPath, Point};
use skrifa::instance::{LocationRef, Size};
use skrifa::metrics::GlyphMetrics;
use skrifa::outline::OutlinePen;
use skrifa::{FontRef, MetadataProvider};

/// Pen that appends glyph outlines to a path, flipping Y and offsetting by
/// the pen position.
struct PathPen<'a> {
    path: &'a mut BezPath,
    origin: Point,
}

impl PathPen<'_> {
    fn map(&self, x: f32, y: f32) -> Point {
        Point::new(self.origin.x + f64::from(x), self.origin.y - f64::from(y))
    }
}

impl OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.path.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.path.line_to(p);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let p1 = self.map(x1, y1);
        let p = self.map(x, y);
        self.path.quad_to(p1, p);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let p1 = self.map(x1, y1);
        let p2 = self.map(x2, y2);
        let p = self.map(x, y);
        self.path.curve_to(p1, p2, p);
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

/// Outlines `text` laid out left to right with its baseline starting at
/// `origin`.
///
/// There is no shaping: characters map straight to glyphs through the
/// font's character map and advance by their horizontal metrics.
/// Characters without a glyph are skipped. Returns `None` when the font
/// cannot be parsed or nothing was drawn.
pub(crate) fn outline_text(font: &[u8], text: &str, origin: Point, size_px: f32) -> Option<BezPath> {
    let font_ref = FontRef::new(font).ok()?;
    let charmap = font_ref.charmap();
    let size = Size::new(size_px);
    let metrics = GlyphMetrics::new(&font_ref, size, LocationRef::default());
    let outlines = font_ref.outline_glyphs();

    let mut path = BezPath::new();
    let mut x = 0.0_f32;
    for gid in text.chars().filter_map(|ch| charmap.map(ch)) {
        if let Some(glyph) = outlines.get(gid) {
            let mut pen = PathPen {
                path: &mut path,
                origin: Point::new(origin.x + f64::from(x), origin.y),
            };
            // A glyph that fails to draw is left out of the run.
            let _ = glyph.draw(size, &mut pen);
        }
        x += metrics.advance_width(gid).unwrap_or(size_px * 0.6);
    }

    (!path.elements().is_empty()).then_some(path)
}
