// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::FRAC_PI_2;

use kurbo::{Circle, Point, Rect, Shape, Size};
use rigview_canvas::{Affine, Canvas, CanvasExt, DrawOp, StateOp};
use rigview_geometry::{FovCone, ScreenLayout, ViewParameters};

use crate::style::RenderStyle;

/// Where and how a view is placed on the canvas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewSlot<'a> {
    /// Caption drawn in the label box.
    pub label: &'a str,
    /// Text origin of the label in canvas coordinates.
    pub label_origin: Point,
    /// Viewer position in canvas coordinates.
    pub anchor: Point,
    /// Rotation of the view frame in radians.
    pub rotation: f64,
}

impl ViewSlot<'static> {
    /// Slot for the plan view in the top half of the canvas.
    #[must_use]
    pub fn horizontal(anchor: Point) -> Self {
        Self {
            label: "Horizontal FOV",
            label_origin: Point::new(10.0, 30.0),
            anchor,
            rotation: -FRAC_PI_2,
        }
    }

    /// Slot for the side view in the bottom half of the canvas.
    #[must_use]
    pub fn vertical(anchor: Point, canvas: Size) -> Self {
        Self {
            label: "Vertical FOV",
            label_origin: Point::new(10.0, canvas.height / 2.0 + 30.0),
            anchor,
            rotation: -FRAC_PI_2,
        }
    }
}

/// Draws one view: FOV cone, screens, viewer marker, then its label.
///
/// `view` lengths are multiplied by `pixels_per_unit`. Everything except
/// the label is drawn in the view frame, which is translated to the slot's
/// anchor and rotated by its rotation; the frame is popped before the
/// label is drawn so the canvas state is unchanged on return.
pub fn render_view<C: Canvas + ?Sized>(
    canvas: &mut C,
    slot: &ViewSlot<'_>,
    view: &ViewParameters,
    pixels_per_unit: f64,
    style: &RenderStyle,
) {
    let view = view.scaled(pixels_per_unit);
    let layout = view.screen_layout();
    let reach = farthest_corner(slot.anchor, canvas.size());
    tracing::trace!(
        label = slot.label,
        fov = view.fov_degrees,
        panels = layout.panels().len(),
        "rendering view"
    );

    canvas.with_saved(|c| {
        c.translate(slot.anchor.to_vec2());
        c.rotate(slot.rotation);
        draw_cone(c, &view, reach, style);
        draw_screens(c, &layout, style);
        draw_viewer(c, style);
    });
    draw_label(canvas, slot, style);
}

/// Distance from `anchor` to the farthest canvas corner.
///
/// Nothing drawn in a view frame beyond this distance can land on the
/// canvas.
fn farthest_corner(anchor: Point, canvas: Size) -> f64 {
    [
        Point::ZERO,
        Point::new(canvas.width, 0.0),
        Point::new(0.0, canvas.height),
        Point::new(canvas.width, canvas.height),
    ]
    .into_iter()
    .map(|corner| anchor.distance(corner))
    .fold(0.0, f64::max)
}

fn draw_cone<C: Canvas + ?Sized>(
    canvas: &mut C,
    view: &ViewParameters,
    reach: f64,
    style: &RenderStyle,
) {
    let Some(cone) = FovCone::new(view.fov_degrees, view.distance, style.fov_multiplier) else {
        tracing::trace!(fov = view.fov_degrees, "FOV cone not finite; skipped");
        return;
    };
    // Unclipped, rays near 180° run millions of pixels past the canvas.
    canvas.state(StateOp::SetFillColor(style.fov_fill));
    canvas.draw(DrawOp::FillPath(cone.wedge_within(reach)));
    canvas.state(StateOp::SetStrokeColor(style.fov_line_color));
    canvas.state(StateOp::SetStroke(style.fov_stroke()));
    canvas.draw(DrawOp::StrokePath(cone.rays_within(reach)));
}

fn draw_screens<C: Canvas + ?Sized>(canvas: &mut C, layout: &ScreenLayout, style: &RenderStyle) {
    canvas.state(StateOp::SetStrokeColor(style.screen_color));
    canvas.state(StateOp::SetStroke(style.screen_stroke()));
    for panel in layout.panels() {
        let path = panel.segment.to_path(style.tolerance);
        if panel.transform() == Affine::IDENTITY {
            canvas.draw(DrawOp::StrokePath(path));
        } else {
            canvas.with_saved(|c| {
                c.translate(panel.pivot.to_vec2());
                c.rotate(panel.rotation);
                c.draw(DrawOp::StrokePath(path));
            });
        }
    }
}

fn draw_viewer<C: Canvas + ?Sized>(canvas: &mut C, style: &RenderStyle) {
    let marker = Circle::new(Point::ORIGIN, style.viewer_radius);
    canvas.state(StateOp::SetFillColor(style.viewer_color));
    canvas.draw(DrawOp::FillPath(marker.to_path(style.tolerance)));
}

fn draw_label<C: Canvas + ?Sized>(canvas: &mut C, slot: &ViewSlot<'_>, style: &RenderStyle) {
    let width = canvas.size().width;
    let corner = slot.label_origin - style.label_inset;
    canvas.with_saved(|c| {
        c.state(StateOp::SetFillColor(style.label_background));
        c.draw(DrawOp::FillRect(Rect::from_origin_size(corner, style.label_box)));
        c.draw(DrawOp::FillRect(Rect::from_origin_size(
            corner,
            (width, style.separator_thickness),
        )));
        c.state(StateOp::SetFillColor(style.label_text));
        c.draw(DrawOp::FillText {
            text: slot.label.into(),
            origin: slot.label_origin,
            size: style.font_size,
        });
    });
}
