// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use rigview_canvas::{Canvas, CanvasExt, DrawOp, StateOp};

use crate::car::CarPlacement;
use crate::composite::CarCompositeRequest;
use crate::params::SceneParameters;
use crate::style::RenderStyle;
use crate::view::{ViewSlot, render_view};

/// Viewer positions used when no car is shown.
fn default_anchors(canvas: Size) -> (Point, Point) {
    (
        Point::new(canvas.width * 0.75, canvas.height * 0.25),
        Point::new(canvas.width * 0.75, canvas.height * 0.75),
    )
}

/// Clears `canvas` and repaints the full scene.
///
/// The horizontal view occupies the top half of the canvas and the vertical
/// view the bottom half. When a car is set, both viewers are anchored to
/// the car's eye points and the returned request carries the silhouette,
/// which has to be composited separately once its image is available.
pub fn render_scene<C: Canvas + ?Sized>(
    canvas: &mut C,
    params: &SceneParameters,
    style: &RenderStyle,
) -> Option<CarCompositeRequest> {
    canvas.clear();

    let size = canvas.size();
    let placement = params.car.as_ref().map(|car| CarPlacement::new(car, size));
    let (horizontal, vertical) = match &placement {
        Some(p) => (p.horizontal_anchor(), p.vertical_anchor()),
        None => default_anchors(size),
    };

    let scale = params.pixels_per_unit();
    render_view(
        canvas,
        &ViewSlot::horizontal(horizontal),
        &params.horizontal,
        scale,
        style,
    );
    render_view(
        canvas,
        &ViewSlot::vertical(vertical, size),
        &params.vertical,
        scale,
        style,
    );

    if style.debug
        && let Some(p) = &placement
    {
        canvas.with_saved(|c| {
            c.state(StateOp::SetFillColor(style.debug_color));
            c.draw(DrawOp::FillRect(p.plan_box()));
            c.draw(DrawOp::FillRect(p.elevation_box()));
        });
    }

    params.car.as_ref().map(|car| {
        tracing::debug!(car = car.id, image = car.image, "car silhouette pending");
        CarCompositeRequest::new(car.image, style.car_opacity)
    })
}
