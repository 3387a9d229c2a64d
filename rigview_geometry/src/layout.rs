// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Affine, Point, Vec2};

use crate::fov::screen_width;
use crate::params::{ScreenCount, ViewParameters};
use crate::segment::{ScreenSegment, screen_segment};

/// One display surface placed in a view's local frame.
///
/// The segment is expressed in the panel's own frame, which is obtained
/// from the view frame by translating to `pivot` and then rotating by
/// `rotation` radians. The center panel uses the identity frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScreenPanel {
    /// Origin of the panel frame in view coordinates.
    pub pivot: Point,
    /// Rotation of the panel frame, in radians.
    pub rotation: f64,
    /// The panel's shape in its own frame.
    pub segment: ScreenSegment,
}

impl ScreenPanel {
    /// Maps panel-frame coordinates to view coordinates.
    #[must_use]
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pivot.to_vec2()) * Affine::rotate(self.rotation)
    }

    /// Panel endpoints expressed in view coordinates.
    #[must_use]
    pub fn endpoints_in_view(&self) -> (Point, Point) {
        let xf = self.transform();
        let (a, b) = self.segment.endpoints();
        (xf * a, xf * b)
    }
}

/// Panel placement for a [`ViewParameters`] value.
///
/// A single screen spans the whole field of view. A triple setup splits
/// the field of view into three equal angular thirds: the center panel
/// covers the middle third and each side panel has the same width, hinged
/// at the center panel's outer edge and turned by the side angle (negative
/// on the left, positive on the right).
///
/// When the panel width is not finite (a field of view of 180° or more)
/// the layout is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenLayout {
    panel_width: f64,
    panels: Vec<ScreenPanel>,
}

impl ScreenLayout {
    /// Computes the layout in the view's local frame, where the viewer sits
    /// at the origin and looks towards negative Y.
    #[must_use]
    pub fn new(view: &ViewParameters) -> Self {
        let distance = view.distance;
        let radius = view.curve_radius();
        let (panel_fov, count) = match view.screens {
            ScreenCount::Single => (view.fov_degrees, 1),
            ScreenCount::Triple => (view.fov_degrees / 3.0, 3),
        };
        let panel_width = screen_width(panel_fov, distance);
        if !panel_width.is_finite() {
            return Self {
                panel_width,
                panels: Vec::new(),
            };
        }

        let mut panels = Vec::with_capacity(count);
        panels.push(ScreenPanel {
            pivot: Point::ORIGIN,
            rotation: 0.0,
            segment: screen_segment(Point::new(0.0, -distance), panel_width, radius),
        });

        if view.screens == ScreenCount::Triple {
            let half = panel_width * 0.5;
            let side = view.side_angle_degrees.to_radians();
            for sign in [-1.0, 1.0] {
                panels.push(ScreenPanel {
                    pivot: Point::new(sign * half, -distance),
                    rotation: sign * side,
                    segment: screen_segment(Point::new(sign * half, 0.0), panel_width, radius),
                });
            }
        }

        Self {
            panel_width,
            panels,
        }
    }

    /// Width of each panel; not finite when the layout is empty.
    #[must_use]
    pub fn panel_width(&self) -> f64 {
        self.panel_width
    }

    /// Panels in drawing order: center, then left, then right.
    #[must_use]
    pub fn panels(&self) -> &[ScreenPanel] {
        &self.panels
    }

    /// Returns `true` when no panel could be placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Offset from the viewer to the center panel's midpoint.
    #[must_use]
    pub fn center_offset(&self) -> Option<Vec2> {
        self.panels
            .first()
            .map(|panel| panel.segment.midpoint().to_vec2())
    }
}
