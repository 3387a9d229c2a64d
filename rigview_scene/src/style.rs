// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Size, Stroke, Vec2};
use peniko::Color;

/// Colors, line widths and sizes used when drawing a scene.
///
/// A style is an immutable value handed to every render call. The
/// [`Default`] style draws a yellow viewer and yellow screens over a
/// translucent green FOV cone with dashed green edges.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    /// Fill color of the viewer marker.
    pub viewer_color: Color,
    /// Radius of the viewer marker in pixels.
    pub viewer_radius: f64,
    /// Stroke color of the screens.
    pub screen_color: Color,
    /// Stroke width of the screens in pixels.
    pub screen_thickness: f64,
    /// Fill color of the FOV wedge.
    pub fov_fill: Color,
    /// Stroke color of the FOV edges.
    pub fov_line_color: Color,
    /// Stroke width of the FOV edges in pixels.
    pub fov_line_thickness: f64,
    /// Dash pattern of the FOV edges; empty for solid lines.
    pub fov_dash: Vec<f64>,
    /// How much longer than the screen distance the FOV wedge is drawn.
    pub fov_multiplier: f64,
    /// Label font size in pixels.
    pub font_size: f32,
    /// Fill color behind labels.
    pub label_background: Color,
    /// Label text color.
    pub label_text: Color,
    /// Size of the label background box.
    pub label_box: Size,
    /// Offset from the box's top-left corner to the text baseline origin.
    pub label_inset: Vec2,
    /// Height of the separator line drawn across the canvas at the top of
    /// each label box.
    pub separator_thickness: f64,
    /// Opacity of the car silhouette in `[0, 1]`.
    pub car_opacity: f32,
    /// Draw the car bounding boxes over the scene.
    pub debug: bool,
    /// Fill color of the debug boxes.
    pub debug_color: Color,
    /// Accuracy used when flattening arcs and circles to paths.
    pub tolerance: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            viewer_color: Color::from_rgb8(255, 255, 0),
            viewer_radius: 20.0,
            screen_color: Color::from_rgb8(255, 255, 0),
            screen_thickness: 10.0,
            fov_fill: Color::from_rgb8(0, 255, 0).with_alpha(0.15),
            fov_line_color: Color::from_rgb8(0, 255, 0),
            fov_line_thickness: 3.0,
            fov_dash: vec![5.0, 5.0],
            fov_multiplier: 10.0,
            font_size: 22.0,
            label_background: Color::BLACK.with_alpha(0.75),
            label_text: Color::WHITE,
            label_box: Size::new(170.0, 45.0),
            label_inset: Vec2::new(10.0, 30.0),
            separator_thickness: 2.0,
            car_opacity: 1.0,
            debug: false,
            debug_color: Color::from_rgb8(255, 0, 0).with_alpha(0.15),
            tolerance: 0.1,
        }
    }
}

impl RenderStyle {
    /// Stroke used for the FOV edges.
    #[must_use]
    pub fn fov_stroke(&self) -> Stroke {
        let stroke = Stroke::new(self.fov_line_thickness);
        if self.fov_dash.is_empty() {
            stroke
        } else {
            stroke.with_dashes(0.0, self.fov_dash.iter().copied())
        }
    }

    /// Stroke used for the screens.
    #[must_use]
    pub fn screen_stroke(&self) -> Stroke {
        Stroke::new(self.screen_thickness)
    }

    /// Returns a copy with the debug overlay switched on or off.
    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fov_edges_are_dashed() {
        let stroke = RenderStyle::default().fov_stroke();
        assert_eq!(stroke.width, 3.0);
        assert_eq!(stroke.dash_pattern.as_slice(), &[5.0, 5.0]);
    }

    #[test]
    fn empty_dash_means_solid() {
        let style = RenderStyle {
            fov_dash: Vec::new(),
            ..RenderStyle::default()
        };
        assert!(style.fov_stroke().dash_pattern.is_empty());
    }

    #[test]
    fn screens_use_plain_stroke() {
        let stroke = RenderStyle::default().screen_stroke();
        assert_eq!(stroke.width, 10.0);
        assert!(stroke.dash_pattern.is_empty());
    }
}
