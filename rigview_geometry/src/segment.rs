// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::FRAC_PI_2;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Arc, BezPath, Line, Point, Shape, Vec2};

/// Drawable shape of a single display surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScreenSegment {
    /// Straight panel.
    Flat(Line),
    /// Panel curved along a circular arc.
    ///
    /// The arc's center lies `radius` units behind the panel's nominal
    /// center (towards positive Y), so the panel ends curve towards the
    /// viewer.
    Curved(Arc),
}

/// Builds the segment for a panel of `width` centered on `center`.
///
/// When `curve_radius` is present and strictly greater than half the width,
/// the result is an arc of that radius whose midpoint is `center` and whose
/// chord is `width` long. Any other radius, including `Some(0.0)`, yields a
/// flat panel.
///
/// ```
/// use kurbo::Point;
/// use rigview_geometry::{ScreenSegment, screen_segment};
///
/// let flat = screen_segment(Point::new(0.0, -70.0), 60.0, Some(20.0));
/// assert!(matches!(flat, ScreenSegment::Flat(_)));
///
/// let curved = screen_segment(Point::new(0.0, -70.0), 60.0, Some(100.0));
/// assert!(matches!(curved, ScreenSegment::Curved(_)));
/// ```
#[must_use]
pub fn screen_segment(center: Point, width: f64, curve_radius: Option<f64>) -> ScreenSegment {
    let half = width * 0.5;
    match curve_radius {
        Some(radius) if radius > half => {
            let theta = (half / radius).clamp(-1.0, 1.0).asin();
            ScreenSegment::Curved(Arc {
                center: Point::new(center.x, center.y + radius),
                radii: Vec2::new(radius, radius),
                start_angle: -FRAC_PI_2 - theta,
                sweep_angle: 2.0 * theta,
                x_rotation: 0.0,
            })
        }
        _ => ScreenSegment::Flat(Line::new(
            (center.x - half, center.y),
            (center.x + half, center.y),
        )),
    }
}

impl ScreenSegment {
    /// First and last point of the panel, left to right.
    #[must_use]
    pub fn endpoints(&self) -> (Point, Point) {
        match self {
            Self::Flat(line) => (line.p0, line.p1),
            Self::Curved(arc) => {
                let end_angle = arc.start_angle + arc.sweep_angle;
                (
                    arc.center + Vec2::from_angle(arc.start_angle) * arc.radii.x,
                    arc.center + Vec2::from_angle(end_angle) * arc.radii.x,
                )
            }
        }
    }

    /// Point halfway along the panel.
    #[must_use]
    pub fn midpoint(&self) -> Point {
        match self {
            Self::Flat(line) => line.p0.midpoint(line.p1),
            Self::Curved(arc) => Point::new(arc.center.x, arc.center.y - arc.radii.y),
        }
    }

    /// Straight-line distance between the endpoints.
    #[must_use]
    pub fn chord_length(&self) -> f64 {
        let (a, b) = self.endpoints();
        a.distance(b)
    }

    /// Half of the angle subtended by a curved panel, or zero when flat.
    #[must_use]
    pub fn half_angle(&self) -> f64 {
        match self {
            Self::Flat(_) => 0.0,
            Self::Curved(arc) => arc.sweep_angle * 0.5,
        }
    }

    /// Converts the panel to a stroke-ready path.
    #[must_use]
    pub fn to_path(&self, tolerance: f64) -> BezPath {
        match self {
            Self::Flat(line) => line.to_path(tolerance),
            Self::Curved(arc) => arc.to_path(tolerance),
        }
    }
}
