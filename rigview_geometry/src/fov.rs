// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{BezPath, Point};

/// Half of the extent covered by a field of view at `distance`.
///
/// This is `distance * tan(fov / 2)`, with the angle given in degrees.
///
/// A field of view of 180° or more has no finite projection; in that case
/// this returns [`f64::INFINITY`] so callers can detect it with
/// [`f64::is_finite`]. NaN inputs propagate.
///
/// ```
/// use rigview_geometry::project_half_width;
///
/// let half = project_half_width(48.0, 70.0);
/// assert!((half - 31.166).abs() < 1e-3);
/// assert!(!project_half_width(180.0, 70.0).is_finite());
/// ```
#[must_use]
pub fn project_half_width(fov_degrees: f64, distance: f64) -> f64 {
    if fov_degrees >= 180.0 {
        return f64::INFINITY;
    }
    distance * (fov_degrees.to_radians() * 0.5).tan()
}

/// Full extent covered by a field of view at `distance`.
#[must_use]
pub fn screen_width(fov_degrees: f64, distance: f64) -> f64 {
    2.0 * project_half_width(fov_degrees, distance)
}

/// Triangular FOV wedge in a view's local frame.
///
/// The apex sits at the origin (the viewer's eye) and the cone opens
/// towards negative Y. `depth` is the distance to the far edge and
/// `half_width` is the projected half extent at that depth.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FovCone {
    /// Projected half extent at `depth`.
    pub half_width: f64,
    /// Distance from the apex to the far edge.
    pub depth: f64,
}

impl FovCone {
    /// Builds the cone for `fov_degrees`, stretched to `distance * exaggeration`.
    ///
    /// The exaggeration only lengthens the drawn wedge; the opening angle is
    /// unchanged. Returns `None` when the projection is not finite, which is
    /// the case for fields of view of 180° or more.
    #[must_use]
    pub fn new(fov_degrees: f64, distance: f64, exaggeration: f64) -> Option<Self> {
        let depth = distance * exaggeration;
        let half_width = project_half_width(fov_degrees, depth);
        (half_width.is_finite() && depth.is_finite()).then_some(Self { half_width, depth })
    }

    /// Far-left corner of the wedge.
    #[must_use]
    pub fn left_edge(&self) -> Point {
        Point::new(-self.half_width, -self.depth)
    }

    /// Far-right corner of the wedge.
    #[must_use]
    pub fn right_edge(&self) -> Point {
        Point::new(self.half_width, -self.depth)
    }

    /// Closed triangle covering the cone.
    #[must_use]
    pub fn wedge(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(Point::ORIGIN);
        path.line_to(self.left_edge());
        path.line_to(self.right_edge());
        path.close_path();
        path
    }

    /// The two boundary rays, each as an open subpath starting at the apex.
    #[must_use]
    pub fn rays(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(Point::ORIGIN);
        path.line_to(self.left_edge());
        path.move_to(Point::ORIGIN);
        path.line_to(self.right_edge());
        path
    }

    /// Scale that brings both far corners within `reach` of the apex on
    /// each axis, capped at 1.
    fn scale_within(&self, reach: f64) -> f64 {
        (reach.max(0.0) / self.half_width.max(self.depth)).min(1.0)
    }

    /// Like [`Self::wedge`], clipped to `reach` units from the apex along
    /// each axis.
    ///
    /// The opening angle is preserved. When the rays leave the clip box
    /// through its sides, the far edge follows the box so the area ahead
    /// of the viewer stays covered.
    #[must_use]
    pub fn wedge_within(&self, reach: f64) -> BezPath {
        let s = self.scale_within(reach);
        let far = self.depth.min(reach.max(0.0));
        let exit = Point::new(-self.half_width * s, -self.depth * s);

        let mut path = BezPath::new();
        path.move_to(Point::ORIGIN);
        path.line_to(exit);
        if far - exit.y.abs() > far * 1e-12 {
            path.line_to((exit.x, -far));
            path.line_to((-exit.x, -far));
        }
        path.line_to((-exit.x, exit.y));
        path.close_path();
        path
    }

    /// Like [`Self::rays`], with each ray ending where it leaves the clip
    /// box of [`Self::wedge_within`].
    #[must_use]
    pub fn rays_within(&self, reach: f64) -> BezPath {
        let s = self.scale_within(reach);
        let exit = Point::new(-self.half_width * s, -self.depth * s);

        let mut path = BezPath::new();
        path.move_to(Point::ORIGIN);
        path.line_to(exit);
        path.move_to(Point::ORIGIN);
        path.line_to((-exit.x, exit.y));
        path
    }
}
