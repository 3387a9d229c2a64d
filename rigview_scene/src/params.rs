// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use rigview_geometry::ViewParameters;

use crate::car::CarProfile;

/// Everything needed to render one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SceneParameters {
    /// Plan view seen from above.
    pub horizontal: ViewParameters,
    /// Side view.
    pub vertical: ViewParameters,
    /// Car drawn around the viewer, if any.
    pub car: Option<CarProfile>,
    /// Pixels per length unit before the car's own scale is applied.
    pub unit_scale: f64,
}

impl SceneParameters {
    /// Creates a scene from two independent views, without a car.
    #[must_use]
    pub const fn new(horizontal: ViewParameters, vertical: ViewParameters) -> Self {
        Self {
            horizontal,
            vertical,
            car: None,
            unit_scale: 1.0,
        }
    }

    /// Creates a scene for a rig described by its horizontal view.
    ///
    /// The side view always shows a single flat screen at the same
    /// distance, spanning `vertical_fov_degrees`.
    #[must_use]
    pub fn for_rig(horizontal: ViewParameters, vertical_fov_degrees: f64) -> Self {
        let vertical = ViewParameters::single(vertical_fov_degrees, horizontal.distance);
        Self::new(horizontal, vertical)
    }

    /// Returns a copy with the given car.
    #[must_use]
    pub fn with_car(mut self, car: Option<CarProfile>) -> Self {
        self.car = car;
        self
    }

    /// Returns a copy with the given unit scale.
    #[must_use]
    pub fn with_unit_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    /// Pixels per length unit for view geometry.
    #[must_use]
    pub fn pixels_per_unit(&self) -> f64 {
        match &self.car {
            Some(car) => self.unit_scale * car.scale,
            None => self.unit_scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigview_geometry::ScreenCount;

    #[test]
    fn rig_side_view_is_single_and_flat() {
        let h = ViewParameters::triple(150.0, 70.0, 45.0).with_curve_radius(Some(800.0));
        let scene = SceneParameters::for_rig(h, 40.0);
        assert_eq!(scene.vertical.screens, ScreenCount::Single);
        assert_eq!(scene.vertical.curve_radius(), None);
        assert_eq!(scene.vertical.distance, 70.0);
        assert_eq!(scene.vertical.fov_degrees, 40.0);
        assert_eq!(scene.horizontal, h);
    }

    #[test]
    fn car_scale_multiplies_unit_scale() {
        let view = ViewParameters::single(48.0, 70.0);
        let scene = SceneParameters::new(view, view).with_unit_scale(2.0);
        assert_eq!(scene.pixels_per_unit(), 2.0);

        let scene = scene.with_car(CarProfile::lookup("drift").copied());
        assert_eq!(scene.pixels_per_unit(), 3.5);
    }
}
