// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::layout::ScreenLayout;

/// Number of display surfaces in a setup.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScreenCount {
    /// One panel spanning the whole field of view.
    #[default]
    Single,
    /// A center panel with two angled side panels.
    Triple,
}

impl ScreenCount {
    /// Number of panels.
    #[must_use]
    pub const fn count(self) -> u8 {
        match self {
            Self::Single => 1,
            Self::Triple => 3,
        }
    }
}

/// Error returned when converting an unsupported panel count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidScreenCount(pub u8);

impl fmt::Display for InvalidScreenCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported screen count {} (expected 1 or 3)", self.0)
    }
}

impl core::error::Error for InvalidScreenCount {}

impl TryFrom<u8> for ScreenCount {
    type Error = InvalidScreenCount;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Single),
            3 => Ok(Self::Triple),
            other => Err(InvalidScreenCount(other)),
        }
    }
}

/// Inputs for one FOV view (horizontal or vertical).
///
/// Values are plain data supplied by whatever layer reads user input.
/// Angles are in degrees; `distance` and `curve_radius` share one length
/// unit, which [`ViewParameters::scaled`] converts into drawing units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewParameters {
    /// Field of view in degrees, expected in `(0, 180)`.
    pub fov_degrees: f64,
    /// Eye-to-screen distance, expected to be positive.
    pub distance: f64,
    /// Panel arrangement.
    pub screens: ScreenCount,
    /// Toe-in angle of the side panels in degrees; only used for
    /// [`ScreenCount::Triple`].
    pub side_angle_degrees: f64,
    /// Radius of a curved panel. `None` or a non-positive value means flat.
    pub curve_radius: Option<f64>,
}

impl ViewParameters {
    /// A single flat panel.
    #[must_use]
    pub const fn single(fov_degrees: f64, distance: f64) -> Self {
        Self {
            fov_degrees,
            distance,
            screens: ScreenCount::Single,
            side_angle_degrees: 0.0,
            curve_radius: None,
        }
    }

    /// Three flat panels with the side panels angled by `side_angle_degrees`.
    #[must_use]
    pub const fn triple(fov_degrees: f64, distance: f64, side_angle_degrees: f64) -> Self {
        Self {
            fov_degrees,
            distance,
            screens: ScreenCount::Triple,
            side_angle_degrees,
            curve_radius: None,
        }
    }

    /// Returns a copy with the given panel curvature.
    #[must_use]
    pub const fn with_curve_radius(mut self, radius: Option<f64>) -> Self {
        self.curve_radius = radius;
        self
    }

    /// Curvature radius, with zero and negative values normalized to `None`.
    #[must_use]
    pub fn curve_radius(&self) -> Option<f64> {
        self.curve_radius.filter(|r| *r > 0.0)
    }

    /// Returns a copy with all lengths multiplied by `units_per_length`.
    ///
    /// Angles are left unchanged.
    #[must_use]
    pub fn scaled(self, units_per_length: f64) -> Self {
        Self {
            distance: self.distance * units_per_length,
            curve_radius: self.curve_radius.map(|r| r * units_per_length),
            ..self
        }
    }

    /// Panels for these parameters in the view's local frame.
    #[must_use]
    pub fn screen_layout(&self) -> ScreenLayout {
        ScreenLayout::new(self)
    }
}
