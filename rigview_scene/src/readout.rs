// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Shown in place of a field of view that has no finite value.
pub const INFINITE_FOV: &str = "∞";

/// Formats an angle in degrees for display, e.g. `"48°"` or `"29.74°"`.
///
/// Non-finite values format as [`INFINITE_FOV`]. With `digits == 0` the
/// value is rounded half away from zero.
#[must_use]
pub fn format_fov(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return INFINITE_FOV.into();
    }
    if digits == 0 {
        format!("{:.0}°", value.round())
    } else {
        format!("{value:.digits$}°")
    }
}

/// Which view a game's FOV setting refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal field of view.
    Horizontal,
    /// Vertical field of view.
    Vertical,
}

/// How a game expects its FOV setting to be entered.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GamePreset {
    /// Display name.
    pub name: &'static str,
    /// Axis the setting controls.
    pub axis: Axis,
    /// Multiplier from degrees to the game's unit.
    pub factor: f64,
    /// Decimal places the game accepts.
    pub digits: usize,
    /// Unit suffix.
    pub unit: &'static str,
}

/// Known games.
pub const GAME_PRESETS: &[GamePreset] = &[
    GamePreset {
        name: "Euro Truck Simulator",
        axis: Axis::Horizontal,
        factor: 1.0,
        digits: 0,
        unit: "°",
    },
    GamePreset {
        name: "RaceRoom Racing Experience",
        axis: Axis::Horizontal,
        factor: 1.0,
        digits: 1,
        unit: "°",
    },
    GamePreset {
        name: "Assetto Corsa",
        axis: Axis::Vertical,
        factor: 1.0,
        digits: 1,
        unit: "°",
    },
    GamePreset {
        name: "Assetto Corsa Competizione",
        axis: Axis::Vertical,
        factor: 1.0,
        digits: 1,
        unit: "°",
    },
    GamePreset {
        name: "rFactor",
        axis: Axis::Vertical,
        factor: 1.0,
        digits: 0,
        unit: "°",
    },
];

impl GamePreset {
    /// Presets for one axis, in display order.
    pub fn for_axis(axis: Axis) -> impl Iterator<Item = &'static Self> {
        GAME_PRESETS.iter().filter(move |game| game.axis == axis)
    }

    /// Formats `fov_degrees` as this game's setting.
    #[must_use]
    pub fn format(&self, fov_degrees: f64) -> String {
        let value = fov_degrees * self.factor;
        if !value.is_finite() {
            return INFINITE_FOV.into();
        }
        let digits = self.digits;
        let value = if digits == 0 { value.round() } else { value };
        format!("{value:.digits$}{}", self.unit)
    }
}
