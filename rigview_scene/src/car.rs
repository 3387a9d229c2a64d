// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

/// Outer dimensions of a car body, in the catalog's length unit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CarDimensions {
    /// Track width, seen from above.
    pub width: f64,
    /// Height, seen from the side.
    pub height: f64,
    /// Length from nose to tail.
    pub length: f64,
}

/// Reference data for one car silhouette.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CarProfile {
    /// Catalog key.
    pub id: &'static str,
    /// Image reference handed to a [`CarImageSource`](crate::CarImageSource).
    pub image: &'static str,
    /// Body dimensions before scaling.
    pub dimensions: CarDimensions,
    /// Uniform scale from catalog units to canvas pixels.
    pub scale: f64,
    /// Eye point in the plan view, measured from the car's nose along its
    /// length (x) and up from the car's right-hand edge (y), before scaling.
    pub horizontal_offset: Vec2,
    /// Eye point in the side view, measured from the car's nose along its
    /// length (x) and up from the ground line (y), before scaling.
    pub vertical_offset: Vec2,
}

/// Built-in car silhouettes.
pub const CATALOG: &[CarProfile] = &[
    CarProfile {
        id: "drift",
        image: "img/drift.png",
        dimensions: CarDimensions {
            width: 169.0,
            height: 129.0,
            length: 452.0,
        },
        scale: 1.75,
        horizontal_offset: Vec2::new(250.0, 140.0),
        vertical_offset: Vec2::new(250.0, 105.0),
    },
    CarProfile {
        id: "gt3",
        image: "img/gt3.png",
        dimensions: CarDimensions {
            width: 185.2,
            height: 127.9,
            length: 457.3,
        },
        scale: 1.725,
        horizontal_offset: Vec2::new(240.0, 65.0),
        vertical_offset: Vec2::new(240.0, 105.0),
    },
    CarProfile {
        id: "f1",
        image: "img/f1.png",
        dimensions: CarDimensions {
            width: 190.0,
            height: 110.0,
            length: 545.0,
        },
        scale: 1.45,
        horizontal_offset: Vec2::new(270.0, 100.0),
        vertical_offset: Vec2::new(270.0, 85.0),
    },
];

impl CarProfile {
    /// Finds a catalog entry by key.
    #[must_use]
    pub fn lookup(id: &str) -> Option<&'static Self> {
        CATALOG.iter().find(|car| car.id == id)
    }
}

/// Where a car sits on a canvas.
///
/// The canvas is split into a top half showing the car from above and a
/// bottom half showing it from the side. In both halves the car is centered
/// horizontally; vertically it is centered on the half's midline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CarPlacement {
    /// Left edge of the car in both views.
    pub x: f64,
    /// Bottom edge of the car in the plan view.
    pub top_y: f64,
    /// Ground line of the car in the side view.
    pub bottom_y: f64,
    /// Scaled dimensions.
    pub size: CarDimensions,
    scale: f64,
    horizontal_offset: Vec2,
    vertical_offset: Vec2,
}

impl CarPlacement {
    /// Places `profile` on a canvas of the given size.
    #[must_use]
    pub fn new(profile: &CarProfile, canvas: Size) -> Self {
        let s = profile.scale;
        let size = CarDimensions {
            width: profile.dimensions.width * s,
            height: profile.dimensions.height * s,
            length: profile.dimensions.length * s,
        };
        Self {
            x: (canvas.width - size.length) / 2.0,
            top_y: canvas.height * 0.25 + size.width / 2.0,
            bottom_y: canvas.height * 0.75 + size.height / 2.0,
            size,
            scale: s,
            horizontal_offset: profile.horizontal_offset,
            vertical_offset: profile.vertical_offset,
        }
    }

    /// Viewer position for the horizontal (plan) view.
    #[must_use]
    pub fn horizontal_anchor(&self) -> Point {
        Point::new(
            self.x + self.horizontal_offset.x * self.scale,
            self.top_y - self.horizontal_offset.y * self.scale,
        )
    }

    /// Viewer position for the vertical (side) view.
    #[must_use]
    pub fn vertical_anchor(&self) -> Point {
        Point::new(
            self.x + self.vertical_offset.x * self.scale,
            self.bottom_y - self.vertical_offset.y * self.scale,
        )
    }

    /// Car footprint in the plan view.
    #[must_use]
    pub fn plan_box(&self) -> Rect {
        Rect::new(
            self.x,
            self.top_y - self.size.width,
            self.x + self.size.length,
            self.top_y,
        )
    }

    /// Car profile box in the side view.
    #[must_use]
    pub fn elevation_box(&self) -> Rect {
        Rect::new(
            self.x,
            self.bottom_y - self.size.height,
            self.x + self.size.length,
            self.bottom_y,
        )
    }
}
