// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Affine, Stroke};
use peniko::Color;

use crate::{Composite, StateOp};

/// Drawing state in force for a draw operation.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    /// User space to surface transform.
    pub transform: Affine,
    /// Color used by fills and text.
    pub fill_color: Color,
    /// Color used by strokes.
    pub stroke_color: Color,
    /// Stroke width, joins, caps and dashes.
    pub stroke: Stroke,
    /// Opacity multiplier in `[0, 1]`.
    pub global_alpha: f32,
    /// How draws combine with existing pixels.
    pub composite: Composite,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            stroke: Stroke::new(1.0),
            global_alpha: 1.0,
            composite: Composite::SourceOver,
        }
    }
}

impl DrawState {
    /// Fill color with the global alpha applied.
    #[must_use]
    pub fn effective_fill(&self) -> Color {
        self.fill_color.multiply_alpha(self.global_alpha)
    }

    /// Stroke color with the global alpha applied.
    #[must_use]
    pub fn effective_stroke(&self) -> Color {
        self.stroke_color.multiply_alpha(self.global_alpha)
    }
}

/// Current [`DrawState`] plus the stack of saved states.
///
/// Backends feed every [`StateOp`] through [`StateStack::apply`] and read
/// [`StateStack::current`] when drawing.
#[derive(Clone, Debug, Default)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    /// Creates a stack holding the default state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a state operation.
    pub fn apply(&mut self, op: &StateOp) {
        match op {
            StateOp::Save => self.saved.push(self.current.clone()),
            StateOp::Restore => {
                if let Some(prev) = self.saved.pop() {
                    self.current = prev;
                }
            }
            StateOp::Translate { dx, dy } => {
                self.current.transform *= Affine::translate((*dx, *dy));
            }
            StateOp::Rotate(angle) => self.current.transform *= Affine::rotate(*angle),
            StateOp::ResetTransform => self.current.transform = Affine::IDENTITY,
            StateOp::SetFillColor(color) => self.current.fill_color = *color,
            StateOp::SetStrokeColor(color) => self.current.stroke_color = *color,
            StateOp::SetStroke(stroke) => self.current.stroke = stroke.clone(),
            StateOp::SetGlobalAlpha(alpha) => self.current.global_alpha = alpha.clamp(0.0, 1.0),
            StateOp::SetComposite(composite) => self.current.composite = *composite,
        }
    }

    /// State in force for the next draw.
    #[must_use]
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    /// Number of saved states.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Drops all saved states and returns to the default state.
    pub fn reset(&mut self) {
        self.current = DrawState::default();
        self.saved.clear();
    }
}
