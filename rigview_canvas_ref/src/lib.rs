// Copyright 2025 the Rigview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rigview recording canvas.
//!
//! This crate provides a [`Canvas`] implementation for **op recording and
//! state tracing**.
//!
//! It is intentionally *not* a renderer:
//! - It does **not** rasterize to pixels.
//! - It is intended for tests and tooling that want to assert on emitted
//!   ops and the drawing state at the time each op was applied.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Size;
use rigview_canvas::{
    Canvas, CanvasOp, DrawOp, DrawState, ImageDesc, ImageId, StateOp, StateStack,
};

/// Event recorded by the canvas.
#[derive(Clone, Debug)]
pub enum Event {
    /// State operation and the resulting state.
    State {
        /// State operation that was applied.
        op: StateOp,
        /// State after applying the operation.
        state: DrawState,
        /// Number of saved states after applying the operation.
        depth: usize,
    },
    /// Draw operation and the state used for drawing.
    Draw {
        /// Draw operation that was applied.
        op: DrawOp,
        /// State at the time of drawing.
        state: DrawState,
    },
}

/// Canvas that records everything applied to it.
///
/// This canvas:
/// - Stores image resources in a vector keyed by their IDs,
/// - Tracks the current drawing state with a [`StateStack`],
/// - Records [`Event`]s as state and draw operations are applied.
#[derive(Debug)]
pub struct RecordingCanvas {
    size: Size,
    images: Vec<Option<(ImageDesc, Vec<u8>)>>,

    /// Log of events in the order they were applied.
    events: Vec<Event>,
    /// Underlying canvas ops.
    ops: Vec<CanvasOp>,
    stack: StateStack,
}

impl RecordingCanvas {
    /// Creates an empty recording canvas reporting the given size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            images: Vec::new(),
            events: Vec::new(),
            ops: Vec::new(),
            stack: StateStack::new(),
        }
    }

    /// Returns a slice of recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Returns a slice of raw canvas operations.
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Iterates over draw operations together with the state they used.
    pub fn draws(&self) -> impl Iterator<Item = (&DrawOp, &DrawState)> + '_ {
        self.events.iter().filter_map(|event| match event {
            Event::Draw { op, state } => Some((op, state)),
            Event::State { .. } => None,
        })
    }

    /// Current drawing state.
    pub fn current_state(&self) -> &DrawState {
        self.stack.current()
    }

    /// Number of saved states currently on the stack.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Returns an image's description and pixels, if it is still alive.
    pub fn image(&self, id: ImageId) -> Option<(&ImageDesc, &[u8])> {
        let (desc, pixels) = self.images.get(id.0 as usize)?.as_ref()?;
        Some((desc, pixels.as_slice()))
    }

    /// Clears all recorded events and ops but keeps resources and state.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.ops.clear();
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn state(&mut self, op: StateOp) {
        self.stack.apply(&op);
        self.ops.push(CanvasOp::State(op.clone()));
        self.events.push(Event::State {
            op,
            state: self.stack.current().clone(),
            depth: self.stack.depth(),
        });
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(CanvasOp::Draw(op.clone()));
        self.events.push(Event::Draw {
            op,
            state: self.stack.current().clone(),
        });
    }

    fn create_image(&mut self, desc: ImageDesc, pixels: &[u8]) -> ImageId {
        let id = u32::try_from(self.images.len())
            .expect("RecordingCanvas: too many images for u32 ImageId");
        self.images.push(Some((desc, pixels.to_vec())));
        ImageId(id)
    }

    fn destroy_image(&mut self, id: ImageId) {
        let idx = id.0 as usize;
        if let Some(slot) = self.images.get_mut(idx) {
            *slot = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Affine, BezPath, Rect, Vec2};
    use peniko::Color;
    use rigview_canvas::{CanvasExt, Composite, ImageSampler};

    #[test]
    fn basic_state_and_draw() {
        let mut canvas = RecordingCanvas::new(100.0, 100.0);

        canvas.state(StateOp::SetFillColor(Color::WHITE));
        canvas.draw(DrawOp::FillPath(BezPath::new()));

        assert_eq!(canvas.events().len(), 2);
        assert_eq!(canvas.ops().len(), 2);
        let (op, state) = canvas.draws().next().expect("one draw");
        assert!(matches!(op, DrawOp::FillPath(_)));
        assert_eq!(state.fill_color, Color::WHITE);
    }

    #[test]
    fn state_snapshot_tracks_nesting() {
        let mut canvas = RecordingCanvas::new(100.0, 100.0);

        canvas.save();
        canvas.translate(Vec2::new(2.0, 0.0));
        canvas.state(StateOp::SetComposite(Composite::DestinationOver));

        let last = canvas.events().last().expect("at least one event");
        let Event::State { state, depth, .. } = last else {
            panic!("expected final event to be State");
        };
        assert_eq!(state.transform, Affine::translate((2.0, 0.0)));
        assert_eq!(state.composite, Composite::DestinationOver);
        assert_eq!(*depth, 1);

        canvas.restore();
        assert_eq!(canvas.depth(), 0);
        assert_eq!(canvas.current_state().composite, Composite::SourceOver);
    }

    #[test]
    fn draws_see_the_state_in_force() {
        let mut canvas = RecordingCanvas::new(100.0, 100.0);
        canvas.with_saved(|c| {
            c.translate(Vec2::new(10.0, 10.0));
            c.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 1.0, 1.0)));
        });
        canvas.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 1.0, 1.0)));

        let transforms: Vec<Affine> = canvas.draws().map(|(_, s)| s.transform).collect();
        assert_eq!(
            transforms,
            [Affine::translate((10.0, 10.0)), Affine::IDENTITY]
        );
    }

    #[test]
    fn clear_events_keeps_resources_usable() {
        let mut canvas = RecordingCanvas::new(10.0, 10.0);
        let img = canvas.create_image(ImageDesc::rgba8(1, 1), &[1, 2, 3, 4]);
        canvas.draw(DrawOp::DrawImage {
            image: img,
            dst: Rect::new(0.0, 0.0, 1.0, 1.0),
            sampler: ImageSampler::default(),
        });
        canvas.clear_events();
        assert!(canvas.events().is_empty());
        assert!(canvas.ops().is_empty());

        let (desc, pixels) = canvas.image(img).expect("image survives clear_events");
        assert_eq!(desc.width, 1);
        assert_eq!(pixels, &[1, 2, 3, 4]);
    }

    #[test]
    fn resource_destroy_is_tolerant() {
        let mut canvas = RecordingCanvas::new(10.0, 10.0);
        let img = canvas.create_image(ImageDesc::rgba8(1, 1), &[0, 0, 0, 0]);

        canvas.destroy_image(img);
        assert!(canvas.image(img).is_none());

        // Double-destroy and unknown IDs should not panic.
        canvas.destroy_image(img);
        canvas.destroy_image(ImageId(42));
    }
}
