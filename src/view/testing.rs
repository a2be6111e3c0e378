//! Test view that records what animations do to it.

use glam::DVec2;

use super::View;
use crate::geometry::Position;

/// Counts cancels and keeps every committed position.
#[derive(Debug, Default)]
pub(crate) struct RecordingView {
    pub(crate) position: Position,
    pub(crate) frame_size: DVec2,
    pub(crate) cancels: usize,
    pub(crate) writes: Vec<Position>,
}

impl View for RecordingView {
    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
        self.writes.push(position);
    }

    fn cancel_animation(&mut self) {
        self.cancels += 1;
    }

    fn frame_size(&self) -> DVec2 {
        self.frame_size
    }
}
