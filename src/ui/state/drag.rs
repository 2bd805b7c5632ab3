// SPDX-License-Identifier: MPL-2.0
//! Drag state management
//!
//! Tracks which stage element a pointer drag started on and the last pointer
//! position, so each move can be turned into an incremental delta.

/// What a drag gesture moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// Pans the whole stage.
    Stage,
    /// Moves the overlay within the stage.
    Overlay,
}

/// Manages grab-and-drag state
#[derive(Debug, Clone, Default)]
pub struct DragState {
    /// Element being dragged, if a drag is active
    pub target: Option<DragTarget>,

    /// Pointer position at the previous event
    pub last_position: Option<(f32, f32)>,
}

impl DragState {
    /// Starts a drag operation
    pub fn start(&mut self, target: DragTarget, x: f32, y: f32) {
        self.target = Some(target);
        self.last_position = Some((x, y));
    }

    /// Stops the drag operation
    pub fn stop(&mut self) {
        self.target = None;
        self.last_position = None;
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.target.is_some()
    }

    #[must_use]
    pub fn is_dragging_overlay(&self) -> bool {
        self.target == Some(DragTarget::Overlay)
    }

    /// Movement since the previous pointer event, in screen pixels.
    ///
    /// Returns `None` when no drag is active.
    pub fn delta(&mut self, x: f32, y: f32) -> Option<(DragTarget, f32, f32)> {
        let target = self.target?;
        let (last_x, last_y) = self.last_position?;
        self.last_position = Some((x, y));
        Some((target, x - last_x, y - last_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_drag_state_is_not_dragging() {
        let state = DragState::default();
        assert!(!state.is_dragging());
        assert!(state.last_position.is_none());
    }

    #[test]
    fn stop_drag_clears_state() {
        let mut state = DragState::default();
        state.start(DragTarget::Overlay, 100.0, 50.0);
        assert!(state.is_dragging_overlay());
        state.stop();

        assert!(!state.is_dragging());
        assert!(state.last_position.is_none());
    }

    #[test]
    fn delta_returns_none_when_not_dragging() {
        let mut state = DragState::default();
        assert!(state.delta(100.0, 50.0).is_none());
    }

    #[test]
    fn deltas_are_incremental() {
        let mut state = DragState::default();
        state.start(DragTarget::Stage, 200.0, 150.0);

        assert_eq!(state.delta(180.0, 130.0), Some((DragTarget::Stage, -20.0, -20.0)));
        assert_eq!(state.delta(185.0, 130.0), Some((DragTarget::Stage, 5.0, 0.0)));
    }
}
