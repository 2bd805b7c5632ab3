// SPDX-License-Identifier: MPL-2.0
//! UI state management modules
//!
//! Interaction state kept apart from the editor itself.

pub mod drag;
pub mod zoom;

// Re-export commonly used types for convenience
pub use drag::{DragState, DragTarget};
pub use zoom::{ZoomDirection, ZoomState};
