// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for UI values,
//! ensuring they are always within valid ranges.

// =============================================================================
// Zoom Bounds
// =============================================================================

/// Zoom percentage bounds. Zoom has a floor of 25% and no ceiling.
pub mod zoom_bounds {
    /// Minimum zoom percentage.
    pub const MIN_PERCENT: f32 = 25.0;
    /// Default zoom percentage.
    pub const DEFAULT_PERCENT: f32 = 100.0;
    /// Minimum zoom step percentage.
    pub const MIN_STEP: f32 = 1.0;
    /// Maximum zoom step percentage.
    pub const MAX_STEP: f32 = 100.0;
    /// Default zoom step percentage.
    pub const DEFAULT_STEP: f32 = 10.0;
}

// =============================================================================
// ZoomPercent
// =============================================================================

/// Stage zoom percentage, never below 25%.
///
/// Zoom is kept as a percentage so that stepping by 10% lands on exact values
/// instead of accumulating `0.1` float error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomPercent(f32);

impl ZoomPercent {
    /// Creates a new zoom percentage, raising it to the floor if needed.
    #[must_use]
    pub fn new(percent: f32) -> Self {
        Self(percent.max(zoom_bounds::MIN_PERCENT))
    }

    /// Returns the raw percentage value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the zoom as a multiplier (e.g., 100% → 1.0).
    #[must_use]
    pub fn as_factor(self) -> f32 {
        self.0 / 100.0
    }

    /// Increases zoom by the given step.
    #[must_use]
    pub fn zoom_in(self, step: ZoomStep) -> Self {
        Self::new(self.0 + step.value())
    }

    /// Decreases zoom by the given step.
    #[must_use]
    pub fn zoom_out(self, step: ZoomStep) -> Self {
        Self::new(self.0 - step.value())
    }
}

impl Default for ZoomPercent {
    fn default() -> Self {
        Self(zoom_bounds::DEFAULT_PERCENT)
    }
}

// =============================================================================
// ZoomStep
// =============================================================================

/// Zoom step percentage, guaranteed to be within valid range (1%–100%).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomStep(f32);

impl ZoomStep {
    /// Creates a new zoom step, clamping the value to the valid range.
    #[must_use]
    pub fn new(percent: f32) -> Self {
        Self(percent.clamp(zoom_bounds::MIN_STEP, zoom_bounds::MAX_STEP))
    }

    /// Returns the raw percentage value.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for ZoomStep {
    fn default() -> Self {
        Self(zoom_bounds::DEFAULT_STEP)
    }
}

// =============================================================================
// Tests
// =============================================================================
