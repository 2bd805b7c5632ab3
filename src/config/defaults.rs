// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Zoom**: Stage zoom percentage and step bounds
//! - **Stage**: On-screen stage size and initial overlay sizing
//! - **Output**: Fixed capture raster size and overlay box limits
//! - **Capture**: Readiness retry policy for webcam sources
//! - **Server**: REST endpoint defaults

use crate::domain::ui::newtypes::zoom_bounds;

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Default stage zoom when the editor opens (100% = 1.0 scale).
pub const DEFAULT_ZOOM_PERCENT: f32 = zoom_bounds::DEFAULT_PERCENT;

/// Minimum allowed stage zoom percentage.
pub const MIN_ZOOM_PERCENT: f32 = zoom_bounds::MIN_PERCENT;

/// Default zoom step for zoom in/out operations.
pub const DEFAULT_ZOOM_STEP_PERCENT: f32 = zoom_bounds::DEFAULT_STEP;

/// Minimum allowed zoom step percentage.
pub const MIN_ZOOM_STEP_PERCENT: f32 = zoom_bounds::MIN_STEP;

/// Maximum allowed zoom step percentage.
pub const MAX_ZOOM_STEP_PERCENT: f32 = zoom_bounds::MAX_STEP;

// ==========================================================================
// Stage Defaults
// ==========================================================================

/// Width of the on-screen stage in pixels.
pub const DEFAULT_STAGE_WIDTH: f32 = 1080.0;

/// Height of the on-screen stage in pixels.
pub const DEFAULT_STAGE_HEIGHT: f32 = 720.0;

/// Fraction of the stage width a freshly loaded overlay occupies.
pub const OVERLAY_WIDTH_FRACTION: f32 = 0.25;

/// Lower bound for the initial overlay width in pixels.
pub const MIN_OVERLAY_WIDTH: f32 = 80.0;

// ==========================================================================
// Output Defaults
// ==========================================================================

/// Width of the captured raster.
pub const OUTPUT_WIDTH: u32 = 1080;

/// Height of the captured raster.
pub const OUTPUT_HEIGHT: u32 = 720;

/// Smallest overlay box edge sent to the server.
pub const MIN_OVERLAY_BOX: u32 = 10;

// ==========================================================================
// Capture Defaults
// ==========================================================================

/// Delay before retrying a capture on a stream without frame data.
pub const DEFAULT_CAPTURE_RETRY_MS: u64 = 100;

/// Number of readiness retries before giving up on a capture.
pub const DEFAULT_CAPTURE_MAX_RETRIES: u32 = 50;

// ==========================================================================
// Server Defaults
// ==========================================================================

/// Base URL of the photo-booth server.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Zoom validation
    assert!(MIN_ZOOM_PERCENT > 0.0);
    assert!(MIN_ZOOM_PERCENT < DEFAULT_ZOOM_PERCENT);
    assert!(MIN_ZOOM_STEP_PERCENT > 0.0);
    assert!(MAX_ZOOM_STEP_PERCENT > MIN_ZOOM_STEP_PERCENT);
    assert!(DEFAULT_ZOOM_STEP_PERCENT >= MIN_ZOOM_STEP_PERCENT);
    assert!(DEFAULT_ZOOM_STEP_PERCENT <= MAX_ZOOM_STEP_PERCENT);

    // Stage validation
    assert!(DEFAULT_STAGE_WIDTH > 0.0);
    assert!(DEFAULT_STAGE_HEIGHT > 0.0);
    assert!(OVERLAY_WIDTH_FRACTION > 0.0 && OVERLAY_WIDTH_FRACTION <= 1.0);

    // Output validation
    assert!(MIN_OVERLAY_BOX < OUTPUT_WIDTH);
    assert!(MIN_OVERLAY_BOX < OUTPUT_HEIGHT);

    // Capture validation
    assert!(DEFAULT_CAPTURE_RETRY_MS > 0);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS > 0);
};
