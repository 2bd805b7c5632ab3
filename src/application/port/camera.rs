// SPDX-License-Identifier: MPL-2.0
//! Camera port definition.
//!
//! This module defines the [`Camera`] trait used to acquire a live webcam
//! stream, and the [`CameraStream`] handle the editor holds while the webcam
//! is the stage source. Platform adapters implement these traits; the editor
//! never talks to hardware directly.
//!
//! Acquisition and release are paired: whoever holds a [`CameraStream`] must
//! call [`CameraStream::stop`] before dropping it.

use image_rs::RgbaImage;
use std::fmt;

// =============================================================================
// CameraError
// =============================================================================

/// Errors that can occur while acquiring a camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraError {
    /// The user (or platform policy) refused camera access.
    PermissionDenied,
    /// No camera backend or device is available.
    Unavailable,
    /// The device exists but could not be opened.
    DeviceFailed(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::PermissionDenied => write!(f, "Camera access denied"),
            CameraError::Unavailable => write!(f, "No camera available"),
            CameraError::DeviceFailed(msg) => write!(f, "Camera failed: {msg}"),
        }
    }
}

impl std::error::Error for CameraError {}

// =============================================================================
// ReadyState
// =============================================================================

/// How much frame data a stream has buffered, ordered from least to most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ReadyState {
    #[default]
    HaveNothing,
    HaveMetadata,
    HaveCurrentData,
    HaveFutureData,
    HaveEnoughData,
}

impl ReadyState {
    /// Whether a frame can be captured without getting a blank image.
    #[must_use]
    pub fn has_current_data(self) -> bool {
        self >= ReadyState::HaveCurrentData
    }
}

// =============================================================================
// Traits
// =============================================================================

/// A live camera stream held by the editor.
pub trait CameraStream: fmt::Debug + Send {
    /// Current buffering state.
    fn ready_state(&self) -> ReadyState;

    /// The frame currently displayed, at the stream's natural size.
    ///
    /// Returns `None` until the stream has current data.
    fn current_frame(&mut self) -> Option<RgbaImage>;

    /// Pauses (freezes) or resumes the stream's video tracks.
    fn set_paused(&mut self, paused: bool);

    /// Stops every track and releases the device.
    fn stop(&mut self);

    /// Whether the stream still holds the device.
    fn is_live(&self) -> bool;
}

/// Acquires camera streams.
pub trait Camera {
    /// Requests camera access and opens a stream.
    ///
    /// # Errors
    ///
    /// Returns a [`CameraError`] when access is denied or no device can be opened.
    fn open(&mut self) -> Result<Box<dyn CameraStream>, CameraError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_state_threshold_is_current_data() {
        assert!(!ReadyState::HaveNothing.has_current_data());
        assert!(!ReadyState::HaveMetadata.has_current_data());
        assert!(ReadyState::HaveCurrentData.has_current_data());
        assert!(ReadyState::HaveEnoughData.has_current_data());
    }

    #[test]
    fn camera_error_display() {
        assert_eq!(
            CameraError::DeviceFailed("busy".into()).to_string(),
            "Camera failed: busy"
        );
    }
}
