// SPDX-License-Identifier: MPL-2.0
//! Editor message/event types re-exported by the facade.

use crate::application::port::{CameraError, CameraStream};
use crate::domain::compositing::Viewport;
use crate::infrastructure::http::{ApiError, Asset, UserImage};
use crate::media::capture::ComposeUpload;
use crate::media::validation::UploadCandidate;
use crate::ui::state::ZoomDirection;
use image_rs::RgbaImage;
use std::time::Duration;

/// Stage source selection messages.
#[derive(Debug)]
pub enum SourceMessage {
    /// The user asked for the webcam.
    WebcamRequested,
    /// The platform granted a stream.
    WebcamOpened(Box<dyn CameraStream>),
    /// Camera access was denied or no device exists.
    WebcamFailed(CameraError),
    /// A file was picked in the upload input.
    UploadChosen(UploadCandidate),
    /// The "place image" button was pressed.
    PlaceImage,
}

/// Overlay asset messages.
#[derive(Debug)]
pub enum OverlayMessage {
    AssetsLoaded(Result<Vec<Asset>, ApiError>),
    Select(u64),
    /// An overlay image finished loading (possibly for a stale selection).
    Loaded {
        asset_id: u64,
        result: Result<RgbaImage, String>,
    },
}

/// Pointer and zoom interaction on the stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageMessage {
    PointerPressed { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },
    PointerReleased,
    Pan { dx: f32, dy: f32 },
    DragOverlay { dx: f32, dy: f32 },
    Zoom(ZoomDirection),
    /// The on-screen stage container changed size.
    Resized(Viewport),
}

/// Capture and upload messages.
#[derive(Debug)]
pub enum CaptureMessage {
    SnapToggled,
    Requested,
    /// Result of `POST /api/compose`: the stored image path.
    Uploaded(Result<String, ApiError>),
    PreviousImagesLoaded(Result<Vec<UserImage>, ApiError>),
}

/// Messages handled by the editor.
#[derive(Debug)]
pub enum Message {
    Source(SourceMessage),
    Overlay(OverlayMessage),
    Stage(StageMessage),
    Capture(CaptureMessage),
}

impl From<SourceMessage> for Message {
    fn from(message: SourceMessage) -> Self {
        Message::Source(message)
    }
}

impl From<OverlayMessage> for Message {
    fn from(message: OverlayMessage) -> Self {
        Message::Overlay(message)
    }
}

impl From<StageMessage> for Message {
    fn from(message: StageMessage) -> Self {
        Message::Stage(message)
    }
}

impl From<CaptureMessage> for Message {
    fn from(message: CaptureMessage) -> Self {
        Message::Capture(message)
    }
}

/// Events propagated to the driver for side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    None,
    /// Request camera access.
    OpenWebcam,
    /// Fetch the overlay image at `path`.
    LoadOverlay { asset_id: u64, path: String },
    /// Send the capture to `POST /api/compose`.
    Upload(ComposeUpload),
    /// A fully composited PNG (client compositing).
    Composed { png: Vec<u8> },
    /// Re-send the capture request after a delay.
    RetryCapture { after: Duration },
    /// The server rejected the session; the user must log in.
    AuthRequired,
}
