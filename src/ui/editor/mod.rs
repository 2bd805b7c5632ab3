// SPDX-License-Identifier: MPL-2.0
//! Photo compositing editor.
//!
//! This module follows a "state down, messages up" pattern: the driver feeds
//! [`Message`]s into [`State::update`] and performs whatever side effect the
//! returned [`Event`] asks for (open the camera, fetch an overlay, upload a
//! capture), then feeds the result back as another message. The state itself
//! never does I/O.
//!
//! The stage shows one source (a webcam stream or an uploaded image) that can
//! be panned and zoomed, with a draggable overlay on top of it.

use crate::application::port::CameraStream;
use crate::domain::compositing::{OverlayState, StageTransform, Viewport};
use crate::infrastructure::http::{ApiError, Asset};
use crate::media::decode_rgba;
use crate::media::validation::{validate_candidate, UploadCandidate, ValidationError};
use crate::ui::notifications::{self, Notification};
use crate::ui::state::{DragState, DragTarget, ZoomState};
use image_rs::RgbaImage;

mod capture;
mod component;
mod messages;

pub use component::EditorSettings;
pub use messages::{CaptureMessage, Event, Message, OverlayMessage, SourceMessage, StageMessage};

/// Message shown instead of the stage when the camera cannot be opened.
pub const WEBCAM_FALLBACK_MESSAGE: &str =
    "Could not access webcam. Please allow camera access or upload an image instead.";

/// Content currently shown on the stage.
#[derive(Debug)]
pub enum StageSource {
    Webcam(Box<dyn CameraStream>),
    Image(RgbaImage),
}

impl StageSource {
    #[must_use]
    pub fn is_webcam(&self) -> bool {
        matches!(self, StageSource::Webcam(_))
    }
}

/// The overlay asset the user picked.
#[derive(Debug, Clone)]
pub struct OverlaySelection {
    pub asset_id: u64,
    pub path: String,
    /// `None` until the image has loaded.
    pub image: Option<RgbaImage>,
}

/// An uploaded file that passed validation but has not been placed yet.
#[derive(Debug, Clone)]
pub struct PendingUpload {
    pub file_name: String,
    pub image: RgbaImage,
}

/// Local state for the editor screen.
// Allow struct_excessive_bools: the flags mirror independent UI toggles.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug)]
pub struct State {
    settings: EditorSettings,
    stage: StageTransform,
    overlay: OverlayState,
    zoom: ZoomState,
    drag: DragState,
    source: Option<StageSource>,
    webcam_unavailable: bool,
    pending_upload: Option<PendingUpload>,
    assets: Vec<Asset>,
    selection: Option<OverlaySelection>,
    snapped: bool,
    uploading: bool,
    capture_attempts: u32,
    /// Paths of saved captures, newest first.
    thumbnails: Vec<String>,
    notifications: notifications::Manager,
    auth_required: bool,
}

impl State {
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Source(msg) => self.handle_source_message(msg),
            Message::Overlay(msg) => self.handle_overlay_message(msg),
            Message::Stage(msg) => {
                self.handle_stage_message(msg);
                Event::None
            }
            Message::Capture(msg) => self.handle_capture_message(msg),
        }
    }

    fn handle_source_message(&mut self, message: SourceMessage) -> Event {
        match message {
            SourceMessage::WebcamRequested => {
                if self.source.as_ref().is_some_and(StageSource::is_webcam) {
                    return Event::None;
                }
                Event::OpenWebcam
            }
            SourceMessage::WebcamOpened(stream) => {
                self.replace_source(StageSource::Webcam(stream));
                self.webcam_unavailable = false;
                Event::None
            }
            SourceMessage::WebcamFailed(err) => {
                log::warn!("Webcam unavailable: {err}");
                self.webcam_unavailable = true;
                self.notifications
                    .push(Notification::warning(WEBCAM_FALLBACK_MESSAGE));
                Event::None
            }
            SourceMessage::UploadChosen(candidate) => {
                self.choose_upload(candidate);
                Event::None
            }
            SourceMessage::PlaceImage => {
                if let Some(upload) = self.pending_upload.take() {
                    log::debug!("Placing uploaded image {}", upload.file_name);
                    self.replace_source(StageSource::Image(upload.image));
                    // A selected overlay restarts at the stage origin, keeping its size.
                    if self.selection.is_some() {
                        self.overlay.x = 0.0;
                        self.overlay.y = 0.0;
                    }
                }
                Event::None
            }
        }
    }

    fn choose_upload(&mut self, candidate: UploadCandidate) {
        self.pending_upload = None;
        if let Err(err) = validate_candidate(&candidate) {
            log::debug!("Rejected upload: {err}");
            self.notifications
                .push(Notification::error(err.user_message()));
            return;
        }

        match decode_rgba(&candidate.bytes) {
            Ok(image) => {
                self.pending_upload = Some(PendingUpload {
                    file_name: candidate.file_name,
                    image,
                });
            }
            Err(err) => {
                log::debug!("Upload {} failed to decode: {err}", candidate.file_name);
                let message = ValidationError::UnsupportedMimeType(candidate.mime_type);
                self.notifications
                    .push(Notification::error(message.user_message()));
            }
        }
    }

    /// Swaps the stage source, stopping any webcam tracks first.
    fn replace_source(&mut self, source: StageSource) {
        self.stop_webcam();
        self.source = Some(source);
        self.snapped = false;
        self.capture_attempts = 0;
    }

    fn stop_webcam(&mut self) {
        if let Some(StageSource::Webcam(stream)) = self.source.as_mut() {
            stream.stop();
        }
    }

    fn handle_overlay_message(&mut self, message: OverlayMessage) -> Event {
        match message {
            OverlayMessage::AssetsLoaded(Ok(assets)) => {
                log::debug!("Loaded {} assets", assets.len());
                self.assets = assets;
                Event::None
            }
            OverlayMessage::AssetsLoaded(Err(err)) => self.api_failure(&err, "Failed to load assets."),
            OverlayMessage::Select(asset_id) => {
                let Some(asset) = self.assets.iter().find(|a| a.id == asset_id) else {
                    log::warn!("Ignoring selection of unknown asset {asset_id}");
                    return Event::None;
                };
                let path = asset.path.clone();
                self.selection = Some(OverlaySelection {
                    asset_id,
                    path: path.clone(),
                    image: None,
                });
                Event::LoadOverlay { asset_id, path }
            }
            OverlayMessage::Loaded { asset_id, result } => {
                self.overlay_loaded(asset_id, result);
                Event::None
            }
        }
    }

    fn overlay_loaded(&mut self, asset_id: u64, result: Result<RgbaImage, String>) {
        let Some(selection) = self
            .selection
            .as_mut()
            .filter(|selection| selection.asset_id == asset_id)
        else {
            log::debug!("Dropping stale overlay load for asset {asset_id}");
            return;
        };

        match result {
            Ok(image) => {
                self.overlay = OverlayState::centered(
                    self.settings.viewport,
                    image.width(),
                    image.height(),
                    self.stage.scale(),
                    self.settings.overlay_width_fraction,
                    self.settings.min_overlay_width,
                );
                selection.image = Some(image);
            }
            Err(err) => {
                log::warn!("Overlay {} failed to load: {err}", selection.path);
                self.notifications.push(Notification::error(
                    "Failed to load overlay image. Please check the image path.",
                ));
            }
        }
    }

    fn handle_stage_message(&mut self, message: StageMessage) {
        match message {
            StageMessage::PointerPressed { x, y } => {
                let target = if self.overlay_hit(x, y) {
                    DragTarget::Overlay
                } else {
                    DragTarget::Stage
                };
                self.drag.start(target, x, y);
            }
            StageMessage::PointerMoved { x, y } => {
                if let Some((target, dx, dy)) = self.drag.delta(x, y) {
                    match target {
                        DragTarget::Stage => self.stage.pan(dx, dy),
                        DragTarget::Overlay => self.overlay.drag_by(dx, dy, self.stage.scale()),
                    }
                }
            }
            StageMessage::PointerReleased => self.drag.stop(),
            StageMessage::Pan { dx, dy } => self.stage.pan(dx, dy),
            StageMessage::DragOverlay { dx, dy } => {
                self.overlay.drag_by(dx, dy, self.stage.scale());
            }
            StageMessage::Zoom(direction) => {
                self.zoom.apply(&mut self.stage, direction);
            }
            StageMessage::Resized(viewport) => self.settings.viewport = viewport,
        }
    }

    /// Whether a screen point lies on the visible overlay.
    fn overlay_hit(&self, x: f32, y: f32) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.image.is_some())
            && self.overlay.screen_rect(&self.stage).contains(x, y)
    }

    /// Records an API failure; auth failures become [`Event::AuthRequired`].
    fn api_failure(&mut self, err: &ApiError, message: &str) -> Event {
        if *err == ApiError::AuthRequired {
            self.auth_required = true;
            return Event::AuthRequired;
        }
        log::warn!("{message} {err}");
        self.notifications.push(Notification::error(message));
        Event::None
    }
}

impl Drop for State {
    fn drop(&mut self) {
        self.stop_webcam();
    }
}
