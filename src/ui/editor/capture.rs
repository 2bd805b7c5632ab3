// SPDX-License-Identifier: MPL-2.0
//! Snap, capture and upload handling.

use super::{CaptureMessage, Event, StageSource, State};
use crate::config::CompositeMode;
use crate::infrastructure::http::{ApiError, UserImage};
use crate::media::capture::{self as render, CaptureError, StageSnapshot};
use crate::ui::notifications::Notification;
use image_rs::RgbaImage;

impl State {
    pub(super) fn handle_capture_message(&mut self, message: CaptureMessage) -> Event {
        match message {
            CaptureMessage::SnapToggled => {
                self.toggle_snap();
                Event::None
            }
            CaptureMessage::Requested => self.capture(),
            CaptureMessage::Uploaded(Ok(path)) => {
                self.uploading = false;
                log::info!("Capture stored at {path}");
                self.thumbnails.insert(0, path);
                self.notifications
                    .push(Notification::success("Image saved successfully!"));
                Event::None
            }
            CaptureMessage::Uploaded(Err(err)) => {
                self.uploading = false;
                let message = format!("Failed to upload: {err}");
                self.api_failure(&err, &message)
            }
            CaptureMessage::PreviousImagesLoaded(Ok(images)) => {
                self.thumbnails = images.into_iter().map(|UserImage { path, .. }| path).collect();
                Event::None
            }
            CaptureMessage::PreviousImagesLoaded(Err(err)) if err == ApiError::AuthRequired => {
                self.api_failure(&err, "Failed to load images")
            }
            CaptureMessage::PreviousImagesLoaded(Err(err)) => {
                log::debug!("Previous images unavailable: {err}");
                Event::None
            }
        }
    }

    /// Freezes or resumes the webcam so the same frame gets captured.
    fn toggle_snap(&mut self) {
        let Some(StageSource::Webcam(stream)) = self.source.as_mut() else {
            log::debug!("Snap ignored: stage source is not a webcam");
            return;
        };
        self.snapped = !self.snapped;
        stream.set_paused(self.snapped);
    }

    fn capture(&mut self) -> Event {
        if self.uploading {
            log::debug!("Capture ignored while an upload is in flight");
            return Event::None;
        }

        match self.try_capture() {
            Ok(event) => event,
            Err(err) => {
                self.capture_attempts = 0;
                log::warn!("Capture refused: {err}");
                self.notifications
                    .push(Notification::error(err.user_message()));
                Event::None
            }
        }
    }

    fn try_capture(&mut self) -> Result<Event, CaptureError> {
        let asset_id = match &self.selection {
            Some(selection) if self.assets.iter().any(|a| a.id == selection.asset_id) => {
                selection.asset_id
            }
            _ => return Err(CaptureError::NoAssetSelected),
        };

        // Outer `None`: not a webcam. Inner `None`: webcam without frame data.
        let webcam_frame: Option<Option<RgbaImage>> = match self.source.as_mut() {
            None => return Err(CaptureError::NoSource),
            Some(StageSource::Image(_)) => None,
            Some(StageSource::Webcam(stream)) => Some(if stream.ready_state().has_current_data() {
                stream.current_frame()
            } else {
                None
            }),
        };
        if matches!(webcam_frame, Some(None)) {
            return self.defer_capture();
        }

        let source = match (&webcam_frame, &self.source) {
            (Some(Some(frame)), _) => frame,
            (_, Some(StageSource::Image(image))) => image,
            _ => return Err(CaptureError::NoSource),
        };
        let overlay_image = self
            .selection
            .as_ref()
            .and_then(|selection| selection.image.as_ref())
            .ok_or(CaptureError::OverlayNotLoaded)?;

        let snapshot = StageSnapshot {
            source,
            stage: &self.stage,
            overlay: &self.overlay,
            viewport: self.settings.viewport,
        };

        let event = match self.settings.mode {
            CompositeMode::Server => {
                let upload = render::capture_for_server(snapshot, asset_id)?;
                Event::Upload(upload)
            }
            CompositeMode::Client => {
                let png = render::capture_composited(snapshot, overlay_image)?;
                Event::Composed { png }
            }
        };

        self.capture_attempts = 0;
        if matches!(event, Event::Upload(_)) {
            self.uploading = true;
        }
        Ok(event)
    }

    /// Schedules another attempt while the webcam has no frame data yet.
    fn defer_capture(&mut self) -> Result<Event, CaptureError> {
        if self.capture_attempts >= self.settings.max_retries {
            return Err(CaptureError::SourceNotReady {
                attempts: self.capture_attempts,
            });
        }
        self.capture_attempts += 1;
        log::debug!(
            "Webcam not ready, retry {}/{}",
            self.capture_attempts,
            self.settings.max_retries
        );
        Ok(Event::RetryCapture {
            after: self.settings.retry_delay,
        })
    }
}
