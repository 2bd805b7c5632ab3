// SPDX-License-Identifier: MPL-2.0
//! Constructor, settings and read accessors for the editor facade.

use super::{OverlaySelection, StageSource, State};
use crate::config::{CompositeMode, Config, MIN_OVERLAY_WIDTH, OVERLAY_WIDTH_FRACTION};
use crate::config::{DEFAULT_CAPTURE_MAX_RETRIES, DEFAULT_STAGE_HEIGHT, DEFAULT_STAGE_WIDTH};
use crate::domain::compositing::{OverlayBox, OverlayState, StageTransform, Viewport};
use crate::domain::ui::ZoomStep;
use crate::infrastructure::http::Asset;
use crate::media::capture;
use crate::ui::notifications;
use crate::ui::state::{DragState, ZoomState};
use std::time::Duration;

/// Editor tunables resolved from the configuration file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorSettings {
    /// Size of the on-screen stage container.
    pub viewport: Viewport,
    pub zoom_step: ZoomStep,
    pub mode: CompositeMode,
    /// Delay between readiness retries for webcam captures.
    pub retry_delay: Duration,
    pub max_retries: u32,
    pub overlay_width_fraction: f32,
    pub min_overlay_width: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl EditorSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            viewport: Viewport::new(
                config.editor.stage_width.unwrap_or(DEFAULT_STAGE_WIDTH),
                config.editor.stage_height.unwrap_or(DEFAULT_STAGE_HEIGHT),
            ),
            zoom_step: config
                .editor
                .zoom_step
                .map(ZoomStep::new)
                .unwrap_or_default(),
            mode: config.capture.mode.unwrap_or_default(),
            retry_delay: config.capture.retry_delay(),
            max_retries: config
                .capture
                .max_retries
                .unwrap_or(DEFAULT_CAPTURE_MAX_RETRIES),
            overlay_width_fraction: OVERLAY_WIDTH_FRACTION,
            min_overlay_width: MIN_OVERLAY_WIDTH,
        }
    }
}

impl State {
    #[must_use]
    pub fn new(settings: EditorSettings) -> Self {
        Self {
            settings,
            stage: StageTransform::default(),
            overlay: OverlayState::default(),
            zoom: ZoomState::new(settings.zoom_step),
            drag: DragState::default(),
            source: None,
            webcam_unavailable: false,
            pending_upload: None,
            assets: Vec::new(),
            selection: None,
            snapped: false,
            uploading: false,
            capture_attempts: 0,
            thumbnails: Vec::new(),
            notifications: notifications::Manager::new(),
            auth_required: false,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    #[must_use]
    pub fn stage(&self) -> &StageTransform {
        &self.stage
    }

    #[must_use]
    pub fn overlay(&self) -> &OverlayState {
        &self.overlay
    }

    /// Overlay box a capture taken now would send to the server.
    #[must_use]
    pub fn overlay_box(&self) -> OverlayBox {
        capture::overlay_box(&self.overlay, &self.stage)
    }

    #[must_use]
    pub fn zoom_readout(&self) -> &str {
        self.zoom.readout()
    }

    #[must_use]
    pub fn source(&self) -> Option<&StageSource> {
        self.source.as_ref()
    }

    /// Text to show in place of the stage when the webcam could not be opened.
    #[must_use]
    pub fn fallback_message(&self) -> Option<&'static str> {
        (self.webcam_unavailable && self.source.is_none()).then_some(super::WEBCAM_FALLBACK_MESSAGE)
    }

    /// Whether "place image" is enabled.
    #[must_use]
    pub fn can_place_image(&self) -> bool {
        self.pending_upload.is_some()
    }

    #[must_use]
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    #[must_use]
    pub fn selection(&self) -> Option<&OverlaySelection> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn is_snapped(&self) -> bool {
        self.snapped
    }

    /// Whether the capture button is enabled.
    #[must_use]
    pub fn can_capture(&self) -> bool {
        !self.uploading
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    #[must_use]
    pub fn is_dragging_overlay(&self) -> bool {
        self.drag.is_dragging_overlay()
    }

    /// Paths of saved captures, newest first.
    #[must_use]
    pub fn thumbnails(&self) -> &[String] {
        &self.thumbnails
    }

    #[must_use]
    pub fn auth_required(&self) -> bool {
        self.auth_required
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut notifications::Manager {
        &mut self.notifications
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(EditorSettings::default())
    }
}
