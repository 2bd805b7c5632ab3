// SPDX-License-Identifier: MPL-2.0
//! Session driver: runs editor events against a camera and the server.
//!
//! The editor only describes side effects. [`Session::dispatch`] performs
//! them one at a time and feeds each result back as a message until the
//! editor has nothing left to do.

use crate::application::port::{BoothApi, Camera};
use crate::error::{Error, Result};
use crate::infrastructure::http::ApiError;
use crate::media::decode_rgba;
use crate::media::validation::UploadCandidate;
use crate::ui::editor::{
    self, CaptureMessage, EditorSettings, Event, Message, OverlayMessage, SourceMessage,
};
use image_rs::RgbaImage;
use std::collections::VecDeque;

/// What a dispatched message ultimately produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing left to report; check the editor notifications.
    Idle,
    /// The server stored a capture at `path`.
    Uploaded { path: String },
    /// A locally composited PNG.
    Composed { png: Vec<u8> },
}

/// An editor bound to a camera and a server.
#[derive(Debug)]
pub struct Session<C, A> {
    editor: editor::State,
    camera: C,
    api: A,
}

impl<C: Camera, A: BoothApi> Session<C, A> {
    pub fn new(settings: EditorSettings, camera: C, api: A) -> Self {
        Self {
            editor: editor::State::new(settings),
            camera,
            api,
        }
    }

    #[must_use]
    pub fn editor(&self) -> &editor::State {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut editor::State {
        &mut self.editor
    }

    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Loads the asset list and the user's previous captures.
    pub async fn start(&mut self) -> Result<()> {
        let assets = self.api.list_assets().await;
        self.dispatch(OverlayMessage::AssetsLoaded(assets)).await?;
        let images = self.api.user_images().await;
        self.dispatch(CaptureMessage::PreviousImagesLoaded(images))
            .await?;
        Ok(())
    }

    pub async fn open_webcam(&mut self) -> Result<Outcome> {
        self.dispatch(SourceMessage::WebcamRequested).await
    }

    /// Validates an uploaded file and places it on the stage.
    pub async fn place_upload(&mut self, candidate: UploadCandidate) -> Result<Outcome> {
        self.dispatch(SourceMessage::UploadChosen(candidate))
            .await?;
        self.dispatch(SourceMessage::PlaceImage).await
    }

    pub async fn select_asset(&mut self, asset_id: u64) -> Result<Outcome> {
        self.dispatch(OverlayMessage::Select(asset_id)).await
    }

    pub async fn capture(&mut self) -> Result<Outcome> {
        self.dispatch(CaptureMessage::Requested).await
    }

    /// Feeds `message` to the editor and performs every resulting side effect.
    ///
    /// Fails only when the server rejects the session; every other failure
    /// ends up as an editor notification.
    pub async fn dispatch(&mut self, message: impl Into<Message>) -> Result<Outcome> {
        let mut queue = VecDeque::from([message.into()]);
        let mut outcome = Outcome::Idle;

        while let Some(message) = queue.pop_front() {
            match self.editor.update(message) {
                Event::None => {}
                Event::OpenWebcam => {
                    let message = match self.camera.open() {
                        Ok(stream) => SourceMessage::WebcamOpened(stream),
                        Err(err) => SourceMessage::WebcamFailed(err),
                    };
                    queue.push_back(message.into());
                }
                Event::LoadOverlay { asset_id, path } => {
                    let result = self.load_overlay(&path).await;
                    queue.push_back(OverlayMessage::Loaded { asset_id, result }.into());
                }
                Event::Upload(upload) => {
                    log::debug!(
                        "Uploading capture for asset {} with box {:?}",
                        upload.asset_id,
                        upload.overlay
                    );
                    let result = self.api.compose(&upload).await;
                    if let Ok(path) = &result {
                        outcome = Outcome::Uploaded { path: path.clone() };
                    }
                    queue.push_back(CaptureMessage::Uploaded(result).into());
                }
                Event::Composed { png } => outcome = Outcome::Composed { png },
                Event::RetryCapture { after } => {
                    tokio::time::sleep(after).await;
                    queue.push_back(CaptureMessage::Requested.into());
                }
                Event::AuthRequired => return Err(Error::Api(ApiError::AuthRequired)),
            }
        }

        Ok(outcome)
    }

    async fn load_overlay(&self, path: &str) -> std::result::Result<RgbaImage, String> {
        let bytes = self
            .api
            .fetch_bytes(path)
            .await
            .map_err(|err| err.to_string())?;
        decode_rgba(&bytes).map_err(|err| err.to_string())
    }
}
