// SPDX-License-Identifier: MPL-2.0
//! Camera adapters.
//!
//! - [`NoCamera`]: used when the platform has no camera backend; every open
//!   request fails with [`CameraError::Unavailable`] so the editor shows its
//!   fallback message.
//! - [`StillCamera`]: a virtual camera that streams one fixed frame, optionally
//!   after a warm-up period during which it reports no frame data.

use crate::application::port::{Camera, CameraError, CameraStream, ReadyState};
use image_rs::RgbaImage;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Camera adapter for platforms without a capture backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCamera;

impl Camera for NoCamera {
    fn open(&mut self) -> Result<Box<dyn CameraStream>, CameraError> {
        Err(CameraError::Unavailable)
    }
}

/// Virtual camera serving a fixed frame.
#[derive(Debug, Clone)]
pub struct StillCamera {
    frame: RgbaImage,
    warmup_polls: u32,
    open_streams: Arc<AtomicU32>,
}

impl StillCamera {
    #[must_use]
    pub fn new(frame: RgbaImage) -> Self {
        Self {
            frame,
            warmup_polls: 0,
            open_streams: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Number of readiness polls answered with [`ReadyState::HaveMetadata`]
    /// before the frame becomes available.
    #[must_use]
    pub fn with_warmup(mut self, polls: u32) -> Self {
        self.warmup_polls = polls;
        self
    }

    /// Streams opened from this camera that have not been stopped yet.
    #[must_use]
    pub fn open_streams(&self) -> u32 {
        self.open_streams.load(Ordering::SeqCst)
    }
}

impl Camera for StillCamera {
    fn open(&mut self) -> Result<Box<dyn CameraStream>, CameraError> {
        self.open_streams.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StillStream {
            frame: self.frame.clone(),
            remaining_warmup: AtomicU32::new(self.warmup_polls),
            live: true,
            open_streams: Arc::clone(&self.open_streams),
        }))
    }
}

#[derive(Debug)]
struct StillStream {
    frame: RgbaImage,
    remaining_warmup: AtomicU32,
    live: bool,
    open_streams: Arc<AtomicU32>,
}

impl CameraStream for StillStream {
    fn ready_state(&self) -> ReadyState {
        if !self.live {
            return ReadyState::HaveNothing;
        }
        let remaining = self.remaining_warmup.load(Ordering::SeqCst);
        if remaining > 0 {
            self.remaining_warmup.store(remaining - 1, Ordering::SeqCst);
            ReadyState::HaveMetadata
        } else {
            ReadyState::HaveEnoughData
        }
    }

    fn current_frame(&mut self) -> Option<RgbaImage> {
        if self.live && self.remaining_warmup.load(Ordering::SeqCst) == 0 {
            Some(self.frame.clone())
        } else {
            None
        }
    }

    // A still frame looks the same frozen or playing.
    fn set_paused(&mut self, _paused: bool) {}

    fn stop(&mut self) {
        if self.live {
            self.live = false;
            self.open_streams.fetch_sub(1, Ordering::SeqCst);
        }
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::Rgba;

    #[test]
    fn no_camera_reports_unavailable() {
        let mut camera = NoCamera;
        assert_eq!(camera.open().unwrap_err(), CameraError::Unavailable);
    }

    #[test]
    fn still_camera_warms_up_then_serves_frame() {
        let mut camera = StillCamera::new(RgbaImage::from_pixel(4, 3, Rgba([1, 2, 3, 255])))
            .with_warmup(2);
        let mut stream = camera.open().expect("open");

        assert_eq!(stream.ready_state(), ReadyState::HaveMetadata);
        assert!(stream.current_frame().is_none());
        assert_eq!(stream.ready_state(), ReadyState::HaveMetadata);
        assert!(stream.ready_state().has_current_data());
        assert_eq!(stream.current_frame().map(|f| f.dimensions()), Some((4, 3)));
    }

    #[test]
    fn stopping_releases_the_stream_once() {
        let mut camera = StillCamera::new(RgbaImage::new(2, 2));
        let mut stream = camera.open().expect("open");
        assert_eq!(camera.open_streams(), 1);

        stream.stop();
        stream.stop();
        assert_eq!(camera.open_streams(), 0);
        assert!(!stream.is_live());
        assert_eq!(stream.ready_state(), ReadyState::HaveNothing);
    }
}
