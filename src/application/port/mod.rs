// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//!
//! # Available Ports
//!
//! - [`camera`]: Webcam acquisition, readiness, freeze and release
//! - [`booth`]: Photo-booth server operations
//!
//! # Design Notes
//!
//! - [`Camera`] has no `async fn`: permission prompts are resolved by the
//!   caller before the result is handed to the editor as a message
//! - [`BoothApi`] is async and driven from a single task

pub mod booth;
pub mod camera;

pub use booth::BoothApi;
pub use camera::{Camera, CameraError, CameraStream, ReadyState};
