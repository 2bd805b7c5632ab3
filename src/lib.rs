// SPDX-License-Identifier: MPL-2.0
//! `snapbooth` is a photo-booth compositing client.
//!
//! A webcam stream or an uploaded picture is shown on a stage that can be
//! panned and zoomed, with a draggable overlay on top. Captures are rendered
//! at a fixed 1080×720 and either uploaded for server-side compositing or
//! composited locally. A paginated gallery with likes and comments rounds it
//! out.

#![doc(html_root_url = "https://docs.rs/snapbooth/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod media;
pub mod ui;

#[cfg(test)]
mod test_utils;
