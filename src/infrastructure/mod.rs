// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! - [`camera`]: implementations of the [`Camera`] port
//! - [`http`]: REST client for the photo-booth server
//!
//! [`Camera`]: crate::application::port::Camera

pub mod camera;
pub mod http;

pub use camera::{NoCamera, StillCamera};
pub use http::{ApiClient, ApiError};
