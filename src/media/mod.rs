// SPDX-License-Identifier: MPL-2.0
//! Pixel work: decoding, validation of uploads, and capture rendering.

pub mod capture;
pub mod image;
pub mod validation;

pub use capture::{CaptureError, ComposeUpload, StageSnapshot};
pub use image::{decode_rgba, encode_png, load_rgba};
pub use validation::{validate_candidate, UploadCandidate, ValidationError};
