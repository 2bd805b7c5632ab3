// SPDX-License-Identifier: MPL-2.0
//! Compositing domain types.
//!
//! Pure coordinate math for the photo-booth editor:
//! - [`StageTransform`] / [`OverlayState`]: pan, zoom and overlay placement
//! - [`OverlayBox`]: overlay bounds in output pixels
//! - [`cover_fit_crop`]: the source rectangle captured into the output raster

pub mod crop;
pub mod geometry;

pub use crop::{cover_fit_crop, CropRect, SourceSize};
pub use geometry::{OverlayBox, OverlayState, ScreenRect, StageTransform, Viewport};
