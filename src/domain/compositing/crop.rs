// SPDX-License-Identifier: MPL-2.0
//! Cover-fit crop computation for the capture step.

use super::geometry::StageTransform;

/// Natural dimensions of a capture source (video frame or decoded image).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSize {
    pub width: u32,
    pub height: u32,
}

impl SourceSize {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Source-space rectangle that, scaled by `effective_scale`, fills the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRect {
    pub sx: f32,
    pub sy: f32,
    pub width: f32,
    pub height: f32,
    /// Source-to-output scale (cover-fit scale times stage zoom).
    pub effective_scale: f32,
}

/// Computes the source rectangle for an output of `target_width`×`target_height`.
///
/// 1. `fit = max(tw/sw, th/sh)` makes the source cover the target box.
/// 2. `effective = fit * zoom` composes the stage zoom on top.
/// 3. The crop is `tw/effective` × `th/effective`, centered on the source and
///    shifted by the stage pan converted into source pixels.
/// 4. The origin is clamped with `max(0, min(s - crop, origin))`, so a crop
///    larger than the source (zoom below 1) pins to the top-left corner.
#[must_use]
pub fn cover_fit_crop(
    source: SourceSize,
    target_width: u32,
    target_height: u32,
    stage: &StageTransform,
) -> CropRect {
    let sw = source.width as f32;
    let sh = source.height as f32;
    let tw = target_width as f32;
    let th = target_height as f32;

    let fit_scale = (tw / sw).max(th / sh);
    let effective_scale = fit_scale * stage.scale();
    let width = tw / effective_scale;
    let height = th / effective_scale;

    let sx = (sw - width) / 2.0 - stage.offset_x / effective_scale;
    let sy = (sh - height) / 2.0 - stage.offset_y / effective_scale;

    CropRect {
        sx: sx.min(sw - width).max(0.0),
        sy: sy.min(sh - height).max(0.0),
        width,
        height,
        effective_scale,
    }
}
