// SPDX-License-Identifier: MPL-2.0
//! Stage and overlay geometry.
//!
//! Two coordinate spaces are involved:
//!
//! - **screen space**: pixels of the on-screen stage container, where pointer
//!   events arrive;
//! - **stage space**: unzoomed coordinates local to the stage, where the
//!   overlay position and size are stored.
//!
//! A stage-space point maps to screen space as `p * zoom + offset`.

use crate::domain::ui::newtypes::{ZoomPercent, ZoomStep};

/// Size of the on-screen stage container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    /// Whether the point lies inside the rectangle (edges included).
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.x + self.width && y >= self.y && y <= self.y + self.height
    }
}

/// Pan offset and zoom applied to the whole stage.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StageTransform {
    /// Horizontal pan offset in screen pixels.
    pub offset_x: f32,
    /// Vertical pan offset in screen pixels.
    pub offset_y: f32,
    pub zoom: ZoomPercent,
}

impl StageTransform {
    /// Current zoom as a multiplier.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.zoom.as_factor()
    }

    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    pub fn zoom_in(&mut self, step: ZoomStep) {
        self.zoom = self.zoom.zoom_in(step);
    }

    pub fn zoom_out(&mut self, step: ZoomStep) {
        self.zoom = self.zoom.zoom_out(step);
    }

    /// Maps a stage-space point to screen space.
    #[must_use]
    pub fn to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        let scale = self.scale();
        (x * scale + self.offset_x, y * scale + self.offset_y)
    }
}

/// Overlay position and size in unzoomed stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayState {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            w: 200.0,
            h: 200.0,
        }
    }
}

impl OverlayState {
    /// Initial placement for a freshly loaded overlay.
    ///
    /// Width is `width_fraction` of the viewport width (at least `min_width`),
    /// height follows the overlay's native aspect ratio, and the box is centered
    /// in the visible viewport for the given zoom.
    #[must_use]
    pub fn centered(
        viewport: Viewport,
        natural_width: u32,
        natural_height: u32,
        zoom: f32,
        width_fraction: f32,
        min_width: f32,
    ) -> Self {
        let w = (viewport.width * width_fraction).max(min_width);
        let aspect = if natural_width == 0 || natural_height == 0 {
            1.0
        } else {
            natural_width as f32 / natural_height as f32
        };
        let h = w / aspect;

        Self {
            x: viewport.width * 0.5 / zoom - w / 2.0,
            y: viewport.height * 0.5 / zoom - h / 2.0,
            w,
            h,
        }
    }

    /// Moves the overlay by a screen-space delta.
    ///
    /// The delta is divided by zoom so the overlay tracks the pointer 1:1.
    pub fn drag_by(&mut self, dx: f32, dy: f32, zoom: f32) {
        self.x += dx / zoom;
        self.y += dy / zoom;
    }

    /// Screen-space rectangle of the overlay under the given stage transform.
    #[must_use]
    pub fn screen_rect(&self, stage: &StageTransform) -> ScreenRect {
        let (x, y) = stage.to_screen(self.x, self.y);
        let scale = stage.scale();
        ScreenRect {
            x,
            y,
            width: self.w * scale,
            height: self.h * scale,
        }
    }
}

/// Overlay bounding box in output raster pixels, as sent to the server.
///
/// Always satisfies `x + w <= bounds width` and `y + h <= bounds height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl OverlayBox {
    /// Converts a screen rectangle into an integer box clamped to
    /// `bounds_width`×`bounds_height`, with edges no smaller than `min_edge`.
    #[must_use]
    pub fn from_screen_rect(
        rect: ScreenRect,
        bounds_width: u32,
        bounds_height: u32,
        min_edge: u32,
    ) -> Self {
        let (x, w) = fit_axis(rect.x, rect.width, bounds_width, min_edge);
        let (y, h) = fit_axis(rect.y, rect.height, bounds_height, min_edge);
        Self { x, y, w, h }
    }
}

fn fit_axis(position: f32, length: f32, bound: u32, min_edge: u32) -> (u32, u32) {
    let min_edge = min_edge.min(bound);
    let position = round_clamped(position, 0, bound - min_edge);
    let length = round_clamped(length, min_edge, bound - position);
    (position, length)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_clamped(value: f32, low: u32, high: u32) -> u32 {
    if value.is_nan() {
        return low;
    }
    let rounded = value.round();
    if rounded <= low as f32 {
        low
    } else if rounded >= high as f32 {
        high
    } else {
        rounded as u32
    }
}
