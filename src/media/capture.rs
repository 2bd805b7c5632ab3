// SPDX-License-Identifier: MPL-2.0
//! Rasterises the editor stage into the fixed-size output image.
//!
//! The base layer is the cover-fit crop of the source (see
//! [`cover_fit_crop`]) scaled into a transparent
//! [`OUTPUT_WIDTH`]×[`OUTPUT_HEIGHT`] canvas. What happens to the overlay
//! depends on the compositing mode:
//!
//! - server: only its integer [`OverlayBox`] is sent along with the base PNG;
//! - client: its raster is drawn onto the canvas at its on-screen box, scaled
//!   from viewport pixels to output pixels.

use crate::config::{MIN_OVERLAY_BOX, OUTPUT_HEIGHT, OUTPUT_WIDTH};
use crate::domain::compositing::{
    cover_fit_crop, CropRect, OverlayBox, OverlayState, ScreenRect, SourceSize, StageTransform,
    Viewport,
};
use crate::media::image::encode_png;
use image_rs::imageops::{self, FilterType};
use image_rs::RgbaImage;
use std::fmt;
use std::ops::Range;

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// No overlay asset is selected (or its id is invalid).
    NoAssetSelected,
    /// The stage has neither a webcam stream nor an uploaded image.
    NoSource,
    /// The selected overlay image has not finished loading.
    OverlayNotLoaded,
    /// The source has zero width or height.
    EmptySource,
    /// The webcam never reached the "current data" readiness.
    SourceNotReady { attempts: u32 },
    /// PNG encoding failed.
    Encode(String),
}

impl CaptureError {
    /// Message shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            CaptureError::NoAssetSelected => "Please select a superposable image first".into(),
            CaptureError::NoSource => "No image source available".into(),
            CaptureError::OverlayNotLoaded => "The overlay image is still loading".into(),
            CaptureError::EmptySource => "The image source has no pixels".into(),
            CaptureError::SourceNotReady { .. } => "The webcam is not ready yet".into(),
            CaptureError::Encode(_) => "Failed to create image".into(),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::SourceNotReady { attempts } => {
                write!(f, "webcam not ready after {attempts} attempts")
            }
            CaptureError::Encode(msg) => write!(f, "PNG encoding failed: {msg}"),
            other => write!(f, "{}", other.user_message()),
        }
    }
}

impl std::error::Error for CaptureError {}

// =============================================================================
// Outputs
// =============================================================================

/// Payload of `POST /api/compose`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeUpload {
    /// PNG of the base layer.
    pub png: Vec<u8>,
    pub asset_id: u64,
    /// Where the server should draw the overlay, in output pixels.
    pub overlay: OverlayBox,
}

/// Everything the capture step needs to know about the stage.
#[derive(Debug, Clone, Copy)]
pub struct StageSnapshot<'a> {
    pub source: &'a RgbaImage,
    pub stage: &'a StageTransform,
    pub overlay: &'a OverlayState,
    pub viewport: Viewport,
}

// =============================================================================
// Rendering
// =============================================================================

/// Draws the cover-fit crop of `source` into a transparent output canvas.
///
/// Each output pixel is mapped back into the source and sampled bilinearly,
/// so the work and memory stay bounded by the output size whatever the zoom.
/// Output pixels that map outside the source stay transparent.
///
/// # Errors
///
/// Returns [`CaptureError::EmptySource`] for a zero-sized source.
pub fn render_base(
    source: &RgbaImage,
    stage: &StageTransform,
) -> Result<(RgbaImage, CropRect), CaptureError> {
    let size = SourceSize::new(source.width(), source.height());
    if size.is_empty() {
        return Err(CaptureError::EmptySource);
    }

    let crop = cover_fit_crop(size, OUTPUT_WIDTH, OUTPUT_HEIGHT, stage);
    log::debug!(
        "Capture crop sx={:.1} sy={:.1} w={:.1} h={:.1} scale={:.3}",
        crop.sx,
        crop.sy,
        crop.width,
        crop.height,
        crop.effective_scale
    );

    let mut canvas = RgbaImage::new(OUTPUT_WIDTH, OUTPUT_HEIGHT);
    let scale = crop.effective_scale;
    if !(scale.is_finite() && scale > 0.0) {
        return Ok((canvas, crop));
    }

    let columns = covered_span(crop.sx, scale, size.width, OUTPUT_WIDTH);
    let rows = covered_span(crop.sy, scale, size.height, OUTPUT_HEIGHT);
    let max_x = (size.width - 1) as f32;
    let max_y = (size.height - 1) as f32;

    for dy in rows {
        let v = source_coord(crop.sy, scale, dy).clamp(0.0, max_y);
        for dx in columns.clone() {
            let u = source_coord(crop.sx, scale, dx).clamp(0.0, max_x);
            if let Some(pixel) = imageops::interpolate_bilinear(source, u, v) {
                canvas.put_pixel(dx, dy, pixel);
            }
        }
    }

    Ok((canvas, crop))
}

/// Source coordinate sampled by output pixel `index`, in pixel-centre space.
fn source_coord(start: f32, scale: f32, index: u32) -> f32 {
    start + (index as f32 + 0.5) / scale - 0.5
}

/// Output pixels whose centres land inside `[0, limit)` of the source.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn covered_span(start: f32, scale: f32, limit: u32, output: u32) -> Range<u32> {
    let first = (-start * scale - 0.5).ceil().max(0.0);
    let end = ((limit as f32 - start) * scale - 0.5).ceil().min(output as f32);
    if end <= first {
        return 0..0;
    }
    first as u32..end as u32
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_pixels(value: f32) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

/// Overlay box sent with a server-side composite.
#[must_use]
pub fn overlay_box(overlay: &OverlayState, stage: &StageTransform) -> OverlayBox {
    OverlayBox::from_screen_rect(
        overlay.screen_rect(stage),
        OUTPUT_WIDTH,
        OUTPUT_HEIGHT,
        MIN_OVERLAY_BOX,
    )
}

/// Draws `overlay` onto `canvas` at `rect`, mapping viewport pixels to output pixels.
pub fn composite_overlay(
    canvas: &mut RgbaImage,
    overlay: &RgbaImage,
    rect: ScreenRect,
    viewport: Viewport,
) {
    let ratio_x = output_ratio(canvas.width(), viewport.width);
    let ratio_y = output_ratio(canvas.height(), viewport.height);

    let w = to_pixels(rect.width * ratio_x);
    let h = to_pixels(rect.height * ratio_y);
    if w == 0 || h == 0 || overlay.width() == 0 || overlay.height() == 0 {
        return;
    }

    let scaled = imageops::resize(overlay, w, h, FilterType::Triangle);
    let x = (rect.x * ratio_x).round() as i64;
    let y = (rect.y * ratio_y).round() as i64;
    imageops::overlay(canvas, &scaled, x, y);
}

fn output_ratio(output: u32, viewport: f32) -> f32 {
    if viewport > 0.0 {
        output as f32 / viewport
    } else {
        1.0
    }
}

/// Captures for server-side compositing: base PNG plus overlay box.
///
/// # Errors
///
/// Fails on an empty source or if encoding fails.
pub fn capture_for_server(
    snapshot: StageSnapshot<'_>,
    asset_id: u64,
) -> Result<ComposeUpload, CaptureError> {
    let (canvas, _) = render_base(snapshot.source, snapshot.stage)?;
    let png = encode_png(&canvas).map_err(|e| CaptureError::Encode(e.to_string()))?;
    let overlay = overlay_box(snapshot.overlay, snapshot.stage);
    log::debug!("Overlay box {overlay:?}");
    Ok(ComposeUpload {
        png,
        asset_id,
        overlay,
    })
}

/// Captures with the overlay composited locally; returns the final PNG.
///
/// # Errors
///
/// Fails on an empty source or if encoding fails.
pub fn capture_composited(
    snapshot: StageSnapshot<'_>,
    overlay_image: &RgbaImage,
) -> Result<Vec<u8>, CaptureError> {
    let (mut canvas, _) = render_base(snapshot.source, snapshot.stage)?;
    let rect = snapshot.overlay.screen_rect(snapshot.stage);
    composite_overlay(&mut canvas, overlay_image, rect, snapshot.viewport);
    encode_png(&canvas).map_err(|e| CaptureError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ui::ZoomPercent;
    use crate::media::image::decode_rgba;
    use image_rs::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn stage(offset_x: f32, offset_y: f32, zoom_percent: f32) -> StageTransform {
        StageTransform {
            offset_x,
            offset_y,
            zoom: ZoomPercent::new(zoom_percent),
        }
    }

    #[test]
    fn base_layer_always_has_output_size() {
        for (w, h) in [(1920, 1080), (640, 480), (300, 900), (1, 1)] {
            let source = RgbaImage::from_pixel(w, h, RED);
            let (canvas, _) = render_base(&source, &stage(0.0, 0.0, 100.0)).expect("render");
            assert_eq!(canvas.dimensions(), (OUTPUT_WIDTH, OUTPUT_HEIGHT));
        }
    }

    #[test]
    fn cover_fit_fills_the_whole_canvas() {
        let source = RgbaImage::from_pixel(1920, 1080, RED);
        let (canvas, _) = render_base(&source, &stage(35.0, -12.0, 130.0)).expect("render");
        assert_eq!(canvas.get_pixel(0, 0), &RED);
        assert_eq!(canvas.get_pixel(OUTPUT_WIDTH - 1, OUTPUT_HEIGHT - 1), &RED);
    }

    #[test]
    fn zoomed_out_capture_leaves_transparent_margin() {
        let source = RgbaImage::from_pixel(1080, 720, RED);
        let (canvas, crop) = render_base(&source, &stage(0.0, 0.0, 50.0)).expect("render");
        assert_eq!(crop.sx, 0.0);
        assert_eq!(canvas.get_pixel(10, 10), &RED);
        assert_eq!(canvas.get_pixel(1000, 700)[3], 0);
    }

    #[test]
    fn crop_selects_the_panned_region() {
        // Left half red, right half blue; panning left by half the
        // source width shows the blue half.
        let mut source = RgbaImage::from_pixel(2160, 720, RED);
        for x in 1080..2160 {
            for y in 0..720 {
                source.put_pixel(x, y, BLUE);
            }
        }
        let (canvas, crop) = render_base(&source, &stage(-540.0, 0.0, 100.0)).expect("render");
        assert_eq!(crop.sx, 1080.0);
        assert_eq!(canvas.get_pixel(540, 360), &BLUE);
    }

    #[test]
    fn tiny_source_at_high_zoom_fills_only_the_output() {
        let source = RgbaImage::from_pixel(1, 1, RED);
        for zoom in [800.0, 100_000.0] {
            let (canvas, crop) = render_base(&source, &stage(0.0, 0.0, zoom)).expect("render");
            assert!(crop.effective_scale >= 8640.0);
            assert_eq!(canvas.dimensions(), (OUTPUT_WIDTH, OUTPUT_HEIGHT));
            assert_eq!(canvas.get_pixel(0, 0), &RED);
            assert_eq!(canvas.get_pixel(OUTPUT_WIDTH - 1, OUTPUT_HEIGHT - 1), &RED);
        }
    }

    #[test]
    fn covered_span_is_clipped_to_the_output() {
        assert_eq!(covered_span(0.0, 8640.0, 1, OUTPUT_WIDTH), 0..OUTPUT_WIDTH);
        assert_eq!(covered_span(0.0, 0.5, 1080, OUTPUT_WIDTH), 0..540);
        assert_eq!(covered_span(-10.0, 1.0, 20, OUTPUT_WIDTH), 10..30);
        assert_eq!(covered_span(30.0, 1.0, 20, OUTPUT_WIDTH), 0..0);
    }

    #[test]
    fn empty_source_is_refused() {
        let source = RgbaImage::new(0, 0);
        assert_eq!(
            render_base(&source, &stage(0.0, 0.0, 100.0)).unwrap_err(),
            CaptureError::EmptySource
        );
    }

    #[test]
    fn server_capture_reports_overlay_box() {
        let source = RgbaImage::from_pixel(1920, 1080, RED);
        let stage = stage(50.0, -20.0, 150.0);
        let overlay = OverlayState {
            x: 100.0,
            y: 40.0,
            w: 200.0,
            h: 100.0,
        };
        let upload = capture_for_server(
            StageSnapshot {
                source: &source,
                stage: &stage,
                overlay: &overlay,
                viewport: Viewport::new(1080.0, 720.0),
            },
            7,
        )
        .expect("capture");

        assert_eq!(upload.asset_id, 7);
        assert_eq!(
            upload.overlay,
            OverlayBox {
                x: 200,
                y: 40,
                w: 300,
                h: 150
            }
        );
        let decoded = decode_rgba(&upload.png).expect("png");
        assert_eq!(decoded.dimensions(), (1080, 720));
    }

    #[test]
    fn client_capture_draws_overlay_scaled_to_output() {
        let source = RgbaImage::from_pixel(1080, 720, RED);
        let overlay_image = RgbaImage::from_pixel(10, 10, BLUE);
        let stage = stage(0.0, 0.0, 100.0);
        let overlay = OverlayState {
            x: 100.0,
            y: 50.0,
            w: 100.0,
            h: 50.0,
        };
        // Half-size viewport: every screen pixel covers two output pixels.
        let png = capture_composited(
            StageSnapshot {
                source: &source,
                stage: &stage,
                overlay: &overlay,
                viewport: Viewport::new(540.0, 360.0),
            },
            &overlay_image,
        )
        .expect("capture");

        let canvas = decode_rgba(&png).expect("png");
        assert_eq!(canvas.get_pixel(250, 120), &BLUE);
        assert_eq!(canvas.get_pixel(150, 120), &RED);
        assert_eq!(canvas.get_pixel(250, 250), &RED);
    }

    #[test]
    fn overlay_outside_canvas_is_clipped() {
        let mut canvas = RgbaImage::from_pixel(100, 100, RED);
        let overlay = RgbaImage::from_pixel(4, 4, BLUE);
        let rect = ScreenRect {
            x: 90.0,
            y: -5.0,
            width: 20.0,
            height: 20.0,
        };
        composite_overlay(&mut canvas, &overlay, rect, Viewport::new(100.0, 100.0));
        assert_eq!(canvas.get_pixel(95, 5), &BLUE);
        assert_eq!(canvas.get_pixel(85, 5), &RED);
    }

    #[test]
    fn precondition_messages() {
        assert_eq!(
            CaptureError::NoAssetSelected.user_message(),
            "Please select a superposable image first"
        );
        assert_eq!(
            CaptureError::NoSource.to_string(),
            "No image source available"
        );
    }
}
