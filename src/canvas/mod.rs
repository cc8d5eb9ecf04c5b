//! # Canvas Render Pipeline
//!
//! Places an uploaded image onto a fixed-aspect-ratio drawing surface sized
//! to the selected design template. The image is always scaled to at least
//! cover-fit — `max(frame_w/img_w, frame_h/img_h)` with a small buffer so
//! rounding never leaves a visible gap at the frame edges — and centered on
//! both axes. Zoom and rotate adjust the placement from there.
//!
//! The canvas is transient: whenever the frame dimensions change (new size
//! selection or template), the old state is discarded and a new one is built
//! against the held image, re-running the cover-fit computation.

pub mod surface;

pub use surface::{DrawSurface, NullSurface, RasterSurface};

use image::DynamicImage;
use serde::Serialize;

use crate::catalog::{DesignTemplate, OverlayStyle};
use crate::error::LienzoError;

/// Safety buffer over the exact cover scale, guarding against rounding gaps
/// at the frame edges.
pub const COVER_BUFFER: f32 = 1.02;

/// Zoom multiplier per zoom-in step.
pub const ZOOM_IN_STEP: f32 = 1.1;

/// Zoom multiplier per zoom-out step.
pub const ZOOM_OUT_STEP: f32 = 0.9;

/// Default preview width in pixels; frame height follows the template's
/// aspect ratio.
pub const PREVIEW_WIDTH: u32 = 800;

/// Cover-fit scale: the smallest multiplier (plus buffer) at which a
/// `img_w`×`img_h` image fully covers a `frame_w`×`frame_h` frame.
#[inline]
pub fn cover_scale(frame_w: u32, frame_h: u32, img_w: u32, img_h: u32) -> f32 {
    let scale_x = frame_w as f32 / img_w.max(1) as f32;
    let scale_y = frame_h as f32 / img_h.max(1) as f32;
    scale_x.max(scale_y) * COVER_BUFFER
}

/// Where to blit the scaled image on the surface. The rectangle routinely
/// extends past the frame edges — the overhang is cropped, not a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Transient render parameters for the customization canvas.
///
/// Owned exclusively by one customizer; rebuilt (never mutated in place)
/// when the template or frame dimensions change.
#[derive(Debug, Clone, Serialize)]
pub struct CanvasState {
    frame_width: u32,
    frame_height: u32,
    aspect_ratio: f32,
    image_width: u32,
    image_height: u32,
    scale: f32,
    /// Running rotation in degrees, a multiple of 90. Not normalized —
    /// consumers take `rotation % 360` for the display transform.
    rotation_degrees: i32,
}

impl CanvasState {
    /// Build a canvas for an image under a template, starting at cover-fit
    /// scale and no rotation.
    pub fn new(
        template: &DesignTemplate,
        preview_width: u32,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        let (frame_width, frame_height) = template.frame_size(preview_width);
        let scale = cover_scale(frame_width, frame_height, image_width, image_height);
        Self {
            frame_width,
            frame_height,
            aspect_ratio: template.aspect_ratio,
            image_width,
            image_height,
            scale,
            rotation_degrees: 0,
        }
    }

    #[inline]
    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    #[inline]
    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    /// Quarter turns for the display transform, always 0–3.
    pub fn quarter_turns(&self) -> u8 {
        (self.rotation_degrees.rem_euclid(360) / 90) as u8
    }

    /// Image dimensions after applying the current rotation.
    fn rotated_image_dims(&self) -> (u32, u32) {
        if self.quarter_turns() % 2 == 1 {
            (self.image_height, self.image_width)
        } else {
            (self.image_width, self.image_height)
        }
    }

    /// The cover-fit floor for the current rotation.
    ///
    /// Zoom-out is not clamped to this floor (matching the source
    /// behavior); hosts that want to enforce it can compare against it.
    pub fn cover_scale(&self) -> f32 {
        let (w, h) = self.rotated_image_dims();
        cover_scale(self.frame_width, self.frame_height, w, h)
    }

    /// Zoom in by one step (×1.1). No upper bound.
    pub fn zoom_in(&mut self) {
        self.scale *= ZOOM_IN_STEP;
    }

    /// Zoom out by one step (×0.9). Not clamped at the cover-fit floor.
    pub fn zoom_out(&mut self) {
        self.scale *= ZOOM_OUT_STEP;
    }

    /// Rotate by 90°. The running total wraps conceptually at 360° but is
    /// stored unnormalized.
    pub fn rotate(&mut self) {
        self.rotation_degrees += 90;
    }

    /// Centered placement of the scaled, rotated image on the frame.
    pub fn placement(&self) -> Placement {
        let (rw, rh) = self.rotated_image_dims();
        let width = (rw as f32 * self.scale).round() as u32;
        let height = (rh as f32 * self.scale).round() as u32;
        Placement {
            x: (self.frame_width as i32 - width as i32) / 2,
            y: (self.frame_height as i32 - height as i32) / 2,
            width,
            height,
        }
    }
}

/// Render an image into a frame surface: rotate, scale, center, then draw
/// the template overlay on top.
///
/// The surface is written only on success — a failure leaves it untouched,
/// never a partial render.
pub fn render_to_surface(
    image: &DynamicImage,
    state: &CanvasState,
    surface: &mut dyn DrawSurface,
    overlay: OverlayStyle,
) -> Result<(), LienzoError> {
    let rotated = match state.quarter_turns() {
        1 => image.rotate90(),
        2 => image.rotate180(),
        3 => image.rotate270(),
        _ => image.clone(),
    };

    surface.draw_image(&rotated, state.placement());

    if overlay == OverlayStyle::DualBorder {
        draw_dual_border(surface);
    }

    Ok(())
}

/// Render a PNG preview of the image under the given canvas state.
pub fn render_preview_png(
    image: &DynamicImage,
    state: &CanvasState,
    overlay: OverlayStyle,
) -> Result<Vec<u8>, LienzoError> {
    let mut surface = RasterSurface::new(state.frame_width(), state.frame_height());
    render_to_surface(image, state, &mut surface, overlay)?;
    surface.to_png()
}

/// Inner white border ring for the dual-border template: four strips inset
/// from the frame edge.
fn draw_dual_border(surface: &mut dyn DrawSurface) {
    const WHITE: [u8; 3] = [255, 255, 255];
    let (w, h) = surface.dimensions();
    let inset = (w.min(h) / 14).max(4);
    let thickness = (w.min(h) / 70).max(2);

    let inner_w = w.saturating_sub(inset * 2);
    let inner_h = h.saturating_sub(inset * 2);
    let x = inset as i32;
    let y = inset as i32;

    // Top, bottom, left, right strips
    surface.fill_rect(x, y, inner_w, thickness, WHITE);
    surface.fill_rect(x, (y + inner_h as i32) - thickness as i32, inner_w, thickness, WHITE);
    surface.fill_rect(x, y, thickness, inner_h, WHITE);
    surface.fill_rect((x + inner_w as i32) - thickness as i32, y, thickness, inner_h, WHITE);
}
