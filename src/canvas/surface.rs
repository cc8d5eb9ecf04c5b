//! Drawing-surface abstraction for the canvas pipeline.
//!
//! The render pipeline only needs a minimal surface contract, so the
//! cover-fit and placement math stays testable without a real rasterizer:
//! [`NullSurface`] records draw calls, [`RasterSurface`] rasterizes through
//! the `image` crate and exports PNG previews.

use image::{DynamicImage, Rgb, RgbImage, imageops::FilterType};

use super::Placement;
use crate::error::LienzoError;

/// Minimal drawing surface the render pipeline draws against.
///
/// Surfaces are created at fixed dimensions and disposed (dropped) rather
/// than resized; a frame-dimension change builds a new surface.
pub trait DrawSurface {
    fn dimensions(&self) -> (u32, u32);

    /// Fill the whole surface with a solid color.
    fn fill(&mut self, rgb: [u8; 3]);

    /// Fill an axis-aligned rectangle, clipped to the surface.
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, rgb: [u8; 3]);

    /// Draw an image scaled to the placement rectangle, clipped to the
    /// surface. The placement may extend past the edges — that is the
    /// normal cover-fit case.
    fn draw_image(&mut self, image: &DynamicImage, placement: Placement);
}

/// A real raster surface backed by an RGB buffer.
pub struct RasterSurface {
    pixels: RgbImage,
}

impl RasterSurface {
    /// Create a white surface of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        let mut pixels = RgbImage::new(width.max(1), height.max(1));
        for p in pixels.pixels_mut() {
            *p = Rgb([255, 255, 255]);
        }
        Self { pixels }
    }

    /// Consume the surface and return the raster.
    pub fn into_image(self) -> RgbImage {
        self.pixels
    }

    /// Encode the surface as PNG bytes.
    pub fn to_png(&self) -> Result<Vec<u8>, LienzoError> {
        let mut out = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(self.pixels.clone())
            .write_to(&mut out, image::ImageFormat::Png)
            .map_err(|e| LienzoError::Image(format!("Failed to encode PNG: {}", e)))?;
        Ok(out.into_inner())
    }
}

impl DrawSurface for RasterSurface {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn fill(&mut self, rgb: [u8; 3]) {
        for p in self.pixels.pixels_mut() {
            *p = Rgb(rgb);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, rgb: [u8; 3]) {
        let (sw, sh) = self.pixels.dimensions();
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x + width as i32).clamp(0, sw as i32) as u32;
        let y1 = (y + height as i32).clamp(0, sh as i32) as u32;
        for py in y0..y1 {
            for px in x0..x1 {
                self.pixels.put_pixel(px, py, Rgb(rgb));
            }
        }
    }

    fn draw_image(&mut self, image: &DynamicImage, placement: Placement) {
        if placement.width == 0 || placement.height == 0 {
            return;
        }

        let scaled = image
            .resize_exact(placement.width, placement.height, FilterType::Triangle)
            .to_rgb8();

        let (sw, sh) = self.pixels.dimensions();
        for (ix, iy, pixel) in scaled.enumerate_pixels() {
            let px = placement.x + ix as i32;
            let py = placement.y + iy as i32;
            if px >= 0 && py >= 0 && (px as u32) < sw && (py as u32) < sh {
                self.pixels.put_pixel(px as u32, py as u32, *pixel);
            }
        }
    }
}

/// A no-op surface that records draw calls for tests.
#[derive(Debug, Default)]
pub struct NullSurface {
    width: u32,
    height: u32,
    pub draws: Vec<Placement>,
    pub rects: Vec<(i32, i32, u32, u32)>,
    pub fills: usize,
}

impl NullSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }
}

impl DrawSurface for NullSurface {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, _rgb: [u8; 3]) {
        self.fills += 1;
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, _rgb: [u8; 3]) {
        self.rects.push((x, y, width, height));
    }

    fn draw_image(&mut self, _image: &DynamicImage, placement: Placement) {
        self.draws.push(placement);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_surface_starts_white() {
        let surface = RasterSurface::new(4, 4);
        let img = surface.into_image();
        assert_eq!(img.get_pixel(0, 0), &Rgb([255, 255, 255]));
        assert_eq!(img.get_pixel(3, 3), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_fill_rect_clips_to_surface() {
        let mut surface = RasterSurface::new(10, 10);
        // Rect extends past all edges; must not panic
        surface.fill_rect(-5, -5, 30, 30, [0, 0, 0]);
        let img = surface.into_image();
        assert_eq!(img.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(img.get_pixel(9, 9), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_draw_image_clips_overhang() {
        let mut surface = RasterSurface::new(10, 10);
        let red = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([200, 0, 0])));
        // Larger than the surface and offset negative — cover-fit overhang
        surface.draw_image(
            &red,
            Placement {
                x: -5,
                y: -5,
                width: 20,
                height: 20,
            },
        );
        let img = surface.into_image();
        assert_eq!(img.get_pixel(0, 0), &Rgb([200, 0, 0]));
        assert_eq!(img.get_pixel(9, 9), &Rgb([200, 0, 0]));
    }

    #[test]
    fn test_null_surface_records_draws() {
        let mut surface = NullSurface::new(100, 80);
        let img = DynamicImage::ImageRgb8(RgbImage::new(2, 2));
        surface.draw_image(
            &img,
            Placement {
                x: 1,
                y: 2,
                width: 3,
                height: 4,
            },
        );
        assert_eq!(surface.draws.len(), 1);
        assert_eq!(surface.draws[0].width, 3);
    }
}
