//! # Collage Assembler
//!
//! Manages four independent image slots arranged in a 2×2 grid. Each slot is
//! uploaded and cleared on its own; the upload step is ready as soon as any
//! one slot is filled — deliberately more permissive than requiring all
//! four. Order submission renders the slots into a single composite raster,
//! with empty slots drawn as a neutral placeholder rather than omitted.

use image::{Rgb, RgbImage, imageops::FilterType};

use crate::error::LienzoError;
use crate::ingest::UploadedImage;

/// Number of collage positions — a fixed 2×2 grid.
pub const SLOT_COUNT: usize = 4;

/// Neutral placeholder color for empty slots in the composite.
const PLACEHOLDER: [u8; 3] = [230, 230, 230];

/// Gutter color between cells.
const GUTTER: [u8; 3] = [255, 255, 255];

/// The four collage slots. Slots are indexed 0–3, row-major:
///
/// ```text
/// ┌───┬───┐
/// │ 0 │ 1 │
/// ├───┼───┤
/// │ 2 │ 3 │
/// └───┴───┘
/// ```
#[derive(Debug, Clone, Default)]
pub struct CollageBoard {
    slots: [Option<UploadedImage>; SLOT_COUNT],
}

impl CollageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_index(index: usize) -> Result<(), LienzoError> {
        if index >= SLOT_COUNT {
            return Err(LienzoError::Validation(format!(
                "Collage slot {} does not exist (slots are 0-{})",
                index,
                SLOT_COUNT - 1
            )));
        }
        Ok(())
    }

    /// Place an image in a slot, discarding whatever the slot held before.
    pub fn set_slot(&mut self, index: usize, image: UploadedImage) -> Result<(), LienzoError> {
        Self::check_index(index)?;
        self.slots[index] = Some(image);
        Ok(())
    }

    /// Clear one slot without affecting the others.
    pub fn clear_slot(&mut self, index: usize) -> Result<(), LienzoError> {
        Self::check_index(index)?;
        self.slots[index] = None;
        Ok(())
    }

    /// Clear every slot.
    pub fn clear_all(&mut self) {
        self.slots = Default::default();
    }

    pub fn slot(&self, index: usize) -> Option<&UploadedImage> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Mutable access to every filled slot, for re-rating after a size
    /// change.
    pub fn images_mut(&mut self) -> impl Iterator<Item = &mut UploadedImage> {
        self.slots.iter_mut().filter_map(Option::as_mut)
    }

    /// Readiness predicate gating step advancement: true iff at least one
    /// slot holds an image.
    pub fn has_at_least_one_image(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Render the four slots into a single 2×2 composite raster.
    ///
    /// Each filled slot is cover-fit into its cell (scaled to fill, center
    /// cropped); empty slots are a flat placeholder. Thin gutters separate
    /// the cells.
    pub fn composite(&self, cell_size: u32) -> RgbImage {
        let cell = cell_size.max(1);
        let side = cell * 2;
        let mut out = RgbImage::from_pixel(side, side, Rgb(PLACEHOLDER));

        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(image) = slot {
                let rendered = image
                    .preview
                    .resize_to_fill(cell, cell, FilterType::Triangle)
                    .to_rgb8();
                let cx = (i as u32 % 2) * cell;
                let cy = (i as u32 / 2) * cell;
                image::imageops::replace(&mut out, &rendered, cx as i64, cy as i64);
            }
        }

        draw_gutters(&mut out, cell);
        out
    }

    /// Composite encoded as PNG, for order submission storage.
    pub fn composite_png(&self, cell_size: u32) -> Result<Vec<u8>, LienzoError> {
        let raster = self.composite(cell_size);
        let mut data = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(raster)
            .write_to(&mut data, image::ImageFormat::Png)
            .map_err(|e| LienzoError::Image(format!("Failed to encode collage: {}", e)))?;
        Ok(data.into_inner())
    }
}

/// White midlines between the four cells.
fn draw_gutters(out: &mut RgbImage, cell: u32) {
    let side = cell * 2;
    let thickness = (side / 200).max(2);
    let start = cell.saturating_sub(thickness / 2);

    for offset in 0..thickness {
        let line = (start + offset).min(side - 1);
        for i in 0..side {
            out.put_pixel(line, i, Rgb(GUTTER));
            out.put_pixel(i, line, Rgb(GUTTER));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PrintSize;
    use crate::ingest::{QualityRating, UploadedImage};
    use image::DynamicImage;

    fn solid_upload(rgb: [u8; 3]) -> UploadedImage {
        let preview = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 40, Rgb(rgb)));
        UploadedImage {
            filename: "slot.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0],
            preview,
            pixel_width: 40,
            pixel_height: 40,
            size_bytes: 1,
            quality: QualityRating::rate(40, 40, PrintSize::DEFAULT),
        }
    }

    // ── readiness ───────────────────────────────────────────────────────

    #[test]
    fn test_empty_board_is_not_ready() {
        let board = CollageBoard::new();
        assert!(!board.has_at_least_one_image());
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_ready_after_any_single_upload() {
        for index in 0..SLOT_COUNT {
            let mut board = CollageBoard::new();
            board.set_slot(index, solid_upload([10, 20, 30])).unwrap();
            assert!(board.has_at_least_one_image());
        }
    }

    #[test]
    fn test_clear_slot_leaves_others() {
        let mut board = CollageBoard::new();
        board.set_slot(0, solid_upload([1, 1, 1])).unwrap();
        board.set_slot(3, solid_upload([2, 2, 2])).unwrap();
        board.clear_slot(0).unwrap();
        assert!(board.slot(0).is_none());
        assert!(board.slot(3).is_some());
        assert!(board.has_at_least_one_image());
    }

    #[test]
    fn test_clear_all_empties_board() {
        let mut board = CollageBoard::new();
        board.set_slot(1, solid_upload([1, 1, 1])).unwrap();
        board.set_slot(2, solid_upload([2, 2, 2])).unwrap();
        board.clear_all();
        assert!(!board.has_at_least_one_image());
    }

    #[test]
    fn test_replacing_slot_discards_previous() {
        let mut board = CollageBoard::new();
        board.set_slot(0, solid_upload([1, 1, 1])).unwrap();
        board.set_slot(0, solid_upload([9, 9, 9])).unwrap();
        assert_eq!(board.filled_count(), 1);
        let held = board.slot(0).unwrap();
        assert_eq!(held.preview.to_rgb8().get_pixel(0, 0), &Rgb([9, 9, 9]));
    }

    #[test]
    fn test_out_of_range_slot_rejected() {
        let mut board = CollageBoard::new();
        assert!(board.set_slot(4, solid_upload([0, 0, 0])).is_err());
        assert!(board.clear_slot(7).is_err());
    }

    // ── composite ───────────────────────────────────────────────────────

    #[test]
    fn test_composite_places_each_slot_in_its_cell() {
        let mut board = CollageBoard::new();
        board.set_slot(0, solid_upload([200, 0, 0])).unwrap();
        board.set_slot(3, solid_upload([0, 0, 200])).unwrap();

        let cell = 50u32;
        let out = board.composite(cell);
        assert_eq!(out.dimensions(), (100, 100));

        // Sample well inside each cell, away from gutters
        assert_eq!(out.get_pixel(10, 10), &Rgb([200, 0, 0]));
        assert_eq!(out.get_pixel(90, 90), &Rgb([0, 0, 200]));
        // Empty cells keep the neutral placeholder
        assert_eq!(out.get_pixel(90, 10), &Rgb(PLACEHOLDER));
        assert_eq!(out.get_pixel(10, 90), &Rgb(PLACEHOLDER));
    }

    #[test]
    fn test_composite_draws_gutters() {
        let board = CollageBoard::new();
        let out = board.composite(50);
        assert_eq!(out.get_pixel(50, 10), &Rgb(GUTTER));
        assert_eq!(out.get_pixel(10, 50), &Rgb(GUTTER));
    }

    #[test]
    fn test_composite_png_encodes() {
        let mut board = CollageBoard::new();
        board.set_slot(0, solid_upload([5, 5, 5])).unwrap();
        let png = board.composite_png(32).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
