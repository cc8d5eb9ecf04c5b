//! # Customization Controller
//!
//! One `Customizer` owns the whole state of a customization page: option
//! selections, design template, uploaded image(s), canvas, quantity and
//! custom text. All of it lives in this one struct and changes only through
//! the methods here, so the step-guard and reset rules are testable without
//! any host.
//!
//! Selection changes apply synchronously and the price is a pure derivation
//! ([`Customizer::quote`]) — there is no staleness window. Image ingestion
//! is asynchronous and last-write-wins: hosts call [`Customizer::begin_ingest`]
//! when a file arrives, decode off-thread, then [`Customizer::commit_ingest`]
//! with the token; stale or mistargeted results are discarded silently.

use serde::Serialize;

use crate::canvas::{self, CanvasState, PREVIEW_WIDTH};
use crate::catalog::{
    CatalogProduct, DesignTemplate, PrintSize, SelectionSet, TemplateKind,
};
use crate::collage::CollageBoard;
use crate::error::LienzoError;
use crate::ingest::{
    self, IngestSequencer, IngestTarget, IngestToken, QualityRating, RawUpload, UploadKind,
    UploadedImage,
};
use crate::order::{OrderGateway, OrderImage, OrderIntent, OrderReceipt, SelectedOption, SubmitMode};
use crate::pricing::{self, PriceBreakdown};
use crate::wizard::Step;

/// Image storage matching the current template: one image for all single
/// templates, a four-slot board for collage. Switching template families
/// swaps the store, which is what makes a mid-flight decode mistargeted.
#[derive(Debug, Clone)]
enum ImageStore {
    Single(Option<UploadedImage>),
    Collage(CollageBoard),
}

/// The page-level customization controller.
#[derive(Debug, Clone)]
pub struct Customizer {
    product: CatalogProduct,
    selections: SelectionSet,
    template: DesignTemplate,
    step: Step,
    quantity: u32,
    custom_text: String,
    images: ImageStore,
    canvas: Option<CanvasState>,
    sequencer: IngestSequencer,
}

impl Customizer {
    /// Start a new customization session for a product. Every dimension
    /// gets its default choice pre-selected; the wizard starts at the
    /// design step with the portrait template.
    pub fn new(product: CatalogProduct) -> Self {
        let selections = product.build_dimensions();
        let quantity = product.default_quantity.max(1);
        Self {
            product,
            selections,
            template: DesignTemplate::PORTRAIT,
            step: Step::Design,
            quantity,
            custom_text: String::new(),
            images: ImageStore::Single(None),
            canvas: None,
            sequencer: IngestSequencer::new(),
        }
    }

    // ── accessors ───────────────────────────────────────────────────────

    pub fn product(&self) -> &CatalogProduct {
        &self.product
    }

    pub fn selections(&self) -> &SelectionSet {
        &self.selections
    }

    pub fn template(&self) -> &DesignTemplate {
        &self.template
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn custom_text(&self) -> &str {
        &self.custom_text
    }

    pub fn canvas(&self) -> Option<&CanvasState> {
        self.canvas.as_ref()
    }

    /// The single uploaded image, when the current template holds one.
    pub fn single_image(&self) -> Option<&UploadedImage> {
        match &self.images {
            ImageStore::Single(img) => img.as_ref(),
            ImageStore::Collage(_) => None,
        }
    }

    /// The collage board, when the current template is collage.
    pub fn collage(&self) -> Option<&CollageBoard> {
        match &self.images {
            ImageStore::Collage(board) => Some(board),
            ImageStore::Single(_) => None,
        }
    }

    /// Physical print size of the selected size choice, for quality rating.
    pub fn target_print_size(&self) -> PrintSize {
        self.selections
            .get("size")
            .map(|d| PrintSize::parse_or_default(&d.selected_choice().label))
            .unwrap_or(PrintSize::DEFAULT)
    }

    /// Template-specific readiness: at least one collage slot, or the
    /// single image present.
    pub fn has_required_image(&self) -> bool {
        match &self.images {
            ImageStore::Single(img) => img.is_some(),
            ImageStore::Collage(board) => board.has_at_least_one_image(),
        }
    }

    // ── selections ──────────────────────────────────────────────────────

    /// Select a choice. A size change re-rates held images against the new
    /// target print size and rebuilds the canvas at the new frame.
    pub fn select(&mut self, dimension_id: &str, choice_id: &str) -> Result<(), LienzoError> {
        self.selections.select(dimension_id, choice_id)?;
        if dimension_id == "size" {
            let target = self.target_print_size();
            self.rerate_images(target);
            self.rebuild_canvas();
        }
        Ok(())
    }

    fn rerate_images(&mut self, target: PrintSize) {
        match &mut self.images {
            ImageStore::Single(Some(img)) => img.rerate(target),
            ImageStore::Single(None) => {}
            ImageStore::Collage(board) => {
                for img in board.images_mut() {
                    img.rerate(target);
                }
            }
        }
    }

    /// Change the design template.
    ///
    /// Destructive to the canvas: the old surface state is dropped and
    /// rebuilt. The held source image survives a change between single
    /// templates and is re-rendered into the new aspect ratio; crossing
    /// between single and collage swaps the image store, because the target
    /// data structure differs.
    pub fn set_template(&mut self, kind: TemplateKind) {
        let next = DesignTemplate::by_kind(kind);
        if next.kind == self.template.kind {
            return;
        }

        let crossing = next.is_collage() != self.template.is_collage();
        self.template = next;

        if crossing {
            self.images = if next.is_collage() {
                ImageStore::Collage(CollageBoard::new())
            } else {
                ImageStore::Single(None)
            };
        }
        self.rebuild_canvas();
    }

    /// Dispose and rebuild the canvas from the held image at the current
    /// template and frame dimensions. No image → no canvas.
    fn rebuild_canvas(&mut self) {
        self.canvas = match &self.images {
            ImageStore::Single(Some(img)) => Some(CanvasState::new(
                &self.template,
                PREVIEW_WIDTH,
                img.preview.width(),
                img.preview.height(),
            )),
            _ => None,
        };
    }

    pub fn set_quantity(&mut self, quantity: u32) -> Result<(), LienzoError> {
        if quantity < 1 {
            return Err(LienzoError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }
        self.quantity = quantity;
        Ok(())
    }

    pub fn set_custom_text(&mut self, text: &str) {
        self.custom_text = text.to_string();
    }

    // ── pricing ─────────────────────────────────────────────────────────

    /// Current itemized price. Pure derivation — recomputed on every call,
    /// never cached.
    pub fn quote(&self) -> PriceBreakdown {
        pricing::breakdown(&self.selections, self.product.base_price, self.quantity)
    }

    // ── ingestion ───────────────────────────────────────────────────────

    /// Register a new ingest for a target, superseding any in-flight ingest
    /// for the same target. Fails if the target does not match the current
    /// template family.
    pub fn begin_ingest(&mut self, target: IngestTarget) -> Result<IngestToken, LienzoError> {
        let collage = self.template.is_collage();
        match target {
            IngestTarget::Single if collage => Err(LienzoError::Validation(
                "The collage template takes photos per slot".to_string(),
            )),
            IngestTarget::Slot(_) if !collage => Err(LienzoError::Validation(
                "This template takes a single photo".to_string(),
            )),
            IngestTarget::Slot(index) if index >= crate::collage::SLOT_COUNT => {
                Err(LienzoError::Validation(format!(
                    "Collage slot {} does not exist",
                    index
                )))
            }
            _ => Ok(self.sequencer.begin(target)),
        }
    }

    /// Land a completed decode. Returns `Ok(true)` if the image was
    /// accepted, `Ok(false)` if it was stale or mistargeted and silently
    /// discarded — a later upload superseded it, or the template family
    /// changed while it was in flight.
    pub fn commit_ingest(
        &mut self,
        token: IngestToken,
        image: UploadedImage,
    ) -> Result<bool, LienzoError> {
        if !self.sequencer.is_current(token) {
            return Ok(false);
        }

        match (token.target(), &mut self.images) {
            (IngestTarget::Single, ImageStore::Single(slot)) => {
                *slot = Some(image);
                self.rebuild_canvas();
                Ok(true)
            }
            (IngestTarget::Slot(index), ImageStore::Collage(board)) => {
                board.set_slot(index, image)?;
                Ok(true)
            }
            // Template family changed while the decode was in flight
            _ => Ok(false),
        }
    }

    /// Synchronous single-photo upload: validate, decode and place in one
    /// call. Hosts with an async runtime should split this into
    /// `begin_ingest` / `ingest::ingest` / `commit_ingest` instead.
    ///
    /// Validation runs before a token is issued, so a rejected file never
    /// supersedes an in-flight decode.
    pub fn upload_photo(&mut self, upload: RawUpload) -> Result<(), LienzoError> {
        ingest::validate(&upload, UploadKind::Photo)?;
        let token = self.begin_ingest(IngestTarget::Single)?;
        let image = ingest::ingest_blocking(upload, UploadKind::Photo, self.target_print_size())?;
        self.commit_ingest(token, image)?;
        Ok(())
    }

    /// Synchronous collage-slot upload.
    pub fn upload_to_slot(&mut self, index: usize, upload: RawUpload) -> Result<(), LienzoError> {
        ingest::validate(&upload, UploadKind::Photo)?;
        let token = self.begin_ingest(IngestTarget::Slot(index))?;
        let image = ingest::ingest_blocking(upload, UploadKind::Photo, self.target_print_size())?;
        self.commit_ingest(token, image)?;
        Ok(())
    }

    /// Clear the single image and its canvas.
    pub fn clear_photo(&mut self) {
        if let ImageStore::Single(slot) = &mut self.images {
            *slot = None;
        }
        self.rebuild_canvas();
    }

    pub fn clear_slot(&mut self, index: usize) -> Result<(), LienzoError> {
        match &mut self.images {
            ImageStore::Collage(board) => board.clear_slot(index),
            ImageStore::Single(_) => Err(LienzoError::Validation(
                "This template has no collage slots".to_string(),
            )),
        }
    }

    pub fn clear_slots(&mut self) {
        if let ImageStore::Collage(board) = &mut self.images {
            board.clear_all();
        }
    }

    // ── canvas adjustments ──────────────────────────────────────────────

    fn canvas_mut(&mut self) -> Result<&mut CanvasState, LienzoError> {
        self.canvas.as_mut().ok_or_else(|| {
            LienzoError::Validation("Upload a photo before adjusting the canvas".to_string())
        })
    }

    pub fn zoom_in(&mut self) -> Result<(), LienzoError> {
        self.canvas_mut()?.zoom_in();
        Ok(())
    }

    pub fn zoom_out(&mut self) -> Result<(), LienzoError> {
        self.canvas_mut()?.zoom_out();
        Ok(())
    }

    pub fn rotate(&mut self) -> Result<(), LienzoError> {
        self.canvas_mut()?.rotate();
        Ok(())
    }

    // ── wizard ──────────────────────────────────────────────────────────

    /// Advance one step. The upload → preview transition is guarded on
    /// image presence; a rejection leaves the step unchanged.
    pub fn continue_step(&mut self) -> Result<Step, LienzoError> {
        self.step = self.step.advance(self.has_required_image())?;
        Ok(self.step)
    }

    /// Step backward. Never loses selections or uploaded images.
    pub fn back_step(&mut self) -> Step {
        self.step = self.step.back();
        self.step
    }

    // ── preview & submission ────────────────────────────────────────────

    /// Render the current preview as PNG: the canvas render for single
    /// templates, the 2×2 composite for collage.
    pub fn render_preview_png(&self) -> Result<Vec<u8>, LienzoError> {
        match &self.images {
            ImageStore::Single(Some(img)) => {
                let state = self.canvas.as_ref().ok_or_else(|| {
                    LienzoError::Decode("No canvas for the uploaded photo".to_string())
                })?;
                canvas::render_preview_png(&img.preview, state, self.template.overlay)
            }
            ImageStore::Single(None) => Err(LienzoError::Validation(
                "No photo uploaded yet".to_string(),
            )),
            ImageStore::Collage(board) => board.composite_png(PREVIEW_WIDTH / 2),
        }
    }

    /// Compose the outbound order payload from the current state.
    ///
    /// Single-image flows hand over the original uploaded bytes untouched;
    /// the collage flow hands over the generated composite.
    pub fn build_order_intent(&self) -> Result<OrderIntent, LienzoError> {
        if !self.has_required_image() {
            return Err(LienzoError::Validation(
                "Please upload a photo before ordering".to_string(),
            ));
        }
        if self.product.requires_text && self.custom_text.trim().is_empty() {
            return Err(LienzoError::Validation(
                "Please enter the personalization text".to_string(),
            ));
        }

        let image = match &self.images {
            ImageStore::Single(Some(img)) => OrderImage {
                filename: img.filename.clone(),
                content_type: img.content_type.clone(),
                bytes: img.bytes.clone(),
            },
            ImageStore::Collage(board) => OrderImage {
                filename: "collage.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: board.composite_png(PREVIEW_WIDTH / 2)?,
            },
            ImageStore::Single(None) => {
                return Err(LienzoError::Validation(
                    "Please upload a photo before ordering".to_string(),
                ));
            }
        };

        let quote = self.quote();
        let selections: Vec<SelectedOption> = self
            .selections
            .selected_labels()
            .into_iter()
            .map(|(dimension, choice)| SelectedOption { dimension, choice })
            .collect();

        let selected = |dimension_id: &str| {
            self.selections
                .get(dimension_id)
                .map(|d| d.selected_choice().label.clone())
        };
        let selected_size = selected("size");
        let selected_frame = selected("frame");
        let selected_thickness = selected("thickness");

        Ok(OrderIntent {
            product_id: self.product.id.clone(),
            product_name: self.product.name.clone(),
            category: self.product.category.clone(),
            quantity: self.quantity,
            unit_price: quote.unit_price,
            total_price: quote.total,
            selections,
            selected_size,
            selected_frame,
            selected_thickness,
            custom_text: if self.custom_text.trim().is_empty() {
                None
            } else {
                Some(self.custom_text.clone())
            },
            submitted_at: chrono::Utc::now(),
            image,
        })
    }

    /// Submit to the order collaborator. One attempt; a failure leaves all
    /// customization state intact (`&self` — nothing here can mutate it),
    /// so resubmission needs no re-entry.
    pub async fn submit(
        &self,
        gateway: &dyn OrderGateway,
        mode: SubmitMode,
    ) -> Result<OrderReceipt, LienzoError> {
        let intent = self.build_order_intent()?;
        gateway.submit(&intent, mode).await
    }

    // ── snapshots ───────────────────────────────────────────────────────

    /// Serializable view of the session for API responses.
    pub fn snapshot(&self) -> CustomizerSnapshot {
        let (single_image, slots) = match &self.images {
            ImageStore::Single(img) => (img.as_ref().map(ImageSummary::from), None),
            ImageStore::Collage(board) => {
                let slots = (0..crate::collage::SLOT_COUNT)
                    .map(|i| board.slot(i).map(ImageSummary::from))
                    .collect();
                (None, Some(slots))
            }
        };

        CustomizerSnapshot {
            product_id: self.product.id.clone(),
            step: self.step,
            template: self.template.kind,
            quantity: self.quantity,
            custom_text: self.custom_text.clone(),
            price: self.quote(),
            dimensions: self.selections.clone(),
            single_image,
            slots,
            canvas: self.canvas.clone(),
        }
    }
}

/// Uploaded-image metadata exposed in snapshots (never the bytes).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub filename: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub size_bytes: usize,
    pub quality: QualityRating,
}

impl From<&UploadedImage> for ImageSummary {
    fn from(img: &UploadedImage) -> Self {
        Self {
            filename: img.filename.clone(),
            pixel_width: img.pixel_width,
            pixel_height: img.pixel_height,
            size_bytes: img.size_bytes,
            quality: img.quality,
        }
    }
}

/// Serializable session state for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizerSnapshot {
    pub product_id: String,
    pub step: Step,
    pub template: TemplateKind,
    pub quantity: u32,
    pub custom_text: String,
    pub price: PriceBreakdown,
    pub dimensions: SelectionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_image: Option<ImageSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<Option<ImageSummary>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<CanvasState>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn png_upload(name: &str, width: u32, height: u32) -> RawUpload {
        let img = RgbImage::from_pixel(width, height, Rgb([120, 130, 140]));
        let mut out = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        RawUpload {
            filename: name.to_string(),
            content_type: Some("image/png".to_string()),
            bytes: out.into_inner(),
        }
    }

    fn decoded(name: &str, width: u32, height: u32) -> UploadedImage {
        ingest::ingest_blocking(
            png_upload(name, width, height),
            UploadKind::Photo,
            PrintSize::DEFAULT,
        )
        .unwrap()
    }

    fn customizer_with_photo() -> Customizer {
        let mut c = Customizer::new(CatalogProduct::default());
        c.upload_photo(png_upload("photo.png", 640, 480)).unwrap();
        c
    }

    // ── lifecycle ───────────────────────────────────────────────────────

    #[test]
    fn test_new_session_defaults() {
        let c = Customizer::new(CatalogProduct::default());
        assert_eq!(c.step(), Step::Design);
        assert_eq!(c.quantity(), 1);
        assert!(!c.has_required_image());
        assert!(c.canvas().is_none());
    }

    #[test]
    fn test_upload_builds_canvas_at_cover_scale() {
        let c = customizer_with_photo();
        let canvas = c.canvas().unwrap();
        assert!((canvas.scale() - canvas.cover_scale()).abs() < 1e-6);
    }

    #[test]
    fn test_clear_photo_drops_canvas() {
        let mut c = customizer_with_photo();
        c.clear_photo();
        assert!(!c.has_required_image());
        assert!(c.canvas().is_none());
    }

    // ── template changes ────────────────────────────────────────────────

    #[test]
    fn test_template_change_keeps_single_image() {
        let mut c = customizer_with_photo();
        c.set_template(TemplateKind::Landscape);
        // Source image retained, canvas rebuilt against the new aspect
        assert!(c.has_required_image());
        let canvas = c.canvas().unwrap();
        assert!((canvas.aspect_ratio() - 4.0 / 3.0).abs() < 1e-6);
        assert!((canvas.scale() - canvas.cover_scale()).abs() < 1e-6);
    }

    #[test]
    fn test_crossing_to_collage_resets_images() {
        let mut c = customizer_with_photo();
        c.set_template(TemplateKind::Collage);
        assert!(!c.has_required_image());
        assert!(c.collage().is_some());
        assert!(c.canvas().is_none());
    }

    #[test]
    fn test_same_template_is_a_no_op() {
        let mut c = customizer_with_photo();
        c.rotate().unwrap();
        c.set_template(TemplateKind::Portrait);
        // Canvas untouched — no rebuild happened
        assert_eq!(c.canvas().unwrap().rotation_degrees(), 90);
    }

    // ── ingestion races ─────────────────────────────────────────────────

    #[test]
    fn test_last_write_wins_when_first_finishes_last() {
        let mut c = Customizer::new(CatalogProduct::default());
        let token_a = c.begin_ingest(IngestTarget::Single).unwrap();
        let token_b = c.begin_ingest(IngestTarget::Single).unwrap();

        // B completes first and lands
        assert!(c.commit_ingest(token_b, decoded("b.png", 100, 100)).unwrap());
        // A completes later and is silently discarded
        assert!(!c.commit_ingest(token_a, decoded("a.png", 50, 50)).unwrap());

        assert_eq!(c.single_image().unwrap().filename, "b.png");
    }

    #[test]
    fn test_last_write_wins_when_first_finishes_first() {
        let mut c = Customizer::new(CatalogProduct::default());
        let token_a = c.begin_ingest(IngestTarget::Single).unwrap();
        let token_b = c.begin_ingest(IngestTarget::Single).unwrap();

        // A completes first but was already superseded
        assert!(!c.commit_ingest(token_a, decoded("a.png", 50, 50)).unwrap());
        assert!(c.commit_ingest(token_b, decoded("b.png", 100, 100)).unwrap());

        assert_eq!(c.single_image().unwrap().filename, "b.png");
    }

    #[test]
    fn test_template_change_discards_in_flight_decode() {
        let mut c = Customizer::new(CatalogProduct::default());
        let token = c.begin_ingest(IngestTarget::Single).unwrap();

        // Template family changes while the decode is in flight
        c.set_template(TemplateKind::Collage);
        assert!(!c.commit_ingest(token, decoded("late.png", 80, 80)).unwrap());
        assert!(!c.has_required_image());
    }

    #[test]
    fn test_rejected_upload_leaves_existing_image() {
        let mut c = customizer_with_photo();
        let bad = RawUpload {
            filename: "notes.txt".to_string(),
            content_type: Some("text/plain".to_string()),
            bytes: vec![0; 10],
        };
        assert!(c.upload_photo(bad).is_err());
        assert_eq!(c.single_image().unwrap().filename, "photo.png");
    }

    #[test]
    fn test_slot_target_requires_collage_template() {
        let mut c = Customizer::new(CatalogProduct::default());
        assert!(c.begin_ingest(IngestTarget::Slot(0)).is_err());
        c.set_template(TemplateKind::Collage);
        assert!(c.begin_ingest(IngestTarget::Slot(0)).is_ok());
        assert!(c.begin_ingest(IngestTarget::Single).is_err());
    }

    // ── size selection ──────────────────────────────────────────────────

    #[test]
    fn test_size_change_rerates_and_rebuilds() {
        let mut c = Customizer::new(CatalogProduct::default());
        c.upload_photo(png_upload("photo.png", 1100, 1100)).unwrap();
        // 1100px at 8x12in → min axis ≈ 91 DPI → Fair
        c.select("size", "8x12").unwrap();
        assert_eq!(c.single_image().unwrap().quality, QualityRating::Fair);

        c.zoom_in().unwrap();
        c.select("size", "20x30").unwrap();
        // Rebuilt: scale is back at cover-fit, rating drops with the
        // larger target
        let canvas = c.canvas().unwrap();
        assert!((canvas.scale() - canvas.cover_scale()).abs() < 1e-6);
        assert_eq!(c.single_image().unwrap().quality, QualityRating::Low);
    }

    // ── wizard flow ─────────────────────────────────────────────────────

    #[test]
    fn test_guarded_advancement() {
        let mut c = Customizer::new(CatalogProduct::default());
        c.continue_step().unwrap();
        assert_eq!(c.step(), Step::Upload);

        // No image yet — rejected, step unchanged
        assert!(c.continue_step().is_err());
        assert_eq!(c.step(), Step::Upload);

        c.upload_photo(png_upload("p.png", 200, 200)).unwrap();
        c.continue_step().unwrap();
        assert_eq!(c.step(), Step::Preview);
    }

    #[test]
    fn test_back_navigation_preserves_everything() {
        let mut c = Customizer::new(CatalogProduct::default());
        c.select("size", "12x18").unwrap();
        c.select("frame", "oak").unwrap();
        c.set_custom_text("For Mum");
        c.set_quantity(2).unwrap();
        c.upload_photo(png_upload("keep.png", 300, 300)).unwrap();
        c.continue_step().unwrap();
        c.continue_step().unwrap();
        assert_eq!(c.step(), Step::Preview);

        let total_before = c.quote().total;

        c.back_step();
        assert_eq!(c.step(), Step::Upload);
        c.continue_step().unwrap();
        assert_eq!(c.step(), Step::Preview);

        assert_eq!(c.quote().total, total_before);
        assert_eq!(c.custom_text(), "For Mum");
        assert_eq!(c.single_image().unwrap().filename, "keep.png");
    }

    // ── submission ──────────────────────────────────────────────────────

    #[test]
    fn test_order_intent_carries_original_bytes() {
        let upload = png_upload("original.png", 250, 250);
        let original_bytes = upload.bytes.clone();

        let mut c = Customizer::new(CatalogProduct::default());
        c.upload_photo(upload).unwrap();
        c.select("size", "12x18").unwrap();
        c.set_quantity(2).unwrap();

        let intent = c.build_order_intent().unwrap();
        assert_eq!(intent.image.bytes, original_bytes);
        assert_eq!(intent.unit_price, 1299 + 400);
        assert_eq!(intent.total_price, (1299 + 400) * 2);
        assert_eq!(intent.selection("Size"), Some("12x18"));
    }

    #[test]
    fn test_submit_requires_image() {
        let c = Customizer::new(CatalogProduct::default());
        assert!(matches!(
            c.build_order_intent().unwrap_err(),
            LienzoError::Validation(_)
        ));
    }

    #[test]
    fn test_submit_requires_text_when_product_demands_it() {
        let product = CatalogProduct {
            requires_text: true,
            ..Default::default()
        };
        let mut c = Customizer::new(product);
        c.upload_photo(png_upload("p.png", 100, 100)).unwrap();
        assert!(c.build_order_intent().is_err());

        c.set_custom_text("Happy Birthday");
        assert!(c.build_order_intent().is_ok());
    }

    #[test]
    fn test_collage_order_submits_composite() {
        let mut c = Customizer::new(CatalogProduct::default());
        c.set_template(TemplateKind::Collage);
        c.upload_to_slot(2, png_upload("slot.png", 120, 120)).unwrap();

        let intent = c.build_order_intent().unwrap();
        assert_eq!(intent.image.filename, "collage.png");
        assert_eq!(intent.image.content_type, "image/png");
        assert_eq!(&intent.image.bytes[1..4], b"PNG");
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let mut c = Customizer::new(CatalogProduct::default());
        assert!(c.set_quantity(0).is_err());
        assert!(c.set_quantity(3).is_ok());
        assert_eq!(c.quote().quantity, 3);
    }
}
