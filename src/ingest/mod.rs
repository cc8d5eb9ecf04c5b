//! # Image Ingestion
//!
//! Accepts a user-supplied image file, validates its type and size, decodes
//! pixel dimensions, and produces an [`UploadedImage`] carrying both the
//! untouched source bytes (handed to the order collaborator at submit) and a
//! decoded preview for canvas rendering.
//!
//! Validation failures reject without mutating any existing image. Decoding
//! runs off the request path on the blocking thread pool. Concurrent
//! re-ingestion is last-write-wins: results are keyed by a monotonically
//! increasing token from [`IngestSequencer`] and stale results are discarded
//! silently on arrival.

pub mod quality;

pub use quality::QualityRating;

use image::{DynamicImage, imageops::FilterType};

use crate::catalog::PrintSize;
use crate::error::LienzoError;

/// Maximum upload size for photo flows (10 MB).
pub const PHOTO_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Maximum upload size for logo flows (5 MB, a stricter collaborator limit).
pub const LOGO_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Preview images are pre-resized so the longest edge fits this bound,
/// keeping canvas rendering fast while leaving the original bytes untouched.
const PREVIEW_MAX_DIM: u32 = 1152;

/// Which upload flow a file arrives through. Flows differ only in their
/// size limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Photo,
    Logo,
}

impl UploadKind {
    #[inline]
    pub fn max_bytes(&self) -> usize {
        match self {
            UploadKind::Photo => PHOTO_MAX_BYTES,
            UploadKind::Logo => LOGO_MAX_BYTES,
        }
    }
}

/// A file as it arrives from the picker or drag-drop, before validation.
#[derive(Debug, Clone)]
pub struct RawUpload {
    pub filename: String,
    /// Content type as reported by the client, if any. Falls back to a
    /// filename-based guess when absent.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// One user-supplied photograph, validated and decoded.
///
/// `bytes` is the opaque source handle: it is carried by reference through
/// the pipeline and handed to the order emitter untouched, so no quality is
/// lost before final submission. `preview` is the decoded (and possibly
/// downscaled) image used for canvas rendering only.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub preview: DynamicImage,
    /// Original pixel dimensions, before any preview downscaling.
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub size_bytes: usize,
    pub quality: QualityRating,
}

impl UploadedImage {
    /// Recompute the quality rating against a new target print size.
    /// Called when the size selection changes.
    pub fn rerate(&mut self, target: PrintSize) {
        self.quality = QualityRating::rate(self.pixel_width, self.pixel_height, target);
    }
}

/// Validate an upload's type and size without decoding it.
///
/// The MIME type must begin with `image/`; when the client supplied no
/// content type, it is guessed from the filename. Oversized files are
/// rejected against the flow's limit.
pub fn validate(upload: &RawUpload, kind: UploadKind) -> Result<(), LienzoError> {
    let content_type = effective_content_type(upload);
    match content_type {
        Some(ct) if ct.starts_with("image/") => {}
        _ => {
            return Err(LienzoError::Validation(format!(
                "'{}' is not an image file. Please choose a JPG, PNG or HEIC photo",
                upload.filename
            )));
        }
    }

    let max = kind.max_bytes();
    if upload.bytes.len() > max {
        return Err(LienzoError::Validation(format!(
            "'{}' is too large ({:.1} MB). Maximum size is {} MB",
            upload.filename,
            upload.bytes.len() as f64 / (1024.0 * 1024.0),
            max / (1024 * 1024),
        )));
    }

    Ok(())
}

fn effective_content_type(upload: &RawUpload) -> Option<String> {
    if let Some(ct) = &upload.content_type {
        if !ct.is_empty() {
            return Some(ct.clone());
        }
    }
    mime_guess::from_path(&upload.filename)
        .first()
        .map(|m| m.essence_str().to_string())
}

/// Validate and decode an upload into an [`UploadedImage`].
///
/// Dimension decoding is CPU-bound and runs here synchronously; callers on
/// an async runtime should use [`ingest`] instead.
pub fn ingest_blocking(
    upload: RawUpload,
    kind: UploadKind,
    target: PrintSize,
) -> Result<UploadedImage, LienzoError> {
    validate(&upload, kind)?;

    let decoded = decode_image(&upload.bytes, &upload.filename)?;
    let pixel_width = decoded.width();
    let pixel_height = decoded.height();

    // Pre-resize for preview; the original bytes are kept as-is
    let preview = if pixel_width > PREVIEW_MAX_DIM || pixel_height > PREVIEW_MAX_DIM {
        let scale = PREVIEW_MAX_DIM as f32 / pixel_width.max(pixel_height) as f32;
        let new_width = (pixel_width as f32 * scale).round() as u32;
        let new_height = (pixel_height as f32 * scale).round() as u32;
        decoded.resize(new_width.max(1), new_height.max(1), FilterType::Triangle)
    } else {
        decoded
    };

    let content_type = effective_content_type(&upload).unwrap_or_else(|| "image/jpeg".to_string());
    let size_bytes = upload.bytes.len();

    Ok(UploadedImage {
        filename: upload.filename,
        content_type,
        bytes: upload.bytes,
        preview,
        pixel_width,
        pixel_height,
        size_bytes,
        quality: QualityRating::rate(pixel_width, pixel_height, target),
    })
}

/// Async ingest: validates inline, then decodes on the blocking pool so the
/// caller's task stays responsive while the file decodes.
pub async fn ingest(
    upload: RawUpload,
    kind: UploadKind,
    target: PrintSize,
) -> Result<UploadedImage, LienzoError> {
    validate(&upload, kind)?;
    tokio::task::spawn_blocking(move || ingest_blocking(upload, kind, target))
        .await
        .map_err(|e| LienzoError::Image(format!("Decode task failed: {}", e)))?
}

/// Decode image bytes, trying HEIC first when the magic bytes or filename
/// suggest it, then the standard formats.
pub fn decode_image(bytes: &[u8], filename: &str) -> Result<DynamicImage, LienzoError> {
    #[cfg(feature = "heif")]
    {
        let lower = filename.to_lowercase();
        if is_heic(bytes) || lower.ends_with(".heic") || lower.ends_with(".heif") {
            return decode_heic(bytes)
                .map_err(|e| LienzoError::Decode(format!("Failed to decode HEIC: {}", e)));
        }
    }

    image::load_from_memory(bytes)
        .map_err(|e| LienzoError::Decode(format!("Failed to decode '{}': {}", filename, e)))
}

/// Check if the data looks like a HEIC/HEIF file by examining magic bytes.
/// HEIC files have an "ftyp" box near the start with HEIC-related brand codes.
#[cfg(feature = "heif")]
fn is_heic(data: &[u8]) -> bool {
    if data.len() < 12 {
        return false;
    }

    if &data[4..8] != b"ftyp" {
        return false;
    }

    let brand = &data[8..12];
    matches!(
        brand,
        b"heic" | b"heix" | b"hevc" | b"hevx" | b"heim" | b"heis" | b"hevm" | b"hevs" | b"mif1"
            | b"msf1" | b"avif"
    )
}

/// Decode a HEIC/HEIF image using libheif.
#[cfg(feature = "heif")]
fn decode_heic(data: &[u8]) -> Result<DynamicImage, String> {
    use image::RgbImage;
    use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};

    let lib_heif = LibHeif::new();
    let ctx =
        HeifContext::read_from_bytes(data).map_err(|e| format!("Failed to read HEIC: {}", e))?;

    let handle = ctx
        .primary_image_handle()
        .map_err(|e| format!("Failed to get primary image: {}", e))?;

    let heif_image = lib_heif
        .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
        .map_err(|e| format!("Failed to decode HEIC image: {}", e))?;

    let planes = heif_image.planes();
    let interleaved = planes.interleaved.ok_or("No interleaved RGB data in HEIC")?;

    let width = heif_image.width();
    let height = heif_image.height();
    let stride = interleaved.stride;
    let data = interleaved.data;

    let mut rgb_image = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let offset = (y as usize * stride) + (x as usize * 3);
            if offset + 2 < data.len() {
                let r = data[offset];
                let g = data[offset + 1];
                let b = data[offset + 2];
                rgb_image.put_pixel(x, y, image::Rgb([r, g, b]));
            }
        }
    }

    Ok(DynamicImage::ImageRgb8(rgb_image))
}

// ============================================================================
// INGEST SEQUENCING
// ============================================================================

/// Where an in-flight ingest will land once decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestTarget {
    /// The single-image store (all non-collage templates).
    Single,
    /// One collage slot.
    Slot(usize),
}

/// Token identifying one ingest request against one target.
///
/// Tokens increase monotonically; a result may only be committed while its
/// token is still the newest issued for its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestToken {
    seq: u64,
    target: IngestTarget,
}

impl IngestToken {
    pub fn target(&self) -> IngestTarget {
        self.target
    }
}

/// Issues ingest tokens and answers whether a completed decode is still the
/// latest for its target.
///
/// There is no cancellation of in-flight decodes; a stale result is simply
/// discarded when it arrives. Targets sequence independently so concurrent
/// uploads to different collage slots do not invalidate each other.
#[derive(Debug, Clone, Default)]
pub struct IngestSequencer {
    counter: u64,
    latest_single: u64,
    latest_slot: [u64; 4],
}

impl IngestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a new ingest, superseding any in-flight ingest for
    /// the same target.
    pub fn begin(&mut self, target: IngestTarget) -> IngestToken {
        self.counter += 1;
        match target {
            IngestTarget::Single => self.latest_single = self.counter,
            IngestTarget::Slot(i) => self.latest_slot[i % 4] = self.counter,
        }
        IngestToken {
            seq: self.counter,
            target,
        }
    }

    /// Whether this token is still the newest issued for its target.
    pub fn is_current(&self, token: IngestToken) -> bool {
        let latest = match token.target {
            IngestTarget::Single => self.latest_single,
            IngestTarget::Slot(i) => self.latest_slot[i % 4],
        };
        token.seq == latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        use image::{Rgb, RgbImage};
        let mut img = RgbImage::new(width, height);
        for y in 0..height {
            for x in 0..width {
                img.put_pixel(x, y, Rgb([x as u8, y as u8, 128]));
            }
        }
        let mut out = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    fn upload(filename: &str, content_type: Option<&str>, bytes: Vec<u8>) -> RawUpload {
        RawUpload {
            filename: filename.to_string(),
            content_type: content_type.map(String::from),
            bytes,
        }
    }

    // ── validation ──────────────────────────────────────────────────────

    #[test]
    fn test_rejects_non_image_type() {
        let raw = upload("notes.txt", Some("text/plain"), vec![0u8; 100]);
        let err = validate(&raw, UploadKind::Photo).unwrap_err();
        assert!(matches!(err, LienzoError::Validation(_)));
    }

    #[test]
    fn test_guesses_type_from_filename() {
        let raw = upload("photo.jpg", None, vec![0u8; 100]);
        assert!(validate(&raw, UploadKind::Photo).is_ok());

        let raw = upload("archive.zip", None, vec![0u8; 100]);
        assert!(validate(&raw, UploadKind::Photo).is_err());
    }

    #[test]
    fn test_rejects_oversized_photo() {
        let raw = upload(
            "big.jpg",
            Some("image/jpeg"),
            vec![0u8; PHOTO_MAX_BYTES + 1],
        );
        assert!(validate(&raw, UploadKind::Photo).is_err());
    }

    #[test]
    fn test_logo_limit_is_stricter() {
        let bytes = vec![0u8; 6 * 1024 * 1024];
        let raw = upload("logo.png", Some("image/png"), bytes.clone());
        assert!(validate(&raw, UploadKind::Photo).is_ok());

        let raw = upload("logo.png", Some("image/png"), bytes);
        assert!(validate(&raw, UploadKind::Logo).is_err());
    }

    // ── decode ──────────────────────────────────────────────────────────

    #[test]
    fn test_ingest_decodes_dimensions() {
        let raw = upload("small.png", Some("image/png"), png_bytes(64, 48));
        let img = ingest_blocking(raw, UploadKind::Photo, PrintSize::DEFAULT).unwrap();
        assert_eq!(img.pixel_width, 64);
        assert_eq!(img.pixel_height, 48);
        assert_eq!(img.quality, QualityRating::Low);
    }

    #[test]
    fn test_ingest_keeps_original_bytes() {
        let bytes = png_bytes(32, 32);
        let raw = upload("photo.png", Some("image/png"), bytes.clone());
        let img = ingest_blocking(raw, UploadKind::Photo, PrintSize::DEFAULT).unwrap();
        assert_eq!(img.bytes, bytes);
        assert_eq!(img.size_bytes, bytes.len());
    }

    #[test]
    fn test_garbage_bytes_are_a_decode_error() {
        let raw = upload("broken.png", Some("image/png"), vec![1, 2, 3, 4]);
        let err = ingest_blocking(raw, UploadKind::Photo, PrintSize::DEFAULT).unwrap_err();
        assert!(matches!(err, LienzoError::Decode(_)));
    }

    #[test]
    fn test_rerate_follows_size_change() {
        let raw = upload("p.png", Some("image/png"), png_bytes(600, 900));
        let mut img = ingest_blocking(
            raw,
            UploadKind::Photo,
            PrintSize {
                width_in: 8.0,
                height_in: 12.0,
            },
        )
        .unwrap();
        assert_eq!(img.quality, QualityRating::Fair);

        img.rerate(PrintSize {
            width_in: 20.0,
            height_in: 30.0,
        });
        assert_eq!(img.quality, QualityRating::Low);
    }

    // ── sequencing ──────────────────────────────────────────────────────

    #[test]
    fn test_last_write_wins_regardless_of_finish_order() {
        let mut seq = IngestSequencer::new();
        let a = seq.begin(IngestTarget::Single);
        let b = seq.begin(IngestTarget::Single);

        // A finishes after B was issued — stale either way
        assert!(!seq.is_current(a));
        assert!(seq.is_current(b));
    }

    #[test]
    fn test_slots_sequence_independently() {
        let mut seq = IngestSequencer::new();
        let slot0 = seq.begin(IngestTarget::Slot(0));
        let slot1 = seq.begin(IngestTarget::Slot(1));

        // Uploading to slot 1 does not invalidate slot 0's in-flight decode
        assert!(seq.is_current(slot0));
        assert!(seq.is_current(slot1));

        let slot0_again = seq.begin(IngestTarget::Slot(0));
        assert!(!seq.is_current(slot0));
        assert!(seq.is_current(slot0_again));
    }

    #[test]
    fn test_single_and_slot_targets_are_distinct() {
        let mut seq = IngestSequencer::new();
        let single = seq.begin(IngestTarget::Single);
        seq.begin(IngestTarget::Slot(2));
        assert!(seq.is_current(single));
    }
}
