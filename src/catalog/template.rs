//! # Design Templates
//!
//! A design template is a named aspect-ratio/layout preset that gates the
//! canvas dimensions for the customization preview.
//!
//! | Template | Aspect (w/h) | Overlay |
//! |----------|--------------|---------|
//! | portrait | 3:4 | none |
//! | landscape | 4:3 | none |
//! | square | 1:1 | none |
//! | dual-border | 1:1 | inner white border |
//! | collage | 1:1 | 2×2 grid |
//!
//! Changing the template rebuilds the canvas; the collage template swaps the
//! single-image store for a four-slot board.

use serde::{Deserialize, Serialize};

/// Visual treatment drawn on top of the placed image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayStyle {
    /// Plain full-bleed print.
    #[default]
    None,
    /// Inner white border inset from the frame edge.
    DualBorder,
    /// 2×2 grid lines between collage cells.
    Grid,
}

/// Template identity, used in API payloads and CLI args.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Portrait,
    Landscape,
    Square,
    DualBorder,
    Collage,
}

/// A design template: aspect ratio plus visual treatment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DesignTemplate {
    pub kind: TemplateKind,
    /// Human-readable display label.
    pub label: &'static str,
    /// Width / height ratio of the print surface.
    pub aspect_ratio: f32,
    pub overlay: OverlayStyle,
}

impl DesignTemplate {
    pub const PORTRAIT: Self = Self {
        kind: TemplateKind::Portrait,
        label: "Portrait",
        aspect_ratio: 0.75,
        overlay: OverlayStyle::None,
    };

    pub const LANDSCAPE: Self = Self {
        kind: TemplateKind::Landscape,
        label: "Landscape",
        aspect_ratio: 4.0 / 3.0,
        overlay: OverlayStyle::None,
    };

    pub const SQUARE: Self = Self {
        kind: TemplateKind::Square,
        label: "Square",
        aspect_ratio: 1.0,
        overlay: OverlayStyle::None,
    };

    pub const DUAL_BORDER: Self = Self {
        kind: TemplateKind::DualBorder,
        label: "Dual Border",
        aspect_ratio: 1.0,
        overlay: OverlayStyle::DualBorder,
    };

    pub const COLLAGE: Self = Self {
        kind: TemplateKind::Collage,
        label: "Collage",
        aspect_ratio: 1.0,
        overlay: OverlayStyle::Grid,
    };

    /// All selectable templates, in display order.
    pub fn all() -> [Self; 5] {
        [
            Self::PORTRAIT,
            Self::LANDSCAPE,
            Self::SQUARE,
            Self::DUAL_BORDER,
            Self::COLLAGE,
        ]
    }

    /// Look up the template for a kind.
    pub fn by_kind(kind: TemplateKind) -> Self {
        match kind {
            TemplateKind::Portrait => Self::PORTRAIT,
            TemplateKind::Landscape => Self::LANDSCAPE,
            TemplateKind::Square => Self::SQUARE,
            TemplateKind::DualBorder => Self::DUAL_BORDER,
            TemplateKind::Collage => Self::COLLAGE,
        }
    }

    /// Parse a template string (CLI args or display name).
    ///
    /// Accepts the snake_case id (`"dual_border"`), the hyphenated form
    /// (`"dual-border"`), or the display label (`"Dual Border"`).
    pub fn parse(s: &str) -> Result<Self, String> {
        if let Some(t) = Self::all().into_iter().find(|t| t.label == s) {
            return Ok(t);
        }

        match s.to_lowercase().replace('-', "_").as_str() {
            "portrait" => Ok(Self::PORTRAIT),
            "landscape" => Ok(Self::LANDSCAPE),
            "square" => Ok(Self::SQUARE),
            "dual_border" => Ok(Self::DUAL_BORDER),
            "collage" => Ok(Self::COLLAGE),
            _ => Err(format!(
                "Unknown template '{}'. Use portrait, landscape, square, dual-border or collage",
                s
            )),
        }
    }

    /// Whether this template uses the four-slot collage board.
    #[inline]
    pub fn is_collage(&self) -> bool {
        self.kind == TemplateKind::Collage
    }

    /// Frame pixel dimensions for a given preview width.
    ///
    /// Height follows the aspect ratio, rounded, never below 1.
    pub fn frame_size(&self, width: u32) -> (u32, u32) {
        let height = (width as f32 / self.aspect_ratio).round() as u32;
        (width, height.max(1))
    }
}

// ============================================================================
// PRINT SIZE
// ============================================================================

/// A physical print size in inches, parsed from a size option name.
///
/// Size choices in catalog records are named like `"12x18"` or `"12 x 18"`.
/// The quality rating compares the uploaded image's pixel dimensions against
/// this target to estimate effective DPI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrintSize {
    pub width_in: f32,
    pub height_in: f32,
}

impl PrintSize {
    /// Fallback target when a size name cannot be parsed.
    pub const DEFAULT: Self = Self {
        width_in: 12.0,
        height_in: 18.0,
    };

    /// Parse a size name like `"12x18"`, `"12 x 18"` or `"8X12"`.
    ///
    /// Returns `None` for names that do not contain two positive numbers
    /// separated by an `x`.
    pub fn parse(name: &str) -> Option<Self> {
        let lowered = name.to_lowercase();
        let cleaned = lowered.replace(' ', "");
        let (w, h) = cleaned.split_once('x')?;
        let width_in: f32 = w.parse().ok()?;
        let height_in: f32 = h.parse().ok()?;
        if width_in <= 0.0 || height_in <= 0.0 {
            return None;
        }
        Some(Self {
            width_in,
            height_in,
        })
    }

    /// Parse with fallback to [`PrintSize::DEFAULT`].
    pub fn parse_or_default(name: &str) -> Self {
        Self::parse(name).unwrap_or(Self::DEFAULT)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_ratios() {
        assert!((DesignTemplate::PORTRAIT.aspect_ratio - 0.75).abs() < 1e-6);
        assert!((DesignTemplate::LANDSCAPE.aspect_ratio - 4.0 / 3.0).abs() < 1e-6);
        assert!((DesignTemplate::SQUARE.aspect_ratio - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_size_follows_aspect() {
        let (w, h) = DesignTemplate::PORTRAIT.frame_size(600);
        assert_eq!(w, 600);
        assert_eq!(h, 800);

        let (w, h) = DesignTemplate::LANDSCAPE.frame_size(800);
        assert_eq!(w, 800);
        assert_eq!(h, 600);

        let (w, h) = DesignTemplate::SQUARE.frame_size(500);
        assert_eq!((w, h), (500, 500));
    }

    #[test]
    fn test_parse_accepts_all_spellings() {
        assert_eq!(
            DesignTemplate::parse("dual-border").unwrap().kind,
            TemplateKind::DualBorder
        );
        assert_eq!(
            DesignTemplate::parse("dual_border").unwrap().kind,
            TemplateKind::DualBorder
        );
        assert_eq!(
            DesignTemplate::parse("Dual Border").unwrap().kind,
            TemplateKind::DualBorder
        );
        assert!(DesignTemplate::parse("panorama").is_err());
    }

    #[test]
    fn test_collage_detection() {
        assert!(DesignTemplate::COLLAGE.is_collage());
        assert!(!DesignTemplate::SQUARE.is_collage());
    }

    #[test]
    fn test_print_size_parse() {
        let size = PrintSize::parse("12x18").unwrap();
        assert!((size.width_in - 12.0).abs() < 1e-6);
        assert!((size.height_in - 18.0).abs() < 1e-6);

        let size = PrintSize::parse("8 X 12").unwrap();
        assert!((size.width_in - 8.0).abs() < 1e-6);

        assert!(PrintSize::parse("Large").is_none());
        assert!(PrintSize::parse("0x12").is_none());
        assert_eq!(PrintSize::parse_or_default("Large"), PrintSize::DEFAULT);
    }
}
