//! # Print Quality Rating
//!
//! Estimates how well an uploaded photo will print at the selected physical
//! size. The effective DPI is the limiting axis:
//!
//! ```text
//! dpi = min(pixel_width / target_width_in, pixel_height / target_height_in)
//! ```
//!
//! | DPI | Rating |
//! |-----|--------|
//! | ≥ 300 | Excellent |
//! | ≥ 150 | Good |
//! | ≥ 72 | Fair |
//! | < 72 | Low |

use serde::{Deserialize, Serialize};

use crate::catalog::PrintSize;

/// Derived print quality estimate for an uploaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityRating {
    Excellent,
    Good,
    Fair,
    Low,
}

impl QualityRating {
    /// Rate a DPI estimate against the print thresholds.
    pub fn from_dpi(dpi: f32) -> Self {
        if dpi >= 300.0 {
            QualityRating::Excellent
        } else if dpi >= 150.0 {
            QualityRating::Good
        } else if dpi >= 72.0 {
            QualityRating::Fair
        } else {
            QualityRating::Low
        }
    }

    /// Rate an image's pixel dimensions against a target print size.
    pub fn rate(pixel_width: u32, pixel_height: u32, target: PrintSize) -> Self {
        let dpi_x = pixel_width as f32 / target.width_in;
        let dpi_y = pixel_height as f32 / target.height_in;
        Self::from_dpi(dpi_x.min(dpi_y))
    }

    /// Display label for the quality badge.
    pub fn label(&self) -> &'static str {
        match self {
            QualityRating::Excellent => "Excellent",
            QualityRating::Good => "Good",
            QualityRating::Fair => "Fair",
            QualityRating::Low => "Low",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(QualityRating::from_dpi(300.0), QualityRating::Excellent);
        assert_eq!(QualityRating::from_dpi(299.9), QualityRating::Good);
        assert_eq!(QualityRating::from_dpi(150.0), QualityRating::Good);
        assert_eq!(QualityRating::from_dpi(149.9), QualityRating::Fair);
        assert_eq!(QualityRating::from_dpi(72.0), QualityRating::Fair);
        assert_eq!(QualityRating::from_dpi(71.9), QualityRating::Low);
    }

    #[test]
    fn test_limiting_axis_wins() {
        let target = PrintSize {
            width_in: 12.0,
            height_in: 18.0,
        };
        // 3600x5400 at 12x18 → exactly 300 DPI on both axes
        assert_eq!(QualityRating::rate(3600, 5400, target), QualityRating::Excellent);
        // Tall enough but too narrow: width axis limits to 100 DPI
        assert_eq!(QualityRating::rate(1200, 5400, target), QualityRating::Fair);
    }

    #[test]
    fn test_small_image_rates_low() {
        assert_eq!(
            QualityRating::rate(400, 400, PrintSize::DEFAULT),
            QualityRating::Low
        );
    }
}
