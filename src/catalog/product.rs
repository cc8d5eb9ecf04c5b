//! # Catalog Product Records
//!
//! Read-only product records supplied by the catalog collaborator. The
//! customizer treats these as option-dimension sources; any field the record
//! omits falls back to the hardcoded defaults below, so a session can start
//! from an empty record.
//!
//! Wire format is camelCase JSON (`basePrice`, `variantImages`), matching the
//! collaborator's storefront schema.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::options::{OptionChoice, OptionDimension, SelectionSet};

/// A named option with a price delta, as the catalog stores sizes and frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricedOption {
    pub name: String,
    /// Price delta in cents.
    #[serde(default)]
    pub price: i64,
}

fn default_base_price() -> i64 {
    1299
}

fn default_quantity() -> u32 {
    1
}

/// A product record from the catalog collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogProduct {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    /// Base price in cents before option deltas.
    pub base_price: i64,
    pub sizes: Vec<PricedOption>,
    pub frames: Vec<PricedOption>,
    /// Thickness options; only meaningful for products that have them
    /// (acrylic blocks). Absent for everything else.
    pub thicknesses: Vec<PricedOption>,
    pub images: Vec<String>,
    /// Frame name → product image URL for that variant.
    pub variant_images: HashMap<String, String>,
    /// Whether the customization flow requires a non-empty text field
    /// (engraving / name-print products).
    pub requires_text: bool,
    /// Starting quantity for the customizer.
    pub default_quantity: u32,
}

impl Default for CatalogProduct {
    fn default() -> Self {
        Self {
            id: "custom-print".to_string(),
            name: "Custom Photo Print".to_string(),
            category: None,
            base_price: default_base_price(),
            sizes: Vec::new(),
            frames: Vec::new(),
            thicknesses: Vec::new(),
            images: Vec::new(),
            variant_images: HashMap::new(),
            requires_text: false,
            default_quantity: default_quantity(),
        }
    }
}

impl CatalogProduct {
    /// Build the option dimensions for this product.
    ///
    /// Sizes and frames fall back to the default tables when the record
    /// omits them. Thickness is only added when the record carries thickness
    /// options — a product without them simply has no thickness dimension,
    /// and it contributes nothing to the price.
    pub fn build_dimensions(&self) -> SelectionSet {
        let mut dimensions = Vec::new();

        let sizes = if self.sizes.is_empty() {
            default_size_choices()
        } else {
            priced_choices(&self.sizes)
        };
        // Choice lists here are never empty, so construction cannot fail.
        if let Ok(dim) = OptionDimension::new("size", "Size", sizes) {
            dimensions.push(dim);
        }

        let frames = if self.frames.is_empty() {
            default_frame_choices()
        } else {
            priced_choices(&self.frames)
        };
        if let Ok(dim) = OptionDimension::new("frame", "Frame Color", frames) {
            dimensions.push(dim);
        }

        if !self.thicknesses.is_empty() {
            if let Ok(dim) =
                OptionDimension::new("thickness", "Thickness", priced_choices(&self.thicknesses))
            {
                dimensions.push(dim);
            }
        }

        SelectionSet::new(dimensions)
    }

    /// Product image for the currently selected frame, if the catalog
    /// provides a variant image for it.
    pub fn variant_image(&self, frame_name: &str) -> Option<&str> {
        self.variant_images.get(frame_name).map(String::as_str)
    }
}

fn priced_choices(options: &[PricedOption]) -> Vec<OptionChoice> {
    options
        .iter()
        .map(|o| {
            let mut choice = OptionChoice::new(&slugify(&o.name), &o.name, o.price);
            if o.name.eq_ignore_ascii_case("no frame") || o.name.eq_ignore_ascii_case("none") {
                choice = choice.none_option();
            }
            choice
        })
        .collect()
}

/// Lowercased, space-free id from a display name.
fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Default size table, used when the catalog record has no sizes.
fn default_size_choices() -> Vec<OptionChoice> {
    vec![
        OptionChoice::new("8x12", "8x12", 0),
        OptionChoice::new("12x18", "12x18", 400).popular(),
        OptionChoice::new("16x24", "16x24", 900),
        OptionChoice::new("20x30", "20x30", 1500),
    ]
}

/// Default frame table, used when the catalog record has no frames.
fn default_frame_choices() -> Vec<OptionChoice> {
    vec![
        OptionChoice::new("black", "Black", 0).popular(),
        OptionChoice::new("white", "White", 0),
        OptionChoice::new("oak", "Oak", 299),
        OptionChoice::new("walnut", "Walnut", 299),
        OptionChoice::new("no-frame", "No Frame", 0).none_option(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_product_builds_fallback_dimensions() {
        let product = CatalogProduct::default();
        let set = product.build_dimensions();

        let size = set.get("size").unwrap();
        assert_eq!(size.choices().len(), 4);
        assert_eq!(size.selected_choice().label, "8x12");

        let frame = set.get("frame").unwrap();
        assert!(frame.choices().iter().any(|c| c.is_none));

        // No thickness options in the record → no thickness dimension
        assert!(set.get("thickness").is_none());
    }

    #[test]
    fn test_catalog_sizes_override_defaults() {
        let product = CatalogProduct {
            sizes: vec![
                PricedOption {
                    name: "10x10".to_string(),
                    price: 0,
                },
                PricedOption {
                    name: "20x20".to_string(),
                    price: 800,
                },
            ],
            ..Default::default()
        };
        let set = product.build_dimensions();
        let size = set.get("size").unwrap();
        assert_eq!(size.choices().len(), 2);
        assert_eq!(size.choices()[1].price_delta, 800);
    }

    #[test]
    fn test_thickness_dimension_only_when_present() {
        let product = CatalogProduct {
            thicknesses: vec![
                PricedOption {
                    name: "0.75 in".to_string(),
                    price: 0,
                },
                PricedOption {
                    name: "1.25 in".to_string(),
                    price: 100,
                },
            ],
            ..Default::default()
        };
        let set = product.build_dimensions();
        assert!(set.get("thickness").is_some());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = r#"{
            "id": "acrylic-block",
            "name": "Acrylic Photo Block",
            "basePrice": 2499,
            "sizes": [{"name": "8x12", "price": 0}],
            "variantImages": {"Black": "https://cdn.example/black.jpg"}
        }"#;
        let product: CatalogProduct = serde_json::from_str(json).unwrap();
        assert_eq!(product.base_price, 2499);
        assert_eq!(
            product.variant_image("Black"),
            Some("https://cdn.example/black.jpg")
        );
        // Omitted fields fall back to defaults
        assert_eq!(product.default_quantity, 1);
        assert!(!product.requires_text);
    }
}
