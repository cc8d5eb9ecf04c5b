//! # Lienzo - Product Customization Engine
//!
//! Lienzo is the interactive customization core of a custom-printing
//! storefront. It models product options, composes prices, ingests customer
//! photos, places them cover-fit onto a preview canvas, assembles collages,
//! and emits finished order intents to an external cart collaborator.
//!
//! ## Quick Start
//!
//! ```
//! use lienzo::catalog::CatalogProduct;
//! use lienzo::customizer::Customizer;
//! use lienzo::ingest::RawUpload;
//!
//! # fn photo_bytes() -> Vec<u8> {
//! #     let img = image::RgbImage::new(64, 64);
//! #     let mut out = std::io::Cursor::new(Vec::new());
//! #     image::DynamicImage::ImageRgb8(img)
//! #         .write_to(&mut out, image::ImageFormat::Png)
//! #         .unwrap();
//! #     out.into_inner()
//! # }
//! let mut customizer = Customizer::new(CatalogProduct::default());
//!
//! // Walk the wizard: pick options, upload a photo, advance to preview
//! customizer.select("size", "12x18")?;
//! customizer.continue_step()?;
//! customizer.upload_photo(RawUpload {
//!     filename: "photo.png".to_string(),
//!     content_type: Some("image/png".to_string()),
//!     bytes: photo_bytes(),
//! })?;
//! customizer.continue_step()?;
//!
//! // Derived price: (base + selected deltas) × quantity
//! let quote = customizer.quote();
//! assert_eq!(quote.total, quote.unit_price * quote.quantity as i64);
//!
//! # Ok::<(), lienzo::error::LienzoError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`catalog`] | Product records, option dimensions, design templates |
//! | [`pricing`] | Price composition from selected options |
//! | [`ingest`] | Upload validation, decoding and quality rating |
//! | [`canvas`] | Cover-fit placement and preview rendering |
//! | [`collage`] | Four-slot 2×2 collage board |
//! | [`wizard`] | Three-step wizard state machine |
//! | [`customizer`] | The page-level controller tying it together |
//! | [`order`] | Order intent emission to the cart collaborator |
//! | [`server`] | HTTP session API |
//! | [`error`] | Error types |

pub mod canvas;
pub mod catalog;
pub mod collage;
pub mod customizer;
pub mod error;
pub mod ingest;
pub mod order;
pub mod pricing;
pub mod server;
pub mod wizard;

// Re-exports for convenience
pub use customizer::Customizer;
pub use error::LienzoError;
pub use wizard::Step;
