//! # Lienzo CLI
//!
//! Command-line interface for the customization engine.
//!
//! ## Usage
//!
//! ```bash
//! # Start the customization API server
//! lienzo serve --listen 0.0.0.0:8080 --orders-url https://orders.example/api/cart
//!
//! # Render an offline preview of a photo under a template
//! lienzo preview --template square --size 12x18 photo.jpg -o preview.png
//!
//! # Render a collage preview from up to four photos
//! lienzo preview --template collage a.jpg b.jpg c.jpg -o collage.png
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lienzo::{
    LienzoError,
    catalog::{CatalogProduct, DesignTemplate},
    customizer::Customizer,
    ingest::RawUpload,
    server::{self, ServerConfig},
};

/// Lienzo - product customization and print-preview utility
#[derive(Parser, Debug)]
#[command(name = "lienzo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the customization API server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Order collaborator endpoint (omit to disable submission)
        #[arg(long)]
        orders_url: Option<String>,
    },

    /// Render a customization preview to a PNG file
    Preview {
        /// Input photo(s); up to four for the collage template
        #[arg(required = true)]
        photos: Vec<PathBuf>,

        /// Design template (portrait, landscape, square, dual-border, collage)
        #[arg(long, default_value = "portrait")]
        template: String,

        /// Size choice (e.g. 12x18)
        #[arg(long)]
        size: Option<String>,

        /// Quarter-turn rotations to apply
        #[arg(long, default_value = "0")]
        rotate: u32,

        /// Zoom-in steps to apply
        #[arg(long, default_value = "0")]
        zoom: u32,

        /// Output PNG path
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), LienzoError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen, orders_url } => {
            let config = ServerConfig {
                listen_addr: listen,
                orders_url,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(config))
        }

        Commands::Preview {
            photos,
            template,
            size,
            rotate,
            zoom,
            output,
        } => {
            let template = DesignTemplate::parse(&template).map_err(LienzoError::Validation)?;

            let mut customizer = Customizer::new(CatalogProduct::default());
            customizer.set_template(template.kind);
            if let Some(size) = size {
                customizer.select("size", &size)?;
            }

            if template.is_collage() {
                if photos.len() > lienzo::collage::SLOT_COUNT {
                    return Err(LienzoError::Validation(format!(
                        "The collage takes at most {} photos",
                        lienzo::collage::SLOT_COUNT
                    )));
                }
                for (index, path) in photos.iter().enumerate() {
                    customizer.upload_to_slot(index, read_upload(path)?)?;
                }
            } else {
                if photos.len() != 1 {
                    return Err(LienzoError::Validation(format!(
                        "The {} template takes exactly one photo",
                        template.label
                    )));
                }
                customizer.upload_photo(read_upload(&photos[0])?)?;

                for _ in 0..rotate {
                    customizer.rotate()?;
                }
                for _ in 0..zoom {
                    customizer.zoom_in()?;
                }
            }

            println!(
                "Rendering {} preview ({} photo(s))...",
                template.label,
                photos.len()
            );
            let png = customizer.render_preview_png()?;
            std::fs::write(&output, png)?;
            println!("Saved to {}", output.display());
            Ok(())
        }
    }
}

/// Read a local file into an upload, guessing the content type from the
/// file name.
fn read_upload(path: &PathBuf) -> Result<RawUpload, LienzoError> {
    let bytes = std::fs::read(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "photo".to_string());
    Ok(RawUpload {
        filename,
        content_type: None,
        bytes,
    })
}
