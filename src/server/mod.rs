//! # HTTP Server for the Customization API
//!
//! Hosts customization sessions behind a JSON API: create a session from a
//! catalog product record, drive selections and the wizard, upload photos,
//! fetch PNG previews, and submit the finished order intent.
//!
//! ## Usage
//!
//! ```bash
//! lienzo serve --listen 0.0.0.0:8080 --orders-url https://orders.example/api/cart
//! ```

mod handlers;
mod state;

pub use state::ServerConfig;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;

use crate::error::LienzoError;
use state::{AppState, SESSION_EXPIRATION_SECS};

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use lienzo::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), lienzo::error::LienzoError> {
/// let config = ServerConfig {
///     listen_addr: "0.0.0.0:8080".to_string(),
///     orders_url: None,
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<(), LienzoError> {
    let app_state = Arc::new(AppState::new(config.clone()));

    // Spawn background session cleanup task
    tokio::spawn(cleanup_sessions(app_state.clone()));

    let app = Router::new()
        // Session lifecycle
        .route("/api/session", post(handlers::session::create))
        .route("/api/session/:id", get(handlers::session::snapshot))
        // Customization
        .route("/api/session/:id/select", post(handlers::session::select))
        .route(
            "/api/session/:id/template",
            post(handlers::session::template),
        )
        .route(
            "/api/session/:id/quantity",
            post(handlers::session::quantity),
        )
        .route("/api/session/:id/text", post(handlers::session::text))
        .route("/api/session/:id/step", post(handlers::session::step))
        .route("/api/session/:id/canvas", post(handlers::session::canvas))
        // Photos (12MB limit leaves the 10MB validation in charge)
        .route(
            "/api/session/:id/photo",
            post(handlers::photo::upload)
                .delete(handlers::photo::clear)
                .layer(DefaultBodyLimit::max(12 * 1024 * 1024)),
        )
        .route(
            "/api/session/:id/slot/:index/photo",
            post(handlers::photo::upload_slot)
                .delete(handlers::photo::clear_slot)
                .layer(DefaultBodyLimit::max(12 * 1024 * 1024)),
        )
        .route(
            "/api/session/:id/slots",
            axum::routing::delete(handlers::photo::clear_slots),
        )
        .route("/api/session/:id/preview", get(handlers::photo::preview))
        // Orders
        .route("/api/session/:id/submit", post(handlers::order::submit))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    println!("Lienzo customization server starting...");
    println!("Listening on: {}", config.listen_addr);
    match &config.orders_url {
        Some(url) => println!("Order endpoint: {}", url),
        None => println!("Order endpoint: (none — submission disabled)"),
    }
    println!();

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Background task to clean up expired sessions.
async fn cleanup_sessions(state: Arc<AppState>) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    let expiration = Duration::from_secs(SESSION_EXPIRATION_SECS);

    loop {
        interval.tick().await;
        let now = Instant::now();

        let mut sessions = state.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now.duration_since(s.last_accessed) < expiration);
        let after = sessions.len();
        if before != after {
            println!(
                "[session] Cleaned up {} expired session(s) ({} remaining)",
                before - after,
                after
            );
        }
    }
}
