//! HTTP server module
//!
//! - Axum router with health, version and media endpoints
//! - Directory listings as JSON, files as bytes
//! - Subtitle files converted to WebVTT on request
//! - CORS and request tracing middleware

pub mod handlers;
pub mod media;
pub mod routes;

pub use routes::create_router;
