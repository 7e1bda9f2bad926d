//! Coldsystem Equipment Tracking
//!
//! A Rust REST JSON API for registering refrigeration equipment
//! (identification, location, specs, status) addressed by the public
//! identifier encoded in its QR code.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
