//! Application configuration.
//!
//! Centralizes the constants the web client is built with.

use log::LevelFilter;
use triox_core::ApiConfig;

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name shown in the header.
pub const APP_NAME: &str = "Triox";

// =============================================================================
// Backend Configuration
// =============================================================================

/// Base URL of the file API. Empty means same origin.
pub const API_BASE_URL: &str = "";

/// localStorage key holding the bearer token issued at login.
pub const AUTH_TOKEN_KEY: &str = "triox-jwt";

/// Endpoint table for the engine.
pub fn api_config() -> ApiConfig {
    ApiConfig::with_base_url(API_BASE_URL)
}

// =============================================================================
// Logging
// =============================================================================

/// Most verbose level forwarded to the browser console.
pub const LOG_LEVEL: LevelFilter = if cfg!(debug_assertions) {
    LevelFilter::Debug
} else {
    LevelFilter::Info
};

// =============================================================================
// UI Configuration
// =============================================================================

/// How long an error banner stays up before dismissing itself.
pub const NOTICE_DISMISS_MS: u32 = 6000;

/// Form field carrying the files of an upload.
pub const UPLOAD_FIELD: &str = "files";

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
