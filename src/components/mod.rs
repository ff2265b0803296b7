//! UI components built with Leptos.
//!
//! - [`explorer`] - File browser UI
//! - [`icons`] - Centralized icon definitions (change theme here)
//! - [`notification`] - Error banner for failed requests

pub mod explorer;
pub mod icons;
pub mod notification;
