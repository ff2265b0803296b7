//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.

use web_sys::{Storage, Window};

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get localStorage.
#[inline]
pub fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

// =============================================================================
// Dialogs
// =============================================================================

/// Ask the user for a line of text. `None` when the prompt was cancelled.
pub fn prompt(message: &str, default: &str) -> Option<String> {
    window()?
        .prompt_with_message_and_default(message, default)
        .ok()
        .flatten()
}

/// Ask the user to confirm. Anything but an explicit "OK" is a no.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

// =============================================================================
// Browser Navigation
// =============================================================================

/// Get the current URL hash (without the '#' prefix).
pub fn get_hash() -> String {
    window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
        .trim_start_matches('#')
        .to_string()
}

/// Replace the URL hash without adding to browser history.
///
/// The hash should include the '#' prefix.
pub fn replace_hash(hash: &str) {
    if let Some(window) = window()
        && let Ok(history) = window.history()
    {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(hash));
    }
}
