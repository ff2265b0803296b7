//! Saving downloaded files.

use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, HtmlAnchorElement, Url};

use super::dom;

/// Offer `bytes` to the user as a file called `name`.
///
/// Wraps the bytes in a Blob, points a temporary anchor at its object URL
/// and clicks it. The anchor has to be in the document for Firefox.
pub fn save_bytes(name: &str, bytes: &[u8]) -> Result<(), JsValue> {
    let document = dom::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document not available"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let parts = Array::new();
    parts.push(&Uint8Array::from(bytes));
    let blob = Blob::new_with_u8_array_sequence(&parts)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(name);
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();

    Url::revoke_object_url(&url)
}
