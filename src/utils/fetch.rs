//! Browser transport for the engine.
//!
//! Sends [`ApiRequest`]s through the Fetch API. Any HTTP status comes back as
//! an [`ApiResponse`]; only failures to talk to the server at all are errors.

use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Headers, Request, RequestInit, RequestMode, Response};

use triox_core::{ApiRequest, ApiResponse, RequestBody, Transport, TransportError, TransportFuture};

/// [`Transport`] over `window.fetch`. Upload forms are browser `FormData`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    type Form = FormData;

    fn send<'a>(
        &'a self,
        request: ApiRequest<FormData>,
    ) -> TransportFuture<'a, Result<ApiResponse, TransportError>> {
        Box::pin(fetch(request))
    }
}

async fn fetch(request: ApiRequest<FormData>) -> Result<ApiResponse, TransportError> {
    let window = web_sys::window().ok_or(TransportError::NoWindow)?;

    let headers = Headers::new().map_err(|_| TransportError::RequestCreationFailed)?;
    for (name, value) in &request.headers {
        headers
            .set(name, value)
            .map_err(|_| TransportError::RequestCreationFailed)?;
    }

    let opts = RequestInit::new();
    opts.set_method(request.method.as_str());
    opts.set_mode(RequestMode::Cors);

    match &request.body {
        RequestBody::Empty => {}
        RequestBody::Json(text) => {
            headers
                .set("Content-Type", "application/json")
                .map_err(|_| TransportError::RequestCreationFailed)?;
            opts.set_body(&JsValue::from_str(text));
        }
        // The browser sets the multipart boundary itself
        RequestBody::Form(form) => opts.set_body(form),
    }
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(&request.url, &opts)
        .map_err(|_| TransportError::RequestCreationFailed)?;

    let result = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| TransportError::NetworkError(js_error_message(&e)))?;
    let resp: Response = result
        .dyn_into()
        .map_err(|_| TransportError::InvalidContent)?;

    let buffer = JsFuture::from(
        resp.array_buffer()
            .map_err(|_| TransportError::ResponseReadFailed)?,
    )
    .await
    .map_err(|_| TransportError::ResponseReadFailed)?;

    Ok(ApiResponse::new(resp.status(), Uint8Array::new(&buffer).to_vec()))
}

fn js_error_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "Unknown error".to_string())
}
