//! Transport and auth seams.
//!
//! The engine never touches the network directly. It builds [`ApiRequest`]s
//! and hands them to a [`Transport`]; the browser client plugs in a fetch
//! based implementation, tests plug in a recording mock.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use serde::Serialize;

use crate::error::TransportError;

/// Object-safe boxed future used by [`Transport`].
///
/// Not `Send`: everything runs on the single UI event loop.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload. `F` is the transport's multipart form type.
#[derive(Debug)]
pub enum RequestBody<F> {
    Empty,
    /// Serialized JSON document
    Json(String),
    /// Multipart form data
    Form(F),
}

#[derive(Debug)]
pub struct ApiRequest<F> {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody<F>,
}

impl<F> ApiRequest<F> {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn post_json<T: Serialize>(url: impl Into<String>, payload: &T) -> serde_json::Result<Self> {
        Ok(Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Json(serde_json::to_string(payload)?),
        })
    }

    pub fn post_form(url: impl Into<String>, form: F) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Form(form),
        }
    }

    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// Status and raw body of an HTTP response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends requests to the backend.
pub trait Transport {
    /// Multipart payload accepted by this transport.
    type Form;

    fn send<'a>(
        &'a self,
        request: ApiRequest<Self::Form>,
    ) -> TransportFuture<'a, Result<ApiResponse, TransportError>>;
}

impl<T: Transport + ?Sized> Transport for Rc<T> {
    type Form = T::Form;

    fn send<'a>(
        &'a self,
        request: ApiRequest<Self::Form>,
    ) -> TransportFuture<'a, Result<ApiResponse, TransportError>> {
        (**self).send(request)
    }
}

/// Supplies the credential headers attached to every request.
///
/// The engine neither stores nor validates the credential.
pub trait AuthProvider {
    fn auth_headers(&self) -> Vec<(String, String)>;
}

/// No credentials.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAuth;

impl AuthProvider for NoAuth {
    fn auth_headers(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}

/// A fixed bearer token.
#[derive(Clone, Debug)]
pub struct StaticToken(pub String);

impl AuthProvider for StaticToken {
    fn auth_headers(&self) -> Vec<(String, String)> {
        vec![bearer(&self.0)]
    }
}

/// `Authorization: Bearer <token>` header pair.
pub fn bearer(token: &str) -> (String, String) {
    ("Authorization".to_string(), format!("Bearer {}", token))
}
