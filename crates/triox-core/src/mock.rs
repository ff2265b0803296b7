//! In-memory transport for tests.
//!
//! Records every request, answers from a table keyed by method and URL, and
//! can hold a response back until the test releases it.

use std::cell::RefCell;
use std::collections::HashMap;

use futures::channel::oneshot;

use crate::error::TransportError;
use crate::transport::{ApiRequest, ApiResponse, Method, RequestBody, Transport, TransportFuture};

/// Body of a recorded request. Forms are plain strings in the mock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedBody {
    Empty,
    Json(String),
    Form(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RecordedBody,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// JSON body parsed into a value, if any.
    pub fn json(&self) -> Option<serde_json::Value> {
        match &self.body {
            RecordedBody::Json(text) => serde_json::from_str(text).ok(),
            _ => None,
        }
    }
}

type Reply = Result<ApiResponse, TransportError>;

#[derive(Default)]
pub struct MockTransport {
    requests: RefCell<Vec<RecordedRequest>>,
    replies: RefCell<HashMap<(Method, String), Reply>>,
    holds: RefCell<HashMap<(Method, String), oneshot::Receiver<()>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method url` with `status` and `body` from now on.
    pub fn respond(&self, method: Method, url: &str, status: u16, body: impl Into<Vec<u8>>) {
        self.replies
            .borrow_mut()
            .insert((method, url.to_string()), Ok(ApiResponse::new(status, body)));
    }

    pub fn respond_json(&self, method: Method, url: &str, status: u16, body: serde_json::Value) {
        self.respond(method, url, status, body.to_string());
    }

    /// Fail `method url` at the network level.
    pub fn fail(&self, method: Method, url: &str, err: TransportError) {
        self.replies
            .borrow_mut()
            .insert((method, url.to_string()), Err(err));
    }

    /// Hold the next `method url` request until the returned sender fires
    /// (or is dropped).
    pub fn hold(&self, method: Method, url: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.holds.borrow_mut().insert((method, url.to_string()), rx);
        tx
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }
}

impl Transport for MockTransport {
    type Form = String;

    fn send<'a>(&'a self, request: ApiRequest<String>) -> TransportFuture<'a, Reply> {
        let key = (request.method, request.url.clone());
        let body = match request.body {
            RequestBody::Empty => RecordedBody::Empty,
            RequestBody::Json(text) => RecordedBody::Json(text),
            RequestBody::Form(form) => RecordedBody::Form(form),
        };
        self.requests.borrow_mut().push(RecordedRequest {
            method: request.method,
            url: request.url,
            headers: request.headers,
            body,
        });
        let hold = self.holds.borrow_mut().remove(&key);

        Box::pin(async move {
            if let Some(released) = hold {
                let _ = released.await;
            }
            self.replies
                .borrow()
                .get(&key)
                .cloned()
                .unwrap_or_else(|| Ok(ApiResponse::new(404, "not found")))
        })
    }
}
