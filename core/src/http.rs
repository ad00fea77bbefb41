//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! ever touching the network; a `Transport` implementation owned by the host
//! executes the actual I/O. This keeps the client deterministic and lets the
//! controller be tested against a scripted transport.

use std::future::Future;

use crate::error::ApiError;
use crate::multipart::MultipartForm;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Request payload. JSON bodies stay as text so tests can inspect them;
/// multipart bodies stay as parts and are encoded by the transport.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(String),
    Multipart(MultipartForm),
}

impl RequestBody {
    /// Value for the `content-type` header of a JSON body. Multipart
    /// headers carry a boundary chosen by the transport's encoder.
    pub const JSON_CONTENT_TYPE: &'static str = "application/json";

    pub fn as_json(&self) -> Option<&str> {
        match self {
            RequestBody::Json(json) => Some(json),
            RequestBody::Multipart(_) => None,
        }
    }

    pub fn as_multipart(&self) -> Option<&MultipartForm> {
        match self {
            RequestBody::Multipart(form) => Some(form),
            RequestBody::Json(_) => None,
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `ProductClient::build_*` methods. The `content-type` header is
/// not stored in `headers`; transports derive it from `body`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes requests on behalf of the controller.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; only failures to obtain a response are `Err`
/// (normally `ApiError::Transport`). Status interpretation belongs to
/// `ProductClient`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse, ApiError>>;
}
