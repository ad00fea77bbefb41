//! reqwest-backed `Transport`.

use productos_core::multipart::{MultipartForm, PartValue};
use productos_core::{ApiError, HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};

/// Executes core requests over HTTP. Non-2xx responses are returned as data;
/// only failures to get a response become `ApiError::Transport`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

/// Hand the parts to reqwest's encoder, which picks the boundary.
fn multipart_form(form: MultipartForm) -> Result<Form, ApiError> {
    let mut outgoing = Form::new();
    for part in form.into_parts() {
        outgoing = match part.value {
            PartValue::Text(text) => outgoing.text(part.name, text),
            PartValue::File {
                file_name,
                content_type,
                bytes,
            } => {
                let file = Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str(&content_type)
                    .map_err(|e| ApiError::Serialization(format!("invalid content type {content_type:?}: {e}")))?;
                outgoing.part(part.name, file)
            }
        };
    }
    Ok(outgoing)
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        tracing::debug!(method = request.method.as_str(), path = %request.path, "sending request");

        let mut builder = self.client.request(method(request.method), &request.path);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        builder = match request.body {
            Some(RequestBody::Json(json)) => builder.header(CONTENT_TYPE, RequestBody::JSON_CONTENT_TYPE).body(json),
            Some(RequestBody::Multipart(form)) => builder.multipart(multipart_form(form)?),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;

        tracing::debug!(status, bytes = body.len(), "response received");
        Ok(HttpResponse { status, headers, body })
    }
}
