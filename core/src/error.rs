//! Error types for the product API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the product does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `Status` with the raw status
//! code and body for debugging. `ApiError::kind` collapses the variants into
//! a small machine-readable `ErrorKind` that the controller uses to pick the
//! hint shown to the user.

use thiserror::Error;

/// Errors returned by `ProductClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, TLS, I/O).
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404: the requested product does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A required form field was empty; no request was sent.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
}

/// Coarse classification of an `ApiError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    NotFound,
    /// 4xx other than 404.
    Client,
    /// 5xx.
    Server,
    Decode,
    Encode,
    Validation,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Transport(_) => ErrorKind::Network,
            ApiError::NotFound => ErrorKind::NotFound,
            ApiError::Status { status, .. } if *status >= 500 => ErrorKind::Server,
            ApiError::Status { .. } => ErrorKind::Client,
            ApiError::Deserialization(_) => ErrorKind::Decode,
            ApiError::Serialization(_) => ErrorKind::Encode,
            ApiError::MissingField(_) => ErrorKind::Validation,
        }
    }
}

impl ErrorKind {
    /// Short user-facing hint appended to alert messages.
    pub fn hint(self) -> &'static str {
        match self {
            ErrorKind::Network => "no se pudo conectar con el servidor",
            ErrorKind::NotFound => "el producto ya no existe",
            ErrorKind::Client => "el servidor rechazó los datos enviados",
            ErrorKind::Server => "el servidor no está disponible",
            ErrorKind::Decode => "respuesta inesperada del servidor",
            ErrorKind::Encode => "no se pudieron preparar los datos",
            ErrorKind::Validation => "faltan campos obligatorios",
        }
    }
}
