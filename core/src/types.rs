//! Domain DTOs for the product API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently of
//! the mock-server crate; integration tests catch any schema drift. The
//! server is free to send `id`, `precio` and `stock` as numbers or strings,
//! so those fields deserialize leniently and are kept as text on the client,
//! which is also how the form edits them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque, server-assigned product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        text_or_number(deserializer).map(ProductId)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => n.to_string(),
    })
}

fn optional_text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?
        .map(|v| match v {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        })
        .unwrap_or_default())
}

/// A product as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default, deserialize_with = "optional_text_or_number")]
    pub precio: String,
    #[serde(default, deserialize_with = "optional_text_or_number")]
    pub stock: String,
    /// Server-side key of the stored image.
    #[serde(default)]
    pub imagen: Option<String>,
    #[serde(default)]
    pub imagen_url: Option<String>,
}

/// Image chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Fields sent when creating a product. Empty text fields are left out of
/// the multipart body.
#[derive(Debug, Clone, Default)]
pub struct CreateProduct {
    pub nombre: String,
    pub descripcion: String,
    pub precio: String,
    pub stock: String,
    pub imagen: Option<ImageFile>,
}

/// Request payload for updating an existing product. Carries neither the id
/// (it lives in the path) nor the image (not editable after creation).
/// An absent description is sent as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateProduct {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: String,
    pub stock: String,
}

/// Acknowledgment body of a delete; servers may also reply with no body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteAck {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackupReport {
    pub copied: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestoreReport {
    pub restored: u64,
}
