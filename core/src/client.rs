//! Stateless HTTP request builder and response parser for the product API.
//!
//! # Design
//! `ProductClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip, keeping
//! the core deterministic and free of I/O dependencies.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::multipart::MultipartForm;
use crate::types::{BackupReport, CreateProduct, DeleteAck, Product, ProductId, RestoreReport, UpdateProduct};

/// Characters escaped in a single path segment (RFC 3986 `pchar` complement).
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Synchronous, stateless client for the `/productos` API.
#[derive(Debug, Clone)]
pub struct ProductClient {
    base_url: String,
}

impl ProductClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection(&self) -> String {
        format!("{}/productos", self.base_url)
    }

    fn item(&self, id: &ProductId) -> String {
        format!("{}/{}", self.collection(), utf8_percent_encode(id.as_str(), SEGMENT))
    }

    pub fn build_list_products(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Multipart create. Text fields that are empty are omitted, the image
    /// (if any) is sent as a binary part named `imagen`.
    pub fn build_create_product(&self, input: &CreateProduct) -> HttpRequest {
        let mut form = MultipartForm::new();
        for (name, value) in [
            ("nombre", &input.nombre),
            ("descripcion", &input.descripcion),
            ("precio", &input.precio),
            ("stock", &input.stock),
        ] {
            if !value.is_empty() {
                form.text(name, value.as_str());
            }
        }
        if let Some(image) = &input.imagen {
            form.file("imagen", &image.file_name, &image.content_type, image.bytes.clone());
        }
        tracing::debug!(parts = form.parts().len(), "built create request");

        HttpRequest {
            method: HttpMethod::Post,
            path: self.collection(),
            headers: Vec::new(),
            body: Some(RequestBody::Multipart(form)),
        }
    }

    pub fn build_update_product(&self, id: &ProductId, input: &UpdateProduct) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: self.item(id),
            headers: Vec::new(),
            body: Some(RequestBody::Json(body)),
        })
    }

    pub fn build_delete_product(&self, id: &ProductId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_backup(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/backup", self.collection()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_restore(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/restore", self.collection()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_update_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<DeleteAck, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(DeleteAck::default());
        }
        decode(&response)
    }

    pub fn parse_backup(&self, response: HttpResponse) -> Result<BackupReport, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    pub fn parse_restore(&self, response: HttpResponse) -> Result<RestoreReport, ApiError> {
        check_status(&response)?;
        decode(&response)
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::multipart::PartValue;
    use crate::types::ImageFile;

    fn client() -> ProductClient {
        ProductClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_products_produces_correct_request() {
        let req = client().build_list_products();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/productos");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_product_sends_only_non_empty_fields() {
        let input = CreateProduct {
            nombre: "Mouse".to_string(),
            descripcion: String::new(),
            precio: "50".to_string(),
            stock: "10".to_string(),
            imagen: Some(ImageFile {
                file_name: "mouse.png".to_string(),
                content_type: "image/png".to_string(),
                bytes: vec![1, 2, 3],
            }),
        };
        let req = client().build_create_product(&input);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/productos");

        let form = req.body.as_ref().unwrap().as_multipart().unwrap();
        let names: Vec<_> = form.parts().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["nombre", "precio", "stock", "imagen"]);
        assert_eq!(form.part("nombre").unwrap().value, PartValue::Text("Mouse".to_string()));
        assert!(matches!(
            &form.part("imagen").unwrap().value,
            PartValue::File { file_name, bytes, .. } if file_name == "mouse.png" && bytes == &[1, 2, 3]
        ));
    }

    #[test]
    fn build_create_product_without_image_has_no_file_part() {
        let input = CreateProduct {
            nombre: "Cable".to_string(),
            ..Default::default()
        };
        let req = client().build_create_product(&input);
        let form = req.body.as_ref().unwrap().as_multipart().unwrap();
        assert_eq!(form.parts().len(), 1);
        assert!(form.part("imagen").is_none());
    }

    #[test]
    fn ids_are_percent_encoded_as_one_segment() {
        let c = client();
        let id = ProductId::from("a b/7");
        assert_eq!(c.build_delete_product(&id).path, "http://localhost:3000/productos/a%20b%2F7");
        let update = c.build_update_product(&id, &UpdateProduct::default()).unwrap();
        assert_eq!(update.path, "http://localhost:3000/productos/a%20b%2F7");
        assert_eq!(c.build_delete_product(&ProductId::from("42")).path, "http://localhost:3000/productos/42");
    }

    #[test]
    fn build_update_product_produces_correct_request() {
        let input = UpdateProduct {
            nombre: "Mouse Pro".to_string(),
            descripcion: Some("Inalámbrico".to_string()),
            precio: "60".to_string(),
            stock: "8".to_string(),
        };
        let req = client().build_update_product(&ProductId::from("7"), &input).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/productos/7");
        let body = req.body.unwrap();
        let json: serde_json::Value = serde_json::from_str(body.as_json().unwrap()).unwrap();
        assert_eq!(json["nombre"], "Mouse Pro");
        assert!(json.get("id").is_none());
        assert!(json.get("imagen").is_none());
    }

    #[test]
    fn build_delete_product_produces_correct_request() {
        let req = client().build_delete_product(&ProductId::from("7"));
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/productos/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_backup_and_restore_target_their_endpoints() {
        let backup = client().build_backup();
        let restore = client().build_restore();
        assert_eq!(backup.method, HttpMethod::Post);
        assert_eq!(backup.path, "http://localhost:3000/productos/backup");
        assert_eq!(restore.method, HttpMethod::Post);
        assert_eq!(restore.path, "http://localhost:3000/productos/restore");
        assert!(backup.body.is_none() && restore.body.is_none());
    }

    #[test]
    fn parse_list_products_success() {
        let products = client()
            .parse_list_products(response(200, r#"[{"id":1,"nombre":"Test","precio":"1.00","stock":2}]"#))
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].nombre, "Test");
    }

    #[test]
    fn parse_list_products_bad_json() {
        let err = client().parse_list_products(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_create_product_accepts_200_and_201() {
        let body = r#"{"id":1,"nombre":"New","precio":"5","stock":"1"}"#;
        assert_eq!(client().parse_create_product(response(201, body)).unwrap().nombre, "New");
        assert_eq!(client().parse_create_product(response(200, body)).unwrap().nombre, "New");
    }

    #[test]
    fn parse_create_product_wrong_status() {
        let err = client().parse_create_product(response(500, "internal error")).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[test]
    fn parse_update_product_not_found() {
        let err = client().parse_update_product(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_delete_product_tolerates_empty_body() {
        assert_eq!(client().parse_delete_product(response(204, "")).unwrap(), DeleteAck::default());
        let ack = client()
            .parse_delete_product(response(200, r#"{"message":"Producto eliminado"}"#))
            .unwrap();
        assert_eq!(ack.message.as_deref(), Some("Producto eliminado"));
    }

    #[test]
    fn parse_backup_and_restore_counts() {
        assert_eq!(client().parse_backup(response(200, r#"{"copied":3}"#)).unwrap().copied, 3);
        assert_eq!(client().parse_restore(response(200, r#"{"restored":2}"#)).unwrap().restored, 2);
    }

    #[test]
    fn parse_backup_missing_count_is_decode_error() {
        let err = client().parse_backup(response(200, "{}")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ProductClient::new("http://localhost:3000/");
        assert_eq!(client.build_list_products().path, "http://localhost:3000/productos");
    }

    #[test]
    fn from_config_uses_injected_base_url() {
        let client = ProductClient::from_config(&ClientConfig::new("https://shop.example/api/"));
        assert_eq!(client.build_backup().path, "https://shop.example/api/productos/backup");
    }
}
