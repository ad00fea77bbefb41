//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Comparing parsed JSON (not raw strings) avoids
//! false negatives from field-ordering differences.

use productos_core::multipart::PartValue;
use productos_core::{
    ApiError, BackupReport, CreateProduct, DeleteAck, ErrorKind, HttpMethod, HttpRequest, HttpResponse, ImageFile,
    Product, ProductClient, ProductId, RestoreReport, UpdateProduct,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> ProductClient {
    ProductClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> ErrorKind {
    match s {
        "NotFound" => ErrorKind::NotFound,
        "Server" => ErrorKind::Server,
        "Client" => ErrorKind::Client,
        "Decode" => ErrorKind::Decode,
        other => panic!("unknown expected_error: {other}"),
    }
}

fn load(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap()
}

fn simulated_response(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_target(name: &str, req: &HttpRequest, expected_req: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected_req["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()), "{name}: path");
}

/// Compare a parse result against `expected_result` or `expected_error`.
fn assert_outcome<T>(name: &str, case: &serde_json::Value, result: Result<T, ApiError>)
where
    T: serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
{
    if let Some(expected_error) = case.get("expected_error") {
        let err = result.unwrap_err();
        assert_eq!(err.kind(), parse_kind(expected_error.as_str().unwrap()), "{name}: error kind");
    } else {
        let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(result.unwrap(), expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/list.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_products();
        assert_target(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_list_products(simulated_response(case));
        assert_outcome::<Vec<Product>>(name, case, result);
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/create.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let field = |key: &str| case["input"][key].as_str().unwrap().to_string();
        let imagen = case.get("input_image").map(|img| ImageFile {
            file_name: img["file_name"].as_str().unwrap().to_string(),
            content_type: img["content_type"].as_str().unwrap().to_string(),
            bytes: img["bytes"]
                .as_array()
                .unwrap()
                .iter()
                .map(|b| b.as_u64().unwrap() as u8)
                .collect(),
        });
        let input = CreateProduct {
            nombre: field("nombre"),
            descripcion: field("descripcion"),
            precio: field("precio"),
            stock: field("stock"),
            imagen: imagen.clone(),
        };
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_create_product(&input);
        assert_target(name, &req, expected_req);
        let form = req.body.as_ref().and_then(|b| b.as_multipart()).expect("multipart body");
        let expected_parts = expected_req["parts"].as_array().unwrap();
        assert_eq!(form.parts().len(), expected_parts.len(), "{name}: part count");
        for (part, expected) in form.parts().iter().zip(expected_parts) {
            assert_eq!(part.name, expected["name"].as_str().unwrap(), "{name}: part name");
            match &part.value {
                PartValue::Text(text) => {
                    assert_eq!(text, expected["text"].as_str().unwrap(), "{name}: {}", part.name)
                }
                PartValue::File {
                    file_name,
                    content_type,
                    bytes,
                } => {
                    assert_eq!(file_name, expected["file_name"].as_str().unwrap(), "{name}: file name");
                    assert_eq!(content_type, expected["content_type"].as_str().unwrap(), "{name}: content type");
                    assert_eq!(Some(bytes), imagen.as_ref().map(|i| &i.bytes), "{name}: file bytes");
                }
            }
        }

        // Verify parse
        let result = c.parse_create_product(simulated_response(case));
        assert_outcome::<Product>(name, case, result);
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/update.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = ProductId::new(case["input_id"].as_str().unwrap());
        let input: UpdateProduct = serde_json::from_value(case["input"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_update_product(&id, &input).unwrap();
        assert_target(name, &req, expected_req);
        let req_body: serde_json::Value =
            serde_json::from_str(req.body.as_ref().and_then(|b| b.as_json()).unwrap()).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let result = c.parse_update_product(simulated_response(case));
        assert_outcome::<Product>(name, case, result);
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/delete.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = ProductId::new(case["input_id"].as_str().unwrap());

        let req = c.build_delete_product(&id);
        assert_target(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_delete_product(simulated_response(case));
        assert_outcome::<DeleteAck>(name, case, result);
    }
}

// ---------------------------------------------------------------------------
// Backup / restore
// ---------------------------------------------------------------------------

#[test]
fn backup_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/backup.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_backup();
        assert_target(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_backup(simulated_response(case));
        assert_outcome::<BackupReport>(name, case, result);
    }
}

#[test]
fn restore_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/restore.json"));

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let req = c.build_restore();
        assert_target(name, &req, &case["expected_request"]);
        assert!(req.body.is_none(), "{name}: body should be None");

        let result = c.parse_restore(simulated_response(case));
        assert_outcome::<RestoreReport>(name, case, result);
    }
}
