use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub nombre: String,
    pub descripcion: Option<String>,
    /// Fixed two-decimal text, the way a NUMERIC column comes back.
    pub precio: String,
    pub stock: i64,
    pub imagen: Option<String>,
    pub imagen_url: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateProduct {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub precio: String,
    pub stock: String,
}

#[derive(Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct BackupReport {
    pub copied: usize,
}

#[derive(Serialize, Deserialize)]
pub struct RestoreReport {
    pub restored: usize,
}

#[derive(Clone, Debug)]
pub struct StoredImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Records and image files, plus the snapshot taken by the last backup.
#[derive(Default)]
pub struct Store {
    next_id: u64,
    products: BTreeMap<u64, Product>,
    images: HashMap<String, StoredImage>,
    backup: Option<(BTreeMap<u64, Product>, HashMap<String, StoredImage>)>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/productos", get(list_products).post(create_product))
        .route("/productos/backup", post(backup))
        .route("/productos/restore", post(restore))
        .route("/productos/{id}", put(update_product).delete(delete_product))
        .route("/imagenes/{key}", get(get_image))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let store = db.read().await;
    Json(store.products.values().cloned().collect())
}

async fn create_product(
    State(db): State<Db>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Product>), StatusCode> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut upload: Option<(String, StoredImage)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|_| StatusCode::BAD_REQUEST)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "imagen" {
            let file_name = field.file_name().unwrap_or("imagen").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            upload = Some((
                file_name,
                StoredImage {
                    content_type,
                    bytes: bytes.to_vec(),
                },
            ));
        } else {
            let text = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
            fields.insert(name, text);
        }
    }

    let nombre = fields
        .remove("nombre")
        .filter(|n| !n.trim().is_empty())
        .ok_or(StatusCode::BAD_REQUEST)?;
    let precio = parse_price(fields.get("precio").map(String::as_str).unwrap_or(""))?;
    let stock = parse_stock(fields.get("stock").map(String::as_str).unwrap_or(""))?;

    let mut store = db.write().await;
    let (imagen, imagen_url) = match upload {
        Some((file_name, image)) => {
            let key = format!("{}-{}", Uuid::new_v4().simple(), sanitize(&file_name));
            store.images.insert(key.clone(), image);
            let url = image_url(&key);
            (Some(key), Some(url))
        }
        None => (None, None),
    };
    store.next_id += 1;
    let product = Product {
        id: store.next_id,
        nombre,
        descripcion: fields.remove("descripcion").filter(|d| !d.is_empty()),
        precio,
        stock,
        imagen,
        imagen_url,
    };
    store.products.insert(product.id, product.clone());
    tracing::info!(id = product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>, StatusCode> {
    if input.nombre.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let precio = parse_price(&input.precio)?;
    let stock = parse_stock(&input.stock)?;

    let mut store = db.write().await;
    let product = store.products.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    product.nombre = input.nombre;
    product.descripcion = input.descripcion.filter(|d| !d.is_empty());
    product.precio = precio;
    product.stock = stock;
    Ok(Json(product.clone()))
}

async fn delete_product(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Message>, StatusCode> {
    let mut store = db.write().await;
    let product = store.products.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(key) = product.imagen {
        store.images.remove(&key);
    }
    tracing::info!(id, "product deleted");
    Ok(Json(Message {
        message: "Producto eliminado".to_string(),
    }))
}

async fn backup(State(db): State<Db>) -> Json<BackupReport> {
    let mut store = db.write().await;
    let copied = store.images.len();
    let snapshot = (store.products.clone(), store.images.clone());
    store.backup = Some(snapshot);
    Json(BackupReport { copied })
}

/// Reinstates the last backup. Without one there is nothing to restore.
async fn restore(State(db): State<Db>) -> Json<RestoreReport> {
    let mut store = db.write().await;
    let Some((products, images)) = store.backup.clone() else {
        return Json(RestoreReport { restored: 0 });
    };
    let restored = images.len();
    let next_id = store.next_id.max(products.keys().max().copied().unwrap_or(0));
    store.next_id = next_id;
    store.products = products;
    store.images = images;
    Json(RestoreReport { restored })
}

async fn get_image(State(db): State<Db>, Path(key): Path<String>) -> Result<impl IntoResponse, StatusCode> {
    let store = db.read().await;
    let image = store.images.get(&key).cloned().ok_or(StatusCode::NOT_FOUND)?;
    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes))
}

fn image_url(key: &str) -> String {
    format!("/imagenes/{key}")
}

/// Keeps image keys usable as a single path segment.
fn sanitize(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect()
}

fn parse_price(raw: &str) -> Result<String, StatusCode> {
    let value: f64 = raw.trim().parse().map_err(|_| StatusCode::BAD_REQUEST)?;
    if !value.is_finite() || value < 0.0 {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(format!("{value:.2}"))
}

fn parse_stock(raw: &str) -> Result<i64, StatusCode> {
    raw.trim().parse().map_err(|_| StatusCode::BAD_REQUEST)
}
