//! API client core and screen logic for the product catalogue.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and drives the product
//! screen (list, create/edit form, delete, backup, restore) through an
//! injected `Transport` and `Prompt`.
//!
//! # Design
//! - `ProductClient` is stateless: it holds only `base_url`, which comes
//!   from `ClientConfig` rather than a compiled-in constant.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `ProductsController` owns the list and the form draft; it is generic
//!   over `Transport` and `Prompt` so it runs against fakes in tests.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod http;
pub mod multipart;
pub mod types;
pub mod view;

pub use client::ProductClient;
pub use config::ClientConfig;
pub use controller::{DeleteOutcome, ProductsController, Prompt};
pub use error::{ApiError, ErrorKind};
pub use form::{Field, FormMode, ProductForm};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport};
pub use types::{BackupReport, CreateProduct, DeleteAck, ImageFile, Product, ProductId, RestoreReport, UpdateProduct};
