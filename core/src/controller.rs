//! View/controller for the product screen.
//!
//! # Design
//! `ProductsController` owns the only mutable state of the screen: the
//! product list and the form draft. Every user intent is one method; the
//! network round-trip goes through the injected `Transport` and user-facing
//! messages through the injected `Prompt`, so the whole flow runs against
//! scripted fakes in tests. The list is replaced wholesale after every
//! successful mutation and is never patched locally.
//!
//! Every failing action, list loads included, is logged and alerted, then
//! returned to the caller. Form and list are left untouched on failure.

use crate::client::ProductClient;
use crate::error::ApiError;
use crate::form::{Field, ProductForm};
use crate::http::Transport;
use crate::types::{BackupReport, ImageFile, Product, ProductId, RestoreReport};

pub const CONFIRM_DELETE: &str = "¿Deseas eliminar este producto?";

const LOAD_FAILED: &str = "Error al cargar productos";
const SAVE_FAILED: &str = "Error al guardar producto";
const DELETE_FAILED: &str = "Error al eliminar producto";
const BACKUP_FAILED: &str = "Error al hacer backup";
const RESTORE_FAILED: &str = "Error al restaurar backup";

/// User interaction surface: blocking alerts and yes/no confirmations.
pub trait Prompt {
    fn alert(&self, message: &str);
    fn confirm(&self, message: &str) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined the confirmation; nothing was sent.
    Cancelled,
    Deleted,
}

pub struct ProductsController<T, P> {
    client: ProductClient,
    transport: T,
    prompt: P,
    products: Vec<Product>,
    form: ProductForm,
}

impl<T: Transport, P: Prompt> ProductsController<T, P> {
    pub fn new(client: ProductClient, transport: T, prompt: P) -> Self {
        Self {
            client,
            transport,
            prompt,
            products: Vec::new(),
            form: ProductForm::new(),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Initial load when the screen opens.
    pub async fn mount(&mut self) -> Result<(), ApiError> {
        self.load_products().await
    }

    pub async fn load_products(&mut self) -> Result<(), ApiError> {
        match self.fetch_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "product list loaded");
                self.products = products;
                Ok(())
            }
            Err(err) => Err(self.fail(LOAD_FAILED, err)),
        }
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn attach_image(&mut self, image: ImageFile) {
        self.form.imagen = Some(image);
    }

    pub fn begin_edit(&mut self, product: &Product) {
        self.form.load(product);
    }

    /// Start editing the listed product with `id`. Returns `false` when the
    /// current list has no such product.
    pub fn begin_edit_by_id(&mut self, id: &ProductId) -> bool {
        match self.products.iter().find(|p| &p.id == id) {
            Some(product) => {
                self.form.load(product);
                true
            }
            None => false,
        }
    }

    /// Reset the draft. Also leaves edit mode: an update without the id it
    /// was routed by cannot be submitted.
    pub fn clear_form(&mut self) {
        self.form.clear();
    }

    pub fn cancel_edit(&mut self) {
        if let Some(id) = self.form.editing_id() {
            tracing::debug!(%id, "edit cancelled");
        }
        self.form.clear();
    }

    /// Create or update depending on the form mode, then reset the form and
    /// reload the list.
    pub async fn submit(&mut self) -> Result<Product, ApiError> {
        match self.save().await {
            Ok(product) => {
                tracing::info!(id = %product.id, "product saved");
                self.form.clear();
                self.reload().await;
                Ok(product)
            }
            Err(err) => Err(self.fail(SAVE_FAILED, err)),
        }
    }

    pub async fn delete(&mut self, id: &ProductId) -> Result<DeleteOutcome, ApiError> {
        if !self.prompt.confirm(CONFIRM_DELETE) {
            tracing::debug!(%id, "delete declined");
            return Ok(DeleteOutcome::Cancelled);
        }
        let request = self.client.build_delete_product(id);
        let result = match self.transport.execute(request).await {
            Ok(response) => self.client.parse_delete_product(response),
            Err(err) => Err(err),
        };
        match result {
            Ok(_) => {
                tracing::info!(%id, "product deleted");
                self.reload().await;
                Ok(DeleteOutcome::Deleted)
            }
            Err(err) => Err(self.fail(DELETE_FAILED, err)),
        }
    }

    pub async fn backup(&mut self) -> Result<BackupReport, ApiError> {
        let result = match self.transport.execute(self.client.build_backup()).await {
            Ok(response) => self.client.parse_backup(response),
            Err(err) => Err(err),
        };
        match result {
            Ok(report) => {
                tracing::info!(copied = report.copied, "backup finished");
                self.prompt.alert(&format!(
                    "✅ Backup realizado correctamente. Archivos copiados: {}",
                    report.copied
                ));
                Ok(report)
            }
            Err(err) => Err(self.fail(BACKUP_FAILED, err)),
        }
    }

    /// Restore may change which products and images exist, so the list is
    /// reloaded afterwards.
    pub async fn restore(&mut self) -> Result<RestoreReport, ApiError> {
        let result = match self.transport.execute(self.client.build_restore()).await {
            Ok(response) => self.client.parse_restore(response),
            Err(err) => Err(err),
        };
        match result {
            Ok(report) => {
                tracing::info!(restored = report.restored, "restore finished");
                self.prompt.alert(&format!(
                    "✅ Restauración completa. Archivos restaurados: {}",
                    report.restored
                ));
                self.reload().await;
                Ok(report)
            }
            Err(err) => Err(self.fail(RESTORE_FAILED, err)),
        }
    }

    /// Refresh after a successful mutation. The mutation's own result
    /// stands; a failed refresh is reported by `load_products`.
    async fn reload(&mut self) {
        let _ = self.load_products().await;
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.transport.execute(self.client.build_list_products()).await?;
        self.client.parse_list_products(response)
    }

    async fn save(&self) -> Result<Product, ApiError> {
        self.form.validate()?;
        match self.form.editing_id() {
            None => {
                let request = self.client.build_create_product(&self.form.to_create());
                let response = self.transport.execute(request).await?;
                self.client.parse_create_product(response)
            }
            Some(id) => {
                let request = self.client.build_update_product(id, &self.form.to_update())?;
                let response = self.transport.execute(request).await?;
                self.client.parse_update_product(response)
            }
        }
    }

    fn fail(&self, context: &str, err: ApiError) -> ApiError {
        tracing::error!(error = %err, kind = ?err.kind(), "{context}");
        self.prompt.alert(&format!("❌ {context}: {}", err.kind().hint()));
        err
    }
}
