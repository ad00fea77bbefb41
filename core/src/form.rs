//! Create/edit form draft and its edit-mode state machine.
//!
//! The draft mirrors a product's text fields plus the image picked for
//! upload. `FormMode` decides what a submit does: `Creating` produces a
//! `CreateProduct`, `Editing` produces an `UpdateProduct` routed by the id
//! stored in the mode itself, so an update can never be built without one.

use crate::error::ApiError;
use crate::types::{CreateProduct, ImageFile, Product, ProductId, UpdateProduct};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Creating,
    Editing { id: ProductId },
}

/// Editable text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Nombre,
    Descripcion,
    Precio,
    Stock,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Nombre, Field::Descripcion, Field::Precio, Field::Stock];

    pub fn name(self) -> &'static str {
        match self {
            Field::Nombre => "nombre",
            Field::Descripcion => "descripcion",
            Field::Precio => "precio",
            Field::Stock => "stock",
        }
    }

    pub fn parse(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name().eq_ignore_ascii_case(name))
    }

    fn required(self) -> bool {
        !matches!(self, Field::Descripcion)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    mode: FormMode,
    pub nombre: String,
    /// `None` until typed into, or when the edited product had none.
    pub descripcion: Option<String>,
    pub precio: String,
    pub stock: String,
    /// File picked for upload; only sent when creating.
    pub imagen: Option<ImageFile>,
    /// Image key copied from the product being edited. Never sent back.
    pub imagen_actual: Option<String>,
}

impl ProductForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Editing { .. })
    }

    /// Id of the product being edited.
    pub fn editing_id(&self) -> Option<&ProductId> {
        match &self.mode {
            FormMode::Editing { id } => Some(id),
            FormMode::Creating => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Nombre => &self.nombre,
            Field::Descripcion => self.descripcion.as_deref().unwrap_or_default(),
            Field::Precio => &self.precio,
            Field::Stock => &self.stock,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Nombre => self.nombre = value,
            Field::Descripcion => self.descripcion = Some(value),
            Field::Precio => self.precio = value,
            Field::Stock => self.stock = value,
        }
    }

    /// Copy `product` into the draft verbatim and switch to editing it.
    pub fn load(&mut self, product: &Product) {
        *self = Self {
            mode: FormMode::Editing { id: product.id.clone() },
            nombre: product.nombre.clone(),
            descripcion: product.descripcion.clone(),
            precio: product.precio.clone(),
            stock: product.stock.clone(),
            imagen: None,
            imagen_actual: product.imagen.clone(),
        };
        tracing::debug!(id = %product.id, "form switched to editing");
    }

    /// Reset every field and return to `Creating`.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// First required field that is blank, if any.
    pub fn validate(&self) -> Result<(), ApiError> {
        match Field::ALL
            .into_iter()
            .find(|f| f.required() && self.field(*f).trim().is_empty())
        {
            Some(missing) => Err(ApiError::MissingField(missing.name())),
            None => Ok(()),
        }
    }

    pub fn to_create(&self) -> CreateProduct {
        CreateProduct {
            nombre: self.nombre.clone(),
            descripcion: self.descripcion.clone().unwrap_or_default(),
            precio: self.precio.clone(),
            stock: self.stock.clone(),
            imagen: self.imagen.clone(),
        }
    }

    pub fn to_update(&self) -> UpdateProduct {
        UpdateProduct {
            nombre: self.nombre.clone(),
            descripcion: self.descripcion.clone(),
            precio: self.precio.clone(),
            stock: self.stock.clone(),
        }
    }
}
