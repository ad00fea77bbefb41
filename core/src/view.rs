//! Text rendering of the product table and the form.

use std::fmt::Write;

use crate::form::{Field, ProductForm};
use crate::types::Product;

pub const EMPTY_TABLE_MESSAGE: &str = "No hay productos registrados aún.";

const HEADERS: [&str; 5] = ["ID", "Nombre", "Precio", "Stock", "Imagen"];

/// One body row of the product table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    /// Informational row shown instead of products when the list is empty.
    Empty(&'static str),
    Product([String; 5]),
}

pub fn table_rows(products: &[Product]) -> Vec<TableRow> {
    if products.is_empty() {
        return vec![TableRow::Empty(EMPTY_TABLE_MESSAGE)];
    }
    products
        .iter()
        .map(|p| {
            TableRow::Product([
                p.id.to_string(),
                p.nombre.clone(),
                format!("S/. {}", p.precio),
                p.stock.clone(),
                p.imagen_url.clone().unwrap_or_else(|| "-".to_string()),
            ])
        })
        .collect()
}

pub fn render_table(products: &[Product]) -> String {
    let rows = table_rows(products);
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        if let TableRow::Product(cells) = row {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));
    for row in rows {
        match row {
            TableRow::Empty(message) => {
                let _ = writeln!(out, "{message}");
            }
            TableRow::Product(cells) => push_row(&mut out, &cells, &widths),
        }
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}

pub fn submit_label(form: &ProductForm) -> &'static str {
    if form.is_editing() {
        "Actualizar Producto"
    } else {
        "Agregar Producto"
    }
}

pub fn render_form(form: &ProductForm) -> String {
    let mut out = String::new();
    match form.editing_id() {
        Some(id) => {
            let _ = writeln!(out, "Editando producto {id}");
        }
        None => {
            let _ = writeln!(out, "Nuevo producto");
        }
    }
    for field in Field::ALL {
        let _ = writeln!(out, "  {:<12} {}", field.name(), form.field(field));
    }
    let image = match (&form.imagen, &form.imagen_actual) {
        (Some(file), _) => format!("{} ({} bytes)", file.file_name, file.bytes.len()),
        (None, Some(current)) => format!("{current} (actual)"),
        (None, None) => "-".to_string(),
    };
    let _ = writeln!(out, "  {:<12} {image}", "imagen");
    let _ = writeln!(out, "[{}]", submit_label(form));
    out
}
