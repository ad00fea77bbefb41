//! Maps parsed commands onto controller operations and prints the result.
//!
//! Failures are alerted by the controller itself, so this layer only
//! decides what to show after each command.

use std::io::{self, Write};

use productos_core::view::{render_form, render_table};
use productos_core::{DeleteOutcome, ProductsController, Prompt, Transport};

use crate::command::{Command, HELP};
use crate::image::load_image;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn dispatch<T, P, W>(controller: &mut ProductsController<T, P>, command: Command, out: &mut W) -> io::Result<Flow>
where
    T: Transport,
    P: Prompt,
    W: Write,
{
    match command {
        Command::List => {
            if controller.load_products().await.is_ok() {
                write!(out, "{}", render_table(controller.products()))?;
            }
        }
        Command::ShowForm => write!(out, "{}", render_form(controller.form()))?,
        Command::Set(field, value) => controller.set_field(field, value),
        Command::Image(path) => match load_image(&path).await {
            Ok(image) => {
                writeln!(out, "imagen: {} ({} bytes)", image.file_name, image.bytes.len())?;
                controller.attach_image(image);
            }
            Err(err) => writeln!(out, "No se pudo leer {}: {err}", path.display())?,
        },
        Command::Submit => {
            if controller.submit().await.is_ok() {
                write!(out, "{}", render_table(controller.products()))?;
            }
        }
        Command::Edit(id) => {
            if controller.begin_edit_by_id(&id) {
                write!(out, "{}", render_form(controller.form()))?;
            } else {
                writeln!(out, "No existe el producto {id} en la lista")?;
            }
        }
        Command::Cancel => {
            controller.cancel_edit();
            write!(out, "{}", render_form(controller.form()))?;
        }
        Command::Delete(id) => {
            if let Ok(DeleteOutcome::Deleted) = controller.delete(&id).await {
                write!(out, "{}", render_table(controller.products()))?;
            }
        }
        Command::Backup => {
            let _ = controller.backup().await;
        }
        Command::Restore => {
            if controller.restore().await.is_ok() {
                write!(out, "{}", render_table(controller.products()))?;
            }
        }
        Command::Clear => {
            controller.clear_form();
            write!(out, "{}", render_form(controller.form()))?;
        }
        Command::Help => write!(out, "{HELP}")?,
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
