//! Parsing of command-loop input lines.

use std::path::PathBuf;

use productos_core::{Field, ProductId};
use thiserror::Error;

pub const HELP: &str = "\
Comandos:
  list                    recargar y mostrar productos
  show                    mostrar el formulario
  set <campo> <valor>     campo: nombre, descripcion, precio, stock
  image <ruta>            adjuntar imagen (solo al crear)
  submit                  agregar o actualizar producto
  edit <id>               editar un producto de la lista
  cancel                  salir del modo edición
  delete <id>             eliminar producto (pide confirmación)
  backup                  hacer backup
  restore                 restaurar backup
  clear                   limpiar el formulario
  help                    esta ayuda
  quit                    salir
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    ShowForm,
    Set(Field, String),
    Image(PathBuf),
    Submit,
    Edit(ProductId),
    Cancel,
    Delete(ProductId),
    Backup,
    Restore,
    Clear,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("comando desconocido `{0}`; escribe `help`")]
    Unknown(String),
    #[error("falta el argumento <{0}>")]
    MissingArgument(&'static str),
    #[error("campo desconocido `{0}`")]
    UnknownField(String),
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let command = match word.to_lowercase().as_str() {
            "" => return Ok(None),
            "list" | "ls" => Command::List,
            "show" | "form" => Command::ShowForm,
            "set" => {
                let (name, value) = match rest.split_once(char::is_whitespace) {
                    Some((name, value)) => (name, value.trim()),
                    None => (rest, ""),
                };
                if name.is_empty() {
                    return Err(CommandError::MissingArgument("campo"));
                }
                let field = Field::parse(name).ok_or_else(|| CommandError::UnknownField(name.to_string()))?;
                Command::Set(field, value.to_string())
            }
            "image" | "imagen" => Command::Image(PathBuf::from(required(rest, "ruta")?)),
            "submit" | "save" => Command::Submit,
            "edit" => Command::Edit(ProductId::new(required(rest, "id")?)),
            "cancel" => Command::Cancel,
            "delete" | "rm" => Command::Delete(ProductId::new(required(rest, "id")?)),
            "backup" => Command::Backup,
            "restore" => Command::Restore,
            "clear" => Command::Clear,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn required<'a>(rest: &'a str, name: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(name))
    } else {
        Ok(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_line_is_no_command() {
        assert_eq!(Command::parse("   \n"), Ok(None));
    }

    #[test]
    fn set_keeps_spaces_in_value() {
        assert_eq!(
            Command::parse("set descripcion Laptop de alto rendimiento\n"),
            Ok(Some(Command::Set(Field::Descripcion, "Laptop de alto rendimiento".to_string())))
        );
    }

    #[test]
    fn set_without_value_clears_field() {
        assert_eq!(
            Command::parse("set descripcion"),
            Ok(Some(Command::Set(Field::Descripcion, String::new())))
        );
    }

    #[test]
    fn set_rejects_unknown_field() {
        assert_eq!(
            Command::parse("set imagen x.png"),
            Err(CommandError::UnknownField("imagen".to_string()))
        );
    }

    #[test]
    fn commands_with_ids() {
        assert_eq!(Command::parse("edit 7"), Ok(Some(Command::Edit(ProductId::from("7")))));
        assert_eq!(Command::parse("RM 7"), Ok(Some(Command::Delete(ProductId::from("7")))));
        assert_eq!(Command::parse("delete"), Err(CommandError::MissingArgument("id")));
    }

    #[test]
    fn image_path_may_contain_spaces() {
        assert_eq!(
            Command::parse("image /tmp/mi foto.png"),
            Ok(Some(Command::Image(PathBuf::from("/tmp/mi foto.png"))))
        );
    }

    #[test]
    fn unknown_command() {
        assert_eq!(Command::parse("frobnicate"), Err(CommandError::Unknown("frobnicate".to_string())));
    }
}
