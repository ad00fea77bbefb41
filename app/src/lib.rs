//! # Productos terminal front-end
//!
//! Drives `productos_core::ProductsController` from a line-oriented command
//! loop. This crate supplies the host side of the host-does-IO split: the
//! reqwest `Transport`, the terminal `Prompt`, image loading from disk,
//! command-line parsing and logging setup.

pub mod cmd_args;
pub mod command;
pub mod image;
pub mod logging;
pub mod prompt;
pub mod session;
pub mod transport;

pub use command::Command;
pub use prompt::TerminalPrompt;
pub use session::{dispatch, Flow};
pub use transport::ReqwestTransport;
