//! # Productos
//!
//! Terminal screen for managing the product catalogue.

use std::io::{self, Write};

use anyhow::Result;
use productos_app::cmd_args::CommandLineArgs;
use productos_app::{dispatch, logging, Command, Flow, ReqwestTransport, TerminalPrompt};
use productos_core::view::render_table;
use productos_core::{ProductClient, ProductsController};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = CommandLineArgs::parse();
    logging::init(args.verbose());

    let config = args.config();
    tracing::info!(base_url = %config.base_url, "starting");

    let transport = ReqwestTransport::new()?;
    let mut controller = ProductsController::new(ProductClient::from_config(&config), transport, TerminalPrompt);
    let mut stdout = io::stdout();

    println!("🛍️  Productos ({})", config.base_url);
    println!("Escribe `help` para ver los comandos.\n");

    if controller.mount().await.is_ok() {
        print!("{}", render_table(controller.products()));
    }

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        match Command::parse(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => {
                if dispatch(&mut controller, command, &mut stdout).await? == Flow::Quit {
                    break;
                }
            }
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}
