use std::ffi::OsString;

pub use clap::Parser;
use productos_core::config::{BASE_URL_ENV_VAR, DEFAULT_BASE_URL};
use productos_core::ClientConfig;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Base URL of the product API. The `/productos` path is appended to it.
    #[arg(short = 'u', long, env = BASE_URL_ENV_VAR, default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    api_url: String,
    verbose: u8,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
    }
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            api_url: args.api_url,
            verbose: args.verbose,
        }
    }
}
