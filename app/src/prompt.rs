//! Terminal implementation of `Prompt`.

use std::io::{self, Write};

use productos_core::Prompt;

/// Prints alerts to stdout and reads confirmations from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

/// Accepts Spanish and English yes answers; anything else is a no.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

impl Prompt for TerminalPrompt {
    fn alert(&self, message: &str) {
        println!("{message}");
    }

    fn confirm(&self, message: &str) -> bool {
        print!("{message} [s/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(err) => {
                tracing::warn!(error = %err, "could not read confirmation");
                false
            }
        }
    }
}
