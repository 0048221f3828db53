//! Tokens command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::lexer::lex;

use super::{read_source, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the tokens command - print one token per line with its position
pub fn run_tokens(input: &Path) -> ExitCode {
    let source = match read_source(input) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match lex(&source) {
        Ok(tokens) => {
            for token in &tokens {
                let position = token.position();
                println!("{}:{}\t{}", position.line, position.column, token);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}: lexical error: {}", input.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
