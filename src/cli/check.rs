//! Check command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::compile::compile_with;
use crate::config::CliOverrides;

use super::{read_source, resolve_config, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the check command
pub fn run_check(
    input: &Path,
    json: bool,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let config = match resolve_config(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let source = match read_source(input) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match compile_with(&source, &config.compile_config()) {
        Ok(drawing) => {
            if json {
                match serde_json::to_string_pretty(&drawing) {
                    Ok(s) => println!("{}", s),
                    Err(e) => {
                        eprintln!("Error: Failed to serialize drawing: {}", e);
                        return ExitCode::from(EXIT_ERROR);
                    }
                }
            } else {
                println!(
                    "OK: {} ({}, {} pixels)",
                    input.display(),
                    drawing.canvas(),
                    drawing.pixels.len()
                );
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            if json {
                let report = serde_json::json!({
                    "valid": false,
                    "kind": e.kind(),
                    "message": e.to_string(),
                });
                println!("{}", report);
            } else {
                eprintln!("Error: {}: {}", input.display(), e);
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}
