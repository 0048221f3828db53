//! Show command implementation (terminal display)

use std::path::Path;
use std::process::ExitCode;

use crate::compile::compile_with;
use crate::config::CliOverrides;
use crate::terminal::{render_ansi, render_coordinate_grid};

use super::{read_source, resolve_config, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the show command - display a drawing with colored terminal output
pub fn run_show(
    input: &Path,
    coords: bool,
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

    let drawing = match compile_with(&source, &config.compile_config()) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Error: {}: {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if coords {
        return match render_coordinate_grid(&drawing) {
            Ok(grid) => {
                print!("{}", grid);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    match render_ansi(&drawing, config.background()) {
        Ok((output, warnings)) => {
            for warning in &warnings {
                eprintln!("Warning: {}", warning.message);
            }
            print!("{}", output);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
