//! Render command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::compile::compile_with;
use crate::config::CliOverrides;
use crate::output::{generate_output_path, save_png};
use crate::renderer::render_drawing;

use super::{read_source, resolve_config, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the render command
pub fn run_render(
    input: &Path,
    output: Option<&Path>,
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

    let (image, warnings) = match render_drawing(&drawing, &config.render_options()) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    for warning in &warnings {
        eprintln!("Warning: {}", warning.message);
    }

    let output_path = generate_output_path(input, output);
    if let Err(e) = save_png(&image, &output_path) {
        eprintln!("Error: Failed to save '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", output_path.display());
    ExitCode::from(EXIT_SUCCESS)
}
