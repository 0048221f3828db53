//! PNG output and file path generation

use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Generate the output path for a rendered drawing.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `<input_stem>.png` next to the input |
/// | `-o out.png` | `out.png` |
/// | `-o dir/` or an existing directory | `dir/<input_stem>.png` |
pub fn generate_output_path(input: &Path, output_arg: Option<&Path>) -> PathBuf {
    let file_name = format!(
        "{}.png",
        input.file_stem().and_then(|s| s.to_str()).unwrap_or("output")
    );

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => input.with_file_name(file_name),
    }
}
