//! Terminal rendering of compiled drawings
//!
//! Provides ANSI escape sequence output for previewing a drawing in
//! terminal emulators that support 24-bit color, plus a plain coordinate
//! grid for terminals that do not.

use crate::models::{Drawing, Warning};
use crate::renderer::{render_drawing, RenderError, RenderOptions};
use image::{Rgba, RgbaImage};

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Largest canvas width or height printed as a coordinate grid
pub const MAX_GRID_DIMENSION: u32 = 1024;

/// Convert RGBA color to ANSI 24-bit background escape sequence.
///
/// Transparent colors (alpha = 0) are rendered as a dark gray background.
///
/// ```
/// use pixeldraw::terminal::color_to_ansi_bg;
/// use image::Rgba;
///
/// assert_eq!(color_to_ansi_bg(Rgba([255, 0, 0, 255])), "\x1b[48;2;255;0;0m");
/// assert_eq!(color_to_ansi_bg(Rgba([0, 0, 0, 0])), "\x1b[48;5;236m");
/// ```
pub fn color_to_ansi_bg(rgba: Rgba<u8>) -> String {
    if rgba[3] == 0 {
        "\x1b[48;5;236m".to_string()
    } else {
        format!("\x1b[48;2;{};{};{}m", rgba[0], rgba[1], rgba[2])
    }
}

/// Convert RGBA color to ANSI 24-bit foreground escape sequence.
pub fn color_to_ansi_fg(rgba: Rgba<u8>) -> String {
    if rgba[3] == 0 {
        "\x1b[38;5;236m".to_string()
    } else {
        format!("\x1b[38;2;{};{};{}m", rgba[0], rgba[1], rgba[2])
    }
}

/// Render a drawing as colored terminal output, one cell per character.
///
/// Two grid rows share a line: each character is an upper half block whose
/// foreground is the top cell and background the bottom cell.
///
/// # Errors
///
/// Returns `RenderError` if the canvas is too large to render.
pub fn render_ansi(
    drawing: &Drawing,
    background: Rgba<u8>,
) -> Result<(String, Vec<Warning>), RenderError> {
    let options = RenderOptions {
        scale: 1,
        background,
        grid: false,
    };
    let (image, warnings) = render_drawing(drawing, &options)?;
    Ok((render_image_ansi(&image), warnings))
}

/// Render an RGBA image to ANSI terminal output using half blocks.
pub fn render_image_ansi(image: &RgbaImage) -> String {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return String::new();
    }

    let mut output = String::new();
    for y in (0..height).step_by(2) {
        for x in 0..width {
            let top = *image.get_pixel(x, y);
            // Odd heights leave the last bottom half empty
            let bottom = if y + 1 < height {
                *image.get_pixel(x, y + 1)
            } else {
                Rgba([0, 0, 0, 0])
            };
            output.push_str(&color_to_ansi_bg(bottom));
            output.push_str(&color_to_ansi_fg(top));
            output.push('\u{2580}'); // ▀
        }
        output.push_str(ANSI_RESET);
        output.push('\n');
    }
    output
}

/// Render the canvas with row/column coordinate headers.
///
/// Painted cells show `#`, untouched cells `.`.
///
/// ```
/// let drawing = pixeldraw::compile("size 3x2 point 1 0 point 2 1").unwrap();
/// let output = pixeldraw::terminal::render_coordinate_grid(&drawing).unwrap();
/// assert!(output.contains(" 0 \u{2502}  .  #  ."));
/// assert!(output.contains(" 1 \u{2502}  .  .  #"));
/// ```
///
/// # Errors
///
/// Returns `RenderError::TooLarge` if either side exceeds [`MAX_GRID_DIMENSION`].
pub fn render_coordinate_grid(drawing: &Drawing) -> Result<String, RenderError> {
    if drawing.width > MAX_GRID_DIMENSION || drawing.height > MAX_GRID_DIMENSION {
        return Err(RenderError::TooLarge {
            width: drawing.width as u64,
            height: drawing.height as u64,
            max: MAX_GRID_DIMENSION,
        });
    }

    let cells = drawing.cells();
    if cells.is_empty() {
        return Ok(String::new());
    }

    let max_cols = drawing.width as usize;
    let row_num_width = (cells.len().saturating_sub(1)).to_string().len().max(2);
    let mut output = String::new();

    // Column header line
    output.push_str(&" ".repeat(row_num_width + 1));
    for col in 0..max_cols {
        output.push_str(&format!("{:>3}", col));
    }
    output.push('\n');

    // Border line
    output.push_str(&" ".repeat(row_num_width));
    output.push_str(" \u{250C}"); // ┌
    output.push_str(&"\u{2500}".repeat(max_cols * 3)); // ─
    output.push('\n');

    for (row_idx, row) in cells.iter().enumerate() {
        output.push_str(&format!("{:>width$} \u{2502}", row_idx, width = row_num_width)); // │
        for cell in row {
            let mark = if cell.is_some() { '#' } else { '.' };
            output.push_str(&format!("{:>3}", mark));
        }
        output.push('\n');
    }

    Ok(output)
}
