//! Drawing rendering to image buffers
//!
//! Paints a compiled [`Drawing`] onto an RGBA image. Each grid cell becomes a
//! `scale x scale` square; pixels are painted in list order, so later
//! entries win where they overlap.

use crate::color::Color;
use crate::models::{Drawing, Warning};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use thiserror::Error;

/// Magenta color used for colors that cannot be resolved
const MAGENTA: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// Cell outline color, matching a plain gray
const OUTLINE: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Largest width or height of a rendered image, in screen pixels
pub const MAX_IMAGE_DIMENSION: u32 = 16384;

/// Smallest scale at which cell outlines are drawn
const MIN_OUTLINE_SCALE: u32 = 3;

/// Error type for rendering failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("scale must be at least 1")]
    ZeroScale,
    #[error("rendered output {width}x{height} exceeds the maximum dimension {max}")]
    TooLarge { width: u64, height: u64, max: u32 },
}

/// How a drawing is turned into an image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Screen pixels per grid cell
    pub scale: u32,
    /// Fill for cells no pixel touches
    pub background: Rgba<u8>,
    /// Draw a 1px gray outline around every painted cell
    pub grid: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 20,
            background: Rgba([255, 255, 255, 255]),
            grid: true,
        }
    }
}

/// Render a drawing to an RGBA image buffer.
///
/// Unresolvable color names are painted magenta with one warning per name.
///
/// # Examples
///
/// ```
/// use pixeldraw::renderer::{render_drawing, RenderOptions};
///
/// let drawing = pixeldraw::compile("size 2x1 color #FF0000 point 1 0").unwrap();
/// let options = RenderOptions { scale: 1, ..Default::default() };
/// let (image, warnings) = render_drawing(&drawing, &options).unwrap();
/// assert_eq!(image.dimensions(), (2, 1));
/// assert_eq!(*image.get_pixel(1, 0), image::Rgba([255, 0, 0, 255]));
/// assert!(warnings.is_empty());
/// ```
///
/// # Errors
///
/// Returns `RenderError` for a zero scale or an image that would be too large.
pub fn render_drawing(
    drawing: &Drawing,
    options: &RenderOptions,
) -> Result<(RgbaImage, Vec<Warning>), RenderError> {
    if options.scale == 0 {
        return Err(RenderError::ZeroScale);
    }

    let scale = options.scale;
    let image_width = drawing.width as u64 * scale as u64;
    let image_height = drawing.height as u64 * scale as u64;
    if image_width > MAX_IMAGE_DIMENSION as u64 || image_height > MAX_IMAGE_DIMENSION as u64 {
        return Err(RenderError::TooLarge {
            width: image_width,
            height: image_height,
            max: MAX_IMAGE_DIMENSION,
        });
    }

    let mut warnings = Vec::new();
    let mut color_cache: HashMap<&Color, Rgba<u8>> = HashMap::new();
    let mut image = RgbaImage::from_pixel(image_width as u32, image_height as u32, options.background);
    let outline = options.grid && scale >= MIN_OUTLINE_SCALE;

    for pixel in &drawing.pixels {
        // Out-of-canvas pixels cannot come out of the compiler; skip rather than panic
        if pixel.x >= drawing.width || pixel.y >= drawing.height {
            warnings.push(Warning::new(format!(
                "Pixel ({},{}) is outside the {}x{} canvas, skipping",
                pixel.x, pixel.y, drawing.width, drawing.height
            )));
            continue;
        }

        let rgba = *color_cache.entry(&pixel.color).or_insert_with(|| {
            pixel.color.to_rgba().unwrap_or_else(|e| {
                warnings.push(Warning::new(format!(
                    "Invalid color '{}': {}, using magenta",
                    pixel.color, e
                )));
                MAGENTA
            })
        });

        let x0 = pixel.x * scale;
        let y0 = pixel.y * scale;
        for dy in 0..scale {
            for dx in 0..scale {
                let edge = dx == 0 || dy == 0 || dx == scale - 1 || dy == scale - 1;
                let color = if outline && edge { OUTLINE } else { rgba };
                image.put_pixel(x0 + dx, y0 + dy, color);
            }
        }
    }

    Ok((image, warnings))
}
