//! Compile entry point: source text to a resolved drawing
//!
//! Sequences lexer, structural validator and interpreter. Each stage runs
//! to completion before the next one starts.

use crate::color::Color;
use crate::error::CompileError;
use crate::interpreter::Interpreter;
use crate::lexer::lex;
use crate::models::Drawing;
use crate::validate::validate;

/// Settings for one compile call.
///
/// The default is black as the starting color and no cap beyond
/// [`PIXEL_CEILING`](crate::interpreter::PIXEL_CEILING).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompileConfig {
    /// Drawing color before the first `color` statement
    pub default_color: Color,
    /// Abort once more than this many pixels would be emitted
    pub max_pixels: Option<usize>,
}

impl CompileConfig {
    pub fn with_default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    pub fn with_max_pixels(mut self, max_pixels: usize) -> Self {
        self.max_pixels = Some(max_pixels);
        self
    }
}

/// Compile source text with the default configuration.
///
/// # Examples
///
/// ```
/// let drawing = pixeldraw::compile("size 4x2\ncolor red\nrectangle 0 0 2 1").unwrap();
/// assert_eq!((drawing.width, drawing.height), (4, 2));
/// assert_eq!(drawing.pixels.len(), 2);
/// ```
///
/// # Errors
///
/// Returns the first [`CompileError`] raised by any stage.
pub fn compile(source: &str) -> Result<Drawing, CompileError> {
    compile_with(source, &CompileConfig::default())
}

/// Compile source text with an explicit configuration.
///
/// # Errors
///
/// Returns the first [`CompileError`] raised by any stage.
pub fn compile_with(source: &str, config: &CompileConfig) -> Result<Drawing, CompileError> {
    let _span = tracing::info_span!("compile", bytes = source.len()).entered();

    let tokens = lex(source)?;
    let program = validate(&tokens)?;

    let mut interpreter = Interpreter::new(config.max_pixels);
    let (canvas, pixels) =
        interpreter.interpret(&program.statements, None, config.default_color.clone())?;

    tracing::debug!(%canvas, pixels = pixels.len(), "compiled drawing");
    Ok(Drawing::new(canvas, pixels))
}
