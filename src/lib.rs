//! PixelDraw - a small language for describing pixel art
//!
//! This library provides functionality to:
//! - Tokenize drawing scripts (`size`, `color`, `point`, `rectangle`, `repeat`)
//! - Check block structure and build a statement tree
//! - Interpret statements into a canvas and an ordered pixel list
//! - Render compiled drawings to PNG images or the terminal
//!
//! ```
//! let drawing = pixeldraw::compile("size 3x3\ncolor #FF0000\nrepeat 2 { point 1 1 }").unwrap();
//! assert_eq!(drawing.canvas().to_string(), "3x3");
//! assert_eq!(drawing.pixels.len(), 2);
//! ```

pub mod cli;
pub mod color;
pub mod compile;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod models;
pub mod output;
pub mod renderer;
pub mod terminal;
pub mod token;
pub mod validate;

pub use compile::{compile, compile_with, CompileConfig};
pub use error::CompileError;
pub use models::Drawing;
