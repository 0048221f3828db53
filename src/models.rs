//! Data models for compiled drawings (canvas, pixels, result triple)

use crate::color::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared canvas dimensions. Both are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn contains(&self, x: u64, y: u64) -> bool {
        x < self.width as u64 && y < self.height as u64
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One emitted drawing instruction.
///
/// Pixels are not deduplicated: a later pixel at the same position
/// overwrites an earlier one when the list is applied in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    pub color: Color,
}

impl Pixel {
    pub fn new(x: u32, y: u32, color: Color) -> Self {
        Self { x, y, color }
    }
}

/// The output of a successful compile: canvas size plus ordered pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drawing {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Pixel>,
}

impl Drawing {
    pub fn new(canvas: Canvas, pixels: Vec<Pixel>) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            pixels,
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Resolve last-writer-wins: the color shown at each cell, row-major.
    ///
    /// ```
    /// use pixeldraw::color::Color;
    /// use pixeldraw::models::{Drawing, Pixel};
    ///
    /// let drawing = Drawing {
    ///     width: 2,
    ///     height: 1,
    ///     pixels: vec![
    ///         Pixel::new(0, 0, Color::Named("red".into())),
    ///         Pixel::new(0, 0, Color::Named("blue".into())),
    ///     ],
    /// };
    /// let cells = drawing.cells();
    /// assert_eq!(cells[0][0].as_ref().map(|c| c.as_str()), Some("blue"));
    /// assert!(cells[0][1].is_none());
    /// ```
    pub fn cells(&self) -> Vec<Vec<Option<&Color>>> {
        let mut grid = vec![vec![None; self.width as usize]; self.height as usize];
        for pixel in &self.pixels {
            if let Some(cell) = grid
                .get_mut(pixel.y as usize)
                .and_then(|row| row.get_mut(pixel.x as usize))
            {
                *cell = Some(&pixel.color);
            }
        }
        grid
    }
}

/// A non-fatal message from a rendering backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warning {
    pub message: String,
}

impl Warning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_contains() {
        let canvas = Canvas { width: 10, height: 5 };
        assert!(canvas.contains(0, 0));
        assert!(canvas.contains(9, 4));
        assert!(!canvas.contains(10, 4));
        assert!(!canvas.contains(9, 5));
    }

    #[test]
    fn test_canvas_display() {
        assert_eq!(Canvas { width: 10, height: 10 }.to_string(), "10x10");
    }

    #[test]
    fn test_drawing_json_shape() {
        let drawing = Drawing::new(
            Canvas { width: 2, height: 2 },
            vec![Pixel::new(1, 0, Color::Hex("#FF0000".to_string()))],
        );
        let json = serde_json::to_string(&drawing).unwrap();
        assert_eq!(
            json,
            r##"{"width":2,"height":2,"pixels":[{"x":1,"y":0,"color":"#FF0000"}]}"##
        );
        let parsed: Drawing = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, drawing);
    }

    #[test]
    fn test_cells_last_writer_wins() {
        let red = Color::Named("red".to_string());
        let blue = Color::Named("blue".to_string());
        let drawing = Drawing::new(
            Canvas { width: 2, height: 2 },
            vec![
                Pixel::new(0, 1, red.clone()),
                Pixel::new(1, 1, red.clone()),
                Pixel::new(0, 1, blue.clone()),
            ],
        );
        let cells = drawing.cells();
        assert_eq!(cells[1][0], Some(&blue));
        assert_eq!(cells[1][1], Some(&red));
        assert_eq!(cells[0][0], None);
    }
}
