//! Semantic interpretation of a validated program
//!
//! Walks the block tree in order, keeping the current canvas and drawing
//! color, validating coordinates and accumulating pixels. Repeat bodies run
//! as fresh interpretations seeded with a copy of the enclosing state, so
//! nothing they change leaks into the next iteration or back out.

use crate::color::{Color, ColorError};
use crate::models::{Canvas, Pixel};
use crate::token::{Position, Token};
use crate::validate::Statement;
use thiserror::Error;

/// Error raised while giving meaning to a structurally valid program
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// Drawing before any `size` statement
    #[error("canvas not set: '{lexeme}' at {position} comes before any size declaration")]
    CanvasNotSet { lexeme: String, position: Position },
    /// A pixel outside the current canvas
    #[error("point ({x},{y}) at {position} is outside the canvas size {canvas}")]
    OutOfBounds {
        x: u64,
        y: u64,
        canvas: Canvas,
        position: Position,
    },
    /// No `size` statement by the end of the run
    #[error("canvas size not defined, add a 'size WxH' statement")]
    CanvasNotDefined,
    /// `size` with a zero dimension
    #[error("invalid canvas size '{lexeme}' at {position}, width and height must be positive")]
    InvalidCanvasSize { lexeme: String, position: Position },
    /// An argument that does not fit its integer type
    #[error("invalid number '{text}' in '{lexeme}' at {position}")]
    InvalidNumber {
        text: String,
        lexeme: String,
        position: Position,
    },
    /// `repeat` whose count cannot be read
    #[error("invalid repeat count in '{lexeme}' at {position}")]
    InvalidRepeatCount { lexeme: String, position: Position },
    /// `color` whose literal is not a hex value or name
    #[error("invalid color in '{lexeme}' at {position}: {source}")]
    InvalidColor {
        lexeme: String,
        position: Position,
        #[source]
        source: ColorError,
    },
    /// A command token missing its arguments
    #[error("malformed statement '{lexeme}' at {position}")]
    MalformedStatement { lexeme: String, position: Position },
    /// More pixels than the configured cap
    #[error("drawing exceeds the limit of {limit} pixels at {position}")]
    PixelLimitExceeded { limit: usize, position: Position },
}

/// Result of one interpretation run.
pub type Interpretation = (Canvas, Vec<Pixel>);

/// Most pixels one interpretation may emit, whatever cap is requested.
pub const PIXEL_CEILING: usize = 10_000_000;

/// Stateful walker; carries the pixel budget across nested runs.
#[derive(Debug, Clone)]
pub struct Interpreter {
    limit: usize,
    emitted: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Per-run state, seeded from the enclosing context.
struct Scope {
    canvas: Option<Canvas>,
    color: Color,
    pixels: Vec<Pixel>,
}

impl Interpreter {
    /// `max_pixels` is clamped to [`PIXEL_CEILING`]; `None` means the ceiling.
    pub fn new(max_pixels: Option<usize>) -> Self {
        Self {
            limit: max_pixels.map_or(PIXEL_CEILING, |cap| cap.min(PIXEL_CEILING)),
            emitted: 0,
        }
    }

    /// Effective pixel limit for this interpreter.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Total pixels emitted so far, across all runs of this interpreter.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Run `statements` starting from the inherited canvas and color.
    ///
    /// # Errors
    ///
    /// Returns the first [`SemanticError`]; fails with
    /// [`SemanticError::CanvasNotDefined`] if no canvas is in force at the end.
    pub fn interpret(
        &mut self,
        statements: &[Statement],
        inherited_canvas: Option<Canvas>,
        inherited_color: Color,
    ) -> Result<Interpretation, SemanticError> {
        let mut scope = Scope {
            canvas: inherited_canvas,
            color: inherited_color,
            pixels: Vec::new(),
        };

        for statement in statements {
            self.execute(statement, &mut scope)?;
        }

        match scope.canvas {
            Some(canvas) => Ok((canvas, scope.pixels)),
            None => Err(SemanticError::CanvasNotDefined),
        }
    }

    fn execute(&mut self, statement: &Statement, scope: &mut Scope) -> Result<(), SemanticError> {
        let token = statement.token();
        tracing::trace!(position = %token.position(), "{}", token);

        match statement {
            Statement::Size(token) => {
                let canvas = parse_size(token)?;
                tracing::trace!(%canvas, "canvas size");
                scope.canvas = Some(canvas);
            }
            Statement::Color(token) => {
                scope.color = parse_color(token)?;
                tracing::trace!(color = %scope.color, "current color");
            }
            Statement::Point(token) => {
                let [x, y] = parse_numbers::<2>(token)?;
                self.plot(scope, token, x as u64, y as u64)?;
            }
            Statement::Rectangle(token) => {
                let [x, y, w, h] = parse_numbers::<4>(token)?;
                // x-major: the whole first column, then the next
                for dx in 0..w as u64 {
                    for dy in 0..h as u64 {
                        self.plot(scope, token, x as u64 + dx, y as u64 + dy)?;
                    }
                }
            }
            Statement::Repeat { begin, body } => {
                let count = parse_repeat_count(begin)?;
                let _span = tracing::trace_span!("repeat", count).entered();
                self.repeat(scope, begin, body, count)?;
            }
        }
        Ok(())
    }

    fn repeat(
        &mut self,
        scope: &mut Scope,
        begin: &Token,
        body: &[Statement],
        count: u32,
    ) -> Result<(), SemanticError> {
        if count == 0 {
            return Ok(());
        }

        // Every iteration starts from the same snapshot, so each one yields
        // the same pixels; run it once and replay the result.
        let (_, iteration) = self.interpret(body, scope.canvas, scope.color.clone())?;
        if iteration.is_empty() {
            return Ok(());
        }

        let extra = (iteration.len() as u64).saturating_mul(count as u64 - 1);
        if (self.emitted as u64).saturating_add(extra) > self.limit as u64 {
            return Err(SemanticError::PixelLimitExceeded {
                limit: self.limit,
                position: begin.position(),
            });
        }
        // Bounded by the limit check above
        self.emitted += extra as usize;
        scope.pixels.reserve(iteration.len() * count as usize);

        for _ in 1..count {
            scope.pixels.extend_from_slice(&iteration);
        }
        scope.pixels.extend(iteration);
        Ok(())
    }

    /// Validate a coordinate against the current canvas and append it.
    fn plot(&mut self, scope: &mut Scope, token: &Token, x: u64, y: u64) -> Result<(), SemanticError> {
        let canvas = scope.canvas.ok_or_else(|| SemanticError::CanvasNotSet {
            lexeme: token.lexeme().to_string(),
            position: token.position(),
        })?;

        if !canvas.contains(x, y) {
            return Err(SemanticError::OutOfBounds {
                x,
                y,
                canvas,
                position: token.position(),
            });
        }

        if self.emitted >= self.limit {
            return Err(SemanticError::PixelLimitExceeded {
                limit: self.limit,
                position: token.position(),
            });
        }

        // contains() bounds both coordinates by u32 dimensions
        scope.pixels.push(Pixel::new(x as u32, y as u32, scope.color.clone()));
        self.emitted += 1;
        Ok(())
    }
}

/// Run `statements` with only the built-in [`PIXEL_CEILING`] as pixel cap.
///
/// Top-level callers pass `None` and black; repeat bodies pass the state in
/// force when the block starts.
///
/// ```
/// use pixeldraw::color::Color;
/// use pixeldraw::interpreter::interpret;
/// use pixeldraw::lexer::lex;
/// use pixeldraw::validate::validate;
///
/// let program = validate(&lex("size 3x3 point 1 2").unwrap()).unwrap();
/// let (canvas, pixels) = interpret(&program.statements, None, Color::black()).unwrap();
/// assert_eq!((canvas.width, canvas.height), (3, 3));
/// assert_eq!((pixels[0].x, pixels[0].y), (1, 2));
/// ```
pub fn interpret(
    statements: &[Statement],
    inherited_canvas: Option<Canvas>,
    inherited_color: Color,
) -> Result<Interpretation, SemanticError> {
    Interpreter::new(None).interpret(statements, inherited_canvas, inherited_color)
}

fn malformed(token: &Token) -> SemanticError {
    SemanticError::MalformedStatement {
        lexeme: token.lexeme().to_string(),
        position: token.position(),
    }
}

fn parse_number(token: &Token, text: &str) -> Result<u32, SemanticError> {
    text.parse().map_err(|_| SemanticError::InvalidNumber {
        text: text.to_string(),
        lexeme: token.lexeme().to_string(),
        position: token.position(),
    })
}

/// Parse the `N` integer arguments following the keyword.
fn parse_numbers<const N: usize>(token: &Token) -> Result<[u32; N], SemanticError> {
    let words = token.words();
    if words.len() != N + 1 {
        return Err(malformed(token));
    }

    let mut values = [0u32; N];
    for (value, text) in values.iter_mut().zip(&words[1..]) {
        *value = parse_number(token, text)?;
    }
    Ok(values)
}

/// `size WxH`
fn parse_size(token: &Token) -> Result<Canvas, SemanticError> {
    let words = token.words();
    let (w, h) = match words.as_slice() {
        [_, dims] => dims.split_once('x').ok_or_else(|| malformed(token))?,
        _ => return Err(malformed(token)),
    };

    let canvas = Canvas {
        width: parse_number(token, w)?,
        height: parse_number(token, h)?,
    };

    if canvas.width == 0 || canvas.height == 0 {
        return Err(SemanticError::InvalidCanvasSize {
            lexeme: token.lexeme().to_string(),
            position: token.position(),
        });
    }
    Ok(canvas)
}

/// `color <#RRGGBB | name>`
fn parse_color(token: &Token) -> Result<Color, SemanticError> {
    match token.words().as_slice() {
        [_, literal] => literal.parse().map_err(|source| SemanticError::InvalidColor {
            lexeme: token.lexeme().to_string(),
            position: token.position(),
            source,
        }),
        _ => Err(malformed(token)),
    }
}

/// `repeat N {`
fn parse_repeat_count(token: &Token) -> Result<u32, SemanticError> {
    let invalid = || SemanticError::InvalidRepeatCount {
        lexeme: token.lexeme().to_string(),
        position: token.position(),
    };

    token
        .lexeme()
        .strip_prefix("repeat")
        .map(|rest| rest.trim_end_matches('{').trim())
        .ok_or_else(invalid)?
        .parse()
        .map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::validate::validate;

    fn run(source: &str) -> Result<Interpretation, SemanticError> {
        let program = validate(&lex(source).unwrap()).unwrap();
        interpret(&program.statements, None, Color::black())
    }

    fn coords(pixels: &[Pixel]) -> Vec<(u32, u32)> {
        pixels.iter().map(|p| (p.x, p.y)).collect()
    }

    fn hex(s: &str) -> Color {
        Color::Hex(s.to_string())
    }

    #[test]
    fn test_end_to_end_example() {
        let (canvas, pixels) =
            run("size 10x10\ncolor #FF0000\npoint 2 3\nrectangle 5 5 3 2\n").unwrap();
        assert_eq!(canvas, Canvas { width: 10, height: 10 });
        assert_eq!(
            coords(&pixels),
            vec![(2, 3), (5, 5), (5, 6), (6, 5), (6, 6), (7, 5), (7, 6)]
        );
        assert!(pixels.iter().all(|p| p.color == hex("#FF0000")));
    }

    #[test]
    fn test_default_color_is_black() {
        let (_, pixels) = run("size 2x2 point 0 0").unwrap();
        assert_eq!(pixels[0].color, Color::black());
    }

    #[test]
    fn test_color_stored_verbatim() {
        let (_, pixels) = run("size 2x2 color ReD point 0 0 color #abcDEF point 1 1").unwrap();
        assert_eq!(pixels[0].color, Color::Named("ReD".to_string()));
        assert_eq!(pixels[1].color, hex("#abcDEF"));
    }

    #[test]
    fn test_out_of_bounds_point() {
        let err = run("size 10x10\npoint 20 20").unwrap_err();
        match &err {
            SemanticError::OutOfBounds { x, y, canvas, .. } => {
                assert_eq!((*x, *y), (20, 20));
                assert_eq!(*canvas, Canvas { width: 10, height: 10 });
            }
            other => panic!("Expected OutOfBounds, got {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains("(20,20)"));
        assert!(message.contains("10x10"));
    }

    #[test]
    fn test_bounds_are_exclusive() {
        assert!(run("size 10x5 point 9 4").is_ok());
        assert!(run("size 10x5 point 10 0").is_err());
        assert!(run("size 10x5 point 0 5").is_err());
    }

    #[test]
    fn test_rectangle_overflowing_canvas() {
        let err = run("size 4x4 rectangle 2 2 3 1").unwrap_err();
        assert!(matches!(err, SemanticError::OutOfBounds { x: 4, y: 2, .. }));
    }

    #[test]
    fn test_rectangle_cardinality_and_duplicates() {
        let (_, pixels) = run("size 5x5 rectangle 0 0 2 2 rectangle 1 1 3 2").unwrap();
        assert_eq!(pixels.len(), 4 + 6);
    }

    #[test]
    fn test_empty_rectangle() {
        let (_, pixels) = run("size 5x5 rectangle 1 1 0 3 rectangle 1 1 3 0").unwrap();
        assert!(pixels.is_empty());
    }

    #[test]
    fn test_point_before_size() {
        let err = run("point 0 0\nsize 2x2").unwrap_err();
        assert!(matches!(err, SemanticError::CanvasNotSet { .. }));
        assert!(err.to_string().contains("canvas not set"));
    }

    #[test]
    fn test_canvas_not_defined() {
        let err = run("color red").unwrap_err();
        assert_eq!(err, SemanticError::CanvasNotDefined);
        assert!(err.to_string().contains("canvas size not defined"));
    }

    #[test]
    fn test_empty_program_has_no_canvas() {
        assert_eq!(run("").unwrap_err(), SemanticError::CanvasNotDefined);
    }

    #[test]
    fn test_zero_canvas_rejected() {
        let err = run("size 0x4").unwrap_err();
        assert!(matches!(err, SemanticError::InvalidCanvasSize { .. }));
    }

    #[test]
    fn test_oversized_number() {
        let err = run("size 99999999999x2").unwrap_err();
        assert!(matches!(err, SemanticError::InvalidNumber { ref text, .. } if text == "99999999999"));
    }

    #[test]
    fn test_size_redeclaration_overwrites() {
        let (canvas, _) = run("size 2x2 size 8x3 point 7 2").unwrap();
        assert_eq!(canvas, Canvas { width: 8, height: 3 });
    }

    #[test]
    fn test_bounds_follow_current_canvas() {
        // Valid when drawn, even though the canvas shrinks afterwards
        let (canvas, pixels) = run("size 10x10 point 9 9 size 2x2").unwrap();
        assert_eq!(canvas, Canvas { width: 2, height: 2 });
        assert_eq!(coords(&pixels), vec![(9, 9)]);
    }

    #[test]
    fn test_repeat_expansion() {
        let (_, pixels) = run("size 3x3 color #00FF00 repeat 4 { point 0 0 }").unwrap();
        assert_eq!(pixels.len(), 4);
        assert!(pixels.iter().all(|p| (p.x, p.y) == (0, 0) && p.color == hex("#00FF00")));
    }

    #[test]
    fn test_repeat_iterations_restart_from_snapshot() {
        let (_, pixels) =
            run("size 3x3 color red repeat 2 { point 0 0 color blue point 1 1 } point 2 2").unwrap();
        let colors: Vec<&str> = pixels.iter().map(|p| p.color.as_str()).collect();
        assert_eq!(colors, vec!["red", "blue", "red", "blue", "red"]);
        assert_eq!(coords(&pixels), vec![(0, 0), (1, 1), (0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn test_repeat_canvas_does_not_leak() {
        let (canvas, pixels) = run("size 2x2 repeat 1 { size 9x9 point 8 8 } point 1 1").unwrap();
        assert_eq!(canvas, Canvas { width: 2, height: 2 });
        assert_eq!(coords(&pixels), vec![(8, 8), (1, 1)]);
    }

    #[test]
    fn test_repeat_without_canvas_fails() {
        let err = run("repeat 1 { color red } size 2x2").unwrap_err();
        assert_eq!(err, SemanticError::CanvasNotDefined);
    }

    #[test]
    fn test_repeat_zero_times() {
        let (_, pixels) = run("size 2x2 repeat 0 { point 5 5 }").unwrap();
        assert!(pixels.is_empty());
    }

    #[test]
    fn test_nested_repeats_multiply() {
        let (_, pixels) = run("size 2x2 repeat 2 { repeat 3 { point 0 0 } point 1 1 }").unwrap();
        assert_eq!(
            coords(&pixels),
            vec![(0, 0), (0, 0), (0, 0), (1, 1), (0, 0), (0, 0), (0, 0), (1, 1)]
        );
    }

    #[test]
    fn test_repeat_brace_on_next_line() {
        let (_, pixels) = run("size 2x2 repeat 3\n{ point 1 0 }").unwrap();
        assert_eq!(pixels.len(), 3);
    }

    #[test]
    fn test_repeat_body_error_propagates() {
        let err = run("size 2x2 repeat 2 { point 3 3 }").unwrap_err();
        assert!(matches!(err, SemanticError::OutOfBounds { x: 3, y: 3, .. }));
    }

    #[test]
    fn test_pixel_limit() {
        let program = validate(&lex("size 4x4 rectangle 0 0 4 4").unwrap()).unwrap();
        let err = Interpreter::new(Some(10))
            .interpret(&program.statements, None, Color::black())
            .unwrap_err();
        assert!(matches!(err, SemanticError::PixelLimitExceeded { limit: 10, .. }));
    }

    #[test]
    fn test_pixel_limit_counts_repeats() {
        let program = validate(&lex("size 4x4 repeat 100000 { point 0 0 point 1 1 }").unwrap()).unwrap();
        let err = Interpreter::new(Some(1000))
            .interpret(&program.statements, None, Color::black())
            .unwrap_err();
        assert!(matches!(err, SemanticError::PixelLimitExceeded { limit: 1000, .. }));

        let mut interpreter = Interpreter::new(Some(200_000));
        let (_, pixels) = interpreter.interpret(&program.statements, None, Color::black()).unwrap();
        assert_eq!(pixels.len(), 200_000);
        assert_eq!(interpreter.emitted(), 200_000);
    }

    #[test]
    fn test_uncapped_expansion_stops_at_ceiling() {
        let err = run("size 100x100 repeat 4294967295 { rectangle 0 0 100 100 }").unwrap_err();
        assert!(matches!(err, SemanticError::PixelLimitExceeded { limit: PIXEL_CEILING, .. }));
    }

    #[test]
    fn test_requested_cap_clamped_to_ceiling() {
        assert_eq!(Interpreter::new(None).limit(), PIXEL_CEILING);
        assert_eq!(Interpreter::new(Some(usize::MAX)).limit(), PIXEL_CEILING);
        assert_eq!(Interpreter::new(Some(5)).limit(), 5);
    }

    #[test]
    fn test_repeat_with_empty_body_output() {
        let (_, pixels) = run("size 2x2 repeat 4294967295 { color red }").unwrap();
        assert!(pixels.is_empty());

        let (_, pixels) = run("size 2x2 repeat 4294967295 { repeat 4294967295 { } } point 0 0").unwrap();
        assert_eq!(pixels.len(), 1);
    }

    #[test]
    fn test_inherited_state() {
        let program = validate(&lex("point 1 1").unwrap()).unwrap();
        let (canvas, pixels) = interpret(
            &program.statements,
            Some(Canvas { width: 2, height: 2 }),
            Color::Named("teal".to_string()),
        )
        .unwrap();
        assert_eq!(canvas, Canvas { width: 2, height: 2 });
        assert_eq!(pixels, vec![Pixel::new(1, 1, Color::Named("teal".to_string()))]);
    }

    #[test]
    fn test_malformed_tokens_do_not_panic() {
        let position = Position::default();
        let statements = vec![
            Statement::Size(Token::new(crate::token::TokenKind::Size, "size 10", position)),
        ];
        let err = interpret(&statements, None, Color::black()).unwrap_err();
        assert!(matches!(err, SemanticError::MalformedStatement { .. }));

        let statements = vec![Statement::Repeat {
            begin: Token::new(crate::token::TokenKind::RepeatBegin, "repeat x {", position),
            body: vec![],
        }];
        let err = interpret(&statements, Some(Canvas { width: 1, height: 1 }), Color::black())
            .unwrap_err();
        assert!(matches!(err, SemanticError::InvalidRepeatCount { .. }));
    }
}
