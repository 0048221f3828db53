//! Token model produced by the lexer

use std::fmt;

/// Kind of a lexical token.
///
/// `Size`, `Color`, `Point`, `Rectangle` and `RepeatBegin` are composite
/// command tokens: the lexeme carries the keyword together with its
/// arguments (e.g. `size 10x10`). The remaining kinds are atoms that never
/// start a statement on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Size,
    Color,
    Point,
    Rectangle,
    RepeatBegin,
    RepeatEnd,
    LParen,
    RParen,
    Comma,
    Number,
    Coordinate,
    ColorName,
    ColorHex,
}

impl TokenKind {
    /// Whether a token of this kind can begin a statement.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Size
                | TokenKind::Color
                | TokenKind::Point
                | TokenKind::Rectangle
                | TokenKind::RepeatBegin
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Size => "SIZE",
            TokenKind::Color => "COLOR",
            TokenKind::Point => "POINT",
            TokenKind::Rectangle => "RECTANGLE",
            TokenKind::RepeatBegin => "REPEAT_BEGIN",
            TokenKind::RepeatEnd => "REPEAT_END",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::Comma => "COMMA",
            TokenKind::Number => "NUMBER",
            TokenKind::Coordinate => "COORDINATE",
            TokenKind::ColorName => "COLOR_NAME",
            TokenKind::ColorHex => "COLOR_HEX",
        };
        f.write_str(name)
    }
}

/// Location of a token in the source text.
///
/// `offset` is a byte offset; `line` and `column` are 1-indexed, with the
/// column counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A classified lexical unit with its exact (trimmed) source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    position: Position,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            position,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Whitespace-separated words of the lexeme, keyword included.
    ///
    /// ```
    /// use pixeldraw::token::{Position, Token, TokenKind};
    ///
    /// let token = Token::new(TokenKind::Point, "point 2 3", Position::default());
    /// assert_eq!(token.words(), vec!["point", "2", "3"]);
    /// ```
    pub fn words(&self) -> Vec<&str> {
        self.lexeme.split_whitespace().collect()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.lexeme)
    }
}
