//! Lexical analysis of PixelDraw source text
//!
//! The lexer walks the source left to right. At every offset it tries an
//! ordered table of anchored patterns and commits to the first one that
//! matches, not the longest. Composite command forms (`size 10x10`,
//! `point 2 3`, ...) therefore sit above the generic atoms (`NUMBER`,
//! `COLOR_NAME`) that would otherwise split them apart.

use crate::token::{Position, Token, TokenKind};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

/// Error raised when no lexical rule matches at some offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexicalError {
    #[error("unexpected character '{ch}' at {position}")]
    UnexpectedCharacter { ch: char, position: Position },
}

impl LexicalError {
    pub fn position(&self) -> Position {
        match self {
            LexicalError::UnexpectedCharacter { position, .. } => *position,
        }
    }
}

/// One row of the lexical table. `kind == None` marks text that is
/// recognized and then discarded (comments, whitespace).
struct Rule {
    kind: Option<TokenKind>,
    regex: Regex,
}

/// Order matters: the first matching rule wins.
const RULE_TABLE: &[(Option<TokenKind>, &str)] = &[
    (Some(TokenKind::Color), r"color\s+(#[0-9a-fA-F]{6}|[a-zA-Z]+)"),
    (Some(TokenKind::Size), r"size\s+[0-9]+x[0-9]+"),
    (Some(TokenKind::Point), r"point\s+[0-9]+\s+[0-9]+"),
    (Some(TokenKind::Rectangle), r"rectangle\s+[0-9]+\s+[0-9]+\s+[0-9]+\s+[0-9]+"),
    (Some(TokenKind::RepeatBegin), r"repeat\s+[0-9]+\s+\{"),
    (Some(TokenKind::RepeatEnd), r"\}"),
    (Some(TokenKind::Coordinate), r"\(\s*[0-9]+\s*,\s*[0-9]+\s*\)"),
    (Some(TokenKind::LParen), r"\("),
    (Some(TokenKind::RParen), r"\)"),
    (Some(TokenKind::Comma), r","),
    (Some(TokenKind::Number), r"[0-9]+"),
    (Some(TokenKind::ColorName), r"[a-zA-Z]+"),
    (Some(TokenKind::ColorHex), r"#[0-9a-fA-F]{6}"),
    (None, r"#[^\n]*"),
    (None, r"\s+"),
];

fn rules() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        RULE_TABLE
            .iter()
            .map(|&(kind, pattern)| Rule {
                kind,
                // Patterns are fixed at compile time; a failure here is a bug in the table.
                regex: Regex::new(&format!("^(?:{})", pattern)).expect("invalid lexer pattern"),
            })
            .collect()
    })
}

/// Tracks the current line/column while the lexer advances.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    offset: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    fn new() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    fn position(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    fn advance(&mut self, text: &str) {
        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += text.len();
    }
}

/// Scan source text into an ordered token stream.
///
/// Whitespace and `#` line comments are dropped. Each lexeme is the matched
/// text with surrounding whitespace trimmed; nothing else is normalized.
///
/// # Examples
///
/// ```
/// use pixeldraw::lexer::lex;
/// use pixeldraw::token::TokenKind;
///
/// let tokens = lex("size 10x10 # canvas").unwrap();
/// assert_eq!(tokens.len(), 1);
/// assert_eq!(tokens[0].kind(), TokenKind::Size);
/// assert_eq!(tokens[0].lexeme(), "size 10x10");
/// ```
///
/// # Errors
///
/// Returns [`LexicalError::UnexpectedCharacter`] for the first character no
/// rule accepts.
pub fn lex(source: &str) -> Result<Vec<Token>, LexicalError> {
    let mut tokens = Vec::new();
    let mut cursor = Cursor::new();

    while cursor.offset < source.len() {
        let rest = &source[cursor.offset..];

        let matched = rules()
            .iter()
            .find_map(|rule| rule.regex.find(rest).map(|m| (rule.kind, m.as_str())));

        match matched {
            Some((kind, text)) if !text.is_empty() => {
                if let Some(kind) = kind {
                    tokens.push(Token::new(kind, text.trim(), cursor.position()));
                }
                cursor.advance(text);
            }
            _ => {
                let ch = rest.chars().next().unwrap_or('\0');
                return Err(LexicalError::UnexpectedCharacter {
                    ch,
                    position: cursor.position(),
                });
            }
        }
    }

    tracing::debug!(tokens = tokens.len(), "lexed source");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().iter().map(|t| t.kind()).collect()
    }

    #[test]
    fn test_size_is_one_composite_token() {
        let tokens = lex("size 10x10").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), TokenKind::Size);
        assert_eq!(tokens[0].lexeme(), "size 10x10");
    }

    #[test]
    fn test_statement_forms() {
        let source = "size 4x4\ncolor #FF0000\npoint 1 2\nrectangle 0 0 2 2\nrepeat 3 {\n}\n";
        assert_eq!(
            kinds(source),
            vec![
                TokenKind::Size,
                TokenKind::Color,
                TokenKind::Point,
                TokenKind::Rectangle,
                TokenKind::RepeatBegin,
                TokenKind::RepeatEnd,
            ]
        );
    }

    #[test]
    fn test_named_color_keeps_case() {
        let tokens = lex("color DarkRed").unwrap();
        assert_eq!(tokens[0].kind(), TokenKind::Color);
        assert_eq!(tokens[0].lexeme(), "color DarkRed");
    }

    #[test]
    fn test_hex_color_keeps_case() {
        let tokens = lex("color #ff00Aa").unwrap();
        assert_eq!(tokens[0].lexeme(), "color #ff00Aa");
    }

    #[test]
    fn test_comments_and_whitespace_discarded() {
        let source = "# header comment\n  size 2x2   # trailing\n\t\r\npoint 0 0";
        assert_eq!(kinds(source), vec![TokenKind::Size, TokenKind::Point]);
    }

    #[test]
    fn test_bare_hex_is_color_hex_not_comment() {
        assert_eq!(kinds("#00FF00"), vec![TokenKind::ColorHex]);
        assert!(kinds("# 00FF00").is_empty());
    }

    #[test]
    fn test_atoms() {
        assert_eq!(
            kinds("( ) , 42 blue"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Comma,
                TokenKind::Number,
                TokenKind::ColorName,
            ]
        );
    }

    #[test]
    fn test_coordinate_before_lparen() {
        let tokens = lex("( 3 , 4 )").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), TokenKind::Coordinate);
    }

    #[test]
    fn test_incomplete_command_fragments() {
        // Missing second coordinate: the composite rule fails, atoms take over.
        assert_eq!(kinds("point 5"), vec![TokenKind::ColorName, TokenKind::Number]);
    }

    #[test]
    fn test_repeat_begin_spans_brace() {
        let tokens = lex("repeat 12 {").unwrap();
        assert_eq!(tokens[0].kind(), TokenKind::RepeatBegin);
        assert_eq!(tokens[0].lexeme(), "repeat 12 {");

        let tokens = lex("repeat 12\n{").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), TokenKind::RepeatBegin);
    }

    #[test]
    fn test_repeat_brace_needs_whitespace() {
        let err = lex("repeat 3{ point 0 0 }").unwrap_err();
        assert!(matches!(err, LexicalError::UnexpectedCharacter { ch: '{', .. }));
        assert_eq!(err.position().column, 9);
    }

    #[test]
    fn test_lexemes_trimmed_across_newlines() {
        let tokens = lex("point\n  3\n  4").unwrap();
        assert_eq!(tokens[0].kind(), TokenKind::Point);
        assert_eq!(tokens[0].lexeme(), "point\n  3\n  4");
        assert_eq!(tokens[0].words(), vec!["point", "3", "4"]);
    }

    #[test]
    fn test_positions() {
        let tokens = lex("size 2x2\n  point 1 1").unwrap();
        assert_eq!(tokens[0].position(), Position { offset: 0, line: 1, column: 1 });
        assert_eq!(tokens[1].position(), Position { offset: 11, line: 2, column: 3 });
    }

    #[test]
    fn test_unexpected_character() {
        let err = lex("size 2x2\npoint -1 0").unwrap_err();
        match err {
            LexicalError::UnexpectedCharacter { ch, position } => {
                assert_eq!(ch, '-');
                assert_eq!(position.line, 2);
                assert_eq!(position.column, 7);
            }
        }
        assert!(err.to_string().contains("'-'"));
    }

    #[test]
    fn test_non_ascii_rejected() {
        let err = lex("color é").unwrap_err();
        assert!(matches!(err, LexicalError::UnexpectedCharacter { ch: 'é', .. }));
    }

    #[test]
    fn test_lexing_is_idempotent() {
        let source = "size 10x10\ncolor red\nrepeat 2 { point 1 1 }";
        assert_eq!(lex(source).unwrap(), lex(source).unwrap());
    }

    #[test]
    fn test_empty_source() {
        assert!(lex("").unwrap().is_empty());
        assert!(lex("   \n# only a comment").unwrap().is_empty());
    }
}
