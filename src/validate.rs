//! Structural validation of a token stream
//!
//! Checks that the tokens form a well-formed program and, while doing so,
//! builds the block tree the interpreter walks:
//!
//! ```text
//! Program      := Statement*
//! Statement    := SIZE | COLOR | POINT | RECTANGLE | RepeatStmt
//! RepeatStmt   := REPEAT_BEGIN Statement* REPEAT_END
//! ```
//!
//! Argument ranges (canvas bounds, positivity) are not looked at here.

use crate::token::{Position, Token, TokenKind};
use thiserror::Error;

/// Deepest allowed nesting of repeat blocks.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Structural defect in a token stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A token that cannot start a statement
    #[error("unexpected {kind} '{lexeme}' at {position}, expected a statement")]
    UnexpectedToken {
        kind: TokenKind,
        lexeme: String,
        position: Position,
    },
    /// A `}` with no open repeat block
    #[error("unmatched '}}' at {position}")]
    UnmatchedRepeatEnd { position: Position },
    /// End of input inside a repeat block
    #[error("missing closing '}}' for repeat block opened at {position}")]
    UnclosedRepeat { position: Position },
    /// Repeat blocks nested deeper than [`MAX_NESTING_DEPTH`]
    #[error("repeat blocks nested deeper than {max} at {position}")]
    NestingTooDeep { max: usize, position: Position },
}

/// One statement of the block tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Size(Token),
    Color(Token),
    Point(Token),
    Rectangle(Token),
    /// `repeat n { ... }`, owning its body
    Repeat { begin: Token, body: Vec<Statement> },
}

impl Statement {
    /// The token that introduced this statement.
    pub fn token(&self) -> &Token {
        match self {
            Statement::Size(t) | Statement::Color(t) | Statement::Point(t) | Statement::Rectangle(t) => t,
            Statement::Repeat { begin, .. } => begin,
        }
    }
}

/// A structurally valid program.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    /// Number of statements, counting repeat bodies once each.
    pub fn statement_count(&self) -> usize {
        fn count(statements: &[Statement]) -> usize {
            statements
                .iter()
                .map(|s| match s {
                    Statement::Repeat { body, .. } => 1 + count(body),
                    _ => 1,
                })
                .sum()
        }
        count(&self.statements)
    }
}

/// Validate a token stream and build its block tree.
///
/// Open repeat blocks are tracked on an explicit stack, so nesting depth is
/// structural and the first defect found is reported.
///
/// # Examples
///
/// ```
/// use pixeldraw::lexer::lex;
/// use pixeldraw::validate::{validate, Statement};
///
/// let tokens = lex("size 4x4 repeat 2 { point 0 0 }").unwrap();
/// let program = validate(&tokens).unwrap();
/// assert_eq!(program.statements.len(), 2);
/// assert!(matches!(&program.statements[1], Statement::Repeat { body, .. } if body.len() == 1));
/// ```
///
/// # Errors
///
/// Returns the first [`SyntaxError`] in stream order. An unclosed block is
/// reported at its innermost `repeat`.
pub fn validate(tokens: &[Token]) -> Result<Program, SyntaxError> {
    // Each frame holds the opening token and the statements collected before it.
    let mut open: Vec<(Token, Vec<Statement>)> = Vec::new();
    let mut current: Vec<Statement> = Vec::new();

    for token in tokens {
        match token.kind() {
            TokenKind::Size => current.push(Statement::Size(token.clone())),
            TokenKind::Color => current.push(Statement::Color(token.clone())),
            TokenKind::Point => current.push(Statement::Point(token.clone())),
            TokenKind::Rectangle => current.push(Statement::Rectangle(token.clone())),
            TokenKind::RepeatBegin => {
                if open.len() >= MAX_NESTING_DEPTH {
                    return Err(SyntaxError::NestingTooDeep {
                        max: MAX_NESTING_DEPTH,
                        position: token.position(),
                    });
                }
                open.push((token.clone(), std::mem::take(&mut current)));
            }
            TokenKind::RepeatEnd => {
                let (begin, enclosing) = open
                    .pop()
                    .ok_or(SyntaxError::UnmatchedRepeatEnd { position: token.position() })?;
                let body = std::mem::replace(&mut current, enclosing);
                current.push(Statement::Repeat { begin, body });
            }
            kind => {
                return Err(SyntaxError::UnexpectedToken {
                    kind,
                    lexeme: token.lexeme().to_string(),
                    position: token.position(),
                });
            }
        }
    }

    if let Some((begin, _)) = open.pop() {
        return Err(SyntaxError::UnclosedRepeat { position: begin.position() });
    }

    let program = Program { statements: current };
    tracing::debug!(statements = program.statement_count(), "validated program");
    Ok(program)
}
