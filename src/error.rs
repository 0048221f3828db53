//! Unified error type for the compile pipeline

use crate::interpreter::SemanticError;
use crate::lexer::LexicalError;
use crate::validate::SyntaxError;
use thiserror::Error;

/// First error raised by any pipeline stage, passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("lexical error: {0}")]
    Lexical(#[from] LexicalError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),
}

impl CompileError {
    /// Short machine-readable name of the failing stage.
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::Lexical(_) => "lexical_error",
            CompileError::Syntax(_) => "syntax_error",
            CompileError::Semantic(_) => "semantic_error",
        }
    }
}
