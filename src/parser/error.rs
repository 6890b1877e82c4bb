//! Parser error types and handling.
//!
//! Errors are accumulated on the parser rather than aborting the parse, so
//! a single run can report everything it found. Callers are expected to
//! check `Parser::errors()` before evaluating the program.

use crate::lexer::token::{Token, TokenType};
use std::fmt::{Display, Formatter, Result};

/// All parser error types - centralized and exhaustive.
///
/// Each variant carries the context needed to render its message.
#[derive(Debug, Clone, PartialEq)]
pub enum ParserError {
    /// The token after the current one was not what the grammar requires.
    UnexpectedToken {
        expected: TokenType,
        got: TokenType,
    },
    /// No prefix parse function is registered for the current token.
    NoPrefixParseFunction { token_type: TokenType },
    /// An INT token whose literal does not fit in an i64.
    InvalidIntegerLiteral { literal: String },
}

impl ParserError {
    /// Expected-token error from the offending peek token.
    pub fn expected_token(expected: TokenType, token: &Token) -> Self {
        Self::UnexpectedToken {
            expected,
            got: token.token_type,
        }
    }

    /// No prefix parse function error for the current token.
    pub fn no_prefix_fn(token: &Token) -> Self {
        Self::NoPrefixParseFunction {
            token_type: token.token_type,
        }
    }

    /// Invalid integer literal error.
    pub fn invalid_integer(token: &Token) -> Self {
        Self::InvalidIntegerLiteral {
            literal: token.literal.clone(),
        }
    }
}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::UnexpectedToken { expected, got } => {
                write!(
                    f,
                    "expected next token to be {:?}, got {:?} instead",
                    expected, got
                )
            }
            Self::NoPrefixParseFunction { token_type } => {
                write!(f, "no prefix parse function for {:?} found", token_type)
            }
            Self::InvalidIntegerLiteral { literal } => {
                write!(f, "could not parse {} as integer", literal)
            }
        }
    }
}

impl std::error::Error for ParserError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ParserError::UnexpectedToken {
            expected: TokenType::RPAREN,
            got: TokenType::SEMICOLON,
        };
        assert_eq!(
            error.to_string(),
            "expected next token to be RPAREN, got SEMICOLON instead"
        );

        let error = ParserError::NoPrefixParseFunction {
            token_type: TokenType::BANG,
        };
        assert_eq!(
            error.to_string(),
            "no prefix parse function for BANG found"
        );
    }
}
