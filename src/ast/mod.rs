//! Abstract Syntax Tree (AST) types and traits for the Capuchin parser.
//!
//! This module defines the building blocks of the AST and their common
//! behavior. Statements live in [`statement`], expressions in [`expression`];
//! both families render back to surface syntax through `Display` so that
//! tests and the REPL can inspect what was parsed.

use crate::ast::statement::Statement;
use std::fmt::{Display, Formatter, Result};

pub mod expression;
pub mod statement;

pub trait Node {
    /// Returns the literal string representation of the token that
    /// this node represents.
    fn token_literal(&self) -> &str;
}

/// The root node of the AST, containing all top-level statements.
#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        if !self.statements.is_empty() {
            self.statements[0].token_literal()
        } else {
            ""
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for stmt in &self.statements {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::expression::{Expression, Identifier};
    use crate::ast::statement::LetStatement;
    use crate::lexer::token::{Token, TokenType};

    #[test]
    fn test_program_display() {
        let program = Program {
            statements: vec![Statement::Let(LetStatement {
                token: Token::new(TokenType::LET, "let".to_string()),
                name: Identifier {
                    token: Token::new(TokenType::IDENT, "myVar".to_string()),
                    value: "myVar".to_string(),
                },
                value: Expression::Identifier(Identifier {
                    token: Token::new(TokenType::IDENT, "anotherVar".to_string()),
                    value: "anotherVar".to_string(),
                }),
            })],
        };

        assert_eq!(
            format!("{}", program),
            "let myVar = anotherVar;",
            "program.to_string() wrong. got={}",
            program
        );
    }
}
