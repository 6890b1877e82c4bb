//! Expression types in the Capuchin AST.
//!
//! Expressions represent values and computations that evaluate to a value.
//! All expression types are consolidated in this module. Rendering always
//! parenthesizes prefix, infix and index forms so that operator precedence
//! is explicit in the output.

use crate::ast::Node;
use crate::ast::statement::BlockStatement;
use crate::lexer::token::Token;
use std::fmt::{Display, Formatter, Result};

// ============ STRUCTS ============

/// A name referring to a binding in the environment.
#[derive(Debug, Clone)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

/// A base-10 signed 64-bit integer literal.
#[derive(Debug, Clone)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

/// A `true` or `false` literal.
#[derive(Debug, Clone)]
pub struct BooleanLiteral {
    pub token: Token,
    pub value: bool,
}

/// A double-quoted string literal. No escape sequences.
#[derive(Debug, Clone)]
pub struct StringLiteral {
    pub token: Token,
    pub value: String,
}

/// A bracketed, comma-separated list of element expressions.
#[derive(Debug, Clone)]
pub struct ArrayLiteral {
    pub token: Token,
    pub elements: Vec<Expression>,
}

/// A braced list of `key: value` pairs. Pair order is the parse order.
#[derive(Debug, Clone)]
pub struct HashLiteral {
    pub token: Token,
    pub pairs: Vec<(Expression, Expression)>,
}

/// A prefix operator applied to an operand (e.g., `!true`, `-5`).
#[derive(Debug, Clone)]
pub struct PrefixExpression {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expression>,
}

/// A binary operator applied to two operands (e.g., `5 + 5`, `x == y`).
#[derive(Debug, Clone)]
pub struct InfixExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
}

/// An `if (condition) { … } else { … }` expression. The alternative is
/// optional.
#[derive(Debug, Clone)]
pub struct IfExpression {
    pub token: Token,
    pub condition: Box<Expression>,
    pub consequence: BlockStatement,
    pub alternative: Option<BlockStatement>,
}

/// A function literal: parameter list plus body block. Functions are
/// values; the evaluator captures the defining environment.
#[derive(Debug, Clone)]
pub struct FunctionLiteral {
    pub token: Token,
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
}

/// A call expression: callee followed by parenthesized arguments.
#[derive(Debug, Clone)]
pub struct CallExpression {
    pub token: Token,
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

/// An index expression: `collection[index]`.
#[derive(Debug, Clone)]
pub struct IndexExpression {
    pub token: Token,
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

// ============ ENUM ============

/// Enum representing all expression types in the AST.
#[derive(Debug, Clone)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral(IntegerLiteral),
    BooleanLiteral(BooleanLiteral),
    StringLiteral(StringLiteral),
    ArrayLiteral(ArrayLiteral),
    HashLiteral(HashLiteral),
    PrefixExpression(PrefixExpression),
    InfixExpression(InfixExpression),
    IfExpression(IfExpression),
    FunctionLiteral(FunctionLiteral),
    CallExpression(CallExpression),
    IndexExpression(IndexExpression),
}

// ============ TRAIT IMPLEMENTATIONS ============

impl Node for Identifier {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.value)
    }
}

impl Node for IntegerLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IntegerLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.token.literal)
    }
}

impl Node for BooleanLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for BooleanLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.token.literal)
    }
}

impl Node for StringLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for StringLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.token.literal)
    }
}

impl Node for ArrayLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for ArrayLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let elements: Vec<String> = self.elements.iter().map(|e| e.to_string()).collect();
        write!(f, "[{}]", elements.join(", "))
    }
}

impl Node for HashLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for HashLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let pairs: Vec<String> = self
            .pairs
            .iter()
            .map(|(key, value)| format!("{}:{}", key, value))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

impl Node for PrefixExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for PrefixExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

impl Node for InfixExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for InfixExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

impl Node for IfExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IfExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "if {} {}", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, " else {}", alternative)?;
        }
        Ok(())
    }
}

impl Node for FunctionLiteral {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for FunctionLiteral {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let parameters: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
        write!(
            f,
            "{}({}) {}",
            self.token_literal(),
            parameters.join(", "),
            self.body
        )
    }
}

impl Node for CallExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for CallExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let arguments: Vec<String> = self.arguments.iter().map(|a| a.to_string()).collect();
        write!(f, "{}({})", self.function, arguments.join(", "))
    }
}

impl Node for IndexExpression {
    fn token_literal(&self) -> &str {
        &self.token.literal
    }
}

impl Display for IndexExpression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

impl Node for Expression {
    fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(expr) => expr.token_literal(),
            Expression::IntegerLiteral(expr) => expr.token_literal(),
            Expression::BooleanLiteral(expr) => expr.token_literal(),
            Expression::StringLiteral(expr) => expr.token_literal(),
            Expression::ArrayLiteral(expr) => expr.token_literal(),
            Expression::HashLiteral(expr) => expr.token_literal(),
            Expression::PrefixExpression(expr) => expr.token_literal(),
            Expression::InfixExpression(expr) => expr.token_literal(),
            Expression::IfExpression(expr) => expr.token_literal(),
            Expression::FunctionLiteral(expr) => expr.token_literal(),
            Expression::CallExpression(expr) => expr.token_literal(),
            Expression::IndexExpression(expr) => expr.token_literal(),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expression::Identifier(expr) => write!(f, "{}", expr),
            Expression::IntegerLiteral(expr) => write!(f, "{}", expr),
            Expression::BooleanLiteral(expr) => write!(f, "{}", expr),
            Expression::StringLiteral(expr) => write!(f, "{}", expr),
            Expression::ArrayLiteral(expr) => write!(f, "{}", expr),
            Expression::HashLiteral(expr) => write!(f, "{}", expr),
            Expression::PrefixExpression(expr) => write!(f, "{}", expr),
            Expression::InfixExpression(expr) => write!(f, "{}", expr),
            Expression::IfExpression(expr) => write!(f, "{}", expr),
            Expression::FunctionLiteral(expr) => write!(f, "{}", expr),
            Expression::CallExpression(expr) => write!(f, "{}", expr),
            Expression::IndexExpression(expr) => write!(f, "{}", expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::token::TokenType;

    fn ident(name: &str) -> Expression {
        Expression::Identifier(Identifier {
            token: Token::new(TokenType::IDENT, name.to_string()),
            value: name.to_string(),
        })
    }

    #[test]
    fn test_infix_display_is_parenthesized() {
        let expr = InfixExpression {
            token: Token::new(TokenType::PLUS, "+".to_string()),
            left: Box::new(ident("a")),
            operator: "+".to_string(),
            right: Box::new(ident("b")),
        };
        assert_eq!(format!("{}", expr), "(a + b)");
    }

    #[test]
    fn test_prefix_display_is_parenthesized() {
        let expr = PrefixExpression {
            token: Token::new(TokenType::BANG, "!".to_string()),
            operator: "!".to_string(),
            right: Box::new(ident("ok")),
        };
        assert_eq!(format!("{}", expr), "(!ok)");
    }

    #[test]
    fn test_index_display() {
        let expr = IndexExpression {
            token: Token::new(TokenType::LBRACKET, "[".to_string()),
            left: Box::new(ident("myArray")),
            index: Box::new(ident("i")),
        };
        assert_eq!(format!("{}", expr), "(myArray[i])");
    }
}
