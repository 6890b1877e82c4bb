//! This module contains helper functions for testing the parser.
//! It makes easier to test the parser.

use crate::ast::{
    Node,
    expression::Expression,
    statement::Statement,
};
use crate::parser::Parser;

/// Checks for parser errors and panics with all of them if any exist.
///
/// # Parameters
/// - `p`: The parser to check after `parse_program`
#[track_caller]
pub fn check_parser_errors(p: &Parser) {
    if p.errors.is_empty() {
        return;
    }

    let mut message = format!("parser has {} errors", p.errors.len());
    for error in &p.errors {
        message.push_str(&format!("\nparser error: {}", error));
    }
    panic!("{}", message);
}

/// Its a helper function which tests an integer literal expression.
///
/// This test verifies that an integer literal expression is correctly parsed
/// and identified as an IntegerLiteral in the AST.
///
/// # Parameters
/// - `exp`: The expression to test
/// - `value`: The expected value of the integer literal
///
/// # Returns
/// - `true` if all assertions pass
/// - Panics if any assertion fails (standard Rust test behavior)
#[track_caller]
pub fn test_integer_literal(exp: &Expression, value: i64) -> bool {
    // Verifies that the expression is an IntegerLiteral
    let int_lit = match exp {
        Expression::IntegerLiteral(il) => il,
        _ => {
            panic!("il not IntegerLiteral. got={:?}", exp);
        }
    };

    if int_lit.value != value {
        panic!("integ.value not {}. got={}", value, int_lit.value);
    }

    let expected_token_literal = value.to_string();
    if int_lit.token_literal() != expected_token_literal {
        panic!(
            "integ.token_literal not {}. got='{}'",
            value,
            int_lit.token_literal()
        );
    }

    true
}

/// Helper function to test an identifier expression.
///
/// # Parameters
/// - `exp`: The expression to test
/// - `value`: The expected identifier name
#[track_caller]
pub fn test_identifier(exp: &Expression, value: &str) -> bool {
    let ident = match exp {
        Expression::Identifier(ident) => ident,
        _ => panic!("exp not Identifier. got={:?}", exp),
    };

    if ident.value != value {
        panic!("ident.value not {}. got={}", value, ident.value);
    }
    if ident.token_literal() != value {
        panic!(
            "ident.token_literal not {}. got={}",
            value,
            ident.token_literal()
        );
    }

    true
}

/// Helper function to test a boolean literal expression.
///
/// # Parameters
/// - `exp`: The expression to test
/// - `value`: The expected boolean value
#[track_caller]
pub fn test_boolean_literal(exp: &Expression, value: bool) -> bool {
    let boolean = match exp {
        Expression::BooleanLiteral(b) => b,
        _ => panic!("exp not BooleanLiteral. got={:?}", exp),
    };

    if boolean.value != value {
        panic!("boolean.value not {}. got={}", value, boolean.value);
    }
    if boolean.token_literal() != value.to_string() {
        panic!(
            "boolean.token_literal not {}. got={}",
            value,
            boolean.token_literal()
        );
    }

    true
}

/// Expected literal values for table-driven expression tests.
#[derive(Debug, Clone, Copy)]
pub enum Literal<'a> {
    Int(i64),
    Bool(bool),
    Ident(&'a str),
}

/// Dispatches to the right literal assertion based on the expected value.
#[track_caller]
pub fn test_literal_expression(exp: &Expression, expected: Literal) -> bool {
    match expected {
        Literal::Int(value) => test_integer_literal(exp, value),
        Literal::Bool(value) => test_boolean_literal(exp, value),
        Literal::Ident(value) => test_identifier(exp, value),
    }
}

/// Helper function to test an infix expression: operands and operator.
///
/// # Parameters
/// - `exp`: The expression to test
/// - `left`: The expected left operand
/// - `operator`: The expected operator literal
/// - `right`: The expected right operand
#[track_caller]
pub fn test_infix_expression(
    exp: &Expression,
    left: Literal,
    operator: &str,
    right: Literal,
) -> bool {
    let infix = match exp {
        Expression::InfixExpression(infix) => infix,
        _ => panic!("exp not InfixExpression. got={:?}", exp),
    };

    test_literal_expression(&infix.left, left);
    if infix.operator != operator {
        panic!(
            "infix.operator is not '{}'. got={}",
            operator, infix.operator
        );
    }
    test_literal_expression(&infix.right, right);

    true
}

/// Helper function to test a single let statement.
///
/// This function validates that a statement is a `LetStatement` and that
/// its identifier matches the expected name.
///
/// # Parameters
/// - `stmt`: A reference to a Statement enum to test
/// - `name`: The expected identifier name (e.g., "x", "y", "foobar")
///
/// # Returns
/// - `true` if all assertions pass
/// - Panics if any assertion fails (standard Rust test behavior)
#[track_caller]
pub fn test_let_statement(stmt: &Statement, name: &str) -> bool {
    // Verify the statement's token literal is "let"
    assert_eq!(
        stmt.token_literal(),
        "let",
        "s.token_literal() not 'let'. got={}",
        stmt.token_literal()
    );

    // Extract Let statement from Statement enum using pattern matching
    let let_stmt = match stmt {
        Statement::Let(let_stmt) => let_stmt,
        _ => panic!("stmt is not a LetStatement"),
    };

    // Verify the identifier's value matches the expected name
    assert_eq!(
        let_stmt.name.value, name,
        "let_stmt.name.value not '{}'. got={}",
        name, let_stmt.name.value
    );

    // Verify the identifier's token literal also matches
    assert_eq!(
        let_stmt.name.token_literal(),
        name,
        "let_stmt.name.token_literal() not '{}'. got={}",
        name,
        let_stmt.name.token_literal()
    );

    true
}
