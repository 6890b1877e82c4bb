use capuchin::ast::{expression::Expression, statement::Statement};
use capuchin::lexer::Lexer;
use capuchin::parser::{Parser, test_helper::*};

#[track_caller]
fn parse_single_expression(input: &str) -> Expression {
    let l = Lexer::new(input.to_string());
    let mut p = Parser::new(l);
    let program = p.parse_program();
    check_parser_errors(&p);

    assert_eq!(
        program.statements.len(),
        1,
        "program.statements does not contain 1 statement. got={}",
        program.statements.len()
    );

    match program.statements.into_iter().next().unwrap() {
        Statement::Expression(expr_stmt) => expr_stmt.value,
        stmt => panic!("stmt is not an ExpressionStatement. got={:?}", stmt),
    }
}

/// Tests parsing of a string literal expression.
#[test]
fn test_parsing_string_literal() {
    let expr = parse_single_expression("\"hello world\";");

    let string_lit = match &expr {
        Expression::StringLiteral(sl) => sl,
        _ => panic!("expr is not a StringLiteral. got={:?}", expr),
    };
    assert_eq!(
        string_lit.value, "hello world",
        "string_lit.value not 'hello world'. got={}",
        string_lit.value
    );
}

/// Tests parsing of an array literal with expression elements.
#[test]
fn test_parsing_array_literal() {
    let expr = parse_single_expression("[1, 2 * 2, 3 + 3]");

    let array = match &expr {
        Expression::ArrayLiteral(al) => al,
        _ => panic!("expr is not an ArrayLiteral. got={:?}", expr),
    };

    assert_eq!(
        array.elements.len(),
        3,
        "len(array.elements) not 3. got={}",
        array.elements.len()
    );
    test_integer_literal(&array.elements[0], 1);
    test_infix_expression(&array.elements[1], Literal::Int(2), "*", Literal::Int(2));
    test_infix_expression(&array.elements[2], Literal::Int(3), "+", Literal::Int(3));
}

/// Tests parsing of an empty array literal.
#[test]
fn test_parsing_empty_array_literal() {
    let expr = parse_single_expression("[]");

    let array = match &expr {
        Expression::ArrayLiteral(al) => al,
        _ => panic!("expr is not an ArrayLiteral. got={:?}", expr),
    };
    assert!(
        array.elements.is_empty(),
        "len(array.elements) not 0. got={}",
        array.elements.len()
    );
}

/// Tests parsing of an index expression.
#[test]
fn test_parsing_index_expression() {
    let expr = parse_single_expression("myArray[1 + 1]");

    let index_expr = match &expr {
        Expression::IndexExpression(ie) => ie,
        _ => panic!("expr is not an IndexExpression. got={:?}", expr),
    };

    test_identifier(&index_expr.left, "myArray");
    test_infix_expression(&index_expr.index, Literal::Int(1), "+", Literal::Int(1));
}

/// Tests parsing of a hash literal with string keys.
#[test]
fn test_parsing_hash_literal_string_keys() {
    let expr = parse_single_expression("{\"one\": 1, \"two\": 2, \"three\": 3}");

    let hash = match &expr {
        Expression::HashLiteral(hl) => hl,
        _ => panic!("expr is not a HashLiteral. got={:?}", expr),
    };

    let expected = [("one", 1), ("two", 2), ("three", 3)];
    assert_eq!(
        hash.pairs.len(),
        expected.len(),
        "hash.pairs has wrong length. got={}",
        hash.pairs.len()
    );

    // Pair order is the parse order
    for ((key, value), (expected_key, expected_value)) in hash.pairs.iter().zip(expected) {
        let string_lit = match key {
            Expression::StringLiteral(sl) => sl,
            _ => panic!("key is not a StringLiteral. got={:?}", key),
        };
        assert_eq!(string_lit.value, expected_key);
        test_integer_literal(value, expected_value);
    }
}

/// Tests parsing of an empty hash literal.
#[test]
fn test_parsing_empty_hash_literal() {
    let expr = parse_single_expression("{}");

    let hash = match &expr {
        Expression::HashLiteral(hl) => hl,
        _ => panic!("expr is not a HashLiteral. got={:?}", expr),
    };
    assert!(
        hash.pairs.is_empty(),
        "hash.pairs has wrong length. got={}",
        hash.pairs.len()
    );
}

/// Tests parsing of a hash literal whose values are expressions.
#[test]
fn test_parsing_hash_literal_with_expressions() {
    let expr = parse_single_expression("{\"one\": 0 + 1, \"two\": 10 - 8, \"three\": 15 / 5}");

    let hash = match &expr {
        Expression::HashLiteral(hl) => hl,
        _ => panic!("expr is not a HashLiteral. got={:?}", expr),
    };
    assert_eq!(hash.pairs.len(), 3);

    test_infix_expression(&hash.pairs[0].1, Literal::Int(0), "+", Literal::Int(1));
    test_infix_expression(&hash.pairs[1].1, Literal::Int(10), "-", Literal::Int(8));
    test_infix_expression(&hash.pairs[2].1, Literal::Int(15), "/", Literal::Int(5));
}

/// Tests parsing of hash literals with integer and boolean keys.
#[test]
fn test_parsing_hash_literal_mixed_keys() {
    let expr = parse_single_expression("{1: \"one\", true: \"yes\", \"k\": 3}");

    let hash = match &expr {
        Expression::HashLiteral(hl) => hl,
        _ => panic!("expr is not a HashLiteral. got={:?}", expr),
    };
    assert_eq!(hash.pairs.len(), 3);

    test_integer_literal(&hash.pairs[0].0, 1);
    test_boolean_literal(&hash.pairs[1].0, true);
    match &hash.pairs[2].0 {
        Expression::StringLiteral(sl) => assert_eq!(sl.value, "k"),
        key => panic!("key is not a StringLiteral. got={:?}", key),
    }
}
