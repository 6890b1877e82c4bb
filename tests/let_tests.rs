use capuchin::ast::statement::Statement;
use capuchin::lexer::Lexer;
use capuchin::parser::{Parser, test_helper::*};

/// Tests parsing of let statements with different value types.
#[test]
fn test_let_statements() {
    let tests: Vec<(&str, &str, Literal)> = vec![
        ("let x = 5;", "x", Literal::Int(5)),
        ("let y = true;", "y", Literal::Bool(true)),
        ("let foobar = y;", "foobar", Literal::Ident("y")),
    ];

    for (input, expected_identifier, expected_value) in tests {
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

        let stmt = &program.statements[0];
        test_let_statement(stmt, expected_identifier);

        let let_stmt = match stmt {
            Statement::Let(let_stmt) => let_stmt,
            _ => panic!("stmt is not a LetStatement. got={:?}", stmt),
        };
        test_literal_expression(&let_stmt.value, expected_value);
    }
}

/// The trailing semicolon is optional.
#[test]
fn test_let_statement_without_semicolon() {
    let l = Lexer::new("let x = 5".to_string());
    let mut p = Parser::new(l);
    let program = p.parse_program();
    check_parser_errors(&p);

    assert_eq!(program.statements.len(), 1);
    test_let_statement(&program.statements[0], "x");
}

/// Malformed let statements are recorded as errors, not panics.
#[test]
fn test_let_statement_errors() {
    let tests = vec!["let x 5;", "let = 10;", "let 838383;"];

    for input in tests {
        let l = Lexer::new(input.to_string());
        let mut p = Parser::new(l);
        p.parse_program();

        assert!(
            !p.errors().is_empty(),
            "expected parser errors for input {:?}, got none",
            input
        );
    }
}
