//! Parser for Capuchin source producing an Abstract Syntax Tree (AST).
//!
//! This module exposes the `Parser` struct that turns tokens from the
//! `lexer` module into an AST.
//!
//! Parsing approach:
//! - Maintains a two-token lookahead (`curr_token`, `peek_token`).
//! - Pratt parsing: prefix and infix parse functions registered per token
//!   type, driven by the precedence ladder in [`precedence`].
//! - Reports errors via the `errors` vector and keeps going best-effort;
//!   callers check `errors()` before evaluating.

pub mod error;
mod precedence;
pub mod test_helper;

use crate::ast::{
    Program,
    expression::{
        ArrayLiteral, BooleanLiteral, CallExpression, Expression, FunctionLiteral, HashLiteral,
        Identifier, IfExpression, IndexExpression, InfixExpression, IntegerLiteral,
        PrefixExpression, StringLiteral,
    },
    statement::{
        BlockStatement, ExpressionStatement, LetStatement, ReturnStatement, Statement,
    },
};
use crate::lexer::{
    Lexer,
    token::{Token, TokenType},
};
use crate::parser::error::ParserError;
use precedence::Precedence;
use std::collections::HashMap;

/// A parser that converts tokens from a lexer into an Abstract Syntax Tree (AST).
///
/// The parser maintains a two-token lookahead buffer (current and peek tokens)
/// to make parsing decisions. It processes tokens sequentially and builds
/// the AST by parsing different statement types.
#[derive(Debug, Clone, PartialEq)]
pub struct Parser {
    l: Lexer,
    curr_token: Token,
    peek_token: Token,
    pub errors: Vec<ParserError>,
    prefix_parse_fns: HashMap<TokenType, PrefixParseFn>,
    infix_parse_fns: HashMap<TokenType, InfixParseFn>,
}

type PrefixParseFn = fn(&mut Parser) -> Option<Expression>;
type InfixParseFn = fn(&mut Parser, Expression) -> Option<Expression>;

impl Parser {
    /// Creates a new parser instance with the given lexer.
    ///
    /// Initializes the parser with empty tokens and then reads the first two tokens
    /// to set up the lookahead buffer. This ensures the parser always has
    /// both current and peek tokens available for parsing decisions.
    pub fn new(l: Lexer) -> Self {
        let mut p = Parser {
            l,
            curr_token: Token::new(TokenType::EOF, "".to_string()),
            peek_token: Token::new(TokenType::EOF, "".to_string()),
            errors: Vec::<ParserError>::new(),
            prefix_parse_fns: HashMap::new(),
            infix_parse_fns: HashMap::new(),
        };
        // Register prefix parse functions
        p.register_prefix_parse_fn(TokenType::IDENT, Parser::parse_identifier);
        p.register_prefix_parse_fn(TokenType::INT, Parser::parse_integer_literal);
        p.register_prefix_parse_fn(TokenType::STRING, Parser::parse_string_literal);
        p.register_prefix_parse_fn(TokenType::BANG, Parser::parse_prefix_expression);
        p.register_prefix_parse_fn(TokenType::MINUS, Parser::parse_prefix_expression);
        p.register_prefix_parse_fn(TokenType::TRUE, Parser::parse_boolean_literal);
        p.register_prefix_parse_fn(TokenType::FALSE, Parser::parse_boolean_literal);
        p.register_prefix_parse_fn(TokenType::LPAREN, Parser::parse_grouped_expression);
        p.register_prefix_parse_fn(TokenType::IF, Parser::parse_if_expression);
        p.register_prefix_parse_fn(TokenType::FUNCTION, Parser::parse_function_literal);
        p.register_prefix_parse_fn(TokenType::LBRACKET, Parser::parse_array_literal);
        p.register_prefix_parse_fn(TokenType::LBRACE, Parser::parse_hash_literal);
        // Register infix parse functions
        p.register_infix_parse_fn(TokenType::PLUS, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::MINUS, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::SLASH, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::ASTERISK, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::EQ, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::NOT_EQ, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::LT, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::GT, Parser::parse_infix_expression);
        p.register_infix_parse_fn(TokenType::LPAREN, Parser::parse_call_expression);
        p.register_infix_parse_fn(TokenType::LBRACKET, Parser::parse_index_expression);
        // Advance the token buffer to have a two-token lookahead
        p.next_token();
        p.next_token();
        p
    }

    /// Advances the token buffer by one position.
    ///
    /// Moves the peek token to the current token position and reads
    /// the next token from the lexer into the peek position. This maintains
    /// the two-token lookahead buffer/window used for parsing decisions.
    fn next_token(&mut self) {
        self.curr_token = self.peek_token.clone();
        self.peek_token = self.l.next_token();
    }

    /// Checks if the current token matches the expected token type.
    fn is_curr_token(&self, token_type: TokenType) -> bool {
        self.curr_token.token_type == token_type
    }

    /// Checks if the peek token matches the expected token type.
    fn is_peek_token(&self, token_type: TokenType) -> bool {
        self.peek_token.token_type == token_type
    }

    /// Expects the peek token to be of a specific type and advances if it matches.
    ///
    /// If the peek token matches the expected type, advances the token buffer
    /// and returns true. If it doesn't match, adds an error to the parser's
    /// error list and returns false. This is used for enforcing syntax rules.
    fn expect_peek(&mut self, token_type: TokenType) -> bool {
        if self.is_peek_token(token_type) {
            self.next_token();
            true
        } else {
            self.peek_error(token_type);
            false
        }
    }

    /// Adds a peek error to the parser's error list.
    fn peek_error(&mut self, expected: TokenType) {
        let error = ParserError::expected_token(expected, &self.peek_token);
        log::error!("{}", error);
        self.errors.push(error);
    }

    fn no_prefix_parse_function_error(&mut self) {
        let error = ParserError::no_prefix_fn(&self.curr_token);
        log::error!("{}", error);
        self.errors.push(error);
    }

    fn register_prefix_parse_fn(&mut self, token_type: TokenType, parse_fn: PrefixParseFn) {
        self.prefix_parse_fns.insert(token_type, parse_fn);
    }

    fn register_infix_parse_fn(&mut self, token_type: TokenType, parse_fn: InfixParseFn) {
        self.infix_parse_fns.insert(token_type, parse_fn);
    }

    /// Returns a reference to the parser's error list.
    ///
    /// Allows external code to check if any parsing errors occurred
    /// during the parsing process.
    pub fn errors(&self) -> &Vec<ParserError> {
        &self.errors
    }

    /// Parses the entire program and returns the root AST node.
    ///
    /// Iterates through all tokens until EOF is reached, parsing each
    /// statement encountered. Collects all successfully parsed statements
    /// into a Program node. If parsing of a statement fails, it continues
    /// with the next statement rather than stopping the entire parse.
    pub fn parse_program(&mut self) -> Program {
        log::debug!("starting to parse program");
        let mut program = Program {
            statements: Vec::new(),
        };
        // Loop until EOF is reached
        while self.curr_token.token_type != TokenType::EOF {
            let statement = self.parse_statement();
            if let Some(stmt) = statement {
                program.statements.push(stmt);
            }
            self.next_token();
        }
        log::debug!(
            "finished parsing program, {} statements parsed",
            program.statements.len()
        );
        program
    }

    /// Parses a single statement based on the current token type.
    ///
    /// LET and RETURN introduce their statement forms; anything else is
    /// parsed as an expression statement.
    fn parse_statement(&mut self) -> Option<Statement> {
        match self.curr_token.token_type {
            TokenType::LET => self.parse_let_statement().map(Statement::Let),
            TokenType::RETURN => self.parse_return_statement().map(Statement::Return),
            _ => self.parse_expression_statement().map(Statement::Expression),
        }
    }

    /// Parses a let statement with the format: let <identifier> = <expression>;
    ///
    /// Expects the current token to be LET. Parses the identifier name,
    /// expects an equals sign, then parses the value expression. The
    /// trailing semicolon is optional.
    fn parse_let_statement(&mut self) -> Option<LetStatement> {
        let token = self.curr_token.clone();

        // Expect identifier after 'let'
        if !self.expect_peek(TokenType::IDENT) {
            return None;
        }
        let name = Identifier {
            token: self.curr_token.clone(),
            value: self.curr_token.literal.clone(),
        };

        // Expect '=' after identifier
        if !self.expect_peek(TokenType::ASSIGN) {
            return None;
        }
        // Advance to the next token to point to the value and parse the expression
        self.next_token();
        let value = self.parse_expression(Precedence::LOWEST as i32)?;

        if self.is_peek_token(TokenType::SEMICOLON) {
            self.next_token();
        }

        Some(LetStatement { token, name, value })
    }

    /// Parses a return statement with the format: return <expression>;
    ///
    /// Expects the current token to be RETURN. Parses the returned
    /// expression; the trailing semicolon is optional.
    fn parse_return_statement(&mut self) -> Option<ReturnStatement> {
        let token = self.curr_token.clone();

        // Advance to the next token to point to the value and parse the expression
        self.next_token();
        let value = self.parse_expression(Precedence::LOWEST as i32)?;

        if self.is_peek_token(TokenType::SEMICOLON) {
            self.next_token();
        }

        Some(ReturnStatement { token, value })
    }

    /// Parses an expression statement, which is a bare expression used in
    /// statement position. The trailing semicolon is optional.
    fn parse_expression_statement(&mut self) -> Option<ExpressionStatement> {
        let token = self.curr_token.clone();
        let expr = self.parse_expression(Precedence::LOWEST as i32)?;
        let stmt = ExpressionStatement { token, value: expr };

        if self.is_peek_token(TokenType::SEMICOLON) {
            self.next_token();
        }

        Some(stmt)
    }

    /// Parses an expression starting from the current token position.
    ///
    /// This is the main entry point for expression parsing. It looks up a
    /// prefix parse function for the current token and uses it to parse the
    /// left-hand side, then keeps folding infix parse functions into the
    /// left-hand side while the peek token binds tighter than `precedence`.
    ///
    /// # Parameters
    /// - `precedence`: The minimum precedence level required to continue parsing.
    ///
    /// # Returns
    /// - `Some(Expression)` if parsing succeeds
    /// - `None` if no parse function is registered for the current token type
    fn parse_expression(&mut self, precedence: i32) -> Option<Expression> {
        log::debug!(
            "parse_expression: precedence={}, curr_token={:?}",
            precedence,
            self.curr_token.token_type
        );
        let token_type = self.curr_token.token_type;
        let prefix = self.prefix_parse_fns.get(&token_type).copied();
        // If the prefix parse function is found, parse the left-hand side expression
        let mut left = if let Some(prefix_parse_fn) = prefix {
            prefix_parse_fn(self)?
        } else {
            self.no_prefix_parse_function_error();
            return None;
        };

        // Fold infix expressions while the peek token binds tighter
        while !self.is_peek_token(TokenType::SEMICOLON) && precedence < self.peek_precedence() {
            // Extract token type first to end the borrow before mutating self
            let peek_token_type = self.peek_token.token_type;
            let infix = self.infix_parse_fns.get(&peek_token_type).copied();
            // If the infix parse function is not found, return the left-hand side expression
            let Some(infix_parse_fn) = infix else {
                return Some(left);
            };
            self.next_token();
            left = infix_parse_fn(self, left)?;
        }

        Some(left)
    }

    /// Returns the precedence level for the next token.
    /// If no precedence is found, returns the lowest precedence.
    fn peek_precedence(&self) -> i32 {
        Precedence::from_token_type(&self.peek_token.token_type)
    }

    /// Returns the precedence level for the current token.
    /// If no precedence is found, returns the lowest precedence.
    fn curr_precedence(&self) -> i32 {
        Precedence::from_token_type(&self.curr_token.token_type)
    }

    /// Parses an identifier expression.
    fn parse_identifier(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        let value = self.curr_token.literal.clone();
        Some(Expression::Identifier(Identifier { token, value }))
    }

    /// Parses an integer literal expression from the current token.
    ///
    /// Extracts the integer value from the token's literal string by parsing
    /// it as a 64-bit signed integer.
    ///
    /// # Returns
    /// An `IntegerLiteral` expression if parsing succeeds. Returns `None`
    /// and records an error if the literal cannot be parsed as an i64.
    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral(IntegerLiteral { token, value })),
            Err(_) => {
                let error = ParserError::invalid_integer(&token);
                log::error!("{}", error);
                self.errors.push(error);
                None
            }
        }
    }

    /// Parses a string literal expression from the current token.
    fn parse_string_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        let value = token.literal.clone();
        Some(Expression::StringLiteral(StringLiteral { token, value }))
    }

    /// Parses a boolean literal expression from the current token.
    ///
    /// The boolean value is determined by whether the current token is TRUE.
    fn parse_boolean_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        let value = self.is_curr_token(TokenType::TRUE);
        Some(Expression::BooleanLiteral(BooleanLiteral { token, value }))
    }

    /// Parses a prefix expression (e.g., `!true`, `-5`).
    ///
    /// Expects the current token to be a prefix operator (BANG or MINUS).
    /// Extracts the operator, advances to the next token, and parses the
    /// right-hand expression with PREFIX precedence.
    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        let operator = self.curr_token.literal.clone();

        // Advance to the next token (the right-hand expression)
        self.next_token();
        let right = self.parse_expression(Precedence::PREFIX as i32)?;

        Some(Expression::PrefixExpression(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    /// Parses an infix expression (e.g., `5 + 5`, `x == y`).
    ///
    /// Expects the current token to be an infix operator. The left operand
    /// has already been parsed; the right operand is parsed with the
    /// operator's own precedence, which makes the binary operators
    /// left-associative.
    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.curr_token.clone();
        let operator = self.curr_token.literal.clone();

        // The operator's precedence bounds the right-hand side parse
        let precedence = self.curr_precedence();
        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::InfixExpression(InfixExpression {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    /// Parses a grouped expression (e.g., `(5 + 5)`).
    ///
    /// Skips the opening parenthesis, parses the inner expression at LOWEST
    /// precedence and expects a closing parenthesis. Grouping produces no
    /// AST node of its own.
    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();

        let expr = self.parse_expression(Precedence::LOWEST as i32)?;

        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }

        Some(expr)
    }

    /// Parses an if expression (e.g., `if (<condition>) <consequence> else <alternative>`).
    ///
    /// The condition is parenthesized; consequence and alternative are block
    /// statements, and the `else` branch is optional.
    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();

        if !self.expect_peek(TokenType::LPAREN) {
            return None;
        }
        // Advance to the next token to point to the condition and parse it
        self.next_token();
        let condition = self.parse_expression(Precedence::LOWEST as i32)?;

        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }
        if !self.expect_peek(TokenType::LBRACE) {
            return None;
        }
        let consequence = self.parse_block_statement();

        // If the next token is an else keyword, parse the alternative block
        let alternative = if self.is_peek_token(TokenType::ELSE) {
            self.next_token();

            if !self.expect_peek(TokenType::LBRACE) {
                return None;
            }
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::IfExpression(IfExpression {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// Parses a block statement (e.g., `{ <statements> }`).
    ///
    /// Expects the current token to be a left brace. Parses statements until
    /// the right brace is found or EOF is reached. Failed statements are
    /// skipped so the parse can keep collecting errors.
    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.curr_token.clone();
        let mut statements = Vec::new();

        self.next_token();
        while !self.is_curr_token(TokenType::RBRACE) && !self.is_curr_token(TokenType::EOF) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        BlockStatement { token, statements }
    }

    /// Parses a function literal expression (e.g., `fn(<parameters>) <body>`).
    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();

        if !self.expect_peek(TokenType::LPAREN) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBRACE) {
            return None;
        }
        let body = self.parse_block_statement();

        Some(Expression::FunctionLiteral(FunctionLiteral {
            token,
            parameters,
            body,
        }))
    }

    /// Parses the comma-separated function parameter list up to the closing
    /// parenthesis (e.g., `x, y`).
    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = Vec::new();

        if self.is_peek_token(TokenType::RPAREN) {
            self.next_token();
            return Some(parameters);
        }
        // Advance to the next token to point to the first parameter
        self.next_token();
        parameters.push(Identifier {
            token: self.curr_token.clone(),
            value: self.curr_token.literal.clone(),
        });

        while self.is_peek_token(TokenType::COMMA) {
            self.next_token();
            self.next_token();
            parameters.push(Identifier {
                token: self.curr_token.clone(),
                value: self.curr_token.literal.clone(),
            });
        }

        if !self.expect_peek(TokenType::RPAREN) {
            return None;
        }

        Some(parameters)
    }

    /// Parses a call expression (e.g., `add(1, 2 * 3)`).
    ///
    /// The callee has already been parsed as `function`; the current token
    /// is the opening parenthesis.
    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.curr_token.clone();
        let arguments = self.parse_expression_list(TokenType::RPAREN)?;
        Some(Expression::CallExpression(CallExpression {
            token,
            function: Box::new(function),
            arguments,
        }))
    }

    /// Parses an array literal (e.g., `[1, 2 * 2, 3 + 3]`).
    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        let elements = self.parse_expression_list(TokenType::RBRACKET)?;
        Some(Expression::ArrayLiteral(ArrayLiteral { token, elements }))
    }

    /// Parses a comma-separated list of expressions terminated by `end`.
    ///
    /// Shared by call arguments and array literals.
    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<Expression>> {
        let mut list = Vec::new();

        if self.is_peek_token(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::LOWEST as i32)?);

        while self.is_peek_token(TokenType::COMMA) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::LOWEST as i32)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    /// Parses a hash literal (e.g., `{"one": 1, "two": 2}`).
    ///
    /// Keys and values are arbitrary expressions; pair order is preserved
    /// as written.
    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.curr_token.clone();
        let mut pairs = Vec::new();

        while !self.is_peek_token(TokenType::RBRACE) {
            self.next_token();
            let key = self.parse_expression(Precedence::LOWEST as i32)?;

            if !self.expect_peek(TokenType::COLON) {
                return None;
            }
            self.next_token();
            let value = self.parse_expression(Precedence::LOWEST as i32)?;

            pairs.push((key, value));

            if !self.is_peek_token(TokenType::RBRACE) && !self.expect_peek(TokenType::COMMA) {
                return None;
            }
        }

        if !self.expect_peek(TokenType::RBRACE) {
            return None;
        }

        Some(Expression::HashLiteral(HashLiteral { token, pairs }))
    }

    /// Parses an index expression (e.g., `myArray[1 + 1]`).
    ///
    /// The collection has already been parsed as `left`; the current token
    /// is the opening bracket.
    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.curr_token.clone();

        self.next_token();
        let index = self.parse_expression(Precedence::LOWEST as i32)?;

        if !self.expect_peek(TokenType::RBRACKET) {
            return None;
        }

        Some(Expression::IndexExpression(IndexExpression {
            token,
            left: Box::new(left),
            index: Box::new(index),
        }))
    }
}
