//! Tree-walking evaluator for the Capuchin AST.
//!
//! `eval_program` recursively dispatches over statements and expressions,
//! threading a shared environment. Two sentinel values unwind control flow:
//! `Object::ReturnValue` carries a `return` up to the nearest function
//! boundary (or the program top level), and `Object::Error` short-circuits
//! every surrounding construct. Blocks propagate both sentinels without
//! unwrapping; only programs and function calls unwrap a ReturnValue.

pub mod builtins;

use crate::ast::{
    Program,
    expression::{Expression, HashLiteral, Identifier, IfExpression},
    statement::{BlockStatement, Statement},
};
use crate::object::{
    Function, HashPair, Object, environment::Environment,
};
use builtins::lookup_builtin;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A shared, mutable environment reference.
pub type Env = Rc<RefCell<Environment>>;

/// Evaluates a parsed program against the given environment.
///
/// A top-level `return` unwraps to its inner value; the first error
/// short-circuits the rest of the program.
pub fn eval_program(program: &Program, env: &Env) -> Object {
    log::trace!("evaluating program with {} statements", program.statements.len());
    let mut result = Object::Null;

    for statement in &program.statements {
        result = eval_statement(statement, env);

        match result {
            Object::ReturnValue(value) => return *value,
            Object::Error(_) => return result,
            _ => {}
        }
    }

    result
}

fn eval_statement(statement: &Statement, env: &Env) -> Object {
    match statement {
        Statement::Let(stmt) => {
            let value = eval_expression(&stmt.value, env);
            if is_error(&value) {
                return value;
            }
            env.borrow_mut().set(stmt.name.value.clone(), value)
        }
        Statement::Return(stmt) => {
            let value = eval_expression(&stmt.value, env);
            if is_error(&value) {
                return value;
            }
            Object::ReturnValue(Box::new(value))
        }
        Statement::Expression(stmt) => eval_expression(&stmt.value, env),
        Statement::Block(block) => eval_block_statement(block, env),
    }
}

/// Evaluates the statements of a block.
///
/// Unlike `eval_program`, a ReturnValue is propagated without unwrapping so
/// that nested blocks unwind all the way to the enclosing function.
fn eval_block_statement(block: &BlockStatement, env: &Env) -> Object {
    let mut result = Object::Null;

    for statement in &block.statements {
        result = eval_statement(statement, env);

        match result {
            Object::ReturnValue(_) | Object::Error(_) => return result,
            _ => {}
        }
    }

    result
}

fn eval_expression(expression: &Expression, env: &Env) -> Object {
    match expression {
        Expression::IntegerLiteral(node) => Object::Integer(node.value),
        Expression::StringLiteral(node) => Object::String(node.value.clone()),
        Expression::BooleanLiteral(node) => native_bool_to_boolean_object(node.value),
        Expression::Identifier(node) => eval_identifier(node, env),
        Expression::PrefixExpression(node) => {
            let right = eval_expression(&node.right, env);
            if is_error(&right) {
                return right;
            }
            eval_prefix_expression(&node.operator, right)
        }
        Expression::InfixExpression(node) => {
            let left = eval_expression(&node.left, env);
            if is_error(&left) {
                return left;
            }
            let right = eval_expression(&node.right, env);
            if is_error(&right) {
                return right;
            }
            eval_infix_expression(&node.operator, left, right)
        }
        Expression::IfExpression(node) => eval_if_expression(node, env),
        Expression::FunctionLiteral(node) => Object::Function(Function {
            parameters: node.parameters.clone(),
            body: node.body.clone(),
            env: Rc::clone(env),
        }),
        Expression::CallExpression(node) => {
            let function = eval_expression(&node.function, env);
            if is_error(&function) {
                return function;
            }
            let mut args = eval_expressions(&node.arguments, env);
            if args.len() == 1 && is_error(&args[0]) {
                return args.remove(0);
            }
            apply_function(function, args)
        }
        Expression::ArrayLiteral(node) => {
            let mut elements = eval_expressions(&node.elements, env);
            if elements.len() == 1 && is_error(&elements[0]) {
                return elements.remove(0);
            }
            Object::Array(elements)
        }
        Expression::HashLiteral(node) => eval_hash_literal(node, env),
        Expression::IndexExpression(node) => {
            let left = eval_expression(&node.left, env);
            if is_error(&left) {
                return left;
            }
            let index = eval_expression(&node.index, env);
            if is_error(&index) {
                return index;
            }
            eval_index_expression(left, index)
        }
    }
}

/// Evaluates expressions left-to-right, short-circuiting on the first
/// error, which is returned as the only element.
fn eval_expressions(expressions: &[Expression], env: &Env) -> Vec<Object> {
    let mut result = Vec::new();

    for expression in expressions {
        let evaluated = eval_expression(expression, env);
        if is_error(&evaluated) {
            return vec![evaluated];
        }
        result.push(evaluated);
    }

    result
}

fn eval_identifier(node: &Identifier, env: &Env) -> Object {
    if let Some(value) = env.borrow().get(&node.value) {
        return value;
    }
    if let Some(builtin) = lookup_builtin(&node.value) {
        return builtin;
    }
    Object::Error(format!("identifier not found: {}", node.value))
}

fn eval_prefix_expression(operator: &str, right: Object) -> Object {
    match operator {
        "!" => eval_bang_operator_expression(right),
        "-" => eval_minus_prefix_operator_expression(right),
        _ => Object::Error(format!(
            "unknown operator: {}{}",
            operator,
            right.object_type()
        )),
    }
}

fn eval_bang_operator_expression(right: Object) -> Object {
    match right {
        Object::Boolean(value) => native_bool_to_boolean_object(!value),
        Object::Null => native_bool_to_boolean_object(true),
        _ => native_bool_to_boolean_object(false),
    }
}

fn eval_minus_prefix_operator_expression(right: Object) -> Object {
    match right {
        Object::Integer(value) => Object::Integer(-value),
        _ => Object::Error(format!("unknown operator: -{}", right.object_type())),
    }
}

fn eval_infix_expression(operator: &str, left: Object, right: Object) -> Object {
    match (left, right) {
        (Object::Integer(left), Object::Integer(right)) => {
            eval_integer_infix_expression(operator, left, right)
        }
        (Object::String(left), Object::String(right)) => {
            eval_string_infix_expression(operator, &left, &right)
        }
        (left, right) => {
            if left.object_type() != right.object_type() {
                return Object::Error(format!(
                    "type mismatch: {} {} {}",
                    left.object_type(),
                    operator,
                    right.object_type()
                ));
            }
            match operator {
                "==" => native_bool_to_boolean_object(objects_equal(&left, &right)),
                "!=" => native_bool_to_boolean_object(!objects_equal(&left, &right)),
                _ => Object::Error(format!(
                    "unknown operator: {} {} {}",
                    left.object_type(),
                    operator,
                    right.object_type()
                )),
            }
        }
    }
}

/// Equality for the `==`/`!=` fallthrough on same-type operands.
///
/// Booleans and null compare by value. Every other value is freshly built
/// by its evaluation, so two of them are never the same value.
fn objects_equal(left: &Object, right: &Object) -> bool {
    match (left, right) {
        (Object::Boolean(left), Object::Boolean(right)) => left == right,
        (Object::Null, Object::Null) => true,
        _ => false,
    }
}

fn eval_integer_infix_expression(operator: &str, left: i64, right: i64) -> Object {
    match operator {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        "/" => Object::Integer(left / right),
        "<" => native_bool_to_boolean_object(left < right),
        ">" => native_bool_to_boolean_object(left > right),
        "==" => native_bool_to_boolean_object(left == right),
        "!=" => native_bool_to_boolean_object(left != right),
        _ => Object::Error(format!("unknown operator: INTEGER {} INTEGER", operator)),
    }
}

fn eval_string_infix_expression(operator: &str, left: &str, right: &str) -> Object {
    if operator != "+" {
        return Object::Error(format!("unknown operator: STRING {} STRING", operator));
    }
    Object::String(format!("{}{}", left, right))
}

fn eval_if_expression(node: &IfExpression, env: &Env) -> Object {
    let condition = eval_expression(&node.condition, env);
    if is_error(&condition) {
        return condition;
    }

    if is_truthy(&condition) {
        eval_block_statement(&node.consequence, env)
    } else if let Some(alternative) = &node.alternative {
        eval_block_statement(alternative, env)
    } else {
        Object::Null
    }
}

fn eval_hash_literal(node: &HashLiteral, env: &Env) -> Object {
    let mut pairs = HashMap::new();

    for (key_node, value_node) in &node.pairs {
        let key = eval_expression(key_node, env);
        if is_error(&key) {
            return key;
        }

        let Some(hash_key) = key.hash_key() else {
            return Object::Error(format!("unusable as hash key: {}", key.object_type()));
        };

        let value = eval_expression(value_node, env);
        if is_error(&value) {
            return value;
        }

        // Later duplicates overwrite earlier pairs
        pairs.insert(hash_key, HashPair { key, value });
    }

    Object::Hash(pairs)
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (left, index) {
        (Object::Array(elements), Object::Integer(index)) => {
            eval_array_index_expression(&elements, index)
        }
        (Object::Hash(pairs), index) => match index.hash_key() {
            Some(hash_key) => pairs
                .get(&hash_key)
                .map(|pair| pair.value.clone())
                .unwrap_or(Object::Null),
            None => Object::Error(format!("unusable as hash key: {}", index.object_type())),
        },
        (left, _) => Object::Error(format!(
            "index operator not supported: {}",
            left.object_type()
        )),
    }
}

fn eval_array_index_expression(elements: &[Object], index: i64) -> Object {
    let max = elements.len() as i64 - 1;
    if index < 0 || index > max {
        return Object::Null;
    }
    elements[index as usize].clone()
}

fn apply_function(function: Object, args: Vec<Object>) -> Object {
    match function {
        Object::Builtin(builtin) => builtin(args),
        Object::Function(function) => {
            let extended_env = extend_function_env(&function, args);
            let evaluated = eval_block_statement(&function.body, &extended_env);
            unwrap_return_value(evaluated)
        }
        other => Object::Error(format!("not a function: {}", other.object_type())),
    }
}

/// Builds the call environment: a fresh scope enclosed by the function's
/// captured environment, with parameters bound positionally.
///
/// Arity is not checked here. Excess arguments are dropped by the zip;
/// missing ones surface later as `identifier not found`.
fn extend_function_env(function: &Function, args: Vec<Object>) -> Env {
    let mut env = Environment::new_enclosed(Rc::clone(&function.env));

    for (param, arg) in function.parameters.iter().zip(args) {
        env.set(param.value.clone(), arg);
    }

    Rc::new(RefCell::new(env))
}

fn unwrap_return_value(obj: Object) -> Object {
    match obj {
        Object::ReturnValue(value) => *value,
        _ => obj,
    }
}

/// Anything except `false` and `null` is truthy.
fn is_truthy(obj: &Object) -> bool {
    match obj {
        Object::Null => false,
        Object::Boolean(value) => *value,
        _ => true,
    }
}

fn is_error(obj: &Object) -> bool {
    matches!(obj, Object::Error(_))
}

fn native_bool_to_boolean_object(input: bool) -> Object {
    Object::Boolean(input)
}
