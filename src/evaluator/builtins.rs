//! Builtin functions available to every program.
//!
//! Builtins are consulted only after environment lookup fails, so user
//! bindings shadow them. Array-returning builtins always build fresh
//! storage; they never alias or mutate their argument.

use crate::object::Object;

/// Looks up the builtin function bound to `name`.
pub fn lookup_builtin(name: &str) -> Option<Object> {
    match name {
        "len" => Some(Object::Builtin(builtin_len)),
        "first" => Some(Object::Builtin(builtin_first)),
        "last" => Some(Object::Builtin(builtin_last)),
        "rest" => Some(Object::Builtin(builtin_rest)),
        "push" => Some(Object::Builtin(builtin_push)),
        _ => None,
    }
}

/// `len(x)`: byte length of a string or element count of an array.
fn builtin_len(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return Object::Error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }
    match &args[0] {
        Object::String(value) => Object::Integer(value.len() as i64),
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        other => Object::Error(format!(
            "argument to `len` not supported, got {}",
            other.object_type()
        )),
    }
}

/// `first(arr)`: the first element, or null for an empty array.
fn builtin_first(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return Object::Error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }
    match &args[0] {
        Object::Array(elements) => elements.first().cloned().unwrap_or(Object::Null),
        other => Object::Error(format!(
            "argument to `first` must be ARRAY, got {}",
            other.object_type()
        )),
    }
}

/// `last(arr)`: the last element, or null for an empty array.
fn builtin_last(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return Object::Error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }
    match &args[0] {
        Object::Array(elements) => elements.last().cloned().unwrap_or(Object::Null),
        other => Object::Error(format!(
            "argument to `last` must be ARRAY, got {}",
            other.object_type()
        )),
    }
}

/// `rest(arr)`: a new array holding every element but the first, or null
/// for an empty array.
fn builtin_rest(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return Object::Error(format!(
            "wrong number of arguments. got={}, want=1",
            args.len()
        ));
    }
    match &args[0] {
        Object::Array(elements) => {
            if elements.is_empty() {
                return Object::Null;
            }
            Object::Array(elements[1..].to_vec())
        }
        other => Object::Error(format!(
            "argument to `rest` must be ARRAY, got {}",
            other.object_type()
        )),
    }
}

/// `push(arr, x)`: a new array with `x` appended. The input is untouched.
fn builtin_push(args: Vec<Object>) -> Object {
    if args.len() != 2 {
        return Object::Error(format!(
            "wrong number of arguments. got={}, want=2",
            args.len()
        ));
    }
    match &args[0] {
        Object::Array(elements) => {
            let mut new_elements = elements.clone();
            new_elements.push(args[1].clone());
            Object::Array(new_elements)
        }
        other => Object::Error(format!(
            "argument to `push` must be ARRAY, got {}",
            other.object_type()
        )),
    }
}
