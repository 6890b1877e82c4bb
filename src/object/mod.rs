//! Runtime values produced by the evaluator.
//!
//! All value types are consolidated in this module: the [`Object`] enum,
//! the [`ObjectType`] tags used in error messages, and the [`HashKey`]
//! fingerprint that makes integers, booleans and strings usable as hash
//! keys. `ReturnValue` and `Error` are not user data; they are sentinels
//! the evaluator propagates to unwind control flow.

pub mod environment;

use crate::ast::expression::Identifier;
use crate::ast::statement::BlockStatement;
use environment::Environment;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

/// The native signature of a builtin function.
pub type BuiltinFunction = fn(Vec<Object>) -> Object;

/// Type tags for runtime values, rendered into error messages exactly as
/// written here (e.g. `type mismatch: INTEGER + BOOLEAN`).
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ObjectType {
    INTEGER,
    BOOLEAN,
    NULL,
    STRING,
    ARRAY,
    HASH,
    FUNCTION,
    BUILTIN,
    RETURN_VALUE,
    ERROR,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A type-tagged 64-bit fingerprint keying entries of a hash value.
///
/// The tag keeps `1` (integer) distinct from `"1"` (string) even when the
/// payloads collide.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct HashKey {
    pub object_type: ObjectType,
    pub value: u64,
}

/// A key-value entry stored in a hash. The original key object is kept
/// alongside the value so inspection can render it.
#[derive(Debug, Clone)]
pub struct HashPair {
    pub key: Object,
    pub value: Object,
}

/// A function value: parameter list, body, and the environment captured at
/// the literal's evaluation site. The function holds the environment, never
/// the reverse.
#[derive(Clone)]
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Rc<RefCell<Environment>>,
}

// The captured environment can reach this function again through its own
// bindings, so Debug must not descend into it.
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

/// Enum representing all runtime value types.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    String(String),
    Array(Vec<Object>),
    Hash(HashMap<HashKey, HashPair>),
    Function(Function),
    Builtin(BuiltinFunction),
    ReturnValue(Box<Object>),
    Error(String),
}

impl Object {
    /// Returns the type tag for this value.
    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::INTEGER,
            Object::Boolean(_) => ObjectType::BOOLEAN,
            Object::Null => ObjectType::NULL,
            Object::String(_) => ObjectType::STRING,
            Object::Array(_) => ObjectType::ARRAY,
            Object::Hash(_) => ObjectType::HASH,
            Object::Function(_) => ObjectType::FUNCTION,
            Object::Builtin(_) => ObjectType::BUILTIN,
            Object::ReturnValue(_) => ObjectType::RETURN_VALUE,
            Object::Error(_) => ObjectType::ERROR,
        }
    }

    /// Returns the hash key for this value, or `None` when the value is not
    /// hashable. Integers hash as their unsigned representation, booleans as
    /// 0/1, strings as FNV-1a 64-bit over their bytes.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey {
                object_type: ObjectType::INTEGER,
                value: *value as u64,
            }),
            Object::Boolean(value) => Some(HashKey {
                object_type: ObjectType::BOOLEAN,
                value: u64::from(*value),
            }),
            Object::String(value) => Some(HashKey {
                object_type: ObjectType::STRING,
                value: fnv1a(value.as_bytes()),
            }),
            _ => None,
        }
    }

    /// Renders the value's text form as shown by the REPL and tests.
    pub fn inspect(&self) -> String {
        match self {
            Object::Integer(value) => value.to_string(),
            Object::Boolean(value) => value.to_string(),
            Object::Null => "null".to_string(),
            Object::String(value) => value.clone(),
            Object::Array(elements) => {
                let elements: Vec<String> = elements.iter().map(|e| e.inspect()).collect();
                format!("[{}]", elements.join(", "))
            }
            Object::Hash(pairs) => {
                let pairs: Vec<String> = pairs
                    .values()
                    .map(|pair| format!("{}: {}", pair.key.inspect(), pair.value.inspect()))
                    .collect();
                format!("{{{}}}", pairs.join(", "))
            }
            Object::Function(function) => {
                let parameters: Vec<String> =
                    function.parameters.iter().map(|p| p.to_string()).collect();
                format!("fn({}) {{\n{}\n}}", parameters.join(", "), function.body)
            }
            Object::Builtin(_) => "builtin function".to_string(),
            Object::ReturnValue(value) => value.inspect(),
            Object::Error(message) => format!("ERROR: {}", message),
        }
    }
}

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a 64-bit hash over a byte slice.
fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_hash_key() {
        let hello1 = Object::String("Hello World".to_string());
        let hello2 = Object::String("Hello World".to_string());
        let diff1 = Object::String("My name is johnny".to_string());
        let diff2 = Object::String("My name is johnny".to_string());

        assert_eq!(
            hello1.hash_key(),
            hello2.hash_key(),
            "strings with same content have different hash keys"
        );
        assert_eq!(
            diff1.hash_key(),
            diff2.hash_key(),
            "strings with same content have different hash keys"
        );
        assert_ne!(
            hello1.hash_key(),
            diff1.hash_key(),
            "strings with different content have same hash keys"
        );
    }

    #[test]
    fn test_boolean_and_integer_hash_keys() {
        assert_eq!(
            Object::Boolean(true).hash_key(),
            Some(HashKey {
                object_type: ObjectType::BOOLEAN,
                value: 1,
            })
        );
        assert_eq!(
            Object::Boolean(false).hash_key(),
            Some(HashKey {
                object_type: ObjectType::BOOLEAN,
                value: 0,
            })
        );
        assert_eq!(
            Object::Integer(42).hash_key(),
            Some(HashKey {
                object_type: ObjectType::INTEGER,
                value: 42,
            })
        );
        // The tag keeps 1 and "1" apart even if payloads were to collide
        assert_ne!(
            Object::Integer(1).hash_key(),
            Object::String("1".to_string()).hash_key()
        );
    }

    #[test]
    fn test_unhashable_values_have_no_hash_key() {
        assert_eq!(Object::Null.hash_key(), None);
        assert_eq!(Object::Array(vec![]).hash_key(), None);
        assert_eq!(Object::Hash(HashMap::new()).hash_key(), None);
    }

    #[test]
    fn test_inspect() {
        assert_eq!(Object::Integer(5).inspect(), "5");
        assert_eq!(Object::Boolean(true).inspect(), "true");
        assert_eq!(Object::Null.inspect(), "null");
        assert_eq!(Object::String("hello".to_string()).inspect(), "hello");
        assert_eq!(
            Object::Array(vec![Object::Integer(1), Object::Integer(2)]).inspect(),
            "[1, 2]"
        );
        assert_eq!(
            Object::Error("type mismatch: INTEGER + BOOLEAN".to_string()).inspect(),
            "ERROR: type mismatch: INTEGER + BOOLEAN"
        );
        assert_eq!(
            Object::ReturnValue(Box::new(Object::Integer(10))).inspect(),
            "10"
        );
    }
}
