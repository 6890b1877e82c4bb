//! Lexically-scoped name bindings.
//!
//! An environment is a name-to-value table with an optional link to the
//! enclosing scope. Lookups walk outward through the chain; writes always
//! land in the innermost store. Function values capture the environment of
//! their defining site, which is what makes closures work.

use super::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Creates a new empty top-level environment.
    pub fn new() -> Self {
        Environment {
            store: HashMap::new(),
            outer: None,
        }
    }

    /// Creates a new environment enclosed by `outer`.
    ///
    /// Used at call time: parameters are bound in the new environment while
    /// everything else resolves through the captured scope.
    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Self {
        Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }
    }

    /// Looks up `name`, searching the current store first and then the
    /// enclosing scopes outward.
    ///
    /// ## Returns
    /// A clone of the bound value, or `None` if the name is unbound.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self
                .outer
                .as_ref()
                .and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Binds `name` to `value` in the current store and returns the value.
    ///
    /// Never rebinds up the chain: shadowing an outer name creates a new
    /// binding in the innermost scope.
    pub fn set(&mut self, name: String, value: Object) -> Object {
        self.store.insert(name, value.clone());
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut env = Environment::new();
        env.set("a".to_string(), Object::Integer(5));

        match env.get("a") {
            Some(Object::Integer(5)) => {}
            other => panic!("env.get(a) wrong. got={:?}", other),
        }
        assert!(env.get("missing").is_none());
    }

    #[test]
    fn test_enclosed_lookup_walks_outward() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer
            .borrow_mut()
            .set("a".to_string(), Object::Integer(1));

        let mut inner = Environment::new_enclosed(Rc::clone(&outer));
        inner.set("b".to_string(), Object::Integer(2));

        match inner.get("a") {
            Some(Object::Integer(1)) => {}
            other => panic!("inner.get(a) wrong. got={:?}", other),
        }
        match inner.get("b") {
            Some(Object::Integer(2)) => {}
            other => panic!("inner.get(b) wrong. got={:?}", other),
        }
        // The outer environment never sees inner bindings
        assert!(outer.borrow().get("b").is_none());
    }

    #[test]
    fn test_set_shadows_without_rebinding_outer() {
        let outer = Rc::new(RefCell::new(Environment::new()));
        outer
            .borrow_mut()
            .set("a".to_string(), Object::Integer(1));

        let mut inner = Environment::new_enclosed(Rc::clone(&outer));
        inner.set("a".to_string(), Object::Integer(99));

        match inner.get("a") {
            Some(Object::Integer(99)) => {}
            other => panic!("inner.get(a) wrong. got={:?}", other),
        }
        match outer.borrow().get("a") {
            Some(Object::Integer(1)) => {}
            other => panic!("outer.get(a) wrong. got={:?}", other),
        }
    }
}
