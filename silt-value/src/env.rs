use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::Value;

/// One frame of the environment chain: a name→value mapping plus a link to
/// the enclosing frame. The chain is rooted at the globals frame, whose
/// `enclosing` is `None`.
#[derive(Default)]
pub struct Env {
    values: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Env>>>,
}

impl Env {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    /// A fresh frame chained onto `enclosing`.
    pub fn with_enclosing(enclosing: Rc<RefCell<Env>>) -> Self {
        Self {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Creates or overwrites a binding in this frame only.
    pub fn define(&mut self, ident: String, value: Value) {
        self.values.insert(ident, value);
    }

    /// Looks `ident` up through the chain, innermost first.
    pub fn get(&self, ident: &str) -> Option<Value> {
        if let Some(value) = self.values.get(ident) {
            return Some(value.clone());
        }

        let mut curr = self.enclosing.clone();
        while let Some(env) = curr {
            let env = env.borrow();
            if let Some(value) = env.values.get(ident) {
                return Some(value.clone());
            }
            curr = env.enclosing.clone();
        }

        None
    }

    /// Mutates the nearest binding of `ident` up the chain. Returns `false`
    /// if no frame binds it (assignment does not create bindings).
    pub fn assign(&mut self, ident: &str, value: Value) -> bool {
        if let Some(slot) = self.values.get_mut(ident) {
            *slot = value;
            return true;
        }

        let mut curr = self.enclosing.clone();
        while let Some(env) = curr {
            let mut env = env.borrow_mut();
            if let Some(slot) = env.values.get_mut(ident) {
                *slot = value;
                return true;
            }
            curr = env.enclosing.clone();
        }

        false
    }

    /// Reads `ident` from the frame exactly `depth` links up the chain.
    pub fn get_at(&self, depth: usize, ident: &str) -> Option<Value> {
        if depth == 0 {
            return self.values.get(ident).cloned();
        }

        let mut env = self.enclosing.clone()?;
        for _ in 1..depth {
            let next = env.borrow().enclosing.clone()?;
            env = next;
        }
        let value = env.borrow().values.get(ident).cloned();
        value
    }

    /// Writes `ident` in the frame exactly `depth` links up the chain.
    /// Returns `false` if that frame does not bind the name.
    pub fn assign_at(&mut self, depth: usize, ident: &str, value: Value) -> bool {
        if depth == 0 {
            if let Some(slot) = self.values.get_mut(ident) {
                *slot = value;
                return true;
            }
            return false;
        }

        let mut env = match self.enclosing.clone() {
            Some(env) => env,
            None => return false,
        };
        for _ in 1..depth {
            let next = match env.borrow().enclosing.clone() {
                Some(env) => env,
                None => return false,
            };
            env = next;
        }
        let mut env = env.borrow_mut();
        if let Some(slot) = env.values.get_mut(ident) {
            *slot = value;
            return true;
        }
        false
    }
}
