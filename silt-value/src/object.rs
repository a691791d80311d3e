use std::cell::RefCell;
use std::rc::Rc;

use silt_parser::ast::Stmt;

use crate::env::Env;
use crate::Value;

/// A host-provided function.
#[derive(Clone)]
pub struct NativeFn {
    pub ident: String,
    /// Number of arguments that the function accepts.
    pub arity: usize,
    pub func: &'static dyn Fn(&mut [Value]) -> Value,
}

/// A function defined in the language. The body is shared with the AST node
/// it came from; `closure` is the frame that was current at the definition
/// site, which is where free variables of the body resolve to.
#[derive(Clone)]
pub struct ScriptFn {
    /// `None` for lambda expressions.
    pub name: Option<String>,
    pub params: Rc<Vec<String>>,
    pub body: Rc<Vec<Stmt>>,
    pub closure: Rc<RefCell<Env>>,
}

impl ScriptFn {
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Clone)]
pub enum ObjKind {
    Str(String),
    Fn(ScriptFn),
    NativeFn(NativeFn),
}

#[derive(Clone)]
pub struct Obj {
    pub kind: ObjKind,
}

impl Obj {
    pub fn new_string(str: String) -> Self {
        Self {
            kind: ObjKind::Str(str),
        }
    }

    pub fn new_fn(fun: ScriptFn) -> Self {
        Self {
            kind: ObjKind::Fn(fun),
        }
    }

    pub fn new_native_fn(fun: NativeFn) -> Self {
        Self {
            kind: ObjKind::NativeFn(fun),
        }
    }
}
