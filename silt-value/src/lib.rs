pub mod env;
pub mod object;

use std::fmt;
use std::rc::Rc;

use object::{NativeFn, Obj, ObjKind, ScriptFn};

#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Object(Rc<Obj>),
}

impl Value {
    pub fn string(str: impl ToString) -> Self {
        Self::Object(Rc::new(Obj::new_string(str.to_string())))
    }

    pub fn script_fn(fun: ScriptFn) -> Self {
        Self::Object(Rc::new(Obj::new_fn(fun)))
    }

    pub fn native_fn(fun: NativeFn) -> Self {
        Self::Object(Rc::new(Obj::new_native_fn(fun)))
    }

    /// `nil` and `false` are falsy; every other value is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// Attempts to cast the `Value` into a `&str` or `None` if wrong type.
    pub fn cast_to_str(&self) -> Option<&str> {
        match self {
            Self::Object(obj) => match &obj.kind {
                ObjKind::Str(string) => Some(string),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn cast_to_number(&self) -> Option<f64> {
        match self {
            Self::Number(val) => Some(*val),
            _ => None,
        }
    }

    fn print_obj(f: &mut fmt::Formatter<'_>, obj: &Obj) -> fmt::Result {
        match &obj.kind {
            ObjKind::Str(str) => write!(f, "{}", str),
            ObjKind::Fn(fun) => write!(f, "<fn {}>", fun.name.as_deref().unwrap_or("")),
            ObjKind::NativeFn(NativeFn { ident, .. }) => write!(f, "<native fn {}>", ident),
        }
    }
}

/// Value equality: `nil` equals only `nil`, values of different kinds are
/// never equal, strings compare by content and functions by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::Object(l), Value::Object(r)) => match (&l.kind, &r.kind) {
                (ObjKind::Str(l), ObjKind::Str(r)) => l == r,
                _ => Rc::ptr_eq(l, r),
            },
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(val) => write!(f, "{}", val),
            Value::Number(val) => write!(f, "{}", val),
            Value::Object(val) => Self::print_obj(f, val),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
