pub mod interpreter;

use std::fmt;

use silt_parser::ast::Span;
use silt_value::Value;

pub use interpreter::Interpreter;

pub type RunResult<T> = Result<T, RuntimeError>;

/// An error raised during evaluation. Carries the span of the operative
/// token; the driver maps it back to a line for display.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeError {
    pub message: String,
    pub span: Span,
}

impl RuntimeError {
    pub fn new(message: impl ToString, span: Span) -> Self {
        Self {
            message: message.to_string(),
            span,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Non-local control flow surfacing through statement execution. These are
/// not errors: `Break` is caught by the nearest enclosing loop and `Ret` by
/// the nearest function call activation.
pub enum Signal {
    None,
    Break,
    Ret(Value),
}
