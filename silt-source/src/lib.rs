use std::{cell::RefCell, fmt, ops::Range};

pub struct Source<'a> {
    pub content: &'a str,
    pub errors: ErrorReporter,
}

impl<'a> Source<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            errors: ErrorReporter::new(),
        }
    }

    pub fn has_no_errors(&self) -> bool {
        self.errors.errors.borrow().len() == 0
    }

    /// Reports a diagnostic for the given byte span.
    pub fn error(&self, message: impl ToString, span: Range<usize>) {
        let line = self.line_of(span.start);
        self.errors.add_error(SyntaxError::new(message, line, span));
    }

    /// 1-based line number of a byte offset.
    pub fn line_of(&self, pos: usize) -> usize {
        let pos = pos.min(self.content.len());
        1 + self.content.as_bytes()[..pos]
            .iter()
            .filter(|&&byte| byte == b'\n')
            .count()
    }
}

impl<'a> Into<Source<'a>> for &'a str {
    fn into(self) -> Source<'a> {
        Source::new(self)
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxError {
    message: String,
    line: usize,
    span: Range<usize>,
}

impl SyntaxError {
    pub fn new(message: impl ToString, line: usize, span: Range<usize>) -> Self {
        Self {
            message: message.to_string(),
            line,
            span,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// Manages all the errors
pub struct ErrorReporter {
    errors: RefCell<Vec<SyntaxError>>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            errors: RefCell::new(Vec::new()),
        }
    }

    pub fn add_error(&self, error: SyntaxError) {
        self.errors.borrow_mut().push(error); // this should be the only place where self.errors is borrowed mutably
    }

    /// Snapshot of the recorded diagnostics, oldest first.
    pub fn collected(&self) -> Vec<SyntaxError> {
        self.errors.borrow().clone()
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors.borrow();
        for error in errors.iter() {
            writeln!(
                f,
                "[line {line}] Error: {message}",
                line = error.line,
                message = error.message
            )?;
        }

        Ok(())
    }
}
