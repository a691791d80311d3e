pub mod builtin_functions;

use silt_interp::Interpreter;
use silt_parser::parser::Parser;
use silt_passes::resolve::Resolver;
use silt_source::Source;

/// For testing purposes only. Runs `source_text` through the whole pipeline
/// with the default natives installed, panicking on any diagnostic or
/// runtime error so failures surface in test output.
pub fn interpret(source_text: &str) {
    let source: Source = source_text.into();
    let program = Parser::new(&source).parse_program();
    let mut resolver = Resolver::new(&source);
    resolver.resolve_program(&program);

    eprint!("{}", source.errors);
    assert!(source.has_no_errors());

    let mut interpreter = Interpreter::new();
    builtin_functions::install_builtins(&mut interpreter);
    interpreter.resolve(resolver.into_resolved_depths());

    if let Err(err) = interpreter.run(&program) {
        panic!(
            "[line {}] Runtime error: {}",
            source.line_of(err.span.start),
            err.message
        );
    }
}
