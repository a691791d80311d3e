use std::io::{self, Write};
use std::{env, fs, process};

use silt::builtin_functions;
use silt_interp::Interpreter;
use silt_parser::parser::Parser;
use silt_passes::resolve::Resolver;
use silt_source::Source;

fn main() {
    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => run_repl(),
        2 => run_file(&args[1]),
        _ => {
            eprintln!("Usage: silt [script]");
            process::exit(64);
        }
    }
}

fn run_file(path: &str) {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Could not read {}: {}", path, err);
            process::exit(66);
        }
    };

    let source = Source::new(&content);
    let program = Parser::new(&source).parse_program();
    let mut resolver = Resolver::new(&source);
    resolver.resolve_program(&program);

    if !source.has_no_errors() {
        eprint!("{}", source.errors);
        process::exit(65);
    }

    let mut interpreter = Interpreter::new();
    builtin_functions::install_builtins(&mut interpreter);
    interpreter.resolve(resolver.into_resolved_depths());

    if let Err(err) = interpreter.run(&program) {
        eprintln!(
            "[line {}] Runtime error: {}",
            source.line_of(err.span.start),
            err.message
        );
        process::exit(70);
    }
}

fn run_repl() {
    let mut stdout = io::stdout();
    let stdin = io::stdin();

    // Globals live for the whole session; node ids continue across inputs
    // so resolution entries from earlier lines stay valid.
    let mut interpreter = Interpreter::new();
    builtin_functions::install_builtins(&mut interpreter);
    let mut next_node_id = 0;

    loop {
        print!("> ");
        stdout.flush().unwrap();

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(err) => {
                eprintln!("{}", err);
                break;
            }
        }

        let source = Source::new(input.as_str());
        let mut parser = Parser::new_with_node_start(&source, next_node_id);
        let program = parser.parse_program();
        next_node_id = parser.next_node_id();

        let mut resolver = Resolver::new(&source);
        resolver.resolve_program(&program);

        if !source.has_no_errors() {
            eprint!("{}", source.errors);
            continue;
        }

        interpreter.resolve(resolver.into_resolved_depths());
        if let Err(err) = interpreter.run(&program) {
            eprintln!(
                "[line {}] Runtime error: {}",
                source.line_of(err.span.start),
                err.message
            );
        }
    }
}
