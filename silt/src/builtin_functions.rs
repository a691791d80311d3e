use silt_interp::Interpreter;
use silt_value::Value;

/// Installs the default native functions.
pub fn install_builtins(interpreter: &mut Interpreter) {
    interpreter.define_native("clock", &clock, 0);
    interpreter.define_native("assert", &assert, 1);
    interpreter.define_native("assert_eq", &assert_eq, 2);
}

pub fn assert(args: &mut [Value]) -> Value {
    let arg = &args[0];
    assert!(arg.is_truthy(), "assert failed on {}", arg);
    Value::Bool(true)
}

pub fn assert_eq(args: &mut [Value]) -> Value {
    let left = &args[0];
    let right = &args[1];

    assert_eq!(left, right);
    Value::Bool(true)
}

pub fn clock(_args: &mut [Value]) -> Value {
    let now = std::time::SystemTime::now();
    let since_the_epoch_secs = now
        .duration_since(std::time::UNIX_EPOCH)
        .expect("Time went backwards")
        .as_secs_f64();
    Value::Number(since_the_epoch_secs)
}
