//! Tree-walking evaluator.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use silt_parser::ast::{Expr, Span, Stmt};
use silt_parser::lexer::Token;
use silt_passes::resolve::ResolvedDepths;
use silt_value::env::Env;
use silt_value::object::{NativeFn, ObjKind, ScriptFn};
use silt_value::Value;

use crate::{RunResult, RuntimeError, Signal};

pub struct Interpreter {
    /// The outermost frame. Lives as long as the interpreter; the REPL
    /// executes every input against it.
    globals: Rc<RefCell<Env>>,
    /// The frame statements currently execute in.
    env: Rc<RefCell<Env>>,
    /// Lexical depths for variable nodes, produced by the resolver. Nodes
    /// without an entry resolve dynamically in the globals frame.
    depths: ResolvedDepths,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Rc::new(RefCell::new(Env::new()));
        Self {
            env: Rc::clone(&globals),
            globals,
            depths: ResolvedDepths::new(),
        }
    }

    /// The globals frame, for installing host values and inspecting results.
    pub fn globals(&self) -> Rc<RefCell<Env>> {
        Rc::clone(&self.globals)
    }

    /// Installs a host function as a global binding.
    pub fn define_native(
        &mut self,
        ident: &str,
        func: &'static dyn Fn(&mut [Value]) -> Value,
        arity: usize,
    ) {
        let value = Value::native_fn(NativeFn {
            ident: ident.to_string(),
            arity,
            func,
        });
        self.globals.borrow_mut().define(ident.to_string(), value);
    }

    /// Takes in depth-resolution results for a program about to run. Merges,
    /// so a REPL can accumulate entries input by input (closures keep nodes
    /// from old inputs alive).
    pub fn resolve(&mut self, depths: ResolvedDepths) {
        self.depths.extend(depths);
    }

    /// Executes a program. A `return` or `break` surfacing at the top level
    /// stops execution of the remaining statements; it is not an error.
    pub fn run(&mut self, program: &[Stmt]) -> RunResult<()> {
        for stmt in program {
            match self.exec_stmt(stmt)? {
                Signal::None => {}
                _ => break,
            }
        }
        Ok(())
    }

    /// Runs `body` with `env` as the current frame. The previous frame is
    /// restored on every exit path, including errors and non-local signals.
    pub fn exec_block(&mut self, body: &[Stmt], env: Env) -> RunResult<Signal> {
        let prev = mem::replace(&mut self.env, Rc::new(RefCell::new(env)));

        let mut result = Ok(Signal::None);
        for stmt in body {
            match self.exec_stmt(stmt) {
                Ok(Signal::None) => {}
                other => {
                    result = other;
                    break;
                }
            }
        }

        self.env = prev;
        result
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> RunResult<Signal> {
        match stmt {
            Stmt::ExprStmt(expr) => {
                self.eval_expr(expr)?;
                Ok(Signal::None)
            }
            Stmt::PrintStmt(expr) => {
                let value = self.eval_expr(expr)?;
                println!("{}", value);
                Ok(Signal::None)
            }
            Stmt::VarDeclaration { ident, initializer } => {
                let value = match initializer {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Nil,
                };
                self.env.borrow_mut().define(ident.clone(), value);
                Ok(Signal::None)
            }
            Stmt::FnDeclaration {
                ident,
                params,
                body,
            } => {
                let fun = ScriptFn {
                    name: Some(ident.clone()),
                    params: Rc::clone(params),
                    body: Rc::clone(body),
                    closure: Rc::clone(&self.env),
                };
                self.env
                    .borrow_mut()
                    .define(ident.clone(), Value::script_fn(fun));
                Ok(Signal::None)
            }
            Stmt::Block(body) => {
                let env = Env::with_enclosing(Rc::clone(&self.env));
                self.exec_block(body, env)
            }
            Stmt::IfStmt {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval_expr(cond)?.is_truthy() {
                    self.exec_stmt(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec_stmt(else_branch)
                } else {
                    Ok(Signal::None)
                }
            }
            Stmt::WhileStmt { cond, body } => {
                while self.eval_expr(cond)?.is_truthy() {
                    match self.exec_stmt(body)? {
                        Signal::None => {}
                        Signal::Break => break,
                        ret => return Ok(ret),
                    }
                }
                Ok(Signal::None)
            }
            Stmt::BreakStmt => Ok(Signal::Break),
            Stmt::ReturnStmt(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => Value::Nil,
                };
                Ok(Signal::Ret(value))
            }
            Stmt::Error => Ok(Signal::None),
        }
    }

    fn eval_expr(&mut self, expr: &Expr) -> RunResult<Value> {
        match expr {
            Expr::NumberLit(val) => Ok(Value::Number(*val)),
            Expr::BoolLit(val) => Ok(Value::Bool(*val)),
            Expr::StringLit(val) => Ok(Value::string(val)),
            Expr::NilLit => Ok(Value::Nil),
            Expr::Grouping(inner) => self.eval_expr(inner),
            Expr::Identifier { ident, span, id } => {
                let value = match self.depths.get(id) {
                    Some(&depth) => self.env.borrow().get_at(depth, ident),
                    None => self.globals.borrow().get(ident),
                };
                value.ok_or_else(|| undefined_variable(ident, span))
            }
            Expr::Assign {
                ident,
                span,
                id,
                value,
            } => {
                let value = self.eval_expr(value)?;
                let assigned = match self.depths.get(id) {
                    Some(&depth) => {
                        self.env
                            .borrow_mut()
                            .assign_at(depth, ident, value.clone())
                    }
                    None => self.globals.borrow_mut().assign(ident, value.clone()),
                };
                if assigned {
                    Ok(value)
                } else {
                    Err(undefined_variable(ident, span))
                }
            }
            Expr::Unary { op, span, arg } => {
                let arg = self.eval_expr(arg)?;
                match op {
                    Token::Minus => {
                        let val = arg.cast_to_number().ok_or_else(|| {
                            RuntimeError::new("Operand must be a number.", span.clone())
                        })?;
                        Ok(Value::Number(-val))
                    }
                    _ => Ok(Value::Bool(!arg.is_truthy())),
                }
            }
            Expr::Binary { lhs, op, span, rhs } => {
                let lhs = self.eval_expr(lhs)?;
                let rhs = self.eval_expr(rhs)?;
                eval_binary_op(op, lhs, rhs, span)
            }
            Expr::Logical { lhs, op, rhs } => {
                let lhs = self.eval_expr(lhs)?;
                // `or` short-circuits on a truthy left operand, `and` on a
                // falsy one; the result is the deciding operand itself.
                let short_circuits = match op {
                    Token::Or => lhs.is_truthy(),
                    _ => !lhs.is_truthy(),
                };
                if short_circuits {
                    Ok(lhs)
                } else {
                    self.eval_expr(rhs)
                }
            }
            Expr::Ternary {
                cond,
                if_true,
                if_false,
            } => {
                if self.eval_expr(cond)?.is_truthy() {
                    self.eval_expr(if_true)
                } else {
                    self.eval_expr(if_false)
                }
            }
            Expr::Call { callee, span, args } => {
                let callee = self.eval_expr(callee)?;
                let mut arg_values = Vec::with_capacity(args.len());
                for arg in args {
                    arg_values.push(self.eval_expr(arg)?);
                }
                self.call_value(callee, arg_values, span)
            }
            Expr::Lambda { params, body } => Ok(Value::script_fn(ScriptFn {
                name: None,
                params: Rc::clone(params),
                body: Rc::clone(body),
                closure: Rc::clone(&self.env),
            })),
            Expr::Error => Ok(Value::Nil),
        }
    }

    fn call_value(&mut self, callee: Value, args: Vec<Value>, span: &Span) -> RunResult<Value> {
        let obj = match &callee {
            Value::Object(obj) => Rc::clone(obj),
            _ => return Err(RuntimeError::new("Can only call functions.", span.clone())),
        };

        match &obj.kind {
            ObjKind::Fn(fun) => {
                check_arity(fun.arity(), args.len(), span)?;

                // The new frame chains onto the frame captured at the
                // function's definition site, not onto the caller's frame.
                let mut env = Env::with_enclosing(Rc::clone(&fun.closure));
                for (param, arg) in fun.params.iter().zip(args) {
                    env.define(param.clone(), arg);
                }

                let sig = self.exec_block(&fun.body, env)?;
                Ok(match sig {
                    Signal::Ret(value) => value,
                    _ => Value::Nil,
                })
            }
            ObjKind::NativeFn(native) => {
                check_arity(native.arity, args.len(), span)?;
                let mut args = args;
                Ok((native.func)(&mut args))
            }
            ObjKind::Str(_) => Err(RuntimeError::new("Can only call functions.", span.clone())),
        }
    }
}

fn eval_binary_op(op: &Token, lhs: Value, rhs: Value, span: &Span) -> RunResult<Value> {
    match op {
        Token::Plus => match (lhs.cast_to_number(), rhs.cast_to_number()) {
            (Some(l), Some(r)) => Ok(Value::Number(l + r)),
            _ => match (lhs.cast_to_str(), rhs.cast_to_str()) {
                (Some(l), Some(r)) => Ok(Value::string(format!("{}{}", l, r))),
                _ => Err(RuntimeError::new(
                    "Operands must be two numbers or two strings.",
                    span.clone(),
                )),
            },
        },
        Token::EqualsEquals => Ok(Value::Bool(lhs == rhs)),
        Token::NotEquals => Ok(Value::Bool(lhs != rhs)),
        op => {
            let (l, r) = match (lhs.cast_to_number(), rhs.cast_to_number()) {
                (Some(l), Some(r)) => (l, r),
                _ => {
                    return Err(RuntimeError::new(
                        "Operands must be numbers.",
                        span.clone(),
                    ))
                }
            };
            Ok(match op {
                Token::Minus => Value::Number(l - r),
                Token::Asterisk => Value::Number(l * r),
                // division by zero follows IEEE: ±inf or NaN, never an error
                Token::Slash => Value::Number(l / r),
                Token::GreaterThan => Value::Bool(l > r),
                Token::GreaterThanEquals => Value::Bool(l >= r),
                Token::LessThan => Value::Bool(l < r),
                Token::LessThanEquals => Value::Bool(l <= r),
                op => panic!("not a binary operator: {:?}", op),
            })
        }
    }
}

fn check_arity(expected: usize, actual: usize, span: &Span) -> RunResult<()> {
    if expected != actual {
        return Err(RuntimeError::new(
            format!("Expected {} arguments but got {}.", expected, actual),
            span.clone(),
        ));
    }
    Ok(())
}

fn undefined_variable(ident: &str, span: &Span) -> RuntimeError {
    RuntimeError::new(format!("Undefined variable '{}'.", ident), span.clone())
}
