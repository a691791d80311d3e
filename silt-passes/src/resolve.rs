//! Variable resolution pass.
//!
//! Walks the AST once before evaluation and classifies every variable use by
//! lexical distance: the number of scopes between the use and the scope that
//! declares the name. The interpreter consumes the resulting side table to
//! address locals directly; names that resolve to no surrounding scope are
//! left out of the table and fall through to dynamic global lookup.

use std::collections::HashMap;

use silt_parser::ast::{Expr, NodeId, Stmt};
use silt_parser::visitor::{walk_expr, walk_stmt, Visitor};
use silt_source::Source;

/// Side table mapping variable nodes to their lexical depth.
pub type ResolvedDepths = HashMap<NodeId, usize>;

/// Declaration state of a name inside a scope. A name is `Declaring` while
/// its initializer is being resolved and `Defined` afterwards; reading a
/// `Declaring` name is the own-initializer error.
#[derive(Debug, Clone, Copy, PartialEq)]
enum VarState {
    Declaring,
    Defined,
}

/// Variable resolution pass.
pub struct Resolver<'a> {
    /// Lexical scope stack. Empty at the top level: globals resolve
    /// dynamically and never enter the table.
    scopes: Vec<HashMap<String, VarState>>,
    depths: ResolvedDepths,
    source: &'a Source<'a>,
}

impl<'a> Resolver<'a> {
    pub fn new(source: &'a Source) -> Self {
        Self {
            scopes: Vec::new(),
            depths: ResolvedDepths::new(),
            source,
        }
    }

    /// Resolves a whole program. The scope stack starts and ends empty.
    pub fn resolve_program(&mut self, program: &[Stmt]) {
        for stmt in program {
            self.visit_stmt(stmt);
        }
    }

    /// Returns the computed side table.
    pub fn resolved_depths(&self) -> &ResolvedDepths {
        &self.depths
    }

    pub fn into_resolved_depths(self) -> ResolvedDepths {
        self.depths
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, ident: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(ident.to_string(), VarState::Declaring);
        }
    }

    fn define(&mut self, ident: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(ident.to_string(), VarState::Defined);
        }
    }

    /// Records the lexical distance of `ident` from the innermost scope, or
    /// nothing if no enclosing scope declares it (global access).
    fn resolve_local(&mut self, id: NodeId, ident: &str) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(ident) {
                self.depths.insert(id, depth);
                return;
            }
        }
    }

    /// Resolves a function body in its own scope, with the parameters
    /// pre-defined. Used by declarations and lambdas alike.
    fn resolve_function(&mut self, params: &[String], body: &[Stmt]) {
        self.begin_scope();
        for param in params {
            self.declare(param);
            self.define(param);
        }
        for stmt in body {
            self.visit_stmt(stmt);
        }
        self.end_scope();
    }
}

impl<'a> Visitor for Resolver<'a> {
    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier { ident, span, id } => {
                // Only the innermost scope can be mid-declaration for this
                // name; shadowed outer bindings are fine to read.
                if let Some(scope) = self.scopes.last() {
                    if scope.get(ident) == Some(&VarState::Declaring) {
                        self.source.error(
                            "Can't read local variable in its own initializer.",
                            span.clone(),
                        );
                    }
                }
                self.resolve_local(*id, ident);
            }
            Expr::Assign {
                ident,
                span: _,
                id,
                value,
            } => {
                self.visit_expr(value);
                self.resolve_local(*id, ident);
            }
            Expr::Lambda { params, body } => self.resolve_function(params, body),
            expr => walk_expr(self, expr),
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDeclaration { ident, initializer } => {
                self.declare(ident);
                if let Some(initializer) = initializer {
                    self.visit_expr(initializer);
                }
                self.define(ident);
            }
            Stmt::FnDeclaration {
                ident,
                params,
                body,
            } => {
                // The name is usable inside the body to allow recursion.
                self.declare(ident);
                self.define(ident);
                self.resolve_function(params, body);
            }
            Stmt::Block(body) => {
                self.begin_scope();
                for stmt in body {
                    self.visit_stmt(stmt);
                }
                self.end_scope();
            }
            stmt => walk_stmt(self, stmt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use silt_parser::parser::Parser;

    fn resolve(source_text: &str) -> (Vec<Stmt>, ResolvedDepths, Vec<String>) {
        let source: Source = source_text.into();
        let program = Parser::new(&source).parse_program();
        let mut resolver = Resolver::new(&source);
        resolver.resolve_program(&program);
        let messages = source
            .errors
            .collected()
            .iter()
            .map(|err| err.message().to_string())
            .collect();
        (program, resolver.into_resolved_depths(), messages)
    }

    /// Collects `(ident, id)` for every variable read in the program, in
    /// visit order.
    fn variable_nodes(program: &[Stmt]) -> Vec<(String, NodeId)> {
        struct Collect(Vec<(String, NodeId)>);
        impl Visitor for Collect {
            fn visit_expr(&mut self, expr: &Expr) {
                if let Expr::Identifier { ident, id, .. } = expr {
                    self.0.push((ident.clone(), *id));
                }
                silt_parser::visitor::walk_expr(self, expr);
            }
        }
        let mut collect = Collect(Vec::new());
        for stmt in program {
            collect.visit_stmt(stmt);
        }
        collect.0
    }

    fn depth_of(source: &str, ident: &str) -> Option<usize> {
        let (program, depths, errors) = resolve(source);
        assert!(errors.is_empty(), "errors: {:?}", errors);
        let nodes = variable_nodes(&program);
        let (_, id) = nodes
            .into_iter()
            .find(|(name, _)| name == ident)
            .expect("variable not found");
        depths.get(&id).copied()
    }

    #[test]
    fn top_level_reads_stay_global() {
        assert_eq!(depth_of("var a = 1; print a;", "a"), None);
    }

    #[test]
    fn local_read_in_same_scope() {
        assert_eq!(depth_of("{ var a = 1; print a; }", "a"), Some(0));
    }

    #[test]
    fn read_through_nested_blocks() {
        assert_eq!(depth_of("{ var a = 1; { { print a; } } }", "a"), Some(2));
    }

    #[test]
    fn parameter_read_inside_function() {
        assert_eq!(depth_of("fun f(x) { return x; }", "x"), Some(0));
    }

    #[test]
    fn closure_capture_is_lexical_distance() {
        assert_eq!(
            depth_of(
                "fun outer() { var x = 1; fun inner() { return x; } }",
                "x"
            ),
            Some(1)
        );
    }

    #[test]
    fn recursion_resolves_to_declaring_scope() {
        // inside a block the function can see itself at depth 1 (own scope
        // is the body scope, the name lives one out)
        assert_eq!(depth_of("{ fun f() { f(); } }", "f"), Some(1));
    }

    #[test]
    fn shadowing_resolves_to_innermost() {
        let (program, depths, errors) =
            resolve("{ var a = 1; { var a = 2; print a; } }");
        assert!(errors.is_empty());
        let nodes = variable_nodes(&program);
        // the print is the only read
        assert_eq!(nodes.len(), 1);
        assert_eq!(depths.get(&nodes[0].1), Some(&0));
    }

    #[test]
    fn reads_own_initializer() {
        let (_, _, errors) = resolve("{ var a = 1; { var a = a; } }");
        assert_eq!(
            errors,
            vec!["Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn shadowed_read_in_sibling_scope_is_fine() {
        // `a` in the initializer of a *different* name is not an error
        let (_, _, errors) = resolve("{ var a = 1; { var b = a; } }");
        assert!(errors.is_empty(), "errors: {:?}", errors);
    }

    #[test]
    fn top_level_self_initializer_is_dynamic() {
        // globals are not tracked by this pass; `var a = a;` at the top
        // level fails at runtime instead
        let (_, _, errors) = resolve("var a = a;");
        assert!(errors.is_empty(), "errors: {:?}", errors);
    }

    #[test]
    fn assignment_target_is_resolved() {
        let (program, depths, errors) = resolve("{ var a = 1; a = 2; }");
        assert!(errors.is_empty());
        struct FindAssign(Option<NodeId>);
        impl Visitor for FindAssign {
            fn visit_expr(&mut self, expr: &Expr) {
                if let Expr::Assign { id, .. } = expr {
                    self.0 = Some(*id);
                }
                silt_parser::visitor::walk_expr(self, expr);
            }
        }
        let mut find = FindAssign(None);
        for stmt in &program {
            find.visit_stmt(stmt);
        }
        let id = find.0.expect("assignment not found");
        assert_eq!(depths.get(&id), Some(&0));
    }
}
