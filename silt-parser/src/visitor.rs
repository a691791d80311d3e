//! Visitor pattern for AST nodes.

use crate::ast::{Expr, Stmt};

pub trait Visitor: Sized {
    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }
}

pub fn walk_expr(visitor: &mut impl Visitor, expr: &Expr) {
    match expr {
        Expr::NumberLit(_) => {}
        Expr::BoolLit(_) => {}
        Expr::StringLit(_) => {}
        Expr::NilLit => {}
        Expr::Grouping(inner) => visitor.visit_expr(inner),
        Expr::Identifier { .. } => {}
        Expr::Assign { value, .. } => visitor.visit_expr(value),
        Expr::Unary { op: _, span: _, arg } => visitor.visit_expr(arg),
        Expr::Binary { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Expr::Logical { lhs, rhs, .. } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Expr::Ternary {
            cond,
            if_true,
            if_false,
        } => {
            visitor.visit_expr(cond);
            visitor.visit_expr(if_true);
            visitor.visit_expr(if_false);
        }
        Expr::Call { callee, args, .. } => {
            visitor.visit_expr(callee);
            for arg in args.iter() {
                visitor.visit_expr(arg);
            }
        }
        Expr::Lambda { params: _, body } => {
            for stmt in body.iter() {
                visitor.visit_stmt(stmt);
            }
        }
        Expr::Error => {}
    }
}

pub fn walk_stmt(visitor: &mut impl Visitor, stmt: &Stmt) {
    /// Iteratively visit all statements in a statement list.
    macro_rules! visit_stmt_list {
        ($visitor: expr, $body: expr) => {
            for stmt in $body.iter() {
                Visitor::visit_stmt($visitor, stmt);
            }
        };
    }

    match stmt {
        Stmt::VarDeclaration {
            ident: _,
            initializer,
        } => {
            if let Some(initializer) = initializer {
                visitor.visit_expr(initializer);
            }
        }
        Stmt::FnDeclaration {
            ident: _,
            params: _,
            body,
        } => visit_stmt_list!(visitor, body),
        Stmt::Block(body) => visit_stmt_list!(visitor, body),
        Stmt::ExprStmt(expr) => visitor.visit_expr(expr),
        Stmt::PrintStmt(expr) => visitor.visit_expr(expr),
        Stmt::IfStmt {
            cond,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(cond);
            visitor.visit_stmt(then_branch);
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt(else_branch);
            }
        }
        Stmt::WhileStmt { cond, body } => {
            visitor.visit_expr(cond);
            visitor.visit_stmt(body);
        }
        Stmt::BreakStmt => {}
        Stmt::ReturnStmt(value) => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        Stmt::Error => {}
    }
}
