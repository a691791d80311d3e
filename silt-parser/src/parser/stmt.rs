use crate::ast::Expr;

use super::*;

impl<'a> Parser<'a> {
    /// Parses a declaration (or statement). This is the error-recovery
    /// boundary: a failed parse synchronizes to the next statement and
    /// yields [`Stmt::Error`] in place of the lost statement.
    pub fn parse_declaration(&mut self) -> Stmt {
        let result = if self.check(Token::Var) {
            self.parse_var_declaration()
        } else if self.check(Token::Fun) && matches!(self.peek_next(), Token::Identifier(_)) {
            // `fun` followed by anything other than a name starts a lambda
            // expression statement instead.
            self.parse_fn_declaration()
        } else {
            self.parse_stmt()
        };

        match result {
            Ok(stmt) => stmt,
            Err(ParseError) => {
                self.synchronize();
                Stmt::Error
            }
        }
    }

    /// Parses a statement.
    fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        match self.current_token {
            Token::Print => self.parse_print_stmt(),
            Token::OpenBrace => Ok(Stmt::Block(self.parse_block("Expect '{' before block.")?)),
            Token::If => self.parse_if_stmt(),
            Token::While => self.parse_while_stmt(),
            Token::For => self.parse_for_stmt(),
            Token::Break => self.parse_break_stmt(),
            Token::Return => self.parse_return_stmt(),
            _ => {
                // expression statement
                let expr = self.parse_expr()?;
                self.expect(Token::Semi, "Expect ';' after expression.")?;
                Ok(Stmt::ExprStmt(expr))
            }
        }
    }

    /// Parses a brace-delimited statement list. `open_message` is the
    /// diagnostic used when the opening brace is missing (callers know
    /// whether a block or a function body was expected).
    pub(super) fn parse_block(&mut self, open_message: &str) -> ParseResult<Vec<Stmt>> {
        self.expect(Token::OpenBrace, open_message)?;

        let mut body = Vec::new();
        while !self.check(Token::CloseBrace) && !self.check(Token::Eof) {
            body.push(self.parse_declaration());
        }

        self.expect(Token::CloseBrace, "Expect '}' after block.")?;
        Ok(body)
    }

    fn parse_var_declaration(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::Var, "Expect 'var'.")?;
        let ident = self.expect_identifier("Expect variable name.")?;

        let initializer = if self.eat(Token::Equals) {
            Some(self.parse_expr()?)
        } else {
            None
        };

        self.expect(Token::Semi, "Expect ';' after variable declaration.")?;
        Ok(Stmt::VarDeclaration { ident, initializer })
    }

    fn parse_fn_declaration(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::Fun, "Expect 'fun'.")?;
        let ident = self.expect_identifier("Expect function name.")?;
        let (params, body) = self.parse_function("function")?;

        Ok(Stmt::FnDeclaration {
            ident,
            params,
            body,
        })
    }

    fn parse_print_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::Print, "Expect 'print'.")?;
        let value = self.parse_expr()?;
        self.expect(Token::Semi, "Expect ';' after value.")?;
        Ok(Stmt::PrintStmt(value))
    }

    fn parse_if_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::If, "Expect 'if'.")?;
        self.expect(Token::OpenParen, "Expect '(' after 'if'.")?;
        let cond = self.parse_expr()?;
        self.expect(Token::CloseParen, "Expect ')' after if condition.")?;

        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.eat(Token::Else) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };

        Ok(Stmt::IfStmt {
            cond,
            then_branch,
            else_branch,
        })
    }

    fn parse_while_stmt(&mut self) -> ParseResult<Stmt> {
        self.loop_depth += 1;
        let result = self.parse_while_stmt_inner();
        self.loop_depth -= 1;
        result
    }

    fn parse_while_stmt_inner(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::While, "Expect 'while'.")?;
        self.expect(Token::OpenParen, "Expect '(' after 'while'.")?;
        let cond = self.parse_expr()?;
        self.expect(Token::CloseParen, "Expect ')' after while condition.")?;
        let body = Box::new(self.parse_stmt()?);

        Ok(Stmt::WhileStmt { cond, body })
    }

    fn parse_for_stmt(&mut self) -> ParseResult<Stmt> {
        self.loop_depth += 1;
        let result = self.parse_for_stmt_inner();
        self.loop_depth -= 1;
        result
    }

    fn parse_for_stmt_inner(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::For, "Expect 'for'.")?;
        self.expect(Token::OpenParen, "Expect '(' after 'for'.")?;

        let initializer = if self.eat(Token::Semi) {
            None
        } else if self.check(Token::Var) {
            Some(self.parse_var_declaration()?)
        } else {
            let expr = self.parse_expr()?;
            self.expect(Token::Semi, "Expect ';' after loop initializer.")?;
            Some(Stmt::ExprStmt(expr))
        };

        let cond = if self.check(Token::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(Token::Semi, "Expect ';' after loop condition.")?;

        let increment = if self.check(Token::CloseParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(Token::CloseParen, "Expect ')' after for clauses.")?;

        let mut body = self.parse_stmt()?;

        // Desugar into the equivalent while loop.
        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::ExprStmt(increment)]);
        }
        body = Stmt::WhileStmt {
            cond: cond.unwrap_or(Expr::BoolLit(true)),
            body: Box::new(body),
        };
        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    fn parse_break_stmt(&mut self) -> ParseResult<Stmt> {
        if self.loop_depth == 0 {
            return Err(self.fatal("Break statement must appear inside of loop."));
        }
        self.expect(Token::Break, "Expect 'break'.")?;
        self.expect(Token::Semi, "Expect ';' after 'break'.")?;
        Ok(Stmt::BreakStmt)
    }

    fn parse_return_stmt(&mut self) -> ParseResult<Stmt> {
        self.expect(Token::Return, "Expect 'return'.")?;
        let value = if self.check(Token::Semi) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(Token::Semi, "Expect ';' after return value.")?;
        Ok(Stmt::ReturnStmt(value))
    }
}
