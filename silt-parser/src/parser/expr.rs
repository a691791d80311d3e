use std::rc::Rc;

use crate::ast::Expr;
use crate::lexer::UNARY_BP;

use super::*;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_expr_bp(0) // 0 to accept any expression
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        // NOTE: prefix operators are handled here
        match self.current_token {
            Token::NumberLit(_) | Token::BoolLit(_) | Token::StringLit(_) | Token::Nil => {
                self.parse_literal_expr()
            }
            Token::Identifier(_) => self.parse_identifier_expr(),
            Token::LogicalNot | Token::Minus => {
                let span = self.span();
                let op = self.next();
                Ok(Expr::Unary {
                    op,
                    span,
                    arg: Box::new(self.parse_expr_bp(UNARY_BP)?),
                })
            }
            Token::OpenParen => {
                self.next();
                let inner = self.parse_expr()?;
                self.expect(Token::CloseParen, "Expect ')' after expression.")?;
                Ok(Expr::Grouping(Box::new(inner)))
            }
            Token::Fun => {
                self.next();
                let (params, body) = self.parse_function("lambda")?;
                Ok(Expr::Lambda { params, body })
            }
            _ => Err(self.fatal("Expect expression.")),
        }
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression, use [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_primary_expr()?;

        loop {
            let (l_bp, r_bp) = match self.current_token.binop_bp() {
                Some(bp) => bp,
                None => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            // self.current_token is a valid binop
            let op_span = self.span();
            let op = self.next();

            lhs = match op {
                Token::OpenParen => self.finish_call_expr(lhs)?,
                Token::Question => {
                    let if_true = self.parse_expr_bp(r_bp)?;
                    self.expect(Token::Colon, "Expect ':' in ternary operator.")?;
                    let if_false = self.parse_expr_bp(r_bp)?;
                    Expr::Ternary {
                        cond: Box::new(lhs),
                        if_true: Box::new(if_true),
                        if_false: Box::new(if_false),
                    }
                }
                Token::Equals => {
                    let value = self.parse_expr_bp(r_bp)?;
                    match lhs {
                        Expr::Identifier { ident, span, id } => Expr::Assign {
                            ident,
                            span,
                            id,
                            value: Box::new(value),
                        },
                        lhs => {
                            // Not fatal; the target expression stands on its
                            // own and parsing continues past the value.
                            self.source.error("Invalid assignment target", op_span);
                            lhs
                        }
                    }
                }
                Token::And | Token::Or => Expr::Logical {
                    lhs: Box::new(lhs),
                    op,
                    rhs: Box::new(self.parse_expr_bp(r_bp)?),
                },
                op => Expr::Binary {
                    lhs: Box::new(lhs),
                    op,
                    span: op_span,
                    rhs: Box::new(self.parse_expr_bp(r_bp)?),
                },
            };
        }

        Ok(lhs)
    }

    /* Expressions.Literals */
    /// Parses a literal expression.
    fn parse_literal_expr(&mut self) -> ParseResult<Expr> {
        let val = match self.current_token {
            Token::NumberLit(val) => Expr::NumberLit(val),
            Token::BoolLit(val) => Expr::BoolLit(val),
            Token::StringLit(ref val) => Expr::StringLit(val.clone()),
            Token::Nil => Expr::NilLit,
            _ => return Err(self.fatal("Expect expression.")),
        };
        self.next(); // eat parsed token
        Ok(val)
    }

    /* Expressions.Identifier */
    fn parse_identifier_expr(&mut self) -> ParseResult<Expr> {
        let span = self.span();
        match self.current_token.clone() {
            Token::Identifier(ident) => {
                self.next();
                let id = self.new_node_id();
                Ok(Expr::Identifier { ident, span, id })
            }
            _ => Err(self.fatal("Expect expression.")),
        }
    }

    /// Parses the arguments of a call expression. The opening paren has
    /// already been eaten; `callee` is the expression it attached to.
    fn finish_call_expr(&mut self, callee: Expr) -> ParseResult<Expr> {
        let mut args = Vec::new();

        if !self.check(Token::CloseParen) {
            loop {
                if args.len() >= 255 {
                    self.report("Can't have more than 255 arguments.");
                }
                args.push(self.parse_expr()?);

                if !self.eat(Token::Comma) {
                    break;
                }
            }
        }

        let span = self.span();
        self.expect(Token::CloseParen, "Expect ')' after arguments.")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            span,
            args,
        })
    }

    /// Parses a parameter list and body, shared by named function
    /// declarations and lambda expressions. The loop-nesting counter is
    /// reset for the body: a `break` inside a function never targets a loop
    /// outside of it.
    pub(super) fn parse_function(
        &mut self,
        kind: &str,
    ) -> ParseResult<(Rc<Vec<String>>, Rc<Vec<Stmt>>)> {
        self.expect(
            Token::OpenParen,
            &format!("Expect '(' after {} name.", kind),
        )?;

        let mut params = Vec::new();
        if !self.check(Token::CloseParen) {
            loop {
                if params.len() >= 255 {
                    self.report("Can't have more than 255 parameters.");
                }
                params.push(self.expect_identifier("Expect parameter name.")?);

                if !self.eat(Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::CloseParen, "Expect ')' after parameters.")?;

        let saved_loop_depth = mem::replace(&mut self.loop_depth, 0);
        let body = self.parse_block(&format!("Expect '{{' before {} body.", kind));
        self.loop_depth = saved_loop_depth;

        Ok((Rc::new(params), Rc::new(body?)))
    }
}
