use crate::ast::{NodeId, Span, Stmt};
use crate::lexer::Token;
use logos::{Lexer, Logos};
use silt_source::Source;
use std::mem;

mod expr;
mod stmt;

/// Signal raised by parse routines when recovery should unwind to the next
/// declaration boundary. The diagnostic itself has already been reported by
/// the time this is raised.
pub struct ParseError;

pub type ParseResult<T> = Result<T, ParseError>;

pub struct Parser<'a> {
    /// Cached token for peeking.
    current_token: Token,
    /// Span of `current_token`.
    current_span: Span,
    /// One-token lookahead, filled lazily by [`Self::peek_next`].
    lookahead: Option<(Token, Span)>,
    lexer: Lexer<'a, Token>,
    /// Source code
    source: &'a Source<'a>,
    /// Number of enclosing loops at the current parse position. Zeroed while
    /// parsing a function body so that `break` cannot target a loop outside
    /// the function.
    loop_depth: usize,
    next_node_id: NodeId,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        Self::new_with_node_start(source, 0)
    }

    /// Like [`Self::new`] but node ids start at `first_node_id`. A REPL
    /// parses each input with a fresh parser; resuming the id counter keeps
    /// resolution entries for earlier inputs (still alive inside closures)
    /// from being clobbered.
    pub fn new_with_node_start(source: &'a Source<'a>, first_node_id: NodeId) -> Self {
        let mut lexer = Token::lexer(source.content);
        let current_token = lexer.next().unwrap_or(Token::Eof);
        let current_span = lexer.span();
        Self {
            current_token,
            current_span,
            lookahead: None,
            lexer,
            source,
            loop_depth: 0,
            next_node_id: first_node_id,
        }
    }

    /// The id the next parsed variable node would receive.
    pub fn next_node_id(&self) -> NodeId {
        self.next_node_id
    }

    pub fn parse_program(&mut self) -> Vec<Stmt> {
        let mut program = Vec::new();
        while !self.check(Token::Eof) {
            program.push(self.parse_declaration());
        }
        program
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    fn next(&mut self) -> Token {
        let (token, span) = match self.lookahead.take() {
            Some(ahead) => ahead,
            None => {
                let token = self.lexer.next().unwrap_or(Token::Eof);
                (token, self.lexer.span())
            }
        };
        self.current_span = span;
        mem::replace(&mut self.current_token, token)
    }

    /// The token after `current_token`, without consuming anything.
    fn peek_next(&mut self) -> &Token {
        if self.lookahead.is_none() {
            let token = self.lexer.next().unwrap_or(Token::Eof);
            self.lookahead = Some((token, self.lexer.span()));
        }
        &self.lookahead.as_ref().unwrap().0
    }

    fn span(&self) -> Span {
        self.current_span.clone()
    }

    /// Predicate that tests whether the current token has the same
    /// discriminant as `tok`.
    fn check(&self, tok: Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(&tok)
    }

    /// Like [`Self::check`], but eats the current token on a match.
    fn eat(&mut self, tok: Token) -> bool {
        if self.check(tok) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Eats the expected token or reports `message` at the current token and
    /// raises the recovery signal.
    fn expect(&mut self, tok: Token, message: &str) -> ParseResult<()> {
        if self.eat(tok) {
            Ok(())
        } else {
            Err(self.fatal(message))
        }
    }

    /// Eats an identifier and returns its text, or reports `message`.
    fn expect_identifier(&mut self, message: &str) -> ParseResult<String> {
        match self.current_token.clone() {
            Token::Identifier(ident) => {
                self.next();
                Ok(ident)
            }
            _ => Err(self.fatal(message)),
        }
    }

    /// Reports a diagnostic at the current token without interrupting the
    /// parse.
    fn report(&mut self, message: &str) {
        self.source.error(message, self.span());
    }

    /// Reports a diagnostic at the current token and returns the recovery
    /// signal for the caller to raise.
    fn fatal(&mut self, message: &str) -> ParseError {
        self.report(message);
        ParseError
    }

    fn new_node_id(&mut self) -> NodeId {
        let id = self.next_node_id;
        self.next_node_id += 1;
        id
    }

    /// Discards tokens until just past a `;` or just before a keyword that
    /// starts a statement. Both conditions are checked on every iteration,
    /// and at least one token is consumed, which guarantees forward progress
    /// after any parse error.
    fn synchronize(&mut self) {
        loop {
            if self.check(Token::Eof) {
                return;
            }
            let skipped = self.next();
            if skipped == Token::Semi {
                return;
            }
            match self.current_token {
                Token::Class
                | Token::Fun
                | Token::Var
                | Token::For
                | Token::If
                | Token::While
                | Token::Print
                | Token::Return => return,
                _ => {}
            }
        }
    }
}
