use logos::Logos;

#[derive(Debug, Logos, Clone, PartialEq)]
pub enum Token {
    // literals
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse())]
    NumberLit(f64),
    #[regex(r"true|false", |lex| lex.slice() == "true")]
    BoolLit(bool),
    #[regex(r#""[^"]*""#, |lex| lex.slice()[1..lex.slice().len() - 1].to_string())]
    StringLit(String),

    // identifiers
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    // unary operators
    #[token("!")]
    LogicalNot,

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    // - assignment
    #[token("=")]
    Equals,
    // - equality
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    NotEquals,
    // - ordering
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEquals,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanEquals,
    // - logical
    #[token("and")]
    And,
    #[token("or")]
    Or,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,

    // keywords
    #[token("fun")]
    Fun,
    #[token("var")]
    Var,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("break")]
    Break,
    #[token("return")]
    Return,
    #[token("print")]
    Print,
    #[token("nil")]
    Nil,
    /// Reserved word. Never parsed into anything, but recognized so that
    /// error recovery can treat it as a statement boundary.
    #[token("class")]
    Class,

    // misc
    #[regex(r"[ \t\n\r\f]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)] // single line comments
    #[error]
    Error,

    /// Only generated in parse phase when `lexer.next()` returns `None`.
    Eof,
}

impl Token {
    /// Returns the infix binding power or `None` if the token cannot appear
    /// in operator position. Binding power `0` and `1` is reserved for
    /// accepting any expression. Assignment (`Token::Equals`) has the lowest
    /// precedence with `(3, 2)`; a right binding power below the left one
    /// makes the operator right-associative.
    pub fn binop_bp(&self) -> Option<(u8, u8)> {
        match self {
            /* Assignment */
            Token::Equals => Some((3, 2)),
            /* Ternary */
            Token::Question => Some((5, 4)),
            /* Logical */
            Token::Or => Some((6, 7)),
            Token::And => Some((8, 9)),
            /* Equality */
            Token::EqualsEquals | Token::NotEquals => Some((10, 11)),
            Token::GreaterThan
            | Token::GreaterThanEquals
            | Token::LessThan
            | Token::LessThanEquals => Some((12, 13)),
            /* Additive */
            Token::Plus | Token::Minus => Some((14, 15)),
            /* Multiplicative */
            Token::Asterisk | Token::Slash => Some((16, 17)),
            /* Call */
            Token::OpenParen => Some((20, 21)),
            _ => None,
        }
    }
}

/// Binding power used for the operand of a prefix `-` or `!`. Binds tighter
/// than any binary operator but still lets a call expression attach first.
pub const UNARY_BP: u8 = 18;
