//! Text syntax for grammars.
//!
//! One rule per line, `HEAD -> body | body ...`. Uppercase ASCII letters and
//! names between angle brackets (`<expr>`) are nonterminals. Every other
//! character is a terminal; whitespace is ignored, `#` starts a comment and a
//! backslash escapes the next character (`\s` is a space). An empty body is
//! an epsilon production. The head of the first rule is the start
//! nonterminal.

use std::str::FromStr;

use crate::TextGrammar;

mod parser;
mod tokenizer;

/// Whether the parsing of the grammar text succeeded.
pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Information about the error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[ERROR] ({}, {}): {kind}", .pos.0, .pos.1)]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    /// Start and end position (in characters) of the offending token.
    pub pos: (usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxErrorKind {
    #[error("expected NONTERMINAL at the start of a rule")]
    Nonterminal,
    #[error("expected ARROW after the rule head")]
    Arrow,
    #[error("expected NONTERMINAL, TERMINAL, VERTICAL or NEWLINE")]
    Symbol,
    #[error("invalid token")]
    Invalid,
}

impl SyntaxError {
    pub(crate) fn new(kind: SyntaxErrorKind, pos: (usize, usize)) -> Self {
        Self { kind, pos }
    }
}

impl FromStr for TextGrammar {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::Parser::new(s).parse()
    }
}
