pub use grammar::{Grammar, GrammarBuilder, Production};
pub use syntax::{SyntaxError, SyntaxErrorKind, SyntaxResult};
pub use tree::{ParseTree, ReplayError};

mod grammar;
mod syntax;
mod tree;

use std::fmt::Display;

/// Represents a single terminal or nonterminal in the body of a
/// [`Production`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Symbol<V, T> {
    Terminal(T),
    Nonterminal(V),
}

/// List of [`Symbol`]s a nonterminal maps to. An empty body is an epsilon
/// production.
pub type Body<V, T> = Vec<Symbol<V, T>>;

/// Grammar whose nonterminals are named by strings and whose terminals are
/// single characters. This is what the text syntax produces.
pub type TextGrammar = Grammar<String, char>;

impl<V, T> Symbol<V, T> {
    pub fn as_terminal(&self) -> Option<&T> {
        match self {
            Symbol::Terminal(t) => Some(t),
            Symbol::Nonterminal(_) => None,
        }
    }

    pub fn as_nonterminal(&self) -> Option<&V> {
        match self {
            Symbol::Nonterminal(v) => Some(v),
            Symbol::Terminal(_) => None,
        }
    }
}

impl<V: Display, T: Display> Display for Symbol<V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(t) => write!(f, "{}", t),
            Symbol::Nonterminal(v) => write!(f, "{}", v),
        }
    }
}

/// Wraps every character of `input` in [`Symbol::Terminal`].
pub fn terminals<'a, V: 'a>(input: &'a str) -> impl Iterator<Item = Symbol<V, char>> + 'a {
    input.chars().map(Symbol::Terminal)
}
