//! Backtracking parsers for arbitrary context-free grammars.
//!
//! Grammars are built with [`Grammar::builder`] or parsed from text into a
//! [`TextGrammar`]. [`topdown_backtrack_parse`] returns the left parse of an
//! input and [`bottomup_backtrack_parse`] the productions of a rightmost
//! derivation. Either can be replayed into a [`ParseTree`].

pub use backparse_grammar::{
    terminals, Body, Grammar, GrammarBuilder, ParseTree, Production, ReplayError, Symbol,
    SyntaxError, SyntaxErrorKind, SyntaxResult, TextGrammar,
};
pub use backparse_parser::{
    bottomup_backtrack_parse, topdown_backtrack_parse, BottomUp, ErrorKind, GrammarSymbol,
    ParseError, ParseResult, TopDown, ValidationError,
};
