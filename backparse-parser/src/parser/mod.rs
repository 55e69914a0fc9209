use std::io;

use backparse_grammar::{Grammar, Symbol};

use self::{bottomup::BottomUp, error::ParseResult, topdown::TopDown, traits::GrammarSymbol};

pub(crate) mod bottomup;
mod config;
pub(crate) mod error;
mod input;
pub(crate) mod topdown;
mod trace;
pub(crate) mod traits;
pub(crate) mod validate;

#[cfg(test)]
mod tests;

/// Validates `grammar` for top-down parsing and parses `input` with it.
///
/// Returns the left parse of the first derivation found. When `trace_sink` is
/// given every configuration is written to it, one per line.
///
/// Input symbols are checked only when the parser reads them. The top-down
/// parser reads a symbol only to match it against a terminal of the frontier,
/// so an input can fail with [`NoDerivation`] here while
/// [`bottomup_backtrack_parse`], which shifts every symbol it reaches, reports
/// the bad symbol instead. For `S -> ab` and the input `bc` this parser never
/// reads `c`.
///
/// [`NoDerivation`]: crate::ParseError::NoDerivation
pub fn topdown_backtrack_parse<V, T, I>(
    grammar: &Grammar<V, T>,
    input: I,
    trace_sink: Option<&mut dyn io::Write>,
) -> ParseResult<Vec<usize>>
where
    V: GrammarSymbol,
    T: GrammarSymbol,
    I: IntoIterator<Item = Symbol<V, T>>,
{
    let parser = TopDown::new(grammar)?;

    match trace_sink {
        Some(sink) => parser.parse_traced(input, sink),
        None => parser.parse(input),
    }
}

/// Validates `grammar` for bottom-up parsing and parses `input` with it.
///
/// Returns the productions of the first rightmost derivation found, in the
/// order they are applied. When `trace_sink` is given every configuration is
/// written to it, one per line.
///
/// Input symbols are checked only when the parser reads them. The bottom-up
/// parser shifts every symbol before it can reduce, so it may report a
/// [`NotATerminal`] or [`UnknownTerminal`] error for an input on which
/// [`topdown_backtrack_parse`] fails earlier with [`NoDerivation`].
///
/// [`NotATerminal`]: crate::ParseError::NotATerminal
/// [`UnknownTerminal`]: crate::ParseError::UnknownTerminal
/// [`NoDerivation`]: crate::ParseError::NoDerivation
pub fn bottomup_backtrack_parse<V, T, I>(
    grammar: &Grammar<V, T>,
    input: I,
    trace_sink: Option<&mut dyn io::Write>,
) -> ParseResult<Vec<usize>>
where
    V: GrammarSymbol,
    T: GrammarSymbol,
    I: IntoIterator<Item = Symbol<V, T>>,
{
    let parser = BottomUp::new(grammar)?;

    match trace_sink {
        Some(sink) => parser.parse_traced(input, sink),
        None => parser.parse(input),
    }
}
