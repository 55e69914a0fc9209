use std::iter::Fuse;

use backparse_grammar::{Grammar, Symbol};

use super::{
    error::{ParseError, ParseResult},
    traits::GrammarSymbol,
};

/// Lazily read parser input.
///
/// Symbols are pulled from the iterator only when the parser looks at them,
/// never more than one beyond the symbols already read. Read symbols are kept
/// so that backtracking can move the cursor back.
pub(super) struct Input<'g, I, V, T> {
    grammar: &'g Grammar<V, T>,
    iter: Fuse<I>,
    /// Terminals read so far. The terminal at cursor `i` is `read[i - 1]`.
    read: Vec<T>,
}

impl<'g, I, V, T> Input<'g, I, V, T>
where
    I: Iterator<Item = Symbol<V, T>>,
    V: GrammarSymbol,
    T: GrammarSymbol,
{
    pub(super) fn new(grammar: &'g Grammar<V, T>, iter: I) -> Self {
        Self {
            grammar,
            iter: iter.fuse(),
            read: Vec::new(),
        }
    }

    /// Returns the terminal at the 1-based `cursor`, or `None` when the input
    /// ends before it.
    ///
    /// # Fails
    ///
    /// When a newly read symbol is a nonterminal or is not in the terminal
    /// alphabet of the grammar.
    pub(super) fn get(&mut self, cursor: usize) -> ParseResult<Option<&T>> {
        while self.read.len() < cursor {
            let Some(symbol) = self.iter.next() else {
                return Ok(None);
            };
            let position = self.read.len() + 1;

            let terminal = match symbol {
                Symbol::Terminal(t) => t,
                Symbol::Nonterminal(v) => {
                    return Err(ParseError::NotATerminal {
                        position,
                        symbol: v.to_string(),
                    });
                }
            };

            if !self.grammar.is_terminal(&terminal) {
                return Err(ParseError::UnknownTerminal {
                    position,
                    terminal: terminal.to_string(),
                });
            }

            tracing::trace!(position, %terminal, "read input symbol");
            self.read.push(terminal);
        }

        Ok(cursor.checked_sub(1).and_then(|i| self.read.get(i)))
    }
}
