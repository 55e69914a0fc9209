use std::fmt::Display;

/// Mode of the automaton driving a backtracking parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Normal operation: expanding, matching, shifting or reducing.
    Querying,
    /// Undoing earlier choices until one with an untried alternative is found.
    Backtracking,
    /// The input has been accepted.
    Terminated,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Mode::Querying => "q",
                Mode::Backtracking => "b",
                Mode::Terminated => "t",
            }
        )
    }
}

/// Instantaneous description of a backtracking parse.
///
/// `P` is the kind of backtrack point the parser records and `S` the kind of
/// symbol it keeps on its frontier or stack. Transitions take a configuration
/// by value and return the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Configuration<P, S> {
    pub(crate) mode: Mode,
    /// 1-based position of the next unconsumed input symbol.
    pub(crate) cursor: usize,
    /// Backtrack points, the most recent last.
    pub(crate) history: Vec<P>,
    /// Top-down: the frontier, leftmost symbol last. Bottom-up: the stack, top
    /// last.
    pub(crate) symbols: Vec<S>,
}

impl<P, S> Configuration<P, S> {
    /// Creates the initial configuration: querying at the first input symbol
    /// with no choices made.
    pub(crate) fn new(symbols: Vec<S>) -> Self {
        Self {
            mode: Mode::Querying,
            cursor: 1,
            history: Vec::new(),
            symbols,
        }
    }
}
