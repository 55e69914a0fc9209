use std::{fmt::Display, hash::Hash};

/// Requirements on the nonterminal and terminal types of a grammar the
/// backtracking parsers work on. `Display` is used when rendering traces and
/// errors.
pub trait GrammarSymbol: Clone + Eq + Hash + Display {}

impl<S> GrammarSymbol for S where S: Clone + Eq + Hash + Display {}
