//! Static checks run once per grammar before a parser is constructed.

use std::{collections::HashMap, hash::Hash};

use backparse_grammar::{Grammar, Production, Symbol};

use super::traits::GrammarSymbol;

/// Reason a grammar cannot be parsed with a backtracking parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("grammar has no productions")]
    Empty,
    #[error("start nonterminal `{0}` has no productions")]
    MissingStart(String),
    /// Rejected by the bottom-up parser only.
    #[error("production {0} has an empty right-hand side")]
    Epsilon(usize),
    /// Rejected by the bottom-up parser only.
    #[error("unit productions form a cycle: {}", .0.join(" -> "))]
    UnitCycle(Vec<String>),
    /// Rejected by the top-down parser only.
    #[error("grammar is left-recursive: {}", .0.join(" -> "))]
    LeftRecursion(Vec<String>),
}

/// Checks shared by both parsers. Returns the start nonterminal.
///
/// Nonterminals used in a body but without productions of their own are
/// allowed: they derive nothing, so the parsers simply never complete them.
fn check_common<V, T>(grammar: &Grammar<V, T>) -> Result<&V, ValidationError>
where
    V: GrammarSymbol,
{
    let start = match grammar.start() {
        Some(start) if !grammar.is_empty() => start,
        _ => return Err(ValidationError::Empty),
    };

    if !grammar.is_defined(start) {
        return Err(ValidationError::MissingStart(start.to_string()));
    }

    Ok(start)
}

/// Checks a grammar for the top-down parser: leftmost expansion of a
/// left-recursive nonterminal never consumes input, so left recursion is
/// rejected.
pub(super) fn check_topdown<V, T>(grammar: &Grammar<V, T>) -> Result<&V, ValidationError>
where
    V: GrammarSymbol,
{
    let start = check_common(grammar)?;
    let nullable = grammar.nullable();

    // edge `A -> B` when `B` can be the leftmost symbol of a sentential form of `A`
    let mut left_corners: HashMap<&V, Vec<&V>> = HashMap::new();
    for production in grammar.productions() {
        for symbol in production.body() {
            let Symbol::Nonterminal(v) = symbol else {
                break;
            };

            left_corners.entry(production.head()).or_default().push(v);

            if !nullable.contains(v) {
                break;
            }
        }
    }

    match find_cycle(grammar.iter_nonterminals(), &left_corners) {
        Some(cycle) => Err(ValidationError::LeftRecursion(render(cycle))),
        None => Ok(start),
    }
}

/// Checks a grammar for the bottom-up parser: epsilon productions and cycles of
/// unit productions both allow unbounded reductions without consuming input.
pub(super) fn check_bottomup<V, T>(grammar: &Grammar<V, T>) -> Result<&V, ValidationError>
where
    V: GrammarSymbol,
{
    let start = check_common(grammar)?;

    if let Some(production) = grammar.productions().iter().find(|p| p.is_epsilon()) {
        return Err(ValidationError::Epsilon(production.index()));
    }

    let mut units: HashMap<&V, Vec<&V>> = HashMap::new();
    for production in grammar.productions() {
        if let Some(target) = production.unit_target() {
            units.entry(production.head()).or_default().push(target);
        }
    }

    match find_cycle(grammar.iter_nonterminals(), &units) {
        Some(cycle) => Err(ValidationError::UnitCycle(render(cycle))),
        None => Ok(start),
    }
}

fn render<V: GrammarSymbol>(cycle: Vec<&V>) -> Vec<String> {
    cycle.into_iter().map(ToString::to_string).collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    /// On the current search path.
    Active,
    /// Fully explored, not part of a cycle.
    Done,
}

/// Depth-first search for a cycle, starting from `nodes` in the given order.
/// The returned cycle starts and ends with the same node.
fn find_cycle<'a, V>(
    nodes: impl IntoIterator<Item = &'a V>,
    edges: &HashMap<&'a V, Vec<&'a V>>,
) -> Option<Vec<&'a V>>
where
    V: Eq + Hash,
{
    let mut marks: HashMap<&V, Mark> = HashMap::new();

    for root in nodes {
        if marks.contains_key(root) {
            continue;
        }

        marks.insert(root, Mark::Active);
        // nodes on the current path along with the next edge to follow
        let mut path = vec![(root, 0)];

        while let Some(&(node, next)) = path.last() {
            let successors = edges.get(node).map(Vec::as_slice).unwrap_or_default();

            let Some(&successor) = successors.get(next) else {
                marks.insert(node, Mark::Done);
                path.pop();
                continue;
            };

            if let Some(last) = path.last_mut() {
                last.1 += 1;
            }

            match marks.get(successor) {
                Some(Mark::Active) => {
                    let begin = path
                        .iter()
                        .position(|&(n, _)| n == successor)
                        .unwrap_or_default();
                    let mut cycle = path[begin..].iter().map(|&(n, _)| n).collect::<Vec<_>>();
                    cycle.push(successor);
                    return Some(cycle);
                }
                Some(Mark::Done) => {}
                None => {
                    marks.insert(successor, Mark::Active);
                    path.push((successor, 0));
                }
            }
        }
    }

    None
}

/// Productions grouped by the last symbol of their body, each group in
/// ascending index order. The bottom-up parser uses it to find reductions
/// without scanning the whole grammar.
#[derive(Debug)]
pub(super) struct ReductionIndex<'g, V, T> {
    by_last: HashMap<&'g Symbol<V, T>, Vec<&'g Production<V, T>>>,
}

impl<'g, V, T> ReductionIndex<'g, V, T>
where
    V: GrammarSymbol,
    T: GrammarSymbol,
{
    pub(super) fn new(grammar: &'g Grammar<V, T>) -> Self {
        let mut by_last: HashMap<_, Vec<_>> = HashMap::new();

        for production in grammar.productions() {
            if let Some(last) = production.body().last() {
                by_last.entry(last).or_default().push(production);
            }
        }

        Self { by_last }
    }

    /// Returns the lowest-indexed production with an index greater than
    /// `after` whose body is a suffix of `stack`.
    pub(super) fn next_reduction(
        &self,
        stack: &[Symbol<V, T>],
        after: usize,
    ) -> Option<&'g Production<V, T>> {
        self.by_last
            .get(stack.last()?)?
            .iter()
            .copied()
            .filter(|p| p.index() > after)
            .find(|p| stack.ends_with(p.body()))
    }
}
