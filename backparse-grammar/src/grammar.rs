use crate::{Body, Symbol};

use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
    hash::Hash,
};

/// Represents a [context-free grammar](https://en.wikipedia.org/wiki/Context-free_grammar)
/// whose productions are numbered in declaration order.
#[derive(Debug, Clone)]
pub struct Grammar<V, T> {
    /// Start nonterminal of the [`Grammar`]. Defaults to the head of the first
    /// production.
    start: Option<V>,
    /// All productions in declaration order. The production with index `i`
    /// lives at `productions[i - 1]`.
    productions: Vec<Production<V, T>>,
    /// Mapping of nonterminals to the indices of their productions, in
    /// declaration order.
    rules: Rules<V>,
    /// Nonterminals in order of their first appearance as a head.
    heads: Vec<V>,
    /// Terminal alphabet.
    terminals: HashSet<T>,
}

/// Map of nonterminals to production indices.
type Rules<V> = HashMap<V, Vec<usize>>;

/// A single numbered production `head -> body`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production<V, T> {
    index: usize,
    head: V,
    body: Body<V, T>,
}

impl<V, T> Production<V, T> {
    /// 1-based index of the production in its grammar.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn head(&self) -> &V {
        &self.head
    }

    pub fn body(&self) -> &[Symbol<V, T>] {
        &self.body
    }

    /// Whether the body is empty.
    pub fn is_epsilon(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the nonterminal `B` if this is a unit production `A -> B`.
    pub fn unit_target(&self) -> Option<&V> {
        match self.body.as_slice() {
            [Symbol::Nonterminal(v)] => Some(v),
            _ => None,
        }
    }
}

impl<V: Display, T: Display> Display for Production<V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ->", self.head)?;
        if !self.body.is_empty() {
            write!(f, " ")?;
        }
        for symbol in self.body.iter() {
            write!(f, "{}", symbol)?;
        }

        Ok(())
    }
}

impl<V, T> Grammar<V, T> {
    /// Creates a new `GrammarBuilder`.
    pub fn builder() -> GrammarBuilder<V, T> {
        GrammarBuilder::new()
    }

    /// Returns the start nonterminal, `None` for a grammar without
    /// productions and without an explicit start.
    pub fn start(&self) -> Option<&V> {
        self.start.as_ref()
    }

    /// Returns all productions in declaration order.
    pub fn productions(&self) -> &[Production<V, T>] {
        &self.productions
    }

    /// Returns the production with the 1-based `index`.
    pub fn production(&self, index: usize) -> Option<&Production<V, T>> {
        index
            .checked_sub(1)
            .and_then(|index| self.productions.get(index))
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// Iterates the nonterminals that head at least one production, in order
    /// of first declaration.
    pub fn iter_nonterminals(&self) -> impl Iterator<Item = &V> {
        self.heads.iter()
    }
}

impl<V, T> Grammar<V, T>
where
    V: Eq + Hash,
{
    /// Returns the indices of the productions of `head`, in declaration order.
    /// This is the order in which alternatives are tried.
    pub fn alternatives(&self, head: &V) -> &[usize] {
        self.rules.get(head).map(Vec::as_slice).unwrap_or_default()
    }

    /// Whether `variable` heads at least one production.
    pub fn is_defined(&self, variable: &V) -> bool {
        self.rules.contains_key(variable)
    }

    /// Returns the nonterminals that can derive the empty string.
    pub fn nullable(&self) -> HashSet<&V> {
        let mut nullable = HashSet::new();

        // keep iterating until the set does not change anymore
        loop {
            let len = nullable.len();

            for production in self.productions.iter() {
                if nullable.contains(&production.head) {
                    continue;
                }

                let derives_empty = production.body.iter().all(|symbol| match symbol {
                    Symbol::Nonterminal(v) => nullable.contains(v),
                    Symbol::Terminal(_) => false,
                });

                if derives_empty {
                    nullable.insert(&production.head);
                }
            }

            if len == nullable.len() {
                return nullable;
            }
        }
    }
}

impl<V, T> Grammar<V, T>
where
    T: Eq + Hash,
{
    /// Whether `terminal` occurs in the body of some production.
    pub fn is_terminal(&self, terminal: &T) -> bool {
        self.terminals.contains(terminal)
    }
}

impl<V: Display, T: Display> Display for Grammar<V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for production in self.productions.iter() {
            writeln!(f, "{}", production)?;
        }

        Ok(())
    }
}

/// Builder struct for the [`Grammar`].
pub struct GrammarBuilder<V, T> {
    /// Start nonterminal of the [`Grammar`].
    start: Option<V>,
    /// Heads and bodies in declaration order.
    productions: Vec<(V, Body<V, T>)>,
}

impl<V, T> GrammarBuilder<V, T> {
    /// Creates a new [`GrammarBuilder`] with no start nonterminal and no
    /// productions.
    fn new() -> Self {
        Self {
            start: None,
            productions: Vec::new(),
        }
    }

    /// Sets the start nonterminal of the [`Grammar`].
    pub fn with_start(mut self, variable: V) -> Self {
        self.set_start(variable);
        self
    }

    /// Adds a production to the [`Grammar`].
    pub fn with_rule(mut self, variable: V, body: impl Into<Body<V, T>>) -> Self {
        self.add_rule(variable, body);
        self
    }

    /// Sets the start nonterminal of the [`Grammar`].
    pub fn set_start(&mut self, variable: V) {
        self.start = Some(variable);
    }

    /// Adds a production to the [`Grammar`] and returns its index.
    pub fn add_rule(&mut self, variable: V, body: impl Into<Body<V, T>>) -> usize {
        self.productions.push((variable, body.into()));
        self.productions.len()
    }
}

impl<V, T> GrammarBuilder<V, T>
where
    V: Clone,
{
    /// Adds one production per body, all with the same head.
    pub fn with_rules<B>(mut self, variable: V, bodies: impl IntoIterator<Item = B>) -> Self
    where
        B: Into<Body<V, T>>,
    {
        self.add_rules(variable, bodies);
        self
    }

    /// Adds one production per body, all with the same head.
    pub fn add_rules<B>(&mut self, variable: V, bodies: impl IntoIterator<Item = B>)
    where
        B: Into<Body<V, T>>,
    {
        bodies.into_iter().for_each(|b| {
            let _ = self.add_rule(variable.clone(), b);
        });
    }
}

impl<V, T> GrammarBuilder<V, T>
where
    V: Clone + Eq + Hash,
    T: Clone + Eq + Hash,
{
    /// Builds the [`Grammar`], numbering the productions in the order they
    /// were added.
    ///
    /// Well-formedness (a start with productions, no undefined nonterminals)
    /// is not checked here. Parsers check it before they start.
    pub fn build(self) -> Grammar<V, T> {
        let mut rules = Rules::new();
        let mut heads = Vec::new();
        let mut terminals = HashSet::new();

        let productions = self
            .productions
            .into_iter()
            .enumerate()
            .map(|(i, (head, body))| {
                let index = i + 1;

                terminals.extend(body.iter().filter_map(|s| s.as_terminal().cloned()));

                rules
                    .entry(head.clone())
                    .or_insert_with(|| {
                        heads.push(head.clone());
                        Vec::new()
                    })
                    .push(index);

                Production { index, head, body }
            })
            .collect::<Vec<_>>();

        let start = self
            .start
            .or_else(|| productions.first().map(|p| p.head.clone()));

        Grammar {
            start,
            productions,
            rules,
            heads,
            terminals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Grammar;
    use crate::Symbol;

    #[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
    enum Variable {
        Function,
        Body,
        Prototype,
    }

    #[derive(Debug, Clone, Hash, PartialEq, Eq)]
    enum Terminal {
        Bracket,
        Identifier(String),
        Semi,
    }

    impl<T> From<Variable> for Symbol<Variable, T> {
        fn from(v: Variable) -> Self {
            Symbol::Nonterminal(v)
        }
    }

    impl<V> From<Terminal> for Symbol<V, Terminal> {
        fn from(t: Terminal) -> Self {
            Symbol::Terminal(t)
        }
    }

    mod grammar_construction {
        use super::{Grammar, Terminal, Variable};

        #[test]
        fn numbering_follows_declaration_order() {
            use {Terminal::*, Variable::*};

            let grammar = Grammar::builder()
                .with_rule(Function, [Prototype.into(), Bracket.into(), Body.into()])
                .with_rule(Prototype, [Bracket.into()])
                .with_rules(
                    Body,
                    [
                        vec![Identifier(String::new()).into(), Semi.into()],
                        vec![Bracket.into(), Bracket.into()],
                    ],
                )
                .with_rule(Prototype, [])
                .build();

            assert_eq!(grammar.start(), Some(&Function));
            assert_eq!(grammar.alternatives(&Function), &[1]);
            assert_eq!(grammar.alternatives(&Prototype), &[2, 5]);
            assert_eq!(grammar.alternatives(&Body), &[3, 4]);
            assert_eq!(
                grammar.iter_nonterminals().copied().collect::<Vec<_>>(),
                vec![Function, Prototype, Body]
            );

            let production = grammar.production(5).expect("production 5 exists");
            assert_eq!(production.head(), &Prototype);
            assert!(production.is_epsilon());
            assert!(grammar.production(0).is_none());
            assert!(grammar.production(6).is_none());
        }

        #[test]
        fn duplicate_bodies_are_kept() {
            let grammar = Grammar::<Variable, Terminal>::builder()
                .with_rules(
                    Variable::Body,
                    [vec![Terminal::Semi.into()], vec![Terminal::Semi.into()]],
                )
                .build();

            assert_eq!(grammar.alternatives(&Variable::Body), &[1, 2]);
        }

        #[test]
        fn explicit_start() {
            let grammar = Grammar::<Variable, Terminal>::builder()
                .with_start(Variable::Body)
                .with_rule(Variable::Function, [Variable::Body.into()])
                .with_rule(Variable::Body, [Terminal::Semi.into()])
                .build();

            assert_eq!(grammar.start(), Some(&Variable::Body));
        }

        #[test]
        fn empty_grammar() {
            let grammar = Grammar::<Variable, Terminal>::builder().build();

            assert!(grammar.is_empty());
            assert_eq!(grammar.start(), None);
            assert!(grammar.alternatives(&Variable::Function).is_empty());
        }

        #[test]
        fn terminal_alphabet() {
            let grammar = Grammar::<Variable, Terminal>::builder()
                .with_rule(
                    Variable::Body,
                    [Terminal::Identifier("x".into()).into(), Terminal::Semi.into()],
                )
                .build();

            assert!(grammar.is_terminal(&Terminal::Semi));
            assert!(grammar.is_terminal(&Terminal::Identifier("x".into())));
            assert!(!grammar.is_terminal(&Terminal::Bracket));
        }
    }

    mod nullable {
        use std::collections::HashSet;

        use super::{Grammar, Terminal, Variable};

        #[test]
        fn nullable() {
            use {Terminal::*, Variable::*};

            let grammar = Grammar::builder()
                .with_rule(Function, [Prototype.into(), Body.into()])
                .with_rules(Prototype, [vec![Bracket.into()], vec![]])
                .with_rules(Body, [vec![Semi.into()], vec![Prototype.into()]])
                .build();

            assert_eq!(
                grammar.nullable(),
                HashSet::from([&Function, &Prototype, &Body])
            );
        }

        #[test]
        fn nullable_recursive() {
            use Variable::*;

            let grammar = Grammar::<_, Terminal>::builder()
                .with_rule(Body, [Function.into()])
                .with_rule(Function, [Prototype.into()])
                .with_rule(Prototype, [Body.into()])
                .build();

            assert!(grammar.nullable().is_empty());
        }
    }

    #[test]
    fn display() {
        let grammar: Grammar<char, char> = Grammar::builder()
            .with_rules(
                'E',
                [
                    vec![
                        Symbol::Nonterminal('T'),
                        Symbol::Terminal('+'),
                        Symbol::Nonterminal('E'),
                    ],
                    vec![],
                ],
            )
            .build();

        assert_eq!(grammar.to_string(), "E -> T+E\nE ->\n");
    }
}
