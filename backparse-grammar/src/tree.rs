use std::fmt::Display;

use crate::{Grammar, Symbol};

/// Parse tree built by replaying a list of production indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree<V, T> {
    pub symbol: Symbol<V, T>,
    pub children: Vec<ParseTree<V, T>>,
}

/// Reason a list of production indices does not describe a parse tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("the grammar has no start nonterminal")]
    NoStart,
    #[error("production {0} does not exist")]
    UnknownProduction(usize),
    #[error("production {0} does not rewrite the expected nonterminal")]
    UnexpectedHead(usize),
    #[error("the parse ended before the tree was complete")]
    Incomplete,
    #[error("{0} production(s) left over after the tree was complete")]
    Trailing(usize),
    #[error("the tree is not rooted at the start nonterminal")]
    Root,
}

impl<V, T> ParseTree<V, T> {
    pub fn leaf(symbol: Symbol<V, T>) -> Self {
        Self {
            symbol,
            children: Vec::new(),
        }
    }

    pub fn node(variable: V, children: Vec<ParseTree<V, T>>) -> Self {
        Self {
            symbol: Symbol::Nonterminal(variable),
            children,
        }
    }

    /// Returns the terminals at the leaves, read left to right.
    pub fn leaves(&self) -> Vec<&T> {
        let mut leaves = Vec::new();
        let mut pending = vec![self];

        while let Some(tree) = pending.pop() {
            match &tree.symbol {
                Symbol::Terminal(t) => leaves.push(t),
                Symbol::Nonterminal(_) => pending.extend(tree.children.iter().rev()),
            }
        }

        leaves
    }
}

impl<V, T> ParseTree<V, T>
where
    V: Clone + PartialEq,
    T: Clone,
{
    /// Replays a left parse: the productions of a leftmost derivation, in
    /// the order they are applied.
    pub fn from_left_parse(
        grammar: &Grammar<V, T>,
        parse: &[usize],
    ) -> Result<Self, ReplayError> {
        let start = grammar.start().ok_or(ReplayError::NoStart)?;
        let mut parse = parse.iter().copied();

        let tree = Self::expand_leftmost(grammar, start, &mut parse)?;

        match parse.count() {
            0 => Ok(tree),
            trailing => Err(ReplayError::Trailing(trailing)),
        }
    }

    fn expand_leftmost<I>(
        grammar: &Grammar<V, T>,
        head: &V,
        parse: &mut I,
    ) -> Result<Self, ReplayError>
    where
        I: Iterator<Item = usize>,
    {
        let index = parse.next().ok_or(ReplayError::Incomplete)?;
        let production = grammar
            .production(index)
            .ok_or(ReplayError::UnknownProduction(index))?;

        if production.head() != head {
            return Err(ReplayError::UnexpectedHead(index));
        }

        let children = production
            .body()
            .iter()
            .map(|symbol| match symbol {
                Symbol::Terminal(_) => Ok(Self::leaf(symbol.clone())),
                Symbol::Nonterminal(v) => Self::expand_leftmost(grammar, v, parse),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::node(head.clone(), children))
    }

    /// Replays a right parse: the productions of a rightmost derivation in
    /// reverse, which is the order a shift-reduce parser reduces them.
    pub fn from_right_parse(
        grammar: &Grammar<V, T>,
        parse: &[usize],
    ) -> Result<Self, ReplayError> {
        let start = grammar.start().ok_or(ReplayError::NoStart)?;
        // completed subtrees of nonterminals, left to right
        let mut stack: Vec<Self> = Vec::new();

        for &index in parse {
            let production = grammar
                .production(index)
                .ok_or(ReplayError::UnknownProduction(index))?;

            let mut children = Vec::with_capacity(production.body().len());
            for symbol in production.body().iter().rev() {
                match symbol {
                    Symbol::Terminal(_) => children.push(Self::leaf(symbol.clone())),
                    Symbol::Nonterminal(v) => {
                        let child = stack.pop().ok_or(ReplayError::Incomplete)?;
                        if child.symbol.as_nonterminal() != Some(v) {
                            return Err(ReplayError::UnexpectedHead(index));
                        }
                        children.push(child);
                    }
                }
            }
            children.reverse();

            stack.push(Self::node(production.head().clone(), children));
        }

        let root = stack.pop().ok_or(ReplayError::Incomplete)?;
        if !stack.is_empty() {
            return Err(ReplayError::Incomplete);
        }
        if root.symbol.as_nonterminal() != Some(start) {
            return Err(ReplayError::Root);
        }

        Ok(root)
    }
}

impl<V: Display, T: Display> ParseTree<V, T> {
    fn fmt_indented(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        writeln!(f, "{:indent$}{}", "", self.symbol, indent = depth * 2)?;
        for child in self.children.iter() {
            child.fmt_indented(f, depth + 1)?;
        }

        Ok(())
    }
}

impl<V: Display, T: Display> Display for ParseTree<V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::{ParseTree, ReplayError};
    use crate::{Symbol, TextGrammar};

    type Tree = ParseTree<String, char>;

    fn leaf(ch: char) -> Tree {
        ParseTree::leaf(Symbol::Terminal(ch))
    }

    fn node(name: &str, children: Vec<Tree>) -> Tree {
        ParseTree::node(name.to_string(), children)
    }

    fn right_recursive() -> TextGrammar {
        "E -> T+E | T\nT -> F*T | F\nF -> a"
            .parse()
            .expect("grammar should parse")
    }

    fn left_recursive() -> TextGrammar {
        "E -> E+T | T\nT -> T*F | F\nF -> a"
            .parse()
            .expect("grammar should parse")
    }

    #[test]
    fn left_parse() {
        let tree = ParseTree::from_left_parse(&right_recursive(), &[1, 4, 5, 2, 4, 5])
            .expect("valid left parse");

        assert_eq!(
            tree,
            node(
                "E",
                vec![
                    node("T", vec![node("F", vec![leaf('a')])]),
                    leaf('+'),
                    node("E", vec![node("T", vec![node("F", vec![leaf('a')])])]),
                ]
            )
        );
        assert_eq!(tree.leaves(), vec![&'a', &'+', &'a']);
    }

    #[test]
    fn right_parse() {
        let tree = ParseTree::from_right_parse(&left_recursive(), &[5, 4, 5, 3, 2])
            .expect("valid right parse");

        assert_eq!(
            tree,
            node(
                "E",
                vec![node(
                    "T",
                    vec![
                        node("T", vec![node("F", vec![leaf('a')])]),
                        leaf('*'),
                        node("F", vec![leaf('a')]),
                    ]
                )]
            )
        );
        assert_eq!(tree.leaves(), vec![&'a', &'*', &'a']);
    }

    #[test]
    fn left_parse_errors() {
        let grammar = right_recursive();

        assert_eq!(
            ParseTree::from_left_parse(&grammar, &[1, 4, 5]),
            Err(ReplayError::Incomplete)
        );
        assert_eq!(
            ParseTree::from_left_parse(&grammar, &[2, 4, 5, 5]),
            Err(ReplayError::Trailing(1))
        );
        assert_eq!(
            ParseTree::from_left_parse(&grammar, &[3]),
            Err(ReplayError::UnexpectedHead(3))
        );
        assert_eq!(
            ParseTree::from_left_parse(&grammar, &[9]),
            Err(ReplayError::UnknownProduction(9))
        );
    }

    #[test]
    fn right_parse_errors() {
        let grammar = left_recursive();

        assert_eq!(
            ParseTree::from_right_parse(&grammar, &[5, 4]),
            Err(ReplayError::Root)
        );
        assert_eq!(
            ParseTree::from_right_parse(&grammar, &[5, 4, 5]),
            Err(ReplayError::Incomplete)
        );
        assert_eq!(
            ParseTree::from_right_parse(&grammar, &[3]),
            Err(ReplayError::Incomplete)
        );
        assert_eq!(
            ParseTree::from_right_parse(&grammar, &[5, 2]),
            Err(ReplayError::UnexpectedHead(2))
        );
    }

    #[test]
    fn epsilon_nodes_have_no_leaves() {
        let grammar: TextGrammar = "S -> aAb\nA ->".parse().expect("grammar should parse");
        let tree = ParseTree::from_left_parse(&grammar, &[1, 2]).expect("valid left parse");

        assert_eq!(tree.children[1], node("A", vec![]));
        assert_eq!(tree.leaves(), vec![&'a', &'b']);
    }

    #[test]
    fn display() {
        let tree = node("T", vec![node("F", vec![leaf('a')]), leaf('*')]);

        assert_eq!(tree.to_string(), "T\n  F\n    a\n  *\n");
    }
}
