use std::{fmt::Display, io};

use backparse_grammar::{Grammar, Production, Symbol};

use super::{
    config::{Configuration, Mode},
    error::{ParseError, ParseResult},
    input::Input,
    trace::Tracer,
    traits::GrammarSymbol,
    validate::{check_topdown, ValidationError},
};

/// Backtrack point of the top-down parser.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Point<'g, V, T> {
    /// A nonterminal was rewritten by one of its alternatives. `alternative`
    /// is the 0-based position of `production` among the alternatives of its
    /// head.
    Expand {
        production: &'g Production<V, T>,
        alternative: usize,
    },
    /// A terminal on the frontier matched the input.
    Match(T),
}

impl<V: Display, T: Display> Display for Point<'_, V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Point::Expand {
                production,
                alternative,
            } => write!(f, "{}{}", production.head(), alternative + 1),
            Point::Match(t) => write!(f, "{}", t),
        }
    }
}

type Config<'g, V, T> = Configuration<Point<'g, V, T>, Symbol<V, T>>;

impl<V: Display, T: Display> Display for Config<'_, V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, ", self.mode, self.cursor)?;

        if self.history.is_empty() {
            write!(f, "e")?;
        }
        for (i, point) in self.history.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", point)?;
        }

        write!(f, ", ")?;

        match self.mode {
            Mode::Terminated => write!(f, "e")?,
            Mode::Querying | Mode::Backtracking => {
                for symbol in self.symbols.iter().rev() {
                    write!(f, "{}", symbol)?;
                }
                write!(f, "$")?;
            }
        }

        write!(f, ")")
    }
}

/// Top-down backtracking parser.
///
/// Repeatedly rewrites the leftmost nonterminal of the frontier by its
/// alternatives in declaration order, matching terminals against the input
/// as they reach the front. The result is the left parse of the first
/// complete derivation found.
#[derive(Debug, Clone)]
pub struct TopDown<'g, V, T> {
    grammar: &'g Grammar<V, T>,
    start: &'g V,
}

impl<'g, V, T> TopDown<'g, V, T>
where
    V: GrammarSymbol,
    T: GrammarSymbol,
{
    /// Creates a parser for `grammar`.
    ///
    /// # Fails
    ///
    /// When the grammar is empty, its start nonterminal has no productions or
    /// it is left-recursive.
    pub fn new(grammar: &'g Grammar<V, T>) -> Result<Self, ValidationError> {
        let start = check_topdown(grammar)?;

        Ok(Self { grammar, start })
    }

    /// Parses `input` and returns the indices of the productions of a leftmost
    /// derivation, in the order they are applied.
    pub fn parse<I>(&self, input: I) -> ParseResult<Vec<usize>>
    where
        I: IntoIterator<Item = Symbol<V, T>>,
    {
        self.run(input, Tracer::disabled())
    }

    /// Same as [`TopDown::parse`], writing every configuration the parser
    /// passes through to `sink`.
    pub fn parse_traced<I, W>(&self, input: I, sink: W) -> ParseResult<Vec<usize>>
    where
        I: IntoIterator<Item = Symbol<V, T>>,
        W: io::Write,
    {
        self.run(input, Tracer::new(sink))
    }

    fn run<I, W>(&self, input: I, mut tracer: Tracer<W>) -> ParseResult<Vec<usize>>
    where
        I: IntoIterator<Item = Symbol<V, T>>,
        W: io::Write,
    {
        tracing::debug!(start = %self.start, "starting top-down parse");

        let mut input = Input::new(self.grammar, input.into_iter());
        let mut config = Config::new(vec![Symbol::Nonterminal(self.start.clone())]);
        tracer.emit(&config)?;

        while config.mode != Mode::Terminated {
            config = match config.mode {
                Mode::Backtracking => self.backtrack(config)?,
                _ => self.query(config, &mut input)?,
            };
            tracer.emit(&config)?;
        }

        let derivation: Vec<usize> = config
            .history
            .iter()
            .filter_map(|point| match point {
                Point::Expand { production, .. } => Some(production.index()),
                Point::Match(_) => None,
            })
            .collect();

        tracing::debug!(?derivation, "top-down parse accepted");

        Ok(derivation)
    }

    /// Returns the production of the 0-based `alternative` of `variable`.
    fn alternative(&self, variable: &V, alternative: usize) -> Option<&'g Production<V, T>> {
        let grammar = self.grammar;

        grammar
            .alternatives(variable)
            .get(alternative)
            .and_then(|&index| grammar.production(index))
    }

    fn query<I>(
        &self,
        mut config: Config<'g, V, T>,
        input: &mut Input<'g, I, V, T>,
    ) -> ParseResult<Config<'g, V, T>>
    where
        I: Iterator<Item = Symbol<V, T>>,
    {
        match config.symbols.pop() {
            None => {
                config.mode = match input.get(config.cursor)? {
                    None => Mode::Terminated,
                    Some(_) => Mode::Backtracking,
                };
            }
            Some(Symbol::Nonterminal(variable)) => match self.alternative(&variable, 0) {
                Some(production) => {
                    config
                        .symbols
                        .extend(production.body().iter().rev().cloned());
                    config.history.push(Point::Expand {
                        production,
                        alternative: 0,
                    });
                }
                None => {
                    config.symbols.push(Symbol::Nonterminal(variable));
                    config.mode = Mode::Backtracking;
                }
            },
            Some(Symbol::Terminal(terminal)) => {
                if input.get(config.cursor)? == Some(&terminal) {
                    config.cursor += 1;
                    config.history.push(Point::Match(terminal));
                } else {
                    config.symbols.push(Symbol::Terminal(terminal));
                    config.mode = Mode::Backtracking;
                }
            }
        }

        Ok(config)
    }

    fn backtrack(&self, mut config: Config<'g, V, T>) -> ParseResult<Config<'g, V, T>> {
        let Some(point) = config.history.pop() else {
            tracing::debug!("top-down parse exhausted all alternatives");
            return Err(ParseError::NoDerivation);
        };

        match point {
            Point::Match(terminal) => {
                config.cursor -= 1;
                config.symbols.push(Symbol::Terminal(terminal));
            }
            Point::Expand {
                production,
                alternative,
            } => {
                let len = config.symbols.len().saturating_sub(production.body().len());
                config.symbols.truncate(len);

                match self.alternative(production.head(), alternative + 1) {
                    Some(next) => {
                        config.symbols.extend(next.body().iter().rev().cloned());
                        config.history.push(Point::Expand {
                            production: next,
                            alternative: alternative + 1,
                        });
                        config.mode = Mode::Querying;
                    }
                    None => config
                        .symbols
                        .push(Symbol::Nonterminal(production.head().clone())),
                }
            }
        }

        Ok(config)
    }
}
