use std::{fmt::Display, io};

use backparse_grammar::{Grammar, Production, Symbol};

use super::{
    config::{Configuration, Mode},
    error::{ParseError, ParseResult},
    input::Input,
    trace::Tracer,
    traits::GrammarSymbol,
    validate::{check_bottomup, ReductionIndex, ValidationError},
};

/// Backtrack point of the bottom-up parser.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Point<'g, V, T> {
    Shift,
    Reduce(&'g Production<V, T>),
}

impl<V, T> Display for Point<'_, V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Point::Shift => write!(f, "s"),
            Point::Reduce(production) => write!(f, "{}", production.index()),
        }
    }
}

type Config<'g, V, T> = Configuration<Point<'g, V, T>, Symbol<V, T>>;

impl<V: Display, T: Display> Display for Config<'_, V, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, $", self.mode, self.cursor)?;
        for symbol in self.symbols.iter() {
            write!(f, "{}", symbol)?;
        }

        write!(f, ", ")?;

        if self.history.is_empty() {
            write!(f, "e")?;
        }
        for point in self.history.iter().rev() {
            write!(f, "{}", point)?;
        }

        write!(f, ")")
    }
}

/// Replaces the body of `production` on top of `stack` by its head.
fn reduce<V: Clone, T>(stack: &mut Vec<Symbol<V, T>>, production: &Production<V, T>) {
    let len = stack.len().saturating_sub(production.body().len());
    stack.truncate(len);
    stack.push(Symbol::Nonterminal(production.head().clone()));
}

/// Bottom-up backtracking parser.
///
/// Shifts input terminals onto a stack and reduces production bodies found on
/// top of it, preferring reductions over shifts and lower production indices
/// over higher ones. The result is the reverse of the reduction sequence of the
/// first successful run: the productions of a rightmost derivation in the order
/// they are applied.
#[derive(Debug)]
pub struct BottomUp<'g, V, T> {
    grammar: &'g Grammar<V, T>,
    start: &'g V,
    reductions: ReductionIndex<'g, V, T>,
}

impl<'g, V, T> BottomUp<'g, V, T>
where
    V: GrammarSymbol,
    T: GrammarSymbol,
{
    /// Creates a parser for `grammar`.
    ///
    /// # Fails
    ///
    /// When the grammar is empty, its start nonterminal has no productions, or
    /// it has an epsilon production or a cycle of unit productions.
    pub fn new(grammar: &'g Grammar<V, T>) -> Result<Self, ValidationError> {
        let start = check_bottomup(grammar)?;

        Ok(Self {
            grammar,
            start,
            reductions: ReductionIndex::new(grammar),
        })
    }

    /// Parses `input` and returns the indices of the productions of a
    /// rightmost derivation, in the order they are applied.
    pub fn parse<I>(&self, input: I) -> ParseResult<Vec<usize>>
    where
        I: IntoIterator<Item = Symbol<V, T>>,
    {
        self.run(input, Tracer::disabled())
    }

    /// Same as [`BottomUp::parse`], writing every configuration the parser
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
        tracing::debug!(start = %self.start, "starting bottom-up parse");

        let mut input = Input::new(self.grammar, input.into_iter());
        let mut config = Config::new(Vec::new());
        tracer.emit(&config)?;

        while config.mode != Mode::Terminated {
            config = match config.mode {
                Mode::Backtracking => self.backtrack(config, &mut input)?,
                _ => self.query(config, &mut input)?,
            };
            tracer.emit(&config)?;
        }

        let derivation: Vec<usize> = config
            .history
            .iter()
            .rev()
            .filter_map(|point| match point {
                Point::Reduce(production) => Some(production.index()),
                Point::Shift => None,
            })
            .collect();

        tracing::debug!(?derivation, "bottom-up parse accepted");

        Ok(derivation)
    }

    fn query<I>(
        &self,
        mut config: Config<'g, V, T>,
        input: &mut Input<'g, I, V, T>,
    ) -> ParseResult<Config<'g, V, T>>
    where
        I: Iterator<Item = Symbol<V, T>>,
    {
        let at_start = matches!(
            config.symbols.as_slice(),
            [Symbol::Nonterminal(v)] if v == self.start
        );
        if at_start && input.get(config.cursor)?.is_none() {
            config.mode = Mode::Terminated;
            return Ok(config);
        }

        if let Some(production) = self.reductions.next_reduction(&config.symbols, 0) {
            reduce(&mut config.symbols, production);
            config.history.push(Point::Reduce(production));
            return Ok(config);
        }

        match input.get(config.cursor)? {
            Some(terminal) => {
                config.symbols.push(Symbol::Terminal(terminal.clone()));
                config.cursor += 1;
                config.history.push(Point::Shift);
            }
            None => config.mode = Mode::Backtracking,
        }

        Ok(config)
    }

    fn backtrack<I>(
        &self,
        mut config: Config<'g, V, T>,
        input: &mut Input<'g, I, V, T>,
    ) -> ParseResult<Config<'g, V, T>>
    where
        I: Iterator<Item = Symbol<V, T>>,
    {
        let Some(point) = config.history.pop() else {
            tracing::debug!("bottom-up parse exhausted all alternatives");
            return Err(ParseError::NoDerivation);
        };

        let Point::Reduce(production) = point else {
            config.symbols.pop();
            config.cursor -= 1;
            return Ok(config);
        };

        config.symbols.pop();
        config.symbols.extend(production.body().iter().cloned());

        if let Some(next) = self
            .reductions
            .next_reduction(&config.symbols, production.index())
        {
            reduce(&mut config.symbols, next);
            config.history.push(Point::Reduce(next));
            config.mode = Mode::Querying;
        } else if let Some(terminal) = input.get(config.cursor)? {
            config.symbols.push(Symbol::Terminal(terminal.clone()));
            config.cursor += 1;
            config.history.push(Point::Shift);
            config.mode = Mode::Querying;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use backparse_grammar::{terminals, TextGrammar};

    use super::BottomUp;
    use crate::{ErrorKind, ParseError, ValidationError};

    fn grammar(source: &str) -> TextGrammar {
        source.parse().expect("grammar should parse")
    }

    #[test]
    fn single_terminal() {
        let grammar = grammar("S -> a");
        let parser = BottomUp::new(&grammar).expect("grammar is valid");
        let mut out = Vec::new();

        assert_eq!(
            parser.parse_traced(terminals("a"), &mut out).ok(),
            Some(vec![1])
        );
        assert_eq!(
            String::from_utf8_lossy(&out),
            "(q, 1, $, e)\n|- (q, 2, $a, s)\n|- (q, 2, $S, 1s)\n|- (t, 2, $S, 1s)\n"
        );
    }

    #[test]
    fn empty_input() {
        let grammar = grammar("S -> a");
        let parser = BottomUp::new(&grammar).expect("grammar is valid");
        let mut out = Vec::new();

        assert_eq!(
            parser
                .parse_traced(terminals(""), &mut out)
                .map_err(|e| e.kind()),
            Err(ErrorKind::Parse)
        );
        assert_eq!(String::from_utf8_lossy(&out), "(q, 1, $, e)\n|- (b, 1, $, e)\n");
    }

    #[test]
    fn shift_instead_of_reduce() {
        // reducing `b` by `B -> b` right away leads nowhere
        let grammar = grammar("S -> abc\nB -> b");
        let parser = BottomUp::new(&grammar).expect("grammar is valid");

        assert_eq!(parser.parse(terminals("abc")).ok(), Some(vec![1]));
    }

    #[test]
    fn later_reductions_are_tried() {
        let grammar = grammar("S -> Ab | Bc\nA -> a\nB -> a");
        let parser = BottomUp::new(&grammar).expect("grammar is valid");

        assert_eq!(parser.parse(terminals("ab")).ok(), Some(vec![1, 3]));
        assert_eq!(parser.parse(terminals("ac")).ok(), Some(vec![2, 4]));
    }

    #[test]
    fn accepts_left_recursion() {
        let grammar = grammar("A -> Aa | a");
        let parser = BottomUp::new(&grammar).expect("grammar is valid");

        assert_eq!(parser.parse(terminals("aaa")).ok(), Some(vec![1, 1, 2]));
    }

    #[test]
    fn rejects_epsilon_and_unit_cycles() {
        assert_eq!(
            BottomUp::new(&grammar("A ->")).map(|_| ()),
            Err(ValidationError::Epsilon(1))
        );
        assert!(matches!(
            BottomUp::new(&grammar("A -> B | a\nB -> A")),
            Err(ValidationError::UnitCycle(_))
        ));
    }

    struct BrokenSink;

    impl io::Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failure_aborts_the_parse() {
        let grammar = grammar("E -> E+T | T\nT -> a");
        let parser = BottomUp::new(&grammar).expect("grammar is valid");

        let result = parser.parse_traced(terminals("a+a"), BrokenSink);

        assert!(matches!(result, Err(ParseError::Trace(_))));
        assert_eq!(result.map_err(|e| e.kind()), Err(ErrorKind::Trace));
        assert_eq!(parser.parse(terminals("a+a")).ok(), Some(vec![1, 3, 2, 3]));
    }
}
