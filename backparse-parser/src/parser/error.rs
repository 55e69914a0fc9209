use super::validate::ValidationError;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// An element of the input is a nonterminal.
    #[error("[ERROR] ({position}): input symbol `{symbol}` is not a terminal")]
    NotATerminal { position: usize, symbol: String },
    /// An input terminal does not occur in any production.
    #[error("[ERROR] ({position}): input symbol `{terminal}` is not in the terminal alphabet")]
    UnknownTerminal { position: usize, terminal: String },
    #[error("invalid grammar: {0}")]
    Grammar(#[from] ValidationError),
    /// Every backtrack point has been exhausted.
    #[error("no derivation of the input exists")]
    NoDerivation,
    #[error("failed to write the trace")]
    Trace(#[from] std::io::Error),
}

/// Coarse classification of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value of the wrong kind was supplied.
    Type,
    /// A value of the right kind but outside the accepted range was supplied.
    Value,
    /// The input is not in the language of the grammar.
    Parse,
    /// The trace sink failed.
    Trace,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::NotATerminal { .. } => ErrorKind::Type,
            ParseError::UnknownTerminal { .. } | ParseError::Grammar(_) => ErrorKind::Value,
            ParseError::NoDerivation => ErrorKind::Parse,
            ParseError::Trace(_) => ErrorKind::Trace,
        }
    }
}
