pub use parser::{
    bottomup::BottomUp,
    bottomup_backtrack_parse,
    error::{ErrorKind, ParseError, ParseResult},
    topdown::TopDown,
    topdown_backtrack_parse,
    traits::GrammarSymbol,
    validate::ValidationError,
};

mod parser;
