use backparse_grammar::TextGrammar;


/// Right-recursive expression grammar, usable top-down.
const RIGHT_RECURSIVE: &str = "E -> T+E | T\nT -> F*T | F\nF -> a";

/// Left-recursive expression grammar, usable bottom-up.
const LEFT_RECURSIVE: &str = "E -> E+T | T\nT -> T*F | F\nF -> a";

fn grammar(source: &str) -> TextGrammar {
    source.parse().expect("grammar should parse")
}
