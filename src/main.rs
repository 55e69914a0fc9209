use std::{
    fs,
    io::{self, Write},
};

use backparse::{
    bottomup_backtrack_parse, terminals, topdown_backtrack_parse, ParseTree, TextGrammar,
};
use clap::Parser;
use color_eyre::eyre::{Error, WrapErr};
use tracing_subscriber::EnvFilter;

use crate::cli::{Algorithm, Cli};

mod cli;

fn main() -> Result<(), Error> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.grammar)
        .wrap_err_with(|| format!("failed to read grammar from {}", cli.grammar.display()))?;
    let grammar: TextGrammar = source.parse()?;
    tracing::debug!(productions = grammar.productions().len(), "grammar loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let sink = match cli.trace {
        true => Some(&mut out as &mut dyn Write),
        false => None,
    };
    let input = terminals(&cli.input);
    let derivation = match cli.algorithm {
        Algorithm::TopDown => topdown_backtrack_parse(&grammar, input, sink)?,
        Algorithm::BottomUp => bottomup_backtrack_parse(&grammar, input, sink)?,
    };

    writeln!(out, "{:?}", derivation)?;

    if cli.tree {
        let tree = match cli.algorithm {
            Algorithm::TopDown => ParseTree::from_left_parse(&grammar, &derivation)?,
            Algorithm::BottomUp => {
                let replay: Vec<usize> = derivation.iter().rev().copied().collect();
                ParseTree::from_right_parse(&grammar, &replay)?
            }
        };
        write!(out, "{}", tree)?;
    }

    Ok(())
}
