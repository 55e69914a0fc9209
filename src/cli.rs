use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar
    pub grammar: PathBuf,

    /// Input to parse, one terminal per character
    pub input: String,

    /// Parsing algorithm
    #[arg(short, long, value_enum, default_value_t = Algorithm::TopDown)]
    pub algorithm: Algorithm,

    /// Print every configuration the parser passes through
    #[arg(short, long)]
    pub trace: bool,

    /// Print the parse tree
    #[arg(long)]
    pub tree: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    TopDown,
    BottomUp,
}
