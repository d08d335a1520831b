use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "xtasks")]
#[command(about = "Run project tasks using rust instead of scripts")]
pub struct App {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run fmt, clippy and the test suite, stopping at the first failure
    Lint(LintArgs),
}

#[derive(Args, Debug, Default)]
pub struct LintArgs {
    /// Apply formatting and clippy fixes instead of only checking
    #[arg(long)]
    pub fix: bool,

    /// Print the output of passing checks too
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip cargo fmt
    #[arg(long)]
    pub no_fmt: bool,

    /// Skip cargo clippy
    #[arg(long)]
    pub no_clippy: bool,

    /// Skip cargo test
    #[arg(long)]
    pub no_test: bool,
}
