use clap::{ArgAction, Parser, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SplinesArg {
    Ortho,
    Curved,
    Polyline,
    Spline,
}

#[derive(Debug, Default, Parser)]
#[command(
    name = "kapigraph",
    version,
    about = "Graph Kapitan class hierarchies",
    long_about = "Generates a .dot file for a Kapitan inventory, for use with Graphviz. Classes are read from <inventory>/classes and targets from <inventory>/targets; every edge points from a class or target to a class it includes."
)]
pub struct Cli {
    /// Render for a specific target (defaults to all targets)
    #[arg(short, long)]
    pub target: Option<String>,
    /// Path to inventory root [default: inventory]
    #[arg(short, long)]
    pub inventory: Option<PathBuf>,
    /// Path to the DOT output file [default: kapitan.dot]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Set graphviz font
    #[arg(short, long)]
    pub font: Option<String>,
    /// Edge routing style [default: ortho]
    #[arg(long, value_enum)]
    pub splines: Option<SplinesArg>,
    /// Graphviz layout engine hint written into the graph [default: dot]
    #[arg(long)]
    pub layout: Option<String>,
    /// Also render an SVG with the Graphviz `dot` binary
    #[arg(long)]
    pub svg: Option<PathBuf>,
    /// Also write the resolved relationships as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,
    /// Path to a TOML configuration file [default: ./kapigraph.toml if present]
    #[arg(long, env = "KAPIGRAPH_CONFIG")]
    pub config: Option<PathBuf>,
    /// Print shell completions to stdout and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
    /// Only print errors and warnings
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
