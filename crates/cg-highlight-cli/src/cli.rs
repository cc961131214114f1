//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Classify identifiers in a serialized Cg/HLSL syntax tree
#[derive(Parser, Debug)]
#[command(
    name = "cg-highlight",
    version,
    about = "Classify identifiers in a serialized Cg/HLSL syntax tree"
)]
pub struct CliArgs {
    /// Syntax tree as JSON, or `-` to read it from stdin
    #[arg(value_name = "TREE")]
    pub tree: PathBuf,

    /// Source text the tree was parsed from; enables line/column output
    #[arg(short, long, value_name = "FILE")]
    pub source: Option<PathBuf>,

    /// Report each (tag, range) pair once
    #[arg(short, long)]
    pub dedupe: bool,

    /// Report one tag per range, first emitted wins (implies --dedupe)
    #[arg(short, long)]
    pub resolve: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Print pass statistics to stderr
    #[arg(long)]
    pub stats: bool,

    /// Log every emitted highlight (needs RUST_LOG=trace to show)
    #[arg(long)]
    pub trace: bool,
}

/// How highlights are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One highlight per line
    Text,
    /// Highlights grouped by source line (needs --source)
    Lines,
    /// A JSON array
    Json,
}

/// Which sink the pass writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every emission, duplicates included, in emission order
    Raw,
    /// Distinct (tag, range) pairs, in first-seen order
    Dedupe,
    /// One tag per range, sorted by range
    Resolve,
}

impl CliArgs {
    /// Sink selection derived from the flags.
    pub fn mode(&self) -> Mode {
        if self.resolve {
            Mode::Resolve
        } else if self.dedupe {
            Mode::Dedupe
        } else {
            Mode::Raw
        }
    }

    /// True if the tree should be read from stdin.
    pub fn tree_from_stdin(&self) -> bool {
        self.tree == Path::new("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("cg-highlight").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["tree.json"]);
        assert_eq!(args.tree, PathBuf::from("tree.json"));
        assert_eq!(args.format, Format::Text);
        assert_eq!(args.mode(), Mode::Raw);
        assert!(args.source.is_none());
        assert!(!args.tree_from_stdin());
    }

    #[test]
    fn test_resolve_wins_over_dedupe() {
        assert_eq!(parse(&["t.json", "--dedupe"]).mode(), Mode::Dedupe);
        assert_eq!(parse(&["t.json", "-d", "-r"]).mode(), Mode::Resolve);
    }

    #[test]
    fn test_format_and_source() {
        let args = parse(&["-", "--format", "json", "--source", "shader.cg"]);
        assert!(args.tree_from_stdin());
        assert_eq!(args.format, Format::Json);
        assert_eq!(args.source, Some(PathBuf::from("shader.cg")));
    }

    #[test]
    fn test_lines_format() {
        let args = parse(&["t.json", "-f", "lines", "-s", "shader.cg"]);
        assert_eq!(args.format, Format::Lines);
    }

    #[test]
    fn test_tree_is_required() {
        assert!(CliArgs::try_parse_from(["cg-highlight"]).is_err());
    }
}
