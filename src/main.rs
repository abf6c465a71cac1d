use clap::{Parser, ValueEnum};
use pgn_split::pgn::logging::setup_logging;
use pgn_split::{CompressionMode, MatchMode, SplitOptions, UnterminatedRecord, split_pgn};
use std::error::Error;
use std::path::PathBuf;

/// Split a PGN archive into internet games (internet.pgn) and
/// over-the-board games (otb.pgn), written next to the input.
#[derive(Parser, Debug)]
#[command(name = "pgn-split", version, about)]
struct Args {
    /// Input PGN file, or a glob pattern such as 'twic*.pgn'
    input: String,

    /// Compression of the input file(s)
    #[arg(long, value_enum, default_value_t = CompressionArg::Plain)]
    compression: CompressionArg,

    /// How games are matched against the internet site list
    #[arg(long = "match", value_enum, default_value_t = MatchArg::Text)]
    match_mode: MatchArg,

    /// What to do with a final game that is not followed by a blank line
    #[arg(long, value_enum, default_value_t = UnterminatedArg::Drop)]
    unterminated: UnterminatedArg,

    /// Write outputs here instead of the input's directory
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum CompressionArg {
    Plain,
    Zstd,
}

impl From<CompressionArg> for CompressionMode {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::Plain => CompressionMode::Plain,
            CompressionArg::Zstd => CompressionMode::Zstd,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum MatchArg {
    /// Allowlisted [Site "..."] tag anywhere in the game text
    Text,
    /// Parsed Site tag values only
    SiteTag,
}

impl From<MatchArg> for MatchMode {
    fn from(arg: MatchArg) -> Self {
        match arg {
            MatchArg::Text => MatchMode::Text,
            MatchArg::SiteTag => MatchMode::SiteTag,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum UnterminatedArg {
    Drop,
    Keep,
}

impl From<UnterminatedArg> for UnterminatedRecord {
    fn from(arg: UnterminatedArg) -> Self {
        match arg {
            UnterminatedArg::Drop => UnterminatedRecord::Drop,
            UnterminatedArg::Keep => UnterminatedRecord::Keep,
        }
    }
}

impl From<Args> for SplitOptions {
    fn from(args: Args) -> Self {
        SplitOptions {
            compression: args.compression.into(),
            match_mode: args.match_mode.into(),
            unterminated: args.unterminated.into(),
            output_dir: args.output_dir,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _logger = setup_logging()?;

    let input = args.input.clone();
    split_pgn(&input, &args.into())?;
    Ok(())
}
