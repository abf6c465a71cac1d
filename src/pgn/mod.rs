pub mod classify;
pub mod error;
pub mod input;
pub mod logging;
pub mod reader;
pub mod sites;
pub mod types;
pub mod visitor;
pub mod writer;

use log::{debug, info, warn};
use classify::{Buckets, MatchMode, classify};
use error::{Result, SplitError};
use input::{CompressionMode, open_input_stream, resolve_input_paths};
use reader::{RecordReader, UnterminatedRecord};
use std::fmt;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use types::Category;
use writer::write_buckets;

/// Run configuration. The default reproduces the classic behaviour: plain
/// input, whole-text matching, unterminated final game dropped, outputs next
/// to the input.
#[derive(Clone, Debug, Default)]
pub struct SplitOptions {
    pub compression: CompressionMode,
    pub match_mode: MatchMode,
    pub unterminated: UnterminatedRecord,
    pub output_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitSummary {
    pub internet: usize,
    pub otb: usize,
    pub internet_path: PathBuf,
    pub otb_path: PathBuf,
}

impl SplitSummary {
    pub fn total(&self) -> usize {
        self.internet + self.otb
    }
}

impl fmt::Display for SplitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} games: {} internet -> '{}', {} otb -> '{}'",
            self.total(),
            self.internet,
            self.internet_path.display(),
            self.otb,
            self.otb_path.display()
        )
    }
}

/// Reads every game from `input` and files it into `buckets`. Returns the
/// number of games read.
pub fn split_stream<R: BufRead>(
    input: R,
    options: &SplitOptions,
    buckets: &mut Buckets,
) -> Result<usize> {
    let mut count = 0;
    for record in RecordReader::with_policy(input, options.unterminated) {
        let record = record?;
        let category = classify(&record, options.match_mode);
        debug!(
            "game {}: {} ({} tag lines)",
            buckets.total() + 1,
            category.label(),
            record.tags.len()
        );
        buckets.push(category, &record);
        count += 1;
    }
    Ok(count)
}

/// Reads each of `paths` into `buckets`. With several paths, files that
/// fail to open are skipped, but at least one must open.
pub fn read_inputs(
    paths: &[PathBuf],
    options: &SplitOptions,
    buckets: &mut Buckets,
) -> Result<usize> {
    let mut opened = 0;
    let mut games = 0;
    for path in paths {
        let stream = match open_input_stream(path, options.compression) {
            Ok(stream) => stream,
            // A single explicit file must open; glob matches that fail are skipped.
            Err(e) if paths.len() > 1 => {
                warn!("{e}");
                continue;
            }
            Err(e) => return Err(e),
        };
        opened += 1;

        let read = split_stream(BufReader::new(stream), options, buckets)?;
        info!("read {} games from '{}'", read, path.display());
        games += read;
    }

    if opened == 0 {
        return Err(SplitError::NoReadableInput { count: paths.len() });
    }
    Ok(games)
}

/// Splits the games of `input` (a path or glob pattern) into `internet.pgn`
/// and `otb.pgn`.
///
/// Nothing is written until every input file has been read; a read error
/// leaves existing output files untouched.
pub fn split_pgn(input: &str, options: &SplitOptions) -> Result<SplitSummary> {
    let plan = resolve_input_paths(input, options.output_dir.as_deref())?;

    let mut buckets = Buckets::default();
    read_inputs(&plan.paths, options, &mut buckets)?;

    write_summary(&buckets, &plan.output_dir)
}

fn write_summary(buckets: &Buckets, output_dir: &Path) -> Result<SplitSummary> {
    let [internet_path, otb_path] = write_buckets(buckets, output_dir)?;
    let summary = SplitSummary {
        internet: buckets.len(Category::Internet),
        otb: buckets.len(Category::Otb),
        internet_path,
        otb_path,
    };
    info!("{summary}");
    Ok(summary)
}
