use super::error::{Result, SplitError};
use super::types::Category;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use zstd::stream::read::Decoder as ZstdDecoder;

pub type PgnInput = Box<dyn Read>;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CompressionMode {
    #[default]
    Plain,
    Zstd,
}

pub fn open_input_stream(path: &Path, compression: CompressionMode) -> Result<PgnInput> {
    let file = File::open(path).map_err(|source| SplitError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    match compression {
        CompressionMode::Plain => Ok(Box::new(file)),
        CompressionMode::Zstd => ZstdDecoder::new(file)
            .map(|decoder| Box::new(decoder) as PgnInput)
            .map_err(|source| SplitError::Decoder {
                path: path.to_path_buf(),
                source,
            }),
    }
}

pub fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Files to read and the directory the outputs go to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPlan {
    pub paths: Vec<PathBuf>,
    pub output_dir: PathBuf,
}

/// Expands the input argument into the files to read.
///
/// A plain path is used as-is (opening it later reports a missing file).
/// A glob pattern expands to its matches in sorted order, leaving out this
/// tool's own output files in the output directory so that re-running over
/// `*.pgn` does not read back the previous split. Without `output_dir`, the
/// outputs go next to the first match.
pub fn resolve_input_paths(pattern: &str, output_dir: Option<&Path>) -> Result<InputPlan> {
    if !is_glob_pattern(pattern) {
        let path = PathBuf::from(pattern);
        let output_dir = output_dir.map_or_else(|| parent_dir(&path), Path::to_path_buf);
        return Ok(InputPlan {
            paths: vec![path],
            output_dir,
        });
    }

    let mut matches: Vec<PathBuf> = glob::glob(pattern)
        .map_err(|source| SplitError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();
    matches.sort();

    let Some(first) = matches.first() else {
        return Err(SplitError::NoInput(pattern.to_string()));
    };
    let output_dir = output_dir.map_or_else(|| parent_dir(first), Path::to_path_buf);

    let paths: Vec<PathBuf> = matches
        .into_iter()
        .filter(|path| !is_output_file(path, &output_dir))
        .collect();
    if paths.is_empty() {
        return Err(SplitError::NoInput(pattern.to_string()));
    }

    Ok(InputPlan { paths, output_dir })
}

fn is_output_file(path: &Path, output_dir: &Path) -> bool {
    let named_like_output = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| Category::ALL.iter().any(|c| c.file_name() == name));

    named_like_output && same_dir(&parent_dir(path), output_dir)
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Directory the outputs for `input` are written to: its parent, or `.` for a
/// bare file name.
pub fn parent_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// ISO-8859-1: every byte is the code point of the same value.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}
