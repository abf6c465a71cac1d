use super::classify::Buckets;
use super::error::{Result, SplitError};
use super::types::Category;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes `internet.pgn` and `otb.pgn` into `dir`, replacing existing files.
/// Returns the written paths in [`Category::ALL`] order.
pub fn write_buckets(buckets: &Buckets, dir: &Path) -> Result<[PathBuf; 2]> {
    let write = |category: Category| -> Result<PathBuf> {
        let path = dir.join(category.file_name());
        fs::write(&path, buckets.render(category)).map_err(|source| SplitError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    };

    Ok([write(Category::Internet)?, write(Category::Otb)?])
}
