pub mod pgn;

pub use pgn::classify::{Buckets, MatchMode, classify};
pub use pgn::error::{Result, SplitError};
pub use pgn::input::CompressionMode;
pub use pgn::reader::{RecordReader, UnterminatedRecord};
pub use pgn::sites::SiteAllowlist;
pub use pgn::types::{Category, GameRecord};
pub use pgn::{SplitOptions, SplitSummary, split_pgn, split_stream};
