use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the library crate.
///
/// Only index construction is fatal to the caller; playback problems are
/// reported as outcomes (see `player::PlayOutcome`), never as errors.
#[derive(Debug, Error)]
pub enum KaraError {
    #[error("category directory missing: {0}")]
    MissingCategoryDir(PathBuf),

    #[error("failed to read {dir}: {source}")]
    Walk {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("play log write failed for {path}: {source}")]
    PlayLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
