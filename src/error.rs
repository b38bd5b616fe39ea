use std::path::PathBuf;

use thiserror::Error;

/// Failures the pipeline stages report to their callers.
///
/// Everything else travels as a plain [`anyhow::Error`] with context attached.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The collector output is absent, so no corpus can be built from it.
    #[error("scraped data file not found: {0:?} (run the scraper first)")]
    MissingScrapedData(PathBuf),
    /// A token id does not fit the 16-bit on-disk format.
    #[error("token id {id} at position {pos} does not fit in u16")]
    TokenOverflow { id: u32, pos: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
