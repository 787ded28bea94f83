use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DatasetError {
    #[error("download request failed: {0}")]
    Http(String),

    #[error("download of {url} returned status {status}")]
    HttpStatus { status: u16, url: String },

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("archive error: {0}")]
    Archive(String),

    #[error("nested archive not found after extraction: {0}")]
    #[diagnostic(help("the upstream zip layout may have changed"))]
    NestedArchiveMissing(PathBuf),

    #[error("downloaded archive not found at cleanup path: {0}")]
    #[diagnostic(help("the archive is only present right after a fresh download"))]
    CleanupArchiveMissing(PathBuf),

    #[error("split file missing after extraction: {0}")]
    MissingSplitFile(PathBuf),
}
