use jiff::civil::Date;
use thiserror::Error;

/// Errors raised by a picture repository.
///
/// A missing picture is not an error: repositories report it as `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors raised while fetching a picture from an external source.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("source request failed: {0}")]
    Transport(String),
    #[error("source request timed out: {0}")]
    Timeout(String),
    #[error("source returned status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("source response is malformed: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Error)]
pub enum ArchiveError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("requested picture for {requested}, got one for {received}")]
    DateMismatch { requested: Date, received: Date },
}
