//! Core types and traits for the Astrologer picture archive.
//!
//! This crate provides the shared record type, the storage and source
//! contracts, and the archive trait consumed by the HTTP gateway.

pub mod archive;
pub mod error;
pub mod picture;
pub mod repository;
pub mod source;

pub use archive::{Archive, Origin, Retrieval};
pub use error::{ArchiveError, SourceError, StorageError};
pub use picture::Picture;
pub use repository::{ReadRepository, Repository};
pub use source::PictureSource;

/// Calendar date used as the archive key.
pub use jiff::civil::Date;
