//! Cache-aside archive of daily pictures.
//!
//! [`ArchiveService`] answers lookups from a repository and falls back to a
//! [`PictureSource`](astrologer_core::PictureSource) on a miss, writing the
//! fetched picture back so later lookups for the same day never reach the
//! source.
//!
//! # Example
//!
//! ```rust,no_run
//! use astrologer_archive::ArchiveService;
//! use astrologer_apod::{ApodClient, ApodConfig};
//! use astrologer_core::Archive;
//! use astrologer_storage::InMemoryRepository;
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = ApodClient::new(ApodConfig::default())?;
//! let archive = ArchiveService::new(InMemoryRepository::new(), source);
//!
//! let retrieval = archive.picture_by_date(date(2022, 9, 15)).await?;
//! println!("{}", retrieval.picture.title);
//! # Ok(())
//! # }
//! ```

pub mod service;

pub use service::ArchiveService;
