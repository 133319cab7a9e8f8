use crate::error::{ArchiveError, StorageError};
use crate::picture::Picture;
use async_trait::async_trait;
use jiff::civil::Date;

type Result<T> = std::result::Result<T, ArchiveError>;

/// Where a retrieved picture came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Served from the repository without contacting the source.
    Store,
    /// Fetched from the source on a repository miss.
    Source,
}

/// The outcome of a successful lookup.
///
/// `write_error` carries a failure to store a freshly fetched picture.
/// It never prevents the picture from being returned.
#[derive(Debug, Clone)]
pub struct Retrieval {
    pub picture: Picture,
    pub origin: Origin,
    pub write_error: Option<StorageError>,
}

impl Retrieval {
    pub fn from_store(picture: Picture) -> Self {
        Self {
            picture,
            origin: Origin::Store,
            write_error: None,
        }
    }

    pub fn from_source(picture: Picture, write_error: Option<StorageError>) -> Self {
        Self {
            picture,
            origin: Origin::Source,
            write_error,
        }
    }

    pub fn into_picture(self) -> Picture {
        self.picture
    }
}

#[async_trait]
pub trait Archive: Send + Sync + 'static {
    /// Returns the picture for `date`, fetching and storing it on a miss.
    async fn picture_by_date(&self, date: Date) -> Result<Retrieval>;

    /// Returns every archived picture.
    async fn pictures(&self) -> Result<Vec<Picture>>;
}
