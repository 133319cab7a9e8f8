use std::sync::Arc;

use astrologer_core::{
    Archive, ArchiveError, Picture, PictureSource, Repository, Retrieval, StorageError,
};
use async_trait::async_trait;
use jiff::civil::Date;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, ArchiveError>;

/// Cache-aside archive over a repository and a picture source.
///
/// Lookups check the repository first. On a miss the picture is fetched from
/// the source and written back. A failed write is reported through
/// [`Retrieval::write_error`] and never hides the fetched picture from the
/// caller. The service keeps no state of its own: concurrent misses for the
/// same day may both reach the source, and the repository's idempotent
/// insert keeps the first picture.
#[derive(Debug)]
pub struct ArchiveService<R, S> {
    repository: Arc<R>,
    source: Arc<S>,
}

impl<R, S> Clone for ArchiveService<R, S> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            source: Arc::clone(&self.source),
        }
    }
}

impl<R: Repository, S: PictureSource> ArchiveService<R, S> {
    pub fn new(repository: R, source: S) -> Self {
        Self {
            repository: Arc::new(repository),
            source: Arc::new(source),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn store(&self, picture: &Picture) -> Option<StorageError> {
        match self.repository.insert(picture).await {
            Ok(true) => {
                debug!(date = %picture.date, "stored fetched picture");
                None
            }
            Ok(false) => {
                debug!(date = %picture.date, "picture was stored concurrently, keeping existing");
                None
            }
            Err(e) => {
                debug!(date = %picture.date, error = %e, "failed to store fetched picture");
                Some(e)
            }
        }
    }
}

/// Rejects a picture filed under a different day than the one asked for.
fn ensure_date(requested: Date, picture: Picture) -> Result<Picture> {
    if picture.date != requested {
        return Err(ArchiveError::DateMismatch {
            requested,
            received: picture.date,
        });
    }
    Ok(picture)
}

#[async_trait]
impl<R: Repository, S: PictureSource> Archive for ArchiveService<R, S> {
    async fn picture_by_date(&self, date: Date) -> Result<Retrieval> {
        trace!(%date, "looking up picture");

        if let Some(picture) = self.repository.get(date).await? {
            debug!(%date, "picture served from repository");
            return Ok(Retrieval::from_store(ensure_date(date, picture)?));
        }

        trace!(%date, "repository miss, fetching from source");
        let picture = ensure_date(date, self.source.fetch(date).await?)?;
        let write_error = self.store(&picture).await;

        Ok(Retrieval::from_source(picture, write_error))
    }

    async fn pictures(&self) -> Result<Vec<Picture>> {
        Ok(self.repository.list().await?)
    }
}
