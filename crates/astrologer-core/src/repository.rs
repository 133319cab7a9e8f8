use crate::error::StorageError;
use crate::picture::Picture;
use async_trait::async_trait;
use jiff::civil::Date;

/// Type alias for repository results.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a picture repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the picture stored for `date`.
    /// Returns `None` if nothing is stored for that day.
    async fn get(&self, date: Date) -> Result<Option<Picture>>;

    /// Returns every stored picture, oldest first.
    async fn list(&self) -> Result<Vec<Picture>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Stores a picture under its date.
    ///
    /// Inserting a date that is already stored is not an error: the existing
    /// picture is kept and `Ok(false)` is returned. `Ok(true)` means a new
    /// picture was written.
    async fn insert(&self, picture: &Picture) -> Result<bool>;
}
