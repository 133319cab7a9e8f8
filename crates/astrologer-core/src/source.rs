use crate::error::SourceError;
use crate::picture::Picture;
use async_trait::async_trait;
use jiff::civil::Date;

/// An external provider of daily pictures.
#[async_trait]
pub trait PictureSource: Send + Sync + 'static {
    /// Fetches the complete picture for `date`.
    ///
    /// Either the whole picture is returned or an error; implementations
    /// never hand back a picture with a missing image.
    async fn fetch(&self, date: Date) -> Result<Picture, SourceError>;
}
