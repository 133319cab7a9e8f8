use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// One day's astronomy picture.
///
/// The `date` is a civil date with no time of day, so two pictures for the
/// same calendar day always share a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    /// Title of the picture as published by the source.
    pub title: String,
    /// The day the picture belongs to. Unique across the archive.
    pub date: Date,
    /// Raw image bytes.
    pub image: Vec<u8>,
}

impl Picture {
    pub fn new(title: impl Into<String>, date: Date, image: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            date,
            image: image.into(),
        }
    }
}
