use astrologer_core::Picture;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Layout accepted for the `date` query parameter.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = "YYYY-MM-DD".len();

#[derive(Debug, Deserialize)]
pub struct PictureQuery {
    pub date: Option<String>,
}

/// JSON shape of a picture. The image is base64 encoded.
#[derive(Debug, Serialize, Deserialize)]
pub struct PictureResponse {
    pub title: String,
    pub date: Date,
    pub image: String,
}

impl From<Picture> for PictureResponse {
    fn from(picture: Picture) -> Self {
        Self {
            title: picture.title,
            date: picture.date,
            image: STANDARD.encode(&picture.image),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Parses a `YYYY-MM-DD` string. Anything carrying a time of day, a sign or
/// padding other than zeros is rejected.
pub fn parse_date(raw: &str) -> Result<Date, AppError> {
    if raw.len() != DATE_LEN || !has_date_layout(raw.as_bytes()) {
        return Err(invalid_date(raw));
    }
    Date::strptime(DATE_FORMAT, raw).map_err(|_| invalid_date(raw))
}

fn has_date_layout(raw: &[u8]) -> bool {
    raw.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}

fn invalid_date(raw: &str) -> AppError {
    AppError::InvalidDate(format!(
        "invalid date '{raw}', expected format YYYY-MM-DD"
    ))
}
