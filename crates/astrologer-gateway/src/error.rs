use astrologer_core::ArchiveError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

const INTERNAL_ERROR_MESSAGE: &str = "something went wrong, try again.";

#[derive(Debug)]
pub enum AppError {
    /// The request did not carry a usable `date` parameter.
    InvalidDate(String),
    Archive(ArchiveError),
}

impl From<ArchiveError> for AppError {
    fn from(error: ArchiveError) -> Self {
        AppError::Archive(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidDate(message) => {
                warn!(%message, "rejected picture request");
                (StatusCode::BAD_REQUEST, message)
            }
            // Details stay in the log; clients get a generic message.
            AppError::Archive(source) => {
                error!(error = %source, "archive operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}
