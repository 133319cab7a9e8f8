mod health;
mod picture;

pub use health::HealthResponse;
pub use picture::{parse_date, ErrorResponse, PictureQuery, PictureResponse};
