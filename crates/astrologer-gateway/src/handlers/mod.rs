mod health;
mod picture;

pub use health::health_handler;
pub use picture::{get_picture_handler, list_pictures_handler};
