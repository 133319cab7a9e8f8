//! HTTP gateway for the picture archive.
//!
//! - `GET /picture?date=YYYY-MM-DD` returns the picture for a day
//! - `GET /pictures` lists every archived picture
//! - `GET /health` reports liveness

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
