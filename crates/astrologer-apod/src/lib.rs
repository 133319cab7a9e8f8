//! Client for NASA's Astronomy Picture of the Day API.
//!
//! [`ApodClient`] implements [`PictureSource`](astrologer_core::PictureSource):
//! it asks the API for the metadata of a day, then downloads the image the
//! metadata points at.

pub mod client;
pub mod config;

pub use client::ApodClient;
pub use config::ApodConfig;
