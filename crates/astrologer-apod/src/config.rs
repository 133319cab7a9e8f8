use std::time::Duration;
use typed_builder::TypedBuilder;

pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov";
pub const DEFAULT_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for [`ApodClient`](crate::ApodClient).
#[derive(Debug, Clone, TypedBuilder)]
pub struct ApodConfig {
    /// Scheme and host of the API, without a trailing path.
    #[builder(default = DEFAULT_BASE_URL.to_string(), setter(into))]
    pub base_url: String,
    #[builder(default = DEFAULT_API_KEY.to_string(), setter(into))]
    pub api_key: String,
    /// Applied to each request separately.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl Default for ApodConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
