use crate::config::ApodConfig;
use astrologer_core::{Picture, PictureSource, SourceError};
use async_trait::async_trait;
use jiff::civil::Date;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, SourceError>;

const APOD_PATH: &str = "/planetary/apod";

/// The subset of the APOD metadata we rely on.
#[derive(Debug, Deserialize)]
struct ApodMetadata {
    title: String,
    url: String,
}

/// Fetches pictures from the APOD API.
///
/// A lookup is two sequential requests: the metadata for the day, then the
/// image at the URL it names. Both go through the same client, so each one
/// is bounded by [`ApodConfig::timeout`].
#[derive(Debug, Clone)]
pub struct ApodClient {
    client: Client,
    config: ApodConfig,
}

impl ApodClient {
    pub fn new(config: ApodConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(map_reqwest_error)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApodConfig {
        &self.config
    }

    fn metadata_url(&self) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), APOD_PATH)
    }

    async fn metadata(&self, date: Date) -> Result<ApodMetadata> {
        let response = self
            .client
            .get(self.metadata_url())
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("date", date.to_string().as_str()),
            ])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let metadata: ApodMetadata = ensure_success(response)?
            .json()
            .await
            .map_err(map_reqwest_error)?;

        if metadata.url.is_empty() {
            return Err(SourceError::Malformed(format!(
                "metadata for {date} has no image url"
            )));
        }
        Ok(metadata)
    }

    async fn image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let bytes = ensure_success(response)?
            .bytes()
            .await
            .map_err(map_reqwest_error)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl PictureSource for ApodClient {
    async fn fetch(&self, date: Date) -> Result<Picture> {
        trace!(%date, "requesting apod metadata");
        let metadata = self.metadata(date).await?;

        trace!(%date, url = %metadata.url, "downloading apod image");
        let image = self.image(&metadata.url).await?;

        debug!(%date, title = %metadata.title, bytes = image.len(), "fetched apod picture");
        Ok(Picture {
            title: metadata.title,
            date,
            image,
        })
    }
}

/// Strips the query so the api key never ends up in errors or logs.
fn redacted(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(SourceError::Status {
        status: status.as_u16(),
        url: redacted(response.url()),
    })
}

fn map_reqwest_error(err: reqwest::Error) -> SourceError {
    let err = err.without_url();
    let message = err.to_string();

    if err.is_timeout() {
        SourceError::Timeout(message)
    } else if err.is_decode() || err.is_builder() {
        SourceError::Malformed(message)
    } else {
        SourceError::Transport(message)
    }
}
