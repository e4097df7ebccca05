use thiserror::Error;
use url::Url;

use super::envelope::{self, DecodeError, Record};
use super::transport::{Transport, TransportError};

/// App.net global stream.
pub const FEED_URL: &str = "https://api.app.net/posts/stream/global";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("malformed feed: {0}")]
    Decode(#[from] DecodeError),
}

pub struct RemoteFeed<T: Transport> {
    transport: T,
    url: Url,
}

impl<T: Transport> RemoteFeed<T> {
    pub fn new(transport: T) -> Self {
        let url = Url::parse(FEED_URL).expect("FEED_URL is a valid URL");
        Self::with_url(transport, url)
    }

    pub fn with_url(transport: T, url: Url) -> Self {
        Self { transport, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// One GET, no retry. Transport failures come back untouched.
    pub async fn fetch_remote(&self) -> Result<Vec<Record>, FetchError> {
        let body = self.transport.get(&self.url).await?;
        let records = envelope::extract_records(&body)?;
        Ok(records)
    }
}
