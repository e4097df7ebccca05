use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client as HttpClient, StatusCode};
use thiserror::Error;
use url::Url;

use super::config::FetchConfig;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: Url },
}

impl TransportError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Http(err)
        }
    }
}

/// A single GET that yields the raw response body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<Bytes, TransportError>;
}

#[derive(Clone)]
pub struct ReqwestTransport {
    http: HttpClient,
}

impl ReqwestTransport {
    pub fn new(cfg: &FetchConfig) -> Result<Self, TransportError> {
        let http = HttpClient::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(TransportError::from_reqwest)?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<Bytes, TransportError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status { status, url: url.clone() });
        }

        response.bytes().await.map_err(TransportError::from_reqwest)
    }
}

#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Scripted transport: pops one queued outcome per call and records the URL.
    #[derive(Default)]
    pub struct MockTransport {
        responses: Mutex<VecDeque<Result<Bytes, TransportError>>>,
        calls: Mutex<Vec<Url>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_body(body: &str) -> Self {
            let mock = Self::new();
            mock.push_response(Ok(Bytes::from(body.to_string())));
            mock
        }

        pub fn with_error(err: TransportError) -> Self {
            let mock = Self::new();
            mock.push_response(Err(err));
            mock
        }

        pub fn push_response(&self, resp: Result<Bytes, TransportError>) {
            self.responses.lock().unwrap().push_back(resp);
        }

        pub fn calls(&self) -> Vec<Url> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: &Url) -> Result<Bytes, TransportError> {
            self.calls.lock().unwrap().push(url.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("mock transport response queue is empty")
        }
    }
}
