use thiserror::Error;
use tracing::Instrument;

use crate::fetcher::{AssetError, FetchError, LocalFeed, Record, RemoteFeed, Transport};
use crate::telemetry;
use crate::telemetry::ops::sync::Phase as SyncPhase;

use super::handoff::handoff;
use super::store::{SyncError, SyncReport, SyncStore};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

pub enum FeedSource<T: Transport> {
    Remote(RemoteFeed<T>),
    Local(LocalFeed),
}

impl<T: Transport> FeedSource<T> {
    pub fn describe(&self) -> String {
        match self {
            FeedSource::Remote(feed) => feed.url().to_string(),
            FeedSource::Local(feed) => feed.path().display().to_string(),
        }
    }

    /// One read from whichever source this is.
    pub async fn fetch(&self) -> Result<Vec<Record>, PipelineError> {
        let log = telemetry::sync();
        let records = match self {
            FeedSource::Remote(feed) => feed.fetch_remote().instrument(log.span(&SyncPhase::FetchRemote)).await?,
            FeedSource::Local(feed) => log.span(&SyncPhase::ReadAsset).in_scope(|| feed.fetch_local())?,
        };
        log.fetched(&self.describe(), records.len());
        Ok(records)
    }
}

/// Fetch then hand off. A failed fetch never reaches the store.
pub async fn sync_feed<T, S>(source: &FeedSource<T>, store: &S, entity: &str) -> Result<SyncReport, PipelineError>
where
    T: Transport,
    S: SyncStore + ?Sized,
{
    let records = source.fetch().await?;
    let log = telemetry::sync();
    let report = handoff(store, records, entity)
        .instrument(log.span(&SyncPhase::Handoff))
        .await?;
    log.report(entity, &report);
    Ok(report)
}
