use crate::fetcher::Record;

use super::store::{SyncError, SyncReport, SyncStore};

/// Hand records to the store untouched and return whatever it reports.
pub async fn handoff<S>(store: &S, records: Vec<Record>, entity: &str) -> Result<SyncReport, SyncError>
where
    S: SyncStore + ?Sized,
{
    store.changes(records, entity).await
}
