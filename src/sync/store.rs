use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::fetcher::Record;

/// Key every record is reconciled on.
pub const PRIMARY_KEY: &str = "id";

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("record {index} has no usable \"id\" (expected a string or integer)")]
    MissingPrimaryKey { index: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
}

/// The persistence side of the handoff. Resolves exactly once per call.
#[async_trait]
pub trait SyncStore: Send + Sync {
    async fn changes(&self, records: Vec<Record>, entity: &str) -> Result<SyncReport, SyncError>;
}

/// Primary key of a record as text; integers are accepted for feeds that emit numeric ids.
pub fn primary_key(record: &Record, index: usize) -> Result<String, SyncError> {
    match record.get(PRIMARY_KEY) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        _ => Err(SyncError::MissingPrimaryKey { index }),
    }
}

pub fn primary_keys(records: &[Record]) -> Result<Vec<String>, SyncError> {
    records.iter().enumerate().map(|(i, r)| primary_key(r, i)).collect()
}
