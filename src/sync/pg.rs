use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::fetcher::Record;

use super::store::{primary_keys, SyncError, SyncReport, SyncStore};

/// Postgres-backed store: upsert by (entity, id), drop rows the payload no longer carries.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SyncStore for PgStore {
    async fn changes(&self, records: Vec<Record>, entity: &str) -> Result<SyncReport, SyncError> {
        let keys = primary_keys(&records)?;
        let mut report = SyncReport::default();
        let mut tx = self.pool.begin().await?;

        for (key, record) in keys.iter().zip(records) {
            let row = sqlx::query(
                r#"
                INSERT INTO appnet.record (entity, remote_id, body, synced_at)
                VALUES ($1, $2, $3, now())
                ON CONFLICT (entity, remote_id) DO UPDATE
                  SET body      = EXCLUDED.body,
                      synced_at = now()
                RETURNING (xmax = 0) AS inserted
                "#,
            )
            .bind(entity)
            .bind(key)
            .bind(Json(Value::Object(record)))
            .fetch_one(&mut *tx)
            .await?;

            if row.try_get::<bool, _>("inserted")? { report.inserted += 1; } else { report.updated += 1; }
        }

        let deleted = sqlx::query(
            r#"
            DELETE FROM appnet.record
            WHERE entity = $1 AND NOT (remote_id = ANY($2))
            "#,
        )
        .bind(entity)
        .bind(keys.as_slice())
        .execute(&mut *tx)
        .await?;
        report.deleted = deleted.rows_affected() as usize;

        tx.commit().await?;
        Ok(report)
    }
}
