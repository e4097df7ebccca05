use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

#[derive(Debug, Serialize, FromRow)]
pub struct RecordRow {
    pub remote_id: String,
    pub synced_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_json")]
    pub body: Json<Value>,
}

fn serialize_json<S: serde::Serializer>(v: &Json<Value>, s: S) -> Result<S::Ok, S::Error> {
    v.0.serialize(s)
}

pub async fn list_records(pool: &PgPool, entity: &str, limit: i64) -> Result<Vec<RecordRow>> {
    let rows = sqlx::query_as::<_, RecordRow>(
        r#"
        SELECT remote_id, synced_at, body
        FROM appnet.record
        WHERE entity = $1
        ORDER BY synced_at DESC, remote_id
        LIMIT $2
        "#,
    )
    .bind(entity)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_records(pool: &PgPool, entity: &str) -> Result<i64> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM appnet.record WHERE entity = $1")
        .bind(entity)
        .fetch_one(pool)
        .await?;
    Ok(n)
}
