use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;

use crate::sync::DEFAULT_ENTITY;
use crate::telemetry::{self};
use crate::telemetry::ops::records::Phase as RecordsPhase;

mod db;

/// appnet records ls
#[derive(Args)]
pub struct RecordsCmd {
    #[command(subcommand)]
    pub cmd: RecordsSub,
}

#[derive(Subcommand)]
pub enum RecordsSub {
    // list stored records of one entity, most recently synced first
    Ls {
        #[arg(long, default_value = DEFAULT_ENTITY)]
        entity: String,
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(1..))]
        limit: i64,
    },
}

#[derive(Serialize)]
struct RecordList { entity: String, total: i64, records: Vec<db::RecordRow> }

pub async fn run(pool: &PgPool, args: RecordsCmd) -> Result<()> {
    match args.cmd {
        RecordsSub::Ls { entity, limit } => ls_records(pool, entity, limit).await?,
    }
    Ok(())
}

async fn ls_records(pool: &PgPool, entity: String, limit: i64) -> Result<()> {
    let log = telemetry::records();
    let _g = log.root_span().entered();
    let _s = log.span_kv(&RecordsPhase::List, [("entity", entity.clone()), ("limit", limit.to_string())]).entered();

    let total = db::count_records(pool, &entity).await?;
    let records = db::list_records(pool, &entity, limit).await?;

    log.info(format!("🗂️ {} — {} record(s)", entity, total));
    for row in &records {
        log.info(format!("[{}] synced_at={} {}", row.remote_id, row.synced_at, preview(&row.body.0)));
    }
    if telemetry::config::json_mode() {
        log.result(&RecordList { entity, total, records }, None)?;
    }
    Ok(())
}

const PREVIEW_CHARS: usize = 60;

// App.net posts carry their content in "text"; anything else shows its JSON.
fn preview(body: &Value) -> String {
    let raw = match body.get("text") {
        Some(Value::String(text)) => text.clone(),
        _ => body.to_string(),
    };
    let one_line = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if one_line.chars().count() > PREVIEW_CHARS {
        let cut: String = one_line.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut)
    } else {
        one_line
    }
}
