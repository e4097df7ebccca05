use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::db;
use crate::telemetry::{self};
use crate::telemetry::ops::init::Phase as InitPhase;

#[derive(Args)]
pub struct InitCmd {
    #[arg(long, default_value_t = false)] pub apply: bool,
}

#[derive(Serialize)]
struct InitPlan { action: &'static str, migrations: Vec<String> }

#[derive(Serialize)]
struct InitResult { applied: bool }

pub async fn run(dsn: Option<String>, args: InitCmd) -> Result<()> {
    let log = telemetry::init();
    let _g = log.root_span_kv([("apply", args.apply.to_string())]).entered();
    let migrator = sqlx::migrate!();

    if !args.apply {
        let _s = log.span(&InitPhase::Plan).entered();
        let migrations: Vec<String> = migrator.iter().map(|m| format!("{}_{}", m.version, m.description)).collect();
        log.info(format!("📝 Init plan — {} migration(s)", migrations.len()));
        for m in &migrations { log.info(format!("  {}", m)); }
        log.info("   Use --apply to execute.");
        if telemetry::config::json_mode() {
            log.plan(&InitPlan { action: "migrate", migrations })?;
        }
        return Ok(());
    }

    let pool = db::connect(&db::resolve_dsn(dsn)?).await?;
    {
        let _s = log.span(&InitPhase::Migrate).entered();
        // Idempotent: already-applied migrations are skipped.
        migrator.run(&pool).await?;
    }
    log.info("✅ Database initialized");
    if telemetry::config::json_mode() {
        log.result(&InitResult { applied: true }, None)?;
    }
    Ok(())
}
