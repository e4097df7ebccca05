use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;

use crate::db;
use crate::fetcher::{FetchConfig, LocalFeed, Record, RemoteFeed, ReqwestTransport};
use crate::telemetry::{self};
use crate::telemetry::emit::Meta;
use crate::telemetry::ops::sync::Phase as SyncPhase;

mod handoff;
#[cfg(test)]
mod memory;
mod pg;
mod pipeline;
mod store;
pub mod types;

pub use pg::PgStore;
pub use pipeline::{sync_feed, FeedSource};
pub use store::SyncReport;

use store::SyncError;

/// Collection the App.net posts are reconciled into.
pub const DEFAULT_ENTITY: &str = "Data";

#[derive(Args)]
pub struct SyncCmd {
    /// Read the bundled global.json instead of the network
    #[arg(long, default_value_t = false)] pub local: bool,
    #[arg(long, default_value = DEFAULT_ENTITY)] pub entity: String,
    #[arg(long, default_value_t = false)] pub apply: bool,
    #[arg(long, default_value_t = 5)] pub plan_limit: usize,
}

/// Validates every key the way apply will, then keeps the first `limit` for display.
fn plan_sample_ids(records: &[Record], limit: usize) -> Result<Vec<String>, SyncError> {
    let mut keys = store::primary_keys(records)?;
    keys.truncate(limit);
    Ok(keys)
}

pub async fn run(dsn: Option<String>, args: SyncCmd) -> Result<()> {
    let log = telemetry::sync();
    let _g = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("local", args.local.to_string()),
        ("entity", args.entity.clone()),
    ]).entered();
    let t0 = Instant::now();
    let cfg = FetchConfig::from_env();

    // A broken bundle is fatal: fail before any network or database I/O.
    let source: FeedSource<ReqwestTransport> = if args.local {
        let feed = LocalFeed::open(&cfg.assets_dir)
            .context("bundled feed asset is unavailable; the build is incomplete")?;
        FeedSource::Local(feed)
    } else {
        FeedSource::Remote(RemoteFeed::new(ReqwestTransport::new(&cfg)?))
    };
    let source_name = if args.local { "local" } else { "remote" };

    if !args.apply {
        let records = source.fetch().await.with_context(|| format!("fetch from {} failed", source.describe()))?;
        let _s = log.span(&SyncPhase::Plan).entered();
        if records.is_empty() { log.warn("⚠️ Feed returned no records; applying would clear the entity"); }
        let sample_ids = match plan_sample_ids(&records, args.plan_limit) {
            Ok(ids) => ids,
            Err(err) => {
                log.error(format!("❌ Plan rejected: {}", err));
                return Err(err).context("feed would be rejected on --apply");
            }
        };
        if telemetry::config::json_mode() {
            let plan = types::SyncPlan { source: source_name.to_string(), entity: args.entity.clone(), records: records.len(), sample_ids };
            log.plan(&plan)?;
        } else {
            log.info(format!("📝 Sync plan — source={} entity={} records={}", source_name, args.entity, records.len()));
            for id in &sample_ids { log.info(format!("  id={}", id)); }
            if records.len() > args.plan_limit { log.info(format!("  ... ({} more)", records.len() - args.plan_limit)); }
            log.info("   Use --apply to execute.");
        }
        return Ok(());
    }

    // Lazy pool: the feed is fetched and decoded before the first connection is made.
    let pool = db::connect_lazy(&db::resolve_dsn(dsn)?)?;
    let store = PgStore::new(pool);

    let report = match sync_feed(&source, &store, &args.entity).await {
        Ok(report) => report,
        Err(err) => {
            log.error(format!("❌ Sync failed: {}", err));
            return Err(err).with_context(|| format!("sync of {} into {} failed", source.describe(), args.entity));
        }
    };

    if report.inserted + report.updated == 0 { log.warn(format!("⚠️ Entity {} is now empty", args.entity)); }

    if telemetry::config::json_mode() {
        let result = types::SyncApply {
            source: source_name.to_string(),
            entity: args.entity.clone(),
            records: report.inserted + report.updated,
            report,
        };
        let meta = Meta { duration_ms: Some(t0.elapsed().as_millis()), run_id: None };
        log.result(&result, Some(meta))?;
    }
    Ok(())
}
