use anyhow::{Context, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};

const MAX_CONNECTIONS: u32 = 5;

/// `--dsn` wins over `DATABASE_URL` (which `.env` may provide).
pub fn resolve_dsn(dsn: Option<String>) -> Result<String> {
    let non_blank = |s: &String| !s.trim().is_empty();
    dsn.filter(non_blank)
        .or_else(|| std::env::var("DATABASE_URL").ok().filter(non_blank))
        .context("Please provide --dsn or set DATABASE_URL in .env")
}

pub async fn connect(dsn: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(dsn)
        .await?;
    Ok(pool)
}

/// Parses the DSN now, connects on first use.
pub fn connect_lazy(dsn: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_lazy(dsn)?;
    Ok(pool)
}
