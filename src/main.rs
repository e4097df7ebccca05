use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;

mod db;
mod fetcher;
mod init;
mod output;
mod records;
mod sync;
mod telemetry;

#[derive(Parser)]
#[command(name = "appnet", about = "Fetch the App.net global stream and sync it into Postgres")]
struct Cli {
    #[arg(global = true, short, long)]
    dsn: Option<String>,
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Init(init::InitCmd),
    Sync(sync::SyncCmd),
    Records(records::RecordsCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and APPNET_LOG_FORMAT
    telemetry::config::init_tracing();

    match cli.command {
        Commands::Init(args) => init::run(cli.dsn, args).await?,
        Commands::Sync(args) => sync::run(cli.dsn, args).await?,
        Commands::Records(args) => {
            let pool = db::connect(&db::resolve_dsn(cli.dsn)?).await?;
            records::run(&pool, args).await?
        }
    }

    Ok(())
}
