use anyhow::Result;
use app::{
    clock::{parse_clock, Clock, FixedClock, LocalClock, Minutes},
    config::Config,
    App,
};
use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "app", about = "Takes delivery orders and tells you when they arrive")]
struct Args {
    /// Path to the store, area and menu configuration
    #[arg(long, default_value = "./config/baedal.toml")]
    config: String,

    /// Order log database, overrides [storage].db. `:memory:` keeps nothing.
    #[arg(long)]
    db: Option<String>,

    /// Pretend the wall clock shows this time (HH:MM)
    #[arg(long, value_parser = parse_clock)]
    now: Option<Minutes>,
}

async fn run_app<C: Clock>(config: Config, db_file: String, clock: C) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    App::new(config, db_file, clock)
        .run(stdin, tokio::io::stdout())
        .await
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("app=info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    info!("Loading config file...");
    let config = match Config::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    };
    let db_file = args.db.unwrap_or_else(|| config.storage.db.clone());
    let result = match args.now {
        Some(now) => run_app(config, db_file, FixedClock::new(now)).await,
        None => run_app(config, db_file, LocalClock).await,
    };
    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
