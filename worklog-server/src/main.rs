use clap::Parser;
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};
use worklog_core::WorklogConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Create the work_logs table (idempotent) and exit.
    #[arg(long)]
    init_db: bool,

    /// Check database connectivity and exit.
    #[arg(long)]
    health: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience — production uses real env vars)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Init logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // Resolve config; a missing database configuration is fatal before serving
    let config = match WorklogConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    // Connect to DB
    let pool = match worklog_core::db::create_pool(&config.database).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if args.init_db {
        match worklog_core::db::init_schema(&pool).await {
            Ok(()) => println!("work_logs table created (or already present)"),
            Err(e) => {
                eprintln!("Schema init failed: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    if args.health {
        match worklog_core::db::health_check(&pool).await {
            Ok(v) => println!("MySQL connected: {}", v),
            Err(e) => {
                eprintln!("MySQL connection failed: {}", e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    // Ctrl+C drains the server instead of dropping in-flight requests
    let (tx, _rx) = broadcast::channel(1);
    let shutdown_tx = tx.clone();

    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(());
    });

    worklog_server::http::start_http_server(pool, config, tx.subscribe()).await?;

    Ok(())
}
