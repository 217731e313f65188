use services::{AppServices, Clock};
use storage::repository::Storage;
use storage::sqlite::SqliteRepository;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

mod config;

use config::{Command, Config, prepare_sqlite_file, print_usage};

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse(std::env::args().skip(1), |key| std::env::var(key).ok())
        .map_err(|e| {
            eprintln!("{e}");
            print_usage();
            e
        })?;

    if config.command == Command::Help {
        print_usage();
        return Ok(());
    }

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Open + migrate SQLite at startup. Keep this in the binary glue so the
    // library crates never touch the filesystem.
    prepare_sqlite_file(&config.db_url)?;

    match config.command {
        Command::Migrate => {
            let repo = SqliteRepository::connect(&config.db_url).await?;
            repo.migrate().await?;
            info!(db = %config.db_url, "migrations applied");
            Ok(())
        }
        Command::Serve => {
            info!(db = %config.db_url, "initializing storage");
            let storage = Storage::sqlite(&config.db_url).await?;
            let services = AppServices::from_storage(&storage, Clock::system());
            let app = api::router(services, config.cors_origin.clone());

            info!("Binding to {}", config.address);
            let listener = TcpListener::bind(config.address).await?;
            api::serve(listener, app).await?;
            Ok(())
        }
        Command::Help => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
