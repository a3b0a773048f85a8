use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use koinonia_config::{Config, ConfigLoad, ConfigLoader};
use koinonia_server::store::Store;
use koinonia_server::{AppState, create_app, db};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "koinonia-server")]
#[command(about = "Church media platform backend: sermons, podcasts, live broadcasts, and congregation engagement")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(ClapArgs, Debug, Clone)]
struct ServeArgs {
    /// Server port (overrides config)
    #[arg(short, long, env = "SERVER_PORT")]
    port: Option<u16>,

    /// Server host (overrides config)
    #[arg(long, env = "SERVER_HOST")]
    host: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(subcommand)]
    Db(DbCommand),
}

#[derive(Debug, Subcommand)]
enum DbCommand {
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Db(DbCommand::Migrate)) = cli.command {
        run_db_migrate(&cli.serve).await?;
        return Ok(());
    }

    run_server(cli.serve).await
}

async fn run_db_migrate(args: &ServeArgs) -> anyhow::Result<()> {
    let (_config, database_url) = load_runtime_config(args)?;
    let pool = db::create_pool(&database_url).await?;
    db::run_migrations(&pool).await?;
    info!("Database migrations applied successfully");
    Ok(())
}

fn load_runtime_config(
    args: &ServeArgs,
) -> anyhow::Result<(Arc<Config>, String)> {
    let ConfigLoad {
        mut config,
        warnings,
    } = ConfigLoader::new()
        .load()
        .context("failed to load configuration")?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = args.host.clone() {
        config.server.host = host;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint,
                    "configuration warning")
            }
            None => {
                warn!(message = %warning.message, "configuration warning")
            }
        }
    }

    let database_url = config
        .database
        .url
        .clone()
        .context("DATABASE_URL must be set")?;
    db::validate_database_url(&database_url)?;

    Ok((Arc::new(config), database_url))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let (config, database_url) = load_runtime_config(&args)?;

    config
        .ensure_directories()
        .context("failed to create upload/recording directories")?;

    let pool = db::create_pool(&database_url).await?;
    db::run_migrations(&pool).await?;
    info!("database ready");

    let store = Store::postgres(pool);
    let state = AppState::new(config.clone(), store);
    let app = create_app(state);

    let addr: SocketAddr =
        format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .context("invalid server bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "koinonia-server listening");

    axum::serve(listener, app)
        .await
        .context("server exited with error")?;

    Ok(())
}
