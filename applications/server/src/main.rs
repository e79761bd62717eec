/// Roster Server - users directory microservice
use clap::{Parser, Subcommand};
use roster_server::{api, config::ServiceConfig, state::AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roster-server")]
#[command(about = "Roster users CRUD service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create the users table if it is absent, then exit
    InitSchema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roster_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve().await?,
        Commands::InitSchema => init_schema().await?,
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServiceConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Roster server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // The pool connects lazily; readiness reports the store's actual state.
    let pool = roster_storage::create_pool(&config.database.pool_settings());

    if config.testing {
        tracing::info!("Skipping schema initialization in test configuration");
    } else if let Err(e) = roster_storage::init_schema(&pool).await {
        // Fatal outside test configuration: the service must not serve
        // traffic against a store it could not prepare.
        tracing::error!("Failed to initialize database schema: {e}");
        std::process::exit(1);
    } else {
        tracing::info!("Database schema ready");
    }

    // Build application state and router
    let app_state = AppState::new(pool);
    let app = api::create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn init_schema() -> anyhow::Result<()> {
    let config = ServiceConfig::load()?;
    config.validate()?;

    let pool = roster_storage::create_pool(&config.database.pool_settings());
    roster_storage::init_schema(&pool).await?;

    tracing::info!("Database schema ready");
    Ok(())
}
