mod cli;

use planetarium::db::init_pool;
use planetarium::service::PlanetService;
use planetarium::{config, server};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut config = config::load_config_or_default(config_path)?;

    // CLI flags win over the config file.
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting planetarium server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    tracing::info!("Initializing database at {}", config.database.path);
    let db_pool = init_pool(&config.database.path, config.database.pool_size)?;

    tracing::info!("Remote catalog at {}", config.catalog.base_url);
    let service = PlanetService::from_config(db_pool, &config);

    server::start_server(service, &config.server.host, config.server.port).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "planetarium=trace,tower_http=debug".to_string()
        } else {
            "planetarium=debug,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            let config = config::load_config_or_default(path.as_deref())?;
            println!("Configuration OK");
            println!("  server:   {}:{}", config.server.host, config.server.port);
            println!("  database: {}", config.database.path);
            println!("  catalog:  {}", config.catalog.base_url);
            Ok(())
        }
        Commands::Version => {
            println!("planetarium {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
