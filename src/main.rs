mod cli;

use schooldir::{config, images::ImageStore, schools::SchoolService, server};
use schooldir_common::validation::Validator;
use schooldir_db::pool::init_pool;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

/// Wire the pool, image store and validator from an explicit config.
fn build_service(config: &config::Config) -> Result<SchoolService> {
    let db_path = config.database.path();
    tracing::info!("Opening database at {:?}", db_path);
    let pool = init_pool(&db_path, config.database.pool_size)?;

    let images = ImageStore::new(config.images.dir.clone(), config.images.url_prefix.clone());
    let validator = Validator::new(config.validation.policy());

    Ok(SchoolService::new(pool, images, validator))
}

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let mut config = config::load_runtime_config(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting schooldir server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    let service = build_service(&config)?;

    if config.database.bootstrap_on_start {
        service.bootstrap()?;
    }

    tracing::info!("Serving images from {:?}", config.images.dir);

    server::start_server(config, service).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "schooldir=trace,schooldir_db=debug,schooldir_common=debug,tower_http=debug".to_string()
        } else {
            "schooldir=info,schooldir_db=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            // Create tokio runtime
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::InitDb => init_db(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("schooldir {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_db(config_path: Option<&std::path::Path>) -> Result<()> {
    let config = config::load_runtime_config(config_path)?;
    let service = build_service(&config)?;

    service.bootstrap()?;

    println!(
        "✓ Schools table ready in {}",
        config.database.path().display()
    );
    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    let mut config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, searching default locations");
            config::load_config_or_default(None)?
        }
    };

    // Report what `start` and `init-db` would actually open
    config::apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config::validate_config(&config)?;

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Database: {}", config.database.path().display());
    println!("  Images: {:?} at {}", config.images.dir, config.images.url_prefix);
    match config.validation.max_image_bytes() {
        Some(max) => println!("  Max image size: {} bytes", max),
        None => println!("  Max image size: unlimited"),
    }
    println!("  Restrict states: {}", config.validation.restrict_states);

    Ok(())
}
