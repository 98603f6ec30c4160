mod cli;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use dc_core::config::Config;
use tokio_util::sync::CancellationToken;

/// Load the config file (or defaults) and layer environment overrides on top.
fn load_config(path: Option<&Path>) -> Config {
    let mut config = Config::load_or_default(path);
    config.apply_env();
    config
}

async fn start_server(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    media: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config(config_path);

    // CLI flags win over file and environment.
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(media) = media {
        config.media.path = media;
    }

    tracing::info!("Starting dancecast server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    dc_server::start(config, CancellationToken::new())
        .await
        .context("server failed")
}

fn list_library(config_path: Option<&Path>, media: Option<PathBuf>) -> Result<()> {
    let mut config = load_config(config_path);
    if let Some(media) = media {
        config.media.path = media;
    }

    let root = &config.media.path;
    let videos = dc_core::library::scan_videos(root)
        .with_context(|| format!("cannot read media directory {}", root.display()))?;

    if videos.is_empty() {
        println!("No videos in {}", root.display());
        return Ok(());
    }

    for video in &videos {
        println!("{:>4}  {}  {}", video.index, video.url_path(), video.name);
    }
    println!("{} video(s) in {}", videos.len(), root.display());
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let contents = std::fs::read_to_string(p)
                .with_context(|| format!("cannot read {}", p.display()))?;
            let mut config = Config::from_json(&contents)?;
            config.apply_env();
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            load_config(None)
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Media: {}", config.media.path.display());
    println!("  Web UI: {}", config.server.web_dir.display());
    println!("  Receiver UI: {}", config.server.receiver_dir.display());

    let warnings = config.validate();
    for warning in &warnings {
        println!("  ! {warning}");
    }
    if warnings.is_empty() {
        println!("  No warnings");
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from --verbose.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "dancecast=trace,dc_server=trace,dc_core=debug,tower_http=debug".to_string()
        } else {
            "dancecast=debug,dc_server=debug,dc_core=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port, media } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(cli.config.as_deref(), host, port, media))
        }
        Commands::List { media } => list_library(cli.config.as_deref(), media),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("dancecast {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
