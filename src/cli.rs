use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dancecast")]
#[command(author, version, about = "Local video library server with a sender/receiver playback relay")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server and control hub
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config and $PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Media directory to serve (overrides config and $DANCE_MEDIA_PATH)
        #[arg(short, long)]
        media: Option<PathBuf>,
    },

    /// Print the video library in serving order
    List {
        /// Media directory to scan (overrides config and $DANCE_MEDIA_PATH)
        #[arg(short, long)]
        media: Option<PathBuf>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses --config if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
