use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "episodic")]
#[command(author, version, about = "Episode catalog server with synchronized captions")]
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
    /// Start the catalog HTTP server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,

    /// Parse a WebVTT file and print its cues
    Cues {
        /// Caption track to parse
        #[arg(required = true)]
        file: PathBuf,

        /// Only show the cue active at this position (seconds)
        #[arg(long)]
        at: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render transcript segments (JSON) as a WebVTT track
    RenderVtt {
        /// Segment array or transcript document with a "segments" field
        #[arg(required = true)]
        segments: PathBuf,
    },

    /// List catalog episodes, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
