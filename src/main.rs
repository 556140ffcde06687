mod cli;

use episodic::{config, server};
use episodic_captions::{active_cue, format_timestamp, parse, render_vtt, Cue, Segment, Transcript};
use episodic_playback::format_clock;
use episodic_store::CatalogStore;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use serde::Deserialize;
use std::path::Path;

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&Path>,
) -> Result<()> {
    // Load config
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config::validate_config(&config)?;

    tracing::info!("Starting Episodic server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "episodic=trace,episodic_store=debug,episodic_playback=debug,episodic_captions=debug,tower_http=debug".to_string()
        } else {
            "episodic=info,episodic_store=info,tower_http=info".to_string()
        }
    });

    // Logs go to stderr so JSON output on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
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
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("episodic {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Cues { file, at, json } => print_cues(&file, at, json),
        Commands::RenderVtt { segments } => render_segments(&segments),
        Commands::List { json } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_episodes(cli.config.as_deref(), json))
        }
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::load_config_or_default(None)?
        }
    };

    println!("✓ Configuration is valid");
    println!("  Server: {}:{}", config.server.host, config.server.port);
    match &config.storage.db_path {
        Some(db) => println!("  Durable storage: {}", db.display()),
        None => println!("  Durable storage: disabled"),
    }
    match &config.storage.remote_url {
        Some(url) => println!(
            "  Remote mirror: {} (timeout {}s)",
            url, config.storage.remote_timeout_secs
        ),
        None => println!("  Remote mirror: disabled"),
    }

    Ok(())
}

fn print_cues(file: &Path, at: Option<f64>, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read caption file: {:?}", file))?;
    let cues = parse(&text);
    tracing::debug!(count = cues.len(), "Parsed caption track");

    let selected: Vec<&Cue> = match at {
        Some(position) => active_cue(&cues, position).into_iter().collect(),
        None => cues.iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    for cue in &selected {
        println!(
            "{} --> {}  {}",
            format_timestamp(cue.start),
            format_timestamp(cue.end),
            cue.text.replace('\n', " / ")
        );
    }
    if at.is_none() {
        println!("\n{} cues", cues.len());
    }

    Ok(())
}

/// Either a bare segment array or a transcript document.
#[derive(Deserialize)]
#[serde(untagged)]
enum SegmentInput {
    Segments(Vec<Segment>),
    Transcript(Transcript),
}

fn render_segments(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read segments file: {:?}", file))?;
    let segments = match serde_json::from_str::<SegmentInput>(&content)
        .with_context(|| format!("Failed to parse segments file: {:?}", file))?
    {
        SegmentInput::Segments(segments) => segments,
        SegmentInput::Transcript(doc) => doc.segments,
    };

    print!("{}", render_vtt(&segments));
    Ok(())
}

async fn list_episodes(config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let store = CatalogStore::open(&config.storage.store_config());
    let episodes = store.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&episodes)?);
        return Ok(());
    }

    if episodes.is_empty() {
        println!("No episodes ({} storage)", store.active_tier());
        return Ok(());
    }

    for ep in &episodes {
        let length = ep.duration.map(format_clock).unwrap_or_else(|| "-".to_string());
        println!(
            "{}  {}  {:>8}  {}  ({} views)",
            ep.created_at.format("%Y-%m-%d"),
            ep.id,
            length,
            ep.title,
            ep.views
        );
    }
    println!("\n{} episodes ({} storage)", episodes.len(), store.active_tier());

    Ok(())
}
