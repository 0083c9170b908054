//! Command-line descriptor inspector.
//!
//! Fetches the TileJSON descriptor behind a URL using the library's HTTP
//! transport and prints it, either as a human-readable summary or as JSON.
//! Exits nonzero when the load fails.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::debug;

use tilesource::{
    HttpTransport, PassthroughCanonicalizer, SourceError, SourceObserver, SourceType, TileSource,
    Tileset, TilesetConfig, DEFAULT_TILE_SIZE,
};

#[derive(Parser)]
#[command(name = "tilesource", about = "Fetch and inspect a TileJSON descriptor")]
struct Cli {
    /// URL of the TileJSON document.
    url: String,

    /// Tile size hint in device pixels.
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    tile_size: u16,

    /// Treat the source as a vector source instead of raster.
    #[arg(long)]
    vector: bool,

    /// Print the decoded descriptor as JSON instead of a summary.
    #[arg(long)]
    json: bool,

    /// Give up after this many seconds.
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

/// Terminal outcome of the load, as seen by the observer.
enum Outcome {
    Loaded,
    Failed(SourceError),
}

struct ChannelObserver {
    outcome: mpsc::UnboundedSender<Outcome>,
}

impl SourceObserver for ChannelObserver {
    fn on_source_loaded(&self, source_id: &str) {
        debug!(source = %source_id, "loaded");
        let _ = self.outcome.send(Outcome::Loaded);
    }

    fn on_source_changed(&self, source_id: &str) {
        debug!(source = %source_id, "attribution changed");
    }

    fn on_source_error(&self, source_id: &str, error: &SourceError) {
        debug!(source = %source_id, error = %error, "load failed");
        let _ = self.outcome.send(Outcome::Failed(error.clone()));
    }
}

fn print_summary(tileset: &Tileset) {
    println!("tiles:");
    for template in &tileset.tiles {
        println!("  {template}");
    }
    match &tileset.attribution {
        Some(attribution) if !attribution.is_empty() => println!("attribution: {attribution}"),
        Some(_) => println!("attribution: (empty)"),
        None => {}
    }
    println!("scheme: {}", tileset.scheme);
    if let (Some(min), Some(max)) = (tileset.minzoom, tileset.maxzoom) {
        println!("zoom: {min}..{max}");
    }
    if let Some(bounds) = &tileset.bounds {
        println!("bounds: {bounds:?}");
    }
    if !tileset.extra.is_empty() {
        println!("other fields: {}", tileset.extra.len());
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let source_type = if cli.vector {
        SourceType::Vector
    } else {
        SourceType::Raster
    };

    let transport = match HttpTransport::new() {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    let source = TileSource::new(
        "cli",
        TilesetConfig::Url(cli.url.clone()),
        source_type,
        cli.tile_size,
        Arc::new(ChannelObserver { outcome: tx }),
        Arc::new(PassthroughCanonicalizer),
    );
    source.ensure_loaded(&transport);

    let outcome = tokio::time::timeout(Duration::from_secs(cli.timeout), rx.recv()).await;
    match outcome {
        Ok(Some(Outcome::Loaded)) => {
            let tileset = source.tileset().expect("loaded source has a descriptor");
            if cli.json {
                match serde_json::to_string_pretty(&tileset) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("error: failed to serialize descriptor: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_summary(&tileset);
            }
            ExitCode::SUCCESS
        }
        Ok(Some(Outcome::Failed(error))) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
        Ok(None) | Err(_) => {
            eprintln!("error: timed out after {}s fetching {}", cli.timeout, cli.url);
            ExitCode::FAILURE
        }
    }
}
