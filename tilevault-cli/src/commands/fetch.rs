//! Fetch a single tile through the full cache chain.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use tilevault::coord::TileCoord;
use tilevault::vault::{TileVault, VaultConfig};

use crate::error::CliError;

/// Arguments for the `fetch` subcommand.
#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Remote base URL the zoom/x/y scheme is rooted under
    #[arg(long)]
    pub root_url: String,

    /// Tile column
    #[arg(short)]
    pub x: u32,

    /// Tile row
    #[arg(short)]
    pub y: u32,

    /// Zoom level
    #[arg(long, short = 'z')]
    pub zoom: u8,

    /// Tile file extension
    #[arg(long, default_value = ".png")]
    pub ext: String,

    /// Disk mirror directory; omit to disable the disk tier
    #[arg(long)]
    pub mirror_dir: Option<PathBuf>,

    /// Connect timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Where to write the decoded tile
    #[arg(long, short)]
    pub output: PathBuf,
}

/// Run the fetch subcommand.
pub async fn run(args: FetchArgs) -> Result<(), CliError> {
    let mut config = VaultConfig::new(args.root_url)
        .with_file_ext(args.ext)
        .with_connect_timeout(Duration::from_millis(args.timeout_ms));
    if let Some(dir) = args.mirror_dir {
        config = config.with_mirror_dir(dir);
    }

    let vault = TileVault::new(config)?;
    let coord = TileCoord::new(args.x, args.y, args.zoom);

    let tile = vault.load(coord).await;
    if tile.is_placeholder() {
        eprintln!("warning: tile {coord} could not be fetched, writing placeholder");
    }

    tile.image()
        .save(&args.output)
        .map_err(|e| CliError::Save(e.to_string()))?;

    println!("wrote {} ({}x{})", args.output.display(), tile.width(), tile.height());
    println!("telemetry: {}", vault.telemetry());
    Ok(())
}
