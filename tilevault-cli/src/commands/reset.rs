//! Delete a disk mirror tree.

use std::path::PathBuf;

use clap::Args;
use tilevault::mirror::{DiskMirror, TileMirror};

use crate::error::CliError;

/// Arguments for the `reset` subcommand.
#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Disk mirror directory to delete
    #[arg(long)]
    pub mirror_dir: PathBuf,
}

/// Run the reset subcommand.
pub async fn run(args: ResetArgs) -> Result<(), CliError> {
    println!("clearing mirror at: {}", args.mirror_dir.display());

    let mirror = DiskMirror::new(args.mirror_dir, ".png");
    mirror
        .clear()
        .await
        .map_err(|e| CliError::Reset(e.to_string()))?;

    println!("mirror cleared");
    Ok(())
}
