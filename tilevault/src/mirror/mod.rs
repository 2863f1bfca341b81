//! Optional on-disk mirror of the remote tile tree.
//!
//! The mirror persists raw (encoded) tile bytes under
//! `mirror_dir/{zoom}/{x}/{y}{ext}`, the same path scheme the remote server
//! uses, so both tiers address the same logical tile. It is a passive
//! second tier: it never makes network calls, and a read failure is never
//! fatal, the caller just falls through to the network.
//!
//! All filesystem work runs on the blocking thread pool via
//! `spawn_blocking` to keep the async runtime free.

use std::path::PathBuf;

use bytes::Bytes;
use thiserror::Error;
use tracing::warn;

use crate::cache::BoxFuture;
use crate::coord::TileCoord;

/// Errors raised by mirror writes and deletes.
///
/// Reads never error; a missing or unreadable file is reported as `None`.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Filesystem operation failed.
    #[error("mirror I/O failed at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking I/O task was cancelled or panicked.
    #[error("mirror task interrupted: {0}")]
    Interrupted(String),
}

/// Local persistence tier for fetched tile bytes.
///
/// `locator` doubles as the authoritative cache key when a mirror is
/// configured, so it must be pure and stable for a given coordinate.
pub trait TileMirror: Send + Sync {
    /// Stable local identifier for a tile (the full mirror file path).
    fn locator(&self, coord: TileCoord) -> String;

    /// Read mirrored bytes for a tile.
    ///
    /// Returns `None` when the file is missing or unreadable.
    fn load(&self, coord: TileCoord) -> BoxFuture<'_, Option<Bytes>>;

    /// Persist tile bytes, creating parent directories as needed.
    fn store(&self, coord: TileCoord, bytes: Bytes) -> BoxFuture<'_, Result<(), MirrorError>>;

    /// Delete the entire mirror tree.
    ///
    /// A mirror that was never written to counts as already clear.
    fn clear(&self) -> BoxFuture<'_, Result<(), MirrorError>>;
}

/// Filesystem-backed mirror rooted at a configurable directory.
#[derive(Debug, Clone)]
pub struct DiskMirror {
    root: PathBuf,
    ext: String,
}

impl DiskMirror {
    /// Create a mirror rooted at `root` storing files with extension `ext`
    /// (leading dot included, e.g. `".png"`).
    pub fn new(root: PathBuf, ext: impl Into<String>) -> Self {
        Self {
            root,
            ext: ext.into(),
        }
    }

    /// Returns the mirror root directory.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    /// Constructs the path for a tile file.
    fn tile_file(&self, coord: TileCoord) -> PathBuf {
        self.root
            .join(coord.zoom.to_string())
            .join(coord.x.to_string())
            .join(format!("{}{}", coord.y, self.ext))
    }
}

impl TileMirror for DiskMirror {
    fn locator(&self, coord: TileCoord) -> String {
        self.tile_file(coord).to_string_lossy().into_owned()
    }

    fn load(&self, coord: TileCoord) -> BoxFuture<'_, Option<Bytes>> {
        let path = self.tile_file(coord);
        Box::pin(async move {
            tokio::task::spawn_blocking(move || match std::fs::read(&path) {
                Ok(bytes) => Some(Bytes::from(bytes)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "mirror read failed");
                    None
                }
            })
            .await
            .ok()
            .flatten()
        })
    }

    fn store(&self, coord: TileCoord, bytes: Bytes) -> BoxFuture<'_, Result<(), MirrorError>> {
        let path = self.tile_file(coord);
        Box::pin(async move {
            tokio::task::spawn_blocking(move || {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent).map_err(|e| MirrorError::Io {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                }
                std::fs::write(&path, &bytes).map_err(|e| MirrorError::Io { path, source: e })
            })
            .await
            .map_err(|e| MirrorError::Interrupted(e.to_string()))?
        })
    }

    fn clear(&self) -> BoxFuture<'_, Result<(), MirrorError>> {
        let root = self.root.clone();
        Box::pin(async move {
            tokio::task::spawn_blocking(move || match std::fs::remove_dir_all(&root) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(MirrorError::Io {
                    path: root,
                    source: e,
                }),
            })
            .await
            .map_err(|e| MirrorError::Interrupted(e.to_string()))?
        })
    }
}
