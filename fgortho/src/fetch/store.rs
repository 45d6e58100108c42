//! Tile spooling.
//!
//! Fetched tile bodies go to a per-download temporary directory rather
//! than memory. The directory and everything in it is removed when the
//! store drops, so an abandoned download leaves nothing behind.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::grid::TileSpec;

use super::FetchError;

/// A fetched tile spooled to disk.
#[derive(Debug, Clone)]
pub struct FetchedTile {
    /// The plan entry this tile satisfies.
    pub spec: TileSpec,
    /// Spool file holding the raw body.
    pub path: PathBuf,
}

/// Temporary holding area for fetched tiles.
///
/// One store serves one bucket download. Spool files are named by grid
/// position, so re-spooling a position overwrites the previous body.
#[derive(Debug)]
pub struct TileStore {
    dir: TempDir,
}

impl TileStore {
    /// Creates a fresh spool directory.
    pub fn new() -> Result<Self, FetchError> {
        let dir = tempfile::tempdir().map_err(|source| FetchError::Spool { source })?;
        debug!(dir = %dir.path().display(), "created tile spool");
        Ok(Self { dir })
    }

    /// Directory the spool files live in.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a tile body to the spool.
    pub async fn spool(&self, spec: &TileSpec, body: &[u8]) -> Result<FetchedTile, FetchError> {
        let path = self
            .dir
            .path()
            .join(format!("r{}_c{}", spec.row, spec.col));
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| FetchError::Spool { source })?;
        Ok(FetchedTile { spec: *spec, path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::TileBounds;

    fn spec(row: u32, col: u32) -> TileSpec {
        TileSpec {
            row,
            col,
            bounds: TileBounds {
                min_lon: 0.0,
                min_lat: 0.0,
                max_lon: 0.125,
                max_lat: 0.125,
            },
            width_px: 64,
            height_px: 64,
        }
    }

    #[tokio::test]
    async fn test_spool_writes_body() {
        let store = TileStore::new().unwrap();
        let tile = store.spool(&spec(1, 2), b"payload").await.unwrap();
        assert_eq!(std::fs::read(&tile.path).unwrap(), b"payload");
        assert!(tile.path.starts_with(store.path()));
        assert_eq!(tile.spec.row, 1);
        assert_eq!(tile.spec.col, 2);
    }

    #[tokio::test]
    async fn test_positions_spool_to_distinct_files() {
        let store = TileStore::new().unwrap();
        let a = store.spool(&spec(0, 0), b"a").await.unwrap();
        let b = store.spool(&spec(0, 1), b"b").await.unwrap();
        assert_ne!(a.path, b.path);
        assert_eq!(std::fs::read(&a.path).unwrap(), b"a");
        assert_eq!(std::fs::read(&b.path).unwrap(), b"b");
    }

    #[tokio::test]
    async fn test_drop_removes_spool_dir() {
        let store = TileStore::new().unwrap();
        let tile = store.spool(&spec(0, 0), b"x").await.unwrap();
        let dir = store.path().to_path_buf();
        drop(store);
        assert!(!dir.exists());
        assert!(!tile.path.exists());
    }
}
