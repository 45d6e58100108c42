//! Bucket download orchestration.
//!
//! [`BucketDownloader`] runs the whole pipeline for one bucket: plan the
//! tile grid, fetch every tile concurrently, stitch the results and write
//! the orthophoto into the FlightGear scenery layout. Any tile failing
//! fails the bucket; a partial orthophoto is never written.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{info, instrument, warn};

use crate::bucket::{Bucket, WidthTable};
use crate::compose::{self, ComposeError, Compositor};
use crate::fetch::{FetchError, HttpFetch, TileFetcher, TileStore};
use crate::grid::{GridConfig, TileGrid};
use crate::provider::ImageryProvider;

/// Directory under the scenery root that holds orthophotos.
pub const ORTHOPHOTOS_DIR: &str = "Orthophotos";

/// Errors downloading one bucket.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The output file already exists and overwrite is off.
    #[error("orthophoto already exists: {path}")]
    OutputExists { path: PathBuf },
    /// The scenery directory could not be created.
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// One tile of the grid failed to download.
    #[error("tile at row {row}, col {col} failed: {source}")]
    TileFetch {
        row: u32,
        col: u32,
        #[source]
        source: FetchError,
    },
    /// The tile spool could not be set up.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Stitching or writing the orthophoto failed.
    #[error(transparent)]
    Compose(#[from] ComposeError),
    /// A pipeline task failed to run to completion.
    #[error("download task failed: {0}")]
    Task(String),
}

/// Summary of a completed bucket download.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    /// Scalar index of the downloaded bucket.
    pub index: u32,
    /// Where the orthophoto was (or, for a dry run, would be) written.
    pub output: PathBuf,
    /// Number of tiles in the grid.
    pub tile_count: usize,
    /// True when no requests were made and nothing was written.
    pub dry_run: bool,
}

/// Downloads one bucket's orthophoto end to end.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use std::sync::Arc;
/// use fgortho::bucket::{Bucket, WidthTable};
/// use fgortho::download::BucketDownloader;
/// use fgortho::fetch::ReqwestFetch;
/// use fgortho::provider::ProviderKind;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let table = WidthTable::modern();
/// let bucket = Bucket::from_lon_lat(-3.7, 40.4, &table)?;
/// let downloader = BucketDownloader::new(ReqwestFetch::new()?, ProviderKind::ArcGis.create());
/// let report = downloader.download(&bucket, Path::new("/scenery")).await?;
/// println!("saved {}", report.output.display());
/// # Ok(())
/// # }
/// ```
pub struct BucketDownloader<C: HttpFetch + Clone + 'static> {
    transport: C,
    provider: Arc<dyn ImageryProvider>,
    table: WidthTable,
    grid: GridConfig,
    overwrite: bool,
    dry_run: bool,
}

impl<C: HttpFetch + Clone + 'static> BucketDownloader<C> {
    /// Creates a downloader with a single-tile grid and the modern width
    /// table.
    pub fn new(transport: C, provider: Arc<dyn ImageryProvider>) -> Self {
        Self {
            transport,
            provider,
            table: WidthTable::modern(),
            grid: GridConfig::new(),
            overwrite: false,
            dry_run: false,
        }
    }

    /// Sets the tile grid shape and pixel geometry.
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the bucket width table.
    pub fn with_width_table(mut self, table: WidthTable) -> Self {
        self.table = table;
        self
    }

    /// Replaces an existing orthophoto instead of refusing to.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Plans and logs the download without requesting or writing anything.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Where the bucket's orthophoto lives under `scenery_root`.
    pub fn output_path(&self, bucket: &Bucket, scenery_root: &Path) -> PathBuf {
        let (parent, cell) = bucket.base_path();
        scenery_root
            .join(ORTHOPHOTOS_DIR)
            .join(parent)
            .join(cell)
            .join(format!("{}.png", bucket.index()))
    }

    /// Downloads the bucket's orthophoto into the scenery layout.
    #[instrument(skip_all, fields(index = bucket.index(), provider = self.provider.name()))]
    pub async fn download(
        &self,
        bucket: &Bucket,
        scenery_root: &Path,
    ) -> Result<DownloadReport, DownloadError> {
        let output = self.output_path(bucket, scenery_root);

        if !self.dry_run {
            if let Some(dir) = output.parent() {
                tokio::fs::create_dir_all(dir)
                    .await
                    .map_err(|source| DownloadError::CreateDir {
                        path: dir.to_path_buf(),
                        source,
                    })?;
            }
            if !self.overwrite && output.exists() {
                return Err(DownloadError::OutputExists { path: output });
            }
        }

        let planned = TileGrid::new(self.grid).plan(bucket, &self.table);
        let tile_count = planned.len();
        info!(
            tiles = tile_count,
            cols = self.grid.cols(),
            rows = self.grid.rows(),
            "planned tile grid"
        );

        let store = Arc::new(TileStore::new()?);
        let fetcher = Arc::new(
            TileFetcher::new(self.transport.clone(), Arc::clone(&self.provider))
                .with_dry_run(self.dry_run),
        );

        let mut downloads = JoinSet::new();
        for spec in planned {
            let fetcher = Arc::clone(&fetcher);
            let store = Arc::clone(&store);
            downloads.spawn(async move {
                fetcher
                    .fetch(&spec, &store)
                    .await
                    .map_err(|source| DownloadError::TileFetch {
                        row: spec.row,
                        col: spec.col,
                        source,
                    })
            });
        }

        let mut tiles = Vec::with_capacity(tile_count);
        while let Some(result) = downloads.join_next().await {
            match result {
                Ok(Ok(tile)) => tiles.push(tile),
                Ok(Err(error)) => {
                    warn!(error = %error, "tile download failed, aborting bucket");
                    downloads.abort_all();
                    return Err(error);
                }
                Err(join_error) if join_error.is_cancelled() => {}
                Err(join_error) => return Err(DownloadError::Task(join_error.to_string())),
            }
        }

        if self.dry_run {
            info!(tiles = tile_count, "dry run complete, nothing written");
            return Ok(DownloadReport {
                index: bucket.index(),
                output,
                tile_count,
                dry_run: true,
            });
        }

        info!(tiles = tiles.len(), "stitching orthophoto");
        let compositor = Compositor::new(self.grid.cols(), self.grid.rows());
        let output_path = output.clone();
        tokio::task::spawn_blocking(move || {
            let image = compositor.compose(&tiles)?;
            compose::write_png(image, &output_path)
        })
        .await
        .map_err(|join_error| DownloadError::Task(join_error.to_string()))??;

        info!(output = %output.display(), "orthophoto saved");
        Ok(DownloadReport {
            index: bucket.index(),
            output,
            tile_count,
            dry_run: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{HttpResponse, MockFetch};
    use crate::provider::ProviderKind;
    use image::{Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn png_body(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([120, 130, 140, 255]));
        let mut buffer = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn madrid() -> Bucket {
        Bucket::from_lon_lat(-3.7, 40.4, &WidthTable::modern()).unwrap()
    }

    fn downloader(mock: MockFetch) -> BucketDownloader<MockFetch> {
        BucketDownloader::new(mock, ProviderKind::ArcGis.create())
            .with_grid(GridConfig::new().with_cols(2).with_rows(2).with_tile_height_px(4))
    }

    #[test]
    fn test_output_path_follows_the_scenery_layout() {
        let downloader = downloader(MockFetch::ok("image/png", Vec::new()));
        let path = downloader.output_path(&madrid(), Path::new("/scenery"));
        assert_eq!(
            path,
            PathBuf::from("/scenery/Orthophotos/w010n40/w003n40/2891929.png")
        );
    }

    #[tokio::test]
    async fn test_download_writes_the_orthophoto() {
        let scenery = TempDir::new().unwrap();
        let downloader = downloader(MockFetch::ok("image/png", png_body(8, 4)));

        let report = downloader.download(&madrid(), scenery.path()).await.unwrap();
        assert_eq!(report.index, 2891929);
        assert_eq!(report.tile_count, 4);
        assert!(!report.dry_run);

        let expected = scenery
            .path()
            .join("Orthophotos/w010n40/w003n40/2891929.png");
        assert_eq!(report.output, expected);
        let written = image::open(&expected).unwrap();
        assert_eq!(written.width(), 16);
        assert_eq!(written.height(), 8);
        assert_eq!(written.color(), image::ColorType::Rgb8);
    }

    #[tokio::test]
    async fn test_existing_output_is_not_replaced() {
        let scenery = TempDir::new().unwrap();
        let downloader = downloader(MockFetch::ok("image/png", png_body(8, 4)));
        let output = downloader.output_path(&madrid(), scenery.path());
        std::fs::create_dir_all(output.parent().unwrap()).unwrap();
        std::fs::write(&output, b"sentinel").unwrap();

        match downloader.download(&madrid(), scenery.path()).await {
            Err(DownloadError::OutputExists { path }) => assert_eq!(path, output),
            other => panic!("expected output exists error, got {:?}", other),
        }
        assert_eq!(std::fs::read(&output).unwrap(), b"sentinel");
    }

    #[tokio::test]
    async fn test_overwrite_replaces_existing_output() {
        let scenery = TempDir::new().unwrap();
        let downloader =
            downloader(MockFetch::ok("image/png", png_body(8, 4))).with_overwrite(true);
        let output = downloader.output_path(&madrid(), scenery.path());
        std::fs::create_dir_all(output.parent().unwrap()).unwrap();
        std::fs::write(&output, b"sentinel").unwrap();

        downloader.download(&madrid(), scenery.path()).await.unwrap();
        let written = std::fs::read(&output).unwrap();
        assert_eq!(&written[..4], b"\x89PNG");
    }

    #[tokio::test]
    async fn test_failed_tile_aborts_the_bucket() {
        let scenery = TempDir::new().unwrap();
        let downloader = downloader(MockFetch {
            response: Ok(HttpResponse {
                status: 503,
                content_type: Some("image/png".to_string()),
                body: Vec::new(),
            }),
        });

        match downloader.download(&madrid(), scenery.path()).await {
            Err(DownloadError::TileFetch {
                source: FetchError::Status { status: 503 },
                ..
            }) => {}
            other => panic!("expected tile fetch error, got {:?}", other),
        }
        assert!(!downloader.output_path(&madrid(), scenery.path()).exists());
    }

    #[tokio::test]
    async fn test_corrupt_tile_body_fails_the_bucket() {
        let scenery = TempDir::new().unwrap();
        let downloader = downloader(MockFetch::ok("image/png", b"not a png".to_vec()));

        match downloader.download(&madrid(), scenery.path()).await {
            Err(DownloadError::Compose(ComposeError::CorruptTile { .. })) => {}
            other => panic!("expected compose error, got {:?}", other),
        }
        assert!(!downloader.output_path(&madrid(), scenery.path()).exists());
    }

    #[tokio::test]
    async fn test_dry_run_requests_and_writes_nothing() {
        let scenery = TempDir::new().unwrap();
        // The mock fails every request; a passing dry run proves none were
        // made.
        let downloader = downloader(MockFetch {
            response: Err("must not be called".to_string()),
        })
        .with_dry_run(true);

        let report = downloader.download(&madrid(), scenery.path()).await.unwrap();
        assert!(report.dry_run);
        assert_eq!(report.tile_count, 4);
        assert!(!scenery.path().join(ORTHOPHOTOS_DIR).exists());
    }
}
