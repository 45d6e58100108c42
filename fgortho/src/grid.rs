//! Tile grid planning.
//!
//! Splits a bucket's extent into an evenly spaced grid of imagery tiles and
//! fixes the pixel geometry each tile is requested at. The grid exists for
//! providers that cap the size of a single request: a bucket that would
//! need one oversized image can be fetched as several smaller tiles and
//! stitched back together.

use crate::bucket::{Bucket, WidthTable, BUCKET_HEIGHT_DEG};

/// Default tile height in pixels.
pub const DEFAULT_TILE_HEIGHT_PX: u32 = 2048;

/// Default grid columns and rows.
pub const DEFAULT_GRID_BANDS: u32 = 1;

/// Grid shape and pixel geometry for one bucket download.
///
/// # Example
///
/// ```
/// use fgortho::grid::GridConfig;
///
/// let config = GridConfig::new().with_cols(2).with_rows(2);
/// assert_eq!(config.cols(), 2);
/// assert_eq!(config.tile_height_px(), 2048);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    cols: u32,
    rows: u32,
    tile_height_px: u32,
}

impl GridConfig {
    /// Creates a single-tile grid at the default pixel height.
    pub fn new() -> Self {
        Self {
            cols: DEFAULT_GRID_BANDS,
            rows: DEFAULT_GRID_BANDS,
            tile_height_px: DEFAULT_TILE_HEIGHT_PX,
        }
    }

    /// Sets the number of grid columns. Must be at least 1.
    pub fn with_cols(mut self, cols: u32) -> Self {
        self.cols = cols;
        self
    }

    /// Sets the number of grid rows. Must be at least 1.
    pub fn with_rows(mut self, rows: u32) -> Self {
        self.rows = rows;
        self
    }

    /// Sets the requested tile height in pixels.
    pub fn with_tile_height_px(mut self, tile_height_px: u32) -> Self {
        self.tile_height_px = tile_height_px;
        self
    }

    /// Number of grid columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of grid rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Requested tile height in pixels.
    pub fn tile_height_px(&self) -> u32 {
        self.tile_height_px
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Geographic extent of one grid tile, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

/// One planned tile: its grid position, the extent it covers and the pixel
/// size to request it at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSpec {
    /// Grid row, 0 at the bucket's southern edge.
    pub row: u32,
    /// Grid column, 0 at the bucket's western edge.
    pub col: u32,
    /// Extent this tile covers.
    pub bounds: TileBounds,
    /// Requested width in pixels.
    pub width_px: u32,
    /// Requested height in pixels.
    pub height_px: u32,
}

/// Plans the tile grid for a bucket.
pub struct TileGrid {
    config: GridConfig,
}

impl TileGrid {
    /// Creates a planner for the given grid shape.
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    /// Splits the bucket into `cols x rows` tiles, row-major with row 0 at
    /// the southern edge.
    ///
    /// Every tile is requested at the same pixel size: the configured
    /// height, and a width scaled by the bucket's aspect so the composite
    /// keeps the bucket's shape. Interior edges are computed once and
    /// shared between neighbours, and the outer edges are the bucket's own
    /// bounds, so adjacent tiles meet exactly and the grid covers the
    /// bucket with no gaps.
    pub fn plan(&self, bucket: &Bucket, table: &WidthTable) -> Vec<TileSpec> {
        let bounds = bucket.bounds(table);
        let width_deg = bounds.max_lon - bounds.min_lon;
        let height_px = self.config.tile_height_px();
        let width_px = (f64::from(height_px) * width_deg / BUCKET_HEIGHT_DEG).round() as u32;

        let lon_edges = edges(bounds.min_lon, bounds.max_lon, self.config.cols());
        let lat_edges = edges(bounds.min_lat, bounds.max_lat, self.config.rows());

        let mut tiles =
            Vec::with_capacity(self.config.cols() as usize * self.config.rows() as usize);
        for row in 0..self.config.rows() {
            for col in 0..self.config.cols() {
                tiles.push(TileSpec {
                    row,
                    col,
                    bounds: TileBounds {
                        min_lon: lon_edges[col as usize],
                        min_lat: lat_edges[row as usize],
                        max_lon: lon_edges[col as usize + 1],
                        max_lat: lat_edges[row as usize + 1],
                    },
                    width_px,
                    height_px,
                });
            }
        }
        tiles
    }
}

/// Evenly spaced edge positions from `min` to `max`, both included.
fn edges(min: f64, max: f64, bands: u32) -> Vec<f64> {
    let step = (max - min) / f64::from(bands);
    let mut edges: Vec<f64> = (0..bands).map(|k| min + f64::from(k) * step).collect();
    edges.push(max);
    edges
}
