//! Tile composition.
//!
//! Stitches fetched tiles back into one orthophoto. Tiles are decoded from
//! the spool, validated against the first tile's pixel size and placed on an
//! RGBA canvas by grid position, with row 0 at the bottom of the image. The
//! finished canvas is written out as an RGB PNG.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbaImage};
use thiserror::Error;
use tracing::debug;

use crate::fetch::FetchedTile;

/// Errors stitching and writing an orthophoto.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The tile set does not match the grid shape.
    #[error("expected {expected} tiles, got {found}")]
    TileCount { expected: usize, found: usize },
    /// A spooled tile could not be decoded as an image.
    #[error("tile at row {row}, col {col} is not a readable image: {source}")]
    CorruptTile {
        row: u32,
        col: u32,
        #[source]
        source: image::ImageError,
    },
    /// A tile decoded to a different pixel size than the rest of the grid.
    #[error(
        "tile at row {row}, col {col} is {found_width}x{found_height}, \
         expected {expected_width}x{expected_height}"
    )]
    InconsistentTileSize {
        row: u32,
        col: u32,
        expected_width: u32,
        expected_height: u32,
        found_width: u32,
        found_height: u32,
    },
    /// The composed image could not be encoded as PNG.
    #[error("failed to encode orthophoto: {source}")]
    Encode {
        #[source]
        source: image::ImageError,
    },
    /// The encoded PNG could not be written to disk.
    #[error("failed to write orthophoto: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },
}

/// Stitches a complete tile grid into one image.
pub struct Compositor {
    cols: u32,
    rows: u32,
}

impl Compositor {
    /// Creates a compositor for a `cols x rows` grid.
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Composes the fetched tiles into one RGBA image.
    ///
    /// The slice must hold exactly one tile per grid cell, in any order.
    /// The first tile fixes the pixel size every other tile must match;
    /// providers that silently rescale a request would otherwise smear the
    /// composite.
    pub fn compose(&self, tiles: &[FetchedTile]) -> Result<RgbaImage, ComposeError> {
        let expected = self.cols as usize * self.rows as usize;
        if tiles.len() != expected {
            return Err(ComposeError::TileCount {
                expected,
                found: tiles.len(),
            });
        }

        let first = decode_tile(&tiles[0])?;
        let (tile_width, tile_height) = (first.width(), first.height());
        let mut canvas = RgbaImage::new(tile_width * self.cols, tile_height * self.rows);
        debug!(
            width = canvas.width(),
            height = canvas.height(),
            "composing orthophoto"
        );

        for tile in tiles {
            let image = decode_tile(tile)?;
            if image.width() != tile_width || image.height() != tile_height {
                return Err(ComposeError::InconsistentTileSize {
                    row: tile.spec.row,
                    col: tile.spec.col,
                    expected_width: tile_width,
                    expected_height: tile_height,
                    found_width: image.width(),
                    found_height: image.height(),
                });
            }
            // Row 0 is the southern edge, which sits at the bottom of the
            // image.
            let x_offset = tile.spec.col * tile_width;
            let y_offset = (self.rows - 1 - tile.spec.row) * tile_height;
            place_tile(&mut canvas, &image, x_offset, y_offset);
        }
        Ok(canvas)
    }
}

/// Writes a composed image to `path` as an RGB PNG, replacing any existing
/// file. Alpha is dropped; FlightGear expects opaque orthophotos.
pub fn write_png(image: RgbaImage, path: &Path) -> Result<(), ComposeError> {
    let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
    let mut buffer = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|source| ComposeError::Encode { source })?;
    fs::write(path, &buffer).map_err(|source| ComposeError::Write { source })?;
    Ok(())
}

/// Decodes a spooled tile into an RGBA image.
fn decode_tile(tile: &FetchedTile) -> Result<RgbaImage, ComposeError> {
    let corrupt = |source| ComposeError::CorruptTile {
        row: tile.spec.row,
        col: tile.spec.col,
        source,
    };
    let data = fs::read(&tile.path).map_err(|e| corrupt(image::ImageError::IoError(e)))?;
    let image = image::load_from_memory(&data).map_err(corrupt)?;
    Ok(image.to_rgba8())
}

/// Places a tile onto the canvas at the given pixel offset.
fn place_tile(canvas: &mut RgbaImage, tile: &RgbaImage, x_offset: u32, y_offset: u32) {
    for y in 0..tile.height() {
        for x in 0..tile.width() {
            canvas.put_pixel(x_offset + x, y_offset + y, *tile.get_pixel(x, y));
        }
    }
}
