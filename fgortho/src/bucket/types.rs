//! Bucket addressing.
//!
//! A bucket is FlightGear's unit of scenery: a cell 0.125 degrees tall and,
//! depending on latitude, between 0.125 and 12 degrees wide. A bucket is
//! addressed either by geographic coordinates or by a packed scalar index:
//!
//! ```text
//! index = ((lon + 180) << 14) | ((lat + 90) << 6) | (y << 3) | x
//! ```
//!
//! `lon`/`lat` are the degree origin of the containing cell, `y` the
//! 0.125 degree row within the degree band and `x` the column within the
//! cell. Both directions of the mapping are exact, which makes the index a
//! stable identity for file names and caches.

use std::fmt;

use thiserror::Error;

use super::width::WidthTable;

/// Bucket height in degrees. Fixed for all latitudes.
pub const BUCKET_HEIGHT_DEG: f64 = 0.125;

/// Bucket rows per one-degree latitude band.
const ROWS_PER_CELL: u8 = 8;

/// Western longitude limit.
pub const MIN_LON: f64 = -180.0;
/// Eastern longitude limit.
pub const MAX_LON: f64 = 180.0;
/// Southern latitude limit.
pub const MIN_LAT: f64 = -90.0;
/// Northern latitude limit. Exclusive: buckets grow northward from their
/// origin, so 90 itself is not a valid origin.
pub const MAX_LAT: f64 = 90.0;

/// Errors from bucket addressing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BucketError {
    /// The packed index does not decode to a self-consistent bucket.
    #[error("index {0} does not decode to a valid bucket")]
    InvalidIndex(u32),
    /// Latitude outside `[-90, 90)`.
    #[error("latitude {0} is outside [-90, 90)")]
    LatitudeOutOfRange(f64),
    /// Longitude outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A scenery bucket address.
///
/// Immutable once built; construct one with [`Bucket::from_lon_lat`] or
/// [`Bucket::from_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bucket {
    /// West edge of the containing cell, whole degrees.
    lon: i32,
    /// South edge of the containing degree band, whole degrees.
    lat: i32,
    /// Column within the cell.
    x: u8,
    /// Row within the degree band, 0..8.
    y: u8,
}

impl Bucket {
    /// Builds the bucket containing the given geographic point.
    ///
    /// The cell origin is the width-aligned longitude at or west of `lon`,
    /// clamped to the -180 meridian, and the row and column place the point
    /// within the cell.
    ///
    /// # Errors
    ///
    /// Fails when the point lies outside `[-180, 180]` x `[-90, 90)`.
    pub fn from_lon_lat(lon: f64, lat: f64, table: &WidthTable) -> Result<Self, BucketError> {
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(BucketError::LongitudeOutOfRange(lon));
        }
        if !(MIN_LAT..MAX_LAT).contains(&lat) {
            return Err(BucketError::LatitudeOutOfRange(lat));
        }

        let lat_base = lat.floor();
        let y = ((lat - lat_base) * f64::from(ROWS_PER_CELL)) as u8;
        let width = table.width_for_latitude(lat_base);
        let lon_base = ((lon / width).floor() * width).floor().max(MIN_LON);
        let x = ((lon - lon_base) / width).floor() as u8;

        Ok(Self {
            lon: lon_base as i32,
            lat: lat_base as i32,
            x,
            y,
        })
    }

    /// Decodes a packed scalar index.
    ///
    /// # Errors
    ///
    /// Fails with [`BucketError::InvalidIndex`] when the unpacked fields do
    /// not describe a bucket the given table can produce: origin out of
    /// range, a column beyond the cell's column count, or a wide polar cell
    /// whose origin is not aligned to the bucket width.
    pub fn from_index(index: u32, table: &WidthTable) -> Result<Self, BucketError> {
        let lon = (index >> 14) as i32 - 180;
        let lat = ((index >> 6) & 0xff) as i32 - 90;
        let y = ((index >> 3) & 0x7) as u8;
        let x = (index & 0x7) as u8;

        if !(-180..=180).contains(&lon) || !(-90..90).contains(&lat) {
            return Err(BucketError::InvalidIndex(index));
        }

        let width = table.width_for_latitude(f64::from(lat));
        if x >= WidthTable::columns_for_width(width) {
            return Err(BucketError::InvalidIndex(index));
        }
        if width > 1.0 {
            // The -180 cell stays valid even when the width does not divide
            // 180 evenly, because western origins clamp to the meridian.
            let span = width as i32;
            if lon % span != 0 && lon != -180 {
                return Err(BucketError::InvalidIndex(index));
            }
        }

        Ok(Self { lon, lat, x, y })
    }

    /// Packs the address into its scalar index.
    pub fn index(&self) -> u32 {
        ((self.lon + 180) as u32) << 14
            | ((self.lat + 90) as u32) << 6
            | u32::from(self.y) << 3
            | u32::from(self.x)
    }

    /// West edge of the containing cell, whole degrees.
    pub fn lon(&self) -> i32 {
        self.lon
    }

    /// South edge of the containing degree band, whole degrees.
    pub fn lat(&self) -> i32 {
        self.lat
    }

    /// Column within the cell.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Row within the degree band.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Geographic extent of this bucket under the given width table.
    pub fn bounds(&self, table: &WidthTable) -> BucketBounds {
        let width = table.width_for_latitude(f64::from(self.lat));
        let min_lat = f64::from(self.lat) + BUCKET_HEIGHT_DEG * f64::from(self.y);
        let min_lon = f64::from(self.lon) + width * f64::from(self.x);
        BucketBounds {
            min_lon,
            min_lat,
            max_lon: min_lon + width,
            max_lat: min_lat + BUCKET_HEIGHT_DEG,
        }
    }
}

/// Geographic extent of a bucket, degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BucketBounds {
    /// Center point as `(lon, lat)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }
}

impl fmt::Display for BucketBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (center_lon, center_lat) = self.center();
        write!(
            f,
            "lat {}..{}, lon {}..{}, center ({}, {})",
            self.min_lat, self.max_lat, self.min_lon, self.max_lon, center_lon, center_lat
        )
    }
}
