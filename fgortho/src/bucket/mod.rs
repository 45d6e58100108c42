//! FlightGear bucket addressing and scenery paths.
//!
//! Converts between the three representations of a scenery bucket: a packed
//! scalar index, a geographic point, and degree bounds. The width of a
//! bucket depends on latitude through a [`WidthTable`], which every
//! conversion takes explicitly so the same address algebra serves both the
//! current and the historical width law.
//!
//! # Example
//!
//! ```
//! use fgortho::bucket::{Bucket, WidthTable};
//!
//! let table = WidthTable::modern();
//! let bucket = Bucket::from_lon_lat(-3.7, 40.4, &table)?;
//! assert_eq!(bucket.index(), 2891929);
//! assert_eq!(bucket.base_path().0, "w010n40");
//! assert_eq!(bucket.bounds(&table).min_lat, 40.375);
//! # Ok::<(), fgortho::bucket::BucketError>(())
//! ```

mod path;
mod types;
mod width;

pub use types::{
    Bucket, BucketBounds, BucketError, BUCKET_HEIGHT_DEG, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON,
};
pub use width::WidthTable;
