//! FGOrtho - Orthophoto scenery downloads for FlightGear
//!
//! This library turns a FlightGear bucket into a photo texture: it resolves
//! the bucket's address and extent, plans a grid of imagery requests against
//! a WMS or tile export service, fetches the tiles concurrently and stitches
//! them into a single PNG in the scenery `Orthophotos/` layout.
//!
//! # High-Level API
//!
//! ```no_run
//! use std::path::Path;
//! use fgortho::bucket::{Bucket, WidthTable};
//! use fgortho::download::BucketDownloader;
//! use fgortho::fetch::ReqwestFetch;
//! use fgortho::provider::ProviderKind;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let table = WidthTable::modern();
//! let bucket = Bucket::from_lon_lat(-3.7, 40.4, &table)?;
//!
//! let downloader = BucketDownloader::new(ReqwestFetch::new()?, ProviderKind::ArcGis.create());
//! let report = downloader.download(&bucket, Path::new("/fg/scenery")).await?;
//! println!("saved {} from {} tiles", report.output.display(), report.tile_count);
//! # Ok(())
//! # }
//! ```

pub mod bucket;
pub mod compose;
pub mod download;
pub mod fetch;
pub mod grid;
pub mod logging;
pub mod provider;

/// Version of the FGOrtho library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
