//! FGOrtho CLI - Command-line interface
//!
//! This binary downloads orthophoto scenery textures for FlightGear. Give
//! it a bucket index or a lon/lat pair and it fetches the bucket's imagery
//! from the chosen provider and writes it into the scenery layout.

mod error;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use error::CliError;
use fgortho::bucket::{Bucket, WidthTable};
use fgortho::download::BucketDownloader;
use fgortho::fetch::ReqwestFetch;
use fgortho::grid::{GridConfig, DEFAULT_TILE_HEIGHT_PX};
use fgortho::provider::ProviderKind;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProviderArg {
    /// ArcGIS World Imagery (default, covers the whole world)
    Arcgis,
    /// PNOA aerial imagery (Spain)
    Pnoa,
    /// USGS imagery (United States)
    Usgs,
    /// Geoportal orthophotos (Poland, tiles capped at 1024 px)
    GeoportalPl,
    /// Bayern DOP80 orthophotos (Germany, tiles capped at 4000 px)
    BayernDop80,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Arcgis => ProviderKind::ArcGis,
            ProviderArg::Pnoa => ProviderKind::Pnoa,
            ProviderArg::Usgs => ProviderKind::Usgs,
            ProviderArg::GeoportalPl => ProviderKind::GeoportalPl,
            ProviderArg::BayernDop80 => ProviderKind::BayernDop80,
        }
    }
}

#[derive(Parser)]
#[command(name = "fgortho")]
#[command(version)]
#[command(about = "Download photoscenery for a bucket. Provide either index OR lon and lat")]
struct Args {
    /// FG bucket index to download. It has preference over lon and lat
    #[arg(long)]
    index: Option<u32>,

    /// Longitude included inside the bucket to download
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Latitude included inside the bucket to download
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Print bucket information and exit
    #[arg(long)]
    info_only: bool,

    /// Tile height in pixels. Width is scaled to keep the bucket's aspect
    #[arg(long, default_value_t = DEFAULT_TILE_HEIGHT_PX, value_parser = clap::value_parser!(u32).range(1..))]
    theight: u32,

    /// Number of grid columns to split the bucket into
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    cols: u32,

    /// Number of grid rows. Defaults to --cols
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    rows: Option<u32>,

    /// Name of the image provider
    #[arg(long, value_enum, default_value = "arcgis")]
    provider: ProviderArg,

    /// Do not download anything, but show what would be downloaded
    #[arg(long)]
    dry_run: bool,

    /// Overwrite the orthophoto if it already exists
    #[arg(long)]
    overwrite: bool,

    /// Be verbose
    #[arg(short, long)]
    verbose: bool,

    /// Scenery directory, for the output
    #[arg(long, default_value = ".")]
    scenery_folder: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(error) = run(args).await {
        error.exit();
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    fgortho::logging::init(args.verbose).map_err(|e| CliError::Logging(e.to_string()))?;

    let table = WidthTable::modern();
    let bucket = resolve_bucket(&args, &table)?;
    println!("Bucket: {}. Index: {}", bucket.bounds(&table), bucket.index());

    if args.info_only {
        return Ok(());
    }

    let transport = ReqwestFetch::new().map_err(CliError::Transport)?;
    let grid = GridConfig::new()
        .with_cols(args.cols)
        .with_rows(args.rows.unwrap_or(args.cols))
        .with_tile_height_px(args.theight);
    let downloader = BucketDownloader::new(transport, ProviderKind::from(args.provider).create())
        .with_grid(grid)
        .with_overwrite(args.overwrite)
        .with_dry_run(args.dry_run);

    let report = downloader.download(&bucket, &args.scenery_folder).await?;
    if report.dry_run {
        println!(
            "Dry run: planned {} tiles for {}",
            report.tile_count,
            report.output.display()
        );
    } else {
        println!("Saved {} ({} tiles)", report.output.display(), report.tile_count);
    }
    Ok(())
}

/// Resolves the bucket from the user input. An index wins over lon/lat.
fn resolve_bucket(args: &Args, table: &WidthTable) -> Result<Bucket, CliError> {
    if let Some(index) = args.index {
        return Ok(Bucket::from_index(index, table)?);
    }
    if let (Some(lon), Some(lat)) = (args.lon, args.lat) {
        return Ok(Bucket::from_lon_lat(lon, lat, table)?);
    }
    Err(CliError::MissingBucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_resolve_by_lon_lat() {
        let table = WidthTable::modern();
        let args = parse(&["fgortho", "--lon", "-3.7", "--lat", "40.4"]);
        let bucket = resolve_bucket(&args, &table).unwrap();
        assert_eq!(bucket.index(), 2891929);
    }

    #[test]
    fn test_resolve_by_index_wins() {
        let table = WidthTable::modern();
        let args = parse(&[
            "fgortho", "--index", "2891929", "--lon", "151.2", "--lat", "-33.9",
        ]);
        let bucket = resolve_bucket(&args, &table).unwrap();
        assert_eq!(bucket.lon(), -4);
        assert_eq!(bucket.lat(), 40);
    }

    #[test]
    fn test_missing_bucket_input() {
        let table = WidthTable::modern();
        let args = parse(&["fgortho", "--info-only"]);
        match resolve_bucket(&args, &table) {
            Err(CliError::MissingBucket) => {}
            other => panic!("expected missing bucket error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_lon_without_lat_is_missing() {
        let table = WidthTable::modern();
        let args = parse(&["fgortho", "--lon", "-3.7"]);
        assert!(matches!(
            resolve_bucket(&args, &table),
            Err(CliError::MissingBucket)
        ));
    }

    #[test]
    fn test_provider_flag_values() {
        let args = parse(&["fgortho", "--provider", "bayern-dop80", "--index", "0"]);
        assert!(matches!(args.provider, ProviderArg::BayernDop80));
        let args = parse(&["fgortho", "--provider", "geoportal-pl", "--index", "0"]);
        assert!(matches!(args.provider, ProviderArg::GeoportalPl));
    }

    #[test]
    fn test_defaults_match_the_classic_tool() {
        let args = parse(&["fgortho", "--index", "0"]);
        assert_eq!(args.theight, 2048);
        assert_eq!(args.cols, 1);
        assert_eq!(args.rows, None);
        assert!(matches!(args.provider, ProviderArg::Arcgis));
        assert!(!args.dry_run);
        assert!(!args.overwrite);
        assert_eq!(args.scenery_folder, PathBuf::from("."));
    }
}
