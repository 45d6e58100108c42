//! USGS imagery provider (United States).
//!
//! The USGSImageryOnly base map from The National Map, exported through the
//! same MapServer `export` interface as ArcGIS. Public domain within the
//! United States; see the USGS terms at
//! <https://www.usgs.gov/faqs/what-are-terms-uselicensing-map-services-and-data-national-map>.
//!
//! # URL Pattern
//!
//! `{base}?bbox={minLon},{minLat},{maxLon},{maxLat}&bboxSR=4326&size={w},{h}&imageSR=4326&format=png24&f=image`

use crate::grid::TileBounds;
use crate::provider::ImageryProvider;

/// Export endpoint of the USGSImageryOnly map service.
const USGS_BASE_URL: &str =
    "https://basemap.nationalmap.gov/arcgis/rest/services/USGSImageryOnly/MapServer/export";

/// USGS imagery provider.
pub struct UsgsProvider {
    base_url: String,
}

impl UsgsProvider {
    /// Creates a provider against the public National Map endpoint.
    pub fn new() -> Self {
        Self {
            base_url: USGS_BASE_URL.to_string(),
        }
    }

    /// Creates a provider with a custom endpoint (useful for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for UsgsProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageryProvider for UsgsProvider {
    fn tile_url(&self, bounds: &TileBounds, width_px: u32, height_px: u32) -> String {
        format!(
            "{}?bbox={},{},{},{}&bboxSR=4326&size={},{}&imageSR=4326&format=png24&f=image",
            self.base_url,
            bounds.min_lon,
            bounds.min_lat,
            bounds.max_lon,
            bounds.max_lat,
            width_px,
            height_px
        )
    }

    fn name(&self) -> &str {
        "USGS Imagery (United States)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_construction() {
        let provider = UsgsProvider::new();
        let bounds = TileBounds {
            min_lon: -122.5,
            min_lat: 37.625,
            max_lon: -122.25,
            max_lat: 37.75,
        };
        assert_eq!(
            provider.tile_url(&bounds, 4096, 2048),
            "https://basemap.nationalmap.gov/arcgis/rest/services/USGSImageryOnly/MapServer/export\
             ?bbox=-122.5,37.625,-122.25,37.75&bboxSR=4326&size=4096,2048&imageSR=4326\
             &format=png24&f=image"
        );
    }
}
