//! ArcGIS World Imagery provider.
//!
//! Esri's global satellite and aerial mosaic, exported through the classic
//! MapServer `export` endpoint. Covers the whole world and needs no API
//! key, which makes it the default provider. Esri's master agreement
//! restricts bulk use; see <https://www.esri.com/en-us/legal/terms/full-master-agreement>.
//!
//! # URL Pattern
//!
//! `{base}?bbox={minLon},{minLat},{maxLon},{maxLat}&bboxSR=4326&size={w},{h}&imageSR=4326&format=png24&f=image`

use crate::grid::TileBounds;
use crate::provider::ImageryProvider;

/// Export endpoint of the World_Imagery map service.
const ARCGIS_BASE_URL: &str =
    "http://services.arcgisonline.com/arcgis/rest/services/World_Imagery/MapServer/export";

/// ArcGIS World Imagery provider.
pub struct ArcGisProvider {
    base_url: String,
}

impl ArcGisProvider {
    /// Creates a provider against the public ArcGIS Online endpoint.
    pub fn new() -> Self {
        Self {
            base_url: ARCGIS_BASE_URL.to_string(),
        }
    }

    /// Creates a provider with a custom endpoint (useful for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for ArcGisProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageryProvider for ArcGisProvider {
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
        "ArcGIS World Imagery"
    }
}
