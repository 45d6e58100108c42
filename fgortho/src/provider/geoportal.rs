//! Geoportal orthophoto provider (Poland).
//!
//! The national ORTO raster service from geoportal.gov.pl, a WMS 1.3.0
//! endpoint queried in CRS:84 so the bbox stays lon,lat ordered.
//!
//! The service rejects requests taller than 1024 pixels, so grids fetched
//! through this provider should keep the tile height at or below that and
//! use more rows instead.
//!
//! # URL Pattern
//!
//! `{base}?REQUEST=GetMap&VERSION=1.3.0&TRANSPARENT=TRUE&LAYERS=RASTER&STYLES=&CRS=CRS:84&EXCEPTIONS=xml&BBOX={minLon},{minLat},{maxLon},{maxLat}&WIDTH={w}&HEIGHT={h}&FORMAT=image/png`

use crate::grid::TileBounds;
use crate::provider::ImageryProvider;

/// WMS endpoint of the national ORTO map service.
const GEOPORTAL_BASE_URL: &str =
    "https://mapy.geoportal.gov.pl/wss/service/img/guest/ORTO/MapServer/WMSServer";

/// Polish Geoportal orthophoto provider.
pub struct GeoportalProvider {
    base_url: String,
}

impl GeoportalProvider {
    /// Creates a provider against the public geoportal.gov.pl endpoint.
    pub fn new() -> Self {
        Self {
            base_url: GEOPORTAL_BASE_URL.to_string(),
        }
    }

    /// Creates a provider with a custom endpoint (useful for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for GeoportalProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageryProvider for GeoportalProvider {
    fn tile_url(&self, bounds: &TileBounds, width_px: u32, height_px: u32) -> String {
        format!(
            "{}?REQUEST=GetMap&VERSION=1.3.0&TRANSPARENT=TRUE&LAYERS=RASTER&STYLES=\
             &CRS=CRS:84&EXCEPTIONS=xml&BBOX={},{},{},{}&WIDTH={}&HEIGHT={}&FORMAT=image/png",
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
        "Geoportal (Poland)"
    }
}
