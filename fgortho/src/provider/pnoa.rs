//! PNOA orthophoto provider (Spain).
//!
//! The Plan Nacional de Ortofotografia Aerea, served as a WMS layer by the
//! Instituto Geografico Nacional. High resolution imagery of Spanish
//! territory; see <https://pnoa.ign.es/presentacion-y-objetivo>.
//!
//! # URL Pattern
//!
//! WMS 1.1.1 `GetMap` in EPSG:4326, bbox ordered lon,lat:
//!
//! `{base}?SERVICE=WMS&VERSION=1.1.1&REQUEST=GetMap&LAYERS=OI.OrthoimageCoverage&SRS=EPSG:4326&BBOX={minLon},{minLat},{maxLon},{maxLat}&WIDTH={w}&HEIGHT={h}&FORMAT=image/png`

use crate::grid::TileBounds;
use crate::provider::ImageryProvider;

/// IGN WMS endpoint for the PNOA maxima-actualidad layer.
const PNOA_BASE_URL: &str = "https://www.ign.es/wms-inspire/pnoa-ma";

/// PNOA orthophoto provider.
pub struct PnoaProvider {
    base_url: String,
}

impl PnoaProvider {
    /// Creates a provider against the public IGN endpoint.
    pub fn new() -> Self {
        Self {
            base_url: PNOA_BASE_URL.to_string(),
        }
    }

    /// Creates a provider with a custom endpoint (useful for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for PnoaProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageryProvider for PnoaProvider {
    fn tile_url(&self, bounds: &TileBounds, width_px: u32, height_px: u32) -> String {
        format!(
            "{}?SERVICE=WMS&VERSION=1.1.1&REQUEST=GetMap&LAYERS=OI.OrthoimageCoverage\
             &SRS=EPSG:4326&BBOX={},{},{},{}&WIDTH={}&HEIGHT={}&FORMAT=image/png",
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
        "PNOA (Spain)"
    }
}
