//! Bavarian DOP80 orthophoto provider (Germany).
//!
//! The 80 cm digital orthophotos of the Bavarian state geoservice,
//! licensed CC-BY; see
//! <https://geodatenonline.bayern.de/geodatenonline/seiten/wms_dop80cm>.
//!
//! The service caps requests at 4000 pixels per side.
//!
//! # URL Pattern
//!
//! `{base}?version=1.1.1&service=WMS&request=GetMap&layers=by_dop80c&bbox={minLon},{minLat},{maxLon},{maxLat}&width={w}&height={h}&srs=EPSG:4326&exceptions=xml&format=image/png`

use crate::grid::TileBounds;
use crate::provider::ImageryProvider;

/// WMS endpoint of the open-access DOP80 service.
const BAYERN_BASE_URL: &str = "https://geoservices.bayern.de/wms/v2/ogc_dop80_oa.cgi";

/// Bavarian DOP80 orthophoto provider.
pub struct BayernProvider {
    base_url: String,
}

impl BayernProvider {
    /// Creates a provider against the public geoservices.bayern.de
    /// endpoint.
    pub fn new() -> Self {
        Self {
            base_url: BAYERN_BASE_URL.to_string(),
        }
    }

    /// Creates a provider with a custom endpoint (useful for testing).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for BayernProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageryProvider for BayernProvider {
    fn tile_url(&self, bounds: &TileBounds, width_px: u32, height_px: u32) -> String {
        format!(
            "{}?version=1.1.1&service=WMS&request=GetMap&layers=by_dop80c\
             &bbox={},{},{},{}&width={}&height={}&srs=EPSG:4326&exceptions=xml&format=image/png",
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
        "Bayern DOP80 (Germany)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_construction() {
        let provider = BayernProvider::new();
        let bounds = TileBounds {
            min_lon: 11.5,
            min_lat: 48.125,
            max_lon: 11.75,
            max_lat: 48.25,
        };
        assert_eq!(
            provider.tile_url(&bounds, 2048, 1024),
            "https://geoservices.bayern.de/wms/v2/ogc_dop80_oa.cgi?version=1.1.1&service=WMS\
             &request=GetMap&layers=by_dop80c&bbox=11.5,48.125,11.75,48.25&width=2048&height=1024\
             &srs=EPSG:4326&exceptions=xml&format=image/png"
        );
    }
}
