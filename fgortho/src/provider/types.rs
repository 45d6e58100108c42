//! Imagery provider abstraction.

use crate::grid::TileBounds;

/// A source of orthophoto imagery addressed by geographic extent.
///
/// Providers only build request URLs; transport and response validation
/// live in [`crate::fetch`]. Implementations are `Send + Sync` so a single
/// provider instance can serve every tile task of a download.
pub trait ImageryProvider: Send + Sync {
    /// URL fetching the given extent rendered at `width_px x height_px`.
    fn tile_url(&self, bounds: &TileBounds, width_px: u32, height_px: u32) -> String;

    /// Provider name for logs and reports.
    fn name(&self) -> &str;

    /// MIME type the provider declares for tile payloads.
    ///
    /// Fetch validation compares the response `Content-Type` media type
    /// against this value.
    fn image_mime(&self) -> &str {
        "image/png"
    }
}
