//! Tile fetching.
//!
//! Turns planned tiles into spooled image files: build the provider URL,
//! GET it, validate status and content type, spool the body. Transport sits
//! behind [`HttpFetch`] so the whole path runs without a network in tests.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::grid::TileSpec;
use crate::provider::ImageryProvider;

mod http;
mod store;

pub use http::{HttpFetch, HttpResponse, ReqwestFetch};
pub use store::{FetchedTile, TileStore};

#[cfg(test)]
pub use http::tests::MockFetch;

/// Errors fetching one tile.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure from the HTTP client.
    #[error("HTTP request failed: {0}")]
    Request(String),
    /// The remote answered with a status other than 200.
    #[error("remote returned HTTP {status}, expected 200")]
    Status { status: u16 },
    /// The remote answered 200 with the wrong payload type.
    #[error("remote returned content type {content_type:?}, expected {expected}")]
    ContentType {
        content_type: Option<String>,
        expected: String,
    },
    /// The tile body could not be written to the spool.
    #[error("failed to spool tile: {source}")]
    Spool {
        #[source]
        source: std::io::Error,
    },
}

/// Fetches planned tiles through one provider.
pub struct TileFetcher<C: HttpFetch> {
    transport: C,
    provider: Arc<dyn ImageryProvider>,
    dry_run: bool,
}

impl<C: HttpFetch> TileFetcher<C> {
    /// Creates a fetcher.
    pub fn new(transport: C, provider: Arc<dyn ImageryProvider>) -> Self {
        Self {
            transport,
            provider,
            dry_run: false,
        }
    }

    /// Builds and logs URLs without requesting them; tiles spool as empty
    /// placeholders.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Fetches one tile into the store.
    ///
    /// Exactly one GET per tile, no retries. The response must be a 200
    /// whose `Content-Type` media type matches the provider's declared
    /// MIME; anything else fails the tile. WMS services in particular
    /// answer errors as 200 with an XML body, which the content type check
    /// turns into a hard failure instead of a corrupt orthophoto.
    pub async fn fetch(
        &self,
        spec: &TileSpec,
        store: &TileStore,
    ) -> Result<FetchedTile, FetchError> {
        let url = self
            .provider
            .tile_url(&spec.bounds, spec.width_px, spec.height_px);
        info!(row = spec.row, col = spec.col, url = %url, "downloading tile");

        if self.dry_run {
            return store.spool(spec, &[]).await;
        }

        let response = self.transport.get(&url).await?;
        if response.status != 200 {
            return Err(FetchError::Status {
                status: response.status,
            });
        }

        let expected = self.provider.image_mime();
        if !matches_media_type(response.content_type.as_deref(), expected) {
            return Err(FetchError::ContentType {
                content_type: response.content_type,
                expected: expected.to_string(),
            });
        }

        debug!(
            row = spec.row,
            col = spec.col,
            bytes = response.body.len(),
            "tile received"
        );
        store.spool(spec, &response.body).await
    }
}

/// Compares a `Content-Type` header against an expected media type.
/// Parameters after `;`, such as `charset`, are ignored.
fn matches_media_type(content_type: Option<&str>, expected: &str) -> bool {
    match content_type {
        Some(value) => {
            let media_type = value.split(';').next().unwrap_or("").trim();
            media_type.eq_ignore_ascii_case(expected)
        }
        None => false,
    }
}
