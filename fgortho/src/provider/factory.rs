//! Provider selection.

use std::sync::Arc;

use super::{
    ArcGisProvider, BayernProvider, GeoportalProvider, ImageryProvider, PnoaProvider, UsgsProvider,
};

/// The built-in imagery providers.
///
/// Keeps provider wiring out of calling code: the CLI maps its `--provider`
/// flag straight onto this enum and calls [`ProviderKind::create`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// ArcGIS World Imagery, global coverage.
    ArcGis,
    /// Spanish PNOA orthophotos.
    Pnoa,
    /// USGS imagery, United States.
    Usgs,
    /// Polish Geoportal orthophotos.
    GeoportalPl,
    /// Bavarian 80 cm orthophotos.
    BayernDop80,
}

impl ProviderKind {
    /// Instantiates the provider.
    pub fn create(&self) -> Arc<dyn ImageryProvider> {
        match self {
            Self::ArcGis => Arc::new(ArcGisProvider::new()),
            Self::Pnoa => Arc::new(PnoaProvider::new()),
            Self::Usgs => Arc::new(UsgsProvider::new()),
            Self::GeoportalPl => Arc::new(GeoportalProvider::new()),
            Self::BayernDop80 => Arc::new(BayernProvider::new()),
        }
    }
}
