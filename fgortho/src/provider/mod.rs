//! Imagery providers.
//!
//! Each provider turns a tile extent and pixel size into a request URL for
//! one public orthophoto service. All of them answer PNG in plain
//! geographic coordinates, so a provider is nothing more than a URL
//! formatter; transport and validation live in [`crate::fetch`].
//!
//! # Available Providers
//!
//! - [`ArcGisProvider`] - ArcGIS World Imagery, global coverage (default)
//! - [`PnoaProvider`] - PNOA orthophotos, Spain
//! - [`UsgsProvider`] - USGS imagery, United States
//! - [`GeoportalProvider`] - Geoportal orthophotos, Poland (tile height
//!   capped at 1024 px by the service)
//! - [`BayernProvider`] - DOP80 orthophotos, Bavaria (requests capped at
//!   4000 px by the service)
//!
//! Check each service's terms before bulk downloads; orthophoto grids can
//! put real load on public endpoints.

mod arcgis;
mod bayern;
mod factory;
mod geoportal;
mod pnoa;
mod types;
mod usgs;

pub use arcgis::ArcGisProvider;
pub use bayern::BayernProvider;
pub use factory::ProviderKind;
pub use geoportal::GeoportalProvider;
pub use pnoa::PnoaProvider;
pub use types::ImageryProvider;
pub use usgs::UsgsProvider;
