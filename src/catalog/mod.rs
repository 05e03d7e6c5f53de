//! Catalog boundary: typed access to the external hifi music catalog.
//!
//! Submodules:
//! - `domain`: strict internal types the rest of the pipeline consumes
//! - `hifi`: HTTP client, wire DTOs, and the DTO-to-domain adapter
//! - `manifest`: base64 track-manifest decoding (BTS and DASH)
//! - `rank`: per-search-type filtering, duplicate collapse, ordering
//! - `traits`: the `CatalogApi` seam the pipeline is generic over

pub mod domain;
pub mod hifi;
pub mod manifest;
pub mod rank;
pub mod traits;

pub use domain::{AlbumRef, AssetReference, CatalogError, CatalogRecord, Quality, SearchType};
pub use traits::CatalogApi;
