//! Trait definitions for external API clients.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.

use async_trait::async_trait;

use super::domain::{AssetReference, CatalogError, CatalogRecord, Quality, SearchType};

/// Trait for the catalog boundary: search, asset resolution, cover art.
///
/// The pipeline talks to the external service only through this trait.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search the catalog; an empty vec is a success value.
    async fn search(
        &self,
        search_type: SearchType,
        query: &str,
    ) -> Result<Vec<CatalogRecord>, CatalogError>;

    /// Resolve a record's downloadable asset at the requested quality.
    async fn resolve(
        &self,
        record: &CatalogRecord,
        quality: Quality,
    ) -> Result<AssetReference, CatalogError>;

    /// Fetch cover-art bytes for a cover id.
    async fn cover_art(&self, cover_id: &str) -> Result<Vec<u8>, CatalogError>;
}

#[async_trait]
impl CatalogApi for super::hifi::HifiClient {
    async fn search(
        &self,
        search_type: SearchType,
        query: &str,
    ) -> Result<Vec<CatalogRecord>, CatalogError> {
        self.search(search_type, query).await
    }

    async fn resolve(
        &self,
        record: &CatalogRecord,
        quality: Quality,
    ) -> Result<AssetReference, CatalogError> {
        self.resolve(record, quality).await
    }

    async fn cover_art(&self, cover_id: &str) -> Result<Vec<u8>, CatalogError> {
        self.cover_art(cover_id).await
    }
}
