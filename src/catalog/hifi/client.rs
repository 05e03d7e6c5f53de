//! hifi HTTP client
//!
//! Handles communication with the hifi catalog endpoints: free-text search,
//! per-track manifest resolution, and cover-art download.
//!
//! The endpoints are reverse engineered, hosted on rotating domains, and
//! answer inconsistently, so the track endpoint is consulted across every
//! configured host and the first usable manifest wins.

use super::{adapter, dto};
use crate::catalog::domain::{
    AssetReference, CatalogError, CatalogRecord, Quality, SearchType,
};
use crate::catalog::{manifest, rank};
use crate::config::CatalogConfig;

/// Cover art resolution requested from the image host.
const COVER_RESOLUTION: &str = "1280x1280";

const USER_AGENT: &str = concat!("mora/", env!("CARGO_PKG_VERSION"));

/// hifi catalog client
pub struct HifiClient {
    http_client: reqwest::Client,
    search_base: String,
    track_bases: Vec<String>,
    image_base: String,
}

impl HifiClient {
    /// Create a new client from the configured hosts.
    pub fn new(config: &CatalogConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            search_base: config.search_base.clone(),
            track_bases: config.track_bases.clone(),
            image_base: config.image_base.clone(),
        }
    }

    /// Search the catalog and post-process the results for the search type.
    ///
    /// An empty vec is a success value; transport and parse failures are
    /// `CatalogError::Network`/`Parse`.
    pub async fn search(
        &self,
        search_type: SearchType,
        query: &str,
    ) -> Result<Vec<CatalogRecord>, CatalogError> {
        let url = format!("{}/search/", self.search_base);
        let response = self
            .http_client
            .get(&url)
            .query(&[("s", query)])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body: dto::SearchResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        let records = adapter::to_records(body.data.items);
        tracing::debug!(
            raw = records.len(),
            "search returned records before post-processing"
        );
        Ok(rank::apply(search_type, query, records))
    }

    /// Resolve a record's downloadable asset at the requested quality.
    ///
    /// Tries each configured track host once. A well-formed response with
    /// no manifest means the quality is not offered; transport failures on
    /// every host surface as `Network`.
    pub async fn resolve(
        &self,
        record: &CatalogRecord,
        quality: Quality,
    ) -> Result<AssetReference, CatalogError> {
        let mut saw_missing_manifest = false;
        let mut last_error: Option<CatalogError> = None;

        for base in &self.track_bases {
            match self.fetch_manifest(base, record.id, quality).await {
                Ok(Some(asset)) => return Ok(asset),
                Ok(None) => saw_missing_manifest = true,
                Err(e) => {
                    tracing::debug!(host = %base, "track host failed: {e}");
                    last_error = Some(e);
                }
            }
        }

        if saw_missing_manifest {
            Err(CatalogError::QualityUnavailable {
                quality,
                track_id: record.id,
            })
        } else {
            Err(last_error
                .unwrap_or_else(|| CatalogError::Network("no track hosts configured".to_string())))
        }
    }

    /// Query one track host; `Ok(None)` means the host answered but offered
    /// no manifest at this quality.
    async fn fetch_manifest(
        &self,
        base: &str,
        track_id: u64,
        quality: Quality,
    ) -> Result<Option<AssetReference>, CatalogError> {
        let url = format!("{}/track/", base);
        let response = self
            .http_client
            .get(&url)
            .query(&[("id", track_id.to_string().as_str()), ("quality", quality.as_str())])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body: dto::ManifestResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        let Some(data) = body.data else {
            return Ok(None);
        };
        let Some(manifest_b64) = data.manifest.filter(|m| !m.is_empty()) else {
            return Ok(None);
        };

        let mime = data.manifest_mime_type.unwrap_or_default();
        let decoded = manifest::decode(&mime, &manifest_b64)
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        Ok(Some(AssetReference {
            urls: decoded.urls,
            codec: decoded.codec,
            bit_depth: data.bit_depth,
            sample_rate: data.sample_rate,
            quality,
        }))
    }

    /// Fetch cover-art bytes for a cover id.
    ///
    /// The 32-hex cover id maps to a path on the image host, split
    /// 8/4/4/4/12. Callers treat failure as "no art", never as a pipeline
    /// failure.
    pub async fn cover_art(&self, cover_id: &str) -> Result<Vec<u8>, CatalogError> {
        let clean: String = cover_id.chars().filter(|c| *c != '-').collect();
        if clean.len() != 32 || !clean.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CatalogError::Parse(format!("invalid cover id: {cover_id}")));
        }

        let path = format!(
            "{}/{}/{}/{}/{}",
            &clean[0..8],
            &clean[8..12],
            &clean[12..16],
            &clean[16..20],
            &clean[20..32]
        );
        let url = format!("{}/images/{}/{}.jpg", self.image_base, path, COVER_RESOLUTION);

        let response = self
            .http_client
            .get(&url)
            // The image host rejects requests without a plausible referrer.
            .header("Referer", "https://tidal.com/")
            .header("Origin", "https://tidal.com")
            .header("Accept", "image/webp,image/apng,image/*,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Network(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_hosts() {
        let config = CatalogConfig::default();
        let client = HifiClient::new(&config);
        assert_eq!(client.search_base, config.search_base);
        assert_eq!(client.track_bases.len(), 2);
    }

    #[test]
    fn test_user_agent_format() {
        assert!(USER_AGENT.starts_with("mora/"));
    }
}
