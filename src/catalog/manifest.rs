//! Track manifest decoding.
//!
//! The catalog's track endpoint returns a base64 manifest describing how
//! to obtain the audio bytes. Two container kinds exist in the wild:
//!
//! - `application/vnd.tidal.bts`: a JSON body carrying a `urls` array
//!   (mirrors of the same file; only the first is used).
//! - `application/dash+xml`: an MPD document whose `SegmentTemplate`
//!   expands into an initialization segment plus numbered media segments.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;

/// MIME type of a direct (single-URL) manifest.
pub const MIME_BTS: &str = "application/vnd.tidal.bts";
/// MIME type of a segmented DASH manifest.
pub const MIME_DASH: &str = "application/dash+xml";

/// Segment URLs and codec hint decoded from a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedManifest {
    /// URLs to stream, in download order
    pub urls: Vec<String>,
    /// Codec hint, when the manifest carries one
    pub codec: Option<String>,
}

/// Errors from manifest decoding.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unsupported manifest type: {0}")]
    UnsupportedMime(String),

    #[error("invalid BTS manifest: {0}")]
    Bts(String),

    #[error("invalid DASH manifest: {0}")]
    Dash(String),
}

/// Wire shape of a BTS manifest body.
#[derive(Debug, Deserialize)]
struct BtsManifest {
    #[serde(default)]
    urls: Vec<String>,
    #[serde(default)]
    codecs: Option<String>,
}

/// Decode a base64 manifest of the given MIME type into segment URLs.
pub fn decode(mime: &str, manifest_b64: &str) -> Result<DecodedManifest, ManifestError> {
    let bytes = BASE64.decode(manifest_b64.trim())?;
    match mime {
        MIME_BTS => decode_bts(&bytes),
        MIME_DASH => decode_dash(&bytes),
        other => Err(ManifestError::UnsupportedMime(other.to_string())),
    }
}

fn decode_bts(bytes: &[u8]) -> Result<DecodedManifest, ManifestError> {
    let body: BtsManifest =
        serde_json::from_slice(bytes).map_err(|e| ManifestError::Bts(e.to_string()))?;
    // Multiple URLs are mirrors of the same file, not segments.
    let url = body
        .urls
        .into_iter()
        .next()
        .ok_or_else(|| ManifestError::Bts("no URLs in manifest".to_string()))?;
    Ok(DecodedManifest {
        urls: vec![url],
        codec: body.codecs,
    })
}

fn decode_dash(bytes: &[u8]) -> Result<DecodedManifest, ManifestError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ManifestError::Dash(format!("not valid UTF-8: {e}")))?;
    let doc = roxmltree::Document::parse(text).map_err(|e| ManifestError::Dash(e.to_string()))?;

    // Compare local names only: the MPD schema puts everything in a
    // default namespace.
    let base_url = doc
        .descendants()
        .find(|n| n.tag_name().name() == "BaseURL")
        .and_then(|n| n.text())
        .unwrap_or("")
        .trim()
        .to_string();

    let representation = doc
        .descendants()
        .find(|n| n.tag_name().name() == "Representation")
        .ok_or_else(|| ManifestError::Dash("no Representation element".to_string()))?;
    let codec = representation.attribute("codecs").map(String::from);

    let template = representation
        .descendants()
        .find(|n| n.tag_name().name() == "SegmentTemplate")
        .ok_or_else(|| ManifestError::Dash("no SegmentTemplate element".to_string()))?;
    let init = template
        .attribute("initialization")
        .ok_or_else(|| ManifestError::Dash("SegmentTemplate missing initialization".to_string()))?;
    let media = template
        .attribute("media")
        .ok_or_else(|| ManifestError::Dash("SegmentTemplate missing media".to_string()))?;

    // Without a timeline there is a single media URL.
    let segment_count: usize = template
        .descendants()
        .filter(|n| n.tag_name().name() == "S")
        .map(|s| {
            let repeats: usize = s
                .attribute("r")
                .and_then(|r| r.parse().ok())
                .unwrap_or(0);
            repeats + 1
        })
        .sum();

    let mut urls = Vec::new();
    if segment_count == 0 {
        urls.push(join_url(&base_url, &media.replace("$Number$", "1")));
    } else {
        urls.push(join_url(&base_url, init));
        for number in 1..=segment_count {
            urls.push(join_url(&base_url, &media.replace("$Number$", &number.to_string())));
        }
    }

    Ok(DecodedManifest { urls, codec })
}

/// Join a segment reference against the manifest's base URL.
fn join_url(base: &str, reference: &str) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") || base.is_empty() {
        return reference.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), reference.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(data: &str) -> String {
        BASE64.encode(data)
    }

    #[test]
    fn test_decode_bts_takes_first_url() {
        let body = r#"{"urls": ["https://cdn.example/a.flac", "https://mirror.example/a.flac"], "codecs": "flac"}"#;
        let decoded = decode(MIME_BTS, &encode(body)).unwrap();
        assert_eq!(decoded.urls, vec!["https://cdn.example/a.flac"]);
        assert_eq!(decoded.codec.as_deref(), Some("flac"));
    }

    #[test]
    fn test_decode_bts_without_urls_fails() {
        let body = r#"{"urls": []}"#;
        let err = decode(MIME_BTS, &encode(body)).unwrap_err();
        assert!(matches!(err, ManifestError::Bts(_)));
    }

    #[test]
    fn test_decode_dash_with_timeline() {
        let mpd = r#"<?xml version="1.0"?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011">
  <Period>
    <AdaptationSet>
      <Representation codecs="mp4a.40.2">
        <SegmentTemplate initialization="https://cdn.example/init.mp4"
                         media="https://cdn.example/seg_$Number$.m4s">
          <SegmentTimeline>
            <S d="4096" r="2"/>
            <S d="2048"/>
          </SegmentTimeline>
        </SegmentTemplate>
      </Representation>
    </AdaptationSet>
  </Period>
</MPD>"#;
        let decoded = decode(MIME_DASH, &encode(mpd)).unwrap();
        // r="2" means three segments, plus one more, plus the init segment.
        assert_eq!(decoded.urls.len(), 5);
        assert_eq!(decoded.urls[0], "https://cdn.example/init.mp4");
        assert_eq!(decoded.urls[1], "https://cdn.example/seg_1.m4s");
        assert_eq!(decoded.urls[4], "https://cdn.example/seg_4.m4s");
        assert_eq!(decoded.codec.as_deref(), Some("mp4a.40.2"));
    }

    #[test]
    fn test_decode_dash_without_timeline() {
        let mpd = r#"<MPD xmlns="urn:mpeg:dash:schema:mpd:2011">
  <BaseURL>https://cdn.example/audio</BaseURL>
  <Representation codecs="flac">
    <SegmentTemplate initialization="init.mp4" media="seg_$Number$.m4s"/>
  </Representation>
</MPD>"#;
        let decoded = decode(MIME_DASH, &encode(mpd)).unwrap();
        assert_eq!(decoded.urls, vec!["https://cdn.example/audio/seg_1.m4s"]);
    }

    #[test]
    fn test_decode_dash_missing_template_fails() {
        let mpd = r#"<MPD><Representation/></MPD>"#;
        let err = decode(MIME_DASH, &encode(mpd)).unwrap_err();
        assert!(matches!(err, ManifestError::Dash(_)));
    }

    #[test]
    fn test_unknown_mime_is_rejected() {
        let err = decode("application/octet-stream", &encode("{}")).unwrap_err();
        assert!(matches!(err, ManifestError::UnsupportedMime(_)));
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let err = decode(MIME_BTS, "not base64!!!").unwrap_err();
        assert!(matches!(err, ManifestError::Base64(_)));
    }

    #[test]
    fn test_join_url() {
        assert_eq!(join_url("", "https://a/b"), "https://a/b");
        assert_eq!(join_url("https://a/", "/b.m4s"), "https://a/b.m4s");
        assert_eq!(join_url("https://a", "https://c/d"), "https://c/d");
    }
}
