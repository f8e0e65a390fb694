mod extractor;

pub(crate) use extractor::MetadataExtractor;

use crate::host::{BridgeResult, EntryFieldWriter};
use crate::models::{EntryField, VideoMetadata};
use crate::rich_text::paragraph_document;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

const EMBED_BASE_URL: &str = "https://www.youtube.com/embed";
const VIDEOS_PATH: &str = "/api/videos/get";

#[derive(Debug, Error)]
pub(crate) enum MetadataError {
    #[error("metadata request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("metadata request failed ({status}): {body}")]
    Http {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("metadata response could not be decoded: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("no video found for `{0}`")]
    NotFound(String),
}

/// Pulls the `v` query parameter out of a pasted video link.
///
/// Only what follows the first `?` is considered; a key without `=` has no
/// value, and for repeated keys the last occurrence wins.
pub(crate) fn extract_video_id(link: &str) -> Option<String> {
    let (_, query) = link.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(k, _)| *k == "v")
        .map(|(_, v)| v)
        .last()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub(crate) fn embed_url(id: &str) -> String {
    format!("{EMBED_BASE_URL}/{id}")
}

/// Where the extractor's auxiliary UI currently is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ExtractorPhase {
    /// No usable identifier in the link.
    Idle,
    LinkPresent { id: String },
    Fetching { id: String },
    Loaded { id: String, metadata: VideoMetadata },
}

impl ExtractorPhase {
    /// Metadata only counts as loaded while it belongs to the linked video.
    pub fn derive(link: &str, fetching: bool, metadata: Option<&VideoMetadata>) -> Self {
        let Some(id) = extract_video_id(link) else {
            return Self::Idle;
        };
        match (fetching, metadata) {
            (true, _) => Self::Fetching { id },
            (false, Some(m)) if m.id == id => Self::Loaded {
                id,
                metadata: m.clone(),
            },
            (false, _) => Self::LinkPresent { id },
        }
    }

    pub fn video_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::LinkPresent { id } | Self::Fetching { id } | Self::Loaded { id, .. } => Some(id),
        }
    }
}

/// Value a "Set" action writes into `field`, or `None` when there is nothing
/// to write. Titles go in as plain strings, descriptions as a rich-text
/// document.
pub(crate) fn entry_value(field: EntryField, metadata: &VideoMetadata) -> Option<Value> {
    match field {
        EntryField::FriendlyName | EntryField::Name => Some(Value::String(metadata.title.clone())),
        EntryField::Description if metadata.description.is_empty() => None,
        EntryField::Description => Some(paragraph_document(&metadata.description)),
    }
}

/// Writes one sibling field from `metadata`. Resolves to `false` when the
/// field had nothing to write.
pub(crate) async fn apply_to_entry<W: EntryFieldWriter>(
    entry: &W,
    field: EntryField,
    metadata: &VideoMetadata,
) -> BridgeResult<bool> {
    let Some(value) = entry_value(field, metadata) else {
        return Ok(false);
    };
    entry.set_value(field, value).await?;
    Ok(true)
}

#[derive(Deserialize, Clone, Debug, Default)]
struct VideoSnippet {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
struct VideoItem {
    #[serde(default)]
    snippet: Option<VideoSnippet>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

/// Decodes the first item of a video list body.
///
/// Items may carry their fields inside a `snippet` object or at the top level.
pub(crate) fn parse_video_list(id: &str, body: &str) -> Result<VideoMetadata, MetadataError> {
    let res: VideoListResponse = serde_json::from_str(body).map_err(MetadataError::Parse)?;
    let item = res
        .items
        .into_iter()
        .next()
        .ok_or_else(|| MetadataError::NotFound(id.to_string()))?;

    let snippet = item.snippet.unwrap_or_default();
    Ok(VideoMetadata {
        id: id.to_string(),
        title: snippet.title.or(item.title).unwrap_or_default(),
        description: snippet.description.or(item.description).unwrap_or_default(),
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MetadataClient {
    base_url: String,
}

impl MetadataClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub(crate) fn video_url(&self, id: &str) -> String {
        format!(
            "{}{VIDEOS_PATH}?id={}",
            self.base_url,
            urlencoding::encode(id)
        )
    }

    pub async fn fetch(&self, id: &str) -> Result<VideoMetadata, MetadataError> {
        let res = reqwest::Client::new().get(self.video_url(id)).send().await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(MetadataError::Http { status, body });
        }
        parse_video_list(id, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryEntry;
    use serde_json::json;

    fn video(id: &str, title: &str, description: &str) -> VideoMetadata {
        VideoMetadata {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_extract_video_id_from_watch_link() {
        assert_eq!(
            extract_video_id("https://x/watch?v=abc123&t=5").as_deref(),
            Some("abc123")
        );
        assert_eq!(
            extract_video_id("https://x/watch?t=5&v=xyz").as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn test_extract_video_id_without_query() {
        assert_eq!(extract_video_id("https://x/watch"), None);
        assert_eq!(extract_video_id(""), None);
    }

    #[test]
    fn test_extract_video_id_malformed_pairs() {
        assert_eq!(extract_video_id("https://x/watch?v"), None);
        assert_eq!(extract_video_id("https://x/watch?v="), None);
        assert_eq!(extract_video_id("https://x/watch?list=1"), None);
        assert_eq!(extract_video_id("https://x/watch?v=a&v=b").as_deref(), Some("b"));
    }

    #[test]
    fn test_phase_transitions() {
        let meta = VideoMetadata {
            id: "abc".to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
        };

        assert_eq!(ExtractorPhase::derive("nope", true, Some(&meta)), ExtractorPhase::Idle);
        assert_eq!(
            ExtractorPhase::derive("https://x?v=abc", false, None),
            ExtractorPhase::LinkPresent { id: "abc".to_string() }
        );
        assert_eq!(
            ExtractorPhase::derive("https://x?v=abc", true, Some(&meta)),
            ExtractorPhase::Fetching { id: "abc".to_string() }
        );
        let loaded = ExtractorPhase::derive("https://x?v=abc", false, Some(&meta));
        assert!(matches!(loaded, ExtractorPhase::Loaded { .. }));
        assert_eq!(loaded.video_id(), Some("abc"));
    }

    #[test]
    fn test_metadata_for_another_video_is_not_loaded() {
        let old = video("OLD", "Old title", "Old description");

        assert_eq!(
            ExtractorPhase::derive("https://x/watch?v=NEW", false, Some(&old)),
            ExtractorPhase::LinkPresent { id: "NEW".to_string() }
        );
        assert_eq!(
            ExtractorPhase::derive("https://x/watch?v=OLD", false, Some(&old)),
            ExtractorPhase::Loaded {
                id: "OLD".to_string(),
                metadata: old.clone(),
            }
        );
    }

    #[test]
    fn test_entry_values_per_field() {
        let m = video("abc", "Talk", "Line 1\nLine 2");

        assert_eq!(entry_value(EntryField::FriendlyName, &m), Some(json!("Talk")));
        assert_eq!(entry_value(EntryField::Name, &m), Some(json!("Talk")));
        assert_eq!(
            entry_value(EntryField::Description, &m),
            Some(paragraph_document("Line 1\nLine 2"))
        );
        assert_eq!(entry_value(EntryField::Description, &video("abc", "Talk", "")), None);
    }

    #[test]
    fn test_apply_to_entry_writes_sibling_fields() {
        let entry = MemoryEntry::default();
        let m = video("abc", "Talk", "About things");

        for field in [EntryField::FriendlyName, EntryField::Name, EntryField::Description] {
            let written = pollster::block_on(apply_to_entry(&entry, field, &m)).unwrap();
            assert!(written);
        }

        let writes = entry.writes();
        assert_eq!(writes.len(), 3);
        assert_eq!(writes[0], (EntryField::FriendlyName, json!("Talk")));
        assert_eq!(writes[1], (EntryField::Name, json!("Talk")));
        assert_eq!(writes[2].0, EntryField::Description);
        assert_eq!(writes[2].1["nodeType"], "document");
        assert_eq!(
            writes[2].1["content"][0]["content"][0]["value"],
            "About things"
        );
    }

    #[test]
    fn test_apply_empty_description_writes_nothing() {
        let entry = MemoryEntry::default();
        let m = video("abc", "Talk", "");

        let written =
            pollster::block_on(apply_to_entry(&entry, EntryField::Description, &m)).unwrap();
        assert!(!written);
        assert!(entry.writes().is_empty());
    }

    #[test]
    fn test_parse_video_list_prefers_snippet() {
        let body = r#"{"items":[{"snippet":{"title":"Talk","description":"Line 1\nLine 2"}},{"snippet":{"title":"Other"}}]}"#;
        let m = parse_video_list("abc", body).expect("should parse");
        assert_eq!(m.id, "abc");
        assert_eq!(m.title, "Talk");
        assert_eq!(m.description, "Line 1\nLine 2");
    }

    #[test]
    fn test_parse_video_list_flat_items() {
        let body = r#"{"items":[{"title":"Flat","description":"Desc"}]}"#;
        let m = parse_video_list("id", body).expect("should parse");
        assert_eq!(m.title, "Flat");
        assert_eq!(m.description, "Desc");
    }

    #[test]
    fn test_parse_video_list_errors() {
        assert!(matches!(
            parse_video_list("id", r#"{"items":[]}"#),
            Err(MetadataError::NotFound(_))
        ));
        assert!(matches!(
            parse_video_list("id", "<html>"),
            Err(MetadataError::Parse(_))
        ));
    }

    #[test]
    fn test_video_url_encodes_id() {
        let client = MetadataClient::new("http://localhost:3000".to_string());
        assert_eq!(
            client.video_url("a b&c"),
            "http://localhost:3000/api/videos/get?id=a%20b%26c"
        );
        assert_eq!(embed_url("abc"), "https://www.youtube.com/embed/abc");
    }
}
