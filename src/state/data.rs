/// Shared data structures for the gallery state
///
/// These structs represent the data model that flows between
/// the manifest loader and the UI layer.

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Category assigned to items that don't carry one
pub const DEFAULT_CATEGORY: &str = "bodas";

/// Title assigned to items that don't carry one
pub const DEFAULT_TITLE: &str = "Sin título";

/// Kind of media an item points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaType {
    #[default]
    Photo,
    Video,
}

impl MediaType {
    /// Parse a manifest token. Only `video` selects video; anything else is a photo.
    pub fn from_token(token: &str) -> Self {
        if token.trim().eq_ignore_ascii_case("video") {
            MediaType::Video
        } else {
            MediaType::Photo
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Photo => "photo",
            MediaType::Video => "video",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One manifest element as written by the gallery author.
///
/// Every field is optional and untyped so a single bad value never rejects
/// the record; the defaulting happens in [`MediaItem::from_value`].
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRecord {
    id: Option<Value>,
    #[serde(rename = "type")]
    kind: Option<Value>,
    category: Option<Value>,
    title: Option<Value>,
    description: Option<Value>,
    url: Option<Value>,
    thumb: Option<Value>,
    #[serde(rename = "createdAt")]
    created_at: Option<Value>,
    /// Legacy name for `createdAt`
    date: Option<Value>,
}

/// Represents a single entry of the gallery manifest after normalization
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    /// Unique identifier, generated when the manifest omits it
    pub id: String,
    pub media_type: MediaType,
    /// Category token (e.g. "bodas", "pre-bodas")
    pub category: String,
    pub title: String,
    pub description: String,
    /// Full photo or video page
    pub url: String,
    /// Grid preview image
    pub thumb: String,
    /// ISO-8601 timestamp (or legacy date)
    pub created_at: String,
}

impl MediaItem {
    /// Normalize one raw manifest element.
    ///
    /// Missing, `null`, empty, or non-scalar fields fall back to their defaults.
    /// Elements that aren't objects produce an all-default item, so a single
    /// malformed entry never aborts the whole manifest.
    pub fn from_value(value: &Value) -> Self {
        // Arrays would otherwise fill the fields positionally
        let raw = match value {
            Value::Object(_) => RawRecord::deserialize(value).unwrap_or_default(),
            _ => RawRecord::default(),
        };

        let url = scalar(raw.url).unwrap_or_default();
        let thumb = scalar(raw.thumb).unwrap_or_else(|| url.clone());

        MediaItem {
            id: scalar(raw.id).unwrap_or_else(generate_id),
            media_type: scalar(raw.kind)
                .map(|t| MediaType::from_token(&t))
                .unwrap_or_default(),
            category: scalar(raw.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            title: scalar(raw.title).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: scalar(raw.description).unwrap_or_default(),
            url,
            thumb,
            created_at: scalar(raw.created_at)
                .or_else(|| scalar(raw.date))
                .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }

    /// Text the free-text search runs against
    pub fn haystack(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title, self.description, self.category, self.media_type
        )
        .to_lowercase()
    }

    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }
}

/// Read a field as a non-empty string, stringifying numbers and booleans
fn scalar(value: Option<Value>) -> Option<String> {
    let text = match value? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Fallback id: current Unix milliseconds plus a random hex suffix
pub fn generate_id() -> String {
    let suffix: u32 = rand::thread_rng().gen();
    format!("{}-{:08x}", Utc::now().timestamp_millis(), suffix)
}

/// Category filter applied to the grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Filter {
    /// The "all" sentinel: every category matches
    #[default]
    All,
    Category(String),
}

impl Filter {
    /// Parse a filter token, mapping "all" to the sentinel
    pub fn from_token(token: &str) -> Self {
        if token == "all" {
            Filter::All
        } else {
            Filter::Category(token.to_string())
        }
    }

    pub fn token(&self) -> &str {
        match self {
            Filter::All => "all",
            Filter::Category(category) => category,
        }
    }

    pub fn matches(&self, item: &MediaItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Category(category) => item.category == *category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_full_record_is_kept() {
        let item = MediaItem::from_value(&json!({
            "id": "a",
            "type": "video",
            "category": "pre-bodas",
            "title": "Playa",
            "description": "Atardecer",
            "url": "https://youtu.be/ABC123",
            "thumb": "thumbs/a.jpg",
            "createdAt": "2024-05-01T10:00:00Z"
        }));

        assert_eq!(item.id, "a");
        assert_eq!(item.media_type, MediaType::Video);
        assert_eq!(item.category, "pre-bodas");
        assert_eq!(item.title, "Playa");
        assert_eq!(item.description, "Atardecer");
        assert_eq!(item.thumb, "thumbs/a.jpg");
        assert_eq!(item.created_at, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_defaults() {
        let item = MediaItem::from_value(&json!({ "url": "x.jpg" }));

        assert!(!item.id.is_empty());
        assert_eq!(item.media_type, MediaType::Photo);
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.title, DEFAULT_TITLE);
        assert_eq!(item.description, "");
        // thumb falls back to url
        assert_eq!(item.thumb, "x.jpg");
        assert!(chrono::DateTime::parse_from_rfc3339(&item.created_at).is_ok());
    }

    #[test]
    fn test_legacy_date_and_numeric_id() {
        let item = MediaItem::from_value(&json!({ "id": 42, "date": "2023-12-24" }));
        assert_eq!(item.id, "42");
        assert_eq!(item.created_at, "2023-12-24");
    }

    #[test]
    fn test_created_at_wins_over_legacy_date() {
        let item = MediaItem::from_value(&json!({
            "createdAt": "2024-01-02T00:00:00Z",
            "date": "1999-01-01",
            "likes": 12
        }));
        assert_eq!(item.created_at, "2024-01-02T00:00:00Z");

        let item = MediaItem::from_value(&json!({ "createdAt": "", "date": "1999-01-01" }));
        assert_eq!(item.created_at, "1999-01-01");
    }

    #[test]
    fn test_wrong_types_fall_back() {
        let item = MediaItem::from_value(&json!({
            "id": "",
            "title": ["not", "a", "string"],
            "category": null,
            "type": "panorama",
            "thumb": ""
        }));

        assert!(!item.id.is_empty());
        assert_eq!(item.title, DEFAULT_TITLE);
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.media_type, MediaType::Photo);
        assert_eq!(item.thumb, "");
    }

    #[test]
    fn test_non_object_element() {
        for value in [json!(null), json!(7), json!("x"), json!([1, 2])] {
            let item = MediaItem::from_value(&value);
            assert_eq!(item.title, DEFAULT_TITLE);
            assert_eq!(item.url, "");
        }
    }

    #[test]
    fn test_generated_ids_do_not_collide() {
        let ids: HashSet<String> = (0..500).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_haystack_covers_searchable_fields() {
        let item = MediaItem::from_value(&json!({
            "title": "Vestido",
            "description": "Encaje",
            "category": "bodas",
            "type": "video"
        }));
        assert_eq!(item.haystack(), "vestido encaje bodas video");
    }

    #[test]
    fn test_filter_tokens() {
        assert_eq!(Filter::from_token("all"), Filter::All);
        assert_eq!(
            Filter::from_token("bodas"),
            Filter::Category("bodas".to_string())
        );
        assert_eq!(Filter::Category("x".to_string()).token(), "x");
    }
}
