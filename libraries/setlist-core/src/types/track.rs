/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};

/// A track inside a DJ set
///
/// The surrounding application owns the lifecycle of tracks. The playback core
/// only reads identity and metadata and fills in `cached_url` once a playable
/// URL has been resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Artist name (may be empty for unidentified tracks)
    #[serde(default)]
    pub artist: String,

    /// Track title
    #[serde(default)]
    pub title: String,

    /// Resolved playable URL, written once by the playback core
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_url: Option<String>,

    /// Position of the track inside the set (1-based in the library)
    #[serde(default)]
    pub position: u32,

    /// Identification confidence (0.0 - 1.0)
    #[serde(default)]
    pub confidence: Option<f32>,

    /// Whether the listener liked this track
    #[serde(default)]
    pub liked: Option<bool>,

    /// Whether the listener marked this track as purchased
    #[serde(default)]
    pub purchased: Option<bool>,

    /// Embedded source: a direct playable URL carried by the track itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Offset of the track inside the set recording, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: impl Into<TrackId>,
        artist: impl Into<String>,
        title: impl Into<String>,
        position: u32,
    ) -> Self {
        Self {
            id: id.into(),
            artist: artist.into(),
            title: title.into(),
            cached_url: None,
            position,
            confidence: None,
            liked: None,
            purchased: None,
            source_url: None,
            start_time: None,
        }
    }

    /// Attach an embedded source URL
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Attach an already resolved URL
    pub fn with_cached_url(mut self, url: impl Into<String>) -> Self {
        self.cached_url = Some(url.into());
        self
    }

    /// Whether a playable URL is already known
    pub fn is_resolved(&self) -> bool {
        self.cached_url.is_some()
    }

    /// Search query handed to the resolver: `"artist - title"`
    ///
    /// Falls back to whichever half is present. Returns an empty string when
    /// the track carries no descriptive text at all.
    pub fn query(&self) -> String {
        let artist = self.artist.trim();
        let title = self.title.trim();

        match (artist.is_empty(), title.is_empty()) {
            (false, false) => format!("{} - {}", artist, title),
            (true, false) => title.to_string(),
            (false, true) => artist.to_string(),
            (true, true) => String::new(),
        }
    }

    /// Embedded source usable without a resolver round-trip
    ///
    /// Only http(s) URLs qualify; anything else still goes through the resolver.
    pub fn embedded_source(&self) -> Option<&str> {
        self.source_url
            .as_deref()
            .map(str::trim)
            .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
    }
}
