//! Saved items and the descriptors they are built from

use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::DEFAULT_LABEL;

/// Content category of a saved item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Movie,
    Tv,
}

impl Kind {
    pub const ALL: [Kind; 2] = [Kind::Movie, Kind::Tv];

    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Movie => "movie",
            Kind::Tv => "tv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "movies" | "film" => Some(Kind::Movie),
            "tv" | "show" | "series" => Some(Kind::Tv),
            _ => None,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One saved reference, as held in memory and as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub kind: Kind,
    /// Display title, never empty
    pub label: String,
    /// Poster path or URL, passed through untouched
    pub thumbnail: String,
    /// Unix timestamp (ms) when first added
    pub added_at: i64,
}

impl Item {
    pub fn from_descriptor(descriptor: &ContentDescriptor, kind: Kind, added_at: i64) -> Self {
        Self {
            id: descriptor.id.clone(),
            kind,
            label: descriptor.label().to_string(),
            thumbnail: descriptor.poster_path.clone().unwrap_or_default(),
            added_at,
        }
    }
}

/// Raw content record handed over by the lookup side.
///
/// Movies carry `title`, TV shows carry `name`; ids arrive as numbers from
/// most catalog APIs, so both numbers and strings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentDescriptor {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl ContentDescriptor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_poster(mut self, poster_path: impl Into<String>) -> Self {
        self.poster_path = Some(poster_path.into());
        self
    }

    /// Primary title, then secondary name, then a placeholder
    pub fn label(&self) -> &str {
        [self.title.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_LABEL)
    }

    /// Category implied by the descriptor's own `media_type` tag, if any
    pub fn kind_hint(&self) -> Option<Kind> {
        self.media_type.as_deref().and_then(Kind::from_str)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
