use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::vibes::VibeDimension;

/// Closed set of caption personas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaptionType {
    Funny,
    Romantic,
    Motivational,
    Business,
    Witty,
    Artistic,
    Explain,
    #[default]
    Default,
}

impl CaptionType {
    pub const ALL: [CaptionType; 8] = [
        CaptionType::Funny,
        CaptionType::Romantic,
        CaptionType::Motivational,
        CaptionType::Business,
        CaptionType::Witty,
        CaptionType::Artistic,
        CaptionType::Explain,
        CaptionType::Default,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CaptionType::Funny => "funny",
            CaptionType::Romantic => "romantic",
            CaptionType::Motivational => "motivational",
            CaptionType::Business => "business",
            CaptionType::Witty => "witty",
            CaptionType::Artistic => "artistic",
            CaptionType::Explain => "explain",
            CaptionType::Default => "default",
        }
    }

    /// Case-insensitive lookup. Unknown names map to `Default`.
    pub fn parse(name: &str) -> CaptionType {
        CaptionType::from_key(name).unwrap_or_default()
    }

    /// Case-insensitive lookup that rejects unknown names.
    pub fn from_key(name: &str) -> Option<CaptionType> {
        let name = name.trim();
        CaptionType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(name))
    }

    /// Persona used when `dim` is the dominant vibe.
    pub fn for_dimension(dim: VibeDimension) -> CaptionType {
        match dim {
            VibeDimension::Humor => CaptionType::Funny,
            VibeDimension::Romance => CaptionType::Romantic,
            VibeDimension::Energy => CaptionType::Motivational,
            VibeDimension::Formality => CaptionType::Business,
            VibeDimension::Sarcasm => CaptionType::Witty,
            VibeDimension::Poeticism => CaptionType::Artistic,
        }
    }
}

impl fmt::Display for CaptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for CaptionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for CaptionType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(CaptionType::parse(&name))
    }
}
