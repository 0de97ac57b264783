//! Named splice points for injecting modifier phrases into persona text.
//!
//! Each vibe dimension owns one [`SplicePoint`]. When it cannot be found in
//! the persona, the modifier goes in front of the generic ". Given an image"
//! clause instead; when that is missing too, the modifier is dropped. Every
//! attempt reports which of the three happened.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Generic anchor: the sentence that introduces the image.
static GIVEN_AN_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.\s*given\s+an\s+image").unwrap());

/// Where a modifier phrase is spliced into a persona.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSplicePoint", into = "RawSplicePoint")]
pub enum SplicePoint {
    /// Directly after the first occurrence of a literal phrase.
    AfterPhrase(String),
    /// Directly after the first match of a pattern.
    AfterPattern(Regex),
    AtStart,
    AtEnd,
}

impl PartialEq for SplicePoint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SplicePoint::AfterPhrase(a), SplicePoint::AfterPhrase(b)) => a == b,
            (SplicePoint::AfterPattern(a), SplicePoint::AfterPattern(b)) => {
                a.as_str() == b.as_str()
            }
            (SplicePoint::AtStart, SplicePoint::AtStart) => true,
            (SplicePoint::AtEnd, SplicePoint::AtEnd) => true,
            _ => false,
        }
    }
}

/// How a splice attempt resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpliceOutcome {
    /// Inserted at the dimension's own splice point.
    Anchored,
    /// Inserted before the generic image clause.
    Fallback,
    /// Neither anchor was present; text left unchanged.
    Dropped,
}

impl SplicePoint {
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Ok(SplicePoint::AfterPattern(Regex::new(pattern)?))
    }

    pub fn after(phrase: impl Into<String>) -> Self {
        SplicePoint::AfterPhrase(phrase.into())
    }

    /// Byte offset at which this point inserts into `text`, if it is present.
    fn locate(&self, text: &str) -> Option<usize> {
        match self {
            SplicePoint::AfterPhrase(phrase) => text.find(phrase.as_str()).map(|i| i + phrase.len()),
            SplicePoint::AfterPattern(re) => re.find(text).map(|m| m.end()),
            SplicePoint::AtStart => Some(0),
            SplicePoint::AtEnd => Some(text.len()),
        }
    }

    /// Insert `modifier` into `text` at this point, or at the generic image
    /// clause when the point is absent.
    pub fn apply(&self, text: &str, modifier: &str) -> (String, SpliceOutcome) {
        if let Some(at) = self.locate(text) {
            let spliced = if at == 0 {
                format!("{} {}", modifier, text)
            } else {
                format!("{} {}{}", &text[..at], modifier, &text[at..])
            };
            return (spliced, SpliceOutcome::Anchored);
        }

        splice_before_image_clause(text, modifier)
    }
}

/// Insert `modifier` with a leading space right before the ". Given an
/// image" clause, matched case-insensitively.
pub fn splice_before_image_clause(text: &str, modifier: &str) -> (String, SpliceOutcome) {
    match GIVEN_AN_IMAGE.find(text) {
        Some(m) => {
            let at = m.start();
            let spliced = format!("{} {}{}", &text[..at], modifier, &text[at..]);
            (spliced, SpliceOutcome::Fallback)
        }
        None => (text.to_string(), SpliceOutcome::Dropped),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawSplicePoint {
    Pattern(String),
    After { after: String },
    At { at: Edge },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Edge {
    Start,
    End,
}

impl TryFrom<RawSplicePoint> for SplicePoint {
    type Error = regex::Error;

    fn try_from(raw: RawSplicePoint) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawSplicePoint::Pattern(pattern) => SplicePoint::pattern(&pattern)?,
            RawSplicePoint::After { after } => SplicePoint::AfterPhrase(after),
            RawSplicePoint::At { at: Edge::Start } => SplicePoint::AtStart,
            RawSplicePoint::At { at: Edge::End } => SplicePoint::AtEnd,
        })
    }
}

impl From<SplicePoint> for RawSplicePoint {
    fn from(point: SplicePoint) -> Self {
        match point {
            SplicePoint::AfterPhrase(after) => RawSplicePoint::After { after },
            SplicePoint::AfterPattern(re) => RawSplicePoint::Pattern(re.as_str().to_string()),
            SplicePoint::AtStart => RawSplicePoint::At { at: Edge::Start },
            SplicePoint::AtEnd => RawSplicePoint::At { at: Edge::End },
        }
    }
}
