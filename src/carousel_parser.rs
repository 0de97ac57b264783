//! Recovers a master caption and per-image captions from free-form LLM text.
//!
//! Three extraction strategies run in order and the first success wins:
//!
//! 1. [`ExtractionStrategy::StructuredPrefixMatch`]: `MASTER:` and
//!    `INDIVIDUAL_n:` prefixes, with a few common variants.
//! 2. [`ExtractionStrategy::LineHeuristic`]: first line is the master, the
//!    following lines are the individual captions.
//! 3. [`ExtractionStrategy::RawFallback`]: the raw text as master and stock
//!    placeholders for every image. Never misses.
//!
//! Whatever tier produced the result, it always carries exactly
//! `image_count` individual captions.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

use crate::carousel::MAX_CAROUSEL_IMAGES;

static UNTIL_INDIVIDUAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\nINDIVIDUAL").unwrap());

static MASTER_HEADS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)MASTER:\s*").unwrap(),
        Regex::new(r"(?i)MASTER CAPTION:\s*").unwrap(),
        Regex::new(r"(?i)Master:\s*").unwrap(),
    ]
});

/// Per-image prefix rules for indices `1..=MAX_CAROUSEL_IMAGES`.
static INDIVIDUAL_RULES: LazyLock<Vec<[PrefixRule; 3]>> = LazyLock::new(|| {
    (1..=MAX_CAROUSEL_IMAGES)
        .map(|index| individual_rules(index).unwrap())
        .collect()
});

/// Rotating placeholders when the reply is a single line.
const SINGLE_LINE_PLACEHOLDERS: [&str; 3] = [
    "First moment captured perfectly ✨",
    "Another angle, same energy 📸",
    "The story continues here 🌟",
];

/// Rotating placeholders for the raw fallback tier.
const FALLBACK_PLACEHOLDERS: [&str; 3] = [
    "This moment right here 💫",
    "Every angle tells a story 📷",
    "The vibe is immaculate ✨",
];

const FALLBACK_MASTER: &str = "Photo dump perfection captured ✨";

/// Which tier produced a [`CarouselParseResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisQuality {
    Structured,
    Unstructured,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselParseResult {
    pub master_caption: String,
    pub individual_captions: Vec<String>,
    pub image_count: usize,
    pub analysis_quality: AnalysisQuality,
}

/// Why a strategy produced nothing.
#[derive(Debug, Error)]
pub enum ParseMiss {
    #[error("no structured caption prefixes found")]
    NoStructuredPrefix,
    #[error("no usable lines in response")]
    NoUsableLines,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    StructuredPrefixMatch,
    LineHeuristic,
    RawFallback,
}

impl ExtractionStrategy {
    pub const ORDER: [ExtractionStrategy; 3] = [
        ExtractionStrategy::StructuredPrefixMatch,
        ExtractionStrategy::LineHeuristic,
        ExtractionStrategy::RawFallback,
    ];

    pub fn extract(self, text: &str, image_count: usize) -> Result<CarouselParseResult, ParseMiss> {
        match self {
            ExtractionStrategy::StructuredPrefixMatch => extract_structured(text, image_count),
            ExtractionStrategy::LineHeuristic => extract_lines(text, image_count),
            ExtractionStrategy::RawFallback => Ok(raw_fallback(text, image_count)),
        }
    }
}

/// Decode an LLM carousel reply. Never fails.
pub fn parse_carousel_response(text: &str, image_count: usize) -> CarouselParseResult {
    let mut result = ExtractionStrategy::ORDER
        .into_iter()
        .find_map(|strategy| match strategy.extract(text, image_count) {
            Ok(result) => {
                debug!(?strategy, quality = ?result.analysis_quality, "carousel reply parsed");
                Some(result)
            }
            Err(miss) => {
                debug!(?strategy, reason = %miss, "carousel strategy missed");
                None
            }
        })
        .unwrap_or_else(|| raw_fallback(text, image_count));

    pad_individuals(&mut result.individual_captions, image_count);
    result
}

/// A caption prefix and the marker that ends its body.
struct PrefixRule {
    head: Regex,
    stop: Regex,
}

impl PrefixRule {
    fn new(head: &str, stop: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            head: Regex::new(head)?,
            stop: Regex::new(stop)?,
        })
    }

    fn capture(&self, text: &str) -> Option<String> {
        capture_body(text, &self.head, &self.stop)
    }
}

/// Text after the first `head` match, up to the next `stop` match (at least
/// one character in) or end of text, with newlines collapsed.
fn capture_body(text: &str, head: &Regex, stop: &Regex) -> Option<String> {
    let head_match = head.find(text)?;
    let rest = &text[head_match.end()..];
    let first = rest.chars().next()?.len_utf8();
    let end = stop.find_at(rest, first).map_or(rest.len(), |m| m.start());
    let body = clean_caption(&rest[..end]);
    (!body.is_empty()).then_some(body)
}

fn clean_caption(raw: &str) -> String {
    raw.trim().replace("\r\n", " ").replace('\n', " ")
}

fn individual_rules(index: usize) -> Result<[PrefixRule; 3], regex::Error> {
    Ok([
        PrefixRule::new(&format!(r"(?i)INDIVIDUAL_{}:\s*", index), r"(?i)\nINDIVIDUAL")?,
        PrefixRule::new(&format!(r"(?i)Image {}:\s*", index), r"(?i)\nImage")?,
        PrefixRule::new(&format!(r"{}\.\s*", index), r"\n\d+\.")?,
    ])
}

/// Body for image `index`, trying each prefix variant in turn. Indices past
/// the precompiled range get their rules built on demand.
fn capture_individual(text: &str, index: usize) -> Option<String> {
    match INDIVIDUAL_RULES.get(index - 1) {
        Some(rules) => rules.iter().find_map(|rule| rule.capture(text)),
        None => individual_rules(index)
            .ok()?
            .iter()
            .find_map(|rule| rule.capture(text)),
    }
}

fn extract_structured(text: &str, image_count: usize) -> Result<CarouselParseResult, ParseMiss> {
    let master = MASTER_HEADS
        .iter()
        .find_map(|head| capture_body(text, head, &UNTIL_INDIVIDUAL));

    let mut individuals = Vec::with_capacity(image_count);
    for index in 1..=image_count {
        if let Some(caption) = capture_individual(text, index) {
            individuals.push(caption);
        }
    }

    if master.is_none() && individuals.is_empty() {
        return Err(ParseMiss::NoStructuredPrefix);
    }

    Ok(CarouselParseResult {
        master_caption: master.unwrap_or_default(),
        individual_captions: individuals,
        image_count,
        analysis_quality: AnalysisQuality::Structured,
    })
}

fn extract_lines(text: &str, image_count: usize) -> Result<CarouselParseResult, ParseMiss> {
    let lines: Vec<&str> = text
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let (master, individuals) = match lines.len() {
        0 => return Err(ParseMiss::NoUsableLines),
        1 => (
            lines[0].to_string(),
            (0..image_count)
                .map(|i| rotating(&SINGLE_LINE_PLACEHOLDERS, i, "of this story 💫"))
                .collect(),
        ),
        n if n > image_count => (
            lines[0].to_string(),
            lines[1..=image_count].iter().map(|l| l.to_string()).collect(),
        ),
        _ => (
            text.trim().to_string(),
            (0..image_count)
                .map(|i| format!("Perfect moment {} ✨", i + 1))
                .collect(),
        ),
    };

    Ok(CarouselParseResult {
        master_caption: master,
        individual_captions: individuals,
        image_count,
        analysis_quality: AnalysisQuality::Unstructured,
    })
}

fn raw_fallback(text: &str, image_count: usize) -> CarouselParseResult {
    let trimmed = text.trim();
    let master_caption = if trimmed.is_empty() {
        FALLBACK_MASTER.to_string()
    } else {
        trimmed.to_string()
    };

    CarouselParseResult {
        master_caption,
        individual_captions: (0..image_count)
            .map(|i| rotating(&FALLBACK_PLACEHOLDERS, i, "perfection 🌟"))
            .collect(),
        image_count,
        analysis_quality: AnalysisQuality::Fallback,
    }
}

/// `list[index]`, or "Frame n <tail>" past the end of the list.
fn rotating(list: &[&str], index: usize, tail: &str) -> String {
    match list.get(index) {
        Some(caption) => caption.to_string(),
        None => format!("Frame {} {}", index + 1, tail),
    }
}

fn pad_individuals(captions: &mut Vec<String>, image_count: usize) {
    while captions.len() < image_count {
        captions.push(format!(
            "Captured the moment perfectly {} 📸",
            captions.len() + 1
        ));
    }
}
