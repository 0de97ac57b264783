//! Compiles caption instructions from a caption type or a vibe vector.
//!
//! With vibes, the dominant dimension picks the persona and every other
//! dimension at 40 or above contributes a modifier phrase spliced into the
//! persona text. Modifiers are applied in canonical dimension order, each to
//! the text produced by the previous one.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::caption_type::CaptionType;
use crate::config::{CaptionConfig, PersonaEntry};
use crate::splice::{splice_before_image_clause, SpliceOutcome};
use crate::vibes::{Threshold, VibeDimension, VibeVector};

/// A secondary-vibe modifier and where it ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedModifier {
    pub dimension: VibeDimension,
    pub threshold: u8,
    pub phrase: String,
    pub outcome: SpliceOutcome,
}

/// Final instruction text plus how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledPrompt {
    pub text: String,
    pub caption_type: CaptionType,
    pub dominant: Option<VibeDimension>,
    pub modifiers: Vec<AppliedModifier>,
}

impl CompiledPrompt {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for CompiledPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// True when `raw` carries vibes worth compiling: a JSON object with at
/// least one key.
pub fn has_vibes(raw: &Value) -> bool {
    raw.as_object().is_some_and(|object| !object.is_empty())
}

#[derive(Debug, Clone)]
pub struct PromptCompiler {
    config: Arc<CaptionConfig>,
}

impl PromptCompiler {
    pub fn new(config: Arc<CaptionConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CaptionConfig {
        &self.config
    }

    /// Compile from request inputs. Non-empty vibes win over the caption
    /// type; an unknown or missing caption type means `default`.
    pub fn compile(&self, caption_type: Option<&str>, vibes: Option<&Value>) -> CompiledPrompt {
        match vibes.filter(|raw| has_vibes(raw)) {
            Some(raw) => self.compile_vibes(&VibeVector::validate(raw)),
            None => self.compile_type(caption_type.map(CaptionType::parse).unwrap_or_default()),
        }
    }

    /// Persona, example and format constraints for one caption type, with no
    /// modifiers.
    pub fn compile_type(&self, caption_type: CaptionType) -> CompiledPrompt {
        let entry = self.config.caption_type(caption_type);
        let text = self.assemble(&entry.persona, entry);

        debug!(caption_type = %caption_type, length = text.len(), "compiled caption type prompt");

        CompiledPrompt {
            text,
            caption_type,
            dominant: None,
            modifiers: Vec::new(),
        }
    }

    pub fn compile_vibes(&self, vibes: &VibeVector) -> CompiledPrompt {
        let dominant = vibes.dominant();
        let caption_type = CaptionType::for_dimension(dominant);
        let entry = self.config.caption_type(caption_type);

        let mut persona = entry.persona.clone();
        let mut modifiers = Vec::new();

        for (dim, value) in vibes.iter() {
            if dim == dominant {
                continue;
            }
            let Some(threshold) = Threshold::bucket(value) else {
                continue;
            };
            let Some(phrase) = self.config.modifier(dim, threshold) else {
                continue;
            };

            let (spliced, outcome) = match self.config.splice_point(dim) {
                Some(point) => point.apply(&persona, phrase),
                None => splice_before_image_clause(&persona, phrase),
            };
            if outcome == SpliceOutcome::Dropped {
                debug!(dimension = %dim, phrase, "no anchor for modifier, dropped");
            }

            persona = spliced;
            modifiers.push(AppliedModifier {
                dimension: dim,
                threshold: threshold.value(),
                phrase: phrase.to_string(),
                outcome,
            });
        }

        let text = self.assemble(&persona, entry);

        debug!(
            vibes = %vibes,
            dominant = %dominant,
            caption_type = %caption_type,
            modifiers = modifiers.len(),
            "compiled vibe prompt"
        );

        CompiledPrompt {
            text,
            caption_type,
            dominant: Some(dominant),
            modifiers,
        }
    }

    fn assemble(&self, persona: &str, entry: &PersonaEntry) -> String {
        format!(
            "{} Example tone: \"{}\"{}",
            persona,
            entry.example,
            self.config.format_constraints()
        )
    }
}
