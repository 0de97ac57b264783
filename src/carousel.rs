//! Multi-image ("carousel") instruction text.
//!
//! Wraps a single-image instruction with cross-image analysis guidance and
//! the `MASTER:` / `INDIVIDUAL_n:` reply grammar that
//! [`crate::carousel_parser`] decodes.

use serde_json::Value;

use crate::compiler::{CompiledPrompt, PromptCompiler};
use crate::error::CaptionError;
use crate::prompts::{CAROUSEL_ANALYSIS_PROMPT, CAROUSEL_FORMAT_PROMPT, ORDINALS};

pub const MIN_CAROUSEL_IMAGES: usize = 2;
pub const MAX_CAROUSEL_IMAGES: usize = 3;

pub const MASTER_PREFIX: &str = "MASTER:";

/// Reply prefix for the 1-based image `index`.
pub fn individual_prefix(index: usize) -> String {
    format!("INDIVIDUAL_{}:", index)
}

/// Carousels bundle 2 or 3 images.
pub fn check_image_count(image_count: usize) -> Result<(), CaptionError> {
    if (MIN_CAROUSEL_IMAGES..=MAX_CAROUSEL_IMAGES).contains(&image_count) {
        Ok(())
    } else {
        Err(CaptionError::InvalidRequest(format!(
            "Carousel requires {}-{} images, got {}",
            MIN_CAROUSEL_IMAGES, MAX_CAROUSEL_IMAGES, image_count
        )))
    }
}

impl PromptCompiler {
    /// Single-image instruction for the same inputs, extended for
    /// `image_count` images.
    pub fn compile_carousel(
        &self,
        caption_type: Option<&str>,
        vibes: Option<&Value>,
        image_count: usize,
    ) -> Result<CompiledPrompt, CaptionError> {
        check_image_count(image_count)?;
        let mut prompt = self.compile(caption_type, vibes);
        prompt.text = extend_for_carousel(&prompt.text, image_count);
        Ok(prompt)
    }
}

fn extend_for_carousel(base: &str, image_count: usize) -> String {
    let analysis = CAROUSEL_ANALYSIS_PROMPT.replace("{count}", &image_count.to_string());
    let format = CAROUSEL_FORMAT_PROMPT
        .replace("{prefixes}", &allowed_prefixes(image_count))
        .replace("{example}", &reply_example(image_count));

    format!("{}\n\n{}\n\n{}", base, analysis, format)
}

fn allowed_prefixes(image_count: usize) -> String {
    let last = individual_prefix(image_count);
    format!(
        "\"{}\" and \"{}\" through \"{}\"",
        MASTER_PREFIX,
        individual_prefix(1),
        last
    )
}

fn reply_example(image_count: usize) -> String {
    let mut lines = vec![format!(
        "{} [cohesive narrative capturing the complete photo dump story]",
        MASTER_PREFIX
    )];
    for index in 1..=image_count {
        let ordinal = ORDINALS.get(index - 1).copied().unwrap_or("next");
        lines.push(format!(
            "{} [specific caption highlighting unique aspects of {} image]",
            individual_prefix(index),
            ordinal
        ));
    }
    lines.join("\n")
}
