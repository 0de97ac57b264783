pub mod caption_type;
pub mod carousel;
pub mod carousel_parser;
pub mod compiler;
pub mod config;
pub mod error;
pub mod image;
pub mod llm;
pub mod prompts;
pub mod service;
pub mod splice;
pub mod vibes;

use serde_json::Value;
use std::sync::Arc;

// Re-export key types
pub use caption_type::CaptionType;
pub use carousel_parser::{
    parse_carousel_response, AnalysisQuality, CarouselParseResult, ExtractionStrategy, ParseMiss,
};
pub use compiler::{AppliedModifier, CompiledPrompt, PromptCompiler};
pub use config::{CaptionConfig, ConfigFormat, PersonaEntry};
pub use error::CaptionError;
pub use image::ImageInput;
pub use llm::{
    create_llm_client, create_llm_client_with_config, CompletionParams, Detail, LlmClient,
    LlmConfig, LlmWrapper, MockLlmClient, SharedLlmClient,
};
pub use service::{
    CaptionRequest, CaptionResponse, CaptionService, CarouselRequest, ServiceSettings,
};
pub use splice::{SpliceOutcome, SplicePoint};
pub use vibes::{Threshold, VibeDimension, VibeVector};

/// Compile a single-image instruction against the builtin catalog.
pub fn compile_prompt(caption_type: Option<&str>, vibes: Option<&Value>) -> String {
    PromptCompiler::new(Arc::new(CaptionConfig::builtin()))
        .compile(caption_type, vibes)
        .into_string()
}

/// Compile a carousel instruction against the builtin catalog.
pub fn compile_carousel_prompt(
    caption_type: Option<&str>,
    vibes: Option<&Value>,
    image_count: usize,
) -> Result<String, CaptionError> {
    PromptCompiler::new(Arc::new(CaptionConfig::builtin()))
        .compile_carousel(caption_type, vibes, image_count)
        .map(CompiledPrompt::into_string)
}
