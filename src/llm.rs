//! Vision LLM abstraction over any rig-core compatible model.
//!
//! Caption generation only needs one call shape: the compiled instructions
//! as the system preamble, and one or more images as the user message.
//! [`LlmWrapper`] builds that request for any `CompletionModel` (OpenAI,
//! Anthropic, Gemini, ...), and [`MockLlmClient`] stands in for it in tests.
//!
//! # Example
//! ```ignore
//! use rig::client::CompletionClient;
//! use rig::providers::openai;
//! use vibe_caption::llm::{create_llm_client_with_config, LlmConfig};
//!
//! let client = openai::Client::from_env();
//! let model = client.completion_model("gpt-4o");
//! let llm = create_llm_client_with_config(model, LlmConfig::default());
//! ```

use async_trait::async_trait;
use rig::{
    completion::{AssistantContent, CompletionModel, CompletionRequest},
    message::{ImageDetail, ImageMediaType, Message, UserContent},
    OneOrMany,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::error::CaptionError;
use crate::image::ImageInput;

pub const DEFAULT_MODEL: &str = "gpt-4o";

/// How much resolution the model should spend on each image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Detail {
    Low,
    High,
    #[default]
    Auto,
}

impl Detail {
    fn to_rig(self) -> ImageDetail {
        match self {
            Detail::Low => ImageDetail::Low,
            Detail::High => ImageDetail::High,
            Detail::Auto => ImageDetail::Auto,
        }
    }
}

/// Sampling parameters for one completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionParams {
    pub max_tokens: u64,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default)]
    pub detail: Detail,
}

impl CompletionParams {
    /// Short, playful single-image caption.
    pub fn single_caption() -> Self {
        Self {
            max_tokens: 100,
            temperature: 0.8,
            top_p: None,
            presence_penalty: None,
            frequency_penalty: None,
            detail: Detail::Low,
        }
    }

    /// Master plus per-image captions across a carousel.
    pub fn carousel() -> Self {
        Self {
            max_tokens: 400,
            temperature: 0.75,
            top_p: Some(0.9),
            presence_penalty: Some(0.1),
            frequency_penalty: Some(0.1),
            detail: Detail::High,
        }
    }

    pub fn with_max_tokens(mut self, tokens: u64) -> Self {
        self.max_tokens = tokens;
        self
    }

    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = temp.clamp(0.0, 2.0);
        self
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    /// Provider parameters rig has no first-class setter for.
    fn additional_params(&self) -> Option<Value> {
        let mut extra = Map::new();
        if let Some(top_p) = self.top_p {
            extra.insert("top_p".to_string(), top_p.into());
        }
        if let Some(penalty) = self.presence_penalty {
            extra.insert("presence_penalty".to_string(), penalty.into());
        }
        if let Some(penalty) = self.frequency_penalty {
            extra.insert("frequency_penalty".to_string(), penalty.into());
        }
        (!extra.is_empty()).then_some(Value::Object(extra))
    }
}

/// Model name and the parameters for each call shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    pub model: String,
    pub single: CompletionParams,
    pub carousel: CompletionParams,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            single: CompletionParams::single_caption(),
            carousel: CompletionParams::carousel(),
        }
    }
}

impl LlmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_single_params(mut self, params: CompletionParams) -> Self {
        self.single = params;
        self
    }

    pub fn with_carousel_params(mut self, params: CompletionParams) -> Self {
        self.carousel = params;
        self
    }
}

/// A vision model that turns an instruction plus images into text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send `instructions` as the system preamble and `images` as the user
    /// message.
    async fn complete(
        &self,
        instructions: &str,
        images: &[ImageInput],
        params: &CompletionParams,
    ) -> Result<String, CaptionError>;

    fn config(&self) -> &LlmConfig;
}

/// Universal wrapper for any rig-core `CompletionModel`.
pub struct LlmWrapper<M: CompletionModel> {
    model: Arc<M>,
    config: LlmConfig,
}

impl<M: CompletionModel> LlmWrapper<M> {
    pub fn new(model: M) -> Self {
        Self::with_config(model, LlmConfig::default())
    }

    pub fn with_config(model: M, config: LlmConfig) -> Self {
        Self {
            model: Arc::new(model),
            config,
        }
    }

    /// Instructions go in the preamble; the user message carries only the
    /// images. At least one image is required.
    pub(crate) fn build_request(
        &self,
        instructions: &str,
        images: &[ImageInput],
        params: &CompletionParams,
    ) -> Result<CompletionRequest, CaptionError> {
        let content = build_content(images, params.detail)?;
        let mut builder = self
            .model
            .completion_request(Message::User { content })
            .preamble(instructions.to_string())
            .temperature(params.temperature)
            .max_tokens(params.max_tokens);

        if let Some(extra) = params.additional_params() {
            builder = builder.additional_params(extra);
        }

        Ok(builder.build())
    }
}

fn build_content(
    images: &[ImageInput],
    detail: Detail,
) -> Result<OneOrMany<UserContent>, CaptionError> {
    OneOrMany::many(images.iter().map(|image| {
        UserContent::image_base64(
            image.to_base64(),
            Some(parse_mime_to_image_type(&image.mime_type)),
            Some(detail.to_rig()),
        )
    }))
    .map_err(|_| CaptionError::InvalidRequest("at least one image is required".to_string()))
}

fn extract_text_from_response(content: &OneOrMany<AssistantContent>) -> String {
    content
        .iter()
        .filter_map(|c| match c {
            AssistantContent::Text(text) => Some(text.text.clone()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_mime_to_image_type(mime_type: &str) -> ImageMediaType {
    match mime_type.to_lowercase().as_str() {
        "image/png" => ImageMediaType::PNG,
        "image/gif" => ImageMediaType::GIF,
        "image/webp" => ImageMediaType::WEBP,
        _ => ImageMediaType::JPEG,
    }
}

#[async_trait]
impl<M: CompletionModel + Send + Sync + 'static> LlmClient for LlmWrapper<M> {
    async fn complete(
        &self,
        instructions: &str,
        images: &[ImageInput],
        params: &CompletionParams,
    ) -> Result<String, CaptionError> {
        let request = self.build_request(instructions, images, params)?;

        debug!(
            model = %self.config.model,
            images = images.len(),
            max_tokens = params.max_tokens,
            "sending completion request"
        );

        self.model
            .completion(request)
            .await
            .map(|r| extract_text_from_response(&r.choice))
            .map_err(|e| CaptionError::LlmError(e.to_string()))
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }
}

/// One call seen by [`MockLlmClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub instructions: String,
    pub image_count: usize,
    pub params: CompletionParams,
}

/// A mock LLM client for testing
pub struct MockLlmClient {
    pub response: String,
    pub error: Option<String>,
    config: LlmConfig,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self {
            response: "A mock caption".to_string(),
            error: None,
            config: LlmConfig::default(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.response = response.into();
        self
    }

    /// Fail every call with an `LlmError` carrying `message`.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn with_config(mut self, config: LlmConfig) -> Self {
        self.config = config;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls().pop()
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        instructions: &str,
        images: &[ImageInput],
        params: &CompletionParams,
    ) -> Result<String, CaptionError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                instructions: instructions.to_string(),
                image_count: images.len(),
                params: params.clone(),
            });
        }

        match &self.error {
            Some(message) => Err(CaptionError::LlmError(message.clone())),
            None => Ok(self.response.clone()),
        }
    }

    fn config(&self) -> &LlmConfig {
        &self.config
    }
}

/// Type alias for a boxed LLM client that can be shared across threads
pub type SharedLlmClient = Arc<dyn LlmClient>;

pub fn create_llm_client<M: CompletionModel + Send + Sync + 'static>(model: M) -> SharedLlmClient {
    Arc::new(LlmWrapper::new(model))
}

pub fn create_llm_client_with_config<M: CompletionModel + Send + Sync + 'static>(
    model: M,
    config: LlmConfig,
) -> SharedLlmClient {
    Arc::new(LlmWrapper::with_config(model, config))
}
