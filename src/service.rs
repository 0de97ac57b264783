//! Request orchestration: authorize, decode images, compile, call the model
//! and shape the reply.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::carousel::check_image_count;
use crate::carousel_parser::{parse_carousel_response, CarouselParseResult};
use crate::compiler::{has_vibes, PromptCompiler};
use crate::config::CaptionConfig;
use crate::error::CaptionError;
use crate::image::ImageInput;
use crate::llm::SharedLlmClient;

pub const EMPTY_CAPTION: &str = "Could not generate caption";

fn default_caption_type() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSettings {
    /// When set, every request must carry this value as its `apiKey`.
    pub shared_secret: Option<String>,
}

impl ServiceSettings {
    pub fn with_shared_secret(secret: impl Into<String>) -> Self {
        Self {
            shared_secret: Some(secret.into()),
        }
    }

    /// Reads `SHARED_SECRET`; unset or blank disables the check.
    pub fn from_env() -> Self {
        Self {
            shared_secret: std::env::var("SHARED_SECRET")
                .ok()
                .filter(|s| !s.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionRequest {
    /// Base64 image, optionally as a data URL.
    pub image: String,
    #[serde(default = "default_caption_type")]
    pub caption_type: String,
    #[serde(default)]
    pub vibes: Option<Value>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselRequest {
    pub images: Vec<String>,
    #[serde(default = "default_caption_type")]
    pub caption_type: String,
    #[serde(default)]
    pub vibes: Option<Value>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionResponse {
    pub caption: String,
}

pub struct CaptionService {
    compiler: PromptCompiler,
    llm: SharedLlmClient,
    settings: ServiceSettings,
}

impl CaptionService {
    pub fn new(config: Arc<CaptionConfig>, llm: SharedLlmClient, settings: ServiceSettings) -> Self {
        Self {
            compiler: PromptCompiler::new(config),
            llm,
            settings,
        }
    }

    pub fn compiler(&self) -> &PromptCompiler {
        &self.compiler
    }

    pub async fn caption(&self, request: CaptionRequest) -> Result<CaptionResponse, CaptionError> {
        let started = Instant::now();
        let request_id = Uuid::new_v4();

        self.authorize(request_id, request.api_key.as_deref())?;
        log_request_start(request_id, &request.caption_type, request.vibes.as_ref(), 1);

        let image = ImageInput::from_base64(&request.image)?;
        debug!(%request_id, bytes = image.len(), mime_type = %image.mime_type, "image decoded");

        let prompt = self
            .compiler
            .compile(Some(&request.caption_type), request.vibes.as_ref());

        let params = &self.llm.config().single;
        info!(
            %request_id,
            prompt_length = prompt.as_str().len(),
            image_bytes = image.len(),
            max_tokens = params.max_tokens,
            "llm request"
        );
        let llm_started = Instant::now();
        let reply = self
            .llm
            .complete(prompt.as_str(), std::slice::from_ref(&image), params)
            .await?;
        info!(%request_id, latency_ms = llm_started.elapsed().as_millis() as u64, "llm response");

        let caption = match reply.trim() {
            "" => EMPTY_CAPTION.to_string(),
            text => text.to_string(),
        };

        info!(
            %request_id,
            total_ms = started.elapsed().as_millis() as u64,
            caption_length = caption.len(),
            "caption generated"
        );

        Ok(CaptionResponse { caption })
    }

    pub async fn carousel(
        &self,
        request: CarouselRequest,
    ) -> Result<CarouselParseResult, CaptionError> {
        let started = Instant::now();
        let request_id = Uuid::new_v4();
        let image_count = request.images.len();

        check_image_count(image_count)?;
        self.authorize(request_id, request.api_key.as_deref())?;
        log_request_start(
            request_id,
            &request.caption_type,
            request.vibes.as_ref(),
            image_count,
        );

        let images = request
            .images
            .iter()
            .map(|encoded| ImageInput::from_base64(encoded))
            .collect::<Result<Vec<_>, _>>()?;
        let sizes: Vec<usize> = images.iter().map(ImageInput::len).collect();
        let total_bytes: usize = sizes.iter().sum();
        debug!(%request_id, ?sizes, total_bytes, "images decoded");

        let prompt = self.compiler.compile_carousel(
            Some(&request.caption_type),
            request.vibes.as_ref(),
            image_count,
        )?;

        let params = &self.llm.config().carousel;
        info!(
            %request_id,
            prompt_length = prompt.as_str().len(),
            image_bytes = total_bytes,
            max_tokens = params.max_tokens,
            "llm request"
        );
        let llm_started = Instant::now();
        let reply = self.llm.complete(prompt.as_str(), &images, params).await?;
        info!(%request_id, latency_ms = llm_started.elapsed().as_millis() as u64, "llm response");

        if reply.trim().is_empty() {
            warn!(%request_id, "empty carousel reply");
            return Err(CaptionError::EmptyResponse);
        }

        let result = parse_carousel_response(&reply, image_count);

        info!(
            %request_id,
            total_ms = started.elapsed().as_millis() as u64,
            master_length = result.master_caption.len(),
            individual_count = result.individual_captions.len(),
            quality = ?result.analysis_quality,
            "carousel captions generated"
        );

        Ok(result)
    }

    fn authorize(&self, request_id: Uuid, api_key: Option<&str>) -> Result<(), CaptionError> {
        match &self.settings.shared_secret {
            Some(secret) if api_key != Some(secret.as_str()) => {
                warn!(%request_id, "authentication failed");
                Err(CaptionError::Unauthorized)
            }
            _ => Ok(()),
        }
    }
}

fn log_request_start(request_id: Uuid, caption_type: &str, vibes: Option<&Value>, images: usize) {
    let kind = if vibes.is_some_and(has_vibes) {
        "vibes"
    } else {
        "captionType"
    };
    info!(
        %request_id,
        kind,
        caption_type,
        vibes = ?vibes,
        image_count = images,
        "caption request"
    );
}
