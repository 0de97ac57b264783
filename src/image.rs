use base64::prelude::*;
use bytes::Bytes;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::CaptionError;

static DATA_URL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^data:image/[a-zA-Z+.-]+;base64,").unwrap());

pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// A decoded image ready to be sent to a vision model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub data: Bytes,
    pub mime_type: String,
}

impl ImageInput {
    /// Wrap raw image bytes, sniffing the MIME type from magic bytes.
    pub fn from_bytes(data: impl Into<Bytes>) -> Result<Self, CaptionError> {
        let data = data.into();
        if data.is_empty() {
            return Err(CaptionError::InvalidImage("image data is empty".to_string()));
        }
        let mime_type = detect_mime_type(&data);
        Ok(Self { data, mime_type })
    }

    /// Decode a base64 payload. A leading `data:image/...;base64,` prefix is
    /// stripped first.
    pub fn from_base64(encoded: &str) -> Result<Self, CaptionError> {
        let payload = strip_data_url(encoded.trim());
        if payload.is_empty() {
            return Err(CaptionError::InvalidImage("image data is empty".to_string()));
        }
        let data = BASE64_STANDARD.decode(payload)?;
        Self::from_bytes(data)
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.data)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Remove a data-URL prefix if present.
pub fn strip_data_url(encoded: &str) -> &str {
    match DATA_URL_PREFIX.find(encoded) {
        Some(m) => &encoded[m.end()..],
        None => encoded,
    }
}

/// Image MIME type from magic bytes, `image/jpeg` when unrecognised.
pub fn detect_mime_type(bytes: &[u8]) -> String {
    infer::get(bytes)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)
        .map(|kind| kind.mime_type())
        .unwrap_or(DEFAULT_MIME_TYPE)
        .to_string()
}
