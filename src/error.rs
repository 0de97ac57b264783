use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum CaptionError {
    Io(io::Error),
    Config(String),
    InvalidImage(String),
    InvalidRequest(String),
    Unauthorized,
    LlmError(String),
    EmptyResponse,
}

impl fmt::Display for CaptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptionError::Io(err) => write!(
                f,
                "IO error: {} - Please check file permissions and path",
                err
            ),
            CaptionError::Config(msg) => write!(
                f,
                "Configuration error: {} - Please check the prompt configuration files",
                msg
            ),
            CaptionError::InvalidImage(msg) => write!(
                f,
                "Invalid image: {} - Send a base64 encoded JPEG or PNG",
                msg
            ),
            CaptionError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            CaptionError::Unauthorized => write!(f, "Unauthorized - The API key was rejected"),
            CaptionError::LlmError(msg) => write!(
                f,
                "LLM error: {} - Please check your API configuration",
                msg
            ),
            CaptionError::EmptyResponse => {
                write!(f, "Empty response from the LLM - Please try again")
            }
        }
    }
}

impl Error for CaptionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CaptionError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CaptionError {
    fn from(error: io::Error) -> Self {
        CaptionError::Io(error)
    }
}

impl From<serde_json::Error> for CaptionError {
    fn from(error: serde_json::Error) -> Self {
        CaptionError::Config(format!("JSON parse error: {}", error))
    }
}

impl From<serde_yaml::Error> for CaptionError {
    fn from(error: serde_yaml::Error) -> Self {
        CaptionError::Config(format!("YAML parse error: {}", error))
    }
}

impl From<toml::de::Error> for CaptionError {
    fn from(error: toml::de::Error) -> Self {
        CaptionError::Config(format!("TOML parse error: {}", error))
    }
}

impl From<regex::Error> for CaptionError {
    fn from(error: regex::Error) -> Self {
        CaptionError::Config(format!("invalid splice pattern: {}", error))
    }
}

impl From<base64::DecodeError> for CaptionError {
    fn from(error: base64::DecodeError) -> Self {
        CaptionError::InvalidImage(format!("base64 decode failed: {}", error))
    }
}
