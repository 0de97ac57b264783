//! Caption configuration: personas, modifier phrases, splice points and the
//! format constraint suffix.
//!
//! A [`CaptionConfig`] is built once, wrapped in an `Arc` and handed to the
//! compiler; it is never mutated afterwards. Configuration files are optional.
//! Anything missing or malformed falls back to the builtin catalog in
//! [`crate::prompts`].

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::caption_type::CaptionType;
use crate::error::CaptionError;
use crate::prompts::{
    BUILTIN_MODIFIERS, BUILTIN_PERSONAS, BUILTIN_SPLICE_PATTERNS, FORMAT_CONSTRAINTS,
};
use crate::splice::SplicePoint;
use crate::vibes::{Threshold, VibeDimension};

pub const BUILTIN_VERSION: &str = "fallback";

const CAPTION_TYPES_STEM: &str = "caption-types";
const FORMAT_CONSTRAINTS_STEM: &str = "format-constraints";

/// A persona paragraph and one example caption in that voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaEntry {
    pub persona: String,
    pub example: String,
}

impl PersonaEntry {
    pub fn new(persona: impl Into<String>, example: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            example: example.into(),
        }
    }
}

pub type VibeModifierTable = BTreeMap<VibeDimension, BTreeMap<Threshold, String>>;
pub type SpliceTable = BTreeMap<VibeDimension, SplicePoint>;

/// Serialization format of a configuration file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Option<ConfigFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "json" => Some(ConfigFormat::Json),
            "yaml" | "yml" => Some(ConfigFormat::Yaml),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }

    fn extensions(self) -> &'static [&'static str] {
        match self {
            ConfigFormat::Json => &["json"],
            ConfigFormat::Yaml => &["yaml", "yml"],
            ConfigFormat::Toml => &["toml"],
        }
    }

    fn parse<T: for<'de> Deserialize<'de>>(self, content: &str) -> Result<T, CaptionError> {
        Ok(match self {
            ConfigFormat::Json => serde_json::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Toml => toml::from_str(content)?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTypesFile {
    #[serde(default)]
    version: Option<String>,
    types: HashMap<String, PersonaEntry>,
    #[serde(default)]
    vibe_modifiers: HashMap<String, HashMap<String, String>>,
    #[serde(default)]
    injection_points: HashMap<String, SplicePoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormatConstraintsFile {
    format_constraints: FormatConstraintsSection,
}

#[derive(Debug, Deserialize)]
struct FormatConstraintsSection {
    template: String,
}

/// Read-only caption catalog.
#[derive(Debug, Clone)]
pub struct CaptionConfig {
    version: String,
    types: HashMap<CaptionType, PersonaEntry>,
    modifiers: VibeModifierTable,
    splice_points: SpliceTable,
    format_constraints: String,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CaptionConfig {
    /// The hardcoded catalog.
    pub fn builtin() -> Self {
        let types = BUILTIN_PERSONAS
            .iter()
            .map(|(key, persona, example)| {
                (CaptionType::parse(key), PersonaEntry::new(*persona, *example))
            })
            .collect();

        let modifiers = BUILTIN_MODIFIERS
            .iter()
            .filter_map(|(key, phrases)| {
                let dim = VibeDimension::from_key(key)?;
                let table = Threshold::ALL
                    .into_iter()
                    .zip(phrases.iter().map(|p| p.to_string()))
                    .collect();
                Some((dim, table))
            })
            .collect();

        let splice_points = BUILTIN_SPLICE_PATTERNS
            .iter()
            .filter_map(|(key, pattern)| {
                let dim = VibeDimension::from_key(key)?;
                let point = SplicePoint::pattern(pattern).ok()?;
                Some((dim, point))
            })
            .collect();

        Self {
            version: BUILTIN_VERSION.to_string(),
            types,
            modifiers,
            splice_points,
            format_constraints: FORMAT_CONSTRAINTS.to_string(),
        }
    }

    /// Load `prompts/caption-types.*` and `prompts/format-constraints.*`
    /// from `dir`. Each file is optional; a missing or unreadable one keeps
    /// the builtin section and logs a warning.
    pub fn load_dir(dir: impl AsRef<Path>) -> Self {
        let prompts_dir = dir.as_ref().join("prompts");
        let mut config = Self::builtin();

        match find_config_file(&prompts_dir, CAPTION_TYPES_STEM) {
            Some((path, format)) => match read_caption_types(&path, format) {
                Ok(file) => {
                    debug!(path = %path.display(), "loaded caption types");
                    config.apply_caption_types(file);
                }
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to load caption types, falling back to builtin"
                ),
            },
            None => debug!(dir = %prompts_dir.display(), "no caption types file, using builtin"),
        }

        match find_config_file(&prompts_dir, FORMAT_CONSTRAINTS_STEM) {
            Some((path, format)) => match read_format_constraints(&path, format) {
                Ok(template) => {
                    debug!(path = %path.display(), "loaded format constraints");
                    config.format_constraints = template;
                }
                Err(e) => warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to load format constraints, falling back to builtin"
                ),
            },
            None => debug!(
                dir = %prompts_dir.display(),
                "no format constraints file, using builtin"
            ),
        }

        config
    }

    /// Parse a single caption-types file. Format constraints stay builtin.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CaptionError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            CaptionError::Config(format!("unsupported config file: {}", path.display()))
        })?;
        let mut config = Self::builtin();
        config.apply_caption_types(read_caption_types(path, format)?);
        Ok(config)
    }

    /// Parse caption-types content already in memory.
    pub fn from_str(content: &str, format: ConfigFormat) -> Result<Self, CaptionError> {
        let mut config = Self::builtin();
        config.apply_caption_types(format.parse(content)?);
        Ok(config)
    }

    fn apply_caption_types(&mut self, file: CaptionTypesFile) {
        let builtin_default = self.types.get(&CaptionType::Default).cloned();

        self.version = file.version.unwrap_or_else(|| "unversioned".to_string());

        self.types = file
            .types
            .into_iter()
            .filter_map(|(key, entry)| match CaptionType::from_key(&key) {
                Some(caption_type) => Some((caption_type, entry)),
                None => {
                    warn!(caption_type = %key, "ignoring unknown caption type");
                    None
                }
            })
            .collect();
        if let Some(default) = builtin_default {
            self.types.entry(CaptionType::Default).or_insert(default);
        }

        self.modifiers = file
            .vibe_modifiers
            .into_iter()
            .filter_map(|(key, phrases)| {
                let Some(dim) = VibeDimension::from_key(&key) else {
                    warn!(dimension = %key, "ignoring modifiers for unknown vibe");
                    return None;
                };
                let table = phrases
                    .into_iter()
                    .filter_map(|(threshold, phrase)| match Threshold::from_key(&threshold) {
                        Some(t) => Some((t, phrase)),
                        None => {
                            warn!(dimension = %key, threshold = %threshold, "ignoring unknown threshold");
                            None
                        }
                    })
                    .collect();
                Some((dim, table))
            })
            .collect();

        self.splice_points = file
            .injection_points
            .into_iter()
            .filter_map(|(key, point)| match VibeDimension::from_key(&key) {
                Some(dim) => Some((dim, point)),
                None => {
                    warn!(dimension = %key, "ignoring splice point for unknown vibe");
                    None
                }
            })
            .collect();
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Persona for `caption_type`, or the `default` persona when it is not
    /// configured.
    pub fn caption_type(&self, caption_type: CaptionType) -> &PersonaEntry {
        self.types
            .get(&caption_type)
            .or_else(|| self.types.get(&CaptionType::Default))
            .unwrap_or(&*BUILTIN_DEFAULT)
    }

    pub fn format_constraints(&self) -> &str {
        &self.format_constraints
    }

    pub fn vibe_modifiers(&self) -> &VibeModifierTable {
        &self.modifiers
    }

    pub fn modifier(&self, dim: VibeDimension, threshold: Threshold) -> Option<&str> {
        self.modifiers
            .get(&dim)
            .and_then(|table| table.get(&threshold))
            .map(String::as_str)
    }

    pub fn splice_points(&self) -> &SpliceTable {
        &self.splice_points
    }

    pub fn splice_point(&self, dim: VibeDimension) -> Option<&SplicePoint> {
        self.splice_points.get(&dim)
    }

    pub fn with_persona(mut self, caption_type: CaptionType, entry: PersonaEntry) -> Self {
        self.types.insert(caption_type, entry);
        self
    }

    pub fn with_modifier(
        mut self,
        dim: VibeDimension,
        threshold: Threshold,
        phrase: impl Into<String>,
    ) -> Self {
        self.modifiers
            .entry(dim)
            .or_default()
            .insert(threshold, phrase.into());
        self
    }

    pub fn with_splice_point(mut self, dim: VibeDimension, point: SplicePoint) -> Self {
        self.splice_points.insert(dim, point);
        self
    }

    pub fn without_splice_point(mut self, dim: VibeDimension) -> Self {
        self.splice_points.remove(&dim);
        self
    }

    pub fn with_format_constraints(mut self, template: impl Into<String>) -> Self {
        self.format_constraints = template.into();
        self
    }
}

static BUILTIN_DEFAULT: LazyLock<PersonaEntry> = LazyLock::new(|| {
    let (_, persona, example) = BUILTIN_PERSONAS[BUILTIN_PERSONAS.len() - 1];
    PersonaEntry::new(persona, example)
});

fn find_config_file(dir: &Path, stem: &str) -> Option<(PathBuf, ConfigFormat)> {
    [ConfigFormat::Json, ConfigFormat::Yaml, ConfigFormat::Toml]
        .into_iter()
        .flat_map(|format| format.extensions().iter().map(move |ext| (format, *ext)))
        .map(|(format, ext)| (dir.join(format!("{}.{}", stem, ext)), format))
        .find(|(path, _)| path.is_file())
}

fn read_caption_types(path: &Path, format: ConfigFormat) -> Result<CaptionTypesFile, CaptionError> {
    let content = fs::read_to_string(path)?;
    format.parse(&content)
}

fn read_format_constraints(path: &Path, format: ConfigFormat) -> Result<String, CaptionError> {
    let content = fs::read_to_string(path)?;
    let file: FormatConstraintsFile = format.parse(&content)?;
    Ok(file.format_constraints.template)
}
