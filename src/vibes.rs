//! The six-dimensional vibe vector and its validation rules.
//!
//! Vibes arrive from untrusted JSON. Validation never fails: every dimension
//! that is missing, non-numeric or outside `0..=100` is replaced by its
//! default, so downstream code always sees a complete vector.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::caption_type::CaptionType;

/// One of the six stylistic sliders.
///
/// The declaration order is the canonical iteration order. Dominant-vibe
/// tie-breaks and modifier injection both depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VibeDimension {
    Humor,
    Romance,
    Energy,
    Formality,
    Sarcasm,
    Poeticism,
}

impl VibeDimension {
    pub const ALL: [VibeDimension; 6] = [
        VibeDimension::Humor,
        VibeDimension::Romance,
        VibeDimension::Energy,
        VibeDimension::Formality,
        VibeDimension::Sarcasm,
        VibeDimension::Poeticism,
    ];

    pub fn key(self) -> &'static str {
        match self {
            VibeDimension::Humor => "humor",
            VibeDimension::Romance => "romance",
            VibeDimension::Energy => "energy",
            VibeDimension::Formality => "formality",
            VibeDimension::Sarcasm => "sarcasm",
            VibeDimension::Poeticism => "poeticism",
        }
    }

    pub fn from_key(key: &str) -> Option<VibeDimension> {
        let key = key.trim();
        VibeDimension::ALL
            .into_iter()
            .find(|dim| dim.key().eq_ignore_ascii_case(key))
    }

    /// Value substituted when the input for this dimension is unusable.
    pub fn default_value(self) -> u8 {
        match self {
            VibeDimension::Humor => 30,
            VibeDimension::Romance => 20,
            VibeDimension::Energy => 50,
            VibeDimension::Formality => 20,
            VibeDimension::Sarcasm => 10,
            VibeDimension::Poeticism => 20,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for VibeDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Intensity bucket for a secondary vibe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Threshold {
    Light = 40,
    Medium = 60,
    Strong = 80,
}

impl Threshold {
    pub const ALL: [Threshold; 3] = [Threshold::Light, Threshold::Medium, Threshold::Strong];

    /// Highest satisfied threshold, or `None` below 40.
    pub fn bucket(value: u8) -> Option<Threshold> {
        match value {
            80.. => Some(Threshold::Strong),
            60..=79 => Some(Threshold::Medium),
            40..=59 => Some(Threshold::Light),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Key used in the modifier tables of the configuration files.
    pub fn key(self) -> &'static str {
        match self {
            Threshold::Light => "40",
            Threshold::Medium => "60",
            Threshold::Strong => "80",
        }
    }

    pub fn from_key(key: &str) -> Option<Threshold> {
        Threshold::ALL.into_iter().find(|t| t.key() == key.trim())
    }
}

/// A validated vibe vector: all six dimensions present, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VibeVector {
    values: [u8; 6],
}

impl Default for VibeVector {
    fn default() -> Self {
        let mut values = [0; 6];
        for dim in VibeDimension::ALL {
            values[dim.index()] = dim.default_value();
        }
        Self { values }
    }
}

impl VibeVector {
    /// Normalize arbitrary JSON into a vibe vector.
    ///
    /// Numbers within `[0, 100]` are rounded to the nearest integer; anything
    /// else, including non-object input, falls back to the per-dimension
    /// default.
    pub fn validate(raw: &Value) -> Self {
        let mut vector = Self::default();
        let Some(object) = raw.as_object() else {
            return vector;
        };

        for dim in VibeDimension::ALL {
            if let Some(value) = object.get(dim.key()).and_then(accept_number) {
                vector.values[dim.index()] = value;
            }
        }
        vector
    }

    /// Slider presets matching each legacy caption type.
    pub fn preset(caption_type: CaptionType) -> Self {
        // humor, romance, energy, formality, sarcasm, poeticism
        let values = match caption_type {
            CaptionType::Funny => [80, 10, 60, 10, 30, 20],
            CaptionType::Romantic => [20, 80, 40, 30, 5, 60],
            CaptionType::Motivational => [30, 20, 90, 60, 10, 40],
            CaptionType::Explain => [20, 10, 50, 70, 15, 50],
            _ => [30, 20, 50, 30, 15, 30],
        };
        Self { values }
    }

    pub fn get(&self, dim: VibeDimension) -> u8 {
        self.values[dim.index()]
    }

    /// Set one dimension using the same rule as [`VibeVector::validate`]:
    /// values above 100 are replaced by the dimension default.
    pub fn with(mut self, dim: VibeDimension, value: u8) -> Self {
        self.values[dim.index()] = if value <= 100 {
            value
        } else {
            dim.default_value()
        };
        self
    }

    /// Iterate in canonical dimension order.
    pub fn iter(&self) -> impl Iterator<Item = (VibeDimension, u8)> + '_ {
        VibeDimension::ALL.into_iter().map(|dim| (dim, self.get(dim)))
    }

    /// The highest-valued dimension. Ties go to the dimension that comes
    /// first in canonical order, so the default vector resolves to `energy`.
    pub fn dominant(&self) -> VibeDimension {
        self.iter()
            .fold((VibeDimension::Humor, self.get(VibeDimension::Humor)), |best, (dim, value)| {
                if value > best.1 {
                    (dim, value)
                } else {
                    best
                }
            })
            .0
    }
}

fn accept_number(value: &Value) -> Option<u8> {
    let number = value.as_f64()?;
    if !(0.0..=100.0).contains(&number) {
        return None;
    }
    Some(number.round() as u8)
}

impl Serialize for VibeVector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(VibeDimension::ALL.len()))?;
        for (dim, value) in self.iter() {
            map.serialize_entry(dim.key(), &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VibeVector {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(VibeVector::validate(&raw))
    }
}

impl fmt::Display for VibeVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(dim, value)| format!("{}={}", dim, value))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
