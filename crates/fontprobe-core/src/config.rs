// src/config.rs
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_BASELINE_FONT, DEFAULT_FONT_SIZE, DEFAULT_TEST_STRING, DEFAULT_TOLERANCE};
use crate::error::{ProbeError, ProbeResult};

/// A font to probe for
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FontSpecRepr")]
pub struct FontSpec {
    /// Name of the font family
    pub name: String,
}

impl FontSpec {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

/// Accepts both `"Arial"` and `{ "name": "Arial" }`
#[derive(Deserialize)]
#[serde(untagged)]
enum FontSpecRepr {
    Bare(String),
    Object { name: String },
}

impl From<FontSpecRepr> for FontSpec {
    fn from(repr: FontSpecRepr) -> Self {
        match repr {
            FontSpecRepr::Bare(name) | FontSpecRepr::Object { name } => Self { name },
        }
    }
}

/// Detection settings
///
/// Field names follow camelCase in JSON (`testString`, `baselineFont`, ...).
/// `fonts` may be a single font or a list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProbeConfig {
    #[serde(deserialize_with = "one_or_many")]
    pub fonts: Vec<FontSpec>,
    /// String rendered in both fonts (default `abcdefghijklmnopqrstuvwxyz0123456789`)
    pub test_string: String,
    /// Reference family, normally a generic one (default `monospace`)
    pub baseline_font: String,
    /// Pixel size the test string is measured at
    pub font_size: f32,
    /// Width difference, in pixels, below which fonts count as identical
    pub tolerance: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            fonts: Vec::new(),
            test_string: DEFAULT_TEST_STRING.to_string(),
            baseline_font: DEFAULT_BASELINE_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> ProbeResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: &Path) -> ProbeResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn with_font(mut self, name: &str) -> Self {
        self.fonts.push(FontSpec::new(name));
        self
    }

    pub fn with_fonts<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fonts.extend(names.into_iter().map(|name| FontSpec::new(name.as_ref())));
        self
    }

    pub fn with_test_string(mut self, test_string: &str) -> Self {
        self.test_string = test_string.to_string();
        self
    }

    pub fn with_baseline_font(mut self, baseline_font: &str) -> Self {
        self.baseline_font = baseline_font.to_string();
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Check every field; font names are only checked when present
    pub fn validate(&self) -> ProbeResult<()> {
        require_text("test_string", &self.test_string)?;
        require_text("baseline_font", &self.baseline_font)?;
        validate_measurement(self.font_size, self.tolerance)?;

        for font in &self.fonts {
            require_text("font_name", &font.name)?;
        }
        Ok(())
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> ProbeResult<()> {
    if value.trim().is_empty() {
        return Err(ProbeError::invalid(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn validate_measurement(font_size: f32, tolerance: f32) -> ProbeResult<()> {
    if !font_size.is_finite() || font_size <= 0.0 {
        return Err(ProbeError::invalid("font_size", format!("must be a positive number, got {}", font_size)));
    }
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(ProbeError::invalid("tolerance", format!("must be zero or positive, got {}", tolerance)));
    }
    Ok(())
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<FontSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(FontSpec),
        Many(Vec<FontSpec>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(font) => vec![font],
        OneOrMany::Many(fonts) => fonts,
    })
}
