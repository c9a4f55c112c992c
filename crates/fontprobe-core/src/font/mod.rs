//! Font families, stacks and system font discovery
//!
//! This module provides the vocabulary the probe works in: font stacks
//! (ordered family lists such as `"Fira Code", monospace`), generic family
//! keywords, and the faces discovered on the host together with the
//! fontdue-backed surface that measures text with them.

pub mod cache;
pub mod discovery;
pub mod fallback;

use std::fmt;
use std::path::PathBuf;

use crate::error::{ProbeError, ProbeResult};

pub use cache::FontdueSurface;
pub use discovery::{default_search_paths, discover_fonts, is_font_file};
pub use fallback::{is_monospace_font, resolve_family, resolve_stack};

/// Font weight variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Font slant variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
}

/// Generic family keywords a stack may end with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericFamily {
    Serif,
    SansSerif,
    Monospace,
    Cursive,
    Fantasy,
    SystemUi,
}

impl GenericFamily {
    pub const ALL: [GenericFamily; 6] = [
        Self::Serif,
        Self::SansSerif,
        Self::Monospace,
        Self::Cursive,
        Self::Fantasy,
        Self::SystemUi,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "serif" => Some(Self::Serif),
            "sans-serif" => Some(Self::SansSerif),
            "monospace" => Some(Self::Monospace),
            "cursive" => Some(Self::Cursive),
            "fantasy" => Some(Self::Fantasy),
            "system-ui" => Some(Self::SystemUi),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Cursive => "cursive",
            Self::Fantasy => "fantasy",
            Self::SystemUi => "system-ui",
        }
    }
}

impl fmt::Display for GenericFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One entry of a font stack
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FamilyName {
    Named(String),
    Generic(GenericFamily),
}

impl FamilyName {
    pub fn parse(raw: &str) -> ProbeResult<Self> {
        let trimmed = raw.trim();
        let quoted = trimmed.len() >= 2
            && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
                || (trimmed.starts_with('\'') && trimmed.ends_with('\'')));

        // Quoting a keyword makes it a concrete family name, as in CSS
        let name = if quoted { trimmed[1..trimmed.len() - 1].trim() } else { trimmed };
        if name.is_empty() {
            return Err(ProbeError::InvalidFontStack { stack: raw.to_string() });
        }

        if !quoted {
            if let Some(generic) = GenericFamily::parse(name) {
                return Ok(Self::Generic(generic));
            }
        }
        Ok(Self::Named(name.to_string()))
    }

    pub fn is_generic(&self) -> bool {
        matches!(self, Self::Generic(_))
    }
}

impl fmt::Display for FamilyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic(generic) => write!(f, "{}", generic),
            Self::Named(name) if name.contains([',', ' ']) || GenericFamily::parse(name).is_some() => {
                write!(f, "\"{}\"", name)
            }
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Ordered list of families, tried first to last
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontStack {
    families: Vec<FamilyName>,
}

impl FontStack {
    /// Parse a comma separated list such as `"Fira Code", monospace`
    pub fn parse(stack: &str) -> ProbeResult<Self> {
        let families = stack
            .split(',')
            .map(FamilyName::parse)
            .collect::<ProbeResult<Vec<_>>>()
            .map_err(|_| ProbeError::InvalidFontStack { stack: stack.to_string() })?;
        Ok(Self { families })
    }

    /// A stack holding a single family, taken verbatim unless it is a generic keyword
    pub fn single(family: &str) -> ProbeResult<Self> {
        let name = match GenericFamily::parse(family) {
            Some(generic) => FamilyName::Generic(generic),
            None if family.trim().is_empty() => {
                return Err(ProbeError::InvalidFontStack { stack: family.to_string() })
            }
            None => FamilyName::Named(family.trim().to_string()),
        };
        Ok(Self { families: vec![name] })
    }

    /// This stack followed by every family of `fallback`
    pub fn with_fallback(&self, fallback: &FontStack) -> Self {
        let mut families = self.families.clone();
        families.extend(fallback.families.iter().cloned());
        Self { families }
    }

    pub fn families(&self) -> &[FamilyName] {
        &self.families
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

impl fmt::Display for FontStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, family) in self.families.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", family)?;
        }
        Ok(())
    }
}

/// A face discovered on the host
#[derive(Debug, Clone, PartialEq)]
pub struct SystemFont {
    pub name: String,
    pub path: PathBuf,
    /// Face index inside a collection file
    pub index: u32,
    pub weight: FontWeight,
    pub slant: FontSlant,
    pub monospace: bool,
}

impl SystemFont {
    pub fn new(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            index: 0,
            weight: FontWeight::Normal,
            slant: FontSlant::Normal,
            monospace: is_monospace_font(name),
        }
    }

    /// Case-insensitive family comparison
    pub fn has_family(&self, family: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(family.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stack_parsing() {
        let stack = FontStack::parse("\"Fira Code\", Arial ,monospace").unwrap();
        assert_eq!(
            stack.families(),
            &[
                FamilyName::Named("Fira Code".to_string()),
                FamilyName::Named("Arial".to_string()),
                FamilyName::Generic(GenericFamily::Monospace),
            ]
        );
        assert_eq!(stack.to_string(), "\"Fira Code\", Arial, monospace");
    }

    #[test]
    fn test_quoted_keyword_is_concrete() {
        let stack = FontStack::parse("'serif'").unwrap();
        assert_eq!(stack.families(), &[FamilyName::Named("serif".to_string())]);
        assert_eq!(stack.to_string(), "\"serif\"");
    }

    #[test]
    fn test_empty_entries_rejected() {
        assert!(FontStack::parse("").is_err());
        assert!(FontStack::parse("Arial,,serif").is_err());
        assert!(FontStack::parse("\"\"").is_err());
        assert!(FontStack::single("   ").is_err());
    }

    #[test]
    fn test_single_keeps_commas_verbatim() {
        let stack = FontStack::single("Weird, Name").unwrap();
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.families()[0], FamilyName::Named("Weird, Name".to_string()));
    }

    #[test]
    fn test_with_fallback() {
        let candidate = FontStack::single("Arial").unwrap();
        let baseline = FontStack::single("monospace").unwrap();
        let chain = candidate.with_fallback(&baseline);
        assert_eq!(chain.to_string(), "Arial, monospace");
    }

    #[test]
    fn test_generic_parsing() {
        assert_eq!(GenericFamily::parse("Sans-Serif"), Some(GenericFamily::SansSerif));
        assert_eq!(GenericFamily::parse(" MONOSPACE "), Some(GenericFamily::Monospace));
        assert_eq!(GenericFamily::parse("Arial"), None);
        // Only CSS keywords are generic
        assert_eq!(GenericFamily::parse("mono"), None);
        assert_eq!(GenericFamily::parse("sans"), None);
        assert_eq!(
            FontStack::single("Mono").unwrap().families(),
            &[FamilyName::Named("Mono".to_string())]
        );
        assert_eq!(
            FontStack::parse("Sans, monospace").unwrap().families(),
            &[FamilyName::Named("Sans".to_string()), FamilyName::Generic(GenericFamily::Monospace)]
        );
        for generic in GenericFamily::ALL {
            assert_eq!(GenericFamily::parse(generic.keyword()), Some(generic));
        }
    }

    #[test]
    fn test_family_match_ignores_case() {
        let font = SystemFont::new("DejaVu Sans Mono", "/fonts/DejaVuSansMono.ttf");
        assert!(font.has_family("dejavu sans mono"));
        assert!(!font.has_family("DejaVu Sans"));
        assert!(font.monospace);
    }
}
