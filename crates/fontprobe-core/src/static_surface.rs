//! Deterministic measurement surface for tests and headless use

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{ProbeError, ProbeResult};
use crate::font::{FamilyName, FontStack, GenericFamily};
use crate::traits::{MeasurementSurface, TextExtent};

/// Advances of one in-memory face, in em units
#[derive(Debug, Clone)]
struct StaticFace {
    default_advance: f32,
    advances: HashMap<char, f32>,
    /// Ascent plus descent, in em units
    line_height: f32,
}

impl StaticFace {
    fn advance(&self, ch: char) -> f32 {
        self.advances.get(&ch).copied().unwrap_or(self.default_advance)
    }
}

/// Surface over a fixed table of faces
///
/// The first family of a stack that is in the table measures the whole
/// string. Generic families resolve through explicit aliases.
pub struct StaticSurface {
    faces: HashMap<String, StaticFace>,
    generics: HashMap<GenericFamily, String>,
    supported: bool,
    measurements: AtomicUsize,
}

impl Default for StaticSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticSurface {
    /// Create an empty surface
    pub fn new() -> Self {
        StaticSurface {
            faces: HashMap::new(),
            generics: HashMap::new(),
            supported: true,
            measurements: AtomicUsize::new(0),
        }
    }

    /// A surface that cannot measure anything
    pub fn unsupported() -> Self {
        StaticSurface {
            supported: false,
            ..Self::new()
        }
    }

    /// A small desktop-like font set
    ///
    /// `monospace` is DejaVu Sans Mono, `serif` is DejaVu Serif and
    /// `sans-serif` is Arial.
    pub fn typical() -> Self {
        Self::new()
            .with_face("DejaVu Sans Mono", 0.602)
            .with_face_advances(
                "DejaVu Serif",
                0.55,
                &[('a', 0.596), ('b', 0.64), ('c', 0.56), ('i', 0.32), ('l', 0.32), ('m', 0.948), ('w', 0.856), ('0', 0.636)],
            )
            .with_face_advances(
                "Arial",
                0.556,
                &[('c', 0.5), ('f', 0.278), ('i', 0.222), ('j', 0.222), ('l', 0.222), ('m', 0.833), ('r', 0.333), ('t', 0.278), ('w', 0.722)],
            )
            .with_generic(GenericFamily::Monospace, "DejaVu Sans Mono")
            .with_generic(GenericFamily::Serif, "DejaVu Serif")
            .with_generic(GenericFamily::SansSerif, "Arial")
            .with_generic(GenericFamily::SystemUi, "Arial")
    }

    /// Add a face where every character has the same advance
    pub fn with_face(self, family: &str, advance: f32) -> Self {
        self.with_face_advances(family, advance, &[])
    }

    /// Add a face with per-character advance overrides
    pub fn with_face_advances(mut self, family: &str, default_advance: f32, advances: &[(char, f32)]) -> Self {
        self.faces.insert(
            normalize(family),
            StaticFace {
                default_advance,
                advances: advances.iter().copied().collect(),
                line_height: 1.17,
            },
        );
        self
    }

    /// Map a generic family to an installed face
    pub fn with_generic(mut self, generic: GenericFamily, family: &str) -> Self {
        self.generics.insert(generic, normalize(family));
        self
    }

    /// Number of successful and failed measurements so far
    pub fn measurements(&self) -> usize {
        self.measurements.load(Ordering::Relaxed)
    }

    fn resolve(&self, family: &FamilyName) -> Option<&StaticFace> {
        match family {
            FamilyName::Named(name) => self.faces.get(&normalize(name)),
            FamilyName::Generic(generic) => self.generics.get(generic).and_then(|name| self.faces.get(name)),
        }
    }
}

impl MeasurementSurface for StaticSurface {
    fn measure_text(&self, stack: &FontStack, text: &str, size: f32) -> ProbeResult<TextExtent> {
        self.measurements.fetch_add(1, Ordering::Relaxed);

        if !self.supported {
            return Err(ProbeError::unsupported("static surface has no measurement capability"));
        }

        let face = stack
            .families()
            .iter()
            .find_map(|family| self.resolve(family))
            .ok_or_else(|| ProbeError::unsupported(format!("no face for font stack {}", stack)))?;

        let width = text.chars().map(|ch| face.advance(ch) * size).sum();
        Ok(TextExtent::new(width, face.line_height * size))
    }

    fn name(&self) -> &str {
        "static"
    }
}

fn normalize(family: &str) -> String {
    family.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_installed_family_wins() {
        let surface = StaticSurface::typical();
        let stack = FontStack::parse("NoSuchFontXYZ, Arial, monospace").unwrap();
        let extent = surface.measure_text(&stack, "ii", 10.0).unwrap();
        assert!((extent.width - 4.44).abs() < 1e-4);
        assert_eq!(surface.measurements(), 1);
    }

    #[test]
    fn test_generic_aliases() {
        let surface = StaticSurface::typical();
        let mono = FontStack::single("monospace").unwrap();
        let named = FontStack::single("dejavu sans mono").unwrap();
        assert_eq!(
            surface.measure_text(&mono, "abc", 72.0).unwrap(),
            surface.measure_text(&named, "abc", 72.0).unwrap()
        );

        // No alias configured for cursive
        let cursive = FontStack::single("cursive").unwrap();
        assert!(surface.measure_text(&cursive, "abc", 72.0).is_err());
    }

    #[test]
    fn test_unsupported_surface() {
        let surface = StaticSurface::unsupported();
        let stack = FontStack::single("monospace").unwrap();
        let err = surface.measure_text(&stack, "abc", 72.0).unwrap_err();
        assert!(matches!(err, ProbeError::UnsupportedEnvironment { .. }));
    }
}
