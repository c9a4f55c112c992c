//! Measurement surface backed by installed font files

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use fontdue::{Font, FontSettings};

use crate::error::{ProbeError, ProbeResult};
use crate::font::*;
use crate::traits::{MeasurementSurface, TextExtent};

type FaceKey = (PathBuf, u32);

/// Measures text with the host's fonts, resolving stacks per character
///
/// Faces are parsed on first use and kept for the lifetime of the surface.
/// The cache only ever grows, so concurrent probes observe the same metrics.
pub struct FontdueSurface {
    /// Faces available for resolution
    fonts: Vec<SystemFont>,
    /// Parsed faces keyed by file and collection index
    loaded: RwLock<HashMap<FaceKey, Arc<Font>>>,
}

impl FontdueSurface {
    /// Surface over the fonts installed in the platform's default locations
    pub fn system() -> ProbeResult<Self> {
        Self::with_search_paths(&default_search_paths())
    }

    /// Surface over the fonts found under `search_paths`
    pub fn with_search_paths(search_paths: &[PathBuf]) -> ProbeResult<Self> {
        match discover_fonts(search_paths) {
            Ok(fonts) => Ok(Self::from_fonts(fonts)),
            Err(ProbeError::NoFontsAvailable) | Err(ProbeError::PlatformNotSupported) => Err(
                ProbeError::unsupported("no installed fonts to measure text with"),
            ),
            Err(e) => Err(e),
        }
    }

    /// Surface over an explicit set of faces
    pub fn from_fonts(fonts: Vec<SystemFont>) -> Self {
        Self {
            fonts,
            loaded: RwLock::new(HashMap::new()),
        }
    }

    pub fn fonts(&self) -> &[SystemFont] {
        &self.fonts
    }

    /// Get number of faces known to the surface
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Installed family names, sorted and deduplicated
    pub fn families(&self) -> Vec<String> {
        self.fonts
            .iter()
            .map(|font| font.name.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Whether a concrete family is installed
    pub fn has_family(&self, family: &str) -> bool {
        self.fonts.iter().any(|font| font.has_family(family))
    }

    /// Load a face, parsing it on first use
    fn load_font(&self, font: &SystemFont) -> ProbeResult<Arc<Font>> {
        let key = (font.path.clone(), font.index);
        if let Some(loaded) = self.loaded.read().unwrap_or_else(|e| e.into_inner()).get(&key) {
            return Ok(Arc::clone(loaded));
        }

        let parsed = Arc::new(parse_font(&font.path, font.index)?);
        let mut loaded = self.loaded.write().unwrap_or_else(|e| e.into_inner());
        // Another thread may have parsed the same face meanwhile; keep the first
        let entry = loaded.entry(key).or_insert(parsed);
        Ok(Arc::clone(entry))
    }

    /// Parsed faces for a stack, in resolution order
    fn load_chain(&self, stack: &FontStack) -> Vec<Arc<Font>> {
        resolve_stack(stack, &self.fonts)
            .into_iter()
            .filter_map(|font| match self.load_font(font) {
                Ok(loaded) => Some(loaded),
                Err(e) => {
                    tracing::warn!("Failed to load font {}: {}", font.name, e);
                    None
                }
            })
            .collect()
    }
}

impl MeasurementSurface for FontdueSurface {
    fn measure_text(&self, stack: &FontStack, text: &str, size: f32) -> ProbeResult<TextExtent> {
        let chain = self.load_chain(stack);
        if chain.is_empty() {
            return Err(ProbeError::unsupported(format!("no installed face for font stack {}", stack)));
        }

        Ok(measure_with_chain(&chain, text, size))
    }

    fn name(&self) -> &str {
        "fontdue"
    }
}

/// Lay out `text` along a fallback chain and sum the advances
///
/// Each character uses the first face that has a glyph for it; characters
/// no face covers take the first face's missing-glyph advance. Kerning only
/// applies between neighbours drawn with the same face.
fn measure_with_chain(chain: &[Arc<Font>], text: &str, size: f32) -> TextExtent {
    let mut width = 0.0;
    let mut used = vec![false; chain.len()];
    let mut previous: Option<(usize, char)> = None;

    for ch in text.chars() {
        let face = chain
            .iter()
            .position(|font| font.lookup_glyph_index(ch) != 0)
            .unwrap_or(0);
        let font = &chain[face];

        if let Some((prev_face, prev_ch)) = previous {
            if prev_face == face {
                width += font.horizontal_kern(prev_ch, ch, size).unwrap_or(0.0);
            }
        }

        width += font.metrics(ch, size).advance_width;
        used[face] = true;
        previous = Some((face, ch));
    }

    let height = chain
        .iter()
        .zip(&used)
        .filter(|(_, used)| **used)
        .filter_map(|(font, _)| font.horizontal_line_metrics(size))
        .map(|metrics| metrics.ascent - metrics.descent)
        .fold(0.0_f32, f32::max);

    TextExtent::new(width, height)
}

fn parse_font(path: &Path, index: u32) -> ProbeResult<Font> {
    let data = std::fs::read(path)?;
    let settings = FontSettings {
        collection_index: index,
        ..Default::default()
    };

    Font::from_bytes(data, settings).map_err(|message| ProbeError::FontLoad {
        path: path.to_path_buf(),
        message: message.to_string(),
    })
}
