//! System font discovery for different platforms

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::constants::{FONT_EXTENSIONS, MAX_SCAN_DEPTH, MONOSPACE_TEST_CHARS, MONOSPACE_TOLERANCE};
use crate::error::{ProbeError, ProbeResult};
use crate::font::*;

/// Discover available fonts
///
/// On Linux with the `fontconfig` feature, asks fontconfig first and falls
/// back to scanning `search_paths` when it reports nothing. Everywhere else
/// the search paths are scanned directly.
pub fn discover_fonts(search_paths: &[PathBuf]) -> ProbeResult<Vec<SystemFont>> {
    #[cfg(all(target_os = "linux", feature = "fontconfig"))]
    {
        match discover_fonts_fontconfig() {
            Ok(fonts) if !fonts.is_empty() => return Ok(fonts),
            Ok(_) => tracing::debug!("fontconfig reported no fonts, scanning directories"),
            Err(e) => tracing::warn!("Fontconfig discovery failed: {}", e),
        }
    }

    let fonts = discover_fonts_manual(search_paths)?;
    if fonts.is_empty() {
        return Err(ProbeError::NoFontsAvailable);
    }

    tracing::debug!("Discovered {} font faces in {} search paths", fonts.len(), search_paths.len());
    Ok(fonts)
}

/// Discover fonts using the fontconfig library
///
/// fontconfig only supplies the face list; names and style are read from
/// each file so both discovery paths describe faces identically.
#[cfg(all(target_os = "linux", feature = "fontconfig"))]
fn discover_fonts_fontconfig() -> ProbeResult<Vec<SystemFont>> {
    let fc = fontconfig::Fontconfig::new().ok_or(ProbeError::PlatformNotSupported)?;
    let pattern = fontconfig::Pattern::new(&fc);
    let font_set = fontconfig::list_fonts(&pattern, None);

    let mut fonts = Vec::new();
    let mut seen = HashSet::new();

    for font in font_set.iter() {
        let Some(file) = font.filename() else {
            continue;
        };
        let index = font.face_index().unwrap_or(0).max(0) as u32;
        if !seen.insert((file.to_string(), index)) {
            continue;
        }

        let path = Path::new(file);
        let Ok(data) = std::fs::read(path) else {
            continue;
        };
        if let Some(system_font) = analyze_face(path, &data, index) {
            fonts.push(system_font);
        }
    }

    Ok(fonts)
}

/// Recursive font directory scanning
fn discover_fonts_manual(search_paths: &[PathBuf]) -> ProbeResult<Vec<SystemFont>> {
    let mut files = Vec::new();
    for search_path in search_paths {
        collect_font_files(search_path, 0, &mut files);
    }
    files.sort();

    let mut fonts = Vec::new();
    let mut seen = HashSet::new();

    for path in files {
        for font in analyze_font_file(&path) {
            if seen.insert((font.name.to_lowercase(), font.path.clone(), font.index)) {
                fonts.push(font);
            }
        }
    }

    Ok(fonts)
}

fn collect_font_files(dir: &Path, depth: usize, files: &mut Vec<PathBuf>) {
    if depth > MAX_SCAN_DEPTH {
        return;
    }

    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_font_files(&path, depth + 1, files);
        } else if is_font_file(&path) {
            files.push(path);
        }
    }
}

/// Check if a file is likely a font file
pub fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| FONT_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}

/// Analyze a font file, returning one entry per face it holds
fn analyze_font_file(path: &Path) -> Vec<SystemFont> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!("Skipping unreadable font {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let face_count = ttf_parser::fonts_in_collection(&data).unwrap_or(1);
    (0..face_count)
        .filter_map(|index| analyze_face(path, &data, index))
        .collect()
}

/// Describe one face: family from the name table, style from OS/2
fn analyze_face(path: &Path, data: &[u8], index: u32) -> Option<SystemFont> {
    let face = match ttf_parser::Face::parse(data, index) {
        Ok(face) => face,
        Err(e) => {
            tracing::debug!("Skipping invalid font {} (face {}): {}", path.display(), index, e);
            return None;
        }
    };

    let name = extract_family_name(face.names().into_iter().map(|name| (name.name_id, name.to_string())))
        .unwrap_or_else(|| {
            path.file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string()
        });

    let settings = fontdue::FontSettings {
        collection_index: index,
        ..Default::default()
    };
    let metrics_monospace = fontdue::Font::from_bytes(data, settings)
        .map(|font| check_monospace_property(&font))
        .unwrap_or(false);

    Some(SystemFont {
        monospace: face.is_monospaced() || is_monospace_font(&name) || metrics_monospace,
        weight: if face.is_bold() { FontWeight::Bold } else { FontWeight::Normal },
        slant: if face.is_italic() || face.is_oblique() {
            FontSlant::Italic
        } else {
            FontSlant::Normal
        },
        index,
        ..SystemFont::new(&name, path)
    })
}

/// Family name from name table records
///
/// The typographic family (ID 16) groups every style under one name; older
/// fonts only carry the legacy family (ID 1). The full name (ID 4) includes
/// the style and is never used.
pub(crate) fn extract_family_name<I>(records: I) -> Option<String>
where
    I: IntoIterator<Item = (u16, Option<String>)>,
{
    let mut typographic = None;
    let mut legacy = None;

    for (name_id, value) in records {
        let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
            continue;
        };
        match name_id {
            ttf_parser::name_id::TYPOGRAPHIC_FAMILY if typographic.is_none() => typographic = Some(value),
            ttf_parser::name_id::FAMILY if legacy.is_none() => legacy = Some(value),
            _ => {}
        }
    }

    typographic.or(legacy)
}

/// Check if font is monospace by comparing character advances
pub(crate) fn check_monospace_property(font: &fontdue::Font) -> bool {
    let default_size = 12.0;
    let widths: Vec<f32> = MONOSPACE_TEST_CHARS
        .iter()
        .filter(|&&ch| font.lookup_glyph_index(ch) != 0)
        .map(|&ch| font.metrics(ch, default_size).advance_width)
        .collect();

    let Some(&first_width) = widths.first() else {
        return false;
    };
    if widths.len() < MONOSPACE_TEST_CHARS.len() / 2 {
        return false;
    }

    let tolerance = first_width * MONOSPACE_TOLERANCE;
    widths.iter().all(|&w| (w - first_width).abs() <= tolerance)
}

/// Get platform-specific font search paths
pub fn default_search_paths() -> Vec<PathBuf> {
    #[cfg(target_os = "linux")]
    let mut paths: Vec<PathBuf> = vec!["/usr/share/fonts".into(), "/usr/local/share/fonts".into()];

    #[cfg(target_os = "macos")]
    let mut paths: Vec<PathBuf> = vec!["/System/Library/Fonts".into(), "/Library/Fonts".into()];

    #[cfg(target_os = "windows")]
    let mut paths: Vec<PathBuf> = vec![
        "C:\\Windows\\Fonts".into(),
        "C:\\Program Files\\Common Files\\microsoft shared\\Fonts".into(),
    ];

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    let mut paths: Vec<PathBuf> = Vec::new();

    // Per-user font directory (~/.local/share/fonts, ~/Library/Fonts)
    if let Some(user_fonts) = dirs::font_dir() {
        paths.push(user_fonts);
    }
    #[cfg(target_os = "linux")]
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".fonts"));
    }

    paths.dedup();
    paths
}
