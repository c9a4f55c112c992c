//! Font stack resolution against installed faces
//!
//! Concrete families match installed faces by name. Generic families pick the
//! best-scoring installed face:
//! 1. Name markers for the generic (e.g. "Mono", "Serif")
//! 2. Known good families for the generic
//! 3. Regular weight, upright slant
//! 4. Name order as the final tie-break

use std::cmp::Ordering;

use crate::font::*;

/// Resolve every family of `stack`, in order, skipping misses and duplicates
pub fn resolve_stack<'a>(stack: &FontStack, fonts: &'a [SystemFont]) -> Vec<&'a SystemFont> {
    let mut chain: Vec<&SystemFont> = Vec::new();

    for family in stack.families() {
        if let Some(font) = resolve_family(family, fonts) {
            if !chain.iter().any(|f| f.path == font.path && f.index == font.index) {
                chain.push(font);
            }
        }
    }

    chain
}

/// Resolve a single stack entry to an installed face
pub fn resolve_family<'a>(family: &FamilyName, fonts: &'a [SystemFont]) -> Option<&'a SystemFont> {
    match family {
        FamilyName::Named(name) => best_face(fonts.iter().filter(|font| font.has_family(name))),
        FamilyName::Generic(generic) => resolve_generic(*generic, fonts),
    }
}

fn resolve_generic(generic: GenericFamily, fonts: &[SystemFont]) -> Option<&SystemFont> {
    let mut scored: Vec<(f64, &SystemFont)> = fonts
        .iter()
        .map(|font| (calculate_generic_score(generic, font), font))
        .filter(|(score, _)| *score > 0.0)
        .collect();

    // Sort by score descending, then by name for a stable pick
    scored.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.name.cmp(&b.1.name))
    });

    match scored.first() {
        Some((_, font)) => Some(*font),
        // Cursive and fantasy faces are rare; browsers substitute a sans face
        None => match generic {
            GenericFamily::Cursive | GenericFamily::Fantasy => resolve_generic(GenericFamily::SansSerif, fonts),
            _ => None,
        },
    }
}

/// Pick the regular upright face of a family when several are installed
fn best_face<'a>(faces: impl Iterator<Item = &'a SystemFont>) -> Option<&'a SystemFont> {
    faces.max_by(|a, b| {
        style_score(a)
            .partial_cmp(&style_score(b))
            .unwrap_or(Ordering::Equal)
            // Prefer the lexically first path on ties so resolution is stable
            .then_with(|| b.path.cmp(&a.path))
    })
}

fn style_score(font: &SystemFont) -> f64 {
    let weight = match font.weight {
        FontWeight::Normal => 50.0,
        FontWeight::Bold => 10.0,
    };
    let slant = match font.slant {
        FontSlant::Normal => 50.0,
        FontSlant::Italic => 10.0,
    };
    weight + slant
}

/// Calculate suitability of a face for a generic family; zero means unsuitable
fn calculate_generic_score(generic: GenericFamily, font: &SystemFont) -> f64 {
    let name = font.name.to_lowercase();
    let mut score = match generic {
        GenericFamily::Monospace => {
            if font.monospace || is_monospace_font(&font.name) {
                500.0
            } else {
                0.0
            }
        }
        GenericFamily::Serif => {
            if is_serif_font(&name) {
                500.0
            } else {
                0.0
            }
        }
        GenericFamily::SansSerif | GenericFamily::SystemUi => {
            if is_sans_font(&name) && !font.monospace {
                500.0
            } else {
                0.0
            }
        }
        GenericFamily::Cursive => {
            if ["script", "cursive", "comic", "brush", "chancery", "hand"].iter().any(|m| name.contains(m)) {
                500.0
            } else {
                0.0
            }
        }
        GenericFamily::Fantasy => {
            if ["fantasy", "impact", "papyrus", "decorative"].iter().any(|m| name.contains(m)) {
                500.0
            } else {
                0.0
            }
        }
    };

    if score == 0.0 {
        return 0.0;
    }

    if is_known_default(generic, &name) {
        score += 100.0;
    }

    score + style_score(font)
}

/// Check if font name indicates monospace characteristics
pub fn is_monospace_font(name: &str) -> bool {
    let name_lower = name.to_lowercase();

    // Common monospace font indicators
    name_lower.contains("mono") ||
    name_lower.contains("typewriter") ||
    name_lower.contains("console") ||
    name_lower.contains("terminal") ||
    name_lower.contains("code") ||
    name_lower.contains("fixed") ||
    // Specific monospace font families
    name_lower.contains("courier") ||
    name_lower.contains("menlo") ||
    name_lower.contains("consolas") ||
    name_lower.contains("inconsolata") ||
    name_lower.contains("hack") ||
    name_lower.contains("terminus")
}

fn is_serif_font(name_lower: &str) -> bool {
    if name_lower.contains("sans") || is_monospace_font(name_lower) {
        return false;
    }
    ["serif", "times", "georgia", "roman", "garamond", "baskerville", "palatino", "cambria", "libertine", "charter"]
        .iter()
        .any(|marker| name_lower.contains(marker))
}

fn is_sans_font(name_lower: &str) -> bool {
    if name_lower.contains("sans") {
        return true;
    }
    ["arial", "helvetica", "verdana", "tahoma", "segoe", "roboto", "ubuntu", "cantarell", "open sans", "inter", "lato"]
        .iter()
        .any(|marker| name_lower.contains(marker))
}

/// Families commonly configured as the platform default for a generic
fn is_known_default(generic: GenericFamily, name_lower: &str) -> bool {
    match generic {
        GenericFamily::Monospace => matches!(
            name_lower,
            "dejavu sans mono" | "liberation mono" | "noto sans mono" | "menlo" | "consolas" | "courier new"
        ),
        GenericFamily::Serif => matches!(
            name_lower,
            "dejavu serif" | "liberation serif" | "noto serif" | "times new roman" | "times"
        ),
        GenericFamily::SansSerif | GenericFamily::SystemUi => matches!(
            name_lower,
            "dejavu sans" | "liberation sans" | "noto sans" | "arial" | "helvetica" | "segoe ui"
        ),
        GenericFamily::Cursive | GenericFamily::Fantasy => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(name: &str, path: &str) -> SystemFont {
        SystemFont::new(name, path)
    }

    fn sample_fonts() -> Vec<SystemFont> {
        vec![
            face("DejaVu Sans Mono", "/fonts/DejaVuSansMono.ttf"),
            face("DejaVu Sans", "/fonts/DejaVuSans.ttf"),
            face("DejaVu Serif", "/fonts/DejaVuSerif.ttf"),
            face("Arial", "/fonts/arial.ttf"),
            SystemFont {
                weight: FontWeight::Bold,
                ..face("Arial", "/fonts/arialbd.ttf")
            },
        ]
    }

    #[test]
    fn test_named_family_resolution() {
        let fonts = sample_fonts();
        let family = FamilyName::Named("arial".to_string());
        let resolved = resolve_family(&family, &fonts).unwrap();

        // Regular face wins over bold
        assert_eq!(resolved.path, std::path::PathBuf::from("/fonts/arial.ttf"));

        let missing = FamilyName::Named("NoSuchFontXYZ".to_string());
        assert!(resolve_family(&missing, &fonts).is_none());
    }

    #[test]
    fn test_generic_resolution() {
        let fonts = sample_fonts();
        let resolve = |generic| resolve_family(&FamilyName::Generic(generic), &fonts).map(|f| f.name.clone());

        assert_eq!(resolve(GenericFamily::Monospace).as_deref(), Some("DejaVu Sans Mono"));
        assert_eq!(resolve(GenericFamily::Serif).as_deref(), Some("DejaVu Serif"));
        assert_eq!(resolve(GenericFamily::SansSerif).as_deref(), Some("Arial"));
        // No cursive face installed, falls back to sans
        assert_eq!(resolve(GenericFamily::Cursive).as_deref(), Some("Arial"));
    }

    #[test]
    fn test_generic_without_candidates() {
        let fonts = vec![face("DejaVu Sans", "/fonts/DejaVuSans.ttf")];
        assert!(resolve_family(&FamilyName::Generic(GenericFamily::Monospace), &fonts).is_none());
        assert!(resolve_family(&FamilyName::Generic(GenericFamily::Serif), &fonts).is_none());
    }

    #[test]
    fn test_stack_resolution_skips_misses_and_duplicates() {
        let fonts = sample_fonts();
        let stack = FontStack::parse("NoSuchFontXYZ, \"DejaVu Sans Mono\", monospace, serif").unwrap();
        let chain = resolve_stack(&stack, &fonts);
        let names: Vec<&str> = chain.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["DejaVu Sans Mono", "DejaVu Serif"]);
    }

    #[test]
    fn test_monospace_detection() {
        assert!(is_monospace_font("DejaVu Sans Mono"));
        assert!(is_monospace_font("Liberation Mono"));
        assert!(is_monospace_font("Source Code Pro"));
        assert!(is_monospace_font("Courier New"));

        assert!(!is_monospace_font("DejaVu Sans"));
        assert!(!is_monospace_font("Arial"));
        assert!(!is_monospace_font("Times New Roman"));
    }

    #[test]
    fn test_serif_and_sans_markers() {
        assert!(is_serif_font("times new roman"));
        assert!(!is_serif_font("dejavu sans"));
        assert!(!is_serif_font("liberation mono"));
        assert!(is_sans_font("helvetica"));
        assert!(is_sans_font("noto sans"));
    }
}
