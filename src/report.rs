// src/report.rs
use std::fmt::Write as _;

use clap::ValueEnum;
use fontprobe_core::FontAvailability;
use serde::Serialize;

use crate::error::ReportResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DetectionReport<'a> {
    baseline_font: &'a str,
    test_string: &'a str,
    fonts: &'a [FontAvailability],
}

/// Render batch detection results
pub fn render_report(
    results: &[FontAvailability],
    baseline_font: &str,
    test_string: &str,
    format: OutputFormat,
) -> ReportResult<String> {
    match format {
        OutputFormat::Json => {
            let report = DetectionReport {
                baseline_font,
                test_string,
                fonts: results,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Text => Ok(render_text(results, baseline_font)),
    }
}

fn render_text(results: &[FontAvailability], baseline_font: &str) -> String {
    let name_width = results
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("FONT".len());

    let mut out = String::new();
    let _ = writeln!(out, "{:<name_width$}  {:<11}  {:>9}  {:>9}", "FONT", "STATUS", "WIDTH", "BASELINE");
    for result in results {
        let status = if result.available { "available" } else { "unavailable" };
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<11}  {:>9.2}  {:>9.2}",
            result.name, status, result.candidate_width, result.baseline_width
        );
    }

    let available = results.iter().filter(|r| r.available).count();
    let _ = writeln!(out, "{} of {} fonts available (baseline: {})", available, results.len(), baseline_font);
    out
}

/// Render installed family names
pub fn render_families(families: &[String], format: OutputFormat) -> ReportResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(families)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for family in families {
                let _ = writeln!(out, "{}", family);
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<FontAvailability> {
        vec![
            FontAvailability {
                name: "Arial".to_string(),
                available: true,
                candidate_width: 276.19,
                baseline_width: 303.41,
            },
            FontAvailability {
                name: "NoSuchFontXYZ".to_string(),
                available: false,
                candidate_width: 303.41,
                baseline_width: 303.41,
            },
        ]
    }

    #[test]
    fn test_text_report() {
        let text = render_report(&sample(), "monospace", "abc0123", OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("FONT"));
        assert!(lines[1].starts_with("Arial          available"));
        assert!(lines[2].starts_with("NoSuchFontXYZ  unavailable"));
        assert!(lines[1].contains("276.19"));
        assert_eq!(lines[3], "1 of 2 fonts available (baseline: monospace)");
    }

    #[test]
    fn test_json_report() {
        let json = render_report(&sample(), "monospace", "abc0123", OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["baselineFont"], "monospace");
        assert_eq!(value["testString"], "abc0123");
        assert_eq!(value["fonts"][0]["name"], "Arial");
        assert_eq!(value["fonts"][0]["available"], true);
        assert_eq!(value["fonts"][1]["available"], false);
        assert!(value["fonts"][1]["candidateWidth"].is_number());
    }

    #[test]
    fn test_family_listing() {
        let families = vec!["Arial".to_string(), "DejaVu Sans Mono".to_string()];
        assert_eq!(render_families(&families, OutputFormat::Text).unwrap(), "Arial\nDejaVu Sans Mono\n");

        let json = render_families(&families, OutputFormat::Json).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, families);
    }
}
