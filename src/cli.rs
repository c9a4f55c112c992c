//! Command-line definition
//!
//! Global options select where fonts are discovered; subcommands probe a
//! single font, detect a batch, or list installed families.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fontprobe_core::constants::{DEFAULT_BASELINE_FONT, DEFAULT_FONT_SIZE, DEFAULT_TEST_STRING, DEFAULT_TOLERANCE};

use crate::report::OutputFormat;

/// Detect which font families are installed
#[derive(Parser, Debug)]
#[command(name = "fontprobe")]
#[command(about = "Detect installed fonts by comparing rendered text widths")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Directory to search for fonts instead of the platform defaults (repeatable)
    #[arg(long = "font-dir", global = true, env = "FONTPROBE_FONT_DIRS", value_delimiter = ':')]
    pub font_dirs: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe a single font; exits 0 when available and 1 when not
    Probe {
        /// Font family to look for
        font: String,

        /// Reference family or stack
        #[arg(short, long, default_value = DEFAULT_BASELINE_FONT)]
        baseline: String,

        /// String measured in both fonts
        #[arg(short = 't', long = "test-string", default_value = DEFAULT_TEST_STRING)]
        test_string: String,

        /// Pixel size used for measurement
        #[arg(long, default_value_t = DEFAULT_FONT_SIZE)]
        size: f32,

        /// Width difference in pixels treated as identical
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f32,
    },

    /// Probe several fonts and print a report
    Detect {
        /// Font families to look for, added to any from --config
        fonts: Vec<String>,

        /// JSON configuration (fonts, testString, baselineFont, fontSize, tolerance)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured baseline family
        #[arg(short, long)]
        baseline: Option<String>,

        /// Override the configured test string
        #[arg(short = 't', long = "test-string")]
        test_string: Option<String>,

        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List installed font families
    List {
        /// Report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_probe_defaults() {
        let cli = Cli::parse_from(["fontprobe", "probe", "Arial"]);
        match cli.command {
            Commands::Probe { font, baseline, test_string, size, tolerance } => {
                assert_eq!(font, "Arial");
                assert_eq!(baseline, "monospace");
                assert_eq!(test_string, "abcdefghijklmnopqrstuvwxyz0123456789");
                assert_eq!(size, 72.0);
                assert_eq!(tolerance, 0.01);
            }
            other => panic!("Unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "fontprobe", "--verbose", "--font-dir", "/tmp/a", "--font-dir", "/tmp/b", "list", "--format", "json",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.font_dirs, vec![PathBuf::from("/tmp/a"), PathBuf::from("/tmp/b")]);
        assert!(matches!(cli.command, Commands::List { format: OutputFormat::Json }));
    }

    #[test]
    fn test_detect_args() {
        let cli = Cli::parse_from(["fontprobe", "detect", "Arial", "Georgia", "-b", "serif", "-c", "fonts.json"]);
        match cli.command {
            Commands::Detect { fonts, config, baseline, test_string, format } => {
                assert_eq!(fonts, vec!["Arial", "Georgia"]);
                assert_eq!(config, Some(PathBuf::from("fonts.json")));
                assert_eq!(baseline.as_deref(), Some("serif"));
                assert!(test_string.is_none());
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("Unexpected command: {other:?}"),
        }
    }
}
