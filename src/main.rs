// src/main.rs
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use fontprobe::{
    render_families, render_report, Cli, Commands, FontAvailabilityProbe, FontdueSurface, ProbeConfig, ProbeRequest,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let surface = if cli.font_dirs.is_empty() {
        FontdueSurface::system()
    } else {
        FontdueSurface::with_search_paths(&cli.font_dirs)
    }
    .context("no font measurement surface available")?;
    tracing::debug!("Measuring with {} font faces", surface.font_count());

    match cli.command {
        Commands::Probe { font, baseline, test_string, size, tolerance } => {
            let probe = FontAvailabilityProbe::new(surface)
                .with_font_size(size)?
                .with_tolerance(tolerance)?;
            let request = ProbeRequest::new(&font, &test_string, &baseline)?;
            let measurement = probe
                .measure(&request)
                .with_context(|| format!("failed to probe font {:?}", font))?;

            if measurement.available {
                println!("{}: available", request.font_name());
                Ok(ExitCode::SUCCESS)
            } else {
                println!("{}: unavailable", request.font_name());
                Ok(ExitCode::FAILURE)
            }
        }

        Commands::Detect { fonts, config, baseline, test_string, format } => {
            let mut probe_config = match &config {
                Some(path) => ProbeConfig::load(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => ProbeConfig::default(),
            };
            probe_config = probe_config.with_fonts(&fonts);
            if let Some(baseline) = baseline {
                probe_config = probe_config.with_baseline_font(&baseline);
            }
            if let Some(test_string) = test_string {
                probe_config = probe_config.with_test_string(&test_string);
            }

            if probe_config.fonts.is_empty() {
                anyhow::bail!("no fonts to detect; pass font names or --config");
            }

            let probe = FontAvailabilityProbe::with_config(surface, &probe_config)?;
            let results = probe.detect(&probe_config)?;
            let report = render_report(&results, &probe_config.baseline_font, &probe_config.test_string, format)?;
            emit(&report);
            Ok(ExitCode::SUCCESS)
        }

        Commands::List { format } => {
            emit(&render_families(&surface.families(), format)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn emit(report: &str) {
    if report.ends_with('\n') {
        print!("{}", report);
    } else {
        println!("{}", report);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
