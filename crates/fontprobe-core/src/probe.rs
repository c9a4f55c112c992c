//! Font availability probing
//!
//! A probe renders the test string twice: once with the baseline family
//! alone and once with the fallback chain `candidate, baseline`. When the
//! candidate is missing the renderer falls back to the baseline and both
//! widths match; when it is installed its own glyph metrics show up as a
//! width difference.
//!
//! Probing a font against itself (`monospace` vs `monospace`) always reports
//! unavailable, since both stacks resolve to the same face.

use serde::Serialize;

use crate::config::{require_text, validate_measurement, FontSpec, ProbeConfig};
use crate::constants::{DEFAULT_BASELINE_FONT, DEFAULT_FONT_SIZE, DEFAULT_TEST_STRING, DEFAULT_TOLERANCE};
use crate::error::ProbeResult;
use crate::font::FontStack;
use crate::traits::MeasurementSurface;

/// One detection call's inputs, validated at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    font_name: String,
    test_string: String,
    baseline_font: String,
}

impl ProbeRequest {
    pub fn new(font_name: &str, test_string: &str, baseline_font: &str) -> ProbeResult<Self> {
        require_text("font_name", font_name)?;
        require_text("test_string", test_string)?;
        require_text("baseline_font", baseline_font)?;

        Ok(Self {
            font_name: font_name.trim().to_string(),
            test_string: test_string.to_string(),
            baseline_font: baseline_font.trim().to_string(),
        })
    }

    /// Request with the default test string and baseline
    pub fn for_font(font_name: &str) -> ProbeResult<Self> {
        Self::new(font_name, DEFAULT_TEST_STRING, DEFAULT_BASELINE_FONT)
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    pub fn test_string(&self) -> &str {
        &self.test_string
    }

    pub fn baseline_font(&self) -> &str {
        &self.baseline_font
    }

    /// The baseline may be a stack such as `Menlo, monospace`
    fn baseline_stack(&self) -> ProbeResult<FontStack> {
        FontStack::parse(&self.baseline_font)
    }

    /// The candidate is taken verbatim, so names containing commas stay whole
    fn candidate_stack(&self) -> ProbeResult<FontStack> {
        Ok(FontStack::single(&self.font_name)?.with_fallback(&self.baseline_stack()?))
    }
}

/// Raw widths behind one probe decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeMeasurement {
    pub baseline_width: f32,
    pub candidate_width: f32,
    pub available: bool,
}

/// One row of a batch detection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontAvailability {
    pub name: String,
    pub available: bool,
    pub candidate_width: f32,
    pub baseline_width: f32,
}

/// Decides font availability by comparing measured widths
pub struct FontAvailabilityProbe<S> {
    surface: S,
    font_size: f32,
    tolerance: f32,
}

impl<S: MeasurementSurface> FontAvailabilityProbe<S> {
    /// Create a probe with the default size and tolerance
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            font_size: DEFAULT_FONT_SIZE,
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Create a probe using the measurement settings of `config`
    pub fn with_config(surface: S, config: &ProbeConfig) -> ProbeResult<Self> {
        validate_measurement(config.font_size, config.tolerance)?;
        Ok(Self {
            surface,
            font_size: config.font_size,
            tolerance: config.tolerance,
        })
    }

    pub fn with_font_size(mut self, font_size: f32) -> ProbeResult<Self> {
        validate_measurement(font_size, self.tolerance)?;
        self.font_size = font_size;
        Ok(self)
    }

    pub fn with_tolerance(mut self, tolerance: f32) -> ProbeResult<Self> {
        validate_measurement(self.font_size, tolerance)?;
        self.tolerance = tolerance;
        Ok(self)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    /// Whether `request.font_name` renders differently from the baseline
    pub fn probe(&self, request: &ProbeRequest) -> ProbeResult<bool> {
        Ok(self.measure(request)?.available)
    }

    /// Measure both stacks and decide
    pub fn measure(&self, request: &ProbeRequest) -> ProbeResult<ProbeMeasurement> {
        let baseline_width = self.baseline_width(request)?;
        self.measure_against(request, baseline_width)
    }

    /// Probe every font of `config`, measuring the baseline once
    pub fn detect(&self, config: &ProbeConfig) -> ProbeResult<Vec<FontAvailability>> {
        config.validate()?;
        if config.fonts.is_empty() {
            return Ok(Vec::new());
        }

        let probe = FontAvailabilityProbe {
            surface: &self.surface,
            font_size: config.font_size,
            tolerance: config.tolerance,
        };

        let requests = config
            .fonts
            .iter()
            .map(|FontSpec { name }| ProbeRequest::new(name, &config.test_string, &config.baseline_font))
            .collect::<ProbeResult<Vec<_>>>()?;

        let baseline_width = probe.baseline_width(&requests[0])?;
        let mut results = Vec::with_capacity(requests.len());

        for request in &requests {
            let measurement = probe.measure_against(request, baseline_width)?;
            results.push(FontAvailability {
                name: request.font_name().to_string(),
                available: measurement.available,
                candidate_width: measurement.candidate_width,
                baseline_width: measurement.baseline_width,
            });
        }

        let available = results.iter().filter(|r| r.available).count();
        tracing::info!(
            "Detected {}/{} fonts against baseline {:?} using {} surface",
            available,
            results.len(),
            config.baseline_font,
            self.surface.name()
        );

        Ok(results)
    }

    fn baseline_width(&self, request: &ProbeRequest) -> ProbeResult<f32> {
        let stack = request.baseline_stack()?;
        Ok(self.surface.measure_text(&stack, request.test_string(), self.font_size)?.width)
    }

    fn measure_against(&self, request: &ProbeRequest, baseline_width: f32) -> ProbeResult<ProbeMeasurement> {
        let stack = request.candidate_stack()?;
        let candidate_width = self
            .surface
            .measure_text(&stack, request.test_string(), self.font_size)?
            .width;
        let available = (candidate_width - baseline_width).abs() > self.tolerance;

        tracing::debug!(
            font = request.font_name(),
            baseline = request.baseline_font(),
            baseline_width,
            candidate_width,
            available,
            "probed font"
        );

        Ok(ProbeMeasurement {
            baseline_width,
            candidate_width,
            available,
        })
    }
}
