use crate::error::ProbeResult;
use crate::font::FontStack;

/// Extents of a measured run of text, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    /// Sum of advances, including kerning
    pub width: f32,
    /// Ascent plus descent of the tallest face used
    pub height: f32,
}

impl TextExtent {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Anything able to report text extents for a font stack
///
/// Implementations resolve `stack` the way a renderer would: the first
/// available family wins, and families that are not installed are skipped.
/// A surface that cannot measure at all reports
/// [`ProbeError::UnsupportedEnvironment`](crate::ProbeError::UnsupportedEnvironment).
pub trait MeasurementSurface: Send + Sync {
    fn measure_text(&self, stack: &FontStack, text: &str, size: f32) -> ProbeResult<TextExtent>;

    /// Short label used in logs
    fn name(&self) -> &str {
        "surface"
    }
}

impl<S: MeasurementSurface + ?Sized> MeasurementSurface for &S {
    fn measure_text(&self, stack: &FontStack, text: &str, size: f32) -> ProbeResult<TextExtent> {
        (**self).measure_text(stack, text, size)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: MeasurementSurface + ?Sized> MeasurementSurface for Box<S> {
    fn measure_text(&self, stack: &FontStack, text: &str, size: f32) -> ProbeResult<TextExtent> {
        (**self).measure_text(stack, text, size)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
