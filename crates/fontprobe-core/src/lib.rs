//! fontprobe core - font availability detection
//!
//! This crate decides whether a font family is available for rendering by
//! measuring a test string with the candidate font (falling back to a
//! baseline generic family) and comparing the width against the baseline
//! alone. Measurement is abstracted behind [`MeasurementSurface`]; the
//! [`FontdueSurface`] measures with the fonts installed on the host.
//!
//! ```no_run
//! use fontprobe_core::{FontAvailabilityProbe, FontdueSurface, ProbeRequest};
//!
//! let probe = FontAvailabilityProbe::new(FontdueSurface::system()?);
//! let request = ProbeRequest::new("Arial", "abc0123", "monospace")?;
//! println!("Arial available: {}", probe.probe(&request)?);
//! # Ok::<(), fontprobe_core::ProbeError>(())
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod font;
pub mod probe;
pub mod static_surface;
pub mod traits;

// Re-export main types
pub use config::{FontSpec, ProbeConfig};
pub use error::{ProbeError, ProbeResult};
pub use font::{FamilyName, FontStack, FontdueSurface, GenericFamily, SystemFont};
pub use probe::{FontAvailability, FontAvailabilityProbe, ProbeMeasurement, ProbeRequest};
pub use static_surface::StaticSurface;
pub use traits::{MeasurementSurface, TextExtent};
