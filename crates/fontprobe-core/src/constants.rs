// src/constants.rs

// Probe defaults
pub const DEFAULT_TEST_STRING: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
pub const DEFAULT_BASELINE_FONT: &str = "monospace";

// Large sizes magnify per-glyph metric differences
pub const DEFAULT_FONT_SIZE: f32 = 72.0;
pub const DEFAULT_TOLERANCE: f32 = 0.01;

// Discovery
pub const MAX_SCAN_DEPTH: usize = 8;
pub const FONT_EXTENSIONS: [&str; 4] = ["ttf", "otf", "ttc", "otc"];

// Characters used to decide whether a face is fixed-pitch
pub const MONOSPACE_TEST_CHARS: [char; 8] = ['i', 'm', 'w', '1', '8', 'a', 'A', '@'];
pub const MONOSPACE_TOLERANCE: f32 = 0.05;
