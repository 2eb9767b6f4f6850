//! # Swatch
//!
//! Colour analysis for uploaded images: dominant-colour palettes built by seeded
//! k-means clustering, and exact single-pixel lookups.
//!
//! ```rust,no_run
//! use swatch::{PaletteOptions, extract_palette, probe_pixel};
//!
//! let bytes = std::fs::read("photo.jpg")?;
//! let palette = extract_palette(&bytes, 12, &PaletteOptions::default())?;
//! for entry in &palette.entries {
//!     println!("{} {:>6.2}%", entry.hex, entry.percentage);
//! }
//!
//! let sample = probe_pixel(&bytes, 10, 20)?;
//! println!("{}", sample.hex);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod options;
pub mod palette;
pub mod probe;

pub use options::PaletteOptions;
pub use palette::{Palette, extract_palette};
pub use probe::probe_pixel;

/// Smallest palette a request may ask for
pub const MIN_COLORS: usize = 3;
/// Largest palette a request may ask for
pub const MAX_COLORS: usize = 24;
