//! # Telar - String-Art Pattern Generator
//!
//! Telar turns a grayscale image into build instructions for a physical
//! string-art piece: an ordered sequence of pin-to-pin thread segments
//! whose cumulative rendering approximates the image's tonal structure.
//! It provides:
//!
//! - **Pin layouts**: evenly spaced rings on a circle or square boundary
//! - **Greedy solver**: each segment takes the line with the most
//!   remaining darkness, then draws that darkness down
//! - **Engine**: progress reporting, cooperative cancellation, and a
//!   channel-based background runner
//!
//! ## Quick Start
//!
//! ```
//! use telar::{CancelToken, GenerationConfig, GrayscaleMap, PinLayout, PinShape, engine};
//!
//! // Dark left half, light right half.
//! let gray = GrayscaleMap::from_fn(120, 120, |x, _y| if x < 60 { 40 } else { 230 });
//! let layout = PinLayout::generate(36, PinShape::Circle, 120, 120)?;
//!
//! let config = GenerationConfig {
//!     thread_count: 80,
//!     ..GenerationConfig::default()
//! };
//! let outcome = engine::generate(&gray, &layout, &config, &CancelToken::new(), |_| {})?;
//!
//! assert_eq!(outcome.threads.len(), 80);
//! for (step, thread) in outcome.threads.iter().enumerate() {
//!     // step 1: pin 0 -> pin 19, ...
//!     let _ = (step + 1, thread.from, thread.to);
//! }
//! # Ok::<(), telar::TelarError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`layout`] | Pin placement on circle/square boundaries |
//! | [`canvas`] | Grayscale input and darkness-residual rasters |
//! | [`raster`] | Bresenham line traversal, clipped, allocation-free |
//! | [`solver`] | Per-step greedy candidate scoring |
//! | [`engine`] | Generation loop, progress, cancellation |
//! | [`error`] | Error types |

pub mod canvas;
pub mod engine;
pub mod error;
pub mod layout;
pub mod raster;
pub mod solver;

// Re-exports for convenience
pub use canvas::{DarknessMap, GrayscaleMap};
pub use engine::{
    CancelToken, GenerationConfig, GenerationEvent, GenerationTask, Outcome, Progress, Thread,
};
pub use error::TelarError;
pub use layout::{Pin, PinLayout, PinShape};
