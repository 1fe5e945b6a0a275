//! # Pin Layout
//!
//! Places N pins evenly along the boundary of a circle or square inscribed
//! in the canvas.
//!
//! ## Numbering
//!
//! Pin indices must be reproducible across runs, so both shapes anchor
//! index 0 at a fixed point and proceed clockwise in screen coordinates
//! (y grows downward):
//!
//! ```text
//! circle: index 0 at 12 o'clock
//!         x = cx + r * sin(θ),  y = cy - r * cos(θ),  θ = 2π·k/N
//! square: index 0 at the top-left corner, pins spaced at equal arc
//!         length along the perimeter (not equal x/y steps)
//! ```

use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::error::TelarError;

/// Gap between the pin ring and the canvas edge, in pixels.
///
/// Keeps rounded pin coordinates inside the raster. The rasterizer clips
/// anyway, so a coordinate that still rounds outside is skipped, not fatal.
const PIN_MARGIN: f32 = 1.0;

/// A single pin position on the canvas boundary.
///
/// Pins are identified by their index in the [`PinLayout`]; the coordinate
/// itself is only needed for rasterization and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pin {
    pub x: f32,
    pub y: f32,
}

/// Boundary shape the pins are distributed along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinShape {
    #[default]
    Circle,
    Square,
}

impl PinShape {
    /// Parse a shape from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "circle" => Some(PinShape::Circle),
            "square" => Some(PinShape::Square),
            _ => None,
        }
    }
}

/// An ordered ring of pins plus the canvas it was generated for.
///
/// The layout records its canvas dimensions so a grayscale raster of the
/// wrong size can be rejected before generation starts. Identical inputs
/// always produce an identical, order-stable layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinLayout {
    pins: Vec<Pin>,
    width: usize,
    height: usize,
    shape: PinShape,
}

impl PinLayout {
    /// Generate `num_pins` pins on the given boundary shape.
    ///
    /// Fails with [`TelarError::Configuration`] when fewer than two pins
    /// are requested or the canvas is empty.
    pub fn generate(
        num_pins: usize,
        shape: PinShape,
        width: usize,
        height: usize,
    ) -> Result<Self, TelarError> {
        if num_pins < 2 {
            return Err(TelarError::Configuration(format!(
                "at least 2 pins are required, got {}",
                num_pins
            )));
        }
        if width == 0 || height == 0 {
            return Err(TelarError::Configuration(format!(
                "canvas must be non-empty, got {}x{}",
                width, height
            )));
        }

        let pins = match shape {
            PinShape::Circle => circle_pins(num_pins, width, height),
            PinShape::Square => square_pins(num_pins, width, height),
        };

        Ok(Self {
            pins,
            width,
            height,
            shape,
        })
    }

    /// Number of pins in the layout.
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// All pins in index order.
    pub fn pins(&self) -> &[Pin] {
        &self.pins
    }

    /// Pin at `index`. Panics when out of range.
    pub fn get(&self, index: usize) -> Pin {
        self.pins[index]
    }

    /// Canvas width the layout was built for.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height the layout was built for.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn shape(&self) -> PinShape {
        self.shape
    }

    /// Circular distance between two pin indices.
    ///
    /// The ring wraps, so the distance between pin 0 and the last pin is 1.
    pub fn index_distance(&self, a: usize, b: usize) -> usize {
        let n = self.pins.len();
        let d = if a > b { a - b } else { b - a };
        d.min(n - d)
    }
}

fn circle_pins(num_pins: usize, width: usize, height: usize) -> Vec<Pin> {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let radius = width.min(height) as f32 / 2.0 - PIN_MARGIN;

    (0..num_pins)
        .map(|k| {
            let theta = TAU * k as f32 / num_pins as f32;
            Pin {
                x: cx + radius * theta.sin(),
                y: cy - radius * theta.cos(),
            }
        })
        .collect()
}

fn square_pins(num_pins: usize, width: usize, height: usize) -> Vec<Pin> {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let side = width.min(height) as f32 - 2.0 * PIN_MARGIN;
    let left = cx - side / 2.0;
    let top = cy - side / 2.0;
    let right = left + side;
    let bottom = top + side;
    let perimeter = 4.0 * side;

    (0..num_pins)
        .map(|k| {
            // Distance travelled clockwise from the top-left corner.
            let d = perimeter * k as f32 / num_pins as f32;
            if d < side {
                Pin {
                    x: left + d,
                    y: top,
                }
            } else if d < 2.0 * side {
                Pin {
                    x: right,
                    y: top + (d - side),
                }
            } else if d < 3.0 * side {
                Pin {
                    x: right - (d - 2.0 * side),
                    y: bottom,
                }
            } else {
                Pin {
                    x: left,
                    y: bottom - (d - 3.0 * side),
                }
            }
        })
        .collect()
}
