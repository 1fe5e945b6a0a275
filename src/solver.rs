//! # Greedy Candidate Selection
//!
//! One step of the string-art loop: score every admissible target pin by
//! the darkness its line would pick up, take the best.
//!
//! Scores are unnormalized sums of the remaining darkness under each
//! candidate line. Longer lines through dark regions therefore win over
//! short ones, which is exactly the behavior that builds up shading.

use rayon::prelude::*;
use std::cmp::Reverse;

use crate::canvas::DarknessMap;
use crate::layout::PinLayout;
use crate::raster::LinePixels;

/// Pick the next pin to run the thread to, returning `(pin index, score)`.
///
/// Candidates are all pins other than `current` whose circular index
/// distance from it is at least `min_distance`, so `min_distance <= 1`
/// admits every other pin. Exact score ties resolve to the lowest pin
/// index; together with integer scores this is a strict total order, so
/// the parallel reduction is deterministic regardless of work-stealing
/// order.
///
/// The residual is only read here; the caller commits the winning line
/// afterwards. Panics if no candidate is admissible; the engine validates
/// `min_distance` against the pin count before the loop starts.
pub fn select_next(
    residual: &DarknessMap,
    layout: &PinLayout,
    current: usize,
    min_distance: usize,
) -> (usize, u32) {
    let from = layout.get(current);
    let (width, height) = (residual.width(), residual.height());

    let (score, Reverse(best)) = (0..layout.len())
        .into_par_iter()
        .filter(|&j| j != current && layout.index_distance(current, j) >= min_distance)
        .map(|j| {
            let line = LinePixels::new(from, layout.get(j), width, height);
            (residual.line_score(line), Reverse(j))
        })
        .max()
        .expect("no admissible candidate pins");

    (best, score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::GrayscaleMap;
    use crate::layout::PinShape;

    #[test]
    fn test_zero_residual_ties_break_to_lowest_index() {
        let gray = GrayscaleMap::from_fn(100, 100, |_, _| 255);
        let residual = DarknessMap::from_grayscale(&gray);
        let layout = PinLayout::generate(8, PinShape::Circle, 100, 100).unwrap();

        let (next, score) = select_next(&residual, &layout, 0, 1);
        assert_eq!((next, score), (1, 0));

        let (next, score) = select_next(&residual, &layout, 1, 1);
        assert_eq!((next, score), (0, 0));
    }

    #[test]
    fn test_picks_line_through_dark_pixel() {
        // Single black pixel in the middle; from the top pin, only the
        // vertical diameter to the bottom pin crosses it.
        let gray = GrayscaleMap::from_fn(50, 50, |x, y| if (x, y) == (25, 25) { 0 } else { 255 });
        let residual = DarknessMap::from_grayscale(&gray);
        let layout = PinLayout::generate(12, PinShape::Circle, 50, 50).unwrap();

        let (next, score) = select_next(&residual, &layout, 0, 1);
        assert_eq!(next, 6);
        assert_eq!(score, 255);
    }

    #[test]
    fn test_min_distance_excludes_neighbors() {
        let gray = GrayscaleMap::from_fn(100, 100, |_, _| 255);
        let residual = DarknessMap::from_grayscale(&gray);
        let layout = PinLayout::generate(8, PinShape::Circle, 100, 100).unwrap();

        // Distance 3 excludes pins 1, 2, 6, 7; lowest admissible index is 3.
        let (next, _) = select_next(&residual, &layout, 0, 3);
        assert_eq!(next, 3);
    }

    #[test]
    fn test_never_selects_current_pin() {
        let gray = GrayscaleMap::from_fn(60, 60, |_, _| 0); // everything dark
        let residual = DarknessMap::from_grayscale(&gray);
        let layout = PinLayout::generate(16, PinShape::Square, 60, 60).unwrap();

        for current in 0..layout.len() {
            let (next, _) = select_next(&residual, &layout, current, 1);
            assert_ne!(next, current);
        }
    }
}
