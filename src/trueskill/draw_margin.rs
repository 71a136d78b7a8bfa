//! Draw margin derived from the configured draw probability

use crate::numerics::inverse_cumulative_to;
use std::f64::consts::SQRT_2;

/// Performance-difference threshold below which a match counts as a draw
pub fn draw_margin_from_draw_probability(draw_probability: f64, beta: f64) -> f64 {
    inverse_cumulative_to(0.5 * (draw_probability + 1.0)) * SQRT_2 * beta
}
