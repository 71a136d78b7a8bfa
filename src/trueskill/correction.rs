//! Truncated-Gaussian correction functions
//!
//! `v` shifts the mean and `w` shrinks the variance of a performance
//! difference once it has been truncated to the observed outcome. The
//! `exceeds_margin` pair handles wins (single-sided truncation above the draw
//! margin) and the `within_margin` pair handles draws (truncation to
//! `[-ε, ε]`). Deep in the tails the CDF denominator underflows, at which
//! point the leading asymptotic terms are returned instead of a 0/0 ratio.
//! `w` stays strictly below one there so the truncated variance never
//! collapses to zero.

use crate::numerics::{at, cumulative_to};

/// Below this the CDF denominator is treated as zero (roughly 27σ)
const DENOMINATOR_FLOOR: f64 = 2.222758749e-162;

/// Mean correction for a win, with `t` and `ε` pre-scaled by `c`
pub fn v_exceeds_margin_scaled(team_performance_difference: f64, draw_margin: f64, c: f64) -> f64 {
    v_exceeds_margin(team_performance_difference / c, draw_margin / c)
}

/// Mean correction for a win
pub fn v_exceeds_margin(team_performance_difference: f64, draw_margin: f64) -> f64 {
    let denominator = cumulative_to(team_performance_difference - draw_margin);

    if denominator < DENOMINATOR_FLOOR {
        return -team_performance_difference + draw_margin;
    }

    at(team_performance_difference - draw_margin) / denominator
}

/// Variance correction for a win, with `t` and `ε` pre-scaled by `c`
pub fn w_exceeds_margin_scaled(team_performance_difference: f64, draw_margin: f64, c: f64) -> f64 {
    w_exceeds_margin(team_performance_difference / c, draw_margin / c)
}

/// Variance correction for a win
pub fn w_exceeds_margin(team_performance_difference: f64, draw_margin: f64) -> f64 {
    let denominator = cumulative_to(team_performance_difference - draw_margin);

    if denominator < DENOMINATOR_FLOOR {
        let x = team_performance_difference - draw_margin;
        return 1.0 - 1.0 / (x * x);
    }

    let v = v_exceeds_margin(team_performance_difference, draw_margin);
    v * (v + team_performance_difference - draw_margin)
}

/// Mean correction for a draw, with `t` and `ε` pre-scaled by `c`
pub fn v_within_margin_scaled(team_performance_difference: f64, draw_margin: f64, c: f64) -> f64 {
    v_within_margin(team_performance_difference / c, draw_margin / c)
}

/// Mean correction for a draw
pub fn v_within_margin(team_performance_difference: f64, draw_margin: f64) -> f64 {
    let t_abs = team_performance_difference.abs();
    let denominator = cumulative_to(draw_margin - t_abs) - cumulative_to(-draw_margin - t_abs);

    if denominator < DENOMINATOR_FLOOR {
        return if team_performance_difference < 0.0 {
            -team_performance_difference - draw_margin
        } else {
            -team_performance_difference + draw_margin
        };
    }

    let numerator = at(-draw_margin - t_abs) - at(draw_margin - t_abs);

    if team_performance_difference < 0.0 {
        -numerator / denominator
    } else {
        numerator / denominator
    }
}

/// Variance correction for a draw, with `t` and `ε` pre-scaled by `c`
pub fn w_within_margin_scaled(team_performance_difference: f64, draw_margin: f64, c: f64) -> f64 {
    w_within_margin(team_performance_difference / c, draw_margin / c)
}

/// Variance correction for a draw
pub fn w_within_margin(team_performance_difference: f64, draw_margin: f64) -> f64 {
    let t_abs = team_performance_difference.abs();
    let denominator = cumulative_to(draw_margin - t_abs) - cumulative_to(-draw_margin - t_abs);

    if denominator < DENOMINATOR_FLOOR {
        return 1.0 - within_margin_tail_variance(t_abs, draw_margin);
    }

    let vt = v_within_margin(t_abs, draw_margin);

    vt * vt
        + ((draw_margin - t_abs) * at(draw_margin - t_abs)
            - (-draw_margin - t_abs) * at(-draw_margin - t_abs))
            / denominator
}

/// Variance of a unit Gaussian centred far outside `[-ε, ε]` once truncated to
/// it. The density is close to an exponential with rate `|t| - ε` there.
fn within_margin_tail_variance(t_abs: f64, draw_margin: f64) -> f64 {
    let rate = t_abs - draw_margin;
    let h = rate * draw_margin;

    if h < 1e-4 {
        return draw_margin * draw_margin / 3.0;
    }

    // sinh overflows to infinity for large h, leaving the pure exponential term
    let ratio = h / h.sinh();
    (1.0 - ratio * ratio) / (rate * rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-6;

    fn assert_close(expected: f64, actual: f64) {
        assert!(
            (expected - actual).abs() < TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_exceeds_margin_at_origin() {
        let v = v_exceeds_margin(0.0, 0.0);
        assert_close(0.797885, v);
        assert_close(v * v, w_exceeds_margin(0.0, 0.0));
    }

    #[test]
    fn test_within_margin_at_origin() {
        assert_close(0.0, v_within_margin(0.0, 1.0));
        assert_close(0.708875, w_within_margin(0.0, 1.0));
    }

    #[test]
    fn test_within_margin_is_odd_in_t() {
        let positive = v_within_margin(0.7, 0.5);
        let negative = v_within_margin(-0.7, 0.5);
        assert_close(positive, -negative);
        assert_close(w_within_margin(0.7, 0.5), w_within_margin(-0.7, 0.5));
    }

    #[test]
    fn test_scaled_variants_divide_through() {
        assert_close(
            v_exceeds_margin(1.5, 0.25),
            v_exceeds_margin_scaled(3.0, 0.5, 2.0),
        );
        assert_close(
            w_within_margin(1.5, 0.25),
            w_within_margin_scaled(3.0, 0.5, 2.0),
        );
    }

    #[test]
    fn test_exceeds_margin_tail_falls_back_to_asymptote() {
        let v = v_exceeds_margin(-40.0, 0.5);
        assert_close(40.5, v);
        let w = w_exceeds_margin(-40.0, 0.5);
        assert!(w < 1.0);
        assert_close(1.0 - 1.0 / (40.5 * 40.5), w);
    }

    #[test]
    fn test_exceeds_margin_far_tail_keeps_residual_variance() {
        for t in [-200.0, -1e4, -1e6] {
            let w = w_exceeds_margin(t, 0.5);
            assert!(w < 1.0, "w_exceeds_margin({t}) = {w}");
            assert!(w > 0.99);
        }
        // a huge margin with a positive difference is still a deep upset
        assert!(w_exceeds_margin(1.0, 60.0) < 1.0);
    }

    #[test]
    fn test_within_margin_tail_falls_back_to_asymptote() {
        assert_close(39.5, v_within_margin(-40.0, 0.5));
        assert_close(-39.5, v_within_margin(40.0, 0.5));
        let w = w_within_margin(40.0, 0.5);
        assert!(w < 1.0);
        assert_close(1.0 - 1.0 / (39.5 * 39.5), w);
    }

    #[test]
    fn test_within_margin_far_tail_keeps_residual_variance() {
        for t in [-300.0, 200.0, 1e5] {
            let w = w_within_margin(t, 0.5);
            assert!(w < 1.0, "w_within_margin({t}) = {w}");
            assert!(w > 0.99);
        }
        // a narrow margin leaves roughly the variance of a uniform on [-ε, ε]
        let epsilon = 1e-7;
        assert_close(
            epsilon * epsilon / 3.0,
            1.0 - w_within_margin(50.0, epsilon),
        );
    }

    #[test]
    fn test_corrections_stay_in_range() {
        for t in [-5.0, -1.0, 0.0, 0.3, 2.0, 6.0] {
            let w = w_exceeds_margin(t, 0.2);
            assert!((0.0..=1.0).contains(&w), "w_exceeds_margin({t}) = {w}");
            let w = w_within_margin(t, 0.2);
            assert!((0.0..=1.0).contains(&w), "w_within_margin({t}) = {w}");
        }
    }
}
