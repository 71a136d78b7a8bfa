//! Gaussian beliefs in both moment and canonical (precision) form
//!
//! Factor-graph messages are combined by multiplication and retracted by
//! division, both of which are plain additions and subtractions in the
//! precision/precision-mean parameterisation. All five parameters are stored
//! together so a belief built from one form is never re-derived through the
//! other (zero precision would otherwise turn into NaN moments).

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};
use std::fmt;
use std::ops::{Div, Mul};

/// Chebyshev coefficients for the complementary error function
/// (Numerical Recipes, 3rd edition, p. 265).
const ERFC_COEFFICIENTS: [f64; 28] = [
    -1.3026537197817094,
    6.4196979235649026e-1,
    1.9476473204185836e-2,
    -9.561514786808631e-3,
    -9.46595344482036e-4,
    3.66839497852761e-4,
    4.2523324806907e-5,
    -2.0278578112534e-5,
    -1.624290004647e-6,
    1.303655835580e-6,
    1.5626441722e-8,
    -8.5238095915e-8,
    6.529054439e-9,
    5.059343495e-9,
    -9.91364156e-10,
    -2.27365122e-10,
    9.6467911e-11,
    2.394038e-12,
    -6.886027e-12,
    8.94487e-13,
    3.13092e-13,
    -1.12708e-13,
    3.81e-16,
    7.106e-15,
    -1.523e-15,
    -9.4e-17,
    1.21e-16,
    -2.8e-17,
];

/// A univariate Gaussian belief
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GaussianBelief {
    mean: f64,
    standard_deviation: f64,
    variance: f64,
    precision: f64,
    precision_mean: f64,
}

impl GaussianBelief {
    /// Create a belief from its mean and standard deviation
    pub fn new(mean: f64, standard_deviation: f64) -> Self {
        let variance = standard_deviation * standard_deviation;
        let precision = 1.0 / variance;
        Self {
            mean,
            standard_deviation,
            variance,
            precision,
            precision_mean: precision * mean,
        }
    }

    /// Create a belief from its canonical parameters
    pub fn from_precision_mean(precision_mean: f64, precision: f64) -> Self {
        let variance = 1.0 / precision;
        Self {
            mean: precision_mean / precision,
            standard_deviation: variance.sqrt(),
            variance,
            precision,
            precision_mean,
        }
    }

    /// The zero-precision belief: carries no information at all
    pub fn uninformative() -> Self {
        Self::from_precision_mean(0.0, 0.0)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn standard_deviation(&self) -> f64 {
        self.standard_deviation
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    pub fn precision(&self) -> f64 {
        self.precision
    }

    pub fn precision_mean(&self) -> f64 {
        self.precision_mean
    }

    /// True when the belief carries no information (zero precision)
    pub fn is_uninformative(&self) -> bool {
        self.precision == 0.0
    }

    /// Height of the density at the mean
    pub fn normalization_constant(&self) -> f64 {
        1.0 / ((2.0 * PI).sqrt() * self.standard_deviation)
    }

    /// Convergence metric between two beliefs:
    /// `max(|Δ precision mean|, sqrt(|Δ precision|))`
    pub fn absolute_difference(left: &Self, right: &Self) -> f64 {
        (left.precision_mean - right.precision_mean)
            .abs()
            .max((left.precision - right.precision).abs().sqrt())
    }

    /// Log of the normalisation constant of the product of two beliefs
    pub fn log_product_normalization(left: &Self, right: &Self) -> f64 {
        if left.precision == 0.0 || right.precision == 0.0 {
            return 0.0;
        }

        let variance_sum = left.variance + right.variance;
        let mean_difference = left.mean - right.mean;

        -log_sqrt_2pi() - variance_sum.ln() / 2.0 - square(mean_difference) / (2.0 * variance_sum)
    }

    /// Log of the normalisation constant of the ratio of two beliefs
    pub fn log_ratio_normalization(numerator: &Self, denominator: &Self) -> f64 {
        if numerator.precision == 0.0 || denominator.precision == 0.0 {
            return 0.0;
        }

        let variance_difference = denominator.variance - numerator.variance;
        let mean_difference = numerator.mean - denominator.mean;

        denominator.variance.ln() + log_sqrt_2pi() - variance_difference.ln() / 2.0
            + square(mean_difference) / (2.0 * variance_difference)
    }
}

impl Mul for GaussianBelief {
    type Output = GaussianBelief;

    fn mul(self, rhs: GaussianBelief) -> GaussianBelief {
        GaussianBelief::from_precision_mean(
            self.precision_mean + rhs.precision_mean,
            self.precision + rhs.precision,
        )
    }
}

impl Div for GaussianBelief {
    type Output = GaussianBelief;

    fn div(self, rhs: GaussianBelief) -> GaussianBelief {
        GaussianBelief::from_precision_mean(
            self.precision_mean - rhs.precision_mean,
            self.precision - rhs.precision,
        )
    }
}

impl fmt::Display for GaussianBelief {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "μ={:.4}, σ={:.4}",
            self.mean, self.standard_deviation
        )
    }
}

fn square(x: f64) -> f64 {
    x * x
}

fn log_sqrt_2pi() -> f64 {
    (2.0 * PI).sqrt().ln()
}

/// Standard normal density at `x`
pub fn at(x: f64) -> f64 {
    at_with(x, 0.0, 1.0)
}

/// Normal density at `x` for the given mean and standard deviation
pub fn at_with(x: f64, mean: f64, standard_deviation: f64) -> f64 {
    let multiplier = 1.0 / (standard_deviation * (2.0 * PI).sqrt());
    let exp_part = (-square(x - mean) / (2.0 * square(standard_deviation))).exp();
    multiplier * exp_part
}

/// Standard normal cumulative distribution function
pub fn cumulative_to(x: f64) -> f64 {
    cumulative_to_with(x, 0.0, 1.0)
}

/// Normal cumulative distribution function for the given mean and standard deviation
pub fn cumulative_to_with(x: f64, mean: f64, standard_deviation: f64) -> f64 {
    let z = (x - mean) / standard_deviation;
    0.5 * erfc(-z / SQRT_2)
}

/// Inverse of the standard normal cumulative distribution function
pub fn inverse_cumulative_to(p: f64) -> f64 {
    inverse_cumulative_to_with(p, 0.0, 1.0)
}

/// Inverse normal cumulative distribution function (Numerical Recipes, p. 320)
pub fn inverse_cumulative_to_with(p: f64, mean: f64, standard_deviation: f64) -> f64 {
    mean - SQRT_2 * standard_deviation * inverse_erfc(2.0 * p)
}

fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 2.0 / (2.0 + z);
    let ty = 4.0 * t - 2.0;

    let mut d = 0.0;
    let mut dd = 0.0;
    for &coefficient in ERFC_COEFFICIENTS[1..].iter().rev() {
        let previous = d;
        d = ty * d - dd + coefficient;
        dd = previous;
    }

    let ans = t * (-z * z + 0.5 * (ERFC_COEFFICIENTS[0] + ty * d) - dd).exp();
    if x >= 0.0 {
        ans
    } else {
        2.0 - ans
    }
}

fn inverse_erfc(p: f64) -> f64 {
    if p >= 2.0 {
        return -100.0;
    }
    if p <= 0.0 {
        return 100.0;
    }

    let pp = if p < 1.0 { p } else { 2.0 - p };
    let t = (-2.0 * (pp / 2.0).ln()).sqrt();
    let mut x = -0.70711 * ((2.30753 + t * 0.27061) / (1.0 + t * (0.99229 + t * 0.04481)) - t);

    // two Halley refinements
    for _ in 0..2 {
        let err = erfc(x) - pp;
        x += err / (1.12837916709551257 * (-(x * x)).exp() - x * err);
    }

    if p < 1.0 {
        x
    } else {
        -x
    }
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
    fn test_cumulative_to() {
        assert_close(0.691462, cumulative_to(0.5));
        assert_close(0.5, cumulative_to(0.0));
        assert_close(1.0 - 0.691462, cumulative_to(-0.5));
        assert_close(0.691462, cumulative_to_with(12.5, 10.0, 5.0));
    }

    #[test]
    fn test_at() {
        assert_close(0.352065, at(0.5));
        assert_close(0.352065 / 2.0, at_with(11.0, 10.0, 2.0));
    }

    #[test]
    fn test_inverse_cumulative_to() {
        assert_close(0.0, inverse_cumulative_to(0.5));
        assert_close(0.5, inverse_cumulative_to(0.6914624612740131));
        assert!((inverse_cumulative_to(0.975) - 1.959964).abs() < 1e-5);
    }

    #[test]
    fn test_multiplication() {
        let standard_normal = GaussianBelief::new(0.0, 1.0);
        let shifted = GaussianBelief::new(2.0, 3.0);
        let product = standard_normal * shifted;
        assert_close(0.2, product.mean());
        assert_close(3.0 / 10f64.sqrt(), product.standard_deviation());

        let m4s5 = GaussianBelief::new(4.0, 5.0);
        let m6s7 = GaussianBelief::new(6.0, 7.0);
        let product2 = m4s5 * m6s7;
        let expected_mean = (4.0 * square(7.0) + 6.0 * square(5.0)) / (square(5.0) + square(7.0));
        assert_close(expected_mean, product2.mean());
        let expected_sigma = ((square(5.0) * square(7.0)) / (square(5.0) + square(7.0))).sqrt();
        assert_close(expected_sigma, product2.standard_deviation());
    }

    #[test]
    fn test_division() {
        let product = GaussianBelief::new(0.2, 3.0 / 10f64.sqrt());
        let standard_normal = GaussianBelief::new(0.0, 1.0);
        let quotient = product / standard_normal;
        assert_close(2.0, quotient.mean());
        assert_close(3.0, quotient.standard_deviation());

        let product2 = GaussianBelief::new(
            (4.0 * square(7.0) + 6.0 * square(5.0)) / (square(5.0) + square(7.0)),
            ((square(5.0) * square(7.0)) / (square(5.0) + square(7.0))).sqrt(),
        );
        let quotient2 = product2 / GaussianBelief::new(4.0, 5.0);
        assert_close(6.0, quotient2.mean());
        assert_close(7.0, quotient2.standard_deviation());
    }

    #[test]
    fn test_dividing_identical_beliefs_is_uninformative() {
        let belief = GaussianBelief::new(25.0, 8.0);
        let quotient = belief / belief;
        assert!(quotient.is_uninformative());
        assert_eq!(quotient.precision_mean(), 0.0);
    }

    #[test]
    fn test_log_product_normalization() {
        let standard_normal = GaussianBelief::new(0.0, 1.0);
        assert_close(
            -1.2655121234846454,
            GaussianBelief::log_product_normalization(&standard_normal, &standard_normal),
        );

        let m1s2 = GaussianBelief::new(1.0, 2.0);
        let m3s4 = GaussianBelief::new(3.0, 4.0);
        assert_close(
            -2.5168046699816684,
            GaussianBelief::log_product_normalization(&m1s2, &m3s4),
        );

        let empty = GaussianBelief::uninformative();
        assert_eq!(GaussianBelief::log_product_normalization(&empty, &m1s2), 0.0);
    }

    #[test]
    fn test_log_ratio_normalization() {
        let m1s2 = GaussianBelief::new(1.0, 2.0);
        let m3s4 = GaussianBelief::new(3.0, 4.0);
        assert_close(
            2.6157405972171204,
            GaussianBelief::log_ratio_normalization(&m1s2, &m3s4),
        );
    }

    #[test]
    fn test_absolute_difference() {
        let standard_normal = GaussianBelief::new(0.0, 1.0);
        assert_close(
            0.0,
            GaussianBelief::absolute_difference(&standard_normal, &standard_normal),
        );

        let m1s2 = GaussianBelief::new(1.0, 2.0);
        let m3s4 = GaussianBelief::new(3.0, 4.0);
        assert_close(
            0.4330127018922193,
            GaussianBelief::absolute_difference(&m1s2, &m3s4),
        );
    }

    #[test]
    fn test_display() {
        let belief = GaussianBelief::new(25.0, 25.0 / 3.0);
        assert_eq!(belief.to_string(), "μ=25.0000, σ=8.3333");
    }
}
