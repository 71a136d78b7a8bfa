//! Concrete Gaussian factors used by the TrueSkill graph

pub mod greater_than;
pub mod likelihood;
pub mod prior;
pub mod weighted_sum;
pub mod within;

pub use greater_than::GaussianGreaterThanFactor;
pub use likelihood::GaussianLikelihoodFactor;
pub use prior::GaussianPriorFactor;
pub use weighted_sum::GaussianWeightedSumFactor;
pub use within::GaussianWithinFactor;
