//! Numerical building blocks shared by the factor graph and the calculators

pub mod gaussian;

pub use gaussian::{
    at, at_with, cumulative_to, cumulative_to_with, inverse_cumulative_to,
    inverse_cumulative_to_with, GaussianBelief,
};
