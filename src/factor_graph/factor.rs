//! The factor abstraction
//!
//! A factor owns an ordered list of (message, variable) bindings. Schedule
//! steps address a binding by its position, so binding order is part of each
//! factor's contract.

use super::variable::{Arena, MessageId, VariableId};
use crate::error::{RatingError, Result};
use crate::numerics::GaussianBelief;
use std::fmt;

/// One factor-to-variable edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub message: MessageId,
    pub variable: VariableId,
}

impl Binding {
    /// Bind `variable` to a freshly allocated message named after the edge
    pub fn create(arena: &mut Arena, factor_name: &str, variable: VariableId) -> Result<Self> {
        let variable_name = arena.variable(variable)?.name.clone();
        let message = arena.add_message(format!("{} -> {}", factor_name, variable_name));
        Ok(Self { message, variable })
    }

    pub fn marginal(&self, arena: &Arena) -> Result<GaussianBelief> {
        arena.value(self.variable)
    }

    pub fn message_value(&self, arena: &Arena) -> Result<GaussianBelief> {
        arena.message_value(self.message)
    }
}

/// A local potential over a fixed set of variables
pub trait Factor: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn bindings(&self) -> &[Binding];

    /// Factor-specific message update for an already validated index.
    /// Returns the absolute difference between the old and new marginal.
    fn update_message_at(&self, arena: &mut Arena, index: usize) -> Result<f64>;

    /// This factor's contribution to the log partition function
    fn log_normalization(&self, arena: &Arena) -> Result<f64>;

    fn message_count(&self) -> usize {
        self.bindings().len()
    }

    /// Recompute the message at `index` and fold it into its variable
    fn update_message(&self, arena: &mut Arena, index: usize) -> Result<f64> {
        self.binding(index)?;
        self.update_message_at(arena, index)
    }

    /// Multiply the stored message into its variable's marginal without
    /// recomputing it, returning the log normalisation of that product
    fn send_message(&self, arena: &mut Arena, index: usize) -> Result<f64> {
        let binding = self.binding(index)?;
        let marginal = binding.marginal(arena)?;
        let message = binding.message_value(arena)?;
        let log_z = GaussianBelief::log_product_normalization(&marginal, &message);
        arena.set_value(binding.variable, marginal * message)?;
        Ok(log_z)
    }

    /// Reset every bound variable to its prior
    fn reset_marginals(&self, arena: &mut Arena) -> Result<()> {
        for binding in self.bindings() {
            arena.reset_variable(binding.variable)?;
        }
        Ok(())
    }

    fn binding(&self, index: usize) -> Result<Binding> {
        self.bindings().get(index).copied().ok_or_else(|| {
            RatingError::InvalidMessageIndex {
                factor: self.name().to_string(),
                index,
                count: self.message_count(),
            }
            .into()
        })
    }
}
