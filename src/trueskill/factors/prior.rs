//! Prior factor: injects a fixed external belief into a skill variable

use crate::error::Result;
use crate::factor_graph::{Arena, Binding, Factor, VariableId};
use crate::numerics::GaussianBelief;

#[derive(Debug)]
pub struct GaussianPriorFactor {
    name: String,
    new_message: GaussianBelief,
    bindings: Vec<Binding>,
}

impl GaussianPriorFactor {
    pub fn new(arena: &mut Arena, mean: f64, variance: f64, variable: VariableId) -> Result<Self> {
        let name = format!("Prior value going to {}", arena.variable(variable)?.name);
        let binding = Binding::create(arena, &name, variable)?;
        Ok(Self {
            name,
            new_message: GaussianBelief::new(mean, variance.sqrt()),
            bindings: vec![binding],
        })
    }
}

impl Factor for GaussianPriorFactor {
    fn name(&self) -> &str {
        &self.name
    }

    fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    fn update_message_at(&self, arena: &mut Arena, index: usize) -> Result<f64> {
        let binding = self.bindings[index];
        let old_marginal = binding.marginal(arena)?;
        let old_message = binding.message_value(arena)?;

        let new_marginal = GaussianBelief::from_precision_mean(
            old_marginal.precision_mean() + self.new_message.precision_mean()
                - old_message.precision_mean(),
            old_marginal.precision() + self.new_message.precision() - old_message.precision(),
        );

        arena.set_value(binding.variable, new_marginal)?;
        arena.set_message_value(binding.message, self.new_message)?;

        Ok(GaussianBelief::absolute_difference(&old_marginal, &new_marginal))
    }

    fn log_normalization(&self, _arena: &Arena) -> Result<f64> {
        Ok(0.0)
    }
}
