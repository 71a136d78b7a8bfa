//! Likelihood factor: performance = skill + N(0, β²) noise

use crate::error::Result;
use crate::factor_graph::{Arena, Binding, Factor, VariableId};
use crate::numerics::GaussianBelief;

/// Binding 0 is the performance, binding 1 the skill
#[derive(Debug)]
pub struct GaussianLikelihoodFactor {
    name: String,
    precision: f64,
    bindings: Vec<Binding>,
}

impl GaussianLikelihoodFactor {
    pub fn new(
        arena: &mut Arena,
        beta_squared: f64,
        performance: VariableId,
        skill: VariableId,
    ) -> Result<Self> {
        let name = format!(
            "Likelihood of {} going to {}",
            arena.variable(skill)?.name,
            arena.variable(performance)?.name
        );
        let bindings = vec![
            Binding::create(arena, &name, performance)?,
            Binding::create(arena, &name, skill)?,
        ];
        Ok(Self {
            name,
            precision: 1.0 / beta_squared,
            bindings,
        })
    }

    /// Recompute the message into `target` from what `source` currently
    /// believes without this factor's contribution
    fn update_helper(&self, arena: &mut Arena, target: Binding, source: Binding) -> Result<f64> {
        let target_message = target.message_value(arena)?;
        let source_message = source.message_value(arena)?;
        let target_marginal = target.marginal(arena)?;
        let source_marginal = source.marginal(arena)?;

        let a = self.precision
            / (self.precision + source_marginal.precision() - source_message.precision());

        let new_message = GaussianBelief::from_precision_mean(
            a * (source_marginal.precision_mean() - source_message.precision_mean()),
            a * (source_marginal.precision() - source_message.precision()),
        );

        let new_marginal = (target_marginal / target_message) * new_message;

        arena.set_message_value(target.message, new_message)?;
        arena.set_value(target.variable, new_marginal)?;

        Ok(GaussianBelief::absolute_difference(&new_marginal, &target_marginal))
    }
}

impl Factor for GaussianLikelihoodFactor {
    fn name(&self) -> &str {
        &self.name
    }

    fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    fn update_message_at(&self, arena: &mut Arena, index: usize) -> Result<f64> {
        match index {
            0 => self.update_helper(arena, self.bindings[0], self.bindings[1]),
            _ => self.update_helper(arena, self.bindings[1], self.bindings[0]),
        }
    }

    fn log_normalization(&self, arena: &Arena) -> Result<f64> {
        let binding = self.bindings[0];
        Ok(GaussianBelief::log_ratio_normalization(
            &binding.marginal(arena)?,
            &binding.message_value(arena)?,
        ))
    }
}
