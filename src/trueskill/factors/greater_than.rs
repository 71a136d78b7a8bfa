//! Truncation to the region above the draw margin: a decisive result

use crate::error::Result;
use crate::factor_graph::{Arena, Binding, Factor, VariableId};
use crate::numerics::{cumulative_to, GaussianBelief};
use crate::trueskill::correction::{v_exceeds_margin, w_exceeds_margin};

#[derive(Debug)]
pub struct GaussianGreaterThanFactor {
    name: String,
    epsilon: f64,
    bindings: Vec<Binding>,
}

impl GaussianGreaterThanFactor {
    pub fn new(arena: &mut Arena, epsilon: f64, variable: VariableId) -> Result<Self> {
        let name = format!("{} > {:.3}", arena.variable(variable)?.name, epsilon);
        let binding = Binding::create(arena, &name, variable)?;
        Ok(Self {
            name,
            epsilon,
            bindings: vec![binding],
        })
    }
}

impl Factor for GaussianGreaterThanFactor {
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
        let message_from_variable = old_marginal / old_message;

        let c = message_from_variable.precision();
        let d = message_from_variable.precision_mean();
        let sqrt_c = c.sqrt();
        let d_on_sqrt_c = d / sqrt_c;
        let epsilon_times_sqrt_c = self.epsilon * sqrt_c;

        // a collapsed residual variance would give an infinite precision
        let denominator =
            (1.0 - w_exceeds_margin(d_on_sqrt_c, epsilon_times_sqrt_c)).max(f64::EPSILON);
        let new_precision = c / denominator;
        let new_precision_mean =
            (d + sqrt_c * v_exceeds_margin(d_on_sqrt_c, epsilon_times_sqrt_c)) / denominator;

        let new_marginal = GaussianBelief::from_precision_mean(new_precision_mean, new_precision);
        let new_message = old_message * new_marginal / old_marginal;

        arena.set_message_value(binding.message, new_message)?;
        arena.set_value(binding.variable, new_marginal)?;

        Ok(GaussianBelief::absolute_difference(&new_marginal, &old_marginal))
    }

    fn log_normalization(&self, arena: &Arena) -> Result<f64> {
        let binding = self.bindings[0];
        let marginal = binding.marginal(arena)?;
        let message = binding.message_value(arena)?;
        let message_from_variable = marginal / message;
        if message_from_variable.is_uninformative() {
            return Ok(0.0);
        }

        Ok(
            -GaussianBelief::log_product_normalization(&message_from_variable, &message)
                + cumulative_to(
                    (message_from_variable.mean() - self.epsilon)
                        / message_from_variable.standard_deviation(),
                )
                .ln(),
        )
    }
}
