//! Weighted-sum factor: v₀ = Σ wᵢ·vᵢ
//!
//! Any one of the n+1 bound variables can be re-solved from the others. For
//! each solve-for index the constructor precomputes the rearranged weights
//! (the equation divided through by that variable's coefficient) and the
//! permutation that puts the solved variable first and the remaining terms in
//! weight order. Binding 0 is the sum, bindings 1..=n the summands.

use crate::error::{RatingError, Result};
use crate::factor_graph::{Arena, Binding, Factor, VariableId};
use crate::numerics::GaussianBelief;

#[derive(Debug)]
pub struct GaussianWeightedSumFactor {
    name: String,
    bindings: Vec<Binding>,
    /// `weights[k]` are the coefficients used when solving for binding `k`
    weights: Vec<Vec<f64>>,
    weights_squared: Vec<Vec<f64>>,
    /// `variable_index_orders[k][0] == k`; the rest line up with `weights[k]`
    variable_index_orders: Vec<Vec<usize>>,
}

impl GaussianWeightedSumFactor {
    pub fn new(
        arena: &mut Arena,
        sum_variable: VariableId,
        variables_to_sum: &[VariableId],
        variable_weights: &[f64],
    ) -> Result<Self> {
        if variables_to_sum.is_empty() || variables_to_sum.len() != variable_weights.len() {
            return Err(RatingError::InvalidGraphState {
                message: format!(
                    "weighted sum needs one weight per summand, got {} summands and {} weights",
                    variables_to_sum.len(),
                    variable_weights.len()
                ),
            }
            .into());
        }

        let name = Self::describe(arena, sum_variable, variables_to_sum, variable_weights)?;
        let (weights, variable_index_orders) = Self::solve_tables(variable_weights);
        let weights_squared = weights
            .iter()
            .map(|row| row.iter().map(|w| w * w).collect())
            .collect();

        let mut bindings = Vec::with_capacity(variables_to_sum.len() + 1);
        bindings.push(Binding::create(arena, &name, sum_variable)?);
        for &variable in variables_to_sum {
            bindings.push(Binding::create(arena, &name, variable)?);
        }

        Ok(Self {
            name,
            bindings,
            weights,
            weights_squared,
            variable_index_orders,
        })
    }

    /// Rearranged weight rows and binding permutations for every solve-for index
    fn solve_tables(variable_weights: &[f64]) -> (Vec<Vec<f64>>, Vec<Vec<usize>>) {
        let n = variable_weights.len();
        let mut weights = Vec::with_capacity(n + 1);
        let mut orders = Vec::with_capacity(n + 1);

        weights.push(variable_weights.to_vec());
        orders.push((0..=n).collect());

        for solve_for in 1..=n {
            let pivot = variable_weights[solve_for - 1];
            let mut row = Vec::with_capacity(n);
            let mut order = Vec::with_capacity(n + 1);
            order.push(solve_for);

            for (source, &weight) in variable_weights.iter().enumerate() {
                if source == solve_for - 1 {
                    continue;
                }
                // zero pivot: the row degenerates and the solved message is uninformative
                row.push(if pivot == 0.0 { 0.0 } else { -weight / pivot });
                order.push(source + 1);
            }

            row.push(if pivot == 0.0 { 0.0 } else { 1.0 / pivot });
            order.push(0);

            weights.push(row);
            orders.push(order);
        }

        (weights, orders)
    }

    fn describe(
        arena: &Arena,
        sum_variable: VariableId,
        variables_to_sum: &[VariableId],
        variable_weights: &[f64],
    ) -> Result<String> {
        let mut terms = Vec::with_capacity(variables_to_sum.len());
        for (variable, weight) in variables_to_sum.iter().zip(variable_weights) {
            let name = &arena.variable(*variable)?.name;
            if terms.is_empty() {
                terms.push(format!("{:.2}*[{}]", weight, name));
            } else if *weight < 0.0 {
                terms.push(format!("- {:.2}*[{}]", -weight, name));
            } else {
                terms.push(format!("+ {:.2}*[{}]", weight, name));
            }
        }
        Ok(format!(
            "{} = {}",
            arena.variable(sum_variable)?.name,
            terms.join(" ")
        ))
    }

    pub fn weights(&self, solve_for: usize) -> Option<&[f64]> {
        self.weights.get(solve_for).map(Vec::as_slice)
    }

    pub fn variable_index_order(&self, solve_for: usize) -> Option<&[usize]> {
        self.variable_index_orders.get(solve_for).map(Vec::as_slice)
    }

    fn update_helper(
        &self,
        arena: &mut Arena,
        weights: &[f64],
        weights_squared: &[f64],
        order: &[usize],
    ) -> Result<f64> {
        let target = self.bindings[order[0]];
        let old_message = target.message_value(arena)?;
        let old_marginal = target.marginal(arena)?;

        let mut inverse_precision_sum = 0.0;
        let mut weighted_mean_sum = 0.0;
        let mut uninformed = false;

        for (i, &binding_index) in order[1..].iter().enumerate() {
            if weights[i] == 0.0 {
                continue;
            }

            let binding = self.bindings[binding_index];
            let without_message = binding.marginal(arena)? / binding.message_value(arena)?;

            if without_message.precision() == 0.0 {
                uninformed = true;
                break;
            }

            inverse_precision_sum += weights_squared[i] / without_message.precision();
            weighted_mean_sum +=
                weights[i] * without_message.precision_mean() / without_message.precision();
        }

        let new_message = if uninformed || inverse_precision_sum == 0.0 {
            GaussianBelief::uninformative()
        } else {
            let new_precision = 1.0 / inverse_precision_sum;
            GaussianBelief::from_precision_mean(new_precision * weighted_mean_sum, new_precision)
        };

        let new_marginal = (old_marginal / old_message) * new_message;

        arena.set_message_value(target.message, new_message)?;
        arena.set_value(target.variable, new_marginal)?;

        Ok(GaussianBelief::absolute_difference(&new_marginal, &old_marginal))
    }
}

impl Factor for GaussianWeightedSumFactor {
    fn name(&self) -> &str {
        &self.name
    }

    fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    fn update_message_at(&self, arena: &mut Arena, index: usize) -> Result<f64> {
        self.update_helper(
            arena,
            &self.weights[index],
            &self.weights_squared[index],
            &self.variable_index_orders[index],
        )
    }

    fn log_normalization(&self, arena: &Arena) -> Result<f64> {
        let mut result = 0.0;
        for binding in &self.bindings[1..] {
            result += GaussianBelief::log_ratio_normalization(
                &binding.marginal(arena)?,
                &binding.message_value(arena)?,
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trueskill::factors::GaussianPriorFactor;

    fn seeded(arena: &mut Arena, name: &str, mean: f64, variance: f64) -> VariableId {
        let variable = arena.add_variable(name);
        let prior = GaussianPriorFactor::new(arena, mean, variance, variable).unwrap();
        prior.update_message(arena, 0).unwrap();
        variable
    }

    #[test]
    fn test_solve_tables() {
        let (weights, orders) = GaussianWeightedSumFactor::solve_tables(&[1.0, -1.0]);

        assert_eq!(weights[0], vec![1.0, -1.0]);
        assert_eq!(orders[0], vec![0, 1, 2]);

        // a = b + s
        assert_eq!(weights[1], vec![1.0, 1.0]);
        assert_eq!(orders[1], vec![1, 2, 0]);

        // b = a - s
        assert_eq!(weights[2], vec![1.0, -1.0]);
        assert_eq!(orders[2], vec![2, 1, 0]);
    }

    #[test]
    fn test_solve_tables_three_terms() {
        let (weights, orders) = GaussianWeightedSumFactor::solve_tables(&[0.5, 2.0, 4.0]);

        assert_eq!(weights[2], vec![-0.25, -2.0, 0.5]);
        assert_eq!(orders[2], vec![2, 1, 3, 0]);
    }

    #[test]
    fn test_sum_of_two_beliefs() {
        let mut arena = Arena::new();
        let a = seeded(&mut arena, "a", 10.0, 4.0);
        let b = seeded(&mut arena, "b", 3.0, 9.0);
        let sum = arena.add_variable("a - b");
        let factor =
            GaussianWeightedSumFactor::new(&mut arena, sum, &[a, b], &[1.0, -1.0]).unwrap();

        factor.update_message(&mut arena, 0).unwrap();

        let belief = arena.value(sum).unwrap();
        assert!((belief.mean() - 7.0).abs() < 1e-9);
        assert!((belief.variance() - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_solve_for_summand() {
        let mut arena = Arena::new();
        let a = arena.add_variable("a");
        let b = seeded(&mut arena, "b", 3.0, 9.0);
        let sum = seeded(&mut arena, "a - b", 7.0, 4.0);
        let factor =
            GaussianWeightedSumFactor::new(&mut arena, sum, &[a, b], &[1.0, -1.0]).unwrap();

        factor.update_message(&mut arena, 1).unwrap();

        let belief = arena.value(a).unwrap();
        assert!((belief.mean() - 10.0).abs() < 1e-9);
        assert!((belief.variance() - 13.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_weight_never_produces_nan() {
        let mut arena = Arena::new();
        let a = seeded(&mut arena, "a", 10.0, 4.0);
        let b = seeded(&mut arena, "b", 3.0, 9.0);
        let sum = seeded(&mut arena, "team", 10.0, 4.0);
        let factor =
            GaussianWeightedSumFactor::new(&mut arena, sum, &[a, b], &[1.0, 0.0]).unwrap();

        for index in 0..3 {
            let delta = factor.update_message(&mut arena, index).unwrap();
            assert!(delta.is_finite(), "index {index} produced {delta}");
        }

        for variable in [a, b, sum] {
            let belief = arena.value(variable).unwrap();
            assert!(belief.precision().is_finite());
            assert!(belief.precision_mean().is_finite());
        }

        // solving for the zero-weight summand leaves it with its own prior
        let b_belief = arena.value(b).unwrap();
        assert!((b_belief.mean() - 3.0).abs() < 1e-9);
        assert!((b_belief.variance() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_mismatched_weights_rejected() {
        let mut arena = Arena::new();
        let a = arena.add_variable("a");
        let sum = arena.add_variable("sum");
        assert!(GaussianWeightedSumFactor::new(&mut arena, sum, &[a], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_name_describes_equation() {
        let mut arena = Arena::new();
        let a = arena.add_variable("a");
        let b = arena.add_variable("b");
        let sum = arena.add_variable("d");
        let factor =
            GaussianWeightedSumFactor::new(&mut arena, sum, &[a, b], &[1.0, -1.0]).unwrap();
        assert_eq!(factor.name(), "d = 1.00*[a] - 1.00*[b]");
    }
}
