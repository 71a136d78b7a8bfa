//! Each team difference constrained by the observed outcome

use crate::error::{RatingError, Result};
use crate::factor_graph::{Factor, FactorGraph, FactorGraphLayer, FactorId, VariableId};
use crate::trueskill::factors::{GaussianGreaterThanFactor, GaussianWithinFactor};

#[derive(Debug)]
pub struct TeamDifferencesComparisonLayer {
    epsilon: f64,
    team_ranks: Vec<u32>,
    factors: Vec<FactorId>,
}

impl TeamDifferencesComparisonLayer {
    pub fn new(epsilon: f64, team_ranks: &[u32]) -> Self {
        Self {
            epsilon,
            team_ranks: team_ranks.to_vec(),
            factors: Vec::new(),
        }
    }

    /// Comparison factors in rank order
    pub fn comparison_factors(&self) -> &[FactorId] {
        &self.factors
    }
}

impl FactorGraphLayer for TeamDifferencesComparisonLayer {
    fn name(&self) -> &str {
        "team differences comparison"
    }

    fn build_layer(
        &mut self,
        graph: &mut FactorGraph,
        inputs: &[Vec<VariableId>],
    ) -> Result<()> {
        if self.team_ranks.len() != inputs.len() + 1 {
            return Err(RatingError::InvalidGraphState {
                message: format!(
                    "{} team differences need {} ranks, got {}",
                    inputs.len(),
                    inputs.len() + 1,
                    self.team_ranks.len()
                ),
            }
            .into());
        }

        for (i, group) in inputs.iter().enumerate() {
            let difference = group.first().copied().ok_or_else(|| {
                anyhow::Error::from(RatingError::InvalidGraphState {
                    message: format!("missing performance difference {}", i),
                })
            })?;
            let is_draw = self.team_ranks[i] == self.team_ranks[i + 1];

            let arena = graph.arena_mut();
            let factor: Box<dyn Factor> = if is_draw {
                Box::new(GaussianWithinFactor::new(arena, self.epsilon, difference)?)
            } else {
                Box::new(GaussianGreaterThanFactor::new(arena, self.epsilon, difference)?)
            };
            self.factors.push(graph.add_factor(factor));
        }

        Ok(())
    }

    fn output_variable_groups(&self) -> &[Vec<VariableId>] {
        &[]
    }

    fn factors(&self) -> Vec<FactorId> {
        self.factors.clone()
    }
}
