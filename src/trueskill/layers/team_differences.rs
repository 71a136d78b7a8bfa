//! Differences between the performances of adjacently ranked teams

use crate::error::{RatingError, Result};
use crate::factor_graph::{FactorGraph, FactorGraphLayer, FactorId, VariableId};
use crate::trueskill::factors::GaussianWeightedSumFactor;

#[derive(Debug, Default)]
pub struct TeamPerformancesToTeamPerformanceDifferencesLayer {
    factors: Vec<FactorId>,
    output: Vec<Vec<VariableId>>,
}

impl TeamPerformancesToTeamPerformanceDifferencesLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Difference factors in rank order
    pub fn difference_factors(&self) -> &[FactorId] {
        &self.factors
    }
}

fn team_variable(inputs: &[Vec<VariableId>], index: usize) -> Result<VariableId> {
    inputs
        .get(index)
        .and_then(|group| group.first())
        .copied()
        .ok_or_else(|| {
            RatingError::InvalidGraphState {
                message: format!("missing team performance variable for team {}", index),
            }
            .into()
        })
}

impl FactorGraphLayer for TeamPerformancesToTeamPerformanceDifferencesLayer {
    fn name(&self) -> &str {
        "team performances to team performance differences"
    }

    fn build_layer(
        &mut self,
        graph: &mut FactorGraph,
        inputs: &[Vec<VariableId>],
    ) -> Result<()> {
        for i in 0..inputs.len().saturating_sub(1) {
            let stronger_team = team_variable(inputs, i)?;
            let weaker_team = team_variable(inputs, i + 1)?;

            let arena = graph.arena_mut();
            let difference =
                arena.add_variable(format!("Team {} - Team {} performance difference", i, i + 1));
            let factor = GaussianWeightedSumFactor::new(
                arena,
                difference,
                &[stronger_team, weaker_team],
                &[1.0, -1.0],
            )?;
            self.factors.push(graph.add_factor(Box::new(factor)));
            self.output.push(vec![difference]);
        }

        Ok(())
    }

    fn output_variable_groups(&self) -> &[Vec<VariableId>] {
        &self.output
    }

    fn factors(&self) -> Vec<FactorId> {
        self.factors.clone()
    }
}
