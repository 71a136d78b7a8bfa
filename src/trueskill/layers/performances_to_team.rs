//! Player performances summed into a team performance, weighted by partial play

use crate::error::{RatingError, Result};
use crate::factor_graph::{
    schedule_each, FactorGraph, FactorGraphLayer, FactorId, Schedule, VariableId,
};
use crate::trueskill::factors::GaussianWeightedSumFactor;

#[derive(Debug)]
pub struct PlayerPerformancesToTeamPerformancesLayer {
    /// Per team, one weight per player in input order
    team_weights: Vec<Vec<f64>>,
    factors: Vec<FactorId>,
    output: Vec<Vec<VariableId>>,
}

impl PlayerPerformancesToTeamPerformancesLayer {
    pub fn new(team_weights: Vec<Vec<f64>>) -> Self {
        Self {
            team_weights,
            factors: Vec::new(),
            output: Vec::new(),
        }
    }
}

impl FactorGraphLayer for PlayerPerformancesToTeamPerformancesLayer {
    fn name(&self) -> &str {
        "player performances to team performances"
    }

    fn build_layer(
        &mut self,
        graph: &mut FactorGraph,
        inputs: &[Vec<VariableId>],
    ) -> Result<()> {
        if inputs.len() != self.team_weights.len() {
            return Err(RatingError::InvalidGraphState {
                message: format!(
                    "{} teams of performances but {} weight sets",
                    inputs.len(),
                    self.team_weights.len()
                ),
            }
            .into());
        }

        for (team_index, (team_performances, weights)) in
            inputs.iter().zip(&self.team_weights).enumerate()
        {
            let arena = graph.arena_mut();
            let team_performance =
                arena.add_variable(format!("Team {}'s performance", team_index));
            let factor = GaussianWeightedSumFactor::new(
                arena,
                team_performance,
                team_performances,
                weights,
            )?;
            self.factors.push(graph.add_factor(Box::new(factor)));
            self.output.push(vec![team_performance]);
        }

        Ok(())
    }

    fn output_variable_groups(&self) -> &[Vec<VariableId>] {
        &self.output
    }

    fn factors(&self) -> Vec<FactorId> {
        self.factors.clone()
    }

    fn create_prior_schedule(&self) -> Option<Schedule> {
        schedule_each("all player perf to team perf schedule", &self.factors, 0)
    }

    fn create_posterior_schedule(&self) -> Option<Schedule> {
        let steps: Vec<Schedule> = self
            .factors
            .iter()
            .zip(&self.team_weights)
            .flat_map(|(&factor, weights)| {
                (1..=weights.len()).map(move |index| {
                    Schedule::step(format!("team sum perf @{}", index), factor, index)
                })
            })
            .collect();

        if steps.is_empty() {
            return None;
        }
        Some(Schedule::sequence("all of the team's sum iterations", steps))
    }
}
