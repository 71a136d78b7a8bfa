//! Each player's skill producing a noisy performance

use crate::error::Result;
use crate::factor_graph::{
    schedule_each, FactorGraph, FactorGraphLayer, FactorId, Schedule, VariableId,
};
use crate::trueskill::factors::GaussianLikelihoodFactor;

#[derive(Debug)]
pub struct PlayerSkillsToPerformancesLayer {
    beta_squared: f64,
    factors: Vec<FactorId>,
    output: Vec<Vec<VariableId>>,
}

impl PlayerSkillsToPerformancesLayer {
    pub fn new(beta: f64) -> Self {
        Self {
            beta_squared: beta * beta,
            factors: Vec::new(),
            output: Vec::new(),
        }
    }
}

impl FactorGraphLayer for PlayerSkillsToPerformancesLayer {
    fn name(&self) -> &str {
        "player skills to performances"
    }

    fn build_layer(
        &mut self,
        graph: &mut FactorGraph,
        inputs: &[Vec<VariableId>],
    ) -> Result<()> {
        for team_skills in inputs {
            let mut team_performances = Vec::with_capacity(team_skills.len());
            for &skill in team_skills {
                let arena = graph.arena_mut();
                let skill_variable = arena.variable(skill)?;
                let performance = match skill_variable.key.clone() {
                    Some(key) => arena.add_keyed_variable(format!("{}'s performance", key), key),
                    None => {
                        let name = format!("{} performance", skill_variable.name);
                        arena.add_variable(name)
                    }
                };

                let factor =
                    GaussianLikelihoodFactor::new(arena, self.beta_squared, performance, skill)?;
                self.factors.push(graph.add_factor(Box::new(factor)));
                team_performances.push(performance);
            }
            self.output.push(team_performances);
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
        schedule_each("All skill to performance sending", &self.factors, 0)
    }

    fn create_posterior_schedule(&self) -> Option<Schedule> {
        schedule_each("All skill to performance sending", &self.factors, 1)
    }
}
