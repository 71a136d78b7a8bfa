//! Player priors feeding each player's skill variable

use crate::error::Result;
use crate::factor_graph::{
    schedule_each, FactorGraph, FactorGraphLayer, FactorId, Schedule, VariableId,
};
use crate::trueskill::factors::GaussianPriorFactor;
use crate::types::Team;

#[derive(Debug)]
pub struct PlayerPriorValuesToSkillsLayer {
    teams: Vec<Team>,
    dynamics_factor: f64,
    factors: Vec<FactorId>,
    output: Vec<Vec<VariableId>>,
}

impl PlayerPriorValuesToSkillsLayer {
    pub fn new(teams: &[Team], dynamics_factor: f64) -> Self {
        Self {
            teams: teams.to_vec(),
            dynamics_factor,
            factors: Vec::new(),
            output: Vec::new(),
        }
    }
}

impl FactorGraphLayer for PlayerPriorValuesToSkillsLayer {
    fn name(&self) -> &str {
        "player priors to skills"
    }

    fn build_layer(
        &mut self,
        graph: &mut FactorGraph,
        _inputs: &[Vec<VariableId>],
    ) -> Result<()> {
        let dynamics_variance = self.dynamics_factor * self.dynamics_factor;

        for team in &self.teams {
            let mut team_skills = Vec::with_capacity(team.len());
            for member in team.iter() {
                let arena = graph.arena_mut();
                let skill = arena.add_keyed_variable(
                    format!("{}'s skill", member.player.id),
                    member.player.id.clone(),
                );
                let factor = GaussianPriorFactor::new(
                    arena,
                    member.rating.mean,
                    member.rating.variance() + dynamics_variance,
                    skill,
                )?;
                self.factors.push(graph.add_factor(Box::new(factor)));
                team_skills.push(skill);
            }
            self.output.push(team_skills);
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
        schedule_each("All priors", &self.factors, 0)
    }
}
