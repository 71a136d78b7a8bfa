//! Composition root for one match's TrueSkill factor graph
//!
//! Layers are built top-down, each consuming the previous layer's output
//! variables. The full schedule runs every layer's prior schedule in layer
//! order and then every posterior schedule in reverse, after which the
//! posterior skills are read off the prior layer's output variables.

use super::layers::{
    IteratedTeamDifferencesInnerLayer, PlayerPerformancesToTeamPerformancesLayer,
    PlayerPriorValuesToSkillsLayer, PlayerSkillsToPerformancesLayer,
    TeamDifferencesComparisonLayer, TeamPerformancesToTeamPerformanceDifferencesLayer,
};
use crate::config::{EngineSettings, GameInfo};
use crate::error::{RatingError, Result};
use crate::factor_graph::{
    FactorGraph, FactorGraphLayer, FactorList, Schedule, ScheduleReport, VariableId,
};
use crate::rating::partial_play_weight;
use crate::types::{PlayerId, Rating, Team};
use std::collections::HashMap;
use tracing::debug;

/// Graph for teams already sorted into non-decreasing rank order
#[derive(Debug)]
pub struct TrueSkillFactorGraph {
    graph: FactorGraph,
    prior_layer: PlayerPriorValuesToSkillsLayer,
    layers: Vec<Box<dyn FactorGraphLayer>>,
    built: bool,
}

impl TrueSkillFactorGraph {
    pub fn new(
        game_info: &GameInfo,
        engine: &EngineSettings,
        teams: &[Team],
        team_ranks: &[u32],
    ) -> Self {
        let team_weights = teams
            .iter()
            .map(|team| {
                team.iter()
                    .map(|member| partial_play_weight(&member.player))
                    .collect()
            })
            .collect();

        let layers: Vec<Box<dyn FactorGraphLayer>> = vec![
            Box::new(PlayerSkillsToPerformancesLayer::new(game_info.beta)),
            Box::new(PlayerPerformancesToTeamPerformancesLayer::new(team_weights)),
            Box::new(IteratedTeamDifferencesInnerLayer::new(
                TeamPerformancesToTeamPerformanceDifferencesLayer::new(),
                TeamDifferencesComparisonLayer::new(game_info.draw_margin(), team_ranks),
                engine.convergence_threshold,
                engine.max_loop_iterations,
            )),
        ];

        Self {
            graph: FactorGraph::new(),
            prior_layer: PlayerPriorValuesToSkillsLayer::new(teams, game_info.dynamics_factor),
            layers,
            built: false,
        }
    }

    /// Create every variable, message and factor
    pub fn build_graph(&mut self) -> Result<()> {
        if self.built {
            return Err(RatingError::InvalidGraphState {
                message: "graph has already been built".to_string(),
            }
            .into());
        }

        self.prior_layer.build_layer(&mut self.graph, &[])?;
        let mut last_output: Vec<Vec<VariableId>> =
            self.prior_layer.output_variable_groups().to_vec();

        for layer in &mut self.layers {
            layer.build_layer(&mut self.graph, &last_output)?;
            last_output = layer.output_variable_groups().to_vec();
        }

        self.built = true;
        debug!(
            variables = self.graph.arena().variable_count(),
            messages = self.graph.arena().message_count(),
            factors = self.graph.factor_count(),
            "Built factor graph"
        );
        Ok(())
    }

    fn all_layers(&self) -> Vec<&dyn FactorGraphLayer> {
        let mut layers: Vec<&dyn FactorGraphLayer> = Vec::with_capacity(self.layers.len() + 1);
        layers.push(&self.prior_layer);
        layers.extend(self.layers.iter().map(|layer| layer.as_ref()));
        layers
    }

    /// Prior schedules in layer order, then posterior schedules in reverse
    pub fn create_full_schedule(&self) -> Schedule {
        let layers = self.all_layers();
        let mut full_schedule: Vec<Schedule> = layers
            .iter()
            .filter_map(|layer| layer.create_prior_schedule())
            .collect();

        full_schedule.extend(
            layers
                .iter()
                .rev()
                .filter_map(|layer| layer.create_posterior_schedule()),
        );

        Schedule::sequence("Full schedule", full_schedule)
    }

    pub fn run_schedule(&mut self) -> Result<ScheduleReport> {
        self.ensure_built()?;
        let schedule = self.create_full_schedule();
        schedule.run(&mut self.graph)
    }

    /// Log partition function of the whole graph under its current messages
    pub fn log_normalization(&mut self) -> Result<f64> {
        self.ensure_built()?;
        let mut factor_list = FactorList::new();
        for layer in self.all_layers() {
            factor_list.extend(layer.factors());
        }
        factor_list.log_normalization(&mut self.graph)
    }

    /// Probability of the observed ranking given the priors
    pub fn probability_of_ranking(&mut self) -> Result<f64> {
        Ok(self.log_normalization()?.exp())
    }

    /// Current skill belief of every player
    pub fn updated_ratings(&self) -> Result<HashMap<PlayerId, Rating>> {
        self.ensure_built()?;
        let arena = self.graph.arena();
        let mut ratings = HashMap::new();

        for team in self.prior_layer.output_variable_groups() {
            for &skill in team {
                let variable = arena.variable(skill)?;
                let key = variable.key.clone().ok_or_else(|| {
                    anyhow::Error::from(RatingError::InvalidGraphState {
                        message: format!("skill variable {} has no player", variable.name),
                    })
                })?;
                let belief = variable.value();
                ratings.insert(key, Rating::new(belief.mean(), belief.standard_deviation()));
            }
        }

        Ok(ratings)
    }

    pub fn graph(&self) -> &FactorGraph {
        &self.graph
    }

    fn ensure_built(&self) -> Result<()> {
        if self.built {
            Ok(())
        } else {
            Err(RatingError::InvalidGraphState {
                message: "graph has not been built".to_string(),
            }
            .into())
        }
    }
}
