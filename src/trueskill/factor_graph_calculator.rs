//! Full factor-graph TrueSkill: any number of teams of any size

use super::graph::TrueSkillFactorGraph;
use super::match_quality::match_quality;
use crate::config::{EngineSettings, GameInfo};
use crate::error::Result;
use crate::rating::calculator::collect_rating_changes;
use crate::rating::{
    sort_by_rank, warn_clamped_partial_play, CountRange, RatingCalculationResult,
    SkillCalculator, SkillCalculatorOption,
};
use crate::types::{Rating, Team};
use tracing::{debug, warn};

const SUPPORTED_OPTIONS: &[SkillCalculatorOption] = &[
    SkillCalculatorOption::PartialPlay,
    SkillCalculatorOption::PartialUpdate,
];

#[derive(Debug, Clone)]
pub struct FactorGraphTrueSkillCalculator {
    game_info: GameInfo,
    engine: EngineSettings,
}

impl FactorGraphTrueSkillCalculator {
    pub fn new(game_info: GameInfo, engine: EngineSettings) -> Result<Self> {
        game_info.validate()?;
        engine.validate()?;
        Ok(Self { game_info, engine })
    }

    pub fn engine(&self) -> &EngineSettings {
        &self.engine
    }
}

impl SkillCalculator for FactorGraphTrueSkillCalculator {
    fn name(&self) -> &'static str {
        "factor_graph"
    }

    fn game_info(&self) -> &GameInfo {
        &self.game_info
    }

    fn supported_options(&self) -> &'static [SkillCalculatorOption] {
        SUPPORTED_OPTIONS
    }

    fn team_range(&self) -> CountRange {
        CountRange::at_least(2)
    }

    fn players_per_team_range(&self) -> CountRange {
        CountRange::at_least(1)
    }

    fn calculate_new_ratings(
        &self,
        teams: &[Team],
        ranks: &[u32],
    ) -> Result<RatingCalculationResult> {
        self.validate(teams, Some(ranks))?;
        warn_clamped_partial_play(teams);
        let (sorted_teams, sorted_ranks) = sort_by_rank(teams, ranks);

        let mut graph = TrueSkillFactorGraph::new(
            &self.game_info,
            &self.engine,
            &sorted_teams,
            &sorted_ranks,
        );
        graph.build_graph()?;
        let report = graph.run_schedule()?;
        if !report.converged {
            warn!(
                teams = teams.len(),
                iterations = report.loop_iterations,
                final_delta = report.final_delta,
                "Rating update did not converge, using last iterate"
            );
        }

        let mut new_ratings = graph.updated_ratings()?;
        let probability_of_ranking = graph.probability_of_ranking()?;

        for member in teams.iter().flat_map(|team| team.iter()) {
            if let Some(posterior) = new_ratings.get_mut(&member.player.id) {
                let full = posterior
                    .with_conservative_multiplier(member.rating.conservative_multiplier);
                *posterior = if member.player.partial_update < 1.0 {
                    Rating::partial_update(&member.rating, &full, member.player.partial_update)
                } else {
                    full
                };
            }
        }

        let match_quality = match_quality(&self.game_info, &sorted_teams)?;
        debug!(
            teams = teams.len(),
            match_quality,
            probability_of_ranking,
            loop_iterations = report.loop_iterations,
            "Calculated new ratings"
        );

        Ok(RatingCalculationResult {
            rating_changes: collect_rating_changes(teams, ranks, &new_ratings)?,
            match_quality,
            probability_of_ranking: Some(probability_of_ranking),
            schedule: Some(report),
        })
    }

    fn calculate_match_quality(&self, teams: &[Team]) -> Result<f64> {
        self.validate(teams, None)?;
        warn_clamped_partial_play(teams);
        match_quality(&self.game_info, teams)
    }
}
