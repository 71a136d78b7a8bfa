//! Closed-form TrueSkill updates for exactly two teams
//!
//! Both the head-to-head and the two-team calculators apply the same
//! single-step update: no factor graph, no iteration. Team skill is the sum
//! of member skills and every member shifts by their share of the variance.

use super::correction::{
    v_exceeds_margin_scaled, v_within_margin_scaled, w_exceeds_margin_scaled,
    w_within_margin_scaled,
};
use super::match_quality::two_team_match_quality;
use crate::config::GameInfo;
use crate::error::Result;
use crate::rating::calculator::collect_rating_changes;
use crate::rating::{
    sort_by_rank, CountRange, RatingCalculationResult, SkillCalculator, SkillCalculatorOption,
};
use crate::types::{PlayerId, Rating, Team};
use std::collections::HashMap;

/// Outcome from one side's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PairwiseComparison {
    Win,
    Draw,
    Lose,
}

impl PairwiseComparison {
    fn rank_multiplier(self) -> f64 {
        match self {
            PairwiseComparison::Lose => -1.0,
            PairwiseComparison::Win | PairwiseComparison::Draw => 1.0,
        }
    }
}

/// Apply the closed-form update to every member of `self_team`
pub(crate) fn update_team_ratings(
    game_info: &GameInfo,
    new_ratings: &mut HashMap<PlayerId, Rating>,
    self_team: &Team,
    other_team: &Team,
    comparison: PairwiseComparison,
) {
    let draw_margin = game_info.draw_margin();
    let beta_squared = game_info.beta * game_info.beta;
    let tau_squared = game_info.dynamics_factor * game_info.dynamics_factor;

    let total_players = (self_team.len() + other_team.len()) as f64;
    let self_mean_sum: f64 = self_team.iter().map(|m| m.rating.mean).sum();
    let other_mean_sum: f64 = other_team.iter().map(|m| m.rating.mean).sum();

    let c = (self_team.iter().map(|m| m.rating.variance()).sum::<f64>()
        + other_team.iter().map(|m| m.rating.variance()).sum::<f64>()
        + total_players * beta_squared)
        .sqrt();

    let (winning_mean, losing_mean) = match comparison {
        PairwiseComparison::Lose => (other_mean_sum, self_mean_sum),
        PairwiseComparison::Win | PairwiseComparison::Draw => (self_mean_sum, other_mean_sum),
    };
    let mean_delta = winning_mean - losing_mean;

    let (v, w) = match comparison {
        PairwiseComparison::Draw => (
            v_within_margin_scaled(mean_delta, draw_margin, c),
            w_within_margin_scaled(mean_delta, draw_margin, c),
        ),
        _ => (
            v_exceeds_margin_scaled(mean_delta, draw_margin, c),
            w_exceeds_margin_scaled(mean_delta, draw_margin, c),
        ),
    };
    let rank_multiplier = comparison.rank_multiplier();

    for member in self_team.iter() {
        let previous = member.rating;
        let variance_with_dynamics = previous.variance() + tau_squared;
        let mean_multiplier = variance_with_dynamics / c;
        let std_dev_multiplier = variance_with_dynamics / (c * c);

        let new_mean = previous.mean + rank_multiplier * mean_multiplier * v;
        let new_std_dev = (variance_with_dynamics * (1.0 - w * std_dev_multiplier)).sqrt();

        new_ratings.insert(
            member.player.id.clone(),
            Rating::new(new_mean, new_std_dev)
                .with_conservative_multiplier(previous.conservative_multiplier),
        );
    }
}

/// Rate both sides of a sorted two-team match
pub(crate) fn rate_two_teams(
    game_info: &GameInfo,
    teams: &[Team],
    ranks: &[u32],
) -> HashMap<PlayerId, Rating> {
    let (sorted_teams, sorted_ranks) = sort_by_rank(teams, ranks);
    let was_draw = sorted_ranks[0] == sorted_ranks[1];
    let (first, second) = if was_draw {
        (PairwiseComparison::Draw, PairwiseComparison::Draw)
    } else {
        (PairwiseComparison::Win, PairwiseComparison::Lose)
    };

    let mut new_ratings = HashMap::new();
    update_team_ratings(game_info, &mut new_ratings, &sorted_teams[0], &sorted_teams[1], first);
    update_team_ratings(game_info, &mut new_ratings, &sorted_teams[1], &sorted_teams[0], second);
    new_ratings
}

#[derive(Debug, Clone)]
pub struct TwoTeamTrueSkillCalculator {
    game_info: GameInfo,
}

impl TwoTeamTrueSkillCalculator {
    pub fn new(game_info: GameInfo) -> Result<Self> {
        game_info.validate()?;
        Ok(Self { game_info })
    }
}

impl SkillCalculator for TwoTeamTrueSkillCalculator {
    fn name(&self) -> &'static str {
        "two_team"
    }

    fn game_info(&self) -> &GameInfo {
        &self.game_info
    }

    fn supported_options(&self) -> &'static [SkillCalculatorOption] {
        &[]
    }

    fn team_range(&self) -> CountRange {
        CountRange::exactly(2)
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
        let new_ratings = rate_two_teams(&self.game_info, teams, ranks);

        Ok(RatingCalculationResult {
            rating_changes: collect_rating_changes(teams, ranks, &new_ratings)?,
            match_quality: two_team_match_quality(&self.game_info, &teams[0], &teams[1]),
            probability_of_ranking: None,
            schedule: None,
        })
    }

    fn calculate_match_quality(&self, teams: &[Team]) -> Result<f64> {
        self.validate(teams, None)?;
        Ok(two_team_match_quality(&self.game_info, &teams[0], &teams[1]))
    }
}
