//! Skill calculator trait and shared result types
//!
//! Every calculator consumes teams of rated players plus a parallel rank
//! array (lower is better, equal adjacent ranks are draws) and produces a
//! posterior rating per player.

use super::validation::{validate_teams, CountRange};
use crate::config::GameInfo;
use crate::error::{RatingError, Result};
use crate::factor_graph::ScheduleReport;
use crate::types::{PlayerId, Rating, RatingChange, Team};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Optional input features a calculator may honour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillCalculatorOption {
    /// Weight team performance by each player's share of the match
    PartialPlay,
    /// Apply only part of the computed rating change
    PartialUpdate,
}

/// Result of a rating calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingCalculationResult {
    /// Rating changes for all players, in input order
    pub rating_changes: Vec<RatingChange>,
    /// Draw probability under the prior ratings (0.0 to 1.0, higher is fairer)
    pub match_quality: f64,
    /// Probability the observed ranking had under the prior ratings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability_of_ranking: Option<f64>,
    /// Message-passing diagnostics, for calculators that iterate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleReport>,
}

impl RatingCalculationResult {
    /// Posterior rating of a single player
    pub fn new_rating(&self, player_id: &str) -> Option<Rating> {
        self.rating_changes
            .iter()
            .find(|change| change.player_id == player_id)
            .map(|change| change.new_rating)
    }
}

/// Trait for calculating rating changes after games
pub trait SkillCalculator: Send + Sync {
    fn name(&self) -> &'static str;

    fn game_info(&self) -> &GameInfo;

    fn supported_options(&self) -> &'static [SkillCalculatorOption];

    /// Allowed number of teams
    fn team_range(&self) -> CountRange;

    /// Allowed number of players on each team
    fn players_per_team_range(&self) -> CountRange;

    /// Calculate posterior ratings for every player
    ///
    /// # Arguments
    /// * `teams` - Teams with each member's prior rating
    /// * `ranks` - One rank per team where 1 = first place; ties are draws
    fn calculate_new_ratings(&self, teams: &[Team], ranks: &[u32])
        -> Result<RatingCalculationResult>;

    /// Probability of an all-way draw under the current ratings
    fn calculate_match_quality(&self, teams: &[Team]) -> Result<f64>;

    fn is_supported(&self, option: SkillCalculatorOption) -> bool {
        self.supported_options().contains(&option)
    }

    /// Reject input outside this calculator's declared limits
    fn validate(&self, teams: &[Team], ranks: Option<&[u32]>) -> Result<()> {
        validate_teams(
            teams,
            ranks,
            self.team_range(),
            self.players_per_team_range(),
        )
    }

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": self.name(),
            "game": self.game_info(),
            "supported_options": self.supported_options(),
        })
    }
}

/// Pair every input player with their posterior rating, preserving input order
pub(crate) fn collect_rating_changes(
    teams: &[Team],
    ranks: &[u32],
    new_ratings: &HashMap<PlayerId, Rating>,
) -> Result<Vec<RatingChange>> {
    let mut rating_changes = Vec::new();
    for (team, &rank) in teams.iter().zip(ranks) {
        for member in team.iter() {
            let new_rating = new_ratings.get(&member.player.id).ok_or_else(|| {
                anyhow::Error::from(RatingError::InvalidGraphState {
                    message: format!("No posterior rating for player {}", member.player.id),
                })
            })?;

            rating_changes.push(RatingChange {
                player_id: member.player.id.clone(),
                old_rating: member.rating,
                new_rating: *new_rating,
                rank,
            });
        }
    }
    Ok(rating_changes)
}
