//! Input validation run before any graph is built

use crate::error::{RatingError, Result};
use crate::types::Team;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Inclusive range of allowed counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub fn exactly(count: usize) -> Self {
        Self {
            min: count,
            max: count,
        }
    }

    pub fn at_least(min: usize) -> Self {
        Self {
            min,
            max: usize::MAX,
        }
    }

    pub fn inclusive(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

/// Check team count, players per team, ranks, and per-player options
pub fn validate_teams(
    teams: &[Team],
    ranks: Option<&[u32]>,
    team_range: CountRange,
    players_per_team: CountRange,
) -> Result<()> {
    if !team_range.contains(teams.len()) {
        return Err(RatingError::TeamCountOutOfRange {
            count: teams.len(),
            min: team_range.min,
            max: team_range.max,
        }
        .into());
    }

    if let Some(ranks) = ranks {
        if ranks.len() != teams.len() {
            return Err(RatingError::InvalidInput {
                reason: format!(
                    "Expected {} ranks, one per team, got {}",
                    teams.len(),
                    ranks.len()
                ),
            }
            .into());
        }
    }

    let mut seen = HashSet::new();
    for (index, team) in teams.iter().enumerate() {
        if !players_per_team.contains(team.len()) {
            return Err(RatingError::PlayerCountOutOfRange {
                team: index,
                count: team.len(),
                min: players_per_team.min,
                max: players_per_team.max,
            }
            .into());
        }

        for member in team.iter() {
            if !seen.insert(member.player.id.as_str()) {
                return Err(RatingError::DuplicatePlayer {
                    player_id: member.player.id.clone(),
                }
                .into());
            }

            if !(0.0..=1.0).contains(&member.player.partial_play)
                || !(0.0..=1.0).contains(&member.player.partial_update)
            {
                return Err(RatingError::InvalidInput {
                    reason: format!(
                        "Partial play and partial update for {} must be in [0, 1]",
                        member.player.id
                    ),
                }
                .into());
            }

            let rating = &member.rating;
            if !rating.mean.is_finite() || !(rating.standard_deviation > 0.0) {
                return Err(RatingError::InvalidInput {
                    reason: format!(
                        "Rating for {} must have a finite mean and positive standard deviation",
                        member.player.id
                    ),
                }
                .into());
            }
        }
    }

    Ok(())
}
