//! Common types used throughout the rating engine

use crate::numerics::GaussianBelief;
use serde::{Deserialize, Serialize};
use skillratings::trueskill::TrueSkillRating;

/// Unique identifier for players
pub type PlayerId = String;

/// Multiplier applied to the standard deviation by [`Rating::conservative_rating`]
pub const DEFAULT_CONSERVATIVE_MULTIPLIER: f64 = 3.0;

fn default_conservative_multiplier() -> f64 {
    DEFAULT_CONSERVATIVE_MULTIPLIER
}

fn full_participation() -> f64 {
    1.0
}

/// A player's skill belief
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mean: f64,
    pub standard_deviation: f64,
    #[serde(default = "default_conservative_multiplier")]
    pub conservative_multiplier: f64,
}

impl Rating {
    pub fn new(mean: f64, standard_deviation: f64) -> Self {
        Self {
            mean,
            standard_deviation,
            conservative_multiplier: DEFAULT_CONSERVATIVE_MULTIPLIER,
        }
    }

    pub fn with_conservative_multiplier(mut self, multiplier: f64) -> Self {
        self.conservative_multiplier = multiplier;
        self
    }

    pub fn variance(&self) -> f64 {
        self.standard_deviation * self.standard_deviation
    }

    /// A skill estimate the player is very likely to exceed
    pub fn conservative_rating(&self) -> f64 {
        self.mean - self.conservative_multiplier * self.standard_deviation
    }

    pub fn to_belief(&self) -> GaussianBelief {
        GaussianBelief::new(self.mean, self.standard_deviation)
    }

    /// Move only `update_percentage` of the way from `prior` to `full_posterior`,
    /// interpolating in precision space
    pub fn partial_update(
        prior: &Rating,
        full_posterior: &Rating,
        update_percentage: f64,
    ) -> Rating {
        let prior_belief = prior.to_belief();
        let posterior_belief = full_posterior.to_belief();

        let precision_difference = posterior_belief.precision() - prior_belief.precision();
        let precision_mean_difference =
            posterior_belief.precision_mean() - prior_belief.precision_mean();

        let partial = GaussianBelief::from_precision_mean(
            prior_belief.precision_mean() + update_percentage * precision_mean_difference,
            prior_belief.precision() + update_percentage * precision_difference,
        );

        Rating {
            mean: partial.mean(),
            standard_deviation: partial.standard_deviation(),
            conservative_multiplier: prior.conservative_multiplier,
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "μ={:.4}, σ={:.4}", self.mean, self.standard_deviation)
    }
}

impl From<TrueSkillRating> for Rating {
    fn from(rating: TrueSkillRating) -> Self {
        Rating::new(rating.rating, rating.uncertainty)
    }
}

impl From<Rating> for TrueSkillRating {
    fn from(rating: Rating) -> Self {
        Self {
            rating: rating.mean,
            uncertainty: rating.standard_deviation,
        }
    }
}

/// A participant and how much of the match they took part in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Fraction of the match played, used to weight the team performance
    #[serde(default = "full_participation")]
    pub partial_play: f64,
    /// Fraction of the computed rating change to apply
    #[serde(default = "full_participation")]
    pub partial_update: f64,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>) -> Self {
        Self {
            id: id.into(),
            partial_play: 1.0,
            partial_update: 1.0,
        }
    }

    pub fn with_partial_play(mut self, percentage: f64) -> Self {
        self.partial_play = percentage;
        self
    }

    pub fn with_partial_update(mut self, percentage: f64) -> Self {
        self.partial_update = percentage;
        self
    }
}

/// A player together with their rating going into the match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub player: Player,
    pub rating: Rating,
}

/// Players competing together as one side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub members: Vec<TeamMember>,
}

impl Team {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_player(mut self, player: Player, rating: Rating) -> Self {
        self.add_player(player, rating);
        self
    }

    pub fn add_player(&mut self, player: Player, rating: Rating) {
        self.members.push(TeamMember { player, rating });
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamMember> {
        self.members.iter()
    }
}

/// One player's rating before and after a match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_id: PlayerId,
    pub old_rating: Rating,
    pub new_rating: Rating,
    pub rank: u32,
}

impl RatingChange {
    pub fn mean_delta(&self) -> f64 {
        self.new_rating.mean - self.old_rating.mean
    }
}

/// A finished match as read from a match file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    pub teams: Vec<Team>,
    /// One rank per team, 1 = first place
    #[serde(default)]
    pub ranks: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conservative_rating() {
        let rating = Rating::new(25.0, 25.0 / 3.0);
        assert!(rating.conservative_rating().abs() < 1e-12);

        let cautious = rating.with_conservative_multiplier(2.0);
        assert!((cautious.conservative_rating() - 25.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_update_endpoints() {
        let prior = Rating::new(25.0, 8.0);
        let posterior = Rating::new(29.0, 7.0);

        let none = Rating::partial_update(&prior, &posterior, 0.0);
        assert!((none.mean - 25.0).abs() < 1e-9);
        assert!((none.standard_deviation - 8.0).abs() < 1e-9);

        let full = Rating::partial_update(&prior, &posterior, 1.0);
        assert!((full.mean - 29.0).abs() < 1e-9);
        assert!((full.standard_deviation - 7.0).abs() < 1e-9);

        let half = Rating::partial_update(&prior, &posterior, 0.5);
        assert!(half.mean > 25.0 && half.mean < 29.0);
        assert!(half.standard_deviation < 8.0 && half.standard_deviation > 7.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rating::new(25.0, 8.0).to_string(), "μ=25.0000, σ=8.0000");
    }

    #[test]
    fn test_skillratings_conversion() {
        let rating = Rating::new(30.0, 5.0);
        let converted: TrueSkillRating = rating.into();
        assert_eq!(converted.rating, 30.0);
        assert_eq!(converted.uncertainty, 5.0);

        let back: Rating = converted.into();
        assert_eq!(back, rating);
    }

    #[test]
    fn test_rating_deserializes_with_default_multiplier() {
        let rating: Rating =
            serde_json::from_str(r#"{"mean": 20.0, "standard_deviation": 4.0}"#).unwrap();
        assert_eq!(rating.conservative_multiplier, DEFAULT_CONSERVATIVE_MULTIPLIER);
    }

    #[test]
    fn test_team_builder() {
        let team = Team::new()
            .with_player(Player::new("alice"), Rating::new(25.0, 8.0))
            .with_player(Player::new("bob").with_partial_play(0.5), Rating::new(20.0, 6.0));

        assert_eq!(team.len(), 2);
        assert_eq!(team.members[1].player.partial_play, 0.5);
        assert_eq!(team.members[1].player.partial_update, 1.0);
    }
}
