//! Closed-form TrueSkill for a single head-to-head game

use super::match_quality::two_team_match_quality;
use super::two_team::rate_two_teams;
use crate::config::GameInfo;
use crate::error::Result;
use crate::rating::calculator::collect_rating_changes;
use crate::rating::{CountRange, RatingCalculationResult, SkillCalculator, SkillCalculatorOption};
use crate::types::Team;

#[derive(Debug, Clone)]
pub struct TwoPlayerTrueSkillCalculator {
    game_info: GameInfo,
}

impl TwoPlayerTrueSkillCalculator {
    pub fn new(game_info: GameInfo) -> Result<Self> {
        game_info.validate()?;
        Ok(Self { game_info })
    }
}

impl SkillCalculator for TwoPlayerTrueSkillCalculator {
    fn name(&self) -> &'static str {
        "two_player"
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
        CountRange::exactly(1)
    }

    fn calculate_new_ratings(
        &self,
        teams: &[Team],
        ranks: &[u32],
    ) -> Result<RatingCalculationResult> {
        self.validate(teams, Some(ranks))?;
        // a team of one reduces to the head-to-head formula
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
