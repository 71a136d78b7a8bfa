//! Partial-play weighting

use crate::types::{Player, PlayerId, Team};
use tracing::warn;

/// Smallest weight a player can contribute to their team's performance
pub const MINIMUM_PARTIAL_PLAY: f64 = 1e-4;

/// Weight of `player` in their team's performance sum, never exactly zero
pub fn partial_play_weight(player: &Player) -> f64 {
    player.partial_play.max(MINIMUM_PARTIAL_PLAY)
}

/// Warn once for each player whose partial play is below the minimum,
/// returning their ids in input order
pub fn warn_clamped_partial_play(teams: &[Team]) -> Vec<&PlayerId> {
    teams
        .iter()
        .flat_map(|team| team.iter())
        .filter(|member| member.player.partial_play < MINIMUM_PARTIAL_PLAY)
        .map(|member| {
            warn!(
                player_id = %member.player.id,
                partial_play = member.player.partial_play,
                "Partial play below minimum, clamping to {}",
                MINIMUM_PARTIAL_PLAY
            );
            &member.player.id
        })
        .collect()
}
