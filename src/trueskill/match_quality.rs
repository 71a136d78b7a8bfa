//! Match quality: the probability of an all-way draw under current ratings
//!
//! Two teams without partial play have a closed form. Everything else goes
//! through the player-to-team assignment matrix `A`, where column `i` holds
//! the (partial-play weighted) players of team `i` positively and those of
//! team `i + 1` negatively.

use crate::config::GameInfo;
use crate::error::{RatingError, Result};
use crate::rating::partial_play_weight;
use crate::types::Team;
use nalgebra::{DMatrix, DVector};

/// Closed form for two teams with every player fully participating
pub fn two_team_match_quality(game_info: &GameInfo, team1: &Team, team2: &Team) -> f64 {
    let total_players = (team1.len() + team2.len()) as f64;
    let beta_squared = game_info.beta * game_info.beta;

    let team1_mean_sum: f64 = team1.iter().map(|member| member.rating.mean).sum();
    let team1_variance_sum: f64 = team1.iter().map(|member| member.rating.variance()).sum();
    let team2_mean_sum: f64 = team2.iter().map(|member| member.rating.mean).sum();
    let team2_variance_sum: f64 = team2.iter().map(|member| member.rating.variance()).sum();

    let denominator = total_players * beta_squared + team1_variance_sum + team2_variance_sum;
    let mean_difference = team1_mean_sum - team2_mean_sum;

    let sqrt_part = (total_players * beta_squared / denominator).sqrt();
    let exp_part = (-mean_difference * mean_difference / (2.0 * denominator)).exp();

    sqrt_part * exp_part
}

/// General form for any number of teams, honouring partial play
pub fn matrix_match_quality(game_info: &GameInfo, teams: &[Team]) -> Result<f64> {
    if teams.len() < 2 {
        return Err(RatingError::TeamCountOutOfRange {
            count: teams.len(),
            min: 2,
            max: usize::MAX,
        }
        .into());
    }

    let members: Vec<_> = teams.iter().flat_map(|team| team.iter()).collect();
    let total_players = members.len();

    let means = DVector::from_iterator(total_players, members.iter().map(|m| m.rating.mean));
    let skills_matrix = DMatrix::from_diagonal(&DVector::from_iterator(
        total_players,
        members.iter().map(|m| m.rating.variance()),
    ));

    let assignments = player_team_assignment_matrix(teams, total_players);
    let assignments_transpose = assignments.transpose();
    let beta_squared = game_info.beta * game_info.beta;

    let a_t_a = (&assignments_transpose * &assignments) * beta_squared;
    let a_t_s_a = &assignments_transpose * &skills_matrix * &assignments;
    let middle = &a_t_a + &a_t_s_a;

    let middle_inverse = middle.clone().try_inverse().ok_or_else(|| {
        anyhow::Error::from(RatingError::InvalidGraphState {
            message: "match quality matrix is singular".to_string(),
        })
    })?;

    let start = means.transpose() * &assignments;
    let end = &assignments_transpose * &means;
    let exp_part = -0.5 * (start * middle_inverse * end)[(0, 0)];

    let sqrt_part = a_t_a.determinant() / middle.determinant();

    Ok(exp_part.exp() * sqrt_part.sqrt())
}

/// Players × (teams - 1) matrix linking each adjacent pair of teams
fn player_team_assignment_matrix(teams: &[Team], total_players: usize) -> DMatrix<f64> {
    let mut matrix = DMatrix::zeros(total_players, teams.len() - 1);
    let mut offset = 0;

    for (column, pair) in teams.windows(2).enumerate() {
        for member in pair[0].iter() {
            matrix[(offset, column)] = partial_play_weight(&member.player);
            offset += 1;
        }

        let mut next = offset;
        for member in pair[1].iter() {
            matrix[(next, column)] = -partial_play_weight(&member.player);
            next += 1;
        }
    }

    matrix
}

/// Closed form when it applies, matrix form otherwise
pub fn match_quality(game_info: &GameInfo, teams: &[Team]) -> Result<f64> {
    let full_participation = teams
        .iter()
        .flat_map(|team| team.iter())
        .all(|member| member.player.partial_play >= 1.0);

    if teams.len() == 2 && full_participation {
        return Ok(two_team_match_quality(game_info, &teams[0], &teams[1]));
    }

    matrix_match_quality(game_info, teams)
}
