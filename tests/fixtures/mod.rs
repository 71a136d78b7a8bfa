//! Shared builders and assertions for integration tests

#![allow(dead_code)]

use trueskill_graph::config::GameInfo;
use trueskill_graph::types::{Player, Rating, Team};
use trueskill_graph::RatingCalculationResult;

/// Team with one player per `(id, mean, sigma)` triple
pub fn team(players: &[(&str, f64, f64)]) -> Team {
    players.iter().fold(Team::new(), |team, (id, mean, sigma)| {
        team.with_player(Player::new(*id), Rating::new(*mean, *sigma))
    })
}

/// Team of freshly registered players under the default game parameters
pub fn default_team(ids: &[&str]) -> Team {
    let rating = GameInfo::default().default_rating();
    ids.iter().fold(Team::new(), |team, id| {
        team.with_player(Player::new(*id), rating)
    })
}

/// `count` single-player teams named p1, p2, ...
pub fn solo_teams(count: usize) -> Vec<Team> {
    (1..=count)
        .map(|i| default_team(&[format!("p{}", i).as_str()]))
        .collect()
}

/// Ranks 1..=count
pub fn strict_ranks(count: usize) -> Vec<u32> {
    (1..=count as u32).collect()
}

pub fn assert_rating(
    result: &RatingCalculationResult,
    player_id: &str,
    expected_mean: f64,
    expected_sigma: f64,
    tolerance: f64,
) {
    let rating = result
        .new_rating(player_id)
        .unwrap_or_else(|| panic!("no rating for {}", player_id));
    assert!(
        (rating.mean - expected_mean).abs() <= tolerance,
        "{}: mean {} differs from expected {}",
        player_id,
        rating.mean,
        expected_mean
    );
    assert!(
        (rating.standard_deviation - expected_sigma).abs() <= tolerance,
        "{}: sigma {} differs from expected {}",
        player_id,
        rating.standard_deviation,
        expected_sigma
    );
}

pub fn assert_match_quality(result: &RatingCalculationResult, expected: f64, tolerance: f64) {
    assert!(
        (result.match_quality - expected).abs() <= tolerance,
        "match quality {} differs from expected {}",
        result.match_quality,
        expected
    );
}
