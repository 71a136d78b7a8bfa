//! Cross-checks against the `skillratings` TrueSkill implementation
//!
//! The two implementations differ in small numerical details (draw margin
//! approximation, where the dynamics factor is applied), so comparisons use
//! relative tolerances on the rating change rather than exact posteriors.

use skillratings::trueskill::{
    match_quality, trueskill, trueskill_two_teams, TrueSkillConfig, TrueSkillRating,
};
use skillratings::Outcomes;
use trueskill_graph::config::{EngineSettings, GameInfo};
use trueskill_graph::types::{Player, Rating, Team};
use trueskill_graph::{FactorGraphTrueSkillCalculator, SkillCalculator};

fn reference_config() -> TrueSkillConfig {
    let game_info = GameInfo::default();
    TrueSkillConfig {
        draw_probability: game_info.draw_probability,
        beta: game_info.beta,
        default_dynamics: game_info.dynamics_factor,
    }
}

fn calculator() -> FactorGraphTrueSkillCalculator {
    FactorGraphTrueSkillCalculator::new(GameInfo::default(), EngineSettings::default()).unwrap()
}

fn team_of(ratings: &[(&str, TrueSkillRating)]) -> Team {
    ratings.iter().fold(Team::new(), |team, (id, rating)| {
        team.with_player(Player::new(*id), Rating::from(*rating))
    })
}

fn assert_close_change(ours: f64, theirs: f64, label: &str) {
    let tolerance = 0.05 * theirs.abs().max(1.0);
    assert!(
        (ours - theirs).abs() <= tolerance,
        "{label}: change {ours} differs from reference {theirs}"
    );
}

#[test]
fn test_head_to_head_matches_reference() {
    let cases = [
        (TrueSkillRating::new(), TrueSkillRating::new()),
        (
            TrueSkillRating {
                rating: 30.0,
                uncertainty: 5.0,
            },
            TrueSkillRating {
                rating: 20.0,
                uncertainty: 7.0,
            },
        ),
        (
            TrueSkillRating {
                rating: 18.0,
                uncertainty: 3.0,
            },
            TrueSkillRating {
                rating: 32.0,
                uncertainty: 6.0,
            },
        ),
    ];

    for (one, two) in cases {
        let (ref_one, ref_two) = trueskill(&one, &two, &Outcomes::WIN, &reference_config());

        let teams = vec![team_of(&[("one", one)]), team_of(&[("two", two)])];
        let result = calculator().calculate_new_ratings(&teams, &[1, 2]).unwrap();
        let new_one = result.new_rating("one").unwrap();
        let new_two = result.new_rating("two").unwrap();

        assert_close_change(new_one.mean - one.rating, ref_one.rating - one.rating, "winner");
        assert_close_change(new_two.mean - two.rating, ref_two.rating - two.rating, "loser");
        assert!((new_one.standard_deviation - ref_one.uncertainty).abs() < 0.1);
        assert!((new_two.standard_deviation - ref_two.uncertainty).abs() < 0.1);
    }
}

#[test]
fn test_draw_direction_matches_reference() {
    let one = TrueSkillRating {
        rating: 35.0,
        uncertainty: 4.0,
    };
    let two = TrueSkillRating {
        rating: 25.0,
        uncertainty: 6.0,
    };
    let (ref_one, ref_two) = trueskill(&one, &two, &Outcomes::DRAW, &reference_config());

    let teams = vec![team_of(&[("one", one)]), team_of(&[("two", two)])];
    let result = calculator().calculate_new_ratings(&teams, &[1, 1]).unwrap();
    let new_one = result.new_rating("one").unwrap();
    let new_two = result.new_rating("two").unwrap();

    // a draw pulls the favourite down and the underdog up
    assert!(new_one.mean < one.rating && ref_one.rating < one.rating);
    assert!(new_two.mean > two.rating && ref_two.rating > two.rating);
    assert_close_change(new_one.mean - one.rating, ref_one.rating - one.rating, "favourite");
    assert_close_change(new_two.mean - two.rating, ref_two.rating - two.rating, "underdog");
}

#[test]
fn test_two_teams_match_reference() {
    let team_one = [
        TrueSkillRating {
            rating: 28.0,
            uncertainty: 6.0,
        },
        TrueSkillRating {
            rating: 24.0,
            uncertainty: 7.5,
        },
    ];
    let team_two = [
        TrueSkillRating {
            rating: 26.0,
            uncertainty: 5.0,
        },
        TrueSkillRating {
            rating: 27.0,
            uncertainty: 8.0,
        },
    ];
    let (ref_one, ref_two) =
        trueskill_two_teams(&team_one, &team_two, &Outcomes::LOSS, &reference_config());

    let teams = vec![
        team_of(&[("a", team_one[0]), ("b", team_one[1])]),
        team_of(&[("c", team_two[0]), ("d", team_two[1])]),
    ];
    let result = calculator().calculate_new_ratings(&teams, &[2, 1]).unwrap();

    let ours: Vec<f64> = ["a", "b", "c", "d"]
        .iter()
        .map(|id| result.new_rating(id).unwrap().mean)
        .collect();
    let priors: Vec<f64> = team_one.iter().chain(&team_two).map(|r| r.rating).collect();
    let theirs: Vec<f64> = ref_one.iter().chain(&ref_two).map(|r| r.rating).collect();

    for i in 0..4 {
        assert_close_change(ours[i] - priors[i], theirs[i] - priors[i], "team member");
    }
}

#[test]
fn test_match_quality_matches_reference() {
    let one = TrueSkillRating::new();
    let two = TrueSkillRating {
        rating: 30.0,
        uncertainty: 4.0,
    };
    let expected = match_quality(&one, &two, &reference_config());

    let teams = vec![team_of(&[("one", one)]), team_of(&[("two", two)])];
    let quality = calculator().calculate_match_quality(&teams).unwrap();
    assert!((quality - expected).abs() < 1e-3, "{quality} vs {expected}");
}

#[test]
fn test_rating_conversion_round_trip() {
    let reference = TrueSkillRating {
        rating: 31.5,
        uncertainty: 2.25,
    };
    let rating = Rating::from(reference);
    assert_eq!(rating.mean, 31.5);
    assert_eq!(rating.standard_deviation, 2.25);

    let back = TrueSkillRating::from(rating);
    assert_eq!(back.rating, reference.rating);
    assert_eq!(back.uncertainty, reference.uncertainty);
}
