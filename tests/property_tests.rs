//! Property tests for Gaussian algebra and posterior invariants

mod fixtures;

use fixtures::team;
use proptest::prelude::*;
use trueskill_graph::config::{EngineSettings, GameInfo};
use trueskill_graph::numerics::{cumulative_to, inverse_cumulative_to};
use trueskill_graph::types::Team;
use trueskill_graph::{FactorGraphTrueSkillCalculator, GaussianBelief, SkillCalculator};

fn calculator() -> FactorGraphTrueSkillCalculator {
    FactorGraphTrueSkillCalculator::new(GameInfo::default(), EngineSettings::default()).unwrap()
}

fn solo_teams(ratings: &[(f64, f64)]) -> Vec<Team> {
    ratings
        .iter()
        .enumerate()
        .map(|(i, (mean, sigma))| team(&[(format!("p{}", i + 1).as_str(), *mean, *sigma)]))
        .collect()
}

proptest! {
    #[test]
    fn multiply_then_divide_restores_belief(
        mean_a in -100f64..100.0, sigma_a in 0.5f64..50.0,
        mean_b in -100f64..100.0, sigma_b in 0.5f64..50.0,
    ) {
        let a = GaussianBelief::new(mean_a, sigma_a);
        let b = GaussianBelief::new(mean_b, sigma_b);
        let restored = (a * b) / b;
        prop_assert!((restored.mean() - a.mean()).abs() < 1e-6);
        prop_assert!((restored.standard_deviation() - a.standard_deviation()).abs() < 1e-6);
    }

    #[test]
    fn product_is_more_precise_than_either_factor(
        mean_a in -100f64..100.0, sigma_a in 0.5f64..50.0,
        mean_b in -100f64..100.0, sigma_b in 0.5f64..50.0,
    ) {
        let a = GaussianBelief::new(mean_a, sigma_a);
        let b = GaussianBelief::new(mean_b, sigma_b);
        let product = a * b;
        prop_assert!(product.precision() >= a.precision());
        prop_assert!(product.precision() >= b.precision());
    }

    #[test]
    fn inverse_cdf_inverts_cdf(x in -6f64..6.0) {
        let p = cumulative_to(x);
        prop_assert!((inverse_cumulative_to(p) - x).abs() < 1e-6);
    }

    #[test]
    fn winner_gains_and_loser_drops(
        mean_a in 0f64..50.0, sigma_a in 1f64..10.0,
        mean_b in 0f64..50.0, sigma_b in 1f64..10.0,
    ) {
        let teams = solo_teams(&[(mean_a, sigma_a), (mean_b, sigma_b)]);
        let result = calculator().calculate_new_ratings(&teams, &[1, 2]).unwrap();
        let winner = result.new_rating("p1").unwrap();
        let loser = result.new_rating("p2").unwrap();
        prop_assert!(winner.mean > mean_a);
        prop_assert!(loser.mean < mean_b);
        prop_assert!(winner.standard_deviation.is_finite() && winner.standard_deviation > 0.0);
        prop_assert!(loser.standard_deviation.is_finite() && loser.standard_deviation > 0.0);
    }

    #[test]
    fn swapping_input_order_is_symmetric(
        mean_a in 0f64..50.0, sigma_a in 1f64..10.0,
        mean_b in 0f64..50.0, sigma_b in 1f64..10.0,
    ) {
        let forward = solo_teams(&[(mean_a, sigma_a), (mean_b, sigma_b)]);
        let first = calculator().calculate_new_ratings(&forward, &[1, 2]).unwrap();

        let backward = vec![forward[1].clone(), forward[0].clone()];
        let second = calculator().calculate_new_ratings(&backward, &[2, 1]).unwrap();

        for id in ["p1", "p2"] {
            let left = first.new_rating(id).unwrap();
            let right = second.new_rating(id).unwrap();
            prop_assert!((left.mean - right.mean).abs() < 1e-9);
            prop_assert!((left.standard_deviation - right.standard_deviation).abs() < 1e-9);
        }
    }

    #[test]
    fn free_for_all_preserves_finishing_order(count in 3usize..8) {
        let ratings = vec![(25.0, 25.0 / 3.0); count];
        let ranks: Vec<u32> = (1..=count as u32).collect();
        let result = calculator()
            .calculate_new_ratings(&solo_teams(&ratings), &ranks)
            .unwrap();

        let means: Vec<f64> = (1..=count)
            .map(|i| result.new_rating(&format!("p{}", i)).unwrap().mean)
            .collect();
        prop_assert!(means.windows(2).all(|pair| pair[0] > pair[1]));
        prop_assert!(result.schedule.unwrap().converged);
    }

    #[test]
    fn large_upsets_stay_finite(
        gap in 1f64..2000.0, sigma in 1f64..5.0, drawn in any::<bool>(),
    ) {
        let teams = solo_teams(&[(0.0, sigma), (gap, sigma)]);
        let ranks = if drawn { [1, 1] } else { [1, 2] };
        let result = calculator().calculate_new_ratings(&teams, &ranks).unwrap();
        for change in &result.rating_changes {
            prop_assert!(change.new_rating.mean.is_finite());
            prop_assert!(change.new_rating.standard_deviation.is_finite());
            prop_assert!(change.new_rating.standard_deviation > 0.0);
        }
        prop_assert!(result.new_rating("p1").unwrap().mean > 0.0);
        prop_assert!(result.new_rating("p2").unwrap().mean < gap);
        prop_assert!(result.match_quality >= 0.0 && result.match_quality <= 1.0);
        prop_assert!(!result.probability_of_ranking.unwrap().is_nan());
    }

    #[test]
    fn match_quality_is_a_probability(
        mean_a in 0f64..50.0, sigma_a in 1f64..10.0,
        mean_b in 0f64..50.0, sigma_b in 1f64..10.0,
        mean_c in 0f64..50.0, sigma_c in 1f64..10.0,
    ) {
        let teams = solo_teams(&[(mean_a, sigma_a), (mean_b, sigma_b), (mean_c, sigma_c)]);
        let quality = calculator().calculate_match_quality(&teams).unwrap();
        prop_assert!(quality > 0.0 && quality <= 1.0);
    }
}
