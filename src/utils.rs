//! Utility functions shared by the CLI and tests

use crate::error::{RatingError, Result};
use crate::types::{MatchInput, Rating};
use anyhow::Context;
use std::path::Path;

/// Calculate the absolute difference between two rating means
pub fn rating_difference(rating1: &Rating, rating2: &Rating) -> f64 {
    (rating1.mean - rating2.mean).abs()
}

/// Check if both mean and standard deviation agree within the given tolerance
pub fn ratings_within_tolerance(rating1: &Rating, rating2: &Rating, tolerance: f64) -> bool {
    rating_difference(rating1, rating2) <= tolerance
        && (rating1.standard_deviation - rating2.standard_deviation).abs() <= tolerance
}

/// Parse a match description, picking TOML or JSON from the file extension
pub fn parse_match(contents: &str, format_hint: Option<&str>) -> Result<MatchInput> {
    match format_hint {
        Some("json") => serde_json::from_str(contents).context("Failed to parse JSON match"),
        Some("toml") | None => toml::from_str(contents).context("Failed to parse TOML match"),
        Some(other) => Err(RatingError::InvalidInput {
            reason: format!("Unsupported match file format: {}", other),
        }
        .into()),
    }
}

/// Read and parse a match file
pub fn read_match_file(path: impl AsRef<Path>) -> Result<MatchInput> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read match file {}", path.display()))?;
    let extension = path.extension().and_then(|ext| ext.to_str());
    parse_match(&contents, extension)
        .with_context(|| format!("Invalid match file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_difference() {
        let a = Rating::new(30.0, 5.0);
        let b = Rating::new(25.0, 5.0);
        assert_eq!(rating_difference(&a, &b), 5.0);
        assert_eq!(rating_difference(&b, &a), 5.0);
        assert_eq!(rating_difference(&a, &a), 0.0);
    }

    #[test]
    fn test_ratings_within_tolerance() {
        let a = Rating::new(25.0, 8.0);
        assert!(ratings_within_tolerance(&a, &Rating::new(25.05, 7.95), 0.1));
        assert!(!ratings_within_tolerance(&a, &Rating::new(25.0, 7.0), 0.1));
        assert!(!ratings_within_tolerance(&a, &Rating::new(26.0, 8.0), 0.1));
    }

    #[test]
    fn test_parse_toml_match() {
        let input = parse_match(
            r#"
            ranks = [2, 1]

            [[teams]]
            [[teams.members]]
            player = { id = "alice" }
            rating = { mean = 25.0, standard_deviation = 8.0 }

            [[teams]]
            [[teams.members]]
            player = { id = "bob", partial_play = 0.5 }
            rating = { mean = 20.0, standard_deviation = 6.0 }
            "#,
            Some("toml"),
        )
        .unwrap();

        assert_eq!(input.teams.len(), 2);
        assert_eq!(input.ranks, vec![2, 1]);
        assert_eq!(input.teams[1].members[0].player.partial_play, 0.5);
        assert_eq!(input.teams[0].members[0].rating.conservative_multiplier, 3.0);
    }

    #[test]
    fn test_parse_json_match() {
        let input = parse_match(
            r#"{"teams": [{"members": [{"player": {"id": "a"},
                "rating": {"mean": 25.0, "standard_deviation": 8.0}}]}]}"#,
            Some("json"),
        )
        .unwrap();

        assert_eq!(input.teams.len(), 1);
        assert!(input.ranks.is_empty());
    }

    #[test]
    fn test_parse_unknown_format() {
        assert!(parse_match("", Some("yaml")).is_err());
    }
}
