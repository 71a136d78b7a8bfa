//! TrueSkill on top of the generic factor graph
//!
//! Correction functions, the five Gaussian factors, the layer stack that
//! wires them per match, and the calculators that expose it all through
//! [`SkillCalculator`](crate::rating::SkillCalculator).

pub mod correction;
pub mod draw_margin;
pub mod factor_graph_calculator;
pub mod factors;
pub mod graph;
pub mod layers;
pub mod match_quality;
pub mod two_player;
pub mod two_team;

pub use draw_margin::draw_margin_from_draw_probability;
pub use factor_graph_calculator::FactorGraphTrueSkillCalculator;
pub use graph::TrueSkillFactorGraph;
pub use match_quality::{match_quality, matrix_match_quality, two_team_match_quality};
pub use two_player::TwoPlayerTrueSkillCalculator;
pub use two_team::TwoTeamTrueSkillCalculator;
