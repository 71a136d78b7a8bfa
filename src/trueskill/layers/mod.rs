//! Layers of the TrueSkill factor graph, in construction order

pub mod comparison;
pub mod iterated_inner;
pub mod performances_to_team;
pub mod prior_to_skills;
pub mod skills_to_performances;
pub mod team_differences;

pub use comparison::TeamDifferencesComparisonLayer;
pub use iterated_inner::IteratedTeamDifferencesInnerLayer;
pub use performances_to_team::PlayerPerformancesToTeamPerformancesLayer;
pub use prior_to_skills::PlayerPriorValuesToSkillsLayer;
pub use skills_to_performances::PlayerSkillsToPerformancesLayer;
pub use team_differences::TeamPerformancesToTeamPerformanceDifferencesLayer;
