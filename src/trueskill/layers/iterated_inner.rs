//! Team differences and their comparisons, iterated to convergence
//!
//! With two teams a single difference is updated once. With more, each
//! team's performance feeds the differences on both sides of it, so the
//! chain is swept forward then backward inside a loop until the largest
//! marginal change drops below the convergence threshold.

use super::{TeamDifferencesComparisonLayer, TeamPerformancesToTeamPerformanceDifferencesLayer};
use crate::error::Result;
use crate::factor_graph::{FactorGraph, FactorGraphLayer, FactorId, Schedule, VariableId};

#[derive(Debug)]
pub struct IteratedTeamDifferencesInnerLayer {
    differences: TeamPerformancesToTeamPerformanceDifferencesLayer,
    comparisons: TeamDifferencesComparisonLayer,
    convergence_threshold: f64,
    max_iterations: usize,
}

impl IteratedTeamDifferencesInnerLayer {
    pub fn new(
        differences: TeamPerformancesToTeamPerformanceDifferencesLayer,
        comparisons: TeamDifferencesComparisonLayer,
        convergence_threshold: f64,
        max_iterations: usize,
    ) -> Self {
        Self {
            differences,
            comparisons,
            convergence_threshold,
            max_iterations,
        }
    }

    fn two_team_inner_prior_loop_schedule(&self) -> Schedule {
        let differences = self.differences.difference_factors();
        let comparisons = self.comparisons.comparison_factors();

        Schedule::sequence(
            "send team perf to perf differences",
            vec![
                Schedule::step(
                    "send team perf to perf differences",
                    differences[0],
                    0,
                ),
                Schedule::step(
                    "send to greater than or within factor",
                    comparisons[0],
                    0,
                ),
            ],
        )
    }

    fn multiple_team_inner_prior_loop_schedule(&self) -> Schedule {
        let differences = self.differences.difference_factors();
        let comparisons = self.comparisons.comparison_factors();
        let total_team_differences = differences.len();

        let forward = (0..total_team_differences - 1)
            .map(|i| {
                Schedule::sequence(
                    format!("current forward schedule piece {}", i),
                    vec![
                        Schedule::step(
                            format!("team perf to perf diff {}", i),
                            differences[i],
                            0,
                        ),
                        Schedule::step(
                            format!("greater than or within result factor {}", i),
                            comparisons[i],
                            0,
                        ),
                        Schedule::step(
                            format!("team perf to perf diff factors [{}], 2", i),
                            differences[i],
                            2,
                        ),
                    ],
                )
            })
            .collect();

        let backward = (0..total_team_differences - 1)
            .map(|i| {
                let j = total_team_differences - 1 - i;
                Schedule::sequence(
                    format!("current backward schedule piece {}", i),
                    vec![
                        Schedule::step(
                            format!("team perf to perf diff {}", j),
                            differences[j],
                            0,
                        ),
                        Schedule::step(
                            format!("greater than or within result factor {}", j),
                            comparisons[j],
                            0,
                        ),
                        Schedule::step(
                            format!("team perf to perf diff factors [{}], 1", j),
                            differences[j],
                            1,
                        ),
                    ],
                )
            })
            .collect();

        let forward_backward = Schedule::sequence(
            "forward backward schedule to loop",
            vec![
                Schedule::sequence("forward schedule", forward),
                Schedule::sequence("backward schedule", backward),
            ],
        );

        Schedule::repeat_until(
            "loop with max delta",
            forward_backward,
            self.convergence_threshold,
            self.max_iterations,
        )
    }
}

impl FactorGraphLayer for IteratedTeamDifferencesInnerLayer {
    fn name(&self) -> &str {
        "iterated team differences"
    }

    fn build_layer(
        &mut self,
        graph: &mut FactorGraph,
        inputs: &[Vec<VariableId>],
    ) -> Result<()> {
        self.differences.build_layer(graph, inputs)?;
        let difference_groups = self.differences.output_variable_groups().to_vec();
        self.comparisons.build_layer(graph, &difference_groups)
    }

    fn output_variable_groups(&self) -> &[Vec<VariableId>] {
        &[]
    }

    fn factors(&self) -> Vec<FactorId> {
        let mut factors = self.differences.factors();
        factors.extend(self.comparisons.factors());
        factors
    }

    fn create_prior_schedule(&self) -> Option<Schedule> {
        let differences = self.differences.difference_factors();
        let total_team_differences = differences.len();

        let inner_loop = match total_team_differences {
            0 => return None,
            1 => self.two_team_inner_prior_loop_schedule(),
            _ => self.multiple_team_inner_prior_loop_schedule(),
        };

        Some(Schedule::sequence(
            "inner schedule",
            vec![
                inner_loop,
                Schedule::step(
                    "team perf to perf diff factors [0] @ 1",
                    differences[0],
                    1,
                ),
                Schedule::step(
                    format!(
                        "team perf to perf diff factors [{}] @ 2",
                        total_team_differences - 1
                    ),
                    differences[total_team_differences - 1],
                    2,
                ),
            ],
        ))
    }
}
