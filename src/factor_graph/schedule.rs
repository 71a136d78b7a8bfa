//! Message-passing schedules
//!
//! A schedule is an immutable tree built once per match. Visiting it performs
//! message updates depth-first, in declared order, and reports the largest
//! marginal change observed.

use super::graph::{FactorGraph, FactorId};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// Iteration cap applied when a loop is built without an explicit one
pub const DEFAULT_MAX_LOOP_ITERATIONS: usize = 1000;

/// Diagnostics gathered while running a schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Total loop body executions across every loop visited
    pub loop_iterations: usize,
    /// False if any loop stopped at its iteration cap or saw a non-finite delta
    pub converged: bool,
    /// Delta returned by the outermost visit
    pub final_delta: f64,
}

impl Default for ScheduleReport {
    fn default() -> Self {
        Self {
            loop_iterations: 0,
            converged: true,
            final_delta: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Schedule {
    /// Update one message of one factor
    Step {
        name: String,
        factor: FactorId,
        index: usize,
    },
    /// Run children in order
    Sequence {
        name: String,
        schedules: Vec<Schedule>,
    },
    /// Repeat the body until its delta drops to `max_delta`
    Loop {
        name: String,
        body: Box<Schedule>,
        max_delta: f64,
        max_iterations: usize,
    },
}

impl Schedule {
    pub fn step(name: impl Into<String>, factor: FactorId, index: usize) -> Self {
        Schedule::Step {
            name: name.into(),
            factor,
            index,
        }
    }

    pub fn sequence(name: impl Into<String>, schedules: Vec<Schedule>) -> Self {
        Schedule::Sequence {
            name: name.into(),
            schedules,
        }
    }

    pub fn repeat_until(
        name: impl Into<String>,
        body: Schedule,
        max_delta: f64,
        max_iterations: usize,
    ) -> Self {
        Schedule::Loop {
            name: name.into(),
            body: Box::new(body),
            max_delta,
            max_iterations: max_iterations.max(1),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Schedule::Step { name, .. }
            | Schedule::Sequence { name, .. }
            | Schedule::Loop { name, .. } => name,
        }
    }

    /// Execute the whole schedule once
    pub fn run(&self, graph: &mut FactorGraph) -> Result<ScheduleReport> {
        let mut report = ScheduleReport::default();
        report.final_delta = self.visit(graph, &mut report)?;
        if !report.final_delta.is_finite() && report.converged {
            report.converged = false;
            warn!(
                schedule = self.name(),
                final_delta = report.final_delta,
                "Schedule produced a non-finite delta"
            );
        }
        debug!(
            schedule = self.name(),
            loop_iterations = report.loop_iterations,
            converged = report.converged,
            final_delta = report.final_delta,
            "Schedule finished"
        );
        Ok(report)
    }

    /// Visit this node, returning the largest delta produced beneath it
    pub fn visit(&self, graph: &mut FactorGraph, report: &mut ScheduleReport) -> Result<f64> {
        match self {
            Schedule::Step {
                name,
                factor,
                index,
            } => {
                let delta = graph.update_message(*factor, *index)?;
                trace!(step = %name, delta, "Step");
                Ok(delta)
            }
            Schedule::Sequence { schedules, .. } => {
                let mut max_delta = 0.0_f64;
                for schedule in schedules {
                    max_delta = larger_delta(max_delta, schedule.visit(graph, report)?);
                }
                Ok(max_delta)
            }
            Schedule::Loop {
                name,
                body,
                max_delta,
                max_iterations,
            } => {
                let mut iterations = 1;
                let mut delta = body.visit(graph, report)?;

                while delta.is_finite() && delta > *max_delta && iterations < *max_iterations {
                    delta = body.visit(graph, report)?;
                    iterations += 1;
                }

                report.loop_iterations += iterations;

                if !delta.is_finite() {
                    report.converged = false;
                    warn!(
                        schedule = %name,
                        iterations,
                        delta,
                        "Loop produced a non-finite delta, stopping early"
                    );
                } else if delta > *max_delta {
                    report.converged = false;
                    warn!(
                        schedule = %name,
                        iterations,
                        delta,
                        threshold = *max_delta,
                        "Loop stopped at its iteration cap before converging"
                    );
                } else {
                    debug!(schedule = %name, iterations, delta, "Loop converged");
                }

                Ok(delta)
            }
        }
    }
}

/// Like `f64::max`, except that NaN on either side wins
fn larger_delta(left: f64, right: f64) -> f64 {
    if left.is_nan() || right.is_nan() {
        f64::NAN
    } else {
        left.max(right)
    }
}
