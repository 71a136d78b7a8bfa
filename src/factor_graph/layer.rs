//! Shared capability of every graph layer

use super::graph::{FactorGraph, FactorId};
use super::schedule::Schedule;
use super::variable::VariableId;
use crate::error::Result;

/// A slice of the graph that consumes the previous layer's output variables
/// and exposes its own, plus the schedules that drive its factors
pub trait FactorGraphLayer: std::fmt::Debug {
    fn name(&self) -> &str;

    /// Create this layer's variables and factors from the previous layer's
    /// output groups (empty for the first layer)
    fn build_layer(&mut self, graph: &mut FactorGraph, inputs: &[Vec<VariableId>])
        -> Result<()>;

    fn output_variable_groups(&self) -> &[Vec<VariableId>];

    fn factors(&self) -> Vec<FactorId>;

    /// Steps run on the way down, before any posterior pass
    fn create_prior_schedule(&self) -> Option<Schedule> {
        None
    }

    /// Steps run on the way back up
    fn create_posterior_schedule(&self) -> Option<Schedule> {
        None
    }
}

/// Sequence that updates the same message index of every factor in turn
pub fn schedule_each(name: &str, factors: &[FactorId], index: usize) -> Option<Schedule> {
    if factors.is_empty() {
        return None;
    }

    let steps = factors
        .iter()
        .enumerate()
        .map(|(position, &factor)| {
            Schedule::step(format!("{}[{}] @ {}", name, position, index), factor, index)
        })
        .collect();

    Some(Schedule::sequence(name, steps))
}
