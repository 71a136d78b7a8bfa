//! Partition-function accumulator over a set of factors

use super::graph::{FactorGraph, FactorId};
use crate::error::Result;

#[derive(Debug, Clone, Default)]
pub struct FactorList {
    factors: Vec<FactorId>,
}

impl FactorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_factor(&mut self, factor: FactorId) {
        self.factors.push(factor);
    }

    pub fn extend(&mut self, factors: impl IntoIterator<Item = FactorId>) {
        self.factors.extend(factors);
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Log of the graph's partition function given the current messages.
    ///
    /// Resets every bound variable, multiplies every stored message back in,
    /// then adds each factor's own normalisation term. Messages are left
    /// untouched so repeated calls agree.
    pub fn log_normalization(&self, graph: &mut FactorGraph) -> Result<f64> {
        for &factor in &self.factors {
            graph.reset_marginals(factor)?;
        }

        let mut sum_log_z = 0.0;
        for &factor in &self.factors {
            let message_count = graph.factor(factor)?.message_count();
            for index in 0..message_count {
                sum_log_z += graph.send_message(factor, index)?;
            }
        }

        let mut sum_log_s = 0.0;
        for &factor in &self.factors {
            sum_log_s += graph.log_normalization(factor)?;
        }

        Ok(sum_log_z + sum_log_s)
    }
}
