//! Owning store for one graph's arena and factors

use super::factor::Factor;
use super::variable::Arena;
use crate::error::{RatingError, Result};
use std::fmt;

/// Index of a factor in its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FactorId(usize);

impl fmt::Display for FactorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// Variables, messages and factors of a single match
#[derive(Debug, Default)]
pub struct FactorGraph {
    arena: Arena,
    factors: Vec<Box<dyn Factor>>,
}

impl FactorGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    pub fn add_factor(&mut self, factor: Box<dyn Factor>) -> FactorId {
        self.factors.push(factor);
        FactorId(self.factors.len() - 1)
    }

    pub fn factor(&self, id: FactorId) -> Result<&dyn Factor> {
        self.factors
            .get(id.0)
            .map(|factor| factor.as_ref())
            .ok_or_else(|| {
                RatingError::InvalidGraphState {
                    message: format!("unknown factor {}", id),
                }
                .into()
            })
    }

    pub fn factor_count(&self) -> usize {
        self.factors.len()
    }

    /// Run one factor's update for the message at `index`
    pub fn update_message(&mut self, id: FactorId, index: usize) -> Result<f64> {
        let factor = self.factors.get(id.0).ok_or_else(|| {
            anyhow::Error::from(RatingError::InvalidGraphState {
                message: format!("unknown factor {}", id),
            })
        })?;
        factor.update_message(&mut self.arena, index)
    }

    pub fn send_message(&mut self, id: FactorId, index: usize) -> Result<f64> {
        let factor = self.factors.get(id.0).ok_or_else(|| {
            anyhow::Error::from(RatingError::InvalidGraphState {
                message: format!("unknown factor {}", id),
            })
        })?;
        factor.send_message(&mut self.arena, index)
    }

    pub fn reset_marginals(&mut self, id: FactorId) -> Result<()> {
        let factor = self.factors.get(id.0).ok_or_else(|| {
            anyhow::Error::from(RatingError::InvalidGraphState {
                message: format!("unknown factor {}", id),
            })
        })?;
        factor.reset_marginals(&mut self.arena)
    }

    pub fn log_normalization(&self, id: FactorId) -> Result<f64> {
        self.factor(id)?.log_normalization(&self.arena)
    }
}
