//! Arena-backed variables and messages
//!
//! Every variable and message of a graph lives in flat storage owned by the
//! [`Arena`]; factors and schedule steps refer to them by index only.

use crate::error::{RatingError, Result};
use crate::numerics::GaussianBelief;
use crate::types::PlayerId;
use std::fmt;

/// Index of a variable in its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

/// Index of a message in its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(usize);

impl VariableId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl MessageId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

/// A latent quantity with a current belief and the prior it resets to
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    /// Player this variable belongs to, if any
    pub key: Option<PlayerId>,
    prior: GaussianBelief,
    value: GaussianBelief,
}

impl Variable {
    pub fn prior(&self) -> GaussianBelief {
        self.prior
    }

    pub fn value(&self) -> GaussianBelief {
        self.value
    }

    pub fn reset_to_prior(&mut self) {
        self.value = self.prior;
    }
}

/// The payload of one factor-to-variable edge
#[derive(Debug, Clone)]
pub struct Message {
    pub name: String,
    value: GaussianBelief,
}

impl Message {
    pub fn value(&self) -> GaussianBelief {
        self.value
    }
}

/// Flat storage for the variables and messages of one graph
#[derive(Debug, Default)]
pub struct Arena {
    variables: Vec<Variable>,
    messages: Vec<Message>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable whose prior carries no information
    pub fn add_variable(&mut self, name: impl Into<String>) -> VariableId {
        self.push_variable(name.into(), None)
    }

    /// Add an uninformative variable tagged with the player it describes
    pub fn add_keyed_variable(&mut self, name: impl Into<String>, key: PlayerId) -> VariableId {
        self.push_variable(name.into(), Some(key))
    }

    fn push_variable(&mut self, name: String, key: Option<PlayerId>) -> VariableId {
        let prior = GaussianBelief::uninformative();
        self.variables.push(Variable {
            name,
            key,
            prior,
            value: prior,
        });
        VariableId(self.variables.len() - 1)
    }

    /// Allocate a fresh zero-precision message
    pub fn add_message(&mut self, name: impl Into<String>) -> MessageId {
        self.messages.push(Message {
            name: name.into(),
            value: GaussianBelief::uninformative(),
        });
        MessageId(self.messages.len() - 1)
    }

    pub fn variable(&self, id: VariableId) -> Result<&Variable> {
        self.variables.get(id.0).ok_or_else(|| {
            RatingError::InvalidGraphState {
                message: format!("unknown variable {}", id),
            }
            .into()
        })
    }

    pub fn message(&self, id: MessageId) -> Result<&Message> {
        self.messages.get(id.0).ok_or_else(|| {
            RatingError::InvalidGraphState {
                message: format!("unknown message {}", id),
            }
            .into()
        })
    }

    /// Current belief of a variable
    pub fn value(&self, id: VariableId) -> Result<GaussianBelief> {
        Ok(self.variable(id)?.value)
    }

    /// Current value of a message
    pub fn message_value(&self, id: MessageId) -> Result<GaussianBelief> {
        Ok(self.message(id)?.value)
    }

    pub fn set_value(&mut self, id: VariableId, value: GaussianBelief) -> Result<()> {
        let variable = self.variables.get_mut(id.0).ok_or_else(|| {
            anyhow::Error::from(RatingError::InvalidGraphState {
                message: format!("unknown variable {}", id),
            })
        })?;
        variable.value = value;
        Ok(())
    }

    pub fn set_message_value(&mut self, id: MessageId, value: GaussianBelief) -> Result<()> {
        let message = self.messages.get_mut(id.0).ok_or_else(|| {
            anyhow::Error::from(RatingError::InvalidGraphState {
                message: format!("unknown message {}", id),
            })
        })?;
        message.value = value;
        Ok(())
    }

    pub fn reset_variable(&mut self, id: VariableId) -> Result<()> {
        let variable = self.variables.get_mut(id.0).ok_or_else(|| {
            anyhow::Error::from(RatingError::InvalidGraphState {
                message: format!("unknown variable {}", id),
            })
        })?;
        variable.reset_to_prior();
        Ok(())
    }

    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &Variable)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(index, variable)| (VariableId(index), variable))
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
