//! Generic Gaussian message-passing factor graph
//!
//! Variables and messages live in an [`Arena`], factors in a [`FactorGraph`],
//! and a [`Schedule`] tree drives message updates over them. Nothing here is
//! TrueSkill-specific.

pub mod factor;
pub mod factor_list;
pub mod graph;
pub mod layer;
pub mod schedule;
pub mod variable;

pub use factor::{Binding, Factor};
pub use factor_list::FactorList;
pub use graph::{FactorGraph, FactorId};
pub use layer::{schedule_each, FactorGraphLayer};
pub use schedule::{Schedule, ScheduleReport, DEFAULT_MAX_LOOP_ITERATIONS};
pub use variable::{Arena, Message, MessageId, Variable, VariableId};
