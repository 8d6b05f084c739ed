//! Core protocol types and logic.
//!
//! This module contains the pure core of the machine:
//! - The closed state and event sets
//! - Collaborator call outcomes
//! - The transition table as a pure function
//! - Guard predicates and immutable history tracking
//!
//! Nothing here performs a side effect; the imperative shell around it
//! lives in [`crate::machine`].

mod event;
mod guard;
mod history;
mod result;
mod state;
mod transition;

pub use event::AtmEvent;
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use result::{ErrorCode, OperationResult};
pub use state::AtmState;
pub use transition::transition;
