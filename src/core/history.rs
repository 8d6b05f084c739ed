//! Transition history tracking.
//!
//! Immutable record of every completed transition, including the event
//! that triggered it. Histories are values: `record` returns a new history
//! and leaves the original untouched.

use crate::core::event::AtmEvent;
use crate::core::state::AtmState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state being transitioned from
    pub from: AtmState,
    /// The state being transitioned to
    pub to: AtmState,
    /// The event that triggered the transition
    pub trigger: AtmEvent,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of completed transitions.
///
/// # Example
///
/// ```rust
/// use cashpoint::core::{AtmEvent, AtmState, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new();
/// let history = history.record(StateTransition {
///     from: AtmState::Initializing,
///     to: AtmState::Idle,
///     trigger: AtmEvent::Initialized,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.path(), vec![AtmState::Initializing, AtmState::Idle]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StateHistory {
    transitions: Vec<StateTransition>,
}

impl StateHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// The sequence of states traversed: the first transition's source,
    /// then the target of every transition in order.
    pub fn path(&self) -> Vec<AtmState> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(first.from);
        }
        for transition in &self.transitions {
            path.push(transition.to);
        }
        path
    }

    /// Elapsed time between the first and last recorded transition, or
    /// `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// All recorded transitions in order.
    pub fn transitions(&self) -> &[StateTransition] {
        &self.transitions
    }

    /// Number of times a customer transaction ended and the machine
    /// returned to `Idle`.
    pub fn customers_served(&self) -> usize {
        self.transitions
            .iter()
            .filter(|t| t.from == AtmState::EjectingCard && t.to == AtmState::Idle)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(from: AtmState, to: AtmState, trigger: AtmEvent) -> StateTransition {
        StateTransition {
            from,
            to,
            trigger,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history = StateHistory::new();
        assert!(history.transitions().is_empty());
        assert!(history.path().is_empty());
        assert!(history.duration().is_none());
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();
        let new_history = history.record(step(
            AtmState::Initializing,
            AtmState::Idle,
            AtmEvent::Initialized,
        ));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(step(
                AtmState::Initializing,
                AtmState::Idle,
                AtmEvent::Initialized,
            ))
            .record(step(
                AtmState::Idle,
                AtmState::ReadingCard,
                AtmEvent::CardInserted,
            ));

        assert_eq!(
            history.path(),
            vec![AtmState::Initializing, AtmState::Idle, AtmState::ReadingCard]
        );
    }

    #[test]
    fn trigger_is_preserved() {
        let history = StateHistory::new().record(step(
            AtmState::Idle,
            AtmState::ReadingCard,
            AtmEvent::CardInserted,
        ));
        assert_eq!(history.transitions()[0].trigger, AtmEvent::CardInserted);
    }

    #[test]
    fn customers_served_counts_returns_to_idle() {
        let history = StateHistory::new()
            .record(step(
                AtmState::EjectingCard,
                AtmState::Idle,
                AtmEvent::CardPulledOut,
            ))
            .record(step(
                AtmState::Idle,
                AtmState::ReadingCard,
                AtmEvent::CardInserted,
            ))
            .record(step(
                AtmState::EjectingCard,
                AtmState::Idle,
                AtmEvent::CardPulledOut,
            ));
        assert_eq!(history.customers_served(), 2);
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let later = start + chrono::Duration::milliseconds(25);

        let history = StateHistory::new()
            .record(StateTransition {
                from: AtmState::Initializing,
                to: AtmState::Idle,
                trigger: AtmEvent::Initialized,
                timestamp: start,
            })
            .record(StateTransition {
                from: AtmState::Idle,
                to: AtmState::ReadingCard,
                trigger: AtmEvent::CardInserted,
                timestamp: later,
            });

        assert_eq!(history.duration(), Some(Duration::from_millis(25)));
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(step(
            AtmState::Initializing,
            AtmState::Idle,
            AtmEvent::Initialized,
        ));
        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(history, deserialized);
    }
}
