//! Guard predicates over the active state.
//!
//! Guards are pure boolean functions used at the call boundary of the
//! machine's customer operations: an operation issued while the machine is
//! in a non-matching state is rejected before any collaborator is touched.

use crate::core::state::AtmState;

/// Pure predicate that determines whether an operation may run.
///
/// # Example
///
/// ```rust
/// use cashpoint::core::{AtmState, Guard};
///
/// let pin_entry = Guard::new(|s: &AtmState| matches!(s, AtmState::ReadingPin));
///
/// assert!(pin_entry.check(&AtmState::ReadingPin));
/// assert!(!pin_entry.check(&AtmState::Idle));
/// ```
pub struct Guard {
    predicate: Box<dyn Fn(&AtmState) -> bool + Send + Sync>,
}

impl Guard {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&AtmState) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// A guard that passes only in the given state.
    pub fn in_state(expected: AtmState) -> Self {
        Guard::new(move |state| *state == expected)
    }

    /// Check if the guard allows the operation in this state.
    pub fn check(&self, state: &AtmState) -> bool {
        (self.predicate)(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_allows_matching_states() {
        let guard = Guard::in_state(AtmState::SelectingAccount);
        assert!(guard.check(&AtmState::SelectingAccount));
        assert!(!guard.check(&AtmState::ChoosingTransaction));
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::new(|s: &AtmState| !s.is_final());
        assert_eq!(guard.check(&AtmState::Idle), guard.check(&AtmState::Idle));
    }

    #[test]
    fn guard_can_use_complex_predicates() {
        let guard = Guard::new(|s: &AtmState| s.customer_present() && !s.clears_session_on_entry());
        assert!(guard.check(&AtmState::ReadingPin));
        assert!(!guard.check(&AtmState::EjectingCard));
        assert!(!guard.check(&AtmState::Idle));
    }
}
