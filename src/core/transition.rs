//! The pure transition table of the transaction protocol.
//!
//! The whole protocol is expressed as one function from (state, event) to
//! an optional successor state. Error routing goes through the same table
//! as the normal path: collaborator failures arrive as `ErrorOccurred`
//! events and branch on fatality here, not in a separate error path.

use crate::core::event::AtmEvent;
use crate::core::result::ErrorCode;
use crate::core::state::AtmState;

/// Look up the successor state for `event` in `state`.
///
/// Returns `None` when the active state declares no reaction for the
/// event's tag; the machine treats that as a no-op. The function is pure
/// and total over the closed state and event sets.
///
/// Fatal results dominate: a fatal `ErrorOccurred` routes to `OutOfOrder`
/// from any reacting state, even when its code is `OutOfCash`.
///
/// # Example
///
/// ```rust
/// use cashpoint::core::{transition, AtmEvent, AtmState};
///
/// assert_eq!(
///     transition(&AtmState::Idle, &AtmEvent::CardInserted),
///     Some(AtmState::ReadingCard)
/// );
/// assert_eq!(transition(&AtmState::Idle, &AtmEvent::Canceled), None);
/// ```
pub fn transition(state: &AtmState, event: &AtmEvent) -> Option<AtmState> {
    use AtmEvent as E;
    use AtmState as S;

    match (state, event) {
        (S::Initializing, E::Initialized) => Some(S::Idle),

        (S::Idle, E::CardInserted) => Some(S::ReadingCard),
        (S::Idle, E::ErrorOccurred(r)) if r.is_fatal() => Some(S::OutOfOrder),

        // Fatal failures force OutOfOrder from every mid-transaction state.
        (
            S::ReadingCard
            | S::ReadingPin
            | S::SelectingAccount
            | S::ChoosingTransaction
            | S::PerformingTransaction,
            E::ErrorOccurred(r),
        ) if r.is_fatal() => Some(S::OutOfOrder),

        // Running out of cash pauses the machine instead of ending the
        // customer's transaction as a failure; only PerformingTransaction
        // can detect it.
        (S::PerformingTransaction, E::ErrorOccurred(r)) if r.code() == ErrorCode::OutOfCash => {
            Some(S::OutOfCash)
        }

        // Recoverable failures abort the current transaction.
        (
            S::ReadingCard
            | S::ReadingPin
            | S::SelectingAccount
            | S::ChoosingTransaction
            | S::PerformingTransaction,
            E::ErrorOccurred(_),
        ) => Some(S::EjectingCard),

        (
            S::ReadingPin | S::SelectingAccount | S::ChoosingTransaction | S::PerformingTransaction,
            E::Canceled,
        ) => Some(S::EjectingCard),

        (S::ReadingCard, E::CardVerified) => Some(S::ReadingPin),
        (S::ReadingPin, E::PinVerified) => Some(S::SelectingAccount),
        (S::SelectingAccount, E::AccountSelected) => Some(S::ChoosingTransaction),
        (S::ChoosingTransaction, E::TransactionChosen) => Some(S::PerformingTransaction),
        (S::PerformingTransaction, E::TransactionContinued) => Some(S::ChoosingTransaction),
        (S::PerformingTransaction, E::TransactionFinished) => Some(S::EjectingCard),

        (S::EjectingCard, E::CardPulledOut) => Some(S::Idle),
        (S::OutOfCash, E::CashRefilled) => Some(S::Idle),

        // OutOfOrder is terminal; everything else is ignored.
        _ => None,
    }
}
