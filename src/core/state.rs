//! The ten states of the transaction protocol.
//!
//! States are immutable values describing the machine's current position in
//! the protocol. All methods here are pure; the side effects a state
//! performs on entry live in the machine shell.

use serde::{Deserialize, Serialize};

/// Position of an ATM in its transaction protocol.
///
/// Exactly one state is active at any time. The set is closed: every
/// transition the machine can make is enumerated in
/// [`transition`](crate::core::transition).
///
/// # Example
///
/// ```rust
/// use cashpoint::core::AtmState;
///
/// assert_eq!(AtmState::Idle.name(), "Idle");
/// assert!(!AtmState::Idle.is_final());
/// assert!(AtmState::OutOfOrder.is_final());
/// assert!(AtmState::EjectingCard.clears_session_on_entry());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum AtmState {
    /// Powered on but not yet started; reacts only to `Initialized`.
    Initializing,
    /// Waiting for a customer to insert a card.
    Idle,
    /// Reading the inserted card and verifying it with the bank.
    ReadingCard,
    /// Waiting for the customer to enter a PIN.
    ReadingPin,
    /// Waiting for the customer to pick an account.
    SelectingAccount,
    /// Waiting for the customer to pick a transaction.
    ChoosingTransaction,
    /// Executing the chosen transaction.
    PerformingTransaction,
    /// Returning the card; waits for the customer to take it.
    EjectingCard,
    /// Dispensable cash exhausted; paused until refilled.
    OutOfCash,
    /// Hardware or system failure; requires service intervention.
    OutOfOrder,
}

impl AtmState {
    /// The state's name for display and history records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initializing => "Initializing",
            Self::Idle => "Idle",
            Self::ReadingCard => "ReadingCard",
            Self::ReadingPin => "ReadingPin",
            Self::SelectingAccount => "SelectingAccount",
            Self::ChoosingTransaction => "ChoosingTransaction",
            Self::PerformingTransaction => "PerformingTransaction",
            Self::EjectingCard => "EjectingCard",
            Self::OutOfCash => "OutOfCash",
            Self::OutOfOrder => "OutOfOrder",
        }
    }

    /// Check if this is a terminal state.
    ///
    /// Only `OutOfOrder` is terminal: the protocol models no way back into
    /// service without out-of-band intervention.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::OutOfOrder)
    }

    /// Check if this state represents a failure condition.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::OutOfOrder)
    }

    /// States whose entry wipes the session context.
    ///
    /// These are the "no customer present" states: no stale card, PIN, or
    /// account session may survive into them.
    pub fn clears_session_on_entry(&self) -> bool {
        matches!(self, Self::EjectingCard | Self::OutOfCash | Self::OutOfOrder)
    }

    /// States in which a customer's transaction is in progress.
    pub fn customer_present(&self) -> bool {
        matches!(
            self,
            Self::ReadingCard
                | Self::ReadingPin
                | Self::SelectingAccount
                | Self::ChoosingTransaction
                | Self::PerformingTransaction
                | Self::EjectingCard
        )
    }
}
