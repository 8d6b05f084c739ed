//! The closed set of events the machine reacts to.

use crate::core::result::OperationResult;
use serde::{Deserialize, Serialize};

/// A discrete signal delivered to the machine.
///
/// Events are ephemeral values: created by the surrounding application or
/// by a state's entry effect, dispatched once, and discarded. They carry no
/// identity beyond their tag, except `ErrorOccurred`, which embeds the
/// failing [`OperationResult`] so the transition table can branch on
/// fatality and code.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum AtmEvent {
    /// The machine was started; legal only in `Initializing`.
    Initialized,
    /// The customer pressed cancel.
    Canceled,
    /// A collaborator call failed.
    ErrorOccurred(OperationResult),
    /// The reader sensed a card.
    CardInserted,
    /// The customer took the ejected card.
    CardPulledOut,
    /// The bank accepted the card.
    CardVerified,
    /// The bank accepted the PIN.
    PinVerified,
    /// The bank opened an account session.
    AccountSelected,
    /// The customer picked a transaction.
    TransactionChosen,
    /// The customer asked for another transaction.
    TransactionContinued,
    /// The customer is done.
    TransactionFinished,
    /// An operator refilled the cash bin.
    CashRefilled,
}

impl AtmEvent {
    /// The event's tag name for history records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialized => "Initialized",
            Self::Canceled => "Canceled",
            Self::ErrorOccurred(_) => "ErrorOccurred",
            Self::CardInserted => "CardInserted",
            Self::CardPulledOut => "CardPulledOut",
            Self::CardVerified => "CardVerified",
            Self::PinVerified => "PinVerified",
            Self::AccountSelected => "AccountSelected",
            Self::TransactionChosen => "TransactionChosen",
            Self::TransactionContinued => "TransactionContinued",
            Self::TransactionFinished => "TransactionFinished",
            Self::CashRefilled => "CashRefilled",
        }
    }
}
