//! Collaborator traits the machine drives.
//!
//! The machine consumes three peripherals through these traits; their
//! implementations (network clients, hardware drivers) live in the
//! surrounding application. Every call is synchronous-blocking and
//! produces exactly one [`OperationResult`]; timeout and retry policy
//! belong to the implementation, not the core.

use crate::core::OperationResult;
use crate::machine::session::{AccountSession, AccountType, CashCard, PinNumber, Transaction};

/// The physical card reader.
pub trait CardReader: Send + Sync {
    /// Read the inserted card. On failure the returned card is the empty
    /// value and the result carries the cause.
    fn read_card(&self) -> (CashCard, OperationResult);

    /// Whether a card is currently held by the reader.
    fn has_card(&self) -> bool;

    /// Push the held card out to the customer.
    fn eject_card(&self) -> OperationResult;
}

/// The bank backend.
pub trait BankServer: Send + Sync {
    /// Check that the card is known and usable.
    fn verify_card(&self, card: &CashCard) -> OperationResult;

    /// Check the PIN against the card.
    fn verify_pin_number(&self, card: &CashCard, pin: &PinNumber) -> OperationResult;

    /// Open a session for one of the card's accounts. On failure the
    /// returned session is the empty value.
    fn select_account(
        &self,
        card: &CashCard,
        pin: &PinNumber,
        account: AccountType,
    ) -> (AccountSession, OperationResult);

    /// Execute a transaction against an open session. A result with code
    /// `OutOfCash` signals that the machine cannot cover a withdrawal.
    fn execute_transaction(
        &self,
        session: &AccountSession,
        transaction: &Transaction,
    ) -> OperationResult;
}

/// The cash dispenser and deposit bin.
pub trait CashBin: Send + Sync {
    /// Dispense bills to the customer. A recoverable result with code
    /// `OutOfCash` means the bin cannot cover the amount.
    fn dispense(&self, amount: u64) -> OperationResult;

    /// Accept deposited bills.
    fn accept(&self, amount: u64) -> OperationResult;

    /// Load the bin with dispensable cash.
    fn refill(&self, amount: u64) -> OperationResult;
}
