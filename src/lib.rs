//! Cashpoint: the transaction state machine core of an automated teller
//! machine.
//!
//! The machine sequences a physical transaction — card insertion,
//! authentication, account selection, transaction, card ejection — as a
//! strict finite-state machine over ten states, driven by discrete events.
//! The pure core ([`core`]) holds the closed state and event sets and the
//! complete transition table as a pure function; the imperative shell
//! ([`machine`]) owns the single active state, the session context, and
//! the three peripherals (bank server, card reader, cash bin) it drives
//! through traits.
//!
//! # Error routing
//!
//! Peripheral failures are never raised as errors across the core
//! boundary. Every call produces an [`OperationResult`]; failures become
//! `ErrorOccurred` events and branch in the transition table: fatal
//! failures force the terminal `OutOfOrder` state, recoverable failures
//! abort the current transaction through `EjectingCard`, and an
//! `OutOfCash` result during a transaction pauses the machine until an
//! operator refills it.
//!
//! # Example
//!
//! ```rust
//! use cashpoint::machine::peripherals::{BankServer, CardReader, CashBin};
//! use cashpoint::machine::session::{
//!     AccountSession, AccountType, CashCard, PinNumber, Transaction,
//! };
//! use cashpoint::{AtmEvent, AtmMachineBuilder, AtmState, OperationResult};
//! use std::sync::Arc;
//!
//! struct Reader;
//! impl CardReader for Reader {
//!     fn read_card(&self) -> (CashCard, OperationResult) {
//!         (CashCard::new("4556-1234"), OperationResult::ok())
//!     }
//!     fn has_card(&self) -> bool {
//!         true
//!     }
//!     fn eject_card(&self) -> OperationResult {
//!         OperationResult::ok()
//!     }
//! }
//!
//! struct Bank;
//! impl BankServer for Bank {
//!     fn verify_card(&self, _card: &CashCard) -> OperationResult {
//!         OperationResult::ok()
//!     }
//!     fn verify_pin_number(&self, _card: &CashCard, _pin: &PinNumber) -> OperationResult {
//!         OperationResult::ok()
//!     }
//!     fn select_account(
//!         &self,
//!         _card: &CashCard,
//!         _pin: &PinNumber,
//!         account: AccountType,
//!     ) -> (AccountSession, OperationResult) {
//!         (AccountSession::open(account), OperationResult::ok())
//!     }
//!     fn execute_transaction(
//!         &self,
//!         _session: &AccountSession,
//!         _transaction: &Transaction,
//!     ) -> OperationResult {
//!         OperationResult::ok()
//!     }
//! }
//!
//! struct Bin;
//! impl CashBin for Bin {
//!     fn dispense(&self, _amount: u64) -> OperationResult {
//!         OperationResult::ok()
//!     }
//!     fn accept(&self, _amount: u64) -> OperationResult {
//!         OperationResult::ok()
//!     }
//!     fn refill(&self, _amount: u64) -> OperationResult {
//!         OperationResult::ok()
//!     }
//! }
//!
//! let mut atm = AtmMachineBuilder::new()
//!     .bank_server(Arc::new(Bank))
//!     .card_reader(Arc::new(Reader))
//!     .cash_bin(Arc::new(Bin))
//!     .build()
//!     .unwrap();
//!
//! atm.initialize();
//! atm.dispatch(AtmEvent::CardInserted);
//! assert_eq!(atm.current_state(), AtmState::ReadingPin);
//!
//! atm.enter_pin(PinNumber::new("1234"));
//! atm.select_account(AccountType::Checking);
//! assert_eq!(atm.current_state(), AtmState::ChoosingTransaction);
//! ```

pub mod checkpoint;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use checkpoint::{Checkpoint, CheckpointError, MachineMetadata};
pub use core::{
    transition, AtmEvent, AtmState, ErrorCode, Guard, OperationResult, StateHistory,
    StateTransition,
};
pub use machine::peripherals::{BankServer, CardReader, CashBin};
pub use machine::session::{
    AccountSession, AccountType, CashCard, PinNumber, SessionContext, Transaction,
};
pub use machine::{AtmMachine, AtmMachineBuilder, BuildError, StateObserver};
