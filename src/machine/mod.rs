//! The machine shell around the pure core.
//!
//! [`AtmMachine`] owns the single active state, the session context, and
//! the peripheral handles, and drives every transition through the pure
//! table in [`crate::core`]. Side effects happen in exactly two places:
//! state entry (card reading, session cleanup, card ejection) and the
//! customer operations that wrap bank calls.

pub mod builder;
pub mod peripherals;
pub mod session;

pub use builder::{AtmMachineBuilder, BuildError};

use crate::checkpoint::{Checkpoint, MachineMetadata, CHECKPOINT_VERSION};
use crate::core::{
    transition, AtmEvent, AtmState, ErrorCode, Guard, OperationResult, StateHistory,
    StateTransition,
};
use crate::machine::peripherals::{BankServer, CardReader, CashBin};
use crate::machine::session::{AccountType, PinNumber, SessionContext, Transaction};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;
use uuid::Uuid;

/// Callback invoked once per completed transition, after entry effects.
pub type StateObserver = Box<dyn Fn(AtmState) + Send + Sync>;

/// One automated teller machine instance.
///
/// Construct it with [`AtmMachineBuilder`], then call [`initialize`] to
/// bring it into service. External actors deliver events with
/// [`dispatch`]; customer input arrives through the guarded operations
/// ([`enter_pin`], [`select_account`], [`execute_transaction`]).
///
/// The machine is single-threaded by design: dispatch is synchronous and
/// never concurrent, and callers must serialize event injection.
///
/// [`initialize`]: AtmMachine::initialize
/// [`dispatch`]: AtmMachine::dispatch
/// [`enter_pin`]: AtmMachine::enter_pin
/// [`select_account`]: AtmMachine::select_account
/// [`execute_transaction`]: AtmMachine::execute_transaction
pub struct AtmMachine {
    current: AtmState,
    initial: AtmState,
    session: SessionContext,
    bank_server: Arc<dyn BankServer>,
    card_reader: Arc<dyn CardReader>,
    cash_bin: Arc<dyn CashBin>,
    observer: StateObserver,
    history: StateHistory,
    metadata: MachineMetadata,
    pending: VecDeque<AtmEvent>,
}

impl AtmMachine {
    pub(crate) fn from_parts(
        current: AtmState,
        bank_server: Arc<dyn BankServer>,
        card_reader: Arc<dyn CardReader>,
        cash_bin: Arc<dyn CashBin>,
        observer: StateObserver,
        history: StateHistory,
        metadata: MachineMetadata,
    ) -> Self {
        Self {
            current,
            initial: current,
            session: SessionContext::default(),
            bank_server,
            card_reader,
            cash_bin,
            observer,
            history,
            metadata,
            pending: VecDeque::new(),
        }
    }

    /// Bring the machine into service.
    ///
    /// Legal only while `Initializing`; dispatches `Initialized`, which is
    /// the sole transition out of the initial state.
    pub fn initialize(&mut self) -> OperationResult {
        if !Guard::in_state(AtmState::Initializing).check(&self.current) {
            return self.reject("initialization");
        }
        self.dispatch(AtmEvent::Initialized);
        OperationResult::ok()
    }

    /// Deliver an event to the active state.
    ///
    /// Events the active state declares no reaction for are ignored. Entry
    /// effects enqueue follow-up events instead of recursing, so a chained
    /// sequence of transitions (card read, card verification) completes
    /// before this call returns.
    pub fn dispatch(&mut self, event: AtmEvent) {
        self.pending.push_back(event);
        while let Some(event) = self.pending.pop_front() {
            if let Some(next) = transition(&self.current, &event) {
                self.transit(next, event);
            }
        }
    }

    /// The active state's tag.
    pub fn current_state(&self) -> AtmState {
        self.current
    }

    /// Read-only view of the in-progress session.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Every transition completed so far.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Verify the customer's PIN against the held card.
    ///
    /// Legal only while `ReadingPin`; elsewhere the call is rejected
    /// without touching the bank. Returns the bank's raw result so the
    /// application can show feedback without inspecting machine state.
    pub fn enter_pin(&mut self, pin: PinNumber) -> OperationResult {
        if !Guard::in_state(AtmState::ReadingPin).check(&self.current) {
            return self.reject("PIN entry");
        }
        let result = self.bank_server.verify_pin_number(self.session.card(), &pin);
        if result.succeeded() {
            self.session.set_pin(pin);
            self.dispatch(AtmEvent::PinVerified);
        } else {
            self.dispatch(AtmEvent::ErrorOccurred(result.clone()));
        }
        result
    }

    /// Open a bank session for one of the card's accounts.
    ///
    /// Legal only while `SelectingAccount`.
    pub fn select_account(&mut self, account: AccountType) -> OperationResult {
        if !Guard::in_state(AtmState::SelectingAccount).check(&self.current) {
            return self.reject("account selection");
        }
        let (session, result) =
            self.bank_server
                .select_account(self.session.card(), self.session.pin(), account);
        if result.succeeded() {
            self.session.set_account(session);
            self.dispatch(AtmEvent::AccountSelected);
        } else {
            self.dispatch(AtmEvent::ErrorOccurred(result.clone()));
        }
        result
    }

    /// Execute a transaction against the open account session.
    ///
    /// Legal only while `PerformingTransaction`. Withdrawals additionally
    /// dispense from the cash bin and deposits feed it; an `OutOfCash`
    /// dispense result pauses the machine until refilled. On success the
    /// machine returns to `ChoosingTransaction` when `another` is set,
    /// otherwise it ejects the card.
    pub fn execute_transaction(
        &mut self,
        transaction: &Transaction,
        another: bool,
    ) -> OperationResult {
        if !Guard::in_state(AtmState::PerformingTransaction).check(&self.current) {
            return self.reject("transaction execution");
        }
        let result = self
            .bank_server
            .execute_transaction(self.session.account(), transaction);
        if !result.succeeded() {
            self.dispatch(AtmEvent::ErrorOccurred(result.clone()));
            return result;
        }
        let moved = match transaction {
            Transaction::Withdrawal { amount } => self.cash_bin.dispense(*amount),
            Transaction::Deposit { amount } => self.cash_bin.accept(*amount),
            Transaction::BalanceInquiry => OperationResult::ok(),
        };
        if !moved.succeeded() {
            self.dispatch(AtmEvent::ErrorOccurred(moved.clone()));
            return moved;
        }
        if another {
            self.dispatch(AtmEvent::TransactionContinued);
        } else {
            self.dispatch(AtmEvent::TransactionFinished);
        }
        result
    }

    /// Load the cash bin and resume service.
    ///
    /// Legal only while `OutOfCash`; dispatches `CashRefilled` when the
    /// bin accepts the load.
    pub fn refill_cash(&mut self, amount: u64) -> OperationResult {
        if !Guard::in_state(AtmState::OutOfCash).check(&self.current) {
            return self.reject("cash refill");
        }
        let result = self.cash_bin.refill(amount);
        if result.succeeded() {
            self.dispatch(AtmEvent::CashRefilled);
        } else {
            self.dispatch(AtmEvent::ErrorOccurred(result.clone()));
        }
        result
    }

    /// Snapshot the machine for persistence.
    ///
    /// The snapshot carries the state tag, history, and metadata; session
    /// data (card, PIN, account) is never included.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            initial_state: self.initial,
            current_state: self.current,
            history: self.history.clone(),
            metadata: self.metadata.clone(),
        }
    }

    fn transit(&mut self, next: AtmState, trigger: AtmEvent) {
        let from = std::mem::replace(&mut self.current, next);
        if let Some(follow_up) = self.on_enter(next) {
            self.pending.push_back(follow_up);
        }
        self.history = self.history.record(StateTransition {
            from,
            to: next,
            trigger,
            timestamp: Utc::now(),
        });
        self.metadata.updated_at = Utc::now();
        if from == AtmState::EjectingCard && next == AtmState::Idle {
            self.metadata.customers_served += 1;
        }
        (self.observer)(next);
    }

    /// The new state's entry side effect, run after the active state is
    /// replaced and before the observer fires.
    fn on_enter(&mut self, state: AtmState) -> Option<AtmEvent> {
        match state {
            AtmState::ReadingCard => {
                let (card, read) = self.card_reader.read_card();
                if !read.succeeded() {
                    return Some(AtmEvent::ErrorOccurred(read));
                }
                let verified = self.bank_server.verify_card(&card);
                if !verified.succeeded() {
                    return Some(AtmEvent::ErrorOccurred(verified));
                }
                self.session.set_card(card);
                Some(AtmEvent::CardVerified)
            }
            AtmState::EjectingCard | AtmState::OutOfCash | AtmState::OutOfOrder => {
                self.session.clear();
                if self.card_reader.has_card() {
                    // Eject failures have no modeled reaction here.
                    let _ = self.card_reader.eject_card();
                }
                None
            }
            _ => None,
        }
    }

    fn reject(&self, operation: &str) -> OperationResult {
        OperationResult::recoverable(
            ErrorCode::TransactionRejected,
            format!(
                "{operation} is not available while {}",
                self.current.name()
            ),
        )
    }
}
