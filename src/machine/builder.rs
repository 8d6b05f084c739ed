//! Builder for wiring a machine to its peripherals.

use crate::checkpoint::{Checkpoint, MachineMetadata, CHECKPOINT_VERSION};
use crate::core::{AtmState, StateHistory};
use crate::machine::peripherals::{BankServer, CardReader, CashBin};
use crate::machine::{AtmMachine, StateObserver};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when building a machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Bank server not specified. Call .bank_server(server) before .build()")]
    MissingBankServer,

    #[error("Card reader not specified. Call .card_reader(reader) before .build()")]
    MissingCardReader,

    #[error("Cash bin not specified. Call .cash_bin(bin) before .build()")]
    MissingCashBin,

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedCheckpointVersion { found: u32, supported: u32 },

    #[error("Cannot resume from a checkpoint taken in '{state}': a customer session does not survive a restart")]
    MidSessionCheckpoint { state: &'static str },
}

/// Builder for [`AtmMachine`] with a fluent API.
///
/// The three peripherals are required; the observer defaults to a no-op
/// and is fixed for the life of the machine. `resume_from` restores the
/// state tag, history, and metadata of an earlier checkpoint.
///
/// # Example
///
/// ```rust,ignore
/// let atm = AtmMachineBuilder::new()
///     .bank_server(bank)
///     .card_reader(reader)
///     .cash_bin(bin)
///     .build()?;
/// ```
pub struct AtmMachineBuilder {
    bank_server: Option<Arc<dyn BankServer>>,
    card_reader: Option<Arc<dyn CardReader>>,
    cash_bin: Option<Arc<dyn CashBin>>,
    observer: Option<StateObserver>,
    resume: Option<Checkpoint>,
}

impl AtmMachineBuilder {
    pub fn new() -> Self {
        Self {
            bank_server: None,
            card_reader: None,
            cash_bin: None,
            observer: None,
            resume: None,
        }
    }

    /// Set the bank backend (required).
    pub fn bank_server(mut self, server: Arc<dyn BankServer>) -> Self {
        self.bank_server = Some(server);
        self
    }

    /// Set the card reader (required).
    pub fn card_reader(mut self, reader: Arc<dyn CardReader>) -> Self {
        self.card_reader = Some(reader);
        self
    }

    /// Set the cash bin (required).
    pub fn cash_bin(mut self, bin: Arc<dyn CashBin>) -> Self {
        self.cash_bin = Some(bin);
        self
    }

    /// Install the state observer. Set once here; there is no way to
    /// replace it on a running machine.
    pub fn observer(mut self, observer: StateObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Resume from a checkpoint instead of starting in `Initializing`.
    ///
    /// Only checkpoints taken with no customer present can be resumed;
    /// `build` rejects mid-session snapshots.
    pub fn resume_from(mut self, checkpoint: Checkpoint) -> Self {
        self.resume = Some(checkpoint);
        self
    }

    /// Build the machine.
    pub fn build(self) -> Result<AtmMachine, BuildError> {
        let bank_server = self.bank_server.ok_or(BuildError::MissingBankServer)?;
        let card_reader = self.card_reader.ok_or(BuildError::MissingCardReader)?;
        let cash_bin = self.cash_bin.ok_or(BuildError::MissingCashBin)?;
        let observer = self.observer.unwrap_or_else(|| Box::new(|_| {}));

        let (current, history, metadata) = match self.resume {
            Some(checkpoint) => {
                if checkpoint.version != CHECKPOINT_VERSION {
                    return Err(BuildError::UnsupportedCheckpointVersion {
                        found: checkpoint.version,
                        supported: CHECKPOINT_VERSION,
                    });
                }
                if checkpoint.current_state.customer_present() {
                    return Err(BuildError::MidSessionCheckpoint {
                        state: checkpoint.current_state.name(),
                    });
                }
                (
                    checkpoint.current_state,
                    checkpoint.history,
                    checkpoint.metadata,
                )
            }
            None => (
                AtmState::Initializing,
                StateHistory::new(),
                MachineMetadata::default(),
            ),
        };

        Ok(AtmMachine::from_parts(
            current,
            bank_server,
            card_reader,
            cash_bin,
            observer,
            history,
            metadata,
        ))
    }
}

impl Default for AtmMachineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OperationResult;
    use crate::machine::session::{AccountSession, AccountType, CashCard, PinNumber, Transaction};
    use chrono::Utc;

    struct DeadReader;

    impl CardReader for DeadReader {
        fn read_card(&self) -> (CashCard, OperationResult) {
            (CashCard::default(), OperationResult::ok())
        }

        fn has_card(&self) -> bool {
            false
        }

        fn eject_card(&self) -> OperationResult {
            OperationResult::ok()
        }
    }

    struct DeadBank;

    impl BankServer for DeadBank {
        fn verify_card(&self, _card: &CashCard) -> OperationResult {
            OperationResult::ok()
        }

        fn verify_pin_number(&self, _card: &CashCard, _pin: &PinNumber) -> OperationResult {
            OperationResult::ok()
        }

        fn select_account(
            &self,
            _card: &CashCard,
            _pin: &PinNumber,
            account: AccountType,
        ) -> (AccountSession, OperationResult) {
            (AccountSession::open(account), OperationResult::ok())
        }

        fn execute_transaction(
            &self,
            _session: &AccountSession,
            _transaction: &Transaction,
        ) -> OperationResult {
            OperationResult::ok()
        }
    }

    struct DeadBin;

    impl CashBin for DeadBin {
        fn dispense(&self, _amount: u64) -> OperationResult {
            OperationResult::ok()
        }

        fn accept(&self, _amount: u64) -> OperationResult {
            OperationResult::ok()
        }

        fn refill(&self, _amount: u64) -> OperationResult {
            OperationResult::ok()
        }
    }

    fn checkpoint_in(state: AtmState) -> Checkpoint {
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: "test".to_string(),
            timestamp: Utc::now(),
            initial_state: AtmState::Initializing,
            current_state: state,
            history: StateHistory::new(),
            metadata: MachineMetadata::default(),
        }
    }

    #[test]
    fn builder_validates_required_peripherals() {
        let result = AtmMachineBuilder::new().build();
        assert!(matches!(result, Err(BuildError::MissingBankServer)));

        let result = AtmMachineBuilder::new()
            .bank_server(Arc::new(DeadBank))
            .build();
        assert!(matches!(result, Err(BuildError::MissingCardReader)));

        let result = AtmMachineBuilder::new()
            .bank_server(Arc::new(DeadBank))
            .card_reader(Arc::new(DeadReader))
            .build();
        assert!(matches!(result, Err(BuildError::MissingCashBin)));
    }

    #[test]
    fn fresh_machine_starts_in_initializing() {
        let atm = AtmMachineBuilder::new()
            .bank_server(Arc::new(DeadBank))
            .card_reader(Arc::new(DeadReader))
            .cash_bin(Arc::new(DeadBin))
            .build()
            .unwrap();
        assert_eq!(atm.current_state(), AtmState::Initializing);
        assert!(atm.history().transitions().is_empty());
    }

    #[test]
    fn resume_restores_state_and_history() {
        let atm = AtmMachineBuilder::new()
            .bank_server(Arc::new(DeadBank))
            .card_reader(Arc::new(DeadReader))
            .cash_bin(Arc::new(DeadBin))
            .resume_from(checkpoint_in(AtmState::OutOfCash))
            .build()
            .unwrap();
        assert_eq!(atm.current_state(), AtmState::OutOfCash);
    }

    #[test]
    fn resume_rejects_mid_session_checkpoints() {
        let result = AtmMachineBuilder::new()
            .bank_server(Arc::new(DeadBank))
            .card_reader(Arc::new(DeadReader))
            .cash_bin(Arc::new(DeadBin))
            .resume_from(checkpoint_in(AtmState::ReadingPin))
            .build();
        assert!(matches!(
            result,
            Err(BuildError::MidSessionCheckpoint {
                state: "ReadingPin"
            })
        ));
    }

    #[test]
    fn resume_rejects_unknown_versions() {
        let mut checkpoint = checkpoint_in(AtmState::Idle);
        checkpoint.version = 99;
        let result = AtmMachineBuilder::new()
            .bank_server(Arc::new(DeadBank))
            .card_reader(Arc::new(DeadReader))
            .cash_bin(Arc::new(DeadBin))
            .resume_from(checkpoint)
            .build();
        assert!(matches!(
            result,
            Err(BuildError::UnsupportedCheckpointVersion { found: 99, .. })
        ));
    }
}
