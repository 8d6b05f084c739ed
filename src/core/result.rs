//! Outcome values for collaborator calls.
//!
//! Every call into a peripheral (bank server, card reader, cash bin)
//! produces exactly one [`OperationResult`]. Failures are never raised as
//! errors across the core boundary; they are carried as values and routed
//! through the transition table as `ErrorOccurred` events.

use serde::{Deserialize, Serialize};

/// Status code of a collaborator call.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The call succeeded.
    Ok,
    /// The bank refused the inserted card.
    CardDeclined,
    /// The PIN did not match the card.
    WrongPin,
    /// The bank refused to open a session for the requested account.
    AccountRejected,
    /// The bank refused the requested transaction.
    TransactionRejected,
    /// The cash bin cannot cover the requested amount.
    OutOfCash,
    /// A peripheral malfunctioned.
    DeviceFault,
}

/// Outcome of a single collaborator call.
///
/// Immutable once constructed. The `fatal` flag is independent of the code:
/// it partitions failures into those that take the whole machine out of
/// service and those that only abort the current customer's transaction.
///
/// # Example
///
/// ```rust
/// use cashpoint::core::{ErrorCode, OperationResult};
///
/// let ok = OperationResult::ok();
/// assert!(ok.succeeded());
/// assert!(!ok.is_fatal());
///
/// let declined = OperationResult::recoverable(ErrorCode::WrongPin, "PIN mismatch");
/// assert!(!declined.succeeded());
/// assert!(!declined.is_fatal());
///
/// let jammed = OperationResult::fatal(ErrorCode::DeviceFault, "dispenser jammed");
/// assert!(jammed.is_fatal());
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct OperationResult {
    code: ErrorCode,
    message: String,
    fatal: bool,
}

impl OperationResult {
    /// A successful outcome.
    pub fn ok() -> Self {
        Self {
            code: ErrorCode::Ok,
            message: String::new(),
            fatal: false,
        }
    }

    /// A failure scoped to the current transaction. The machine ejects the
    /// card and returns to service for the next customer.
    pub fn recoverable(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            fatal: false,
        }
    }

    /// A failure that puts the machine out of service.
    pub fn fatal(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            fatal: true,
        }
    }

    /// True iff the code is [`ErrorCode::Ok`].
    pub fn succeeded(&self) -> bool {
        self.code == ErrorCode::Ok
    }

    /// True for failures that force the machine out of service.
    pub fn is_fatal(&self) -> bool {
        self.fatal
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for OperationResult {
    fn default() -> Self {
        Self::ok()
    }
}
