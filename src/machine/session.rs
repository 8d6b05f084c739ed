//! The shared transaction session and its opaque value types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Card data read from the physical reader.
///
/// The default value represents "no card held".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashCard {
    number: String,
}

impl CashCard {
    pub fn new(number: impl Into<String>) -> Self {
        Self {
            number: number.into(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    /// True for the "no card held" value.
    pub fn is_empty(&self) -> bool {
        self.number.is_empty()
    }
}

/// A PIN as entered by the customer.
///
/// The default value represents "not yet verified".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinNumber {
    digits: String,
}

impl PinNumber {
    pub fn new(digits: impl Into<String>) -> Self {
        Self {
            digits: digits.into(),
        }
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }
}

/// The kinds of account a card can access.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum AccountType {
    Checking,
    Savings,
    Credit,
}

/// Handle for a selected account within a bank session.
///
/// The default value represents "no account selected"; an open session
/// carries the account type and a bank-assigned session id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSession {
    id: Option<Uuid>,
    account: Option<AccountType>,
}

impl AccountSession {
    /// Open a session for the given account with a fresh id.
    pub fn open(account: AccountType) -> Self {
        Self {
            id: Some(Uuid::new_v4()),
            account: Some(account),
        }
    }

    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    pub fn account(&self) -> Option<AccountType> {
        self.account
    }

    /// True for the "no account selected" value.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
    }
}

/// A transaction the customer can ask for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transaction {
    Withdrawal { amount: u64 },
    Deposit { amount: u64 },
    BalanceInquiry,
}

/// The shared mutable record of the in-progress transaction.
///
/// Exactly one instance lives inside each machine; it is written only by
/// dispatch processing and read through these accessors. Whenever the
/// machine enters a "no customer present" state the whole context is reset
/// to its empty values, so no stale customer secrets survive a completed
/// or aborted transaction.
#[derive(Debug, Default)]
pub struct SessionContext {
    card: CashCard,
    pin: PinNumber,
    account: AccountSession,
}

impl SessionContext {
    pub fn card(&self) -> &CashCard {
        &self.card
    }

    pub fn pin(&self) -> &PinNumber {
        &self.pin
    }

    pub fn account(&self) -> &AccountSession {
        &self.account
    }

    /// True when no customer data is held at all.
    pub fn is_clear(&self) -> bool {
        self.card.is_empty() && self.pin.is_empty() && self.account.is_empty()
    }

    pub(crate) fn set_card(&mut self, card: CashCard) {
        self.card = card;
    }

    pub(crate) fn set_pin(&mut self, pin: PinNumber) {
        self.pin = pin;
    }

    pub(crate) fn set_account(&mut self, account: AccountSession) {
        self.account = account;
    }

    /// Reset every field to its empty value.
    pub(crate) fn clear(&mut self) {
        self.card = CashCard::default();
        self.pin = PinNumber::default();
        self.account = AccountSession::default();
    }
}
