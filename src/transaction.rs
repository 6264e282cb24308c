use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    account::{AccountId, Amount},
    command::{CommandError, NewTransaction, TransactionType},
    ledger::Ledger,
    persistence::Writable,
    user::User,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Source of transaction ids
pub trait IdGenerator {
    fn next_id(&mut self) -> TransactionId;
}

/// Random (v4) UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> TransactionId {
        TransactionId(Uuid::new_v4())
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> TransactionId,
{
    fn next_id(&mut self) -> TransactionId {
        self()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionStatus {
    /// Funds have not changed hands yet
    Pending,
    /// Funds have changed hands
    Complete,
    /// Settlement was attempted, funds did not change hands
    Failed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("Exchange transaction {id} can not be stored as pending")]
    PendingExchange { id: TransactionId },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettlementError {
    #[error("Transaction {id} is already settled with status {status:?}")]
    AlreadySettled {
        id: TransactionId,
        status: TransactionStatus,
    },
}

/// One transfer of funds from a sender account to a recipient account.
///
/// Status starts as [`TransactionStatus::Pending`] and changes exactly once,
/// when settlement is attempted. [`TransactionType::Exchange`] transactions
/// are settled while being created, so they are never observed pending.
///
/// Not `Clone`, there is exactly one value per transaction id:
///
/// ```compile_fail
/// fn duplicate(tx: transfer_ledger::Transaction) -> (transfer_ledger::Transaction, transfer_ledger::Transaction) {
///     (tx.clone(), tx)
/// }
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct Transaction {
    id: TransactionId,
    recipient: AccountId,
    sender: AccountId,
    amount: Amount,
    date: NaiveDate,
    status: TransactionStatus,
    kind: TransactionType,
}

impl Transaction {
    /// Creates a transaction with a random id, dated today.
    pub fn create<L>(command: NewTransaction, ledger: &mut L) -> Result<Self, CommandError>
    where
        L: Ledger + ?Sized,
    {
        Self::create_with(command, ledger, &mut RandomIds, Local::now().date_naive())
    }

    /// Same as [`Transaction::create`], with the id source and creation date supplied
    /// by the caller.
    ///
    /// Only invalid commands are rejected. The outcome of an inline settlement
    /// is reported through [`Transaction::status`].
    pub fn create_with<L, G>(
        command: NewTransaction,
        ledger: &mut L,
        ids: &mut G,
        date: NaiveDate,
    ) -> Result<Self, CommandError>
    where
        L: Ledger + ?Sized,
        G: IdGenerator + ?Sized,
    {
        let command = command.validate(&*ledger)?;
        let mut tx = Self {
            id: ids.next_id(),
            recipient: command.recipient,
            sender: command.sender,
            amount: command.amount,
            date,
            status: TransactionStatus::Pending,
            kind: command.kind,
        };
        match tx.kind {
            TransactionType::Request => {}
            TransactionType::Exchange => tx.attempt_settlement(ledger),
        }
        Ok(tx)
    }

    /// Settles a pending transaction and returns the resulting status.
    ///
    /// A transaction that is already complete or failed is left as it is
    /// and no funds move.
    pub fn settle<L>(&mut self, ledger: &mut L) -> Result<TransactionStatus, SettlementError>
    where
        L: Ledger + ?Sized,
    {
        match self.status {
            TransactionStatus::Pending => {
                self.attempt_settlement(ledger);
                Ok(self.status)
            }
            status @ (TransactionStatus::Complete | TransactionStatus::Failed) => {
                warn!(id = %self.id, ?status, "Refusing to settle transaction twice");
                Err(SettlementError::AlreadySettled {
                    id: self.id,
                    status,
                })
            }
        }
    }

    fn attempt_settlement<L>(&mut self, ledger: &mut L)
    where
        L: Ledger + ?Sized,
    {
        self.status = match ledger.transfer(self.sender, self.recipient, self.amount) {
            Ok(()) => TransactionStatus::Complete,
            Err(err) => {
                debug!(id = %self.id, reason = %err, "Settlement failed");
                TransactionStatus::Failed
            }
        };
        debug!(
            id = %self.id,
            sender = %self.sender,
            recipient = %self.recipient,
            amount = %self.amount,
            status = ?self.status,
            "Transaction settled"
        );
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.kind
    }

    pub fn sender_account(&self) -> AccountId {
        self.sender
    }

    pub fn recipient_account(&self) -> AccountId {
        self.recipient
    }

    /// The user owning the recipient account
    pub fn recipient<'l, L>(&self, ledger: &'l L) -> Option<&'l User>
    where
        L: Ledger + ?Sized,
    {
        ledger.account(self.recipient).map(|acc| acc.user())
    }

    pub fn sender_username<'l, L>(&self, ledger: &'l L) -> Option<&'l str>
    where
        L: Ledger + ?Sized,
    {
        ledger.account(self.sender).map(|acc| acc.user().username())
    }

    pub fn recipient_username<'l, L>(&self, ledger: &'l L) -> Option<&'l str>
    where
        L: Ledger + ?Sized,
    {
        self.recipient(ledger).map(User::username)
    }

    /// Rebuilds a stored transaction as it was written, without settling it
    pub fn from_document(doc: TransactionDocument) -> Result<Self, DocumentError> {
        match (doc.kind, doc.status) {
            (TransactionType::Exchange, TransactionStatus::Pending) => {
                return Err(DocumentError::PendingExchange { id: doc.id });
            }
            (TransactionType::Exchange, TransactionStatus::Complete | TransactionStatus::Failed)
            | (TransactionType::Request, _) => {}
        }
        Ok(Self {
            id: doc.id,
            recipient: doc.recipient,
            sender: doc.sender,
            amount: doc.amount,
            date: doc.date,
            status: doc.status,
            kind: doc.kind,
        })
    }
}

/// Stored shape of a [`Transaction`]. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDocument {
    pub recipient: AccountId,
    pub sender: AccountId,
    pub id: TransactionId,
    pub date: NaiveDate,
    pub amount: Amount,
    pub status: TransactionStatus,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl TryFrom<TransactionDocument> for Transaction {
    type Error = DocumentError;

    fn try_from(doc: TransactionDocument) -> Result<Self, Self::Error> {
        Self::from_document(doc)
    }
}

impl Writable for Transaction {
    type Document = TransactionDocument;

    fn to_document(&self) -> TransactionDocument {
        TransactionDocument {
            recipient: self.recipient,
            sender: self.sender,
            id: self.id,
            date: self.date,
            amount: self.amount,
            status: self.status,
            kind: self.kind,
        }
    }
}
