/// Account balances and the owning user identity.
pub mod account;
/// Identity owning an account.
pub mod user;

/// Parameters and validation of transactions about to be created.
pub mod command;

/// Registry of accounts that moves funds between them, plus "in memory" implementation.
///
/// Accounts are addressed by [`account::AccountId`] handles so that a transaction
/// and whoever owns the accounts reach the same balances.
pub mod ledger;

/// The transaction lifecycle: creation, settlement and accessors.
pub mod transaction;

/// Document representation of entities and its JSON encoding.
pub mod persistence;

pub use account::{Account, AccountId, Amount};
pub use command::{NewTransaction, TransactionType};
pub use ledger::{Ledger, in_memory_ledger::InMemoryLedger};
pub use transaction::{Transaction, TransactionStatus};
pub use user::User;
