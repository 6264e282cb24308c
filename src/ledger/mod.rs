use thiserror::Error;

use crate::account::{Account, AccountError, AccountId, Amount};

pub mod in_memory_ledger;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account {id} does not exist")]
    UnknownAccount { id: AccountId },
    #[error(transparent)]
    Account(#[from] AccountError),
}

pub trait Ledger {
    fn account(&self, id: AccountId) -> Option<&Account>;

    /// Moves `amount` from one account to the other.
    ///
    /// Either both balances change or neither does. The sender balance is
    /// checked before anything is mutated.
    fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;

    fn contains(&self, id: AccountId) -> bool {
        self.account(id).is_some()
    }
}
