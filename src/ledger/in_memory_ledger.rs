use std::collections::HashMap;

use crate::{
    account::{Account, AccountError, AccountId, Amount},
    user::User,
};

use super::{Ledger, LedgerError};

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    next_id: u32,
    accounts: HashMap<AccountId, Account>,
}

impl InMemoryLedger {
    /// Registers a new account for `user` holding `initial` funds
    pub fn open_account(&mut self, user: User, initial: Amount) -> AccountId {
        let id = AccountId(self.next_id);
        self.next_id += 1;

        self.accounts
            .insert(id, Account::with_balance(id, user, initial));
        id
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    fn account_mut(&mut self, id: AccountId) -> Result<&mut Account, LedgerError> {
        self.accounts
            .get_mut(&id)
            .ok_or(LedgerError::UnknownAccount { id })
    }
}

impl Ledger for InMemoryLedger {
    fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(&id)
    }

    fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        // every check happens before the first balance is touched
        let sender = self
            .account(from)
            .ok_or(LedgerError::UnknownAccount { id: from })?;
        if sender.balance() < amount.value() {
            return Err(AccountError::InsufficientFunds.into());
        }
        if from == to {
            return Ok(());
        }
        self.account(to)
            .ok_or(LedgerError::UnknownAccount { id: to })?
            .balance_after_credit(amount)?;

        self.account_mut(from)?.decrement_balance(amount)?;
        self.account_mut(to)?.increment_balance(amount)?;
        Ok(())
    }
}
