use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    account::{AccountId, Amount, NegativeAmount},
    ledger::Ledger,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Settlement is deferred until the caller invokes it
    Request,
    /// Settlement is attempted as soon as the transaction is created
    Exchange,
}

/// Caller supplied parameters of a transaction to be created
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub recipient: AccountId,
    pub sender: AccountId,
    pub amount: Decimal,
    pub kind: TransactionType,
}

/// [`NewTransaction`] that passed validation against a ledger
#[derive(Debug, Clone, Copy)]
pub(crate) struct ValidTransaction {
    pub recipient: AccountId,
    pub sender: AccountId,
    pub amount: Amount,
    pub kind: TransactionType,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error(transparent)]
    NegativeAmount(#[from] NegativeAmount),
    #[error("{role} account {id} does not exist")]
    UnknownAccount { role: AccountRole, id: AccountId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountRole {
    Sender,
    Recipient,
}

impl std::fmt::Display for AccountRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountRole::Sender => f.write_str("Sender"),
            AccountRole::Recipient => f.write_str("Recipient"),
        }
    }
}

impl NewTransaction {
    pub(crate) fn validate<L>(self, ledger: &L) -> Result<ValidTransaction, CommandError>
    where
        L: Ledger + ?Sized,
    {
        let amount = Amount::new(self.amount)?;
        Self::check_account(ledger, AccountRole::Sender, self.sender)?;
        Self::check_account(ledger, AccountRole::Recipient, self.recipient)?;
        Ok(ValidTransaction {
            recipient: self.recipient,
            sender: self.sender,
            amount,
            kind: self.kind,
        })
    }

    fn check_account<L>(ledger: &L, role: AccountRole, id: AccountId) -> Result<(), CommandError>
    where
        L: Ledger + ?Sized,
    {
        if ledger.contains(id) {
            Ok(())
        } else {
            Err(CommandError::UnknownAccount { role, id })
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{ledger::in_memory_ledger::InMemoryLedger, user::User};

    use super::*;

    fn ledger() -> (InMemoryLedger, AccountId, AccountId) {
        let mut ledger = InMemoryLedger::default();
        let alice = ledger.open_account(User::new("alice"), Amount::new(dec!(10)).unwrap());
        let bob = ledger.open_account(User::new("bob"), Amount::new(dec!(0)).unwrap());
        (ledger, alice, bob)
    }

    #[test]
    fn validate_command() {
        let (ledger, alice, bob) = ledger();
        let valid = NewTransaction {
            recipient: bob,
            sender: alice,
            amount: dec!(2.5),
            kind: TransactionType::Request,
        }
        .validate(&ledger)
        .unwrap();
        assert_eq!(valid.sender, alice);
        assert_eq!(valid.recipient, bob);
        assert_eq!(valid.amount.value(), dec!(2.5));
        assert_eq!(valid.kind, TransactionType::Request);

        // zero is a valid amount
        let valid = NewTransaction {
            recipient: bob,
            sender: alice,
            amount: dec!(0),
            kind: TransactionType::Exchange,
        }
        .validate(&ledger)
        .unwrap();
        assert_eq!(valid.amount.value(), dec!(0));
    }

    #[test]
    fn negative_amount_rejected() {
        let (ledger, alice, bob) = ledger();
        let err = NewTransaction {
            recipient: bob,
            sender: alice,
            amount: dec!(-1),
            kind: TransactionType::Exchange,
        }
        .validate(&ledger)
        .unwrap_err();
        assert_eq!(err, CommandError::NegativeAmount(NegativeAmount(dec!(-1))));
        assert_eq!(err.to_string(), "Amount must not be negative, got -1");
    }

    #[test]
    fn unknown_accounts_rejected() {
        let (ledger, alice, _) = ledger();
        let err = NewTransaction {
            recipient: AccountId(77),
            sender: alice,
            amount: dec!(1),
            kind: TransactionType::Request,
        }
        .validate(&ledger)
        .unwrap_err();
        assert_eq!(
            err,
            CommandError::UnknownAccount {
                role: AccountRole::Recipient,
                id: AccountId(77)
            }
        );
        assert_eq!(err.to_string(), "Recipient account 77 does not exist");

        let err = NewTransaction {
            recipient: alice,
            sender: AccountId(78),
            amount: dec!(1),
            kind: TransactionType::Request,
        }
        .validate(&ledger)
        .unwrap_err();
        assert!(matches!(
            err,
            CommandError::UnknownAccount {
                role: AccountRole::Sender,
                ..
            }
        ));
    }
}
