use std::fmt;

use rust_decimal::{Decimal, prelude::Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    persistence::Writable,
    user::{User, UserDocument},
};

/// Handle of an account inside a [`Ledger`](crate::ledger::Ledger)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u32);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Amount must not be negative, got {0}")]
pub struct NegativeAmount(pub Decimal);

/// Monetary quantity moved by a transaction. Never negative, zero is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, NegativeAmount> {
        if value >= Decimal::zero() {
            Ok(Self(value))
        } else {
            Err(NegativeAmount(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = NegativeAmount;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Balance would overflow")]
    Overflow,
}

#[derive(Debug, Clone)]
pub struct Account {
    id: AccountId,
    user: User,
    balance: Decimal,
}

impl Account {
    pub fn new(id: AccountId, user: User) -> Self {
        Self::with_balance(id, user, Amount(Decimal::zero()))
    }

    pub fn with_balance(id: AccountId, user: User, balance: Amount) -> Self {
        Self {
            id,
            user,
            balance: balance.value(),
        }
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn increment_balance(&mut self, amount: Amount) -> Result<(), AccountError> {
        self.balance = self.balance_after_credit(amount)?;
        Ok(())
    }

    /// Balance after `amount` is credited, without crediting it
    pub fn balance_after_credit(&self, amount: Amount) -> Result<Decimal, AccountError> {
        self.balance
            .checked_add(amount.value())
            .ok_or(AccountError::Overflow)
    }

    /// Balance never goes below zero, the account is left untouched instead.
    pub fn decrement_balance(&mut self, amount: Amount) -> Result<(), AccountError> {
        if self.balance >= amount.value() {
            self.balance -= amount.value();
            Ok(())
        } else {
            Err(AccountError::InsufficientFunds)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDocument {
    pub id: AccountId,
    pub user: UserDocument,
    pub balance: Decimal,
}

impl Writable for Account {
    type Document = AccountDocument;

    fn to_document(&self) -> AccountDocument {
        AccountDocument {
            id: self.id,
            user: self.user.to_document(),
            balance: self.balance,
        }
    }
}
