use super::AccountKind;

use crate::ids::AccountId;
use crate::Money;

/// A single ledger entry, as persisted in the account file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub kind: AccountKind,
    pub balance: Money,
}

impl Account {
    pub fn new(id: AccountId, name: impl Into<String>, kind: AccountKind, balance: Money) -> Self {
        return Self {
            id,
            name: name.into(),
            kind,
            balance,
        };
    }
}
