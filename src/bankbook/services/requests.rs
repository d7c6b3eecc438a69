use crate::models::{Account, AccountKind};
use crate::Money;

use thiserror::Error;

/// Details collected for a new account; the id is assigned by the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub kind: AccountKind,
    pub balance: Money,
}

/// Raw replacement values for an existing account.
///
/// `None` or a blank string keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modification {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub balance: Option<String>,
}

/// A field of a modification that was rejected while the rest were applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModifyWarning {
    #[error("Invalid type entered: {0:?}. Keeping previous type.")]
    InvalidKind(String),

    #[error("Invalid number entered: {0:?}. Keeping previous balance.")]
    InvalidBalance(String),

    #[error("Negative balance not allowed: {0}. Keeping previous balance.")]
    NegativeBalance(Money),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modified {
    pub account: Account,
    pub warnings: Vec<ModifyWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion {
    Removed(Account),
    Cancelled(Account),
}
