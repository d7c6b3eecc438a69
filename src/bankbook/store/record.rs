use crate::ids::AccountId;
use crate::models::{Account, AccountKind};
use crate::Money;
use crate::Result;

use csv::StringRecord;

use serde::Serialize;

use thiserror::Error;

const DELIMITER: char = ',';

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Expected 4 fields, found {0}")]
    MissingFields(usize),

    #[error("Invalid account id: {0:?}")]
    InvalidId(String),

    #[error("Invalid account kind: {0:?}")]
    InvalidKind(String),

    #[error("Invalid balance: {0:?}")]
    InvalidBalance(String),
}

/// Represents one line of the account file: `id,name,kind,balance`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub id: u32,
    pub name: String,
    pub kind: char,
    pub balance: String,
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        return Self {
            id: account.id.0,
            name: clean_name(&account.name),
            kind: account.kind.code(),
            balance: account.balance.to_string(),
        };
    }
}

/// Replaces characters that would split the name across fields or lines
fn clean_name(name: &str) -> String {
    return name
        .chars()
        .map(|c| match c {
            DELIMITER | '\r' | '\n' => ' ',
            c => c,
        })
        .collect();
}

impl AccountRecord {
    /// Parses a trimmed csv record into an account.
    ///
    /// Fields past the fourth are ignored. An empty kind field reads as Savings.
    pub fn parse(record: &StringRecord) -> Result<Account> {
        if record.len() < 4 {
            Err(RecordError::MissingFields(record.len()))?
        }

        let id = &record[0];
        let name = &record[1];
        let kind = &record[2];
        let balance = &record[3];

        let id: u32 = id
            .parse()
            .map_err(|_| RecordError::InvalidId(id.to_string()))?;

        let kind = if kind.is_empty() {
            AccountKind::default()
        } else {
            AccountKind::from_code(kind).ok_or_else(|| RecordError::InvalidKind(kind.to_string()))?
        };

        let balance =
            Money::parse(balance).map_err(|_| RecordError::InvalidBalance(balance.to_string()))?;

        return Ok(Account::new(AccountId(id), name, kind, balance));
    }
}
