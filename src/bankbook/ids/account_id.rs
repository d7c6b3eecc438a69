use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("No account ids left after {0}")]
    Exhausted(AccountId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId(pub u32);

impl AccountId {
    pub const FIRST: Self = Self(1);

    /// The id that follows this one, or `None` past the last representable id
    pub fn next(&self) -> Option<Self> {
        return self.0.checked_add(1).map(Self);
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        return write!(f, "{}", self.0);
    }
}
