use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    Savings,
    Current,
}

impl AccountKind {
    /// Single character used for this kind in the account file
    pub fn code(&self) -> char {
        return match self {
            AccountKind::Savings => 'S',
            AccountKind::Current => 'C',
        };
    }

    /// Resolves user or file input by its first non-blank character, ignoring case.
    ///
    /// `"s"`, `"S"` and `"Savings"` all resolve to `Savings`.
    pub fn from_code(input: &str) -> Option<Self> {
        let code = input.trim().chars().next()?;

        return match code.to_ascii_uppercase() {
            'S' => Some(AccountKind::Savings),
            'C' => Some(AccountKind::Current),
            _ => None,
        };
    }
}

impl Default for AccountKind {
    fn default() -> Self {
        return AccountKind::Savings;
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let label = match self {
            AccountKind::Savings => "Savings",
            AccountKind::Current => "Current",
        };

        return write!(f, "{label}");
    }
}
