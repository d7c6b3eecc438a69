mod account;
mod account_kind;

pub use account::Account;
pub use account_kind::AccountKind;
