mod ledger_service;
mod requests;

pub use ledger_service::{LedgerError, LedgerService};
pub use requests::{Deletion, Modification, Modified, ModifyWarning, NewAccount};
