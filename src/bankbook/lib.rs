pub mod ids;
pub mod models;
mod money;
pub mod render;
mod result;
pub mod services;
pub mod store;

pub use ids::{AccountId, AccountIdError};
pub use models::{Account, AccountKind};
pub use money::{Money, MoneyError};
pub use result::Result;
pub use services::LedgerService;
pub use store::AccountStore;

/// Builds a ledger service over the account file at `path`
pub fn build_ledger_service(path: impl Into<std::path::PathBuf>) -> LedgerService {
    let store = AccountStore::new(path);
    let ledger_service = LedgerService::new(store);

    return ledger_service;
}
