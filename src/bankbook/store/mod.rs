mod account_store;
mod record;

pub use account_store::{AccountStore, Loaded};
pub use record::{AccountRecord, RecordError};
