use super::AccountRecord;

use crate::ids::{AccountId, AccountIdError};
use crate::models::Account;
use crate::Result;

use std::{
    fs::{self, File},
    io::ErrorKind,
    path::PathBuf,
};

use csv::{QuoteStyle, ReaderBuilder, Trim, WriterBuilder};

/// Result of reading the account file
#[derive(Debug, Default, PartialEq)]
pub struct Loaded {
    pub accounts: Vec<Account>,

    /// Number of lines that were present but could not be read as an account
    pub skipped: usize,
}

/// Persists the full set of accounts as a single csv file, one account per line.
///
/// The store is a plain persistence layer: it writes whatever it is handed and reads
/// whatever it can. Every write replaces the whole file.
#[derive(Debug, Clone)]
pub struct AccountStore {
    path: PathBuf,
}

impl AccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        return Self { path: path.into() };
    }

    /// Reads every well-formed account in file order. A missing file is an empty store.
    pub fn load_all(&self) -> Result<Vec<Account>> {
        return Ok(self.load()?.accounts);
    }

    /// Like `load_all`, also counting the lines that had to be skipped
    pub fn load(&self) -> Result<Loaded> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No account file at {:?}, starting empty", self.path);
                return Ok(Loaded::default());
            }
            Err(e) => return Err(e.into()),
        };

        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(file);

        let mut loaded = Loaded::default();

        for record in rdr.records() {
            let record = match record {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    log::warn!("Skipping unreadable line in {:?}: {e}", self.path);
                    loaded.skipped += 1;
                    continue;
                }
            };

            // whitespace-only lines trim down to a single empty field
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }

            match AccountRecord::parse(&record) {
                Ok(account) => loaded.accounts.push(account),
                Err(e) => {
                    let line = record.position().map(|p| p.line()).unwrap_or_default();
                    log::warn!("Skipping line {line} of {:?}: {e}", self.path);
                    loaded.skipped += 1;
                }
            }
        }

        log::debug!(
            "Loaded {} accounts from {:?} ({} skipped)",
            loaded.accounts.len(),
            self.path,
            loaded.skipped
        );

        return Ok(loaded);
    }

    /// Replaces the file contents with exactly `accounts`, in order.
    ///
    /// Writes to a sibling temp file first and renames it over the target.
    pub fn save_all(&self, accounts: &[Account]) -> Result {
        let tmp_path = self.tmp_path();

        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .from_path(&tmp_path)?;

        for account in accounts {
            wtr.serialize(AccountRecord::from(account))?;
        }

        wtr.flush()?;
        drop(wtr);

        fs::rename(&tmp_path, &self.path)?;

        log::debug!("Saved {} accounts to {:?}", accounts.len(), self.path);

        return Ok(());
    }

    /// One past the highest id currently on disk, or the first id for an empty store.
    ///
    /// Fails once the highest id on disk is the last representable one.
    pub fn next_id(&self) -> Result<AccountId> {
        let max_id = self.load_all()?.iter().map(|account| account.id).max();

        let next_id = match max_id {
            None => AccountId::FIRST,
            Some(id) => id.next().ok_or(AccountIdError::Exhausted(id))?,
        };

        return Ok(next_id);
    }

    /// Index of the first account in `accounts` with the given id
    pub fn find_index(accounts: &[Account], id: AccountId) -> Option<usize> {
        return accounts.iter().position(|account| account.id == id);
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");

        return PathBuf::from(tmp);
    }
}
