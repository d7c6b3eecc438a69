use bankbook::Result;

use std::{env, path::PathBuf};

use thiserror::Error;

pub const STORE_ENV_VAR: &str = "BANKBOOK_FILE";
pub const DEFAULT_STORE_PATH: &str = "accounts.csv";

#[derive(Error, Debug)]
pub enum InputArgsError {
    #[error("Directory for account file not found: {0:?}")]
    DirectoryNotFound(PathBuf),
}

/// Resolves the account file from the first argument, then `BANKBOOK_FILE`, then the default
pub fn parse_store_arg() -> Result<PathBuf> {
    let arg = env::args().nth(1);
    let var = env::var(STORE_ENV_VAR).ok();

    return resolve_store_path(arg, var);
}

fn resolve_store_path(arg: Option<String>, var: Option<String>) -> Result<PathBuf> {
    let given = |p: &String| !p.trim().is_empty();

    let path = arg
        .filter(given)
        .or_else(|| var.filter(given))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

    // the file itself may not exist yet, but its directory must
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.is_dir() {
            Err(InputArgsError::DirectoryNotFound(dir.to_path_buf()))?
        }
    }

    return Ok(path);
}
