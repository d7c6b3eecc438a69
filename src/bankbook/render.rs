use crate::models::Account;

const RULE: &str = "----------------------------------------";

pub const NO_ACCOUNTS: &str = "No accounts found.";

/// Multi-line detail block for a single account
pub fn account(account: &Account) -> String {
    return format!(
        "{RULE}\n\
         Account No : {}\n\
         Name       : {}\n\
         Type       : {}\n\
         Balance    : {}\n\
         {RULE}\n",
        account.id, account.name, account.kind, account.balance
    );
}

/// Detail blocks for every account, or a notice when there are none
pub fn listing(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return format!("{NO_ACCOUNTS}\n");
    }

    let mut out = String::from("\nAll accounts:\n");
    for a in accounts {
        out.push_str(&account(a));
    }

    return out;
}
