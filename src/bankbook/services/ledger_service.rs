use super::{Deletion, Modification, Modified, ModifyWarning, NewAccount};

use crate::ids::AccountId;
use crate::models::{Account, AccountKind};
use crate::store::AccountStore;
use crate::Money;
use crate::Result;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    #[error("Amount must be positive, got {0}")]
    AmountNotPositive(Money),

    #[error("Insufficient balance: cannot withdraw {requested} when balance is {available}")]
    InsufficientBalance { requested: Money, available: Money },

    #[error("Balance cannot be negative, got {0}")]
    NegativeBalance(Money),
}

/// Ledger operations over an account store.
///
/// Every operation reads the whole store, changes it in memory and writes the whole
/// store back. Validation failures return before anything is written.
#[derive(Debug, Clone)]
pub struct LedgerService {
    store: AccountStore,
}

impl LedgerService {
    pub fn new(store: AccountStore) -> Self {
        return Self { store };
    }

    /// The id the next created account will receive
    pub fn next_id(&self) -> Result<AccountId> {
        return self.store.next_id();
    }

    pub fn create(&self, new_account: NewAccount) -> Result<Account> {
        log::debug!("Creating account: {new_account:?}");

        if new_account.balance.is_negative() {
            Err(LedgerError::NegativeBalance(new_account.balance))?
        }

        let id = self.store.next_id()?;
        let account = Account::new(id, new_account.name, new_account.kind, new_account.balance);

        let mut accounts = self.store.load_all()?;
        accounts.push(account.clone());
        self.store.save_all(&accounts)?;

        log::debug!("Created account: {account:?}");

        return Ok(account);
    }

    pub fn show(&self, id: AccountId) -> Result<Account> {
        let accounts = self.store.load_all()?;
        let idx = Self::locate(&accounts, id)?;

        return Ok(accounts[idx].clone());
    }

    pub fn deposit(&self, id: AccountId, amount: Money) -> Result<Account> {
        log::debug!("Depositing {amount} into account {id}");

        let mut accounts = self.store.load_all()?;
        let idx = Self::locate(&accounts, id)?;

        if !amount.is_positive() {
            Err(LedgerError::AmountNotPositive(amount))?
        }

        accounts[idx].balance.add(&amount)?;
        self.store.save_all(&accounts)?;

        return Ok(accounts[idx].clone());
    }

    pub fn withdraw(&self, id: AccountId, amount: Money) -> Result<Account> {
        log::debug!("Withdrawing {amount} from account {id}");

        let mut accounts = self.store.load_all()?;
        let idx = Self::locate(&accounts, id)?;

        if !amount.is_positive() {
            Err(LedgerError::AmountNotPositive(amount))?
        }

        let available = accounts[idx].balance;
        if amount > available {
            Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            })?
        }

        accounts[idx].balance.sub(&amount)?;
        self.store.save_all(&accounts)?;

        return Ok(accounts[idx].clone());
    }

    /// Applies each non-blank field of `modification` that is valid. Rejected fields keep
    /// their previous value and are reported as warnings. The store is always rewritten.
    pub fn modify(&self, id: AccountId, modification: Modification) -> Result<Modified> {
        log::debug!("Modifying account {id}: {modification:?}");

        let mut accounts = self.store.load_all()?;
        let idx = Self::locate(&accounts, id)?;

        let account = &mut accounts[idx];
        let mut warnings = vec![];

        if let Some(name) = non_blank(&modification.name) {
            account.name = name.to_string();
        }

        if let Some(kind) = non_blank(&modification.kind) {
            match AccountKind::from_code(kind) {
                Some(kind) => account.kind = kind,
                None => warnings.push(ModifyWarning::InvalidKind(kind.to_string())),
            }
        }

        if let Some(balance) = non_blank(&modification.balance) {
            match Money::parse(balance) {
                Ok(balance) if balance.is_negative() => {
                    warnings.push(ModifyWarning::NegativeBalance(balance))
                }
                Ok(balance) => account.balance = balance,
                Err(e) => {
                    log::debug!("Rejected balance {balance:?}: {e}");
                    warnings.push(ModifyWarning::InvalidBalance(balance.to_string()));
                }
            }
        }

        let account = account.clone();
        self.store.save_all(&accounts)?;

        for warning in warnings.iter() {
            log::debug!("Account {id} modified with warning: {warning}");
        }

        return Ok(Modified { account, warnings });
    }

    /// Removes the account when `confirmation` starts with `y` or `Y`; anything else
    /// cancels without writing.
    pub fn delete(&self, id: AccountId, confirmation: &str) -> Result<Deletion> {
        let mut accounts = self.store.load_all()?;
        let idx = Self::locate(&accounts, id)?;

        if !is_affirmative(confirmation) {
            log::debug!("Delete of account {id} cancelled with {confirmation:?}");
            return Ok(Deletion::Cancelled(accounts[idx].clone()));
        }

        let account = accounts.remove(idx);
        self.store.save_all(&accounts)?;

        log::debug!("Deleted account: {account:?}");

        return Ok(Deletion::Removed(account));
    }

    pub fn list(&self) -> Result<Vec<Account>> {
        return self.store.load_all();
    }

    fn locate(accounts: &[Account], id: AccountId) -> Result<usize> {
        let idx = AccountStore::find_index(accounts, id).ok_or(LedgerError::NotFound(id))?;

        return Ok(idx);
    }
}

fn non_blank(input: &Option<String>) -> Option<&str> {
    return input.as_deref().map(str::trim).filter(|s| !s.is_empty());
}

fn is_affirmative(confirmation: &str) -> bool {
    return confirmation
        .trim()
        .chars()
        .next()
        .map_or(false, |c| c.eq_ignore_ascii_case(&'y'));
}

#[cfg(test)]
mod tests {
    use crate::ids::AccountIdError;
    use crate::store::scratch::ScratchFile;

    use super::*;

    fn build_service(scratch: &ScratchFile) -> LedgerService {
        return LedgerService::new(AccountStore::new(scratch.path()));
    }

    fn new_account(name: &str, kind: AccountKind, balance: i64) -> NewAccount {
        return NewAccount {
            name: name.to_string(),
            kind,
            balance: Money(balance),
        };
    }

    fn ledger_error(err: anyhow::Error) -> LedgerError {
        return err.downcast::<LedgerError>().unwrap();
    }

    fn seeded(label: &str) -> ScratchFile {
        return ScratchFile::with_contents(label, "1,Alice,S,100.00\n2,Bob,C,20.00\n");
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let scratch = ScratchFile::new("create");
        let service = build_service(&scratch);

        assert_eq!(service.next_id().unwrap(), AccountId(1));

        let alice = service
            .create(new_account("Alice", AccountKind::Savings, 10000))
            .unwrap();
        let bob = service
            .create(new_account("Bob", AccountKind::Current, 0))
            .unwrap();

        assert_eq!(alice.id, AccountId(1));
        assert_eq!(bob.id, AccountId(2));
        assert_eq!(service.list().unwrap(), vec![alice, bob]);
        assert_eq!(scratch.read(), "1,Alice,S,100.00\n2,Bob,C,0.00\n");
    }

    #[test]
    fn create_after_delete_uses_max_plus_one() {
        let scratch = seeded("create-gap");
        let service = build_service(&scratch);

        service.delete(AccountId(1), "y").unwrap();
        let carol = service
            .create(new_account("Carol", AccountKind::Savings, 0))
            .unwrap();

        assert_eq!(carol.id, AccountId(3));
    }

    #[test]
    fn create_rejects_negative_balance() {
        let scratch = ScratchFile::new("create-negative");
        let service = build_service(&scratch);

        let err = service
            .create(new_account("Eve", AccountKind::Savings, -1))
            .unwrap_err();

        assert_eq!(ledger_error(err), LedgerError::NegativeBalance(Money(-1)));
        assert!(!scratch.path().exists());
    }

    #[test]
    fn create_refuses_to_reuse_last_id() {
        let scratch = ScratchFile::with_contents("create-max", "4294967295,Max,S,1.00\n");
        let service = build_service(&scratch);

        let err = service
            .create(new_account("Next", AccountKind::Savings, 0))
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<AccountIdError>(),
            Some(&AccountIdError::Exhausted(AccountId(u32::MAX)))
        );
        assert_eq!(scratch.read(), "4294967295,Max,S,1.00\n");
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn show() {
        let scratch = seeded("show");
        let service = build_service(&scratch);

        assert_eq!(service.show(AccountId(2)).unwrap().name, "Bob");

        let err = service.show(AccountId(3)).unwrap_err();
        assert_eq!(ledger_error(err), LedgerError::NotFound(AccountId(3)));
    }

    #[test]
    fn deposit() {
        let scratch = seeded("deposit");
        let service = build_service(&scratch);

        let account = service.deposit(AccountId(1), Money(5000)).unwrap();

        assert_eq!(account.balance, Money(15000));
        assert_eq!(scratch.read(), "1,Alice,S,150.00\n2,Bob,C,20.00\n");
    }

    #[test]
    fn deposit_failures_do_not_write() {
        let scratch = seeded("deposit-fail");
        let service = build_service(&scratch);
        let before = scratch.read();

        let err = service.deposit(AccountId(9), Money(100)).unwrap_err();
        assert_eq!(ledger_error(err), LedgerError::NotFound(AccountId(9)));

        let err = service.deposit(AccountId(1), Money(0)).unwrap_err();
        assert_eq!(ledger_error(err), LedgerError::AmountNotPositive(Money(0)));

        let err = service.deposit(AccountId(1), Money(-100)).unwrap_err();
        assert_eq!(ledger_error(err), LedgerError::AmountNotPositive(Money(-100)));

        assert_eq!(scratch.read(), before);
    }

    #[test]
    fn withdraw() {
        let scratch = seeded("withdraw");
        let service = build_service(&scratch);

        let account = service.withdraw(AccountId(2), Money(2000)).unwrap();

        assert_eq!(account.balance, Money::ZERO);
        assert_eq!(scratch.read(), "1,Alice,S,100.00\n2,Bob,C,0.00\n");
    }

    #[test]
    fn withdraw_failures_do_not_write() {
        let scratch = seeded("withdraw-fail");
        let service = build_service(&scratch);
        let before = scratch.read();

        let err = service.withdraw(AccountId(1), Money(10001)).unwrap_err();
        assert_eq!(
            ledger_error(err),
            LedgerError::InsufficientBalance {
                requested: Money(10001),
                available: Money(10000),
            }
        );

        let err = service.withdraw(AccountId(1), Money(-5)).unwrap_err();
        assert_eq!(ledger_error(err), LedgerError::AmountNotPositive(Money(-5)));

        let err = service.withdraw(AccountId(3), Money(5)).unwrap_err();
        assert_eq!(ledger_error(err), LedgerError::NotFound(AccountId(3)));

        assert_eq!(scratch.read(), before);
    }

    #[test]
    fn modify_all_fields() {
        let scratch = seeded("modify");
        let service = build_service(&scratch);

        let modified = service
            .modify(
                AccountId(1),
                Modification {
                    name: Some("  Alice Smith ".to_string()),
                    kind: Some("current".to_string()),
                    balance: Some("75.5".to_string()),
                },
            )
            .unwrap();

        assert_eq!(
            modified,
            Modified {
                account: Account::new(AccountId(1), "Alice Smith", AccountKind::Current, Money(7550)),
                warnings: vec![],
            }
        );
        assert_eq!(scratch.read(), "1,Alice Smith,C,75.50\n2,Bob,C,20.00\n");
    }

    #[test]
    fn modify_blank_fields_keep_values_and_still_save() {
        let scratch = ScratchFile::with_contents("modify-blank", " 1 , Alice , S , 100 \n");
        let service = build_service(&scratch);

        let modified = service
            .modify(
                AccountId(1),
                Modification {
                    name: Some("   ".to_string()),
                    kind: Some("".to_string()),
                    balance: None,
                },
            )
            .unwrap();

        assert_eq!(
            modified.account,
            Account::new(AccountId(1), "Alice", AccountKind::Savings, Money(10000))
        );
        assert!(modified.warnings.is_empty());
        assert_eq!(scratch.read(), "1,Alice,S,100.00\n");
    }

    #[test]
    fn modify_invalid_fields_warn_without_aborting() {
        let scratch = seeded("modify-warn");
        let service = build_service(&scratch);

        let modified = service
            .modify(
                AccountId(2),
                Modification {
                    name: Some("Robert".to_string()),
                    kind: Some("X".to_string()),
                    balance: Some("ten".to_string()),
                },
            )
            .unwrap();

        assert_eq!(
            modified,
            Modified {
                account: Account::new(AccountId(2), "Robert", AccountKind::Current, Money(2000)),
                warnings: vec![
                    ModifyWarning::InvalidKind("X".to_string()),
                    ModifyWarning::InvalidBalance("ten".to_string()),
                ],
            }
        );

        let modified = service
            .modify(
                AccountId(2),
                Modification {
                    balance: Some("-3".to_string()),
                    ..Modification::default()
                },
            )
            .unwrap();

        assert_eq!(modified.account.balance, Money(2000));
        assert_eq!(modified.warnings, vec![ModifyWarning::NegativeBalance(Money(-300))]);
    }

    #[test]
    fn modify_not_found() {
        let scratch = seeded("modify-missing");
        let service = build_service(&scratch);

        let err = service
            .modify(AccountId(5), Modification::default())
            .unwrap_err();

        assert_eq!(ledger_error(err), LedgerError::NotFound(AccountId(5)));
    }

    #[test]
    fn delete() {
        let scratch = seeded("delete");
        let service = build_service(&scratch);

        let deletion = service.delete(AccountId(1), " yes").unwrap();

        assert_eq!(
            deletion,
            Deletion::Removed(Account::new(AccountId(1), "Alice", AccountKind::Savings, Money(10000)))
        );
        assert_eq!(scratch.read(), "2,Bob,C,20.00\n");
        assert!(AccountStore::find_index(&service.list().unwrap(), AccountId(1)).is_none());
    }

    #[test]
    fn delete_cancelled() {
        let scratch = seeded("delete-cancel");
        let service = build_service(&scratch);
        let before = scratch.read();

        for answer in ["n", "", "maybe", "N"] {
            let deletion = service.delete(AccountId(2), answer).unwrap();
            assert!(matches!(deletion, Deletion::Cancelled(account) if account.id == AccountId(2)));
        }

        assert_eq!(scratch.read(), before);

        let err = service.delete(AccountId(3), "Y").unwrap_err();
        assert_eq!(ledger_error(err), LedgerError::NotFound(AccountId(3)));
    }

    #[test]
    fn list_empty_store_does_not_create_file() {
        let scratch = ScratchFile::new("list-empty");
        let service = build_service(&scratch);

        assert!(service.list().unwrap().is_empty());
        assert!(!scratch.path().exists());
    }
}
