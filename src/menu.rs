use crate::prompt::{PromptError, Prompter};

use bankbook::services::{Deletion, Modification, NewAccount};
use bankbook::{render, AccountId, AccountKind, LedgerService, Money, Result};

use std::io::{BufRead, Write};

use thiserror::Error;

const MENU: &str = "\n======== Bank Management System ========\n\
                    1. Create new account\n\
                    2. Display account details\n\
                    3. Deposit amount\n\
                    4. Withdraw amount\n\
                    5. Modify account\n\
                    6. Delete account\n\
                    7. List all accounts\n\
                    0. Exit\n\
                    Choose an option: ";

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Invalid account number: {0:?}")]
    InvalidAccountNumber(String),

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Create,
    Show,
    Deposit,
    Withdraw,
    Modify,
    Delete,
    List,
    Exit,
}

impl MenuChoice {
    fn from_number(number: i64) -> Option<Self> {
        let choice = match number {
            1 => MenuChoice::Create,
            2 => MenuChoice::Show,
            3 => MenuChoice::Deposit,
            4 => MenuChoice::Withdraw,
            5 => MenuChoice::Modify,
            6 => MenuChoice::Delete,
            7 => MenuChoice::List,
            0 => MenuChoice::Exit,
            _ => return None,
        };

        return Some(choice);
    }
}

/// Interactive menu driving one ledger operation per choice.
///
/// Failures are printed and the loop continues. Choosing exit or running out of
/// input ends the session.
pub struct Menu<R, W> {
    ledger_service: LedgerService,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(ledger_service: LedgerService, input: R, output: W) -> Self {
        return Self {
            ledger_service,
            prompter: Prompter::new(input, output),
        };
    }

    pub fn run(&mut self) -> Result {
        loop {
            let answer = match self.prompter.ask(MENU) {
                Ok(answer) => answer,
                Err(e) if is_end_of_input(&e) => return Ok(()),
                Err(e) => return Err(e),
            };

            let number = match answer.trim().parse::<i64>() {
                Ok(number) => number,
                Err(_) => {
                    self.prompter.say("Invalid input. Try again.\n")?;
                    continue;
                }
            };

            let choice = match MenuChoice::from_number(number) {
                Some(choice) => choice,
                None => {
                    self.prompter.say("Invalid choice.\n")?;
                    continue;
                }
            };

            if choice == MenuChoice::Exit {
                self.prompter.say("Goodbye!\n")?;
                return Ok(());
            }

            log::debug!("Menu choice: {choice:?}");

            if let Err(e) = self.dispatch(choice) {
                if is_end_of_input(&e) {
                    return Ok(());
                }

                log::debug!("{choice:?} failed: {e:?}");
                self.prompter.say(&format!("{e}\n"))?;
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result {
        match choice {
            MenuChoice::Create => self.create()?,
            MenuChoice::Show => self.show()?,
            MenuChoice::Deposit => self.deposit()?,
            MenuChoice::Withdraw => self.withdraw()?,
            MenuChoice::Modify => self.modify()?,
            MenuChoice::Delete => self.delete()?,
            MenuChoice::List => self.list()?,
            MenuChoice::Exit => {}
        }

        return Ok(());
    }

    fn create(&mut self) -> Result {
        let id = self.ledger_service.next_id()?;
        self.prompter
            .say(&format!("\nCreating account. Account number will be: {id}\n"))?;

        let name = self.prompter.ask("Enter full name: ")?;

        let kind = self.prompter.ask_until(
            "Account type (S = Savings, C = Current): ",
            "Invalid type. Enter S or C: ",
            AccountKind::from_code,
        )?;

        let balance = self.prompter.ask_until(
            "Initial deposit (minimum 0): ",
            "Enter a number of at least 0: ",
            |answer| Money::parse(answer).ok().filter(|m| !m.is_negative()),
        )?;

        let account = self.ledger_service.create(NewAccount {
            name: name.trim().to_string(),
            kind,
            balance,
        })?;

        self.prompter.say(&format!(
            "Account created successfully! Account number: {}\n",
            account.id
        ))?;

        return Ok(());
    }

    fn show(&mut self) -> Result {
        let id = self.ask_account_id("Enter account number: ")?;
        let account = self.ledger_service.show(id)?;

        self.prompter.say(&render::account(&account))?;

        return Ok(());
    }

    fn deposit(&mut self) -> Result {
        let id = self.ask_account_id("Enter account number: ")?;
        self.ledger_service.show(id)?;

        let amount = self.ask_amount("Enter amount to deposit: ")?;
        let account = self.ledger_service.deposit(id, amount)?;

        self.prompter.say(&format!(
            "Deposited successfully. New balance: {}\n",
            account.balance
        ))?;

        return Ok(());
    }

    fn withdraw(&mut self) -> Result {
        let id = self.ask_account_id("Enter account number: ")?;
        self.ledger_service.show(id)?;

        let amount = self.ask_amount("Enter amount to withdraw: ")?;
        let account = self.ledger_service.withdraw(id, amount)?;

        self.prompter.say(&format!(
            "Withdrawal successful. New balance: {}\n",
            account.balance
        ))?;

        return Ok(());
    }

    fn modify(&mut self) -> Result {
        let id = self.ask_account_id("Enter account number to modify: ")?;
        let account = self.ledger_service.show(id)?;

        self.prompter.say("Current details:\n")?;
        self.prompter.say(&render::account(&account))?;

        let name = self.prompter.ask("Enter new name (leave blank to keep): ")?;
        let kind = self.prompter.ask(&format!(
            "Enter new account type (S/C) or press Enter to keep [{}]: ",
            account.kind.code()
        ))?;
        let balance = self.prompter.ask(&format!(
            "Enter new balance or press Enter to keep [{}]: ",
            account.balance
        ))?;

        let modified = self.ledger_service.modify(
            id,
            Modification {
                name: Some(name),
                kind: Some(kind),
                balance: Some(balance),
            },
        )?;

        for warning in modified.warnings.iter() {
            self.prompter.say(&format!("{warning}\n"))?;
        }

        self.prompter.say("Account updated.\n")?;

        return Ok(());
    }

    fn delete(&mut self) -> Result {
        let id = self.ask_account_id("Enter account number to delete: ")?;
        let account = self.ledger_service.show(id)?;

        self.prompter.say("Account to be deleted:\n")?;
        self.prompter.say(&render::account(&account))?;

        let confirmation = self.prompter.ask("Are you sure? (Y/N): ")?;

        match self.ledger_service.delete(id, &confirmation)? {
            Deletion::Removed(_) => self.prompter.say("Account deleted.\n")?,
            Deletion::Cancelled(_) => self.prompter.say("Delete cancelled.\n")?,
        }

        return Ok(());
    }

    fn list(&mut self) -> Result {
        let accounts = self.ledger_service.list()?;

        self.prompter.say(&render::listing(&accounts))?;

        return Ok(());
    }

    fn ask_account_id(&mut self, question: &str) -> Result<AccountId> {
        let answer = self.prompter.ask(question)?;

        let id = answer
            .trim()
            .parse::<u32>()
            .map_err(|_| MenuError::InvalidAccountNumber(answer.clone()))?;

        return Ok(AccountId(id));
    }

    fn ask_amount(&mut self, question: &str) -> Result<Money> {
        let answer = self.prompter.ask(question)?;

        let amount = Money::parse(&answer).map_err(|_| MenuError::InvalidAmount(answer.clone()))?;

        return Ok(amount);
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        return self.prompter.into_output();
    }
}

fn is_end_of_input(e: &anyhow::Error) -> bool {
    return matches!(e.downcast_ref::<PromptError>(), Some(PromptError::EndOfInput));
}
