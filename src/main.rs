mod args;
mod config;
mod menu;
mod prompt;

use bankbook::Result;

use std::io;

fn main() -> Result {
    config::configure_app()?;

    let store_path = args::parse_store_arg()?;
    log::debug!("Using account file: {store_path:?}");

    let ledger_service = bankbook::build_ledger_service(store_path);

    let stdin = io::stdin();
    let stdout = io::stdout();

    menu::Menu::new(ledger_service, stdin.lock(), stdout.lock()).run()?;

    log::debug!("Session finished");

    Ok(())
}
