use bankbook::Result;

use log::LevelFilter;
use simple_logger::SimpleLogger;

const DEFAULT_LEVEL: LevelFilter = LevelFilter::Warn;

/// Logs go to stderr so they never interleave with the menu on stdout.
/// `RUST_LOG` overrides the default level.
pub fn configure_app() -> Result {
    SimpleLogger::new().with_level(DEFAULT_LEVEL).env().init()?;

    log::debug!("Logger configured, max level: {}", log::max_level());

    return Ok(());
}
