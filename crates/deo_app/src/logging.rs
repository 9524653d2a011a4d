//! Logger setup for both targets.
//!
//! Native builds print `[LEVEL target] message` lines to stdout through
//! `fern`; the browser build forwards records to the devtools console and
//! installs the panic hook so panics show a readable message there.
//! Calling `init` twice is an error from the `log` crate, not a panic.

use log::{LevelFilter, SetLoggerError};

#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()
}

#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    console_error_panic_hook::set_once();
    match level.to_level() {
        Some(level) => console_log::init_with_level(level),
        None => Ok(()),
    }
}
