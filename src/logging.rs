//! Logger initialisation.
//!
//! Desktop builds log to stderr through `fern` with a local timestamp. Browser builds log to
//! the developer console and route panics there too.

use log::LevelFilter;

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    log::debug!("logging initialized at {level}");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    console_error_panic_hook::set_once();
    match level.to_level() {
        Some(level) => console_log::init_with_level(level),
        None => Ok(()),
    }
}
