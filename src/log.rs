//! One logger setup for the CLI binaries and the browser build.

/// Environment variable that turns on debug logging in the CLI tools.
pub const DEBUG_ENV_VAR: &str = "WORDBRAIN_DEBUG";

/// Install the process-wide logger.
///
/// Native builds log through `env_logger` to stderr, bare messages only (no timestamp,
/// module path or target). A `RUST_LOG` filter, when set, wins over `debug_enabled`.
/// The wasm32 build logs to the browser console via `console_log`.
///
/// Only the first call has any effect.
pub fn init_logger(debug_enabled: bool) {
    #[cfg(not(target_arch = "wasm32"))]
    init_native(debug_enabled);

    #[cfg(target_arch = "wasm32")]
    init_console(debug_enabled);
}

#[cfg(not(target_arch = "wasm32"))]
fn init_native(debug_enabled: bool) {
    let default_filter = if debug_enabled { log::LevelFilter::Debug } else { log::LevelFilter::Info };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(default_filter)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if builder.try_init().is_ok() {
        log::debug!("logging to stderr (default filter {default_filter})");
    }
}

#[cfg(target_arch = "wasm32")]
fn init_console(debug_enabled: bool) {
    let level = if debug_enabled { log::Level::Debug } else { log::Level::Info };

    if let Err(e) = console_log::init_with_level(level) {
        // no logger: report once on the raw console and carry on
        web_sys::console::error_1(&format!("wordbrain: console logger unavailable ({e})").into());
    } else {
        log::info!("logging to the browser console at {level}");
    }
}

/// True when the debug environment variable is set (to anything).
#[must_use]
pub fn debug_requested() -> bool {
    std::env::var_os(DEBUG_ENV_VAR).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_twice_does_not_panic() {
        init_logger(true);
        init_logger(false);
        log::debug!("still logging");
    }

    #[test]
    fn test_debug_env_var_name() {
        assert_eq!(DEBUG_ENV_VAR, "WORDBRAIN_DEBUG");
    }
}
