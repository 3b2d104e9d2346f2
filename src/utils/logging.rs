use std::env;

use log::{LevelFilter, SetLoggerError};

/// The environment variable holding log filter directives
pub static FILTER_ENV: &str = "RUST_LOG";

/// Install `pretty_env_logger` as the process-wide logger. Call this once at process start;
/// filters come from `RUST_LOG` and default to `info` when it is unset. A second call returns
/// an error rather than replacing the installed logger.
pub fn init() -> Result<(), SetLoggerError> {
    let mut builder = pretty_env_logger::formatted_timed_builder();

    match env::var(FILTER_ENV) {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(LevelFilter::Info),
    };

    builder.try_init()
}
