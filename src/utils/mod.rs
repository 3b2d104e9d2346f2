/// File utilities
pub mod files;

/// Logging setup
pub mod logging;
