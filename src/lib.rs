//! # ML Artifacts
#![forbid(unsafe_code)]

/// Parsed configuration documents
pub mod config;

/// Configuration and artifact I/O
pub mod io;

/// Utilities
pub mod utils;

pub use config::{ConfigDocument, ConfigError};
pub use io::{ArtifactError, ArtifactIo, DocumentFormat};
pub use utils::files::Size;
