/// The ConfigDocument mapping
pub mod document;

pub use document::{ConfigDocument, ConfigError};
