use std::{
    fmt::Display,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use derive_new::new;

/// YAML configuration files
pub mod yaml;

/// JSON documents
pub mod json;

/// Opaque binary artifacts
pub mod binary;

/// Directory creation and size reporting
pub mod directories;

/// The default log target for artifact operations
pub static DEFAULT_TARGET: &str = "ml_artifacts";

/// Reads and writes configuration files and artifacts, logging each successful operation under
/// the injected log target. Holds no other state, so it can be cloned freely and shared across
/// threads.
#[derive(Clone, Debug, new)]
pub struct ArtifactIo {
    /// The log target that operation records are emitted under
    target: String,
}

impl ArtifactIo {
    /// The log target used by this instance
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for ArtifactIo {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET.to_string())
    }
}

/// The text formats a ConfigDocument can be parsed from
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DocumentFormat {
    /// YAML configuration
    Yaml,

    /// JSON documents
    Json,
}

impl Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DocumentFormat::Yaml => "yaml",
            DocumentFormat::Json => "json",
        };

        write!(f, "{}", name)
    }
}

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Artifact I/O Error
#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    /// Nothing exists at the path being read
    #[error("no file found at {}", .0.display())]
    NotFound(PathBuf),

    /// The file does not conform to its expected format
    #[error("unable to parse {format} document at {}: {source}", .path.display())]
    Parse {
        /// The file being parsed
        path: PathBuf,

        /// The expected format
        format: DocumentFormat,

        /// The underlying parser error
        #[source]
        source: BoxError,
    },

    /// The YAML document is null or an empty mapping
    #[error("yaml document at {} is empty", .0.display())]
    EmptyDocument(PathBuf),

    /// The value could not be encoded
    #[error("unable to serialize value for {}: {source}", .path.display())]
    Serialization {
        /// The destination file
        path: PathBuf,

        /// The underlying encoder error
        #[source]
        source: BoxError,
    },

    /// The binary file could not be decoded
    #[error("corrupt artifact at {}: {source}", .path.display())]
    CorruptData {
        /// The artifact file
        path: PathBuf,

        /// The underlying decoder error
        #[source]
        source: bincode::Error,
    },

    /// Any other filesystem error, unchanged
    #[error("i/o error at {}: {source}", .path.display())]
    Io {
        /// The path being accessed
        path: PathBuf,

        /// The platform error
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    /// Classify an error raised while reading `path`
    pub(crate) fn on_read(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == ErrorKind::NotFound {
            ArtifactError::NotFound(path.to_path_buf())
        } else {
            Self::on_write(path, source)
        }
    }

    /// Wrap an error raised while writing `path`
    pub(crate) fn on_write(path: &Path, source: std::io::Error) -> Self {
        ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn parse(path: &Path, format: DocumentFormat, source: impl Into<BoxError>) -> Self {
        ArtifactError::Parse {
            path: path.to_path_buf(),
            format,
            source: source.into(),
        }
    }
}
