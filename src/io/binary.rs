//! # Binary Artifacts
//!
//! Models, encoders and other non-text artifacts are persisted with `bincode`. The format is
//! opaque and carries no type information, so an artifact must be loaded as the same type it was
//! saved as. Self-describing values such as `serde_json::Value` can be saved but not loaded back;
//! use the JSON helpers for those.

use std::{fs, path::Path};

use bincode::Options;
use log::info;
use serde::{de::DeserializeOwned, Serialize};

use super::{ArtifactError, ArtifactIo};

impl ArtifactIo {
    /// Save an artifact to `path`, replacing any existing file. The artifact is encoded in memory
    /// first, so nothing is written when encoding fails.
    pub fn save_binary<T, P>(&self, path: P, artifact: &T) -> Result<(), ArtifactError>
    where
        T: Serialize + ?Sized,
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        let encoded = bincode::serialize(artifact).map_err(|e| ArtifactError::Serialization {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        fs::write(path, encoded).map_err(|e| ArtifactError::on_write(path, e))?;

        info!(target: self.target(), "binary file saved at: {}", path.display());

        Ok(())
    }

    /// Load an artifact previously written by `save_binary`. The file must decode to exactly one
    /// `T`, with no bytes left over.
    pub fn load_binary<T, P>(&self, path: P) -> Result<T, ArtifactError>
    where
        T: DeserializeOwned,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| ArtifactError::on_read(path, e))?;

        let artifact = bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .reject_trailing_bytes()
            .deserialize(&bytes)
            .map_err(|source| ArtifactError::CorruptData {
                path: path.to_path_buf(),
                source,
            })?;

        info!(target: self.target(), "binary file loaded from: {}", path.display());

        Ok(artifact)
    }
}
