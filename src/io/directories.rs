use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;

use super::{ArtifactError, ArtifactIo};
use crate::utils::files;

impl ArtifactIo {
    /// Create each directory along with any missing ancestors, in order. Directories that already
    /// exist, and empty paths, are left untouched. Returns the directories that were actually created.
    ///
    /// There is no rollback: if creating one path fails, the directories created before it remain.
    pub fn ensure_directories<P: AsRef<Path>>(
        &self,
        paths: &[P],
        verbose: bool,
    ) -> Result<Vec<PathBuf>, ArtifactError> {
        let mut created = Vec::new();

        for path in paths {
            let path = path.as_ref();

            if path.as_os_str().is_empty() || path.is_dir() {
                continue;
            }

            fs::create_dir_all(path).map_err(|e| ArtifactError::on_write(path, e))?;

            if verbose {
                info!(target: self.target(), "created directory at: {}", path.display());
            }

            created.push(path.to_path_buf());
        }

        Ok(created)
    }

    /// Report the human-readable size of a file (in KB) or a directory tree (in MB)
    pub fn get_size<P: AsRef<Path>>(&self, path: P) -> Result<String, ArtifactError> {
        let path = path.as_ref();
        let size = files::size_of(path)?.to_string();

        info!(target: self.target(), "size of {}: {}", path.display(), size);

        Ok(size)
    }
}
