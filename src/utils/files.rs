use std::{fmt::Display, fs, path::Path};

use walkdir::WalkDir;

use crate::io::ArtifactError;

const KILOBYTE: f64 = 1024.0;
const MEGABYTE: f64 = 1024.0 * 1024.0;

/// The on-disk size of a file or a directory tree. Files are reported in kilobytes and
/// directories in megabytes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Size {
    /// A single regular file
    File {
        /// Size in bytes
        bytes: u64,
    },

    /// The sum of every regular file below a directory
    Directory {
        /// Size in bytes
        bytes: u64,
    },
}

impl Size {
    /// The raw size in bytes
    pub fn bytes(&self) -> u64 {
        match self {
            Size::File { bytes } | Size::Directory { bytes } => *bytes,
        }
    }

    /// The size in kilobytes (1 KB = 1024 bytes)
    pub fn kilobytes(&self) -> f64 {
        self.bytes() as f64 / KILOBYTE
    }

    /// The size in megabytes (1 MB = 1024 KB)
    pub fn megabytes(&self) -> f64 {
        self.bytes() as f64 / MEGABYTE
    }
}

impl Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Size::File { .. } => write!(f, "~ {:.2} KB", self.kilobytes()),
            Size::Directory { .. } => write!(f, "{:.2} MB", self.megabytes()),
        }
    }
}

/// Measure the file or directory at `path`. Symlinks inside a directory are not followed.
pub fn size_of(path: &Path) -> Result<Size, ArtifactError> {
    let metadata = fs::metadata(path).map_err(|e| ArtifactError::on_read(path, e))?;

    if !metadata.is_dir() {
        return Ok(Size::File {
            bytes: metadata.len(),
        });
    }

    let mut bytes = 0;

    for entry in WalkDir::new(path) {
        let entry = entry.map_err(|e| {
            let failed = e.path().unwrap_or(path).to_path_buf();
            ArtifactError::on_read(&failed, e.into())
        })?;

        if entry.file_type().is_file() {
            let metadata = entry
                .metadata()
                .map_err(|e| ArtifactError::on_read(entry.path(), e.into()))?;

            bytes += metadata.len();
        }
    }

    Ok(Size::Directory { bytes })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_is_zero_kilobytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.bin");
        fs::write(&path, b"").unwrap();

        let size = size_of(&path).unwrap();

        assert_eq!(size, Size::File { bytes: 0 });
        assert_eq!(size.to_string(), "~ 0.00 KB");
    }

    #[test]
    fn file_sizes_round_to_two_decimals() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.bin");
        fs::write(&path, vec![0u8; 12_636]).unwrap();

        assert_eq!(size_of(&path).unwrap().to_string(), "~ 12.34 KB");
    }

    #[test]
    fn directories_sum_nested_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("top.bin"), vec![0u8; 1_048_576]).unwrap();
        fs::write(nested.join("deep.bin"), vec![0u8; 2_244_608]).unwrap();

        let size = size_of(dir.path()).unwrap();

        assert_eq!(size, Size::Directory { bytes: 3_293_184 });
        assert_eq!(size.to_string(), "3.14 MB");
    }

    #[cfg(unix)]
    #[test]
    fn walk_errors_name_the_failing_entry() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let locked = dir.path().join("checkpoints/locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(locked.join("weights.bin"), b"weights").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the directory, so there is nothing to observe
        let unreadable = fs::read_dir(&locked).is_err();
        let result = size_of(dir.path());

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if unreadable {
            assert!(matches!(result, Err(ArtifactError::Io { path, .. }) if path == locked));
        }
    }

    #[test]
    fn missing_paths_are_not_found() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nothing");

        assert!(matches!(size_of(&path), Err(ArtifactError::NotFound(p)) if p == path));
    }
}
