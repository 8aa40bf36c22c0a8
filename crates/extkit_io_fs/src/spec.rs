//! Copy specification models and top-level error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Kind of one source directory entry.
///
/// Only two variants exist: anything that is not a directory is copied as a
/// file (links are read through by the byte copy).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumCopyEntryKind {
    /// Recurse into the entry.
    Directory,
    /// Copy the entry bytes.
    File,
}

impl EnumCopyEntryKind {
    /// Classify a `std::fs::FileType`.
    pub fn from_file_type(file_type: std::fs::FileType) -> Self {
        if file_type.is_dir() {
            Self::Directory
        } else {
            Self::File
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StructsAndErrors

/// Input options for `copy_tree`.
///
/// The default is a plain overlay copy: every entry copied, existing files
/// overwritten, nothing deleted.
#[derive(Debug, Clone)]
pub struct SpecCopyOptions {
    /// Glob patterns applied to entry basename; matching entries are skipped.
    pub patterns_exclude: Option<Vec<String>>,
    /// Copy permissions, timestamps and xattrs after the byte copy.
    pub if_preserve_metadata: bool,
    /// Do not mutate filesystem; record what would happen.
    pub if_dry_run: bool,
}

impl Default for SpecCopyOptions {
    fn default() -> Self {
        Self {
            patterns_exclude: None,
            if_preserve_metadata: true,
            if_dry_run: false,
        }
    }
}

/// Errors that abort a `copy_tree` run.
#[derive(Debug, Error)]
pub enum CopyTreeError {
    /// Invalid exclude pattern.
    #[error("Invalid pattern in exclude list: {0}")]
    InvalidPattern(String),
    /// Source path is missing or not a directory.
    #[error("Source is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),
    /// Destination equals the source or lies inside it.
    #[error(
        "Source and destination directories overlap: {} <-> {}",
        source_dir.display(),
        destination.display()
    )]
    SourceDestinationOverlap {
        /// Source directory as given.
        source_dir: PathBuf,
        /// Destination directory as given.
        destination: PathBuf,
    },
    /// Copying one file failed (read side or write side).
    #[error("Failed to copy {} -> {}: {source}", path_src.display(), path_dst.display())]
    CopyFile {
        /// Source file.
        path_src: PathBuf,
        /// Destination file.
        path_dst: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Filesystem failure on one path; the run stops here.
    #[error("{}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}

impl CopyTreeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::EnumCopyEntryKind;

    #[test]
    fn entry_kind_classifies_dirs_and_files() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(tmp.path().join("d")).expect("mkdir");
        std::fs::write(tmp.path().join("f.txt"), "x").expect("write");

        let ft_dir = std::fs::metadata(tmp.path().join("d"))
            .expect("meta dir")
            .file_type();
        let ft_file = std::fs::metadata(tmp.path().join("f.txt"))
            .expect("meta file")
            .file_type();
        assert_eq!(
            EnumCopyEntryKind::from_file_type(ft_dir),
            EnumCopyEntryKind::Directory
        );
        assert_eq!(
            EnumCopyEntryKind::from_file_type(ft_file),
            EnumCopyEntryKind::File
        );
    }
}
