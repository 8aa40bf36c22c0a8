//! Build layout, report and error models.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use extkit_io_fs::{CopyTreeError, ReportCopy};
use thiserror::Error;

use crate::conf::{
    C_DIR_SOURCE, C_FILE_MANIFEST, C_FILE_MANIFEST_V3, TUP_DIR_BUILD, TUP_FILE_HOTRELOAD,
};

////////////////////////////////////////////////////////////////////////////////
// #region Layout

/// Resolved paths for one build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecBuildLayout {
    /// Project root every default path hangs off.
    pub path_dir_root: PathBuf,
    /// Extension source tree (read, and patched in place for the manifest/hotreload steps).
    pub path_dir_source: PathBuf,
    /// Build output directory.
    pub path_dir_build: PathBuf,
    /// Manifest V3 input file.
    pub path_file_manifest_src: PathBuf,
    /// Manifest written next to the sources.
    pub path_file_manifest_dst: PathBuf,
    /// Hotreload script blanked for production.
    pub path_file_hotreload: PathBuf,
    /// Basename globs kept out of the build output.
    pub patterns_exclude: Vec<String>,
}

impl SpecBuildLayout {
    /// Default layout under `dir_root`: `src/` copied to `build/chrome/`.
    pub fn from_root(dir_root: impl AsRef<Path>) -> Self {
        let path_dir_root = dir_root.as_ref().to_path_buf();
        let path_dir_source = path_dir_root.join(C_DIR_SOURCE);
        let path_dir_build = TUP_DIR_BUILD
            .iter()
            .fold(path_dir_root.clone(), |acc, part| acc.join(part));
        let path_file_hotreload = TUP_FILE_HOTRELOAD
            .iter()
            .fold(path_dir_source.clone(), |acc, part| acc.join(part));

        Self {
            path_file_manifest_src: path_dir_source.join(C_FILE_MANIFEST_V3),
            path_file_manifest_dst: path_dir_source.join(C_FILE_MANIFEST),
            path_file_hotreload,
            path_dir_build,
            path_dir_source,
            path_dir_root,
            patterns_exclude: Vec::new(),
        }
    }

    /// Replace the build output directory.
    pub fn with_build_dir(mut self, dir_build: impl AsRef<Path>) -> Self {
        self.path_dir_build = dir_build.as_ref().to_path_buf();
        self
    }

    /// Replace the exclude patterns forwarded to the tree copy.
    pub fn with_patterns_exclude(mut self, patterns_exclude: Vec<String>) -> Self {
        self.patterns_exclude = patterns_exclude;
        self
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportAndErrors

/// Outcome of a successful build.
#[derive(Debug, Clone)]
pub struct ReportBuild {
    /// Manifest file in the build output.
    pub path_file_manifest: PathBuf,
    /// Blanked hotreload script in the build output.
    pub path_file_hotreload: PathBuf,
    /// Build output directory.
    pub path_dir_build: PathBuf,
    /// Tree copy counters.
    pub report_copy: ReportCopy,
}

impl fmt::Display for ReportBuild {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[BUILD] output={} {}",
            self.path_dir_build.display(),
            self.report_copy.format("copy")
        )
    }
}

/// Any failure that stops the build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The manifest V3 input is absent; nothing has been touched.
    #[error("{} not found in source directory", .0.display())]
    ManifestMissing(PathBuf),
    /// Filesystem failure outside the tree copy.
    #[error("{action} {}: {source}", path.display())]
    Io {
        /// Short description of the failed step.
        action: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Tree copy failed.
    #[error(transparent)]
    CopyTree(#[from] CopyTreeError),
}

impl BuildError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
