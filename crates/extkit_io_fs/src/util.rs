use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::spec::CopyTreeError;

////////////////////////////////////////////////////////////////////////////////
// #region PatternMatching

/// Compiled exclude patterns; `None` means nothing is excluded.
#[derive(Debug, Clone, Default)]
pub(crate) struct SpecCopyPatterns {
    pub(crate) patterns_exclude: Option<GlobSet>,
}

impl SpecCopyPatterns {
    pub(crate) fn from_raw(patterns_exclude: Option<&[String]>) -> Result<Self, CopyTreeError> {
        Ok(Self {
            patterns_exclude: _compile(patterns_exclude)?,
        })
    }

    pub(crate) fn is_excluded(&self, name: &OsStr) -> bool {
        self.patterns_exclude
            .as_ref()
            .is_some_and(|set_glob| set_glob.is_match(Path::new(name)))
    }
}

fn _compile(patterns: Option<&[String]>) -> Result<Option<GlobSet>, CopyTreeError> {
    let Some(patterns) = patterns else {
        return Ok(None);
    };
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder_glob = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| CopyTreeError::InvalidPattern(e.to_string()))?;
        builder_glob.add(glob);
    }
    let set_glob = builder_glob
        .build()
        .map_err(|e| CopyTreeError::InvalidPattern(e.to_string()))?;
    Ok(Some(set_glob))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region PathUtilities

fn _absolutize_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(path)
}

/// Canonicalize the longest existing ancestor and re-attach the missing tail.
fn _normalize_path(path: &Path) -> PathBuf {
    let path_abs = _absolutize_path(path);
    let mut path_cursor = path_abs.as_path();
    let mut l_tail = Vec::new();
    loop {
        if let Ok(resolved) = fs::canonicalize(path_cursor) {
            return l_tail
                .iter()
                .rev()
                .fold(resolved, |acc: PathBuf, part| acc.join(part));
        }
        match (path_cursor.parent(), path_cursor.file_name()) {
            (Some(parent), Some(name)) => {
                l_tail.push(name.to_os_string());
                path_cursor = parent;
            }
            _ => return path_abs,
        }
    }
}

/// `dst` equals `src` or lies inside it; the walk would re-enter its own output.
pub(crate) fn is_overlap(src: &Path, dst: &Path) -> bool {
    let src_resolved = _normalize_path(src);
    let dst_resolved = _normalize_path(dst);
    dst_resolved.starts_with(&src_resolved)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FileCopy

/// Copy file bytes (overwriting `path_file_dst`) and return the byte count.
pub(crate) fn copy_file_with_metadata(
    path_file_src: &Path,
    path_file_dst: &Path,
    if_preserve_metadata: bool,
) -> Result<u64, io::Error> {
    let n_bytes = fs::copy(path_file_src, path_file_dst)?;
    if if_preserve_metadata {
        apply_metadata(path_file_src, path_file_dst)?;
    }
    Ok(n_bytes)
}

fn apply_metadata(path_file_src: &Path, path_file_dst: &Path) -> Result<(), io::Error> {
    use filetime::{FileTime, set_file_times};

    let stat_src = fs::metadata(path_file_src)?;
    fs::set_permissions(path_file_dst, stat_src.permissions())?;

    let file_time_access = FileTime::from_last_access_time(&stat_src);
    let file_time_modify = FileTime::from_last_modification_time(&stat_src);
    set_file_times(path_file_dst, file_time_access, file_time_modify)?;

    #[cfg(target_os = "linux")]
    copy_xattrs_linux(path_file_src, path_file_dst);
    Ok(())
}

// Best effort: filesystems without user xattrs are common (tmpfs, overlayfs).
#[cfg(target_os = "linux")]
fn copy_xattrs_linux(path_file_src: &Path, path_file_dst: &Path) {
    let Ok(iter_xattr_names) = xattr::list(path_file_src) else {
        return;
    };

    for name in iter_xattr_names {
        let Some(raw_value) = xattr::get(path_file_src, &name).ok().flatten() else {
            continue;
        };
        if let Err(e) = xattr::set(path_file_dst, &name, &raw_value) {
            tracing::debug!(
                path = %path_file_dst.display(),
                error = %e,
                "skipping extended attribute"
            );
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::{SpecCopyPatterns, is_overlap};

    #[test]
    fn exclude_patterns_match_basenames() {
        let patterns = vec!["*.map".to_string(), ".DS_Store".to_string()];
        let spec_cp_pats = SpecCopyPatterns::from_raw(Some(&patterns)).expect("compile");
        assert!(spec_cp_pats.is_excluded(OsStr::new("app.js.map")));
        assert!(spec_cp_pats.is_excluded(OsStr::new(".DS_Store")));
        assert!(!spec_cp_pats.is_excluded(OsStr::new("app.js")));
    }

    #[test]
    fn empty_pattern_list_excludes_nothing() {
        let spec_cp_pats = SpecCopyPatterns::from_raw(Some(&[])).expect("compile");
        assert!(spec_cp_pats.patterns_exclude.is_none());
        assert!(!spec_cp_pats.is_excluded(OsStr::new("anything")));
    }

    #[test]
    fn overlap_only_flags_destination_inside_source() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let src = tmp.path().join("src");
        std::fs::create_dir_all(&src).expect("mkdir");

        assert!(is_overlap(&src, &src.join("out")));
        assert!(is_overlap(&src, &src));
        assert!(!is_overlap(&src, tmp.path()));
        assert!(!is_overlap(&src, &tmp.path().join("build/chrome")));
    }
}
