//! Filesystem tree traversal and copy orchestration.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::report::{ReportCopy, ReportCopyBuilder};
use crate::spec::{CopyTreeError, EnumCopyEntryKind, SpecCopyOptions};
use crate::util::{SpecCopyPatterns, copy_file_with_metadata, is_overlap};

#[derive(Debug, Clone)]
struct SpecDirEntry {
    path_src: PathBuf,
    name_entry: OsString,
    kind_entry: EnumCopyEntryKind,
}

/// One pending directory pair on the traversal stack.
#[derive(Debug, Clone)]
struct SpecCopyTaskDir {
    path_dir_src: PathBuf,
    path_dir_dst: PathBuf,
}

#[derive(Debug)]
struct SpecCopyContext {
    spec_cp_options: SpecCopyOptions,
    spec_cp_pats: SpecCopyPatterns,
    builder_cp_report: ReportCopyBuilder,
    l_tasks_dir: Vec<SpecCopyTaskDir>,
}

/// Copy a directory tree from `dir_source` onto `dir_destination`.
///
/// This is an overlay copy: the destination (and missing ancestors) is
/// created if absent, every source file overwrites the same-named destination
/// file, every source subdirectory is created (even when empty), and nothing
/// already in the destination is deleted.
///
/// The walk is iterative over an owned stack of `(source, destination)`
/// directory pairs. Entries of one directory are handled in name order.
///
/// The first filesystem failure aborts the run with [`CopyTreeError::Io`];
/// the destination may be left partially populated.
pub fn copy_tree<P, Q>(
    dir_source: P,
    dir_destination: Q,
    spec_cp_options: SpecCopyOptions,
) -> Result<ReportCopy, CopyTreeError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let path_dir_src = dir_source.as_ref().to_path_buf();
    let path_dir_dst = dir_destination.as_ref().to_path_buf();

    if !path_dir_src.is_dir() {
        return Err(CopyTreeError::SourceNotDirectory(path_dir_src));
    }
    if is_overlap(&path_dir_src, &path_dir_dst) {
        return Err(CopyTreeError::SourceDestinationOverlap {
            source_dir: path_dir_src,
            destination: path_dir_dst,
        });
    }
    let spec_cp_pats = SpecCopyPatterns::from_raw(spec_cp_options.patterns_exclude.as_deref())?;

    let mut spec_cp_ctx = SpecCopyContext {
        spec_cp_options,
        spec_cp_pats,
        builder_cp_report: ReportCopyBuilder::default(),
        l_tasks_dir: Vec::new(),
    };

    ensure_destination_dir(&path_dir_dst, &mut spec_cp_ctx)?;
    spec_cp_ctx.l_tasks_dir.push(SpecCopyTaskDir {
        path_dir_src,
        path_dir_dst,
    });

    while let Some(spec_task) = spec_cp_ctx.l_tasks_dir.pop() {
        walk_directory(spec_task, &mut spec_cp_ctx)?;
    }

    let report = spec_cp_ctx.builder_cp_report.build();
    tracing::info!(
        scanned = report.cnt_scanned,
        copied = report.cnt_copied,
        dirs = report.cnt_dirs,
        skipped = report.cnt_skipped,
        bytes = report.cnt_bytes,
        dry_run = spec_cp_ctx.spec_cp_options.if_dry_run,
        "tree copy finished"
    );
    Ok(report)
}

fn ensure_destination_dir(
    path_dir_dst: &Path,
    spec_cp_ctx: &mut SpecCopyContext,
) -> Result<(), CopyTreeError> {
    if spec_cp_ctx.spec_cp_options.if_dry_run {
        return Ok(());
    }
    if !path_dir_dst.is_dir() {
        tracing::debug!(path = %path_dir_dst.display(), "creating directory");
    }
    fs::create_dir_all(path_dir_dst).map_err(|e| CopyTreeError::io(path_dir_dst, e))?;
    spec_cp_ctx.builder_cp_report.add_dir();
    Ok(())
}

fn read_entries(path_dir_src: &Path) -> Result<Vec<SpecDirEntry>, CopyTreeError> {
    let iter_entries =
        fs::read_dir(path_dir_src).map_err(|e| CopyTreeError::io(path_dir_src, e))?;

    let mut l_entries = Vec::new();
    for entry_res in iter_entries {
        let entry = entry_res.map_err(|e| CopyTreeError::io(path_dir_src, e))?;
        let path_src = entry.path();
        let cfg_file_type = entry
            .file_type()
            .map_err(|e| CopyTreeError::io(&path_src, e))?;
        l_entries.push(SpecDirEntry {
            name_entry: entry.file_name(),
            kind_entry: EnumCopyEntryKind::from_file_type(cfg_file_type),
            path_src,
        });
    }
    l_entries.sort_by(|a, b| a.name_entry.cmp(&b.name_entry));
    Ok(l_entries)
}

fn walk_directory(
    spec_task: SpecCopyTaskDir,
    spec_cp_ctx: &mut SpecCopyContext,
) -> Result<(), CopyTreeError> {
    let l_entries = read_entries(&spec_task.path_dir_src)?;

    let mut l_tasks_sub = Vec::new();
    for spec_entry in l_entries {
        spec_cp_ctx.builder_cp_report.add_scanned();

        if spec_cp_ctx.spec_cp_pats.is_excluded(&spec_entry.name_entry) {
            tracing::debug!(path = %spec_entry.path_src.display(), "excluded by pattern");
            spec_cp_ctx.builder_cp_report.add_skipped();
            continue;
        }

        let path_dst = spec_task.path_dir_dst.join(&spec_entry.name_entry);
        match spec_entry.kind_entry {
            EnumCopyEntryKind::Directory => {
                if spec_cp_ctx.spec_cp_options.if_dry_run {
                    spec_cp_ctx.builder_cp_report.add_skipped();
                }
                ensure_destination_dir(&path_dst, spec_cp_ctx)?;
                l_tasks_sub.push(SpecCopyTaskDir {
                    path_dir_src: spec_entry.path_src,
                    path_dir_dst: path_dst,
                });
            }
            EnumCopyEntryKind::File => {
                handle_file_entry(&spec_entry.path_src, &path_dst, spec_cp_ctx)?;
            }
        }
    }
    // Reversed so the stack pops subdirectories in name order.
    spec_cp_ctx.l_tasks_dir.extend(l_tasks_sub.into_iter().rev());
    Ok(())
}

fn handle_file_entry(
    path_file_src: &Path,
    path_file_dst: &Path,
    spec_cp_ctx: &mut SpecCopyContext,
) -> Result<(), CopyTreeError> {
    if spec_cp_ctx.spec_cp_options.if_dry_run {
        tracing::debug!(
            src = %path_file_src.display(),
            dst = %path_file_dst.display(),
            "dry-run: would copy file"
        );
        spec_cp_ctx.builder_cp_report.add_skipped();
        return Ok(());
    }

    let n_bytes = copy_file_with_metadata(
        path_file_src,
        path_file_dst,
        spec_cp_ctx.spec_cp_options.if_preserve_metadata,
    )
    .map_err(|e| CopyTreeError::CopyFile {
        path_src: path_file_src.to_path_buf(),
        path_dst: path_file_dst.to_path_buf(),
        source: e,
    })?;
    tracing::debug!(
        src = %path_file_src.display(),
        dst = %path_file_dst.display(),
        bytes = n_bytes,
        "copied file"
    );
    spec_cp_ctx.builder_cp_report.add_copied(n_bytes);
    Ok(())
}
