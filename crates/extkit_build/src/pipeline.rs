//! Sequential extension build steps.

use std::fs;
use std::path::{Path, PathBuf};

use extkit_io_fs::{SpecCopyOptions, copy_tree};

use crate::spec::{BuildError, ReportBuild, SpecBuildLayout};

/// Copy `manifest_v3.json` over `manifest.json` inside the source tree.
///
/// Fails with [`BuildError::ManifestMissing`] before touching anything when
/// the input manifest does not exist.
pub fn prepare_manifest(layout: &SpecBuildLayout) -> Result<(), BuildError> {
    tracing::info!("setting up Manifest V3");
    if !layout.path_file_manifest_src.is_file() {
        return Err(BuildError::ManifestMissing(
            layout.path_file_manifest_src.clone(),
        ));
    }

    fs::copy(
        &layout.path_file_manifest_src,
        &layout.path_file_manifest_dst,
    )
    .map_err(|e| BuildError::io("copy manifest to", &layout.path_file_manifest_dst, e))?;
    tracing::info!(
        path = %layout.path_file_manifest_dst.display(),
        "manifest V3 copied"
    );
    Ok(())
}

/// Truncate the hotreload script to zero bytes (created if absent).
pub fn clear_hotreload(layout: &SpecBuildLayout) -> Result<(), BuildError> {
    tracing::info!("clearing hotreload script");
    fs::write(&layout.path_file_hotreload, "")
        .map_err(|e| BuildError::io("clear hotreload script", &layout.path_file_hotreload, e))?;
    tracing::info!(path = %layout.path_file_hotreload.display(), "hotreload script cleared");
    Ok(())
}

/// Create the build output directory and any missing ancestors.
pub fn ensure_build_dir(layout: &SpecBuildLayout) -> Result<(), BuildError> {
    if layout.path_dir_build.is_dir() {
        return Ok(());
    }
    tracing::debug!(path = %layout.path_dir_build.display(), "creating build directory");
    fs::create_dir_all(&layout.path_dir_build)
        .map_err(|e| BuildError::io("create build directory", &layout.path_dir_build, e))
}

/// Run the whole build: manifest, hotreload, output directory, tree copy.
///
/// Steps run strictly in order and the first failure aborts the rest.
pub fn run_build(layout: &SpecBuildLayout) -> Result<ReportBuild, BuildError> {
    tracing::info!(root = %layout.path_dir_root.display(), "building Chrome extension");

    prepare_manifest(layout)?;
    clear_hotreload(layout)?;
    ensure_build_dir(layout)?;

    tracing::info!("copying source files to build directory");
    let spec_cp_options = SpecCopyOptions {
        patterns_exclude: Some(layout.patterns_exclude.clone()),
        ..SpecCopyOptions::default()
    };
    let report_copy = copy_tree(
        &layout.path_dir_source,
        &layout.path_dir_build,
        spec_cp_options,
    )?;

    let report_build = ReportBuild {
        path_file_manifest: derive_build_path(layout, &layout.path_file_manifest_dst),
        path_file_hotreload: derive_build_path(layout, &layout.path_file_hotreload),
        path_dir_build: layout.path_dir_build.clone(),
        report_copy,
    };
    tracing::info!(
        output = %report_build.path_dir_build.display(),
        files = report_build.report_copy.cnt_copied,
        "Chrome extension build completed"
    );
    Ok(report_build)
}

/// Map a path under the source tree to its copy under the build directory.
fn derive_build_path(layout: &SpecBuildLayout, path_src: &Path) -> PathBuf {
    layout.path_dir_build.join(
        path_src
            .strip_prefix(&layout.path_dir_source)
            .unwrap_or(path_src),
    )
}
