//! `extkit_build` v1:
//! Browser-extension build pipeline.
//!
//! - `conf`     : fixed layout constants
//! - `spec`     : layout/report/error models
//! - `pipeline` : manifest, hotreload and tree-copy steps
//! - `cli`      : `extkit` argument parsing and entry
//! - `log`      : tracing subscriber setup

pub mod cli;
pub mod conf;
pub mod log;
pub mod pipeline;
pub mod spec;

pub use cli::run;
pub use pipeline::{clear_hotreload, ensure_build_dir, prepare_manifest, run_build};
pub use spec::{BuildError, ReportBuild, SpecBuildLayout};
