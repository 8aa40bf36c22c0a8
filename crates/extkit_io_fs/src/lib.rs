//! `extkit_io_fs` v1:
//! Overlay tree copier used by the extension build pipeline.
//!
//! Modules:
//! - `copy`   : traversal and copy orchestration
//! - `spec`   : enums/options/errors
//! - `report` : run-time report model
//! - `util`   : shared helper functions

pub mod copy;
pub mod report;
pub mod spec;
mod util;

pub use copy::copy_tree;
pub use report::{ReportCopy, ReportCopyBuilder};
pub use spec::{CopyTreeError, EnumCopyEntryKind, SpecCopyOptions};
