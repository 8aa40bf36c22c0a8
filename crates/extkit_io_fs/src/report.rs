//! Copy report models and mutable report builder.

use std::fmt;

/// Aggregate counters for one `copy_tree` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportCopy {
    /// Total scanned directory/file entries.
    pub cnt_scanned: u64,
    /// Number of files written to the destination.
    pub cnt_copied: u64,
    /// Number of destination directories ensured (created, or already present).
    pub cnt_dirs: u64,
    /// Number of source entries skipped by exclude patterns or dry-run.
    pub cnt_skipped: u64,
    /// Bytes copied across all files.
    pub cnt_bytes: u64,
}

impl ReportCopy {
    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} scanned={} copied={} dirs={} skipped={} bytes={}",
            self.cnt_scanned,
            self.cnt_copied,
            self.cnt_dirs,
            self.cnt_skipped,
            self.cnt_bytes
        )
    }
}

impl fmt::Display for ReportCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COPY]"))
    }
}

/// Mutable accumulator for copy statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportCopyBuilder {
    report: ReportCopy,
}

impl ReportCopyBuilder {
    /// Increment scanned count by one.
    pub fn add_scanned(&mut self) {
        self.report.cnt_scanned += 1;
    }

    /// Record one copied file of `n_bytes`.
    pub fn add_copied(&mut self, n_bytes: u64) {
        self.report.cnt_copied += 1;
        self.report.cnt_bytes += n_bytes;
    }

    /// Increment ensured-directory count by one.
    pub fn add_dir(&mut self) {
        self.report.cnt_dirs += 1;
    }

    /// Increment skipped count by one.
    pub fn add_skipped(&mut self) {
        self.report.cnt_skipped += 1;
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportCopy {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportCopy, ReportCopyBuilder};

    #[test]
    fn report_copy_format_and_display() {
        let report = ReportCopy {
            cnt_scanned: 8,
            cnt_copied: 5,
            cnt_dirs: 2,
            cnt_skipped: 1,
            cnt_bytes: 42,
        };

        let txt = report.format("[COPY]");
        assert_eq!(txt, "[COPY] scanned=8 copied=5 dirs=2 skipped=1 bytes=42");
        assert_eq!(report.to_string(), txt);
    }

    #[test]
    fn builder_accumulates_bytes_per_copied_file() {
        let mut builder = ReportCopyBuilder::default();
        builder.add_scanned();
        builder.add_scanned();
        builder.add_copied(3);
        builder.add_copied(4);
        builder.add_dir();

        let report = builder.build();
        assert_eq!(report.cnt_scanned, 2);
        assert_eq!(report.cnt_copied, 2);
        assert_eq!(report.cnt_bytes, 7);
        assert_eq!(report.cnt_dirs, 1);
        assert_eq!(report.cnt_skipped, 0);
    }
}
