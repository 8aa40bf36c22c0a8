//! Command-line surface of the `extkit` binary.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};

use crate::conf::L_INSTALL_INSTRUCTIONS;
use crate::log::init_logging;
use crate::pipeline::run_build;
use crate::spec::{ReportBuild, SpecBuildLayout};

/// Build the Chrome extension: `src/` -> `build/chrome/`.
#[derive(Debug, Parser)]
#[command(name = "extkit", version, about)]
pub struct Cli {
    /// Project root holding `src/` (defaults to the current directory)
    #[arg(long = "root", value_hint = ValueHint::DirPath)]
    root: Option<PathBuf>,

    /// Build output directory (defaults to `<root>/build/chrome`)
    #[arg(long = "out", value_hint = ValueHint::DirPath)]
    out: Option<PathBuf>,

    /// Basename glob to keep out of the build output (repeatable)
    #[arg(long = "exclude", value_hint = ValueHint::Other)]
    exclude: Vec<String>,

    /// Log every copied file
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long = "quiet", action = ArgAction::SetTrue)]
    quiet: bool,
}

impl Cli {
    fn level_default(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Resolve the build layout from flags.
    pub fn to_layout(&self) -> Result<SpecBuildLayout> {
        let path_dir_root = match &self.root {
            Some(path) => path.clone(),
            None => env::current_dir().context("failed to resolve current directory")?,
        };

        let mut layout =
            SpecBuildLayout::from_root(path_dir_root).with_patterns_exclude(self.exclude.clone());
        if let Some(path_dir_build) = &self.out {
            layout = layout.with_build_dir(path_dir_build);
        }
        Ok(layout)
    }
}

/// Parse CLI args and run the build.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.level_default());

    let layout = cli.to_layout()?;
    let report_build = run_build(&layout)?;
    tracing::debug!("{report_build}");
    print_install_instructions(&report_build);
    Ok(())
}

fn print_install_instructions(report_build: &ReportBuild) {
    println!("Build output: {}", report_build.path_dir_build.display());
    println!();
    for line in L_INSTALL_INSTRUCTIONS {
        println!("{line}");
    }
    println!("   {}", report_build.path_dir_build.display());
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::Cli;

    #[test]
    fn cli_without_args_uses_current_dir() {
        let cli = Cli::try_parse_from(["extkit"]).expect("parse");
        let layout = cli.to_layout().expect("layout");
        let cwd = std::env::current_dir().expect("cwd");
        assert_eq!(layout.path_dir_root, cwd);
        assert_eq!(layout.path_dir_build, cwd.join("build").join("chrome"));
        assert_eq!(cli.level_default(), "info");
    }

    #[test]
    fn cli_overrides_root_out_and_excludes() {
        let cli = Cli::try_parse_from([
            "extkit",
            "--root",
            "/proj",
            "--out",
            "/dist/ext",
            "--exclude",
            "*.map",
            "--exclude",
            ".DS_Store",
            "-v",
        ])
        .expect("parse");
        let layout = cli.to_layout().expect("layout");
        assert_eq!(layout.path_dir_source, Path::new("/proj/src"));
        assert_eq!(layout.path_dir_build, Path::new("/dist/ext"));
        assert_eq!(layout.patterns_exclude, vec!["*.map", ".DS_Store"]);
        assert_eq!(cli.level_default(), "debug");
    }

    #[test]
    fn cli_rejects_verbose_with_quiet() {
        assert!(Cli::try_parse_from(["extkit", "-v", "-q"]).is_err());
    }
}
