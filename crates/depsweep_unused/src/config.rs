use clap::Parser;
use log::debug;
use std::path::{Path, PathBuf};

use crate::constants::TEST_DIR_CANDIDATES;

/// Command line configuration for the unused dependency check.
#[derive(Debug, Clone, Parser)]
#[command(name = "depsweep")]
#[command(version)]
#[command(about = "Report and remove unused deps.ts declarations", long_about = None)]
pub struct Config {
    /// Root directory of the project (defaults to the current directory)
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Delete the unused declaration lines from the manifests
    #[arg(long)]
    pub clean: bool,

    /// Format the tree with deno fmt before scanning
    #[arg(long)]
    pub fmt: bool,
}

/// Probes for the conventional test directory under `root`.
///
/// `test` is checked before `tests`. A missing test directory is not an
/// error, it only means there is no secondary manifest to analyze.
pub fn find_test_directory(root: &Path) -> Option<&'static str> {
    let found = TEST_DIR_CANDIDATES.iter().copied().find(|dir| root.join(dir).is_dir());
    match found {
        Some(dir) => debug!("Found test directory: {}", dir),
        None => debug!("No test directory under {}", root.display()),
    }
    found
}
