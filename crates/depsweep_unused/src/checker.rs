use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;

use crate::{
    config::{Config, find_test_directory},
    constants::MANIFEST_FILE,
    fmt::Formatter,
    parser::parse_manifest,
    scanner::scan_tree,
    types::CheckResult,
};

/// Runs the full pipeline: optional format pass, manifest parsing, tree
/// scan, and usage marking.
///
/// The main manifest must exist at the root; its read error aborts the run.
/// A secondary manifest is only looked for when a conventional test
/// directory is present. The formatter, when given, completes before any
/// file is parsed or scanned.
pub fn run_unused_check(cfg: &Config, formatter: Option<&dyn Formatter>) -> Result<CheckResult> {
    info!("Starting unused dependency check in {}", cfg.root.display());

    if let Some(formatter) = formatter {
        formatter.format_tree(&cfg.root)?;
    }

    let main_path = cfg.root.join(MANIFEST_FILE);
    debug!("Reading main manifest at {}", main_path.display());
    let main_text = fs::read_to_string(&main_path)
        .with_context(|| format!("Failed to read {}", main_path.display()))?;
    let mut declarations = parse_manifest(&main_text, MANIFEST_FILE);
    info!("Parsed {} declarations from {}", declarations.len(), MANIFEST_FILE);

    if let Some(test_dir) = find_test_directory(&cfg.root) {
        let origin = format!("{}/{}", test_dir, MANIFEST_FILE);
        let test_path = cfg.root.join(&origin);
        debug!("Reading test manifest at {}", test_path.display());
        let test_text = fs::read_to_string(&test_path)
            .with_context(|| format!("Failed to read {}", test_path.display()))?;
        let test_declarations = parse_manifest(&test_text, &origin);
        info!("Parsed {} declarations from {}", test_declarations.len(), origin);
        declarations.extend(test_declarations);
    }

    let outcome = scan_tree(&cfg.root, &declarations)?;
    for declaration in &mut declarations {
        if outcome.used.contains(&declaration.name) {
            declaration.used = true;
        }
    }

    let unused = declarations.iter().filter(|d| !d.used).count();
    info!(
        "Check complete: {} of {} declarations unused ({} files scanned)",
        unused,
        declarations.len(),
        outcome.files_scanned
    );

    Ok(CheckResult { declarations, files_scanned: outcome.files_scanned })
}
