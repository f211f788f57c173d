use anyhow::{Context, Result};
use ignore::WalkBuilder;
use log::{debug, trace};
use std::{collections::HashSet, fs, path::Path};

use crate::{
    constants::{MANIFEST_FILE, SOURCE_EXTENSION},
    types::Declaration,
};

/// Usage evidence accumulated by one walk over the source tree.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Names witnessed in at least one scanned file.
    pub used: HashSet<String>,
    /// Number of files whose content was searched.
    pub files_scanned: usize,
}

/// True when a filename names a file the scanner should read.
///
/// Manifest files are always excluded so a declaration's own line never
/// counts as its usage.
pub(crate) fn is_scan_target(file_name: &str) -> bool {
    file_name.contains(SOURCE_EXTENSION) && !file_name.contains(MANIFEST_FILE)
}

/// Searches every source file under `root` for each declaration's name.
///
/// The walk is exhaustive: hidden files are visited and ignore files are
/// not honored, since usage anywhere in the tree keeps a declaration alive.
/// Matching is plain substring containment, case-sensitive and without word
/// boundaries, so a name occurring inside a longer identifier counts. File
/// content is decoded lossily; non-UTF-8 bytes cannot abort the scan.
pub fn scan_tree(root: &Path, declarations: &[Declaration]) -> Result<ScanOutcome> {
    debug!("Scanning {} for {} declared names", root.display(), declarations.len());
    let mut outcome = ScanOutcome::default();

    let walker = WalkBuilder::new(root).standard_filters(false).build();
    for entry in walker {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !is_scan_target(file_name) {
            trace!("Skipping {}", path.display());
            continue;
        }

        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let text = String::from_utf8_lossy(&bytes);
        outcome.files_scanned += 1;

        for declaration in declarations {
            if outcome.used.contains(&declaration.name) {
                continue;
            }
            if text.contains(&declaration.name) {
                trace!("\"{}\" is used in {}", declaration.name, path.display());
                outcome.used.insert(declaration.name.clone());
            }
        }
    }

    debug!("Scanned {} files, {} names in use", outcome.files_scanned, outcome.used.len());
    Ok(outcome)
}
