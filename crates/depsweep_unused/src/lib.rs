//! Unused dependency detection for Deno-style `deps.ts` manifests.
//!
//! A project re-exports its external dependencies from a `deps.ts` at the
//! tree root and, optionally, a second one inside `test/` or `tests/`. This
//! crate parses those manifests into a symbol table, scans every other
//! source file for textual references to each symbol, and reports or
//! removes the declarations nothing references:
//! - Parsing declaration lines from manifests (three recognized shapes)
//! - Scanning the tree for symbol usage by substring search
//! - Reporting unused symbols as colorized warnings
//! - Rewriting manifests to delete unused declaration lines

mod checker;
mod config;
mod constants;
mod fmt;
mod parser;
mod reporter;
mod rewriter;
mod scanner;
mod types;

// Re-export public API
pub use checker::run_unused_check;
pub use config::{Config, find_test_directory};
pub use constants::{MANIFEST_FILE, SOURCE_EXTENSION, TEST_DIR_CANDIDATES};
pub use fmt::{DenoFmt, Formatter};
pub use parser::parse_manifest;
pub use reporter::{print_clean_message, print_unused};
pub use rewriter::{clean_manifests, rewrite_manifest};
pub use scanner::{ScanOutcome, scan_tree};
pub use types::{CheckResult, Declaration, LinePattern};
