//! Fixed filename markers for manifest and source detection.
//!
//! Detection is purely name-based: a file is a scan target when its name
//! contains the source extension marker and does not contain the manifest
//! filename. There is no content sniffing or true-extension parsing.

/// The dependency manifest filename, expected at the tree root and
/// optionally inside the test directory.
pub const MANIFEST_FILE: &str = "deps.ts";

/// Marker a filename must contain to be searched for symbol usage.
pub const SOURCE_EXTENSION: &str = ".ts";

/// Candidate test directory names, probed in order; the first that exists
/// wins.
pub const TEST_DIR_CANDIDATES: &[&str] = &["test", "tests"];
