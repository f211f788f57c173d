use anyhow::{Context, Result, anyhow};
use log::info;
use std::{path::Path, process::Command};

/// Capability to format the source tree before a scan.
///
/// The scan phase must not start until this returns, since formatting
/// normalizes the manifest indentation the continuation shape depends on.
pub trait Formatter {
    fn format_tree(&self, root: &Path) -> Result<()>;
}

/// Formats the tree by running `deno fmt` and waiting for it to exit.
///
/// The subprocess inherits stdout and stderr, so its own summary output
/// reaches the terminal untouched, ahead of any unused-symbol warnings.
pub struct DenoFmt;

impl Formatter for DenoFmt {
    fn format_tree(&self, root: &Path) -> Result<()> {
        info!("Running deno fmt in {}", root.display());
        let status = Command::new("deno")
            .arg("fmt")
            .current_dir(root)
            .status()
            .with_context(|| format!("Failed to run deno fmt in {}", root.display()))?;
        if !status.success() {
            return Err(anyhow!("deno fmt exited with {}", status));
        }
        Ok(())
    }
}
