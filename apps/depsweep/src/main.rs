use anyhow::Result;
use clap::Parser;
use depsweep_unused::{Config, DenoFmt, Formatter};
use log::debug;
use std::io::{self, BufWriter};

fn main() -> Result<()> {
    env_logger::init();

    let cfg = Config::parse();
    debug!("Parsed CLI arguments: {:?}", cfg);

    let deno_fmt = DenoFmt;
    let formatter: Option<&dyn Formatter> = if cfg.fmt { Some(&deno_fmt) } else { None };

    let result = depsweep_unused::run_unused_check(&cfg, formatter)?;

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stderr = BufWriter::new(io::stderr());
    let unused_count = depsweep_unused::print_unused(&mut stderr, &result.declarations)?;

    if unused_count == 0 {
        debug!("No unused declarations");
        return Ok(());
    }

    if cfg.clean {
        let unused: Vec<_> = result.unused().collect();
        depsweep_unused::clean_manifests(&cfg.root, &unused)?;
        let mut stdout = BufWriter::new(io::stdout());
        depsweep_unused::print_clean_message(&mut stdout)?;
    }

    // Non-zero exit to fail CI
    std::process::exit(1);
}
