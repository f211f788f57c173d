use colored::Colorize;
use log::debug;
use std::io::{self, Write};

use crate::types::Declaration;

/// Emits one warning per unused declaration, in collection order.
///
/// Returns how many warnings were written.
pub fn print_unused<W: Write>(writer: &mut W, declarations: &[Declaration]) -> io::Result<usize> {
    let mut count = 0;
    for declaration in declarations.iter().filter(|d| !d.used) {
        writeln!(
            writer,
            "{}",
            format!(
                "Import \"{}\" is unused, originating from \"{}\"",
                declaration.name, declaration.origin
            )
            .yellow()
        )?;
        count += 1;
    }
    debug!("Reported {} unused declarations", count);
    writer.flush()?;
    Ok(count)
}

/// Confirmation printed after the manifests have been rewritten.
pub fn print_clean_message<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", "Cleaned up all unused imports".green())?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LinePattern;

    fn declaration(name: &str, origin: &str, used: bool) -> Declaration {
        Declaration {
            name: name.to_string(),
            origin: origin.to_string(),
            used,
            pattern: LinePattern::Bare(name.to_string()),
        }
    }

    #[test]
    fn test_warns_only_for_unused_in_collection_order() {
        let declarations = vec![
            declaration("heloo", "deps.ts", true),
            declaration("byee", "deps.ts", false),
            declaration("some", "tests/deps.ts", false),
        ];

        let mut out = Vec::new();
        let count = print_unused(&mut out, &declarations).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(count, 2);
        assert!(!text.contains("heloo"));
        let byee = text.find("Import \"byee\" is unused, originating from \"deps.ts\"").unwrap();
        let some =
            text.find("Import \"some\" is unused, originating from \"tests/deps.ts\"").unwrap();
        assert!(byee < some);
    }

    #[test]
    fn test_nothing_reported_when_all_used() {
        let declarations = vec![declaration("heloo", "deps.ts", true)];
        let mut out = Vec::new();
        let count = print_unused(&mut out, &declarations).unwrap();
        assert_eq!(count, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_clean_message() {
        let mut out = Vec::new();
        print_clean_message(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Cleaned up all unused imports"));
    }
}
