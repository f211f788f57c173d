use anyhow::{Context, Result};
use log::{debug, trace};
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};

use crate::{
    parser::match_named_list,
    types::{Declaration, LinePattern},
};

/// Returns `text` with the declaration lines of `unused` removed.
///
/// All line edits are decided against the original line sequence before any
/// output is built, so a deletion can never shift the index of a later
/// match. Each declaration affects at most one physical line, the first one
/// its pattern matches. Unused names sharing a one-line export list are
/// removed from the list together; the line itself is only dropped once no
/// name survives on it. Leading blank lines are stripped from the result.
pub fn rewrite_manifest(text: &str, unused: &[&Declaration]) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let mut pending_bare: HashSet<&str> = HashSet::new();
    let mut pending_lines: Vec<&Declaration> = Vec::new();
    for &declaration in unused {
        match &declaration.pattern {
            LinePattern::Bare(name) => {
                pending_bare.insert(name);
            }
            _ => pending_lines.push(declaration),
        }
    }

    let mut deleted: HashSet<usize> = HashSet::new();
    let mut replaced: HashMap<usize, String> = HashMap::new();

    for (index, line) in lines.iter().enumerate() {
        if !pending_bare.is_empty()
            && let Some(names) = match_named_list(line)
        {
            let kept: Vec<&str> = names
                .iter()
                .map(String::as_str)
                .filter(|name| !pending_bare.contains(name))
                .collect();
            if kept.len() < names.len() {
                for name in &names {
                    pending_bare.remove(name.as_str());
                }
                if kept.is_empty() {
                    trace!("Deleting line {}: every name on it is unused", index + 1);
                    deleted.insert(index);
                } else {
                    trace!("Rewriting line {}: keeping {:?}", index + 1, kept);
                    replaced.insert(index, rebuild_list_line(line, &kept));
                }
                continue;
            }
        }

        let before = pending_lines.len();
        pending_lines.retain(|declaration| !declaration.pattern.matches_line(line));
        if pending_lines.len() < before {
            trace!("Deleting line {}", index + 1);
            deleted.insert(index);
        }
    }

    if deleted.is_empty() && replaced.is_empty() {
        return text.to_string();
    }

    let mut kept_lines: Vec<String> = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        if deleted.contains(&index) {
            continue;
        }
        match replaced.remove(&index) {
            Some(rebuilt) => kept_lines.push(rebuilt),
            None => kept_lines.push((*line).to_string()),
        }
    }

    while kept_lines.first().is_some_and(|line| line.is_empty()) {
        kept_lines.remove(0);
    }

    kept_lines.join("\n")
}

/// Splices the surviving names back between the braces of a one-line list.
fn rebuild_list_line(line: &str, kept: &[&str]) -> String {
    let Some(open) = line.find('{') else {
        return line.to_string();
    };
    let Some(close) = line[open..].find('}').map(|offset| open + offset) else {
        return line.to_string();
    };
    format!("{}{{ {} }}{}", &line[..open], kept.join(", "), &line[close + 1..])
}

/// Rewrites every manifest that still carries unused declarations.
///
/// Manifests are processed in collection order and rewritten at most once
/// per run; a manifest whose text comes back unchanged is not written,
/// which makes a second pass over an already-cleaned tree a no-op.
pub fn clean_manifests(root: &Path, unused: &[&Declaration]) -> Result<()> {
    let mut origins: Vec<&str> = Vec::new();
    let mut by_origin: HashMap<&str, Vec<&Declaration>> = HashMap::new();
    for &declaration in unused {
        let entry = by_origin.entry(declaration.origin.as_str()).or_default();
        if entry.is_empty() {
            origins.push(declaration.origin.as_str());
        }
        entry.push(declaration);
    }

    for origin in origins {
        let path = root.join(origin);
        debug!("Cleaning {}", path.display());
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let cleaned = rewrite_manifest(&text, &by_origin[origin]);
        if cleaned == text {
            debug!("{} already clean", path.display());
            continue;
        }
        fs::write(&path, &cleaned)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_manifest;
    use tempfile::TempDir;

    fn unused<'a>(declarations: &'a [Declaration], names: &[&str]) -> Vec<&'a Declaration> {
        declarations.iter().filter(|d| names.contains(&d.name.as_str())).collect()
    }

    #[test]
    fn test_removes_line_when_every_name_is_unused() {
        let text = "export { a, b } from \"m\";\nexport { keep } from \"n\";\n";
        let declarations = parse_manifest(text, "deps.ts");
        let result = rewrite_manifest(text, &unused(&declarations, &["a", "b"]));
        assert_eq!(result, "export { keep } from \"n\";\n");
    }

    #[test]
    fn test_keeps_surviving_names_on_shared_line() {
        let text = "export { heloo, byee, good } from \"hh\";\n";
        let declarations = parse_manifest(text, "deps.ts");
        let result = rewrite_manifest(text, &unused(&declarations, &["byee", "good"]));
        assert_eq!(result, "export { heloo } from \"hh\";\n");
    }

    #[test]
    fn test_deletes_continuation_lines_from_block() {
        let text = "export {\n  aaa,\n  bbb,\n  ccc,\n} from \"x\";\n";
        let declarations = parse_manifest(text, "deps.ts");
        let result = rewrite_manifest(text, &unused(&declarations, &["bbb"]));
        assert_eq!(result, "export {\n  aaa,\n  ccc,\n} from \"x\";\n");
    }

    #[test]
    fn test_star_forwarding_line_is_deleted() {
        let declarations =
            parse_manifest("export * as colours from \"https://x/mod.ts\";\n", "deps.ts");
        let text = "export * from colours\nexport { keep } from \"n\";\n";
        let result = rewrite_manifest(text, &unused(&declarations, &["colours"]));
        assert_eq!(result, "export { keep } from \"n\";\n");
    }

    #[test]
    fn test_star_declaration_line_itself_is_not_matched() {
        // Aliased star exports are located through the forwarding form only
        let manifest = "export * as colours from \"https://x/mod.ts\";\n";
        let declarations = parse_manifest(manifest, "deps.ts");
        let result = rewrite_manifest(manifest, &unused(&declarations, &["colours"]));
        assert_eq!(result, manifest);
    }

    #[test]
    fn test_first_matching_line_only() {
        let declarations = parse_manifest("export * as colours from \"m\";\n", "deps.ts");
        let text = "export * from colours\nexport * from colours\n";
        let result = rewrite_manifest(text, &unused(&declarations, &["colours"]));
        assert_eq!(result, "export * from colours\n");
    }

    #[test]
    fn test_strips_leading_blank_lines() {
        let text = "export { a } from \"m\";\n\nexport { keep } from \"n\";\n";
        let declarations = parse_manifest(text, "deps.ts");
        let result = rewrite_manifest(text, &unused(&declarations, &["a"]));
        assert_eq!(result, "export { keep } from \"n\";\n");
    }

    #[test]
    fn test_no_matches_returns_text_unchanged() {
        let declarations = parse_manifest("export { gone } from \"m\";\n", "deps.ts");
        let text = "export { other } from \"n\";\n";
        let result = rewrite_manifest(text, &unused(&declarations, &["gone"]));
        assert_eq!(result, text);
    }

    #[test]
    fn test_deletions_do_not_shift_later_matches() {
        let text =
            "export { a } from \"m\";\nexport { keep } from \"n\";\nexport { b } from \"o\";\n";
        let declarations = parse_manifest(text, "deps.ts");
        let result = rewrite_manifest(text, &unused(&declarations, &["a", "b"]));
        assert_eq!(result, "export { keep } from \"n\";\n");
    }

    #[test]
    fn test_clean_manifests_writes_and_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = temp_dir.path().join("deps.ts");
        fs::write(&manifest, "export { a, keep } from \"m\";\n").unwrap();
        let declarations = parse_manifest("export { a, keep } from \"m\";\n", "deps.ts");
        let selected = unused(&declarations, &["a"]);

        clean_manifests(temp_dir.path(), &selected).unwrap();
        let first = fs::read_to_string(&manifest).unwrap();
        assert_eq!(first, "export { keep } from \"m\";\n");

        // Second pass finds nothing to change and leaves the file alone
        clean_manifests(temp_dir.path(), &selected).unwrap();
        assert_eq!(fs::read_to_string(&manifest).unwrap(), first);
    }
}
